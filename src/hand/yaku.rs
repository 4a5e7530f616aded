use std::fmt;

use crate::model::*;

use super::parse::{Block, BlockType, Decomposition};
use super::win::is_kokushi_win;

use BlockType::*;

#[derive(Debug)]
pub struct YakuContext {
    hand: TileTable,           // 元々の手牌(鳴きは含まない) 国士, 九蓮宝燈の判定などに使用
    decomposition: Decomposition, // 鳴きを含むすべての面子
    pair_tile: Tile,           // 雀頭の牌
    winning_tile: Tile,        // 和了牌
    is_open: bool,             // 鳴きの有無 (暗槓は含まない)
    prevalent_wind: Tnum,      // 場風
    seat_wind: Tnum,           // 自風
    status: HandStatus,        // 特殊条件の役のフラグ
    counts: Counts,            // 面子や牌種別のカウント
    iipeikou_count: usize,     // 一盃口, 二盃口用
    yakuhai_check: TileRow,    // 字牌面子のカウント(雀頭は含まない)
}

impl YakuContext {
    pub fn new(
        hand: TileTable,
        decomposition: Decomposition,
        winning_tile: Tile,
        prevalent_wind: Tnum,
        seat_wind: Tnum,
        status: HandStatus,
    ) -> Self {
        let pair_tile = find_pair(&decomposition);
        let counts = count_blocks(&decomposition);
        let iipeikou_count = count_iipeikou(&decomposition);
        let yakuhai_check = check_yakuhai(&decomposition);
        let is_open = counts.chi + counts.pon + counts.minkan != 0;

        Self {
            hand,
            decomposition,
            pair_tile,
            winning_tile: winning_tile.to_normal(),
            is_open,
            prevalent_wind,
            seat_wind,
            status,
            counts,
            iipeikou_count,
            yakuhai_check,
        }
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    // (役一覧, 翻数, 役満倍数)を返却 役満成立時は役満未満の役を除外
    pub fn calc_yaku(&self) -> (Vec<&'static Yaku>, usize, usize) {
        let mut yakus = vec![];
        for y in YAKU_LIST {
            if (y.func)(self) {
                yakus.push(y)
            }
        }

        let yakumans: Vec<&'static Yaku> =
            yakus.iter().filter(|y| y.yakuman > 0).copied().collect();

        if !yakumans.is_empty() {
            let mut times = 0;
            for y in &yakumans {
                times += y.yakuman;
            }
            (yakumans, 0, times)
        } else {
            let mut fan = 0;
            for y in &yakus {
                fan += if self.is_open { y.fan_open } else { y.fan_close };
            }
            (yakus, fan, 0)
        }
    }

    pub fn calc_fu(&self) -> usize {
        if is_pinfu(self) {
            // 平和はツモ20符/ロン30符
            return if self.status.tsumo { 20 } else { 30 };
        }
        if is_chiitoitsu(self) {
            return 25;
        }

        // 副底
        let mut fu = 20;

        // 和了り方
        fu += if self.status.tsumo {
            2 // ツモ
        } else if !self.is_open {
            10 // 門前ロン
        } else {
            0
        };

        // 面子, 雀頭
        for Block(tp, t) in &self.decomposition {
            match tp {
                Pair => {
                    // 役牌の雀頭のみ2符 連風牌でも加算は一度だけ
                    let yakuhai = t.is_doragon()
                        || (t.is_wind() && (t.1 == self.prevalent_wind || t.1 == self.seat_wind));
                    fu += if yakuhai { 2 } else { 0 }
                }
                Koutsu => fu += if t.is_end() { 8 } else { 4 },
                Pon => fu += if t.is_end() { 4 } else { 2 },
                Minkan => fu += if t.is_end() { 16 } else { 8 },
                Ankan => fu += if t.is_end() { 32 } else { 16 },
                _ => {}
            }
        }

        // 待ちの形 両面・シャンポン以外は2符
        if !self.has_open_wait() {
            fu += 2;
        }

        let fu = (fu + 9) / 10 * 10; // 1の位は切り上げ

        // 食い平和形は30符
        if fu == 20 && self.is_open { 30 } else { fu }
    }

    // 和了牌が両面待ちまたはシャンポン待ちに該当するか
    // 123の3や789の7は辺張なので含まない
    fn has_open_wait(&self) -> bool {
        let wt = &self.winning_tile;
        for Block(tp, t) in &self.decomposition {
            match tp {
                Shuntsu => {
                    if t.0 == wt.0
                        && ((t.1 == wt.1 && wt.1 <= 6) || (wt.1 >= 4 && t.1 == wt.1 - 2))
                    {
                        return true;
                    }
                }
                Koutsu => {
                    if t == wt {
                        return true;
                    }
                }
                _ => {}
            }
        }
        false
    }
}

#[derive(Debug, Default)]
struct Counts {
    shuntsu: usize,
    koutsu: usize,
    chi: usize,
    pon: usize,
    minkan: usize,
    ankan: usize,
    shuntsu_total: usize, // shuntsu + chi
    koutsu_total: usize,  // koutsu + pon + minkan + ankan
    ankou_total: usize,   // koutsu + ankan
    kantsu_total: usize,  // minkan + ankan
    tis: [usize; TYPE],   // 牌種別の面子数
    nis: [usize; TNUM],   // 数字別の面子数(字牌は除外)
}

fn find_pair(dec: &Decomposition) -> Tile {
    for &Block(tp, t) in dec {
        if let Pair = tp {
            return t;
        }
    }
    Z8 // 雀頭なし(国士無双)
}

fn count_blocks(dec: &Decomposition) -> Counts {
    let mut cnt = Counts::default();
    for Block(tp, t) in dec {
        match tp {
            Pair => {}
            Shuntsu => cnt.shuntsu += 1,
            Koutsu => cnt.koutsu += 1,
            Chi => cnt.chi += 1,
            Pon => cnt.pon += 1,
            Minkan => cnt.minkan += 1,
            Ankan => cnt.ankan += 1,
        }

        cnt.tis[t.0] += 1;
        if t.is_suit() {
            cnt.nis[t.1] += 1;
        }
    }
    cnt.shuntsu_total = cnt.shuntsu + cnt.chi;
    cnt.koutsu_total = cnt.koutsu + cnt.pon + cnt.minkan + cnt.ankan;
    cnt.ankou_total = cnt.koutsu + cnt.ankan;
    cnt.kantsu_total = cnt.minkan + cnt.ankan;

    cnt
}

fn count_iipeikou(dec: &Decomposition) -> usize {
    let mut n = 0;
    let mut shuntsu = TileTable::default();
    for Block(tp, t) in dec {
        if let Shuntsu = tp {
            shuntsu[t.0][t.1] += 1;
            if shuntsu[t.0][t.1] == 2 {
                n += 1;
            }
        }
    }

    n
}

fn check_yakuhai(dec: &Decomposition) -> TileRow {
    let mut tr = TileRow::default();
    for Block(tp, t) in dec {
        match tp {
            Koutsu | Pon | Minkan | Ankan => {
                if t.is_hornor() {
                    tr[t.1] += 1;
                }
            }
            _ => {}
        }
    }

    tr
}

pub struct Yaku {
    pub name: &'static str,
    pub func: fn(&YakuContext) -> bool,
    pub fan_close: usize, // 鳴きなしの翻
    pub fan_open: usize,  // 鳴きありの翻(食い下がり) 0は鳴きで不成立
    pub yakuman: usize,   // 役満倍数 0は通常役
}

impl fmt::Debug for Yaku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.name, self.fan_close, self.fan_open, self.yakuman
        )
    }
}

macro_rules! yaku {
    ($n: expr, $f: expr, $c: expr, $o: expr, $y: expr) => {
        Yaku {
            name: $n,
            func: $f,
            fan_close: $c,
            fan_open: $o,
            yakuman: $y,
        }
    };
}

static YAKU_LIST: &[Yaku] = &[
    yaku!("場風", is_bakaze, 1, 1, 0),
    yaku!("自風", is_jikaze, 1, 1, 0),
    yaku!("白", is_haku, 1, 1, 0),
    yaku!("發", is_hatsu, 1, 1, 0),
    yaku!("中", is_chun, 1, 1, 0),
    yaku!("断么九", is_tanyaochuu, 1, 1, 0),
    yaku!("平和", is_pinfu, 1, 0, 0),
    yaku!("一盃口", is_iipeikou, 1, 0, 0),
    yaku!("二盃口", is_ryanpeikou, 3, 0, 0),
    yaku!("一気通貫", is_ikkitsuukan, 2, 1, 0),
    yaku!("三色同順", is_sanshokudoujun, 2, 1, 0),
    yaku!("三色同刻", is_sanshokudoukou, 2, 2, 0),
    yaku!("チャンタ", is_chanta, 2, 1, 0),
    yaku!("純チャン", is_junchan, 3, 2, 0),
    yaku!("混老頭", is_honroutou, 2, 2, 0),
    yaku!("清老頭", is_chinroutou, 0, 0, 1),
    yaku!("対々和", is_toitoihou, 2, 2, 0),
    yaku!("三暗刻", is_sanankou, 2, 2, 0),
    yaku!("四暗刻", is_suuankou, 0, 0, 1),
    yaku!("四暗刻単騎", is_suuankoutanki, 0, 0, 2),
    yaku!("三槓子", is_sankantsu, 2, 2, 0),
    yaku!("四槓子", is_suukantsu, 0, 0, 1),
    yaku!("混一色", is_honiisou, 3, 2, 0),
    yaku!("清一色", is_chiniisou, 6, 5, 0),
    yaku!("小三元", is_shousangen, 2, 2, 0),
    yaku!("大三元", is_daisangen, 0, 0, 1),
    yaku!("小四喜", is_shousuushii, 0, 0, 1),
    yaku!("大四喜", is_daisuushii, 0, 0, 2),
    yaku!("緑一色", is_ryuuiisou, 0, 0, 1),
    yaku!("字一色", is_tuuiisou, 0, 0, 1),
    yaku!("九蓮宝燈", is_chuurenpoutou, 0, 0, 1),
    yaku!("純正九蓮宝燈", is_junseichuurenpoutou, 0, 0, 2),
    // 特殊な組み合わせ
    yaku!("国士無双", is_kokushimusou, 0, 0, 1),
    yaku!("国士無双十三面待ち", is_kokushimusoujuusanmenmachi, 0, 0, 2),
    yaku!("七対子", is_chiitoitsu, 2, 0, 0),
    // 特殊条件
    yaku!("門前自摸", is_menzentsumo, 1, 0, 0),
    yaku!("立直", is_riichi, 1, 0, 0),
    yaku!("両立直", is_double_riichi, 2, 0, 0),
    yaku!("一発", is_ippatsu, 1, 0, 0),
    yaku!("海底摸月", is_haitei, 1, 1, 0),
    yaku!("河底撈魚", is_houtei, 1, 1, 0),
    yaku!("嶺上開花", is_rinshan, 1, 1, 0),
    yaku!("槍槓", is_chankan, 1, 1, 0),
    yaku!("天和", is_tenhou, 0, 0, 1),
    yaku!("地和", is_chiihou, 0, 0, 1),
];

// 役の優先順位 =================================================================
// * 役満が存在する場合は役満以外の役は削除
// * 以下の役は排他的(包含関係)であり右側を優先
//     一盃口, 二盃口
//     チャンタ, 純チャン
//     混老頭, 清老頭
//     三暗刻, 四暗刻, 四暗刻単騎
//     三槓子, 四槓子
//     小四喜, 大四喜
//     九蓮宝燈, 純正九蓮宝燈
//     国士無双, 国士無双十三面待ち

// 場風
fn is_bakaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.prevalent_wind] == 1
}

// 自風
fn is_jikaze(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[ctx.seat_wind] == 1
}

// 白
fn is_haku(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DW] == 1
}

// 發
fn is_hatsu(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DG] == 1
}

// 中
fn is_chun(ctx: &YakuContext) -> bool {
    ctx.yakuhai_check[DR] == 1
}

// 断么九
fn is_tanyaochuu(ctx: &YakuContext) -> bool {
    if ctx.decomposition.is_empty() {
        return false; // 国士対策
    }

    for Block(tp, t) in &ctx.decomposition {
        match tp {
            Chi | Shuntsu => {
                if t.1 == 1 || t.1 == 7 {
                    return false;
                }
            }
            _ => {
                if t.is_end() {
                    return false;
                }
            }
        }
    }

    true
}

// 平和
fn is_pinfu(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu != 4 {
        return false;
    }

    let pt = &ctx.pair_tile;
    if pt.is_doragon() || (pt.is_wind() && (pt.1 == ctx.prevalent_wind || pt.1 == ctx.seat_wind)) {
        return false;
    }

    // 両面待ちのみ成立
    !ctx.winning_tile.is_hornor() && ctx.has_open_wait()
}

// 一盃口
fn is_iipeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 1
}

// 二盃口
fn is_ryanpeikou(ctx: &YakuContext) -> bool {
    !ctx.is_open && ctx.iipeikou_count == 2
}

// 一気通貫
fn is_ikkitsuukan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let mut f147 = [false; 3];
    for Block(tp, t) in &ctx.decomposition {
        match tp {
            Shuntsu | Chi => {
                if ctx.counts.tis[t.0] >= 3 {
                    match t.1 {
                        1 | 4 | 7 => f147[t.1 / 3] = true,
                        _ => {}
                    }
                }
            }
            _ => {}
        }
    }

    f147[0] && f147[1] && f147[2]
}

// 三色同順
fn is_sanshokudoujun(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total < 3 {
        return false;
    }

    let mut mps = [false; 3];
    for Block(tp, t) in &ctx.decomposition {
        match tp {
            Shuntsu | Chi => {
                if t.is_suit() && ctx.counts.nis[t.1] >= 3 {
                    mps[t.0] = true;
                }
            }
            _ => {}
        }
    }

    mps[0] && mps[1] && mps[2]
}

// 三色同刻
fn is_sanshokudoukou(ctx: &YakuContext) -> bool {
    if ctx.counts.koutsu_total < 3 {
        return false;
    }

    let mut mps = [false; 3];
    for Block(tp, t) in &ctx.decomposition {
        match tp {
            Koutsu | Pon | Minkan | Ankan => {
                if t.is_suit() && ctx.counts.nis[t.1] >= 3 {
                    mps[t.0] = true;
                }
            }
            _ => {}
        }
    }

    mps[0] && mps[1] && mps[2]
}

// チャンタ
fn is_chanta(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    let mut has_hornor = false;
    for Block(tp, t) in &ctx.decomposition {
        match tp {
            Pair | Koutsu | Pon | Minkan | Ankan => {
                if t.is_hornor() {
                    has_hornor = true;
                } else if !t.is_terminal() {
                    return false;
                }
            }
            Shuntsu | Chi => {
                if t.1 != 1 && t.1 != 7 {
                    return false;
                }
            }
        }
    }

    has_hornor
}

// 純チャン
fn is_junchan(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total == 0 {
        return false;
    }

    for Block(tp, t) in &ctx.decomposition {
        match tp {
            Pair | Koutsu | Pon | Minkan | Ankan => {
                if !t.is_terminal() {
                    return false;
                }
            }
            Shuntsu | Chi => {
                if t.1 != 1 && t.1 != 7 {
                    return false;
                }
            }
        }
    }

    true
}

// 混老頭
fn is_honroutou(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total != 0 {
        return false;
    }

    let mut has_hornor = false;
    let mut has_terminal = false;
    for Block(_, t) in &ctx.decomposition {
        if t.is_hornor() {
            has_hornor = true;
        } else if t.is_terminal() {
            has_terminal = true;
        } else {
            return false;
        }
    }

    has_hornor && has_terminal
}

// 清老頭
fn is_chinroutou(ctx: &YakuContext) -> bool {
    if ctx.counts.shuntsu_total != 0 {
        return false;
    }

    let mut has_terminal = false;
    for Block(_, t) in &ctx.decomposition {
        if t.is_terminal() {
            has_terminal = true;
        } else {
            return false;
        }
    }

    has_terminal
}

// 対々和
fn is_toitoihou(ctx: &YakuContext) -> bool {
    ctx.counts.koutsu_total == 4
}

// 三暗刻
fn is_sanankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 3
}

// 四暗刻
fn is_suuankou(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 4 && ctx.winning_tile != ctx.pair_tile && ctx.status.tsumo
}

// 四暗刻単騎
fn is_suuankoutanki(ctx: &YakuContext) -> bool {
    ctx.counts.ankou_total == 4 && ctx.winning_tile == ctx.pair_tile
}

// 三槓子
fn is_sankantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 3
}

// 四槓子
fn is_suukantsu(ctx: &YakuContext) -> bool {
    ctx.counts.kantsu_total == 4
}

// 混一色
fn is_honiisou(ctx: &YakuContext) -> bool {
    use std::cmp::min;
    let tis = &ctx.counts.tis;
    let suit = min(tis[TM], 1) + min(tis[TP], 1) + min(tis[TS], 1);
    suit == 1 && tis[TZ] > 0
}

// 清一色
fn is_chiniisou(ctx: &YakuContext) -> bool {
    use std::cmp::min;
    let tis = &ctx.counts.tis;
    let suit = min(tis[TM], 1) + min(tis[TP], 1) + min(tis[TS], 1);
    suit == 1 && tis[TZ] == 0
}

// 小三元
fn is_shousangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 2 && ctx.pair_tile.is_doragon()
}

// 大三元
fn is_daisangen(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[DW] + yc[DG] + yc[DR] == 3
}

// 小四喜
fn is_shousuushii(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 3 && ctx.pair_tile.is_wind()
}

// 大四喜
fn is_daisuushii(ctx: &YakuContext) -> bool {
    let yc = &ctx.yakuhai_check;
    yc[WE] + yc[WS] + yc[WW] + yc[WN] == 4
}

// 緑一色
fn is_ryuuiisou(ctx: &YakuContext) -> bool {
    let tis = &ctx.counts.tis;
    if tis[TS] + tis[TZ] != 5 {
        return false;
    }

    for Block(tp, t) in &ctx.decomposition {
        match tp {
            Pair | Koutsu | Pon | Minkan | Ankan => {
                if t.is_hornor() {
                    if t.1 != DG {
                        return false;
                    }
                } else {
                    match t.1 {
                        2 | 3 | 4 | 6 | 8 => {}
                        _ => return false,
                    }
                }
            }
            Shuntsu | Chi => {
                if t.1 != 2 {
                    // 順子は234以外は不可
                    return false;
                }
            }
        }
    }

    true
}

// 字一色
fn is_tuuiisou(ctx: &YakuContext) -> bool {
    (ctx.decomposition.len() == 5 && ctx.counts.tis[TZ] == 5) || ctx.counts.tis[TZ] == 7
}

// 九蓮宝燈
fn is_chuurenpoutou(ctx: &YakuContext) -> bool {
    let wt = &ctx.winning_tile;
    let cnt = ctx.hand[wt.0][wt.1];
    is_chuurenpoutou_shape(ctx) && (cnt == 1 || cnt == 3)
}

// 純正九蓮宝燈
fn is_junseichuurenpoutou(ctx: &YakuContext) -> bool {
    let wt = &ctx.winning_tile;
    let cnt = ctx.hand[wt.0][wt.1];
    is_chuurenpoutou_shape(ctx) && (cnt == 2 || cnt == 4)
}

// 国士無双
fn is_kokushimusou(ctx: &YakuContext) -> bool {
    if !ctx.decomposition.is_empty() {
        return false;
    }
    let wt = &ctx.winning_tile;
    is_kokushi_win(&ctx.hand) && ctx.hand[wt.0][wt.1] != 2
}

// 国士無双十三面待ち
fn is_kokushimusoujuusanmenmachi(ctx: &YakuContext) -> bool {
    if !ctx.decomposition.is_empty() {
        return false;
    }
    let wt = &ctx.winning_tile;
    is_kokushi_win(&ctx.hand) && ctx.hand[wt.0][wt.1] == 2
}

// 七対子
fn is_chiitoitsu(ctx: &YakuContext) -> bool {
    ctx.decomposition.len() == 7
}

// 門前自摸
fn is_menzentsumo(ctx: &YakuContext) -> bool {
    ctx.status.tsumo && !ctx.is_open
}

// 立直
fn is_riichi(ctx: &YakuContext) -> bool {
    ctx.status.riichi && !ctx.status.double_riichi
}

// 両立直
fn is_double_riichi(ctx: &YakuContext) -> bool {
    ctx.status.double_riichi
}

// 一発
fn is_ippatsu(ctx: &YakuContext) -> bool {
    ctx.status.ippatsu
}

// 海底摸月
fn is_haitei(ctx: &YakuContext) -> bool {
    ctx.status.haitei
}

// 河底撈魚
fn is_houtei(ctx: &YakuContext) -> bool {
    ctx.status.houtei
}

// 嶺上開花
fn is_rinshan(ctx: &YakuContext) -> bool {
    ctx.status.rinshan
}

// 槍槓
fn is_chankan(ctx: &YakuContext) -> bool {
    ctx.status.chankan
}

// 天和
fn is_tenhou(ctx: &YakuContext) -> bool {
    ctx.status.tenhou
}

// 地和
fn is_chiihou(ctx: &YakuContext) -> bool {
    ctx.status.chiihou
}

// 共通処理 ====================================================================

// 九蓮宝燈(純正を含む)
fn is_chuurenpoutou_shape(ctx: &YakuContext) -> bool {
    if ctx.is_open {
        return false;
    }

    let tis = &ctx.counts.tis;
    let ti = if tis[TM] == 5 {
        TM
    } else if tis[TP] == 5 {
        TP
    } else if tis[TS] == 5 {
        TS
    } else {
        return false;
    };

    let h = &ctx.hand;
    if h[ti][1] < 3 || h[ti][9] < 3 {
        return false;
    }
    for ni in 2..9 {
        if h[ti][ni] == 0 {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::parse::{decompose_chiitoitsu, decompose_kokushi, decompose_normal};
    use crate::util::common::{tiles_from_string, tiles_to_tile_table};

    fn contexts(exp: &str, winning_tile: Tile, status: HandStatus) -> Vec<YakuContext> {
        let tt = tiles_to_tile_table(&tiles_from_string(exp).unwrap());
        let mut decs = decompose_normal(&tt);
        decs.append(&mut decompose_chiitoitsu(&tt));
        decs.append(&mut decompose_kokushi(&tt));
        decs.into_iter()
            .map(|dec| YakuContext::new(tt, dec, winning_tile, WE, WS, status))
            .collect()
    }

    fn has_yaku(ctxs: &[YakuContext], name: &str) -> bool {
        ctxs.iter()
            .any(|ctx| ctx.calc_yaku().0.iter().any(|y| y.name == name))
    }

    #[test]
    fn test_pinfu() {
        let tsumo = HandStatus {
            tsumo: true,
            ..Default::default()
        };
        // 両面待ち + 役無し雀頭
        let ctxs = contexts("m234567p234s67855", Tile(TS, 8), tsumo);
        assert!(has_yaku(&ctxs, "平和"));
        assert_eq!(ctxs[0].calc_fu(), 20);

        // 単騎待ちは不成立
        let ctxs = contexts("m234567p234567s88", Tile(TS, 8), tsumo);
        assert!(!has_yaku(&ctxs, "平和"));

        // 役牌雀頭は不成立
        let ctxs = contexts("m234567p234s678z55", Tile(TS, 8), tsumo);
        assert!(!has_yaku(&ctxs, "平和"));
    }

    #[test]
    fn test_tanyao() {
        let ron = HandStatus::default();
        let ctxs = contexts("m23344577p444s678", Tile(TM, 7), ron);
        assert!(has_yaku(&ctxs, "断么九"));
        // 門前ロン + 暗刻p444 + 単騎: 20 + 10 + 4 + 2 = 36 → 40
        assert_eq!(ctxs[0].calc_fu(), 40);

        let ctxs = contexts("m123456p444s67855", Tile(TM, 1), ron);
        assert!(!has_yaku(&ctxs, "断么九"));
    }

    #[test]
    fn test_yakuhai() {
        let ron = HandStatus::default();
        let ctxs = contexts("m234p234s67855z555", Tile(TS, 8), ron);
        assert!(has_yaku(&ctxs, "白"));

        // 場風(東)と自風(南)
        let ctxs = contexts("m234p234s67855z111", Tile(TS, 8), ron);
        assert!(has_yaku(&ctxs, "場風"));
        assert!(!has_yaku(&ctxs, "自風"));
        let ctxs = contexts("m234p234s67855z222", Tile(TS, 8), ron);
        assert!(has_yaku(&ctxs, "自風"));
    }

    #[test]
    fn test_chanta_junchan() {
        let ron = HandStatus::default();
        let ctxs = contexts("m123999p123s78911", Tile(TS, 9), ron);
        assert!(has_yaku(&ctxs, "純チャン"));
        assert!(!has_yaku(&ctxs, "チャンタ"));

        let ctxs = contexts("m123999p123s789z11", Tile(TM, 1), ron);
        assert!(has_yaku(&ctxs, "チャンタ"));
        assert!(!has_yaku(&ctxs, "純チャン"));
    }

    #[test]
    fn test_suuankou() {
        let tsumo = HandStatus {
            tsumo: true,
            ..Default::default()
        };
        // ツモによる四暗刻
        let ctxs = contexts("m111222p333s44455", Tile(TS, 4), tsumo);
        assert!(has_yaku(&ctxs, "四暗刻"));

        // 単騎待ちはダブル役満
        let ctxs = contexts("m111222p333s44455", Tile(TS, 5), tsumo);
        assert!(has_yaku(&ctxs, "四暗刻単騎"));
        let (_, _, times) = ctxs
            .iter()
            .map(|c| c.calc_yaku())
            .max_by_key(|r| r.2)
            .unwrap();
        assert_eq!(times, 2);

        // シャンポンのロンでは不成立
        // ロンで完成した刻子も暗刻として数えるため三暗刻への降格も行わない
        let ron = HandStatus::default();
        let ctxs = contexts("m111222p333s44455", Tile(TS, 4), ron);
        assert!(!has_yaku(&ctxs, "四暗刻"));
        assert!(!has_yaku(&ctxs, "三暗刻"));
        assert!(has_yaku(&ctxs, "対々和"));
    }

    #[test]
    fn test_kokushi() {
        let tsumo = HandStatus {
            tsumo: true,
            ..Default::default()
        };
        let ctxs = contexts("m19p19s19z12345677", Tile(TZ, 7), tsumo);
        assert!(has_yaku(&ctxs, "国士無双十三面待ち"));

        let ctxs = contexts("m199p19s19z1234567", Tile(TZ, 7), tsumo);
        assert!(has_yaku(&ctxs, "国士無双"));
        assert!(!has_yaku(&ctxs, "国士無双十三面待ち"));
    }

    #[test]
    fn test_chiitoitsu() {
        let ron = HandStatus::default();
        let ctxs = contexts("m1122p3344s5566z11", Tile(TZ, 1), ron);
        assert!(has_yaku(&ctxs, "七対子"));
        assert_eq!(ctxs[0].calc_fu(), 25);

        // 二盃口形は二盃口(3翻)と七対子(2翻)の両方の解釈を生成
        let ctxs = contexts("m112233p445566z11", Tile(TZ, 1), ron);
        assert!(has_yaku(&ctxs, "二盃口"));
        assert!(has_yaku(&ctxs, "七対子"));
    }
}
