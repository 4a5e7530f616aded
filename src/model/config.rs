use super::*;

// 特殊条件の役のフラグ 状況に応じて外部から設定を行う
// 面前かどうかは鳴きの有無から導出されるためフラグには含まない
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct HandStatus {
    pub tsumo: bool,         // ツモ和了
    pub riichi: bool,        // 立直
    pub double_riichi: bool, // 両立直
    pub ippatsu: bool,       // 一発
    pub haitei: bool,        // 海底摸月
    pub houtei: bool,        // 河底撈魚
    pub rinshan: bool,       // 嶺上開花
    pub chankan: bool,       // 槍槓
    pub tenhou: bool,        // 天和
    pub chiihou: bool,       // 地和
}

// 局の状況 (エンジンは読み取りのみ)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundContext {
    pub prevalent_wind: Tnum, // 場風 (東: 1, 南: 2, 西: 3, 北: 4)
    pub seat_wind: Tnum,      // 自風 (同上, 東なら親番)
    pub players: usize,       // プレイヤー数 (3 or 4)
    pub doras: Vec<Tile>,     // ドラ表示牌 (ドラそのものではない)
    pub ura_doras: Vec<Tile>, // 裏ドラ表示牌 リーチしていない場合は空
    pub n_bei_dora: usize,    // 北ドラの数 (三麻)
}

impl RoundContext {
    #[inline]
    pub fn is_dealer(&self) -> bool {
        self.seat_wind == WE
    }
}

impl Default for RoundContext {
    fn default() -> Self {
        Self {
            prevalent_wind: WE,
            seat_wind: WE,
            players: 4,
            doras: vec![],
            ura_doras: vec![],
            n_bei_dora: 0,
        }
    }
}

// 得点計算の方式 排他的な2つの特殊ルールを切り替える
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct RuleConfig {
    pub uncapped: bool,    // 青天井 (満貫による打ち切りなし)
    pub fixed_table: bool, // 4翻以下を固定点数表で支払うルール
}
