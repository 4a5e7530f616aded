use std::cmp::Ordering;

use super::*;

// 基本点の固定値
pub const MANGAN: Point = 2000; // 満貫
pub const HANEMAN: Point = 3000; // 跳満
pub const BAIMAN: Point = 4000; // 倍満
pub const SANBAIMAN: Point = 6000; // 三倍満
pub const YAKUMAN: Point = 8000; // 役満
pub const YAKUMAN_BASE_FAN: usize = 13; // 役満1つ分に相当する翻数 (青天井用)

// 成立した役1つ分の情報
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YakuValue {
    pub name: String,
    pub fan: usize,     // 翻数 (役満の場合は役満倍数)
    pub yakuman: bool,  // 役満かどうか
}

// 和了1回分の得点情報
// 構築時に翻数の合計と基本点を確定し,以後は読み取りのみ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointInfo {
    pub fu: usize,               // 符数
    pub yakus: Vec<YakuValue>,   // 役一覧 (ドラは含まない)
    pub n_dora: usize,           // ドラの数
    pub n_ura_dora: usize,       // 裏ドラの数
    pub n_red_dora: usize,       // 赤ドラの数
    pub n_bei_dora: usize,       // 北ドラの数 (三麻)
    pub yakuman_times: usize,    // 役満倍数 (0: 通常役)
    pub total_fan: usize,        // 翻数 (ドラを含む)
    pub base_point: Point,       // 基本点
    pub title: String,           // 満貫, 跳満, ...
    pub uncapped: bool,          // 青天井で計算したかどうか
    pub fixed_table: bool,       // 固定点数表で計算したかどうか
}

impl PointInfo {
    pub fn new(
        fu: usize,
        mut yakus: Vec<YakuValue>,
        n_dora: usize,
        n_ura_dora: usize,
        n_red_dora: usize,
        n_bei_dora: usize,
        config: &RuleConfig,
    ) -> Self {
        yakus.sort_by(|a, b| b.fan.cmp(&a.fan).then(a.name.cmp(&b.name)));

        let n_doras = n_dora + n_ura_dora + n_red_dora + n_bei_dora;
        let mut fan = 0;
        let mut yakuman_times = 0;
        for y in &yakus {
            if y.yakuman {
                yakuman_times += y.fan;
            } else {
                fan += y.fan;
            }
        }

        let mut info = Self {
            fu,
            yakus,
            n_dora,
            n_ura_dora,
            n_red_dora,
            n_bei_dora,
            yakuman_times,
            total_fan: 0,
            base_point: 0,
            title: "".to_string(),
            uncapped: config.uncapped,
            fixed_table: config.fixed_table,
        };

        // 無役 (和了形でも得点なし)
        if info.yakus.is_empty() {
            info.yakuman_times = 0;
            return info;
        }

        // 優先順位: 青天井 > 役満 > 通常の打ち切り > 固定点数表
        if config.uncapped {
            // 役満は1つにつき13翻として指数計算に合流する
            info.total_fan = fan + yakuman_times * YAKUMAN_BASE_FAN + n_doras;
            info.base_point = ceil100(exp_point(fu, info.total_fan));
        } else if yakuman_times > 0 {
            // 役満計算時はドラの数は関与しない
            info.total_fan = YAKUMAN_BASE_FAN * yakuman_times;
            info.base_point = YAKUMAN * yakuman_times as Point;
        } else {
            info.total_fan = fan + n_doras;
            info.base_point = match info.total_fan {
                13.. => YAKUMAN,
                11..=12 => SANBAIMAN,
                8..=10 => BAIMAN,
                6..=7 => HANEMAN,
                5 => MANGAN,
                tf => {
                    if config.fixed_table {
                        match tf {
                            4 => MANGAN,
                            3 => 1000,
                            2 => 500,
                            _ => 300,
                        }
                    } else {
                        exp_point(fu, tf).min(MANGAN)
                    }
                }
            };
        }

        info.title = score_title(info.base_point, info.yakuman_times);
        info
    }

    // 支払い合計 (ロン: 放銃者が全額, ツモ: 全員の支払いの合計)
    pub fn total_points(&self, is_dealer: bool, is_tsumo: bool, players: usize) -> Point {
        let mult: Point = if is_dealer { 6 } else { 4 };
        if self.fixed_table && self.total_fan < 5 {
            return match self.total_fan {
                4 => MANGAN * mult,
                3 => 1000 * mult,
                2 => {
                    if is_dealer {
                        if is_tsumo {
                            4000
                        } else {
                            3000
                        }
                    } else {
                        2000
                    }
                }
                _ => {
                    if is_dealer || is_tsumo {
                        2000
                    } else {
                        1000
                    }
                }
            };
        }

        if is_tsumo {
            // 支払いごとに100点単位で切り上げてから合算する
            let non_dealer_payment = self.tsumo_non_dealer_payment(is_dealer);
            if is_dealer {
                non_dealer_payment * (players as Point - 1)
            } else {
                self.tsumo_dealer_payment() + non_dealer_payment * (players as Point - 2)
            }
        } else {
            ceil100(self.base_point.saturating_mul(mult))
        }
    }

    // ツモ和了時に親が支払う点数
    pub fn tsumo_dealer_payment(&self) -> Point {
        if self.fixed_table {
            return match self.total_fan {
                13.. => 20000,
                11..=12 => 16000,
                8..=10 => 10000,
                6..=7 => 8000,
                4..=5 => 5000,
                3 => 3000,
                _ => 1000,
            };
        }
        ceil100(self.base_point.saturating_mul(2))
    }

    // ツモ和了時に子が支払う点数 (is_dealer: 和了者が親かどうか)
    pub fn tsumo_non_dealer_payment(&self, is_dealer: bool) -> Point {
        if self.fixed_table {
            return match self.total_fan {
                13.. => {
                    if is_dealer {
                        24000
                    } else {
                        12000
                    }
                }
                11..=12 => {
                    if is_dealer {
                        18000
                    } else {
                        8000
                    }
                }
                8..=10 => {
                    if is_dealer {
                        12000
                    } else {
                        6000
                    }
                }
                6..=7 => {
                    if is_dealer {
                        9000
                    } else {
                        4000
                    }
                }
                4..=5 => {
                    if is_dealer {
                        6000
                    } else {
                        3000
                    }
                }
                3 => {
                    if is_dealer {
                        3000
                    } else {
                        1000
                    }
                }
                2 => {
                    if is_dealer {
                        2000
                    } else {
                        1000
                    }
                }
                _ => 1000,
            };
        }
        if is_dealer {
            self.tsumo_dealer_payment()
        } else {
            ceil100(self.base_point)
        }
    }
}

// 得点が決まる順: 基本点 → 翻数 → 符数
impl PartialEq for PointInfo {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PointInfo {}

impl PartialOrd for PointInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PointInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.base_point, self.total_fan, self.fu).cmp(&(
            other.base_point,
            other.total_fan,
            other.fu,
        ))
    }
}

fn ceil100(n: Point) -> Point {
    n.saturating_add(99) / 100 * 100
}

// 符 × 2^(翻+2) 青天井では非常に大きくなるため飽和演算を行う
fn exp_point(fu: usize, fan: usize) -> Point {
    (fu as Point).saturating_mul((2 as Point).saturating_pow((fan as u32).saturating_add(2)))
}

fn score_title(base_point: Point, yakuman_times: usize) -> String {
    match yakuman_times {
        0 => match base_point {
            MANGAN => "満貫",
            HANEMAN => "跳満",
            BAIMAN => "倍満",
            SANBAIMAN => "三倍満",
            YAKUMAN => "数え役満",
            _ => "",
        },
        1 => "役満",
        2 => "二倍役満",
        3 => "三倍役満",
        4 => "四倍役満",
        5 => "五倍役満",
        6 => "六倍役満",
        _ => "N倍役満",
    }
    .to_string()
}

#[cfg(test)]
fn normal_yaku(fan: usize) -> Vec<YakuValue> {
    vec![YakuValue {
        name: "test".to_string(),
        fan,
        yakuman: false,
    }]
}

#[test]
fn test_mangan_and_above() {
    // (翻, 親ロン合計, 子ロン合計, ツモ親払い, ツモ子払い)
    let table = [
        (13, 48000, 32000, 16000, 8000),
        (12, 36000, 24000, 12000, 6000),
        (11, 36000, 24000, 12000, 6000),
        (10, 24000, 16000, 8000, 4000),
        (9, 24000, 16000, 8000, 4000),
        (8, 24000, 16000, 8000, 4000),
        (7, 18000, 12000, 6000, 3000),
        (6, 18000, 12000, 6000, 3000),
        (5, 12000, 8000, 4000, 2000),
    ];
    let config = RuleConfig::default();
    for (fan, dealer_ron, ron, dealer_pay, pay) in table {
        let pi = PointInfo::new(20, normal_yaku(fan), 0, 0, 0, 0, &config);
        assert_eq!(pi.total_points(true, false, 4), dealer_ron, "{}翻", fan);
        assert_eq!(pi.total_points(false, false, 4), ron, "{}翻", fan);
        assert_eq!(pi.tsumo_dealer_payment(), dealer_pay, "{}翻", fan);
        assert_eq!(pi.tsumo_non_dealer_payment(false), pay, "{}翻", fan);
    }

    // 5翻は符数によらず満貫
    for fu in [20, 25, 30, 40, 70, 110] {
        let pi = PointInfo::new(fu, normal_yaku(5), 0, 0, 0, 0, &RuleConfig::default());
        assert_eq!(pi.base_point, MANGAN);
        assert_eq!(pi.title, "満貫");
    }

    // 13翻は数え役満
    let pi = PointInfo::new(30, normal_yaku(13), 0, 0, 0, 0, &RuleConfig::default());
    assert_eq!(pi.base_point, YAKUMAN);
}

#[test]
fn test_below_mangan() {
    // (翻, 符, 親ロン, 子ロン, 親ツモ合計, 子ツモ合計, ツモ親払い, ツモ子払い)
    let table = [
        (4, 20, 7700, 5200, 7800, 5200, 2600, 1300),
        (4, 25, 9600, 6400, 9600, 6400, 3200, 1600),
        (4, 30, 11600, 7700, 11700, 7900, 3900, 2000),
        (4, 40, 12000, 8000, 12000, 8000, 4000, 2000),
        (3, 20, 3900, 2600, 3900, 2700, 1300, 700),
        (3, 25, 4800, 3200, 4800, 3200, 1600, 800),
        (3, 30, 5800, 3900, 6000, 4000, 2000, 1000),
        (3, 40, 7700, 5200, 7800, 5200, 2600, 1300),
        (3, 50, 9600, 6400, 9600, 6400, 3200, 1600),
        (2, 20, 2000, 1300, 2100, 1500, 700, 400),
        (2, 25, 2400, 1600, 2400, 1600, 800, 400),
        (2, 30, 2900, 2000, 3000, 2000, 1000, 500),
        (2, 40, 3900, 2600, 3900, 2700, 1300, 700),
        (2, 50, 4800, 3200, 4800, 3200, 1600, 800),
        (1, 30, 1500, 1000, 1500, 1100, 500, 300),
        (1, 40, 2000, 1300, 2100, 1500, 700, 400),
        (1, 50, 2400, 1600, 2400, 1600, 800, 400),
    ];
    let config = RuleConfig::default();
    for (fan, fu, dealer_ron, ron, dealer_tsumo, tsumo, dealer_pay, pay) in table {
        let pi = PointInfo::new(fu, normal_yaku(fan), 0, 0, 0, 0, &config);
        assert_eq!(pi.total_points(true, false, 4), dealer_ron, "{}翻{}符", fan, fu);
        assert_eq!(pi.total_points(false, false, 4), ron, "{}翻{}符", fan, fu);
        assert_eq!(pi.total_points(true, true, 4), dealer_tsumo, "{}翻{}符", fan, fu);
        assert_eq!(pi.total_points(false, true, 4), tsumo, "{}翻{}符", fan, fu);
        assert_eq!(pi.tsumo_dealer_payment(), dealer_pay, "{}翻{}符", fan, fu);
        assert_eq!(pi.tsumo_non_dealer_payment(false), pay, "{}翻{}符", fan, fu);
    }
}

#[test]
fn test_yakuman() {
    let config = RuleConfig::default();
    let pi = PointInfo::new(
        20,
        vec![YakuValue {
            name: "大四喜".to_string(),
            fan: 1,
            yakuman: true,
        }],
        0,
        0,
        0,
        0,
        &config,
    );
    assert_eq!(pi.base_point, YAKUMAN);
    assert_eq!(pi.total_points(false, false, 4), 32000);
    assert_eq!(pi.total_points(true, false, 4), 48000);
    assert_eq!(pi.total_points(false, true, 4), 32000);
    assert_eq!(pi.total_points(true, true, 4), 48000);
    assert_eq!(pi.tsumo_dealer_payment(), 16000);
    assert_eq!(pi.tsumo_non_dealer_payment(true), 16000);
    assert_eq!(pi.tsumo_non_dealer_payment(false), 8000);
    assert_eq!(pi.title, "役満");

    // 役満の複合は加算
    let pi = PointInfo::new(
        30,
        vec![
            YakuValue {
                name: "四暗刻単騎".to_string(),
                fan: 2,
                yakuman: true,
            },
            YakuValue {
                name: "字一色".to_string(),
                fan: 1,
                yakuman: true,
            },
        ],
        2, // 役満計算時はドラは加点しない
        0,
        0,
        0,
        &config,
    );
    assert_eq!(pi.yakuman_times, 3);
    assert_eq!(pi.base_point, YAKUMAN * 3);
    assert_eq!(pi.total_fan, YAKUMAN_BASE_FAN * 3);
    assert_eq!(pi.total_points(false, false, 4), 96000);
    assert_eq!(pi.title, "三倍役満");
}

#[test]
fn test_fixed_table() {
    // 三麻の固定点数表 (翻, 親ロン, 子ロン, 親ツモ合計, 子ツモ合計, ツモ親払い, ツモ子払い(子), ツモ子払い(親))
    let table = [
        (13, 48000, 32000, 48000, 32000, 20000, 12000, 24000),
        (12, 36000, 24000, 36000, 24000, 16000, 8000, 18000),
        (11, 36000, 24000, 36000, 24000, 16000, 8000, 18000),
        (10, 24000, 16000, 24000, 16000, 10000, 6000, 12000),
        (9, 24000, 16000, 24000, 16000, 10000, 6000, 12000),
        (8, 24000, 16000, 24000, 16000, 10000, 6000, 12000),
        (7, 18000, 12000, 18000, 12000, 8000, 4000, 9000),
        (6, 18000, 12000, 18000, 12000, 8000, 4000, 9000),
        (5, 12000, 8000, 12000, 8000, 5000, 3000, 6000),
        (4, 12000, 8000, 12000, 8000, 5000, 3000, 6000),
        (3, 6000, 4000, 6000, 4000, 3000, 1000, 3000),
        (2, 3000, 2000, 4000, 2000, 1000, 1000, 2000),
        (1, 2000, 1000, 2000, 2000, 1000, 1000, 1000),
    ];
    let config = RuleConfig {
        fixed_table: true,
        ..Default::default()
    };
    for (fan, dealer_ron, ron, dealer_tsumo, tsumo, dealer_pay, pay, pay_to_dealer) in table {
        let pi = PointInfo::new(20, normal_yaku(fan), 0, 0, 0, 0, &config);
        assert_eq!(pi.total_points(true, false, 3), dealer_ron, "{}翻", fan);
        assert_eq!(pi.total_points(false, false, 3), ron, "{}翻", fan);
        assert_eq!(pi.total_points(true, true, 3), dealer_tsumo, "{}翻", fan);
        assert_eq!(pi.total_points(false, true, 3), tsumo, "{}翻", fan);
        assert_eq!(pi.tsumo_dealer_payment(), dealer_pay, "{}翻", fan);
        assert_eq!(pi.tsumo_non_dealer_payment(false), pay, "{}翻", fan);
        assert_eq!(pi.tsumo_non_dealer_payment(true), pay_to_dealer, "{}翻", fan);
    }
}

#[test]
fn test_uncapped() {
    let config = RuleConfig {
        uncapped: true,
        ..Default::default()
    };

    // 基本点はそのまま指数計算して100点単位に切り上げ
    let pi = PointInfo::new(30, normal_yaku(4), 0, 0, 0, 0, &config);
    assert_eq!(pi.base_point, 2000); // 30 * 2^6 = 1920 → 2000

    let pi = PointInfo::new(30, normal_yaku(8), 0, 0, 0, 0, &config);
    assert_eq!(pi.base_point, 30800); // 30 * 2^10 = 30720 → 30800

    // 役満も13翻として指数計算に合流
    let pi = PointInfo::new(
        30,
        vec![YakuValue {
            name: "国士無双".to_string(),
            fan: 1,
            yakuman: true,
        }],
        0,
        0,
        0,
        0,
        &config,
    );
    assert_eq!(pi.total_fan, 13);
    assert_eq!(pi.base_point, ceil100(30 * (1 << 15)));

    // 極端な翻数でもオーバーフローしない
    let pi = PointInfo::new(110, normal_yaku(120), 0, 0, 0, 0, &config);
    assert!(pi.base_point > 0);
}

#[test]
fn test_payment_invariant() {
    // 親の支払いは常に子の支払い以上
    for fixed_table in [false, true] {
        let config = RuleConfig {
            fixed_table,
            ..Default::default()
        };
        for fan in 1..=15 {
            for fu in [20, 25, 30, 40, 50, 60, 70, 80, 90, 100, 110] {
                let pi = PointInfo::new(fu, normal_yaku(fan), 0, 0, 0, 0, &config);
                assert!(
                    pi.tsumo_dealer_payment() >= pi.tsumo_non_dealer_payment(false),
                    "{}翻{}符 fixed_table={}",
                    fan,
                    fu,
                    fixed_table
                );
            }
        }
    }
}

#[test]
fn test_no_yaku() {
    let pi = PointInfo::new(30, vec![], 2, 1, 1, 0, &RuleConfig::default());
    assert_eq!(pi.base_point, 0);
    assert_eq!(pi.total_fan, 0);
    assert_eq!(pi.total_points(true, false, 4), 0);
}
