use crate::model::*;
use crate::util::common::count_tile;

// 鳴きの候補 consumedは手牌から出す牌(鳴いた牌自体は含まない)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub meld_type: MeldType,
    pub consumed: Vec<Tile>,
}

impl Claim {
    fn new(meld_type: MeldType, consumed: Vec<Tile>) -> Self {
        Self { meld_type, consumed }
    }

    // 鳴いた牌を加えて副露を組み立てる
    pub fn into_meld(self, claimed: Tile, side: MeldSide) -> Meld {
        let mut tiles = self.consumed;
        if self.meld_type != MeldType::Ankan && self.meld_type != MeldType::Kakan {
            tiles.push(claimed);
        }
        Meld::new(self.meld_type, tiles, side)
    }
}

// 5を要求する際に通常5を優先し通常5が無い場合のみ赤5を使用
fn pick(hand: &TileTable, ti: Type, ni: Tnum) -> Option<Tile> {
    if hand[ti][ni] == 0 {
        return None;
    }
    if ni == 5 && ti != TZ && count_tile(hand, Tile(ti, 5)) == 0 {
        return Some(Tile(ti, 0));
    }
    Some(Tile(ti, ni))
}

// 同種の牌をn枚取り出す 通常牌を優先し不足分のみ赤5で補う
// 呼び出し側で所持枚数がn枚以上であることを確認しておくこと
fn pick_n(hand: &TileTable, t: Tile, n: usize) -> Vec<Tile> {
    let plain = if t.1 == 5 && t.0 != TZ {
        count_tile(hand, t).min(n)
    } else {
        n
    };
    let mut res = vec![Tile(t.0, 0); n - plain];
    res.extend(vec![t; plain]);
    res
}

// チー候補 (上家の打牌のみ)
pub fn chi_candidates(hand: &TileTable, claimed: Tile) -> Vec<Claim> {
    let d = claimed.to_normal();
    if d.is_hornor() {
        return vec![];
    }

    let (ti, i) = (d.0, d.1);
    let mut check: Vec<(Tnum, Tnum)> = vec![];
    // l2 l1 c0(鳴く牌) r1 r2
    if i >= 3 {
        check.push((i - 2, i - 1));
    }
    if i <= 7 {
        check.push((i + 1, i + 2));
    }
    if (2..=8).contains(&i) {
        check.push((i - 1, i + 1));
    }

    let mut res = vec![];
    for (a, b) in check {
        if let (Some(t0), Some(t1)) = (pick(hand, ti, a), pick(hand, ti, b)) {
            res.push(Claim::new(MeldType::Chi, vec![t0, t1]));
        }
    }
    res
}

// ポン候補
pub fn pon_candidates(hand: &TileTable, claimed: Tile) -> Vec<Claim> {
    let t = claimed.to_normal();
    if hand[t.0][t.1] < 2 {
        return vec![];
    }

    vec![Claim::new(MeldType::Pon, pick_n(hand, t, 2))]
}

// 大明槓候補
pub fn minkan_candidates(hand: &TileTable, claimed: Tile) -> Vec<Claim> {
    let t = claimed.to_normal();
    if hand[t.0][t.1] != 3 {
        return vec![];
    }

    vec![Claim::new(MeldType::Minkan, pick_n(hand, t, 3))]
}

// 暗槓候補 (自摸番)
pub fn ankan_candidates(hand: &TileTable) -> Vec<Claim> {
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if hand[ti][ni] != TILE {
                continue;
            }
            let t = Tile(ti, ni);
            res.push(Claim::new(MeldType::Ankan, pick_n(hand, t, TILE)));
        }
    }
    res
}

// 加槓候補 (自摸番, ポン済みの面子に手牌の4枚目を追加)
pub fn kakan_candidates(hand: &TileTable, melds: &[Meld]) -> Vec<Claim> {
    let mut res = vec![];
    for m in melds {
        if m.meld_type != MeldType::Pon {
            continue;
        }
        let t = m.tiles[0].to_normal();
        let added = match pick(hand, t.0, t.1) {
            Some(added) => added,
            None => continue,
        };
        res.push(Claim::new(MeldType::Kakan, vec![added]));
    }
    res
}

// 他家の打牌に対する鳴き候補の一覧 チーは上家からのみ
pub fn claim_options(hand: &TileTable, claimed: Tile, side: MeldSide) -> Vec<Claim> {
    let mut res = vec![];
    if side == MeldSide::Left {
        res.append(&mut chi_candidates(hand, claimed));
    }
    res.append(&mut pon_candidates(hand, claimed));
    res.append(&mut minkan_candidates(hand, claimed));
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::common::{tiles_from_string, tiles_to_tile_table};

    fn table(exp: &str) -> TileTable {
        tiles_to_tile_table(&tiles_from_string(exp).unwrap())
    }

    #[test]
    fn test_chi_candidates() {
        let tt = table("m1234567");
        let res = chi_candidates(&tt, Tile(TM, 4));
        assert_eq!(res.len(), 3); // 23, 56, 35

        // 字牌はチー不可
        let tt = table("z1234567");
        assert!(chi_candidates(&tt, Tile(TZ, 3)).is_empty());

        // 通常5が無い場合のみ赤5を使用
        let tt = table("m406");
        let res = chi_candidates(&tt, Tile(TM, 5));
        assert_eq!(res, vec![Claim::new(MeldType::Chi, vec![Tile(TM, 4), Tile(TM, 6)])]);
        let res = chi_candidates(&tt, Tile(TM, 6));
        assert_eq!(res, vec![Claim::new(MeldType::Chi, vec![Tile(TM, 4), Tile(TM, 0)])]);
    }

    #[test]
    fn test_pon_candidates() {
        let tt = table("m55p05z77");
        assert_eq!(
            pon_candidates(&tt, Tile(TM, 5)),
            vec![Claim::new(MeldType::Pon, vec![Tile(TM, 5), Tile(TM, 5)])]
        );
        // 赤5は通常5が足りない場合のみ
        assert_eq!(
            pon_candidates(&tt, Tile(TP, 5)),
            vec![Claim::new(MeldType::Pon, vec![Tile(TP, 0), Tile(TP, 5)])]
        );
        assert!(pon_candidates(&tt, Tile(TZ, 6)).is_empty());

        // 赤5を2枚使用するルールで通常5を持たない場合 (存在しない通常5を要求しない)
        let tt = table("m00");
        assert_eq!(
            pon_candidates(&tt, Tile(TM, 5)),
            vec![Claim::new(MeldType::Pon, vec![Tile(TM, 0), Tile(TM, 0)])]
        );
        let tt = table("m005");
        assert_eq!(
            minkan_candidates(&tt, Tile(TM, 5)),
            vec![Claim::new(
                MeldType::Minkan,
                vec![Tile(TM, 0), Tile(TM, 0), Tile(TM, 5)]
            )]
        );
    }

    #[test]
    fn test_kan_candidates() {
        let tt = table("m5550s1111");
        let res = ankan_candidates(&tt);
        assert_eq!(res.len(), 2);
        assert_eq!(res[0].consumed[0], Tile(TM, 0));
        assert_eq!(res[1].consumed, vec![Tile(TS, 1); 4]);

        let tt = table("m555");
        assert_eq!(minkan_candidates(&tt, Tile(TM, 5)).len(), 1);
        assert!(minkan_candidates(&tt, Tile(TM, 6)).is_empty());

        // 加槓はポン済みの面子に対してのみ
        let melds = vec![Meld::new(
            MeldType::Pon,
            vec![Tile(TP, 3), Tile(TP, 3), Tile(TP, 3)],
            MeldSide::Across,
        )];
        let tt = table("p3s99");
        let res = kakan_candidates(&tt, &melds);
        assert_eq!(res, vec![Claim::new(MeldType::Kakan, vec![Tile(TP, 3)])]);
        assert!(kakan_candidates(&table("s99"), &melds).is_empty());
    }

    #[test]
    fn test_into_meld() {
        let tt = table("m34555");
        for claim in claim_options(&tt, Tile(TM, 5), MeldSide::Left) {
            let meld_type = claim.meld_type;
            let meld = claim.into_meld(Tile(TM, 5), MeldSide::Left);
            assert_eq!(meld.meld_type, meld_type);
            assert_eq!(meld.side, MeldSide::Left);
            assert!(!meld.is_concealed());

            // 鳴いた牌を含めてソート済み
            let mut sorted = meld.tiles.clone();
            sorted.sort();
            assert_eq!(meld.tiles, sorted);
            let n = if meld_type == MeldType::Minkan { 4 } else { 3 };
            assert_eq!(meld.tiles.len(), n);
        }

        // 暗槓は鳴いた牌を追加せず面前扱い
        let claims = ankan_candidates(&table("s1111"));
        let meld = claims[0].clone().into_meld(Z8, MeldSide::None);
        assert_eq!(meld.meld_type, MeldType::Ankan);
        assert_eq!(meld.tiles, vec![Tile(TS, 1); 4]);
        assert!(meld.is_concealed());
    }

    #[test]
    fn test_claim_options() {
        let tt = table("m34555");
        // 上家からはチーとポンと大明槓
        let res = claim_options(&tt, Tile(TM, 5), MeldSide::Left);
        assert!(res.iter().any(|c| c.meld_type == MeldType::Chi));
        assert!(res.iter().any(|c| c.meld_type == MeldType::Pon));
        assert!(res.iter().any(|c| c.meld_type == MeldType::Minkan));
        // 対面からはチー不可
        let res = claim_options(&tt, Tile(TM, 5), MeldSide::Across);
        assert!(res.iter().all(|c| c.meld_type != MeldType::Chi));
    }
}
