use std::collections::BTreeMap;

use super::parse::decompose_chiitoitsu;
use crate::model::*;
use crate::util::common::tiles_with_red5;

// [完成形判定 (面子, 雀頭)]

// それぞれの牌種について"枚数を3で割った余り"と"余り数の集計"を返却
fn calc_type_mods(hand: &TileTable) -> ([usize; TYPE], [usize; 3]) {
    let mut mods = [0; TYPE];
    for ti in 0..TYPE {
        mods[ti] = hand[ti][1..10].iter().sum();
        mods[ti] %= 3;
    }

    let mut cnts = [0; 3];
    for ti in 0..TYPE {
        cnts[mods[ti]] += 1;
    }

    (mods, cnts)
}

// 面子のみで構成されているかの判定
pub fn is_sets(tr: &TileRow, ti: Type) -> bool {
    let (mut n0, mut n1, mut n2);
    n0 = tr[1];
    n1 = tr[2];
    for i in 1..8 {
        n2 = tr[i + 2];
        let n = n0 % 3;
        if (ti == TZ && n != 0) || (n1 < n || n2 < n) {
            return false;
        }
        n0 = n1 - n;
        n1 = n2 - n;
    }
    n0 % 3 == 0 && n1 % 3 == 0
}

// 牌種が完成面子+雀頭の場合において雀頭候補となる数字を返す
// [1,4,7], [2,5,8], [3,6,9] のいずれか
fn pair_candidate_indexes(tr: &TileRow) -> Vec<Tnum> {
    // 面子の数字の和は3で割り切れるので余りの値によって雀頭候補を絞り込める
    let mut sum = 0;
    for i in 1..TNUM {
        sum += i * tr[i];
    }
    let mod3 = sum % 3;
    let mut pairs = vec![];
    for i in 1..4 {
        pairs.push(3 * i - mod3);
    }
    pairs
}

// 牌種が完成面子+雀頭のみで構成されている場合,雀頭のリストを返す
// 基本的に1つだが,3113や3111113のような形の場合2つ
pub fn pair_candidates(tr: &TileRow, ti: Type) -> Vec<Tile> {
    // 雀頭候補それぞれについて外してみた結果が完成面子になっているかをチェック
    let mut tr = *tr;
    let mut res = vec![];
    for ni in pair_candidate_indexes(&tr) {
        if tr[ni] < 2 {
            continue;
        }
        tr[ni] -= 2;
        if is_sets(&tr, ti) {
            res.push(Tile(ti, ni));
        }
        tr[ni] += 2;
    }

    res
}

// 14 - (副露数) * 3 枚の手牌において和了形である場合,雀頭候補のリストを返却
pub fn possible_pairs(hand: &TileTable) -> Vec<Tile> {
    let (mods, cnts) = calc_type_mods(hand);
    let mut res = vec![];

    if cnts[1] != 0 || cnts[2] != 1 {
        return vec![];
    }

    for ti in 0..TYPE {
        if mods[ti] == 2 {
            let pairs = pair_candidates(&hand[ti], ti);
            if pairs.is_empty() {
                return vec![];
            }
            res = pairs;
        } else if !is_sets(&hand[ti], ti) {
            return vec![];
        }
    }

    res
}

// [和了形判定]

// 通常形
pub fn is_normal_win(hand: &TileTable) -> bool {
    !possible_pairs(hand).is_empty()
}

// 七対子
pub fn is_chiitoitsu_win(hand: &TileTable) -> bool {
    !decompose_chiitoitsu(hand).is_empty()
}

// 国士無双
pub fn is_kokushi_win(hand: &TileTable) -> bool {
    let mut count = 0;
    for ti in 0..TZ {
        if hand[ti][1] == 0 || hand[ti][9] == 0 {
            return false;
        }
        for ni in 2..9 {
            if hand[ti][ni] != 0 {
                return false;
            }
        }
        count += hand[ti][1] + hand[ti][9]
    }
    for ni in 1..8 {
        if hand[TZ][ni] == 0 {
            return false;
        }
        count += hand[TZ][ni]
    }

    count == 14
}

// いずれかの和了形
// 牌数の多重集合として不正な手牌(15枚以上, 同種5枚以上)は和了形としない
pub fn is_complete_hand(hand: &TileTable) -> bool {
    let mut total = 0;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if hand[ti][ni] > TILE {
                return false;
            }
            total += hand[ti][ni];
        }
    }
    if total > 14 || total % 3 != 2 {
        return false;
    }

    is_normal_win(hand) || is_chiitoitsu_win(hand) || is_kokushi_win(hand)
}

// [和了牌判定]

// 和了牌のリストを返却 聴牌していない場合は空のリスト
// 34種の牌を1枚ずつ加えて和了形になるかを試す
// 国士無双十三面のような多面待ちも特別扱いなしで列挙される
pub fn enumerate_waits(hand: &TileTable) -> Vec<Tile> {
    let mut res = vec![];
    let mut hand = *hand;
    for ti in 0..TYPE {
        let max_ni = if ti == TZ { 7 } else { 9 };
        for ni in 1..=max_ni {
            if hand[ti][ni] == TILE {
                continue; // 4枚使い切り
            }
            hand[ti][ni] += 1;
            if is_complete_hand(&hand) {
                res.push(Tile(ti, ni));
            }
            hand[ti][ni] -= 1;
        }
    }
    res
}

// [聴牌捨て牌判定]

// ツモ番において聴牌となる打牌と待ちの組み合わせの一覧を返却
// 主にリーチ宣言が可能かどうかを確認する用途 手牌の赤5を区別する
pub fn discard_candidates(hand: &TileTable) -> BTreeMap<Tile, Vec<Tile>> {
    let mut res = BTreeMap::new();
    let mut hand2 = *hand;
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            if hand2[ti][ni] == 0 {
                continue;
            }
            hand2[ti][ni] -= 1;
            let waits = enumerate_waits(&hand2);
            hand2[ti][ni] += 1;
            if !waits.is_empty() {
                for t in tiles_with_red5(hand, Tile(ti, ni)) {
                    res.insert(t, waits.clone());
                }
            }
        }
    }
    res
}

#[cfg(test)]
use crate::util::common::{tiles_from_string, tiles_to_tile_table};

#[test]
fn test_enumerate_waits() {
    // 単騎待ち
    let tt = tiles_to_tile_table(&tiles_from_string("m2334457p444s678").unwrap());
    assert_eq!(enumerate_waits(&tt), vec![Tile(TM, 7)]);

    // 多面待ち
    let tt = tiles_to_tile_table(&tiles_from_string("s2334455667788").unwrap());
    assert_eq!(
        enumerate_waits(&tt),
        vec![Tile(TS, 2), Tile(TS, 5), Tile(TS, 8)]
    );

    // 七対子の待ち
    let tt = tiles_to_tile_table(&tiles_from_string("m11p99s199z225566").unwrap());
    assert_eq!(enumerate_waits(&tt), vec![Tile(TS, 1)]);

    // 国士無双十三面待ち
    let tt = tiles_to_tile_table(&tiles_from_string("m19p19s19z1234567").unwrap());
    assert_eq!(enumerate_waits(&tt).len(), 13);

    // 国士無双単騎待ち
    let tt = tiles_to_tile_table(&tiles_from_string("m199p19s19z123456").unwrap());
    assert_eq!(enumerate_waits(&tt), vec![Tile(TZ, 7)]);

    // 不聴
    let tt = tiles_to_tile_table(&tiles_from_string("m147p258s369z1234").unwrap());
    assert!(enumerate_waits(&tt).is_empty());
}

#[test]
fn test_invalid_multiset() {
    // 面子+雀頭に分解できても15枚以上は和了形としない
    let tt = tiles_to_tile_table(&tiles_from_string("m111222333444555s99").unwrap());
    assert!(!is_complete_hand(&tt));
    assert!(enumerate_waits(&tt).is_empty());

    // 同種5枚も同様 (全体が14枚でも不成立)
    let mut tt = tiles_to_tile_table(&tiles_from_string("m11112223334s99").unwrap());
    tt[TM][1] += 1;
    assert!(!is_complete_hand(&tt));
}

#[test]
fn test_discard_candidates() {
    let tt = tiles_to_tile_table(&tiles_from_string("m1122p3344s55667z1").unwrap());
    let res = discard_candidates(&tt);
    assert_eq!(res.len(), 2);
    assert_eq!(res[&Tile(TZ, 1)], vec![Tile(TS, 7)]);
    assert_eq!(res[&Tile(TS, 7)], vec![Tile(TZ, 1)]);

    // 和了形からあえて和了しない場合も列挙される
    let tt = tiles_to_tile_table(&tiles_from_string("m11223344p556677").unwrap());
    let res = discard_candidates(&tt);
    assert!(!res.is_empty());
}
