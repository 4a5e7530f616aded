use crate::model::*;
use crate::util::common::cartesian_product;

use super::win::{is_kokushi_win, possible_pairs};

use BlockType::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Pair,    // 雀頭
    Shuntsu, // 順子
    Koutsu,  // 刻子
    Chi,     // チー
    Pon,     // ポン
    Minkan,  // 明槓 (大明槓 + 加槓)
    Ankan,   // 暗槓
}

// Tileは順子・チーの場合は先頭の牌 赤5は正規化済み
#[derive(Debug, Clone, Copy)]
pub struct Block(pub BlockType, pub Tile);

pub type Decomposition = Vec<Block>;

// 鳴きをBlockに変換したリストを返却
pub fn melds_to_blocks(melds: &[Meld]) -> Decomposition {
    let mut res = vec![];

    for m in melds {
        let t = m.tiles[0].to_normal();
        res.push(match m.meld_type {
            MeldType::Chi => Block(Chi, t),
            MeldType::Pon => Block(Pon, t),
            MeldType::Minkan | MeldType::Kakan => Block(Minkan, t),
            MeldType::Ankan => Block(Ankan, t),
        });
    }

    res
}

// 牌種を順子と刻子に分解
// 三連刻の場合2通り(刻子3つ, 順子3つ)の分割が存在する 四連刻は役満(四暗刻)なので無視
// 予め分解可能であることを確認しておくこと(分解できない場合assertに失敗)
// TileRowが空(すべて0)の場合は分解可能とみなし[[]]を返却
fn split_row_into_sets(tr: &TileRow, ti: Type) -> Vec<Decomposition> {
    let mut dec = vec![];
    let (mut n0, mut n1, mut n2);

    n0 = tr[1];
    n1 = tr[2];
    for i in 1..8 {
        n2 = tr[i + 2];

        // 刻子
        if n0 >= 3 {
            dec.push(Block(Koutsu, Tile(ti, i)));
        }

        // 順子 (字牌はn=0となる)
        let n = n0 % 3;
        for _ in 0..n {
            dec.push(Block(Shuntsu, Tile(ti, i)))
        }
        n0 = n1 - n;
        n1 = n2 - n;
    }
    if n0 == 3 {
        dec.push(Block(Koutsu, Tile(ti, 8)));
    }
    if n1 == 3 {
        dec.push(Block(Koutsu, Tile(ti, 9)));
    }
    assert!(n0 % 3 == 0 && n1 % 3 == 0);

    if ti == TZ || dec.len() < 3 {
        return vec![dec];
    }

    // 三連刻チェック
    let (mut i, mut n) = (0, 0);
    for Block(tp, t) in &dec {
        if let Koutsu = tp {
            if i + n == t.1 {
                n += 1;
                if n == 3 {
                    break;
                }
            } else {
                i = t.1;
                n = 1;
            }
        }
    }

    // 三連刻なし
    if n != 3 {
        return vec![dec];
    }

    let mut dec2 = vec![];
    for &Block(tp, t) in &dec {
        if let Koutsu = tp {
            if i <= t.1 && t.1 < i + 3 {
                continue;
            }
        }
        dec2.push(Block(tp, t));
    }
    let b = Block(Shuntsu, Tile(ti, i));
    dec2.push(b);
    dec2.push(b);
    dec2.push(b);

    vec![dec, dec2]
}

// 手牌が完成形(七対子・国士無双は除く)なら面子+雀頭への分解をすべて列挙して返却
pub fn decompose_normal(hand: &TileTable) -> Vec<Decomposition> {
    let pairs = possible_pairs(hand);
    if pairs.is_empty() {
        return vec![];
    }

    let mut decs_list = vec![];

    // 雀頭を含む列
    let pair_ti = pairs[0].0;
    let mut tr = hand[pair_ti];
    let mut decs = vec![];
    for pair in pairs {
        tr[pair.1] -= 2;
        let mut decs2 = split_row_into_sets(&tr, pair_ti);
        tr[pair.1] += 2;
        for dec in &mut decs2 {
            dec.push(Block(Pair, pair));
        }
        decs.append(&mut decs2);
    }
    decs_list.push(decs);

    // 雀頭を含まない列
    for ti in 0..TYPE {
        if ti != pair_ti {
            decs_list.push(split_row_into_sets(&hand[ti], ti));
        }
    }

    // それぞれの列の分割のすべての組み合わせ(直積)を求める
    let mut res = vec![];
    for v in cartesian_product(&decs_list) {
        let mut dec = vec![];
        for v2 in v {
            dec.extend(v2);
        }
        res.push(dec);
    }

    res
}

// 手牌が完成形(七対子)ならすべて対子に分解して返却
pub fn decompose_chiitoitsu(hand: &TileTable) -> Vec<Decomposition> {
    let mut res = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            let t = hand[ti][ni];
            if t == 0 {
                continue;
            } else if t == 2 {
                res.push(Block(Pair, Tile(ti, ni)));
            } else {
                return vec![];
            }
        }
    }

    if res.len() == 7 {
        vec![res]
    } else {
        vec![] // 鳴き有り
    }
}

// 手牌が完成形(国士無双)なら空のDecompositionが入ったリストを返却
pub fn decompose_kokushi(hand: &TileTable) -> Vec<Decomposition> {
    if is_kokushi_win(hand) {
        vec![vec![]]
    } else {
        vec![]
    }
}

#[cfg(test)]
use crate::util::common::{tiles_from_string, tiles_to_tile_table};

#[test]
fn test_decompose_normal() {
    let tt = tiles_to_tile_table(&tiles_from_string("m112233p999s456z77").unwrap());
    let decs = decompose_normal(&tt);
    assert!(!decs.is_empty());
    for dec in &decs {
        assert_eq!(dec.len(), 5);
        assert_eq!(dec.iter().filter(|b| b.0 == BlockType::Pair).count(), 1);
    }

    // 三連刻は刻子読みと順子読みの両方を生成
    let tt = tiles_to_tile_table(&tiles_from_string("s111222333789m55").unwrap());
    let decs = decompose_normal(&tt);
    assert!(decs.len() >= 2);
    let has_koutsu = decs.iter().any(|d| {
        d.iter()
            .filter(|b| b.0 == BlockType::Koutsu)
            .count() == 3
    });
    let has_shuntsu = decs.iter().any(|d| {
        d.iter()
            .filter(|b| b.0 == BlockType::Shuntsu && b.1 == Tile(TS, 1))
            .count() == 3
    });
    assert!(has_koutsu && has_shuntsu);

    // 未完成形は空
    let tt = tiles_to_tile_table(&tiles_from_string("m123456789p12s44").unwrap());
    assert!(decompose_normal(&tt).is_empty());
}

#[test]
fn test_decompose_chiitoitsu() {
    let tt = tiles_to_tile_table(&tiles_from_string("m1122p3344s5566z11").unwrap());
    assert_eq!(decompose_chiitoitsu(&tt).len(), 1);

    // 同一牌4枚の2対子は不成立
    let tt = tiles_to_tile_table(&tiles_from_string("m1111p3344s5566z11").unwrap());
    assert!(decompose_chiitoitsu(&tt).is_empty());
}

#[test]
fn test_decompose_kokushi() {
    let tt = tiles_to_tile_table(&tiles_from_string("m19p19s19z12345677").unwrap());
    assert_eq!(decompose_kokushi(&tt).len(), 1);

    let tt = tiles_to_tile_table(&tiles_from_string("m19p19s19z12345566").unwrap());
    assert!(decompose_kokushi(&tt).is_empty());
}
