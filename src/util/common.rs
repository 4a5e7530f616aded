use std::fmt;

use crate::error;
use crate::model::*;

pub type Res<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn next_value<T>(it: &mut std::slice::Iter<'_, String>, opt: &str) -> T
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let n = it
        .next()
        .unwrap_or_else(|| error_exit(format!("{}: value missing", opt)));
    n.parse()
        .unwrap_or_else(|e| error_exit(format!("{}: {} '{}'", opt, e, n)))
}

pub fn error_exit<T: fmt::Display, U>(t: T) -> U {
    error!("{}", t);
    std::process::exit(1);
}

pub fn vec_count<T: PartialEq>(v: &[T], e: &T) -> usize {
    v.iter().filter(|&n| n == e).count()
}

pub fn cartesian_product<T>(vv: &[Vec<T>]) -> Vec<Vec<&T>> {
    let lens: Vec<usize> = vv.iter().map(|l| l.len()).collect();
    let mut idxs = vec![0; vv.len()];
    let mut i = idxs.len() - 1;
    let mut res = vec![];
    loop {
        let mut v = vec![];
        for (i1, &i2) in idxs.iter().enumerate() {
            v.push(&vv[i1][i2]);
        }
        res.push(v);

        // increment idxs
        loop {
            if idxs[i] < lens[i] - 1 {
                idxs[i] += 1;
                i = idxs.len() - 1;
                break;
            } else {
                idxs[i] = 0;
                if i == 0 {
                    return res;
                }
            }
            i -= 1;
        }
    }
}

pub fn count_tile(tt: &TileTable, t: Tile) -> usize {
    if t.1 == 5 {
        tt[t.0][t.1] - tt[t.0][0]
    } else {
        tt[t.0][t.1]
    }
}

pub fn inc_tile(tt: &mut TileTable, tile: Tile) {
    let t = tile;
    tt[t.0][t.1] += 1;
    if t.1 == 0 {
        // 0は赤5のフラグなので本来の5をたてる
        tt[t.0][5] += 1;
    }
}

pub fn tiles_from_tile_table(tt: &TileTable) -> Vec<Tile> {
    let mut hand = vec![];
    for ti in 0..TYPE {
        for ni in 1..TNUM {
            for c in 0..tt[ti][ni] {
                if ti != TZ && ni == 5 && c < tt[ti][0] {
                    hand.push(Tile(ti, 0)); // 赤5
                } else {
                    hand.push(Tile(ti, ni));
                }
            }
        }
    }
    hand
}

pub fn tiles_to_tile_table(tiles: &[Tile]) -> TileTable {
    let mut tt = TileTable::default();
    for &t in tiles {
        inc_tile(&mut tt, t);
    }
    tt
}

// ドラ表示牌のリストを受け取ってドラ評価値のテーブルを返却
pub fn create_dora_table(doras: &[Tile]) -> TileTable {
    let mut dt = TileTable::default();
    for &d in doras {
        let t = dora_successor(d);
        dt[t.0][t.1] += 1;
    }
    dt
}

// ドラ表示牌によるドラの数を勘定
pub fn count_dora(hand: &TileTable, melds: &[Meld], doras: &[Tile]) -> usize {
    let dt = create_dora_table(doras);
    let mut n_dora = 0;

    for ti in 0..TYPE {
        for ni in 1..TNUM {
            n_dora += dt[ti][ni] * hand[ti][ni];
        }
    }

    for m in melds {
        for t in &m.tiles {
            let t = t.to_normal();
            n_dora += dt[t.0][t.1];
        }
    }

    n_dora
}

// 手牌に含まれる赤5の数
pub fn count_red_dora(hand: &TileTable, melds: &[Meld]) -> usize {
    let mut n = 0;
    for ti in 0..TZ {
        n += hand[ti][0];
    }
    for m in melds {
        n += m.tiles.iter().filter(|t| t.is_red5()).count();
    }
    n
}

// 指定した牌を通常牌と赤5に区別して取り出す
pub fn tiles_with_red5(tt: &TileTable, t: Tile) -> Vec<Tile> {
    if tt[t.0][t.1] == 0 {
        return vec![];
    }

    let Tile(ti, ni) = t;
    let tr = tt[ti];
    if ni != 5 {
        return vec![t]; // 5ではない場合
    }
    if tr[0] == 0 {
        return vec![t]; // 通常5しかない場合
    }
    if tr[0] == tr[5] {
        return vec![Tile(ti, 0)]; // 赤5しかない場合
    }
    vec![t, Tile(ti, 0)] // 通常5と赤5の両方がある場合
}

pub fn tiles_from_string(exp: &str) -> Result<Vec<Tile>, String> {
    let mut tiles = vec![];
    let undef: usize = 255;
    let mut ti = undef;
    for c in exp.chars() {
        match c {
            'm' => ti = TM,
            'p' => ti = TP,
            's' => ti = TS,
            'z' => ti = TZ,
            '0'..='9' => {
                if ti == undef {
                    return Err("tile number before tile type".to_string());
                }
                let ni = c.to_digit(10).unwrap() as usize;
                if ti == TZ && !(1..=7).contains(&ni) {
                    return Err(format!("invalid honor tile: z{}", ni));
                }
                tiles.push(Tile(ti, ni));
            }
            _ => {
                return Err(format!("invalid char: '{}'", c));
            }
        }
    }
    Ok(tiles)
}

// "5m55m+" のような表記から副露をパース '+'は直前の牌を他家から鳴いたことを示す
pub fn meld_from_string(exp: &str) -> Result<Meld, String> {
    let undef: usize = 255;
    let mut ti = undef;
    let mut nis = vec![];
    let mut tiles = vec![];
    let mut claimed = false;

    for c in exp.chars() {
        match c {
            'm' => ti = TM,
            'p' => ti = TP,
            's' => ti = TS,
            'z' => ti = TZ,
            '+' => {
                if tiles.is_empty() {
                    return Err("invalid '+' suffix".to_string());
                }
                claimed = true;
            }
            '0'..='9' => {
                if ti == undef {
                    return Err("tile number before tile type".to_string());
                }
                let ni = c.to_digit(10).unwrap() as usize;
                if ti == TZ && !(1..=7).contains(&ni) {
                    return Err(format!("invalid honor tile: z{}", ni));
                }
                nis.push(if ni == 0 { 5 } else { ni });
                tiles.push(Tile(ti, ni));
            }
            _ => {
                return Err(format!("invalid char: '{}'", c));
            }
        }
    }
    if nis.is_empty() {
        return Err(format!("empty meld: '{}'", exp));
    }

    nis.sort();
    let mut diffs = vec![];
    let mut ni0 = nis[0];
    for ni in &nis[1..] {
        diffs.push(ni - ni0);
        ni0 = *ni;
    }

    let meld_type = if diffs.len() == 2 && vec_count(&diffs, &1) == 2 {
        MeldType::Chi
    } else if diffs.len() == 2 && vec_count(&diffs, &0) == 2 {
        MeldType::Pon
    } else if diffs.len() == 3 && vec_count(&diffs, &0) == 3 {
        if claimed {
            MeldType::Minkan
        } else {
            MeldType::Ankan
        }
    } else {
        return Err(format!("invalid meld: '{}'", exp));
    };

    // チーは上家からのみ
    let side = match meld_type {
        MeldType::Ankan => MeldSide::None,
        MeldType::Chi => MeldSide::Left,
        _ => MeldSide::Across,
    };

    Ok(Meld::new(meld_type, tiles, side))
}

pub fn wind_from_char(c: char) -> Result<Index, String> {
    Ok(match c {
        'E' => WE,
        'S' => WS,
        'W' => WW,
        'N' => WN,
        _ => return Err(format!("invalid wind symbol: {}", c)),
    })
}

#[test]
fn test_tiletable() {
    let hand_str = "p34777s1230567z66";
    let hand = tiles_from_string(hand_str).unwrap();
    let tt = tiles_to_tile_table(&hand);
    let hand2 = tiles_from_tile_table(&tt);
    assert_eq!(hand, hand2);

    // 字牌は1~7のみ
    assert!(tiles_from_string("z8").is_err());
    assert!(tiles_from_string("z0").is_err());
    assert!(tiles_from_string("5m").is_err());
}

#[test]
fn test_count_dora() {
    let hand = tiles_to_tile_table(&tiles_from_string("m123406s55z777").unwrap());
    // 表示牌m3 → ドラはm4
    assert_eq!(count_dora(&hand, &[], &tiles_from_string("m3").unwrap()), 1);
    // 表示牌m0(赤5) → ドラはm6 赤5自体の価値は含まない
    assert_eq!(count_dora(&hand, &[], &tiles_from_string("m0").unwrap()), 1);
    // 表示牌z7(中) → ドラはz5(白) 該当なし
    assert_eq!(count_dora(&hand, &[], &tiles_from_string("z7").unwrap()), 0);
    // 表示牌z6(發) → ドラはz7(中) 3枚
    assert_eq!(count_dora(&hand, &[], &tiles_from_string("z6").unwrap()), 3);
    // 副露内の牌も数える
    let meld = meld_from_string("m777+").unwrap();
    let hand2 = tiles_to_tile_table(&tiles_from_string("m123s55z777").unwrap());
    assert_eq!(
        count_dora(&hand2, &[meld], &tiles_from_string("m6").unwrap()),
        3
    );
    assert_eq!(count_red_dora(&hand, &[]), 1);
}
