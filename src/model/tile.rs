use std::fmt;

use serde::{de, ser};

use super::*;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(pub Type, pub Tnum); // (type index, number index)
pub const Z8: Tile = Tile(TZ, UK); // unknown tile

impl Tile {
    // 赤5の場合,通常の5を返却. それ以外の場合はコピーをそのまま返却.
    #[inline]
    pub fn to_normal(self) -> Self {
        if self.1 == 0 {
            Self(self.0, 5)
        } else {
            self
        }
    }

    // 赤5
    #[inline]
    pub fn is_red5(&self) -> bool {
        self.0 != TZ && self.1 == 0
    }

    // 数牌
    #[inline]
    pub fn is_suit(&self) -> bool {
        self.0 != TZ
    }

    // 字牌
    #[inline]
    pub fn is_hornor(&self) -> bool {
        self.0 == TZ
    }

    // 1,9牌
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.0 != TZ && (self.1 == 1 || self.1 == 9)
    }

    // 么九牌
    #[inline]
    pub fn is_end(&self) -> bool {
        self.0 == TZ || self.1 == 1 || self.1 == 9
    }

    // 風牌
    #[inline]
    pub fn is_wind(&self) -> bool {
        self.0 == TZ && self.1 <= WN
    }

    // 三元牌
    #[inline]
    pub fn is_doragon(&self) -> bool {
        self.0 == TZ && DW <= self.1 && self.1 <= DR
    }
}

// ドラ表示牌が示すドラを返却
// 数牌: 1→2→...→9→1 風牌: 東→南→西→北→東 三元牌: 白→發→中→白
// 風牌と三元牌のサイクルは互いに独立
pub fn dora_successor(t: Tile) -> Tile {
    let ni = if t.is_hornor() {
        match t.1 {
            WN => WE,
            DR => DW,
            i => i + 1,
        }
    } else {
        match t.1 {
            9 => 1,
            0 => 6, // 赤5は5として扱う
            i => i + 1,
        }
    };
    Tile(t.0, ni)
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ['m', 'p', 's', 'z'][self.0], self.1)
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        if self.0 != other.0 {
            return self.0.cmp(&other.0);
        }

        // 赤5は4.5に変換して比較
        let a = if self.1 == 0 { 4.5 } else { self.1 as f32 };
        let b = if other.1 == 0 { 4.5 } else { other.1 as f32 };
        a.partial_cmp(&b).unwrap()
    }
}

impl ser::Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct TileVisitor;

impl<'de> de::Visitor<'de> for TileVisitor {
    type Value = Tile;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("tile symbol")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let chars: Vec<char> = v.chars().collect();
        if chars.len() == 2 {
            let ti = match chars[0] {
                'm' => TM,
                'p' => TP,
                's' => TS,
                'z' => TZ,
                _ => return Err(E::custom(format!("invalid tile symbol: {}", v))),
            };
            if let Some(ni) = chars[1].to_digit(10) {
                return Ok(Tile(ti, ni as usize));
            }
        }
        Err(E::custom(format!("invalid tile symbol: {}", v)))
    }
}

impl<'de> de::Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_str(TileVisitor)
    }
}

#[test]
fn test_dora_successor() {
    // 数牌
    assert_eq!(dora_successor(Tile(TS, 1)), Tile(TS, 2));
    assert_eq!(dora_successor(Tile(TM, 4)), Tile(TM, 5));
    assert_eq!(dora_successor(Tile(TS, 7)), Tile(TS, 8));
    assert_eq!(dora_successor(Tile(TM, 9)), Tile(TM, 1));
    assert_eq!(dora_successor(Tile(TS, 9)), Tile(TS, 1));
    assert_eq!(dora_successor(Tile(TP, 0)), Tile(TP, 6)); // 赤5

    // 風牌 (東→南→西→北→東)
    assert_eq!(dora_successor(Tile(TZ, WS)), Tile(TZ, WW));
    assert_eq!(dora_successor(Tile(TZ, WN)), Tile(TZ, WE));

    // 三元牌 (白→發→中→白)
    assert_eq!(dora_successor(Tile(TZ, DW)), Tile(TZ, DG));
    assert_eq!(dora_successor(Tile(TZ, DR)), Tile(TZ, DW));
}
