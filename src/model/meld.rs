use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldType {
    Chi,    // 順子の副露
    Pon,    // 刻子の副露
    Minkan, // 大明槓
    Kakan,  // 加槓
    Ankan,  // 暗槓
}

// 鳴いた牌の出所 (鳴きそのものの合法性の検証は呼び出し側の責務)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MeldSide {
    #[default]
    None, // 自力で揃えた場合 (暗槓など)
    Left,     // 上家
    Across,   // 対面
    Opposite, // 下家
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub meld_type: MeldType,
    pub tiles: Vec<Tile>,
    pub side: MeldSide,
}

impl Meld {
    pub fn new(meld_type: MeldType, mut tiles: Vec<Tile>, side: MeldSide) -> Self {
        tiles.sort();
        Self {
            meld_type,
            tiles,
            side,
        }
    }

    // 暗槓のみ面前扱い
    #[inline]
    pub fn is_concealed(&self) -> bool {
        self.meld_type == MeldType::Ankan
    }
}
