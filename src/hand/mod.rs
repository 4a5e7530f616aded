// 手牌の分解・役判定・点数計算を行うモジュール
mod claim;
mod evaluate;
mod parse;
mod win;
mod yaku;

pub use self::{
    claim::{
        ankan_candidates, chi_candidates, claim_options, kakan_candidates, minkan_candidates,
        pon_candidates, Claim,
    },
    evaluate::decompose_and_score,
    parse::{
        decompose_chiitoitsu, decompose_kokushi, decompose_normal, melds_to_blocks, Block,
        BlockType, Decomposition,
    },
    win::{
        discard_candidates, enumerate_waits, is_chiitoitsu_win, is_complete_hand, is_kokushi_win,
        is_normal_win,
    },
    yaku::{Yaku, YakuContext},
};
