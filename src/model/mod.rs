mod config;
mod define;
mod meld;
mod point;
mod tile;

pub use config::*;
pub use define::*;
pub use meld::*;
pub use point::*;
pub use tile::*;

use serde::{Deserialize, Serialize};
