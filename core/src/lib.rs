#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use card::*;
pub use driver::*;
pub use error::*;
pub use generator::*;
pub use pool::*;
pub use schedule::*;
pub use score::*;
pub use session::*;
pub use types::*;

mod board;
mod card;
mod driver;
mod error;
mod generator;
mod pool;
mod schedule;
mod score;
mod session;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of the square board, must be even.
    pub dimension: Coord,
    /// How long a mismatched pair stays visible.
    pub mismatch_delay: Duration,
    /// How long the last pair stays on screen before the win is announced.
    pub win_delay: Duration,
    pub tick_period: Duration,
}

impl GameConfig {
    pub const DEFAULT_DIMENSION: Coord = 4;
    pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

    pub const fn with_dimension(dimension: Coord) -> Self {
        Self {
            dimension,
            mismatch_delay: Duration::from_secs(1),
            win_delay: Duration::from_secs(1),
            tick_period: Duration::from_secs(1),
        }
    }

    /// Clamps the tick period so a ticker can never fire in a loop.
    pub fn normalized(self) -> Self {
        Self {
            tick_period: self.tick_period.max(Self::MIN_TICK_PERIOD),
            ..self
        }
    }

    pub const fn total_cards(&self) -> CardCount {
        card_count(self.dimension)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::with_dimension(Self::DEFAULT_DIMENSION)
    }
}
