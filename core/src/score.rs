use alloc::format;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::Counter;

/// Moves and seconds as shown on the counters and on the win banner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub moves: Counter,
    pub seconds: Counter,
}

impl Score {
    pub const fn new(moves: Counter, seconds: Counter) -> Self {
        Self { moves, seconds }
    }

    pub fn moves_text(&self) -> String {
        format!("{} moves", self.moves)
    }

    pub fn timer_text(&self) -> String {
        format!("Time: {} sec", self.seconds)
    }

    pub fn win_text(&self) -> String {
        format!(
            "You won! with {} moves in {} seconds",
            self.moves, self.seconds
        )
    }
}
