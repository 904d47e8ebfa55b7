use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Identifies one game within a session, timer requests from older generations are ignored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Generation(pub u32);

impl Generation {
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelayedAction {
    /// Turn the mismatched pair face down again.
    FlipBack,
    /// Announce the win once the last pair has been on screen for a moment.
    RevealWin,
}

/// One-shot work the host must hand back to the session after `delay`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedTask {
    pub action: DelayedAction,
    pub generation: Generation,
    pub delay: Duration,
}

/// Timer requests for the host, drained with [`Session::take_commands`](crate::Session::take_commands).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Replace any running ticker with one firing every `period`.
    StartTicker {
        generation: Generation,
        period: Duration,
    },
    StopTicker,
    Schedule(DelayedTask),
}
