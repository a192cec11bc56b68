//! Tunables of the automated player.

use std::time::Duration;

/// Pause between lifting the chosen piece and putting it down.
pub const DEFAULT_LIFT_DELAY: Duration = Duration::from_millis(500);
/// Pause between putting the piece down and handing the turn back.
pub const DEFAULT_PLACE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    pub lift_delay: Duration,
    pub place_delay: Duration,
    /// Seed for move choice; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            lift_delay: DEFAULT_LIFT_DELAY,
            place_delay: DEFAULT_PLACE_DELAY,
            seed: None,
        }
    }
}

impl CpuConfig {
    /// No delays, for headless play, matches and benches.
    pub fn instant() -> Self {
        Self {
            lift_delay: Duration::ZERO,
            place_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }
}
