//! Replay speed presets.

use std::fmt;
use std::time::Duration;

/// Closed set of replay speeds offered to the user.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speed {
    Slow,
    Medium,
    #[default]
    Fast,
    Instant,
}

impl Speed {
    /// Every preset, slowest first.
    pub const ALL: [Speed; 4] = [Speed::Slow, Speed::Medium, Speed::Fast, Speed::Instant];

    /// Delay between visited nodes, in milliseconds.
    pub const fn visit_delay_ms(self) -> u64 {
        match self {
            Self::Slow => 50,
            Self::Medium => 20,
            Self::Fast => 5,
            Self::Instant => 0,
        }
    }

    /// The next preset, wrapping from `Instant` back to `Slow`.
    pub const fn next(self) -> Speed {
        match self {
            Self::Slow => Self::Medium,
            Self::Medium => Self::Fast,
            Self::Fast => Self::Instant,
            Self::Instant => Self::Slow,
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
            Self::Instant => "instant",
        };
        f.write_str(s)
    }
}

/// Resolved per-step delays for one playback.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing {
    /// Wait after each visited node.
    pub visit: Duration,
    /// Wait after each path node.
    pub path: Duration,
}

impl Timing {
    /// No waiting at all.
    pub const INSTANT: Timing = Timing {
        visit: Duration::ZERO,
        path: Duration::ZERO,
    };

    /// Build from millisecond delays.
    pub const fn from_millis(visit_ms: u64, path_ms: u64) -> Self {
        Self {
            visit: Duration::from_millis(visit_ms),
            path: Duration::from_millis(path_ms),
        }
    }
}

impl From<Speed> for Timing {
    /// Path steps wait twice as long as visit steps.
    fn from(speed: Speed) -> Self {
        let ms = speed.visit_delay_ms();
        Timing::from_millis(ms, ms * 2)
    }
}
