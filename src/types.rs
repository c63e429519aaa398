use std::fmt::{self, Display};
use std::sync::Arc;

use serde::Serialize;

/// Action run when the user taps the banner.
pub type TapHandler = Arc<dyn Fn() + Send + Sync>;

/// Callback receiving whether a slide ran to completion.
///
/// It is shared rather than `FnOnce` because an auto-hiding `show` reports
/// twice: once after sliding down and once after the scheduled hide.
pub type Completion = Arc<dyn Fn(bool) + Send + Sync>;

/// Position of the shade in its slide cycle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadeState {
    #[default]
    Hidden,
    SlidingDown,
    Down,
    SlidingUp,
}

impl ShadeState {
    /// True from the end of a slide down until a slide up completes.
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Down | Self::SlidingUp)
    }

    pub const fn is_sliding(self) -> bool {
        matches!(self, Self::SlidingDown | Self::SlidingUp)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::SlidingDown => "sliding_down",
            Self::Down => "down",
            Self::SlidingUp => "sliding_up",
        }
    }
}

impl Display for ShadeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a slide.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Down,
    Up,
}

impl Direction {
    /// State a slide in this direction must start from.
    pub const fn origin(self) -> ShadeState {
        match self {
            Self::Down => ShadeState::Hidden,
            Self::Up => ShadeState::Down,
        }
    }

    pub const fn in_flight(self) -> ShadeState {
        match self {
            Self::Down => ShadeState::SlidingDown,
            Self::Up => ShadeState::SlidingUp,
        }
    }

    /// State reached when the animation completes uninterrupted.
    pub const fn target(self) -> ShadeState {
        match self {
            Self::Down => ShadeState::Down,
            Self::Up => ShadeState::Hidden,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Down => "down",
            Self::Up => "up",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
