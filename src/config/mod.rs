use std::path::Path;
use std::time::Duration;

use crate::Result;
use crate::error::Error as BannerError;

mod defaults;
mod env;
mod raw;
mod serde;

/// Longest accepted slide animation.
const MAX_SLIDE_DURATION: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub notifier: NotifierSettings,
    pub shade: ShadeSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotifierSettings {
    /// Zero means the banner stays until hidden explicitly.
    pub display_duration: Duration,
    pub height: f64,
    /// Width of the overlay, normally the screen width.
    pub width: f64,
    /// Natural font size of the banner text.
    pub text_size: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadeSettings {
    pub slide_duration: Duration,
}

impl Config {
    /// Load configuration from a file and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file cannot be parsed, when
    /// environment overrides are invalid, or when the resulting values fail
    /// validation.
    pub fn from_env_and_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut raw = raw::load(path).map_err(BannerError::from)?;
        raw.apply_env_overrides().map_err(BannerError::from)?;
        raw.validate_and_build()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notifier: NotifierSettings {
                display_duration: defaults::default_display_duration(),
                height: defaults::default_height(),
                width: defaults::default_width(),
                text_size: defaults::default_text_size(),
            },
            shade: ShadeSettings {
                slide_duration: defaults::default_slide_duration(),
            },
        }
    }
}

impl NotifierSettings {
    #[must_use]
    pub const fn auto_hides(&self) -> bool {
        !self.display_duration.is_zero()
    }
}
