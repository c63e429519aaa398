use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use serde_with::serde_as;

use crate::Result;
use crate::error::ConfigError;

use super::defaults::{
    default_display_duration, default_height, default_slide_duration, default_text_size,
    default_width,
};
use super::env::{env_duration, env_parse};
use super::serde::HumantimeDuration;
use super::{Config, MAX_SLIDE_DURATION, NotifierSettings, ShadeSettings};

pub(super) fn load(path: impl AsRef<Path>) -> std::result::Result<RawConfig, ConfigError> {
    let path = path.as_ref();
    ::config::Config::builder()
        .add_source(::config::File::from(path).required(false))
        .add_source(
            ::config::Environment::with_prefix("BANNER")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|err| ConfigError::Other(err.to_string()))?
        .try_deserialize()
        .map_err(|err| ConfigError::Parse(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawConfig {
    #[serde(default)]
    pub(super) notifier: RawNotifier,
    #[serde(default)]
    pub(super) shade: RawShade,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawNotifier {
    #[serde(default = "default_display_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) display_duration: Duration,
    #[serde(default = "default_height")]
    pub(super) height: f64,
    #[serde(default = "default_width")]
    pub(super) width: f64,
    #[serde(default = "default_text_size")]
    pub(super) text_size: f64,
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(super) struct RawShade {
    #[serde(default = "default_slide_duration")]
    #[serde_as(as = "HumantimeDuration")]
    pub(super) slide_duration: Duration,
}

impl RawConfig {
    pub(super) fn apply_env_overrides(&mut self) -> std::result::Result<(), ConfigError> {
        if let Some(duration) = env_duration("BANNER_DISPLAY_DURATION")? {
            self.notifier.display_duration = duration;
        }
        if let Some(height) = env_parse::<f64>("BANNER_HEIGHT")? {
            self.notifier.height = height;
        }
        if let Some(width) = env_parse::<f64>("BANNER_WIDTH")? {
            self.notifier.width = width;
        }
        if let Some(text_size) = env_parse::<f64>("BANNER_TEXT_SIZE")? {
            self.notifier.text_size = text_size;
        }
        if let Some(duration) = env_duration("BANNER_SLIDE_DURATION")? {
            self.shade.slide_duration = duration;
        }
        Ok(())
    }

    pub(super) fn validate_and_build(self) -> Result<Config> {
        let notifier = self.notifier;
        if !notifier.height.is_finite() || notifier.height < 0.0 {
            return Err(ConfigError::invalid(
                "notifier.height",
                format!("expected a finite, non-negative height, got {}", notifier.height),
            )
            .into());
        }
        if !notifier.width.is_finite() || notifier.width <= 0.0 {
            return Err(ConfigError::invalid(
                "notifier.width",
                format!("expected a finite, positive width, got {}", notifier.width),
            )
            .into());
        }
        if !notifier.text_size.is_finite() || notifier.text_size <= 0.0 {
            return Err(ConfigError::invalid(
                "notifier.text_size",
                format!("expected a finite, positive size, got {}", notifier.text_size),
            )
            .into());
        }
        if self.shade.slide_duration > MAX_SLIDE_DURATION {
            return Err(ConfigError::invalid(
                "shade.slide_duration",
                format!(
                    "expected at most {}, got {}",
                    humantime::format_duration(MAX_SLIDE_DURATION),
                    humantime::format_duration(self.shade.slide_duration)
                ),
            )
            .into());
        }

        Ok(Config {
            notifier: NotifierSettings {
                display_duration: notifier.display_duration,
                height: notifier.height,
                width: notifier.width,
                text_size: notifier.text_size,
            },
            shade: ShadeSettings {
                slide_duration: self.shade.slide_duration,
            },
        })
    }
}

impl Default for RawNotifier {
    fn default() -> Self {
        Self {
            display_duration: default_display_duration(),
            height: default_height(),
            width: default_width(),
            text_size: default_text_size(),
        }
    }
}

impl Default for RawShade {
    fn default() -> Self {
        Self {
            slide_duration: default_slide_duration(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RawConfig, RawShade};
    use crate::error::{ConfigError, Error};
    use std::time::Duration;

    fn parse(toml: &str) -> RawConfig {
        let built = ::config::Config::builder()
            .add_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
            .build();
        match built.and_then(|config| config.try_deserialize::<RawConfig>()) {
            Ok(raw) => raw,
            Err(err) => panic!("failed to parse sample config: {err}"),
        }
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config = match parse("").validate_and_build() {
            Ok(config) => config,
            Err(err) => panic!("defaults should validate: {err}"),
        };
        assert_eq!(config, crate::config::Config::default());
    }

    #[test]
    fn file_values_are_read() {
        let raw = parse(
            r#"
            [notifier]
            display_duration = "1s"
            height = 20

            [shade]
            slide_duration = "350ms"
            "#,
        );
        let config = match raw.validate_and_build() {
            Ok(config) => config,
            Err(err) => panic!("sample should validate: {err}"),
        };
        assert_eq!(config.notifier.display_duration, Duration::from_secs(1));
        assert!((config.notifier.height - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.shade.slide_duration, Duration::from_millis(350));
    }

    #[test]
    fn negative_height_is_rejected() {
        let mut raw = RawConfig::default();
        raw.notifier.height = -4.0;
        let err = raw.validate_and_build();
        assert!(matches!(
            err,
            Err(Error::Config(ConfigError::InvalidField {
                field: "notifier.height",
                ..
            }))
        ));
    }

    #[test]
    fn slow_slides_are_rejected() {
        let raw = RawConfig {
            shade: RawShade {
                slide_duration: Duration::from_secs(60),
            },
            ..RawConfig::default()
        };
        assert!(raw.validate_and_build().is_err());
    }
}
