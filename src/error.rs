use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("failed to read input")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),
    #[error("missing required configuration field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid configuration for {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("configuration error: {0}")]
    Other(String),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, Error};

    #[test]
    fn config_errors_are_transparent() {
        let err = Error::from(ConfigError::invalid("notifier.height", "must be finite"));
        assert_eq!(
            err.to_string(),
            "invalid configuration for notifier.height: must be finite"
        );
    }
}
