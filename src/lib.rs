#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod notifier;
pub mod shade;
pub mod telemetry;
pub mod types;

pub use host::{Headless, Host, Scene};
pub use notifier::Notifier;
pub use shade::Shade;

pub type Result<T> = std::result::Result<T, error::Error>;
