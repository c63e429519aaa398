use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use crate::Result;
use crate::error::Error;

const FALLBACK_FILTER: &str = "info";

/// Installs the global tracing subscriber.
///
/// The filter is the first valid candidate among `explicit_filter`, `RUST_LOG`
/// and `info`.
///
/// # Errors
///
/// Fails when no candidate filter parses, when JSON output is requested from a
/// binary built without the `json-logs` feature, or when a global subscriber
/// is already installed.
pub fn init_tracing(explicit_filter: Option<&str>, use_json: bool) -> Result<()> {
    let filter = select_filter(explicit_filter, std::env::var("RUST_LOG").ok())?;

    #[cfg(feature = "json-logs")]
    if use_json {
        let subscriber = Registry::default().with(filter).with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .json()
                .flatten_event(true),
        );
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|err| Error::Telemetry(err.to_string()))?;
        return Ok(());
    }

    #[cfg(not(feature = "json-logs"))]
    if use_json {
        return Err(Error::Telemetry(
            "binary was built without the `json-logs` feature".to_string(),
        ));
    }

    let subscriber = Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true));
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| Error::Telemetry(err.to_string()))
}

fn select_filter(explicit: Option<&str>, from_env: Option<String>) -> Result<EnvFilter> {
    explicit
        .map(str::to_string)
        .into_iter()
        .chain(from_env)
        .chain(std::iter::once(FALLBACK_FILTER.to_string()))
        .find_map(|candidate| EnvFilter::try_new(candidate).ok())
        .ok_or_else(|| Error::Telemetry("invalid log filter".to_string()))
}

#[cfg(test)]
mod tests {
    use super::select_filter;

    #[test]
    fn explicit_filter_wins_over_environment() {
        let filter = select_filter(Some("banner=debug"), Some("warn".to_string()));
        assert!(matches!(filter, Ok(f) if f.to_string() == "banner=debug"));
    }

    #[test]
    fn invalid_candidates_fall_through() {
        let filter = select_filter(Some("banner=loud"), None);
        assert!(matches!(filter, Ok(f) if f.to_string() == "info"));
    }
}
