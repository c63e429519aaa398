use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};
use humantime::parse_duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sliding banner notifications on a headless host", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Text to show. Required unless `--interactive` is set.
    #[arg(long, value_name = "TEXT", required_unless_present = "interactive")]
    pub text: Option<String>,

    /// Auto-hide delay (e.g. "3s"); "0s" keeps the banner until it is hidden.
    #[arg(long, value_parser = parse_duration)]
    pub display_duration: Option<Duration>,

    /// Banner height in layout units.
    #[arg(long)]
    pub height: Option<f64>,

    /// How long a banner without auto-hide stays before being hidden.
    #[arg(long, value_parser = parse_duration, default_value = "2s")]
    pub hold: Duration,

    /// Read commands (show, hide, tap, swipe, height, duration, state, quit) from stdin.
    #[arg(long, action = ArgAction::SetTrue)]
    pub interactive: bool,

    /// Use a JSON layer for logs (`--features json-logs`).
    #[arg(long, action = ArgAction::SetTrue)]
    pub json_logs: bool,

    /// Explicit log filter (e.g. "banner=debug").
    #[arg(long, value_name = "FILTER")]
    pub log_filter: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
