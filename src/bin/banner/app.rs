use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_channel::{Receiver, Sender, bounded, unbounded};
use banner::Result;
use banner::config::Config;
use banner::error::ConfigError;
use banner::host::Headless;
use banner::notifier::Notifier;
use banner::telemetry::init_tracing;
use banner::types::{Completion, TapHandler};
use tokio::signal;
use tokio::time::sleep;
use tracing::{info, warn};

use super::cli::Cli;
use super::command::Command;

const DEFAULT_CONFIG: &str = "banner.toml";
const COMMAND_QUEUE: usize = 16;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.log_filter.as_deref(), cli.json_logs)?;

    let config_path = cli.config.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));
    let mut config = Config::from_env_and_file(&config_path)?;

    if let Some(duration) = cli.display_duration {
        config.notifier.display_duration = duration;
    }
    if let Some(height) = cli.height {
        if !height.is_finite() || height < 0.0 {
            return Err(ConfigError::InvalidField {
                field: "cli.height",
                message: "height must be a finite, non-negative number".to_string(),
            }
            .into());
        }
        config.notifier.height = height;
    }

    let notifier = Notifier::new(Headless, &config);
    if cli.interactive {
        return run_interactive(notifier).await;
    }

    let text = cli
        .text
        .ok_or(ConfigError::MissingField { field: "cli.text" })?;
    run_once(&notifier, &config, text, cli.hold).await;
    Ok(())
}

/// Shows one banner and waits for it to go away.
async fn run_once(notifier: &Notifier<Headless>, config: &Config, text: String, hold: Duration) {
    let (tx, rx) = unbounded::<bool>();
    let completion: Completion = Arc::new(move |success: bool| {
        let _ = tx.try_send(success);
    });

    let Some(shown) = notifier.show(text, Some(log_tap()), Some(completion)).await else {
        warn!("banner busy, nothing shown");
        return;
    };
    let _ = rx.recv().await;
    info!(shown, "banner slid down");

    if !config.notifier.auto_hides() {
        tokio::select! {
            _ = signal::ctrl_c() => info!("shutdown signal received, hiding banner"),
            () = sleep(hold) => {}
        }
        notifier.hide(None).await;
        return;
    }

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("shutdown signal received, hiding banner");
            notifier.hide(None).await;
        }
        hidden = rx.recv() => {
            info!(hidden = hidden.unwrap_or(false), "banner hid itself");
        }
    }
}

async fn run_interactive(notifier: Notifier<Headless>) -> Result<()> {
    let (tx, rx) = bounded(COMMAND_QUEUE);
    spawn_stdin_reader(tx)?;
    info!("reading commands from stdin");

    loop {
        tokio::select! {
            biased;
            _ = signal::ctrl_c() => {
                info!("shutdown signal received, stopping");
                break;
            }
            command = rx.recv() => match command {
                Ok(Command::Quit) | Err(_) => break,
                Ok(command) => dispatch(&notifier, command),
            }
        }
    }
    drain(&rx);
    Ok(())
}

fn dispatch(notifier: &Notifier<Headless>, command: Command) {
    match command {
        Command::Show(text) => {
            let notifier = notifier.clone();
            tokio::spawn(async move {
                let report: Completion = Arc::new(|success: bool| info!(success, "show reported"));
                if notifier.show(text, Some(log_tap()), Some(report)).await.is_none() {
                    warn!("banner busy, show dropped");
                }
            });
        }
        Command::Hide => {
            let notifier = notifier.clone();
            tokio::spawn(async move {
                let report: Completion = Arc::new(|success: bool| info!(success, "hide reported"));
                notifier.hide(Some(report)).await;
            });
        }
        Command::Swipe => {
            let notifier = notifier.clone();
            tokio::spawn(async move { notifier.swipe_up().await });
        }
        Command::Tap => {
            if !notifier.tap() {
                info!("tap ignored, no handler");
            }
        }
        Command::Height(height) => notifier.set_height(height),
        Command::Duration(duration) => notifier.set_display_duration(duration),
        Command::State => {
            let scene = notifier.scene();
            info!(
                state = %scene.state,
                visible = scene.visible,
                height = scene.container_height,
                text = scene.text.as_deref().unwrap_or(""),
                auto_hide_pending = notifier.has_pending_auto_hide(),
                "banner state"
            );
        }
        Command::Quit => {}
    }
}

/// Reads stdin on a plain thread: a blocked read must not hold up shutdown.
fn spawn_stdin_reader(tx: Sender<Command>) -> Result<()> {
    std::thread::Builder::new()
        .name("banner-stdin".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => {
                        warn!(error = %err, "failed to read stdin");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(command) => {
                        if tx.send_blocking(command).is_err() {
                            break;
                        }
                    }
                    Err(err) => warn!(%err, "ignoring input"),
                }
            }
        })?;
    Ok(())
}

fn drain(rx: &Receiver<Command>) {
    rx.close();
    while let Ok(command) = rx.try_recv() {
        tracing::debug!(?command, "discarding queued command");
    }
}

fn log_tap() -> TapHandler {
    Arc::new(|| info!("banner tapped"))
}
