//! cyget - fetch packages from a Cygwin mirror
//!
//! This is the command line front end. It assembles the configuration,
//! hands the run to the ops crate and renders its events.

mod cli;
mod error;
mod events;
mod logging;
mod response;

use crate::cli::Cli;
use crate::error::{CliError, ExitCondition};
use crate::events::EventHandler;
use clap::Parser;
use cyget_config::Config;
use cyget_errors::{Error, RequestError};
use cyget_events::EventReceiver;
use cyget_ops::{CatalogSource, GetRequest, OpsContextBuilder, OpsCtx};
use cyget_resolver::Request;
use cyget_types::ColorChoice;
use std::path::PathBuf;
use std::process;
use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            let condition = if e.use_stderr() {
                ExitCondition::InvalidArguments
            } else {
                ExitCondition::Ok
            };
            process::exit(condition.code());
        }
    };

    init_tracing(cli.debug);

    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if e.is_cancelled() {
            eprintln!("\nYou cancelled the operation!");
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(e.exit_condition().code());
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting cyget v{}", env!("CARGO_PKG_VERSION"));

    // defaults, then file, then environment, then flags
    let mut config = Config::load_or_default(cli.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, &cli)?;

    let request = GetRequest {
        packages: collect_requests(&cli).await?,
        catalog: CatalogSource::from_arg(cli.setup_info.as_deref()),
        no_download: cli.no_download,
    };

    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(colors_enabled, cli.debug);

    let (event_sender, event_receiver) = cyget_events::channel();
    let cancel = CancellationToken::new();
    let abort = CancellationToken::new();
    spawn_interrupt_listener(cancel.clone(), abort.clone());

    let ctx = OpsContextBuilder::new()
        .with_event_sender(event_sender)
        .with_config(config)
        .with_cancellation(cancel)
        .with_abort(abort)
        .build()?;

    let paths =
        execute_with_events(&ctx, &request, event_receiver, &mut event_handler).await?;

    for path in paths {
        println!("{}", path.display());
    }

    info!("Run completed successfully");
    Ok(())
}

/// Positional names first, then the response file's entries
async fn collect_requests(cli: &Cli) -> Result<Vec<Request>, Error> {
    let mut requests: Vec<Request> = cli.packages.iter().map(Request::new).collect();

    if let Some(path) = &cli.response {
        requests.extend(response::load(path).await?);
    }

    if requests.is_empty() {
        return Err(RequestError::InvalidArguments(
            "no packages given; name at least one package, @Category or --response file"
                .to_string(),
        )
        .into());
    }
    Ok(requests)
}

/// What a Ctrl-C press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InterruptAction {
    /// Start no new downloads, let in-flight ones complete
    Finish,
    /// Abandon in-flight downloads too
    Abort,
}

fn interrupt_action(presses: usize) -> InterruptAction {
    if presses <= 1 {
        InterruptAction::Finish
    } else {
        InterruptAction::Abort
    }
}

/// First Ctrl-C cancels `cancel`, the second cancels `abort`
fn spawn_interrupt_listener(cancel: CancellationToken, abort: CancellationToken) {
    tokio::spawn(async move {
        let mut presses = 0;
        while tokio::signal::ctrl_c().await.is_ok() {
            presses += 1;
            match interrupt_action(presses) {
                InterruptAction::Finish => {
                    info!("Interrupt received, finishing in-flight downloads");
                    eprintln!("\nFinishing in-flight downloads, press Ctrl-C again to abort");
                    cancel.cancel();
                }
                InterruptAction::Abort => {
                    info!("Second interrupt received, aborting in-flight downloads");
                    cancel.cancel();
                    abort.cancel();
                    break;
                }
            }
        }
    });
}

/// Run the request while draining events concurrently
async fn execute_with_events(
    ctx: &OpsCtx,
    request: &GetRequest,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<Vec<PathBuf>, CliError> {
    let mut run_future = Box::pin(cyget_ops::get(ctx, request));

    loop {
        select! {
            result = &mut run_future => {
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(&event);
                }
                return result.map_err(CliError::from);
            }

            event = event_receiver.recv() => {
                if let Some(event) = event {
                    event_handler.handle_event(&event);
                }
            }
        }
    }
}

/// Initialize tracing/logging
fn init_tracing(debug_enabled: bool) {
    let filter = |fallback: &str| {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback))
    };

    if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_dir = Config::default_path()
            .ok()
            .and_then(|path| path.parent().map(|dir| dir.join("logs")))
            .unwrap_or_else(|| PathBuf::from("logs"));

        if let Err(e) = std::fs::create_dir_all(&log_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = log_dir.join(format!(
            "cyget-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(filter("info,cyget=debug,cyget_ops=debug"))
                    .init();

                eprintln!("Debug logging enabled: {}", log_file.display());
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
                tracing_subscriber::fmt()
                    .with_writer(std::io::stderr)
                    .with_env_filter(filter("info"))
                    .init();
            }
        }
    } else {
        // Normal mode: warnings only, to stderr
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter("warn"))
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, cli: &Cli) -> Result<(), CliError> {
    if let Some(mirror) = &cli.mirror {
        config.network.mirror.clone_from(mirror);
    }
    if let Some(dir) = &cli.target_dir {
        config.paths.target_dir = Some(dir.clone());
    }
    if let Some(spec) = &cli.version_spec {
        config.general.version_spec.clone_from(spec);
    }
    if let Some(parallel) = cli.parallel {
        config.general.parallel_downloads = parallel;
    }
    if let Some(color) = cli.color {
        config.general.color = color;
    }

    config.validate().map_err(|e| match e {
        Error::Config(err) => CliError::InvalidArguments(err.to_string()),
        other => CliError::Ops(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_interrupt_finishes_second_aborts() {
        assert_eq!(interrupt_action(1), InterruptAction::Finish);
        assert_eq!(interrupt_action(2), InterruptAction::Abort);
        assert_eq!(interrupt_action(3), InterruptAction::Abort);
    }
}
