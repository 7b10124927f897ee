//! Registration Flow
//!
//! Terminal front end of the three-stage registration flow. Each line typed on
//! stdin is the content of the active field, committed with Enter.
//!
//! # Flow
//! 1. User types a phone number; it is looked up with the registration service
//! 2. User types an email address; it is registered against the phone number
//! 3. The confirmation message is shown and the program exits

use anyhow::{Context, Result};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tracing::info;
use tracing_subscriber::EnvFilter;
use registration_flow::client::HttpRegistrationClient;
use registration_flow::config::Config;
use registration_flow::flow::{FlowController, FlowSettings};
use registration_flow::stage::Stage;
use registration_flow::view::{Field, Key, TerminalView};

/// Initializes the logging system.
///
/// Logs go to stderr so stdout stays free for the flow itself. The filter
/// comes from `RUST_LOG`, falling back to the configured level.
fn setup_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::new().context("Failed to load configuration")?;
    setup_logging(&config.log.level)?;
    info!(
        application = %config.application.name,
        service = %config.service.base_url,
        "Registration flow starting up"
    );

    let client = HttpRegistrationClient::new(&config.service)
        .context("Failed to create registration service client")?;
    let view = TerminalView::new(std::io::stdout(), config.transition_settle());
    let mut flow = FlowController::new(client, view, FlowSettings::from(&config));

    flow.start();

    let mut lines = LinesStream::new(BufReader::new(stdin()).lines());
    while let Some(line) = lines.next().await {
        let line = line.context("Failed to read input")?;
        let Some(field) = Field::for_stage(flow.stage()) else {
            break;
        };

        // Failures are already rendered; the same field stays active
        if let Some(Err(e)) = flow.on_key(field, Key::Enter, &line).await {
            info!(error = %e, "Step did not complete");
            flow.focus_active_field();
        }

        if flow.stage() == Stage::Confirmation {
            break;
        }
    }

    info!("Registration flow finished");
    Ok(())
}
