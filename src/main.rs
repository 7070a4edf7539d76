//! lexicard - chat-command dictionary overlay.

use lexicard::config::{Config, validation};
use lexicard::content::DictionaryApi;
use lexicard::display::{ChatReplyPublisher, OverlaySurface, RotationScheduler, RotationTiming};
use lexicard::{Presenter, Session, chat, http, metrics};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Outgoing chat lines waiting for the connection.
const OUTBOUND_QUEUE_SIZE: usize = 16;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "lexicard.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validation::validate(&config) {
        for e in &errors {
            error!("Config error: {}", e);
        }
        return Err(anyhow::anyhow!(
            "Refusing to start with {} configuration error(s)",
            errors.len()
        ));
    }

    info!(
        trigger = %config.command.trigger,
        mode = ?config.display.mode,
        channel = config.chat.as_ref().map(|c| c.channel.as_str()).unwrap_or("-"),
        "Starting lexicard"
    );

    metrics::init();

    // Overlay feed and metrics
    let overlay = Arc::new(OverlaySurface::new(
        &config.display,
        config.overlay.event_capacity,
    ));
    tokio::spawn(http::run_http_server(
        config.overlay.listen,
        Arc::clone(&overlay),
    ));

    // Presenter
    let (outbound_tx, outbound_rx) = mpsc::channel::<String>(OUTBOUND_QUEUE_SIZE);
    let presenter = match (&config.chat, Session::wants_publisher(&config)) {
        (Some(chat), true) => Presenter::Publish(Arc::new(ChatReplyPublisher::new(
            &chat.channel,
            outbound_tx,
            chat.reply_interval(),
        ))),
        _ => Presenter::Rotate(Arc::new(RotationScheduler::new(
            overlay.clone(),
            RotationTiming::from_config(&config.display),
        ))),
    };

    let provider = Arc::new(DictionaryApi::new(&config.content)?);
    let session = Arc::new(Session::new(&config, provider, presenter)?);

    if config.display.test_mode {
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            let outcome = session.show_mock().await;
            info!(outcome = outcome.label(), "Test mode entry presented");
        });
    }

    let shutdown = CancellationToken::new();
    let chat_task = match config.chat.clone() {
        Some(chat) => Some(tokio::spawn(chat::run(
            chat,
            Arc::clone(&session),
            outbound_rx,
            shutdown.clone(),
        ))),
        None => {
            warn!("No [chat] section configured; only test mode will show anything");
            None
        }
    };

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    shutdown.cancel();
    if let Some(task) = chat_task {
        let _ = task.await;
    }

    Ok(())
}
