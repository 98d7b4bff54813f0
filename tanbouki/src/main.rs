//! A terminal login form for 三宅と矢嶋の店探訪記

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Configuration and argument parsing
mod config;

use app::{App, EffectContext};
use clap::Parser;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use std::{fs, io, process::ExitCode, sync::Arc};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Things that stop us from getting the app on screen at all.
#[derive(Debug, thiserror::Error)]
enum Fatal {
    /// We couldn't set up the log directory or the terminal.
    #[error("IO error: {0}")]
    IO(#[from] io::Error),

    /// We couldn't build an HTTP client.
    #[error("could not set up HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[tokio::main]
async fn main() -> Result<ExitCode, Fatal> {
    let config = config::Config::parse();

    let _log_guard = init_logging(&config)?;

    let conn = Arc::new(EffectContext::new(config.http()?, config.client()));
    tracing::info!(server = ?config.client().server, "starting");

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, conn).await;
    ratatui::restore();

    tracing::info!(?res, "exiting");
    Ok(res?)
}

/// Send logs to a daily file, since the terminal belongs to the UI. Logs are
/// flushed when the returned guard is dropped.
fn init_logging(config: &config::Config) -> io::Result<WorkerGuard> {
    let dir = config.log_dir();
    fs::create_dir_all(&dir)?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "tanbouki.log"));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(guard)
}

/// Manage the lifecycle of the app
async fn run(mut terminal: DefaultTerminal, conn: Arc<EffectContext>) -> io::Result<ExitCode> {
    let mut app = App::new();

    // Network calls happen in async tasks. Once those tasks are done, we read
    // their results off of a channel. We keep track of outstanding effects so
    // we can exit cleanly.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects: Vec<JoinHandle<()>> = Vec::new();

    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    loop {
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => Some(app::Action::Key(key_event)),
                    Some(Err(err)) => Some(app::Action::Problem(err.to_string())),
                    _ => None,
                }
            },

            effect_opt = effect_rx.recv() => effect_opt,
        };

        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(
                    effect_tx.clone(),
                    Arc::clone(&conn),
                    effect,
                ));
            }
        }

        terminal.draw(|frame| app.render(frame))?;

        outstanding_effects.retain(|handle| !handle.is_finished());

        // Let in-flight requests settle before we go, so their outcomes end
        // up in the log.
        if let Some(code) = app.should_exit() {
            for effect in outstanding_effects.drain(..) {
                if let Err(err) = effect.await {
                    tracing::error!(?err, "effect task failed");
                }
            }

            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(
    effect_tx: UnboundedSender<app::Action>,
    conn: Arc<EffectContext>,
    effect: app::Effect,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let next_action = effect.run(&conn).await;

        // A closed channel means we're shutting down, so nobody is left to
        // show the result to.
        if effect_tx.send(next_action).is_err() {
            tracing::debug!("app stopped listening before an effect finished");
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fatal_from_io() {
        let err = Fatal::from(io::Error::new(io::ErrorKind::PermissionDenied, "no logs for you"));

        assert!(matches!(err, Fatal::IO(_)));
        assert_eq!(err.to_string(), "IO error: no logs for you");
    }

    #[test]
    fn test_init_logging_fails_on_unusable_dir() {
        let file = std::env::temp_dir().join(format!("tanbouki-not-a-dir-{}", std::process::id()));
        fs::write(&file, b"").unwrap();

        let config = config::Config::try_parse_from([
            "tanbouki",
            "--log-dir",
            file.join("logs").to_str().unwrap(),
        ])
        .unwrap();

        let res = init_logging(&config).map_err(Fatal::from);
        fs::remove_file(&file).unwrap();

        assert!(matches!(res, Err(Fatal::IO(_))));
    }
}
