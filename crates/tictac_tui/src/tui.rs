//! Terminal event loop.

use crate::{
    app::App,
    config::GameConfig,
    input::action_for,
    ui,
};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::{io, time::Duration};
use tictac::{AiTurn, Game, RandomSource, RngSource};
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info, instrument};

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Runs the interactive game until the user quits.
pub async fn run_tui(config: GameConfig) -> Result<()> {
    // Logging goes to a file so it cannot scribble over the screen.
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("creating log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(?config, "Starting tic-tac-toe TUI");

    let game = Game::new(config.settings(), config.ai_delay(), RngSource::from_entropy());
    let mut app = App::new(game);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("TUI exited");
    res
}

/// Pending computer move timer.
struct AiTimer {
    tx: mpsc::UnboundedSender<u64>,
    handle: Option<JoinHandle<()>>,
}

impl AiTimer {
    fn new(tx: mpsc::UnboundedSender<u64>) -> Self {
        Self { tx, handle: None }
    }

    /// Replaces any armed timer with one for `turn`.
    fn arm(&mut self, turn: AiTurn) {
        self.cancel();
        debug!(ticket = turn.ticket, delay_ms = turn.delay.as_millis() as u64, "Arming AI timer");
        let tx = self.tx.clone();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(turn.delay).await;
            // Receiver only closes when the loop has exited.
            let _ = tx.send(turn.ticket);
        }));
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for AiTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[instrument(skip_all)]
async fn run_app<B, R>(terminal: &mut Terminal<B>, app: &mut App<R>) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
    R: RandomSource,
{
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut timer = AiTimer::new(tx);

    if let Some(turn) = app.initial_turn() {
        timer.arm(turn);
    }

    loop {
        let view = app.view();
        let cursor = app.cursor();
        terminal.draw(|frame| ui::draw(frame, &view, cursor))?;

        while let Ok(ticket) = rx.try_recv() {
            debug!(ticket, "AI timer fired");
            app.on_ai_timer(ticket);
        }

        if event::poll(INPUT_POLL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && let Some(action) = action_for(key.code)
        {
            match app.handle_action(action) {
                Some(turn) => timer.arm(turn),
                None if !app.view().thinking => timer.cancel(),
                None => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
