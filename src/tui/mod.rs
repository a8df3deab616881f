//! Terminal UI.

mod app;
mod input;
mod link;
mod mode;
mod ui;

pub use app::{App, Command, Focus, SessionState};
pub use input::move_cursor;
pub use link::Link;
pub use mode::GameMode;
pub use ui::{board_cells, draw};

use crate::config::AppConfig;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, instrument};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Runs the game until the user quits.
///
/// In peer mode with `join` set, the session is joined right away.
#[instrument(skip(config))]
pub async fn run(mode: GameMode, config: AppConfig, join: Option<String>) -> Result<()> {
    info!(mode = mode.name(), payload = %config.payload(), "Starting TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let mut link = Link::new(config.bind().clone(), event_tx);
    let mut app = App::new(mode, *config.payload());

    if let (GameMode::Peer, Some(id)) = (mode, join) {
        app.set_peer_input(id);
        if let Some(command) = app.join_peer() {
            let _ = link.execute(command);
        }
    }

    let res = run_app(&mut terminal, &mut app, &mut link, &mut event_rx).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    res
}

async fn run_app(
    terminal: &mut Term,
    app: &mut App,
    link: &mut Link,
    event_rx: &mut mpsc::UnboundedReceiver<crate::peer::PeerEvent>,
) -> Result<()> {
    loop {
        let area = terminal.draw(|f| draw(f, app))?.area;

        while let Ok(event) = event_rx.try_recv() {
            app.handle_peer_event(event);
        }

        // Short poll keeps peer events flowing while idle
        if !event::poll(Duration::from_millis(50))? {
            tokio::task::yield_now().await;
            continue;
        }
        let command = match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse, area),
            _ => None,
        };
        if let Some(command) = command
            && link.execute(command).is_break()
        {
            return Ok(());
        }
    }
}
