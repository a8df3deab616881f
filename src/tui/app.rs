//! Application state and logic.
//!
//! `App` never touches the terminal or the network. Input and peer events go
//! in, [`Command`]s for the session link come out.

use super::input::move_cursor;
use super::mode::GameMode;
use super::ui;
use crate::games::tictactoe::{Game, Mark, MoveOutcome, Position};
use crate::peer::{PeerErrorKind, PeerEvent, PeerMessage, RelayPayload};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position as Cell, Rect};
use std::net::SocketAddr;
use tracing::{debug, info, instrument, warn};

/// Work for the session link, produced by input handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Leave the program.
    Quit,
    /// Open a session for a remote peer to join.
    CreateSession,
    /// Join the session with this identifier.
    JoinSession(String),
    /// Forward a message to the connected peer.
    Relay(PeerMessage),
}

/// Which widget receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Keys drive the board.
    #[default]
    Board,
    /// Keys edit the peer identifier field.
    PeerField,
}

/// Lifecycle of the single peer session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Nothing created or joined yet.
    #[default]
    Idle,
    /// Opening the listening socket.
    Creating,
    /// Listening; waiting for the other player to join `id`.
    Open {
        /// Identifier to share.
        id: String,
    },
    /// Connecting to `id`.
    Joining {
        /// Identifier being joined.
        id: String,
    },
    /// Peer connected.
    Connected {
        /// Remote socket address.
        remote: SocketAddr,
    },
    /// The session ended or could not be set up.
    Closed,
}

impl SessionState {
    /// Human-readable one-liner for the controls panel.
    pub fn describe(&self) -> String {
        match self {
            SessionState::Idle => "none".to_string(),
            SessionState::Creating => "Generating...".to_string(),
            SessionState::Open { id } => format!("Room {} (waiting for peer)", id),
            SessionState::Joining { id } => format!("Joining {}...", id),
            SessionState::Connected { remote } => format!("Connected to {}", remote),
            SessionState::Closed => "closed".to_string(),
        }
    }
}

/// Main application state.
#[derive(Debug, Clone)]
pub struct App {
    mode: GameMode,
    payload: RelayPayload,
    game: Game,
    cursor: Position,
    focus: Focus,
    peer_input: String,
    session: SessionState,
    notice: String,
}

impl App {
    /// Creates a new application.
    pub fn new(mode: GameMode, payload: RelayPayload) -> Self {
        let notice = match mode {
            GameMode::Local => "Arrows + Enter, 1-9 or click to mark. q quits.",
            GameMode::Peer => "c creates a room, j joins one. q quits.",
        };
        Self {
            mode,
            payload,
            game: Game::new(),
            cursor: Position::Center,
            focus: Focus::default(),
            peer_input: String::new(),
            session: SessionState::default(),
            notice: notice.to_string(),
        }
    }

    /// Game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Gets the current game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Cell under the keyboard cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Widget receiving keys.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Contents of the peer identifier field.
    pub fn peer_input(&self) -> &str {
        &self.peer_input
    }

    /// Peer session state.
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Last informational message.
    pub fn notice(&self) -> &str {
        &self.notice
    }

    /// Headline: whose turn it is, or who won.
    pub fn headline(&self) -> String {
        match self.game.winning_mark() {
            Some(mark) => format!("Winner: {}", mark),
            None => format!("Current Player: {}", self.game.current()),
        }
    }

    /// Pre-fills the peer identifier field.
    pub fn set_peer_input(&mut self, id: impl Into<String>) {
        self.peer_input = id.into();
    }

    /// Handles a key press.
    #[instrument(skip(self), fields(focus = ?self.focus))]
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match self.focus {
            Focus::Board => self.board_key(key.code),
            Focus::PeerField => self.field_key(key.code),
        }
    }

    /// Handles a mouse event; `area` is the full frame the UI was drawn in.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) -> Option<Command> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let point = Cell::new(mouse.column, mouse.row);
        let index = ui::board_cells(area, self.mode)
            .iter()
            .position(|rect| rect.contains(point))?;
        debug!(index, "Cell clicked");
        self.focus = Focus::Board;
        self.cursor = Position::from_index(index).unwrap_or(self.cursor);
        self.place(index)
    }

    /// Applies a notification from the peer session.
    #[instrument(skip(self))]
    pub fn handle_peer_event(&mut self, event: PeerEvent) {
        match event {
            PeerEvent::Opened { id } => {
                self.notice = format!("Share this room id with your opponent: {}", id);
                self.session = SessionState::Open { id };
            }
            PeerEvent::Connected { remote } => {
                self.notice = "Peer connected. Play on!".to_string();
                self.session = SessionState::Connected { remote };
            }
            PeerEvent::Data(message) => self.apply_remote(message),
            PeerEvent::Disconnected => {
                self.notice = "Peer disconnected.".to_string();
                self.session = SessionState::Closed;
            }
            PeerEvent::Failed(err) => {
                warn!(error = %err, "Peer failure");
                self.notice = format!("Peer error: {}", err.message);
                let setting_up = matches!(
                    self.session,
                    SessionState::Creating | SessionState::Open { .. } | SessionState::Joining { .. }
                );
                if setting_up || matches!(err.kind, PeerErrorKind::Bind | PeerErrorKind::Connect) {
                    self.session = SessionState::Closed;
                }
            }
        }
    }

    fn board_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
                self.cursor = move_cursor(self.cursor, code);
                None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor.to_index()),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let pos = Position::from_digit(c)?;
                self.cursor = pos;
                self.place(pos.to_index())
            }
            KeyCode::Char('c') if self.mode == GameMode::Peer => self.create(),
            KeyCode::Char('j') | KeyCode::Tab if self.mode == GameMode::Peer => {
                if self.session == SessionState::Idle {
                    self.focus = Focus::PeerField;
                } else {
                    self.notice = "A session was already started.".to_string();
                }
                None
            }
            _ => None,
        }
    }

    fn field_key(&mut self, code: KeyCode) -> Option<Command> {
        match code {
            KeyCode::Esc | KeyCode::Tab => {
                self.focus = Focus::Board;
                None
            }
            KeyCode::Backspace => {
                self.peer_input.pop();
                None
            }
            KeyCode::Enter => self.join_peer(),
            KeyCode::Char(c) if !c.is_control() => {
                self.peer_input.push(c);
                None
            }
            _ => None,
        }
    }

    fn create(&mut self) -> Option<Command> {
        if self.session != SessionState::Idle {
            self.notice = "A session was already started.".to_string();
            return None;
        }
        info!("Creating room");
        self.session = SessionState::Creating;
        Some(Command::CreateSession)
    }

    /// Joins the session typed in the peer identifier field.
    pub fn join_peer(&mut self) -> Option<Command> {
        let id = self.peer_input.trim().to_string();
        if id.is_empty() {
            self.notice = "Type the room id first.".to_string();
            return None;
        }
        if self.session != SessionState::Idle {
            self.notice = "A session was already started.".to_string();
            return None;
        }
        info!(%id, "Joining room");
        self.focus = Focus::Board;
        self.session = SessionState::Joining { id: id.clone() };
        Some(Command::JoinSession(id))
    }

    /// Offers a local move and builds the relay command if it was accepted.
    fn place(&mut self, index: usize) -> Option<Command> {
        let outcome = self.game.play(index);
        self.describe_outcome(outcome);
        if !outcome.accepted() || !matches!(self.session, SessionState::Connected { .. }) {
            return None;
        }
        Some(Command::Relay(PeerMessage::for_move(
            self.payload,
            index,
            self.game.board(),
        )))
    }

    /// Applies what the remote peer sent, without checking whose turn it was.
    fn apply_remote(&mut self, message: PeerMessage) {
        match message {
            PeerMessage::Move { index } => {
                let outcome = self.game.play(index);
                debug!(index, ?outcome, "Remote move");
                self.describe_outcome(outcome);
            }
            PeerMessage::Board { cells } => {
                let outcome = self.game.apply_snapshot(&cells);
                debug!(?outcome, "Remote board");
                if let Some(mark) = self.game.winning_mark().filter(|_| outcome.won) {
                    self.notice = format!("{} wins!", mark);
                }
            }
        }
    }

    fn describe_outcome(&mut self, outcome: MoveOutcome) {
        self.notice = match outcome {
            MoveOutcome::Won(mark) => format!("{} wins!", mark),
            MoveOutcome::Placed { mark, next } => format!("{} played, {} to move.", mark, next),
            MoveOutcome::Ignored(reason) => {
                debug!(%reason, "Move ignored");
                return;
            }
        };
    }

    /// Mark owning the winning triplet, if any (for rendering).
    pub fn winner(&self) -> Option<Mark> {
        self.game.winning_mark()
    }
}
