//! Executes [`Command`]s against the single peer session.

use super::app::Command;
use crate::peer::{PeerEvent, PeerHandle, PeerSession};
use std::ops::ControlFlow;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Owns the peer session (if any) on behalf of the UI loop.
#[derive(Debug)]
pub struct Link {
    bind: String,
    events: mpsc::UnboundedSender<PeerEvent>,
    peer: Option<PeerHandle>,
}

impl Link {
    /// Creates a link; sessions it opens report to `events`.
    pub fn new(bind: impl Into<String>, events: mpsc::UnboundedSender<PeerEvent>) -> Self {
        Self {
            bind: bind.into(),
            events,
            peer: None,
        }
    }

    /// Whether a remote peer is connected right now.
    pub fn is_connected(&self) -> bool {
        self.peer.as_ref().is_some_and(PeerHandle::is_connected)
    }

    /// Runs one command. `Break` means the UI should exit.
    ///
    /// Must be called inside a tokio runtime.
    #[instrument(skip(self))]
    pub fn execute(&mut self, command: Command) -> ControlFlow<()> {
        match command {
            Command::Quit => {
                info!("Quit requested");
                return ControlFlow::Break(());
            }
            Command::CreateSession => {
                if self.peer.is_some() {
                    warn!("Session already exists, create ignored");
                } else {
                    self.peer = Some(PeerSession::create(self.bind.clone(), self.events.clone()));
                }
            }
            Command::JoinSession(id) => {
                if self.peer.is_some() {
                    warn!("Session already exists, join ignored");
                } else {
                    self.peer = Some(PeerSession::join(id, self.events.clone()));
                }
            }
            Command::Relay(message) => match &self.peer {
                Some(peer) => {
                    if !peer.send(message) {
                        debug!("Relay skipped, peer not connected");
                    }
                }
                None => debug!("Relay skipped, no session"),
            },
        }
        ControlFlow::Continue(())
    }
}
