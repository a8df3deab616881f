//! Game mode selection.

/// Whether the board is shared with a remote peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Both players on this screen.
    #[default]
    Local,
    /// Moves are relayed to one directly connected peer.
    Peer,
}

impl GameMode {
    /// Returns display name.
    pub fn name(&self) -> &str {
        match self {
            GameMode::Local => "Local",
            GameMode::Peer => "Peer-to-peer",
        }
    }
}
