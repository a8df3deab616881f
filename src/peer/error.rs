//! Peer connection error types.

use derive_more::{Display, Error};

/// What went wrong on the peer link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum PeerErrorKind {
    /// Could not open the listening socket.
    #[display("bind")]
    Bind,
    /// Could not reach the remote peer.
    #[display("connect")]
    Connect,
    /// Socket read or write failed.
    #[display("io")]
    Io,
    /// Incoming line is not a known message.
    #[display("decode")]
    Decode,
    /// Outgoing message could not be serialized.
    #[display("encode")]
    Encode,
    /// A session was already created or joined.
    #[display("already connected")]
    AlreadyConnected,
}

/// Peer error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Peer {} error: {} at {}:{}", kind, message, file, line)]
pub struct PeerError {
    /// Error category.
    pub kind: PeerErrorKind,
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl PeerError {
    /// Creates a new peer error with caller location tracking.
    #[track_caller]
    pub fn new(kind: PeerErrorKind, message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for PeerError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(PeerErrorKind::Io, format!("Socket error: {}", err))
    }
}
