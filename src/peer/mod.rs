//! Direct peer-to-peer relay of moves between two players.
//!
//! One side creates a session and shares its identifier, the other joins it.
//! After that, every local move is forwarded as a [`PeerMessage`] and every
//! incoming message is surfaced as a [`PeerEvent`].

mod error;
mod message;
mod session;

pub use error::{PeerError, PeerErrorKind};
pub use message::{PeerMessage, RelayPayload};
pub use session::{MAX_LINE_BYTES, PeerEvent, PeerHandle, PeerSession};
