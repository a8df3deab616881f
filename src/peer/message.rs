//! Messages exchanged between the two peers.
//!
//! One JSON object per line:
//!
//! ```text
//! {"type":"move","index":4}
//! {"type":"board","cells":[null,"X",null,"O",null,null,null,null,null]}
//! ```

use super::error::{PeerError, PeerErrorKind};
use crate::games::tictactoe::Board;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A payload forwarded to the remote peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PeerMessage {
    /// A cell index the sender just marked.
    Move {
        /// Board index (0-8).
        index: usize,
    },
    /// The sender's full board after its move.
    Board {
        /// Nine cells, row-major.
        cells: Board,
    },
}

impl PeerMessage {
    /// Builds the message announcing a local move, in the configured shape.
    pub fn for_move(payload: RelayPayload, index: usize, board: &Board) -> Self {
        match payload {
            RelayPayload::Move => PeerMessage::Move { index },
            RelayPayload::Board => PeerMessage::Board {
                cells: board.clone(),
            },
        }
    }

    /// Serializes to a single line, newline included.
    #[instrument(level = "trace")]
    pub fn encode(&self) -> Result<String, PeerError> {
        let mut line = serde_json::to_string(self)
            .map_err(|e| PeerError::new(PeerErrorKind::Encode, e.to_string()))?;
        line.push('\n');
        Ok(line)
    }

    /// Parses one line (surrounding whitespace ignored).
    #[instrument(level = "trace")]
    pub fn decode(line: &str) -> Result<Self, PeerError> {
        serde_json::from_str(line.trim()).map_err(|e| {
            PeerError::new(PeerErrorKind::Decode, format!("{}: {:?}", e, line.trim()))
        })
    }
}

/// What a local move forwards to the remote peer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RelayPayload {
    /// The marked index only.
    #[default]
    Move,
    /// The whole board after the move.
    Board,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Game;

    #[test]
    fn test_move_wire_shape() {
        let line = PeerMessage::Move { index: 4 }.encode().unwrap();
        assert_eq!(line, "{\"type\":\"move\",\"index\":4}\n");
    }

    #[test]
    fn test_board_wire_shape() {
        let mut game = Game::new();
        game.play(1);
        let msg = PeerMessage::for_move(RelayPayload::Board, 1, game.board());
        let line = msg.encode().unwrap();
        assert_eq!(
            line,
            "{\"type\":\"board\",\"cells\":[null,\"X\",null,null,null,null,null,null,null]}\n"
        );
        assert_eq!(PeerMessage::decode(&line).unwrap(), msg);
    }

    #[test]
    fn test_unknown_type_is_decode_error() {
        let err = PeerMessage::decode(r#"{"type":"reset"}"#).unwrap_err();
        assert_eq!(err.kind, PeerErrorKind::Decode);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = PeerMessage::decode("hello").unwrap_err();
        assert_eq!(err.kind, PeerErrorKind::Decode);
    }

    #[test]
    fn test_short_board_is_decode_error() {
        let err = PeerMessage::decode(r#"{"type":"board","cells":[null,"X"]}"#).unwrap_err();
        assert_eq!(err.kind, PeerErrorKind::Decode);
    }
}
