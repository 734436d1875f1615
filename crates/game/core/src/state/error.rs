//! Registry errors.
//!
//! Errors raised while placing or selecting pieces. Local callers receive them
//! synchronously; the replication layer logs them and drops the message.

use crate::board::TilePos;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{PieceId, PlayerId};

/// Errors that occur while mutating the entity registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RegistryError {
    /// The target tile already hosts a piece.
    #[error("tile {position} is already occupied")]
    TileOccupied { position: TilePos },

    /// No player with this id has joined the session.
    #[error("unknown player {player}")]
    UnknownPlayer { player: PlayerId },

    /// No piece with this id exists.
    #[error("unknown piece {piece}")]
    UnknownPiece { piece: PieceId },

    /// A player tried to act on a piece it does not own.
    #[error("player {player} does not own piece {piece} (owner {owner})")]
    NotOwner {
        player: PlayerId,
        piece: PieceId,
        owner: PlayerId,
    },

    /// A player id was registered twice.
    #[error("player {player} already joined")]
    DuplicatePlayer { player: PlayerId },

    /// An externally assigned piece id is already in use.
    #[error("piece {piece} already exists")]
    DuplicatePiece { piece: PieceId },

    /// An externally assigned piece id lies in another player's namespace.
    #[error("piece id {piece} does not belong to placing player {player}")]
    ForeignPieceId { player: PlayerId, piece: PieceId },

    /// A piece stands on a tile the board reports as free.
    #[error("occupancy desync for piece {piece} at {position}")]
    OccupancyDesync { piece: PieceId, position: TilePos },

    /// Every player id is taken.
    #[error("player id overflow")]
    PlayerIdOverflow,

    /// A player's piece id namespace is exhausted.
    #[error("piece id overflow for player {player}")]
    PieceIdOverflow { player: PlayerId },
}

impl GameError for RegistryError {
    fn severity(&self) -> ErrorSeverity {
        use RegistryError::*;
        match self {
            // Another tile may still be free
            TileOccupied { .. } => ErrorSeverity::Recoverable,

            UnknownPlayer { .. }
            | UnknownPiece { .. }
            | DuplicatePlayer { .. }
            | DuplicatePiece { .. }
            | ForeignPieceId { .. } => ErrorSeverity::Validation,

            // Normal interaction never selects a foreign piece
            NotOwner { .. } | OccupancyDesync { .. } => ErrorSeverity::Internal,

            PlayerIdOverflow | PieceIdOverflow { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use RegistryError::*;
        match self {
            TileOccupied { .. } => "REGISTRY_TILE_OCCUPIED",
            UnknownPlayer { .. } => "REGISTRY_UNKNOWN_PLAYER",
            UnknownPiece { .. } => "REGISTRY_UNKNOWN_PIECE",
            NotOwner { .. } => "REGISTRY_NOT_OWNER",
            DuplicatePlayer { .. } => "REGISTRY_DUPLICATE_PLAYER",
            DuplicatePiece { .. } => "REGISTRY_DUPLICATE_PIECE",
            ForeignPieceId { .. } => "REGISTRY_FOREIGN_PIECE_ID",
            OccupancyDesync { .. } => "REGISTRY_OCCUPANCY_DESYNC",
            PlayerIdOverflow => "REGISTRY_PLAYER_ID_OVERFLOW",
            PieceIdOverflow { .. } => "REGISTRY_PIECE_ID_OVERFLOW",
        }
    }
}
