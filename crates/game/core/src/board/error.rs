//! Board lookup and coordinate decoding errors.

use crate::board::TilePos;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised when a position cannot be resolved on the board.
///
/// Normalising constructors ([`TilePos::new`]) never produce these; they come
/// from strict decoding at trust boundaries and from arena lookups.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardError {
    /// The position is not one of the constructed tiles.
    #[error("tile {position} not found")]
    NotFound { position: TilePos },

    /// Row outside `[0, 2]`.
    #[error("row {row} is out of range (expected 0..=2)")]
    InvalidRow { row: i32 },

    /// Sector outside `[0, 11]`, or non-zero on the center row.
    #[error("sector {sector} is invalid for row {row}")]
    InvalidSector { row: i32, sector: i32 },

    /// A tile id string that is not `<row><base-12 sector>`.
    #[error("malformed tile id {id:?}")]
    InvalidTileId { id: String },
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            BoardError::NotFound { .. } => ErrorSeverity::Internal,
            BoardError::InvalidRow { .. }
            | BoardError::InvalidSector { .. }
            | BoardError::InvalidTileId { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            BoardError::NotFound { .. } => "BOARD_TILE_NOT_FOUND",
            BoardError::InvalidRow { .. } => "BOARD_INVALID_ROW",
            BoardError::InvalidSector { .. } => "BOARD_INVALID_SECTOR",
            BoardError::InvalidTileId { .. } => "BOARD_INVALID_TILE_ID",
        }
    }
}
