//! Error types raised by the replication layer.

use thiserror::Error;

use dejarik_core::{BoardError, ExecuteError, PieceType, RegistryError};

/// Failures while turning actions into wire payloads and back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// A placement without an assigned piece id cannot be replayed remotely.
    #[error("place action for {kind} at {position} has no piece id")]
    UnresolvedPlacement {
        kind: PieceType,
        position: dejarik_core::TilePos,
    },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid position in payload: {0}")]
    InvalidPosition(#[from] BoardError),

    #[error("unknown piece type tag {0}")]
    UnknownPieceType(u8),
}

/// Failures reported by a [`crate::Transport`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Every remote endpoint has gone away.
    #[error("transport closed: no peer accepted the message")]
    Closed,

    #[error("peer registry lock was poisoned")]
    LockPoisoned,
}

/// Errors surfaced by [`crate::Session`] operations.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("action execution failed: {0}")]
    Execute(#[from] ExecuteError),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl RuntimeError {
    /// Registry error behind this failure, if the registry rejected the action.
    pub fn registry_error(&self) -> Option<&RegistryError> {
        match self {
            RuntimeError::Execute(err) => Some(err.source_error()),
            RuntimeError::Registry(err) => Some(err),
            RuntimeError::Codec(_) | RuntimeError::Transport(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
