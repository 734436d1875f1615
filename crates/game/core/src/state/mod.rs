//! Authoritative per-peer game state.
//!
//! This module owns the entity registry and the data types it tracks. Runtime
//! layers read this state freely but mutate it exclusively through
//! [`crate::engine::GameEngine`].
mod error;
mod registry;
pub mod types;

pub use error::RegistryError;
pub use registry::EntityRegistry;
pub use types::{Piece, PieceId, PieceType, Player, PlayerId};

use crate::board::BoardGraph;
use crate::config::BoardConfig;

/// Everything one peer knows about the session: the board and its entities.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GameState {
    /// Fixed tile graph with occupancy.
    pub board: BoardGraph,
    /// Players and pieces, validated against `board`.
    pub entities: EntityRegistry,
}

impl GameState {
    /// Creates an empty board with no players.
    pub fn new(config: BoardConfig) -> Self {
        Self {
            board: BoardGraph::new(config),
            entities: EntityRegistry::new(),
        }
    }
}
