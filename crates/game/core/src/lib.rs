//! Deterministic Dejarik rules shared by every peer.
//!
//! `dejarik-core` defines the circular board, reachability search, the
//! player/piece registry and the actions that mutate them. It performs no I/O;
//! replication lives in `dejarik-runtime`. All state mutation flows through
//! [`engine::GameEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{Action, ActionTransition, DeselectAction, PlaceAction, SelectAction};
pub use board::{BoardError, BoardGraph, Tile, TilePos, WorldPoint, find_reachable};
pub use config::BoardConfig;
pub use engine::{
    ActionResult, ExecuteError, ExecutionOutcome, GameEngine, TransitionPhase,
    TransitionPhaseError,
};
pub use env::{Env, GameEnv, MovementOracle, UniformMovement};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    EntityRegistry, GameState, Piece, PieceId, PieceType, Player, PlayerId, RegistryError,
};
