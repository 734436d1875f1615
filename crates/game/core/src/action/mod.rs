//! Action domain: the closed set of state-mutating events.
//!
//! Every mutation a peer can make, whether it originates from local input or
//! from a replayed remote message, is an [`Action`]. Each variant implements
//! [`ActionTransition`] and runs through the engine's
//! pre_validate → apply → post_validate pipeline, so local and replayed
//! actions share one validated code path.
//!
//! # Module Structure
//!
//! - `place`: first placement of a piece on a free tile
//! - `select`: selecting an owned piece and computing its destinations
//! - `deselect`: returning a selected piece to plain placed

mod deselect;
mod place;
mod select;

pub use deselect::DeselectAction;
pub use place::PlaceAction;
pub use select::SelectAction;

use crate::env::GameEnv;
use crate::state::{GameState, PieceId, PlayerId};

/// Defines how a concrete action variant mutates game state.
pub trait ActionTransition {
    type Error;
    type Result;

    /// Returns the player performing this action.
    fn actor(&self) -> PlayerId;

    /// Validates pre-conditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error>;

    /// Validates post-conditions using the state **after** mutation.
    fn post_validate(
        &self,
        _state: &GameState,
        _env: &GameEnv<'_>,
        _result: &Self::Result,
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// A state-mutating event, replicated verbatim to remote peers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Place a new piece.
    Place(PlaceAction),
    /// Select an owned piece.
    Select(SelectAction),
    /// Clear the selection of an owned piece.
    Deselect(DeselectAction),
}

impl Action {
    /// Returns the player performing this action.
    pub fn actor(&self) -> PlayerId {
        match self {
            Action::Place(action) => action.actor(),
            Action::Select(action) => action.actor(),
            Action::Deselect(action) => action.actor(),
        }
    }

    /// Piece the action refers to, if already known.
    pub fn piece(&self) -> Option<PieceId> {
        match self {
            Action::Place(action) => action.piece,
            Action::Select(action) => Some(action.piece),
            Action::Deselect(action) => Some(action.piece),
        }
    }

    /// True when the action carries every id a remote peer needs to replay it.
    pub fn is_resolved(&self) -> bool {
        self.piece().is_some()
    }

    /// Short tag for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Place(_) => "place",
            Action::Select(_) => "select",
            Action::Deselect(_) => "deselect",
        }
    }
}

impl From<PlaceAction> for Action {
    fn from(action: PlaceAction) -> Self {
        Self::Place(action)
    }
}

impl From<SelectAction> for Action {
    fn from(action: SelectAction) -> Self {
        Self::Select(action)
    }
}

impl From<DeselectAction> for Action {
    fn from(action: DeselectAction) -> Self {
        Self::Deselect(action)
    }
}
