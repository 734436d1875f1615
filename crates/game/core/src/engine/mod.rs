//! Action execution pipeline.
//!
//! The [`GameEngine`] is the only writer of [`GameState`]. Local input and
//! replayed remote actions both go through [`GameEngine::execute`], which
//! runs the pre_validate → apply → post_validate phases and reports the
//! failing phase on error. An action rejected in pre_validate or apply leaves
//! no partial mutation behind, since every check that can fail there runs
//! before the first write. A post_validate failure reports an invariant
//! broken by apply; the state keeps that mutation.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

use std::collections::BTreeSet;

use crate::action::Action;
use crate::board::TilePos;
use crate::env::GameEnv;
use crate::state::{GameState, PieceId};

/// Action-specific result of a successful execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    /// A piece now stands on its tile.
    Placed(PieceId),
    /// A piece was selected; `reachable` holds its destination tiles.
    Selected {
        piece: PieceId,
        reachable: BTreeSet<TilePos>,
    },
    /// A piece went back from selected to placed.
    Deselected(PieceId),
}

impl ActionResult {
    pub fn piece(&self) -> PieceId {
        match self {
            ActionResult::Placed(piece) | ActionResult::Deselected(piece) => *piece,
            ActionResult::Selected { piece, .. } => *piece,
        }
    }

    /// Destination tiles; `None` unless the piece was selected.
    pub fn reachable(&self) -> Option<&BTreeSet<TilePos>> {
        match self {
            ActionResult::Placed(_) | ActionResult::Deselected(_) => None,
            ActionResult::Selected { reachable, .. } => Some(reachable),
        }
    }
}

/// Complete outcome of action execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    /// The executed action with every id resolved; this is what gets replicated.
    pub action: Action,

    /// Action-specific execution result.
    pub result: ActionResult,
}

/// Game engine that applies actions to a borrowed [`GameState`].
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes an action by routing it through its transition pipeline.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let (action, result) = transition::execute_transition(action, self.state, &env)?;
        Ok(ExecutionOutcome { action, result })
    }
}
