//! Action transition dispatch and execution logic.

use crate::action::{Action, ActionTransition};
use crate::env::GameEnv;
use crate::state::GameState;

use super::ActionResult;
use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state, env, &result)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action variant to its transition and wraps the result.
///
/// Returns the action with any ids resolved during apply, ready to be
/// replicated.
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<(Action, ActionResult), ExecuteError> {
    match action {
        Action::Place(transition) => {
            let piece = drive_transition(transition, state, env).map_err(ExecuteError::Place)?;
            Ok((
                Action::Place(transition.resolved(piece)),
                ActionResult::Placed(piece),
            ))
        }
        Action::Select(transition) => {
            let reachable =
                drive_transition(transition, state, env).map_err(ExecuteError::Select)?;
            Ok((
                action.clone(),
                ActionResult::Selected {
                    piece: transition.piece,
                    reachable,
                },
            ))
        }
        Action::Deselect(transition) => {
            drive_transition(transition, state, env).map_err(ExecuteError::Deselect)?;
            Ok((action.clone(), ActionResult::Deselected(transition.piece)))
        }
    }
}
