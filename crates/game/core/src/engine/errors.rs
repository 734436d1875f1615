//! Error types for the action execution pipeline.

use crate::action::{ActionTransition, DeselectAction, PlaceAction, SelectAction};
use crate::error::{ErrorSeverity, GameError};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("place action failed: {0}")]
    Place(TransitionPhaseError<<PlaceAction as ActionTransition>::Error>),

    #[error("select action failed: {0}")]
    Select(TransitionPhaseError<<SelectAction as ActionTransition>::Error>),

    #[error("deselect action failed: {0}")]
    Deselect(TransitionPhaseError<<DeselectAction as ActionTransition>::Error>),
}

impl ExecuteError {
    pub fn phase(&self) -> TransitionPhase {
        match self {
            ExecuteError::Place(inner)
            | ExecuteError::Select(inner)
            | ExecuteError::Deselect(inner) => inner.phase,
        }
    }

    /// Registry error that stopped the pipeline.
    pub fn source_error(&self) -> &crate::state::RegistryError {
        match self {
            ExecuteError::Place(inner)
            | ExecuteError::Select(inner)
            | ExecuteError::Deselect(inner) => &inner.error,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        // A post-condition failure means the engine itself broke an invariant.
        match self.phase() {
            TransitionPhase::PostValidate => ErrorSeverity::Internal,
            _ => self.source_error().severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        self.source_error().error_code()
    }
}
