use crate::action::ActionTransition;
use crate::env::GameEnv;
use crate::state::{GameState, PieceId, PlayerId, RegistryError};

/// Clears the selection flag of an owned piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeselectAction {
    pub player: PlayerId,
    pub piece: PieceId,
}

impl DeselectAction {
    pub fn new(player: PlayerId, piece: PieceId) -> Self {
        Self { player, piece }
    }
}

impl ActionTransition for DeselectAction {
    type Error = RegistryError;
    type Result = ();

    fn actor(&self) -> PlayerId {
        self.player
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state.entities.check_selection(self.player, self.piece)?;
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        state.entities.deselect_piece(self.player, self.piece)
    }

    fn post_validate(
        &self,
        state: &GameState,
        _env: &GameEnv<'_>,
        _result: &Self::Result,
    ) -> Result<(), Self::Error> {
        state.entities.verify_occupancy(&state.board, self.piece)
    }
}
