use std::collections::BTreeSet;

use crate::action::ActionTransition;
use crate::board::TilePos;
use crate::env::GameEnv;
use crate::state::{GameState, PieceId, PlayerId, RegistryError};

/// Selects an owned piece and yields the tiles it may move to.
///
/// The movement budget comes from the environment's movement oracle, looked
/// up by the piece's type, so replaying peers compute the same destinations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectAction {
    pub player: PlayerId,
    pub piece: PieceId,
}

impl SelectAction {
    pub fn new(player: PlayerId, piece: PieceId) -> Self {
        Self { player, piece }
    }
}

impl ActionTransition for SelectAction {
    type Error = RegistryError;
    type Result = BTreeSet<TilePos>;

    fn actor(&self) -> PlayerId {
        self.player
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state.entities.check_selection(self.player, self.piece)?;
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let kind = state.entities.check_selection(self.player, self.piece)?.kind;
        let moves = env.movement().movement(kind);
        state
            .entities
            .select_piece(&state.board, self.player, self.piece, moves)
    }

    fn post_validate(
        &self,
        state: &GameState,
        _env: &GameEnv<'_>,
        _reachable: &Self::Result,
    ) -> Result<(), Self::Error> {
        state.entities.verify_occupancy(&state.board, self.piece)
    }
}
