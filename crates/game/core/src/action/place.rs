use crate::action::ActionTransition;
use crate::board::TilePos;
use crate::env::GameEnv;
use crate::state::{GameState, PieceId, PieceType, PlayerId, RegistryError};

/// Places a new piece on a free tile.
///
/// `piece` is `None` when the placement originates locally; the registry then
/// allocates an id from the player's namespace. A replayed placement carries
/// the initiator's id and reuses it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceAction {
    pub player: PlayerId,
    pub piece: Option<PieceId>,
    pub kind: PieceType,
    pub position: TilePos,
}

impl PlaceAction {
    /// Local placement; the id is assigned during apply.
    pub fn new(player: PlayerId, kind: PieceType, position: TilePos) -> Self {
        Self {
            player,
            piece: None,
            kind,
            position,
        }
    }

    /// Placement with an id assigned by the initiating peer.
    pub fn with_id(player: PlayerId, piece: PieceId, kind: PieceType, position: TilePos) -> Self {
        Self {
            player,
            piece: Some(piece),
            kind,
            position,
        }
    }

    /// Copy of this action carrying the id the placement ended up with.
    pub fn resolved(self, piece: PieceId) -> Self {
        Self {
            piece: Some(piece),
            ..self
        }
    }
}

impl ActionTransition for PlaceAction {
    type Error = RegistryError;
    type Result = PieceId;

    fn actor(&self) -> PlayerId {
        self.player
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        state
            .entities
            .check_placement(&state.board, self.player, self.position, self.piece)
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let GameState { board, entities } = state;
        let piece = entities.place_piece(board, self.player, self.kind, self.position, self.piece)?;
        Ok(piece.id)
    }

    fn post_validate(
        &self,
        state: &GameState,
        _env: &GameEnv<'_>,
        piece: &PieceId,
    ) -> Result<(), Self::Error> {
        state.entities.verify_occupancy(&state.board, *piece)
    }
}
