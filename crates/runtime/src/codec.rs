//! Wire codec for replicated actions.
//!
//! Actions travel as the `bincode` encoding of [`WireMessage`], a flat,
//! primitive-only mirror of [`Action`]. Decoding re-validates every position
//! with [`TilePos::try_new`], so a malformed payload is rejected instead of
//! being clamped onto the board.

use serde::{Deserialize, Serialize};

use dejarik_core::{
    Action, DeselectAction, PieceId, PieceType, PlaceAction, PlayerId, SelectAction, TilePos,
};

use crate::error::CodecError;

/// On-the-wire form of a resolved action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireMessage {
    Place {
        player: u32,
        piece_owner: u32,
        piece_seq: u32,
        kind: u8,
        row: i32,
        sector: i32,
    },
    Select {
        player: u32,
        piece_owner: u32,
        piece_seq: u32,
    },
    Deselect {
        player: u32,
        piece_owner: u32,
        piece_seq: u32,
    },
}

impl TryFrom<&Action> for WireMessage {
    type Error = CodecError;

    fn try_from(action: &Action) -> Result<Self, Self::Error> {
        match action {
            Action::Place(place) => {
                let piece = place.piece.ok_or(CodecError::UnresolvedPlacement {
                    kind: place.kind,
                    position: place.position,
                })?;
                Ok(WireMessage::Place {
                    player: place.player.0,
                    piece_owner: piece.owner.0,
                    piece_seq: piece.seq,
                    kind: place.kind.tag(),
                    row: i32::from(place.position.row()),
                    sector: i32::from(place.position.sector()),
                })
            }
            Action::Select(select) => Ok(WireMessage::Select {
                player: select.player.0,
                piece_owner: select.piece.owner.0,
                piece_seq: select.piece.seq,
            }),
            Action::Deselect(deselect) => Ok(WireMessage::Deselect {
                player: deselect.player.0,
                piece_owner: deselect.piece.owner.0,
                piece_seq: deselect.piece.seq,
            }),
        }
    }
}

impl TryFrom<WireMessage> for Action {
    type Error = CodecError;

    fn try_from(message: WireMessage) -> Result<Self, Self::Error> {
        match message {
            WireMessage::Place {
                player,
                piece_owner,
                piece_seq,
                kind,
                row,
                sector,
            } => {
                let kind = PieceType::from_tag(kind).ok_or(CodecError::UnknownPieceType(kind))?;
                let position = TilePos::try_new(row, sector)?;
                Ok(Action::Place(PlaceAction::with_id(
                    PlayerId(player),
                    PieceId::new(PlayerId(piece_owner), piece_seq),
                    kind,
                    position,
                )))
            }
            WireMessage::Select {
                player,
                piece_owner,
                piece_seq,
            } => Ok(Action::Select(SelectAction::new(
                PlayerId(player),
                PieceId::new(PlayerId(piece_owner), piece_seq),
            ))),
            WireMessage::Deselect {
                player,
                piece_owner,
                piece_seq,
            } => Ok(Action::Deselect(DeselectAction::new(
                PlayerId(player),
                PieceId::new(PlayerId(piece_owner), piece_seq),
            ))),
        }
    }
}

/// Encodes a resolved action into a payload.
pub fn encode(action: &Action) -> Result<Vec<u8>, CodecError> {
    let message = WireMessage::try_from(action)?;
    bincode::serialize(&message).map_err(|e| CodecError::Serialization(e.to_string()))
}

/// Decodes and validates a payload.
pub fn decode(payload: &[u8]) -> Result<Action, CodecError> {
    let message: WireMessage =
        bincode::deserialize(payload).map_err(|e| CodecError::Deserialization(e.to_string()))?;
    Action::try_from(message)
}
