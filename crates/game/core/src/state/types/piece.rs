use crate::board::TilePos;

use super::{PieceId, PlayerId};

/// Creature a piece represents.
///
/// The tag travels on the wire and selects the model a renderer spawns; the
/// engine itself only uses it to look up a movement budget.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u8)]
pub enum PieceType {
    Ghhhk,
    Grimtaash,
    Houjix,
    KLorSlug,
    KintanStrider,
    MantellianSavrip,
    Monnok,
    NgOk,
}

impl PieceType {
    /// Wire tag of this piece type.
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Inverse of [`PieceType::tag`].
    pub fn from_tag(tag: u8) -> Option<Self> {
        Self::from_repr(tag)
    }
}

/// A piece on the board.
///
/// Invariant: `position` is an occupied tile of the board the owning registry
/// validates against.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub id: PieceId,
    pub owner: PlayerId,
    pub kind: PieceType,
    pub position: TilePos,
    pub selected: bool,
}

impl Piece {
    pub fn new(id: PieceId, owner: PlayerId, kind: PieceType, position: TilePos) -> Self {
        Self {
            id,
            owner,
            kind,
            position,
            selected: false,
        }
    }

    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == player
    }
}
