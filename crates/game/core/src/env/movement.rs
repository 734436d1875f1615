//! Movement oracle: how far each piece type may travel when selected.

use crate::state::PieceType;

/// Provides the movement budget of a piece type.
///
/// Piece statistics live outside the engine; the engine only needs the number
/// of steps to hand to the reachability search.
pub trait MovementOracle: Send + Sync {
    /// Exact number of steps a piece of `kind` moves.
    fn movement(&self, kind: PieceType) -> i32;
}

/// Gives every piece type the same budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UniformMovement(pub i32);

impl UniformMovement {
    pub const DEFAULT_MOVES: i32 = 1;
}

impl Default for UniformMovement {
    fn default() -> Self {
        Self(Self::DEFAULT_MOVES)
    }
}

impl MovementOracle for UniformMovement {
    fn movement(&self, _kind: PieceType) -> i32 {
        self.0
    }
}
