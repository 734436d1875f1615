pub mod common;
pub mod piece;
pub mod player;

pub use common::{PieceId, PlayerId};
pub use piece::{Piece, PieceType};
pub use player::Player;
