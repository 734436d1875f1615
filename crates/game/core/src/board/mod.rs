//! Board topology: coordinates, the fixed tile graph, and reachability.
//!
//! The board is one center tile surrounded by two rings of twelve sectors.
//! Adjacency follows the rings rather than Euclidean distance: the center
//! touches every inner tile, inner tiles touch their ring neighbours, the
//! outer tile in the same sector and the center, and outer tiles touch their
//! ring neighbours and the inner tile in the same sector.
mod error;
mod graph;
mod pos;
pub mod reach;

pub use error::BoardError;
pub use graph::{BoardGraph, Tile, WorldPoint};
pub use pos::TilePos;
pub use reach::find_reachable;
