use std::collections::BTreeSet;
use std::f32::consts::PI;

use arrayvec::ArrayVec;

use crate::board::{BoardError, TilePos, reach};
use crate::config::BoardConfig;

type Neighbours = ArrayVec<TilePos, { BoardConfig::MAX_NEIGHBOURS }>;

/// Angular width of one sector in radians.
const SECTOR_ANGLE: f32 = (PI * 2.0) / BoardConfig::SECTORS as f32;

/// One board cell.
///
/// Neighbours are stored by position and computed once when the board is
/// built. `occupied` is the only field that changes afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    position: TilePos,
    neighbours: Neighbours,
    occupied: bool,
}

impl Tile {
    pub fn position(&self) -> TilePos {
        self.position
    }

    pub fn neighbours(&self) -> &[TilePos] {
        &self.neighbours
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn is_adjacent(&self, other: TilePos) -> bool {
        self.neighbours.contains(&other)
    }
}

/// Point in the board's local space. The board lies in the `x`/`z` plane.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl WorldPoint {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Point at `radius` along the direction `angle` (radians from +x towards +z).
    fn polar(radius: f32, angle: f32) -> Self {
        Self::new(angle.cos() * radius, 0.0, angle.sin() * radius)
    }
}

/// Fixed 25-tile ring topology with per-tile occupancy.
///
/// Tiles live in an arena indexed by [`TilePos::index`], so occupancy updates
/// mutate the stored tile in place.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardGraph {
    config: BoardConfig,
    tiles: Vec<Tile>,
}

impl BoardGraph {
    /// Builds the center tile and both rings with their adjacency lists.
    pub fn new(config: BoardConfig) -> Self {
        let tiles = TilePos::all()
            .map(|position| Tile {
                position,
                neighbours: neighbours_of(position),
                occupied: false,
            })
            .collect();

        Self { config, tiles }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns the tile at `position`.
    pub fn tile(&self, position: TilePos) -> Result<&Tile, BoardError> {
        self.tiles
            .get(position.index())
            .ok_or(BoardError::NotFound { position })
    }

    /// All tiles in arena order (center, inner ring, outer ring).
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Neighbour positions of `position`; empty for unknown positions.
    pub fn neighbours(&self, position: TilePos) -> &[TilePos] {
        self.tile(position).map(Tile::neighbours).unwrap_or(&[])
    }

    /// Unknown positions read as unoccupied.
    pub fn is_occupied(&self, position: TilePos) -> bool {
        self.tile(position).is_ok_and(Tile::is_occupied)
    }

    /// Sets the occupancy flag. Unknown positions are ignored.
    pub fn set_occupied(&mut self, position: TilePos, occupied: bool) {
        if let Some(tile) = self.tiles.get_mut(position.index()) {
            tile.occupied = occupied;
        }
    }

    /// Positions of every occupied tile, in arena order.
    pub fn occupied_positions(&self) -> impl Iterator<Item = TilePos> + '_ {
        self.tiles
            .iter()
            .filter(|tile| tile.occupied)
            .map(|tile| tile.position)
    }

    /// Tiles reachable from `start` in exactly `moves` steps.
    ///
    /// See [`reach::find_reachable`].
    pub fn movable_tiles(&self, start: TilePos, moves: i32) -> BTreeSet<TilePos> {
        reach::find_reachable(self, start, moves)
    }

    /// Projects a tile into board-local world space.
    ///
    /// The center maps to the origin. Ring tiles sit at their ring's radius at
    /// angle `(2π/12)·(sector + 0.5)` so the tile is centered in its wedge.
    pub fn world_position(&self, position: TilePos) -> Result<WorldPoint, BoardError> {
        let radius = match position.row() {
            0 => return Ok(WorldPoint::ORIGIN),
            1 => self.config.inner_ring_radius,
            2 => self.config.outer_ring_radius,
            row => return Err(BoardError::InvalidRow { row: row as i32 }),
        };
        let angle = SECTOR_ANGLE * (position.sector() as f32 + 0.5);
        Ok(WorldPoint::polar(radius, angle))
    }

    /// End point of the `edge`-th wedge boundary on the bounding circle.
    ///
    /// Boundaries sit on whole sector angles, half a sector away from tile
    /// centers. `edge` wraps modulo 12.
    pub fn sector_boundary(&self, edge: i32) -> WorldPoint {
        let edge = edge.rem_euclid(BoardConfig::SECTORS as i32);
        WorldPoint::polar(self.config.bounding_radius, SECTOR_ANGLE * edge as f32)
    }
}

impl Default for BoardGraph {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

fn neighbours_of(position: TilePos) -> Neighbours {
    let mut neighbours = Neighbours::new();
    let sector = position.sector() as i32;
    match position.row() {
        0 => neighbours.extend((0..BoardConfig::SECTORS as i32).map(TilePos::inner)),
        1 => neighbours.extend([
            TilePos::inner(sector + 1),
            TilePos::inner(sector - 1),
            TilePos::outer(sector),
            TilePos::CENTER,
        ]),
        _ => neighbours.extend([
            TilePos::outer(sector + 1),
            TilePos::outer(sector - 1),
            TilePos::inner(sector),
        ]),
    }
    neighbours
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: WorldPoint, expected: WorldPoint) {
        let eps = 1e-5;
        assert!(
            (actual.x - expected.x).abs() < eps
                && (actual.y - expected.y).abs() < eps
                && (actual.z - expected.z).abs() < eps,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn builds_twenty_five_tiles() {
        let board = BoardGraph::default();
        assert_eq!(board.tile_count(), 25);
        assert_eq!(board.tiles().filter(|t| t.position().row() == 1).count(), 12);
        assert_eq!(board.tiles().filter(|t| t.position().row() == 2).count(), 12);
    }

    #[test]
    fn tile_count_does_not_depend_on_radii() {
        let board = BoardGraph::new(BoardConfig::with_radii(4.0, 9.5, 12.0));
        assert_eq!(board.tile_count(), BoardConfig::TILE_COUNT);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let board = BoardGraph::default();
        for tile in board.tiles() {
            for &neighbour in tile.neighbours() {
                let back = board.tile(neighbour).unwrap();
                assert!(
                    back.is_adjacent(tile.position()),
                    "{} lists {} but not the reverse",
                    tile.position(),
                    neighbour
                );
            }
        }
    }

    #[test]
    fn ring_degrees() {
        let board = BoardGraph::default();
        assert_eq!(board.neighbours(TilePos::CENTER).len(), 12);
        for s in 0..12 {
            assert_eq!(board.neighbours(TilePos::inner(s)).len(), 4);
            assert_eq!(board.neighbours(TilePos::outer(s)).len(), 3);
        }
    }

    #[test]
    fn inner_tile_wraps_around_sector_zero() {
        let board = BoardGraph::default();
        let tile = board.tile(TilePos::inner(0)).unwrap();
        assert!(tile.is_adjacent(TilePos::inner(11)));
        assert!(tile.is_adjacent(TilePos::inner(1)));
        assert!(tile.is_adjacent(TilePos::outer(0)));
        assert!(tile.is_adjacent(TilePos::CENTER));
        assert!(!tile.is_adjacent(TilePos::outer(1)));
    }

    #[test]
    fn outer_tile_is_not_adjacent_to_center() {
        let board = BoardGraph::default();
        assert!(!board.tile(TilePos::outer(5)).unwrap().is_adjacent(TilePos::CENTER));
    }

    #[test]
    fn occupancy_is_the_only_mutable_field() {
        let mut board = BoardGraph::default();
        let before = board.clone();
        board.set_occupied(TilePos::outer(3), true);
        board.set_occupied(TilePos::outer(3), true);
        assert!(board.is_occupied(TilePos::outer(3)));
        assert_eq!(board.occupied_positions().collect::<Vec<_>>(), [TilePos::outer(3)]);

        board.set_occupied(TilePos::outer(3), false);
        assert_eq!(board, before);
    }

    #[test]
    fn center_projects_to_origin() {
        let board = BoardGraph::default();
        assert_eq!(board.world_position(TilePos::CENTER), Ok(WorldPoint::ORIGIN));
    }

    #[test]
    fn ring_tiles_sit_half_a_sector_past_their_edge() {
        let board = BoardGraph::default();
        let half = PI / 12.0;

        let inner0 = board.world_position(TilePos::inner(0)).unwrap();
        assert_close(inner0, WorldPoint::new(half.cos(), 0.0, half.sin()));

        let outer3 = board.world_position(TilePos::outer(3)).unwrap();
        let angle = (PI * 2.0 / 12.0) * 3.5;
        assert_close(outer3, WorldPoint::new(2.0 * angle.cos(), 0.0, 2.0 * angle.sin()));
    }

    #[test]
    fn sector_boundaries_use_bounding_radius() {
        let board = BoardGraph::default();
        assert_close(board.sector_boundary(0), WorldPoint::new(3.0, 0.0, 0.0));
        assert_close(board.sector_boundary(3), WorldPoint::new(0.0, 0.0, 3.0));
        assert_eq!(board.sector_boundary(12), board.sector_boundary(0));
    }
}
