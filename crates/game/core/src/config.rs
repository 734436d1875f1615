/// Board geometry constants and tunable parameters.
///
/// The ring topology is fixed; only the world-space radii used for projection
/// can be tuned. Changing them never changes the tile count or adjacency.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardConfig {
    /// Radius of the inner row of tiles in world units.
    pub inner_ring_radius: f32,
    /// Radius of the outer row of tiles in world units.
    pub outer_ring_radius: f32,
    /// Radius of the whole board in world units (used for wedge outlines).
    pub bounding_radius: f32,
}

impl BoardConfig {
    // ===== compile-time constants used as type parameters =====
    /// Number of rows: center, inner ring, outer ring.
    pub const ROWS: u8 = 3;
    /// Number of angular sectors in each ring.
    pub const SECTORS: u8 = 12;
    /// Total tile count: one center tile plus two full rings.
    pub const TILE_COUNT: usize = 1 + 2 * Self::SECTORS as usize;
    /// Largest neighbour list (the center touches every inner tile).
    pub const MAX_NEIGHBOURS: usize = Self::SECTORS as usize;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INNER_RING_RADIUS: f32 = 1.0;
    pub const DEFAULT_OUTER_RING_RADIUS: f32 = 2.0;
    pub const DEFAULT_BOUNDING_RADIUS: f32 = 3.0;

    pub fn new() -> Self {
        Self {
            inner_ring_radius: Self::DEFAULT_INNER_RING_RADIUS,
            outer_ring_radius: Self::DEFAULT_OUTER_RING_RADIUS,
            bounding_radius: Self::DEFAULT_BOUNDING_RADIUS,
        }
    }

    pub fn with_radii(inner_ring_radius: f32, outer_ring_radius: f32, bounding_radius: f32) -> Self {
        Self {
            inner_ring_radius,
            outer_ring_radius,
            bounding_radius,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new()
    }
}
