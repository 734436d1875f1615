use std::fmt;
use std::str::FromStr;

use crate::board::BoardError;
use crate::config::BoardConfig;

/// Polar coordinates of a tile on the board.
///
/// `row` is 0 for the center tile, 1 for the inner ring and 2 for the outer
/// ring; `sector` is the angular slot in `[0, 11]`. The center tile has a
/// single sector, so a row-0 position always has sector 0.
///
/// Fields are private: every value in existence is canonical, which is what
/// lets [`TilePos::index`] address the board arena without a bounds check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTilePos", into = "RawTilePos")
)]
pub struct TilePos {
    row: u8,
    sector: u8,
}

impl TilePos {
    /// Origin of the coordinates, which coincides with the center tile.
    pub const CENTER: Self = Self { row: 0, sector: 0 };

    const MAX_ROW: i32 = BoardConfig::ROWS as i32 - 1;
    const MAX_SECTOR: i32 = BoardConfig::SECTORS as i32 - 1;

    /// Builds a position, saturating out-of-range input into the board.
    ///
    /// Row and sector are clamped independently; if the clamped row is the
    /// center row the sector is forced to zero.
    pub fn new(row: i32, sector: i32) -> Self {
        let row = row.clamp(0, Self::MAX_ROW);
        let sector = if row == 0 {
            0
        } else {
            sector.clamp(0, Self::MAX_SECTOR)
        };
        Self {
            row: row as u8,
            sector: sector as u8,
        }
    }

    /// Builds a position, rejecting anything that [`TilePos::new`] would clamp.
    pub fn try_new(row: i32, sector: i32) -> Result<Self, BoardError> {
        if !(0..=Self::MAX_ROW).contains(&row) {
            return Err(BoardError::InvalidRow { row });
        }
        let sector_ok = if row == 0 {
            sector == 0
        } else {
            (0..=Self::MAX_SECTOR).contains(&sector)
        };
        if !sector_ok {
            return Err(BoardError::InvalidSector { row, sector });
        }
        Ok(Self {
            row: row as u8,
            sector: sector as u8,
        })
    }

    /// Inner-ring tile at `sector` (wrapped modulo 12).
    pub fn inner(sector: i32) -> Self {
        Self {
            row: 1,
            sector: wrap_sector(sector),
        }
    }

    /// Outer-ring tile at `sector` (wrapped modulo 12).
    pub fn outer(sector: i32) -> Self {
        Self {
            row: 2,
            sector: wrap_sector(sector),
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn sector(self) -> u8 {
        self.sector
    }

    #[inline]
    pub const fn is_center(self) -> bool {
        self.row == 0
    }

    /// Stable arena slot in `[0, 25)`: center 0, inner `1 + s`, outer `13 + s`.
    #[inline]
    pub const fn index(self) -> usize {
        match self.row {
            0 => 0,
            row => 1 + (row as usize - 1) * BoardConfig::SECTORS as usize + self.sector as usize,
        }
    }

    /// Inverse of [`TilePos::index`].
    pub fn from_index(index: usize) -> Option<Self> {
        let sectors = BoardConfig::SECTORS as usize;
        match index {
            0 => Some(Self::CENTER),
            i if i < BoardConfig::TILE_COUNT => Some(Self {
                row: (1 + (i - 1) / sectors) as u8,
                sector: ((i - 1) % sectors) as u8,
            }),
            _ => None,
        }
    }

    /// All 25 positions in arena order.
    pub fn all() -> impl Iterator<Item = TilePos> {
        (0..BoardConfig::TILE_COUNT).filter_map(Self::from_index)
    }

    /// Two-character tile id: row digit followed by a base-12 sector digit.
    pub fn id(self) -> String {
        self.to_string()
    }

    /// Human-oriented form, e.g. `r=1 s=0`.
    pub fn describe(self) -> String {
        format!("r={} s={}", self.row, self.sector)
    }
}

fn wrap_sector(sector: i32) -> u8 {
    sector.rem_euclid(BoardConfig::SECTORS as i32) as u8
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Both digits are in range by construction.
        let row = char::from_digit(self.row as u32, 10).unwrap_or('?');
        let sector = char::from_digit(self.sector as u32, BoardConfig::SECTORS as u32).unwrap_or('?');
        write!(f, "{row}{sector}")
    }
}

impl FromStr for TilePos {
    type Err = BoardError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let malformed = || BoardError::InvalidTileId { id: id.to_owned() };
        let mut chars = id.chars();
        let (Some(row), Some(sector), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(malformed());
        };
        let row = row.to_digit(10).ok_or_else(malformed)?;
        let sector = sector
            .to_digit(BoardConfig::SECTORS as u32)
            .ok_or_else(malformed)?;
        Self::try_new(row as i32, sector as i32)
    }
}

/// Unvalidated `(row, sector)` pair as it appears on the wire.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
struct RawTilePos {
    row: i32,
    sector: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTilePos> for TilePos {
    type Error = BoardError;

    fn try_from(raw: RawTilePos) -> Result<Self, Self::Error> {
        TilePos::try_new(raw.row, raw.sector)
    }
}

#[cfg(feature = "serde")]
impl From<TilePos> for RawTilePos {
    fn from(pos: TilePos) -> Self {
        Self {
            row: pos.row as i32,
            sector: pos.sector as i32,
        }
    }
}
