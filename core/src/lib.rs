use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod session;
mod types;

/// Board dimensions and mine count, validated on construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    /// The classic 10x10 board with 10 mines.
    pub const CLASSIC: Self = Self::new_unchecked((10, 10), 10);

    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Rejects empty boards, mine-free boards and boards without a single safe cell.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard.into());
        }
        if self.mines == 0 {
            return Err(ConfigError::NoMines.into());
        }
        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(ConfigError::TooManyMines {
                mines: self.mines,
                cells,
            }
            .into());
        }
        Ok(())
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Immutable half of a board: where the mines are and how many touch each cell.
///
/// Adjacency counts are computed once when the layout is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    size: Coord2,
    mine_mask: Array2<bool>,
    adjacent: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Builds a layout with mines at exactly the given coordinates.
    ///
    /// Repeated coordinates count once. The resulting mine count goes through the same
    /// validation as [`GameConfig::new`].
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        let mut mine_count: CellCount = 0;

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfRange { coords, size });
            }
            let is_mine = &mut mine_mask[coords.to_nd_index()];
            if !*is_mine {
                *is_mine = true;
                mine_count += 1;
            }
        }

        GameConfig::new(size, mine_count)?;
        Ok(Self::with_mask(size, mine_mask, mine_count))
    }

    fn with_mask(size: Coord2, mine_mask: Array2<bool>, mine_count: CellCount) -> Self {
        let mut adjacent: Array2<u8> = Array2::zeros(size.to_nd_index());
        for coords in positions(size).filter(|&pos| mine_mask[pos.to_nd_index()]) {
            for neighbor in Neighbors::new(coords, size) {
                adjacent[neighbor.to_nd_index()] += 1;
            }
        }

        Self {
            size,
            mine_mask,
            adjacent,
            mine_count,
        }
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfRange {
                coords,
                size: self.size,
            })
        }
    }

    pub fn size(&self) -> Coord2 {
        self.size
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.size)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mines among the clipped 8-neighborhood. Only meaningful for safe cells.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacent[coords.to_nd_index()]
    }

    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size)
    }

    pub fn mine_positions(&self) -> impl Iterator<Item = Coord2> {
        positions(self.size).filter(move |&coords| self[coords])
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Game already over, or the cell was not hidden.
    NoChange,
    /// Safe cells were revealed and the game goes on.
    Continue,
    Won,
    Lost,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn ends_game(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}
