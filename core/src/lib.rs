#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use codec::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod analysis;
mod codec;
mod engine;
mod error;
mod generator;
mod types;

/// Move budget calibration: this many moves on a board of this size with this many colors.
const REFERENCE_STEPS: u32 = 25;
const REFERENCE_SIZE: u32 = 14;
const REFERENCE_COLORS: u32 = 6;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord,
    pub num_colors: Color,
}

impl GameConfig {
    pub const DEFAULT: Self = Self::new_unchecked(14, 6);

    pub const fn new_unchecked(size: Coord, num_colors: Color) -> Self {
        Self { size, num_colors }
    }

    pub fn new(size: Coord, num_colors: Color) -> Result<Self> {
        let config = Self::new_unchecked(size, num_colors);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(GameError::BoardTooSmall);
        }
        if self.num_colors < 2 {
            return Err(GameError::TooFewColors);
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size, self.size)
    }

    /// Move budget for this board, scaled linearly from the reference calibration.
    ///
    /// Never below `2 * (size - 1)`, the longest path from the anchor to the far corner, so every
    /// two-color board can be won.
    pub const fn max_steps(&self) -> StepCount {
        let budget = REFERENCE_STEPS * (self.size as u32) * (self.num_colors as u32)
            / (REFERENCE_SIZE * REFERENCE_COLORS);
        let floor = 2 * (self.size as u32).saturating_sub(1);
        let budget = if budget < floor { floor } else { budget };
        if budget < 1 { 1 } else { budget as StepCount }
    }

    pub const fn contains_color(&self, color: Color) -> bool {
        color < self.num_colors
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Square grid of color indices.
///
/// Serializes as nested rows (`[[0, 1], [1, 0]]`) and rejects ragged or non-square input when
/// deserializing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Color>>", into = "Vec<Vec<Color>>")]
pub struct Board {
    cells: Array2<Color>,
}

impl Board {
    pub fn from_cells(cells: Array2<Color>) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols || rows > Coord::MAX as usize {
            return Err(GameError::InvalidBoardShape);
        }
        if rows < 2 {
            return Err(GameError::BoardTooSmall);
        }
        Ok(Self { cells })
    }

    pub fn from_rows(rows: &[Vec<Color>]) -> Result<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(GameError::InvalidBoardShape);
        }
        let flat: Vec<Color> = rows.iter().flatten().copied().collect();
        let cells =
            Array2::from_shape_vec((size, size), flat).map_err(|_| GameError::InvalidBoardShape)?;
        Self::from_cells(cells)
    }

    /// Board where every cell has the same color.
    pub fn filled(size: Coord, color: Color) -> Result<Self> {
        Self::from_cells(Array2::from_elem((size as usize, size as usize), color))
    }

    pub fn size(&self) -> Coord {
        // from_cells guarantees the dimension fits
        self.cells.nrows() as Coord
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size(), self.size())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn anchor_color(&self) -> Color {
        self[ANCHOR]
    }

    pub fn is_monochrome(&self) -> bool {
        let anchor = self.anchor_color();
        self.cells.iter().all(|&color| color == anchor)
    }

    /// Whether every cell is a valid index for `num_colors` colors.
    pub fn fits_colors(&self, num_colors: Color) -> bool {
        self.cells.iter().all(|&color| color < num_colors)
    }

    pub fn to_rows(&self) -> Vec<Vec<Color>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    pub fn cells(&self) -> &Array2<Color> {
        &self.cells
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl TryFrom<Vec<Vec<Color>>> for Board {
    type Error = GameError;

    fn try_from(rows: Vec<Vec<Color>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}

impl From<Board> for Vec<Vec<Color>> {
    fn from(board: Board) -> Self {
        board.to_rows()
    }
}

impl Index<Coord2> for Board {
    type Output = Color;

    fn index(&self, (row, col): Coord2) -> &Self::Output {
        &self.cells[(row as usize, col as usize)]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, (row, col): Coord2) -> &mut Self::Output {
        &mut self.cells[(row as usize, col as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FloodOutcome {
    NoChange,
    /// Number of cells that changed color.
    Flooded(CellCount),
}

impl FloodOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Flooded(_) => true,
        }
    }

    pub const fn recolored(self) -> CellCount {
        match self {
            Self::NoChange => 0,
            Self::Flooded(count) => count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn config_rejects_degenerate_parameters() {
        assert_eq!(GameConfig::new(1, 6), Err(GameError::BoardTooSmall));
        assert_eq!(GameConfig::new(14, 1), Err(GameError::TooFewColors));
        assert_eq!(GameConfig::new(2, 2), Ok(GameConfig::new_unchecked(2, 2)));
    }

    #[test]
    fn max_steps_matches_reference_calibration() {
        assert_eq!(GameConfig::new_unchecked(14, 8).max_steps(), 33);
        assert_eq!(GameConfig::new_unchecked(255, 255).max_steps(), 19352);
    }

    #[test]
    fn max_steps_covers_the_corner_to_corner_path_on_small_boards() {
        assert_eq!(GameConfig::new_unchecked(2, 2).max_steps(), 2);
        assert_eq!(GameConfig::new_unchecked(3, 2).max_steps(), 4);
        assert_eq!(GameConfig::DEFAULT.max_steps(), 26);
        assert_eq!(GameConfig::new_unchecked(1, 2).max_steps(), 1);
    }

    #[test]
    fn max_steps_grows_with_size_and_colors() {
        for size in 2..40 {
            for colors in 2..10 {
                let steps = GameConfig::new_unchecked(size, colors).max_steps();
                assert!(GameConfig::new_unchecked(size + 1, colors).max_steps() >= steps);
                assert!(GameConfig::new_unchecked(size, colors + 1).max_steps() >= steps);
            }
        }
    }

    #[test]
    fn flood_outcome_reports_recolored_cells() {
        assert_eq!(FloodOutcome::Flooded(5).recolored(), 5);
        assert_eq!(FloodOutcome::NoChange.recolored(), 0);
        assert!(!FloodOutcome::NoChange.has_update());
    }

    #[test]
    fn board_rejects_ragged_and_non_square_rows() {
        assert_eq!(
            Board::from_rows(&[vec![0, 1], vec![0]]),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(
            Board::from_rows(&[vec![0, 1, 0], vec![1, 0, 1]]),
            Err(GameError::InvalidBoardShape)
        );
        assert_eq!(Board::from_rows(&[]), Err(GameError::BoardTooSmall));
        assert_eq!(Board::from_rows(&[vec![0]]), Err(GameError::BoardTooSmall));
    }

    #[test]
    fn board_rows_are_row_major() {
        let board = Board::from_rows(&[vec![0, 1], vec![2, 3]]).unwrap();

        assert_eq!(board[(0, 1)], 1);
        assert_eq!(board[(1, 0)], 2);
        assert_eq!(board.to_rows(), vec![vec![0, 1], vec![2, 3]]);
        assert!(board.fits_colors(4));
        assert!(!board.fits_colors(3));
    }

    #[test]
    fn board_serializes_as_nested_rows() {
        let board = Board::from_rows(&[vec![0, 1], vec![1, 0]]).unwrap();

        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "[[0,1],[1,0]]");
        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);
        assert!(serde_json::from_str::<Board>("[[0,1],[1]]").is_err());
    }
}
