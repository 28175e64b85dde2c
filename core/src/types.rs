use ndarray::Array2;

/// Single coordinate axis used for the board size and positions.
pub type Coord = u8;

/// Color index, always below the configured color count.
pub type Color = u8;

/// Count type used for total-cell counts and region sizes.
pub type CellCount = u16;

/// Count type used for moves and the move budget.
pub type StepCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// The cell whose color defines the active region.
pub const ANCHOR: Coord2 = (0, 0);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let dim = self.dim();
        let size = (
            dim.0.try_into().unwrap_or(Coord::MAX),
            dim.1.try_into().unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, size)
    }
}

// up, left, right, down; no diagonals
const DISPLACEMENTS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (rows, cols) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= rows {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= cols {
        return None;
    }

    Some((next_row, next_col))
}

/// Orthogonal neighbors of a cell that fall inside the board.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn neighbors(center: Coord2, size: Coord) -> Vec<Coord2> {
        let grid: Array2<u8> = Array2::zeros((size as usize, size as usize));
        grid.iter_neighbors(center).collect()
    }

    #[test]
    fn corner_has_two_orthogonal_neighbors() {
        assert_eq!(neighbors((0, 0), 3), [(0, 1), (1, 0)]);
        assert_eq!(neighbors((2, 2), 3), [(1, 2), (2, 1)]);
    }

    #[test]
    fn center_has_no_diagonal_neighbors() {
        assert_eq!(neighbors((1, 1), 3), [(0, 1), (1, 0), (1, 2), (2, 1)]);
    }
}
