use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Mask of the cells connected to the anchor, i.e. the region the next flood repaints.
pub fn flooded_region(board: &Board) -> Array2<bool> {
    let size = usize::from(board.size());
    let mut mask = Array2::from_elem((size, size), false);
    mark_region(board, &mut mask, ANCHOR);
    mask
}

/// For every color touching the anchor region, how many cells a flood with that color would pull
/// into it. Whole adjacent regions count, not just the border cells. Sorted by color.
pub fn frontier_colors(board: &Board) -> Vec<(Color, CellCount)> {
    let mut claimed = flooded_region(board);
    let region: Vec<Coord2> = claimed
        .indexed_iter()
        .filter(|&(_, &in_region)| in_region)
        .map(|((row, col), _)| (row as Coord, col as Coord))
        .collect();

    let mut absorbed: BTreeMap<Color, CellCount> = BTreeMap::new();
    for coords in region {
        for pos in board.iter_neighbors(coords) {
            if claimed[pos.to_nd_index()] {
                continue;
            }
            let count = mark_region(board, &mut claimed, pos);
            *absorbed.entry(board[pos]).or_default() += count;
        }
    }

    absorbed.into_iter().collect()
}

/// Color that grows the anchor region the most, lowest index on ties. `None` once the board is
/// a single color.
pub fn greedy_color(board: &Board) -> Option<Color> {
    frontier_colors(board)
        .into_iter()
        .max_by(|(color_a, count_a), (color_b, count_b)| {
            count_a.cmp(count_b).then(color_b.cmp(color_a))
        })
        .map(|(color, _)| color)
}

/// Marks the same-colored region around `start` in `mask`, returning how many cells were newly
/// marked.
fn mark_region(board: &Board, mask: &mut Array2<bool>, start: Coord2) -> CellCount {
    if mask[start.to_nd_index()] {
        return 0;
    }

    let color = board[start];
    let mut to_visit = VecDeque::from([start]);
    mask[start.to_nd_index()] = true;
    let mut marked: CellCount = 1;

    while let Some(visit_coords) = to_visit.pop_front() {
        for pos in board.iter_neighbors(visit_coords) {
            if !mask[pos.to_nd_index()] && board[pos] == color {
                mask[pos.to_nd_index()] = true;
                marked += 1;
                to_visit.push_back(pos);
            }
        }
    }

    marked
}
