use ndarray::Array2;

/// Single coordinate axis used for board height, width, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

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

/// Size of a grid as `(height, width)`.
pub fn grid_size<T>(grid: &Array2<T>) -> Coord2 {
    let (rows, cols) = grid.dim();
    (
        rows.try_into().unwrap_or(Coord::MAX),
        cols.try_into().unwrap_or(Coord::MAX),
    )
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, grid_size(self))
    }
}

pub trait NeighborCellIterExt<T>: NeighborIterExt {
    fn iter_neighbor_cells_with_index(&self, index: Coord2) -> impl Iterator<Item = (Coord2, T)>;

    fn iter_neighbor_cells(&self, index: Coord2) -> impl Iterator<Item = T> {
        self.iter_neighbor_cells_with_index(index)
            .map(|(_, cell)| cell)
    }
}

impl<T: Copy> NeighborCellIterExt<T> for Array2<T> {
    fn iter_neighbor_cells_with_index(&self, index: Coord2) -> impl Iterator<Item = (Coord2, T)> {
        self.iter_neighbors(index)
            .map(|index| (index, self[index.to_nd_index()]))
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (height, width) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= height {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= width {
        return None;
    }

    Some((next_row, next_col))
}

/// Moore neighbourhood of a cell, clipped at the grid edges.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
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

    fn neighbors(center: Coord2, bounds: Coord2) -> Vec<Coord2> {
        NeighborIter::new(center, bounds).collect()
    }

    #[test]
    fn interior_cell_has_eight_neighbors() {
        let found = neighbors((4, 4), (9, 9));

        assert_eq!(found.len(), 8);
        for pos in [
            (3, 3), (3, 4), (3, 5),
            (4, 3),         (4, 5),
            (5, 3), (5, 4), (5, 5),
        ] {
            assert!(found.contains(&pos), "missing neighbor {pos:?}");
        }
    }

    #[test]
    fn corners_are_clipped_not_wrapped() {
        assert_eq!(neighbors((0, 0), (9, 9)), vec![(0, 1), (1, 0), (1, 1)]);
        assert_eq!(neighbors((8, 8), (9, 9)), vec![(7, 7), (7, 8), (8, 7)]);
    }

    #[test]
    fn edges_have_five_neighbors() {
        assert_eq!(neighbors((0, 4), (9, 9)).len(), 5);
        assert_eq!(neighbors((4, 0), (9, 9)).len(), 5);
        assert_eq!(neighbors((8, 4), (9, 9)).len(), 5);
    }

    #[test]
    fn non_square_bounds_use_height_then_width() {
        // 2 rows, 5 columns
        assert_eq!(neighbors((1, 4), (2, 5)), vec![(0, 3), (0, 4), (1, 3)]);
        assert!(neighbors((0, 2), (2, 5)).iter().all(|&(row, col)| row < 2 && col < 5));
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert!(neighbors((0, 0), (1, 1)).is_empty());
    }

    #[test]
    fn mult_saturates() {
        assert_eq!(mult(8, 8), 64);
        assert_eq!(mult(Coord::MAX, Coord::MAX), 65025);
    }
}
