use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
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

/// Board size of an array whose dimensions were built from a [`Coord2`].
pub(crate) fn array_size<T>(array: &Array2<T>) -> Coord2 {
    let (rows, cols) = array.dim();
    (rows as Coord, cols as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        NeighborIter::new(index, array_size(self))
    }
}

/// Walks the 3x3 window around a cell, clipped to the board, skipping the
/// cell itself. Edges never wrap.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    first_col: Coord,
    last_row: Coord,
    last_col: Coord,
    next: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        let (row, col) = center;
        let (rows, cols) = bounds;
        let first_row = row.saturating_sub(1);
        let first_col = col.saturating_sub(1);
        let next = (rows > 0 && cols > 0).then_some((first_row, first_col));
        Self {
            center,
            first_col,
            last_row: row.saturating_add(1).min(rows.saturating_sub(1)),
            last_col: col.saturating_add(1).min(cols.saturating_sub(1)),
            next,
        }
    }

    fn advance(&mut self, (row, col): Coord2) {
        self.next = if col < self.last_col {
            Some((row, col + 1))
        } else if row < self.last_row {
            Some((row + 1, self.first_col))
        } else {
            None
        };
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(coords) = self.next {
            self.advance(coords);
            if coords != self.center {
                return Some(coords);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let mut neighbors: Vec<_> = NeighborIter::new((0, 0), (5, 5)).collect();
        neighbors.sort();
        assert_eq!(neighbors, vec![(0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn edge_has_five_neighbors() {
        assert_eq!(NeighborIter::new((0, 2), (5, 5)).count(), 5);
        assert_eq!(NeighborIter::new((4, 2), (5, 5)).count(), 5);
    }

    #[test]
    fn interior_has_eight_neighbors() {
        let neighbors: Vec<_> = NeighborIter::new((2, 2), (5, 5)).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&(2, 2)));
    }

    #[test]
    fn no_wraparound_on_far_edge() {
        let neighbors: Vec<_> = NeighborIter::new((2, 4), (5, 5)).collect();
        assert!(neighbors.iter().all(|&(_, col)| col >= 3));
    }

    #[test]
    fn visits_in_row_major_order() {
        let neighbors: Vec<_> = NeighborIter::new((1, 1), (3, 3)).collect();
        assert_eq!(
            neighbors,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn max_coordinate_does_not_overflow() {
        let neighbors: Vec<_> = NeighborIter::new((254, 254), (255, 255)).collect();
        assert_eq!(neighbors, vec![(253, 253), (253, 254), (254, 253)]);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).count(), 0);
    }
}
