use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
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

/// Whether `coords` lies in the 3x3 block centered on `center`.
pub const fn in_block(center: Coord2, coords: Coord2) -> bool {
    center.0.abs_diff(coords.0) <= 1 && center.1.abs_diff(coords.1) <= 1
}

/// Number of cells of the 3x3 block around `center` that fit inside `size`.
pub const fn block_size(center: Coord2, size: Coord2) -> CellCount {
    let (x_lo, x_hi) = clipped_span(center.0, size.0);
    let (y_lo, y_hi) = clipped_span(center.1, size.1);
    mult(x_hi - x_lo + 1, y_hi - y_lo + 1)
}

/// Inclusive span `center - 1 ..= center + 1` clipped to `0..len`.
///
/// `center` must be below `len`.
const fn clipped_span(center: Coord, len: Coord) -> (Coord, Coord) {
    let lo = center.saturating_sub(1);
    let hi = if center + 1 < len { center + 1 } else { center };
    (lo, hi)
}

/// All coordinates of a board of `size`, row by row.
pub fn iter_coords(size: Coord2) -> impl Iterator<Item = Coord2> {
    (0..size.1).flat_map(move |y| (0..size.0).map(move |x| (x, y)))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (dim_x, dim_y) = self.dim();
        let size = (
            Coord::try_from(dim_x).unwrap_or(Coord::MAX),
            Coord::try_from(dim_y).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, size)
    }
}

/// Moore neighborhood of a cell, clipped at the board edges. Never yields the center.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    x_lo: Coord,
    x_hi: Coord,
    y_hi: Coord,
    cursor: Option<Coord2>,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        if center.0 >= bounds.0 || center.1 >= bounds.1 {
            return Self {
                center,
                x_lo: 0,
                x_hi: 0,
                y_hi: 0,
                cursor: None,
            };
        }

        let (x_lo, x_hi) = clipped_span(center.0, bounds.0);
        let (y_lo, y_hi) = clipped_span(center.1, bounds.1);
        Self {
            center,
            x_lo,
            x_hi,
            y_hi,
            cursor: Some((x_lo, y_lo)),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(coords @ (x, y)) = self.cursor {
            self.cursor = if x < self.x_hi {
                Some((x + 1, y))
            } else if y < self.y_hi {
                Some((self.x_lo, y + 1))
            } else {
                None
            };

            if coords != self.center {
                return Some(coords);
            }
        }
        None
    }
}
