/// Single board axis, used for a row or column index and for board height or width.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional `(row, col)` coordinates, also used for `(rows, cols)` board sizes.
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

/// Number of cells on a board of the given size.
pub const fn area((rows, cols): Coord2) -> CellCount {
    (rows as CellCount) * (cols as CellCount)
}

/// Whether `coords` lies inside a board of the given size.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

/// Every position of a board in row-major order.
pub fn positions((rows, cols): Coord2) -> impl Iterator<Item = Coord2> {
    (0..rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
}

/// Iterator over the up-to-8 in-bounds neighbors of a cell.
///
/// Walks the 3x3 block around `center` row by row, skipping the center itself
/// and anything clipped by the board edge.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    size: Coord2,
    step: u8,
}

impl Neighbors {
    pub fn new(center: Coord2, size: Coord2) -> Self {
        Self {
            center,
            size,
            step: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.step < 9 {
            let step = self.step;
            self.step += 1;
            if step == 4 {
                continue;
            }

            let row = offset(self.center.0, step / 3, self.size.0);
            let col = offset(self.center.1, step % 3, self.size.1);
            if let (Some(row), Some(col)) = (row, col) {
                return Some((row, col));
            }
        }
        None
    }
}

/// Shifts `value` by `shift - 1`, keeping the result below `bound`.
fn offset(value: Coord, shift: u8, bound: Coord) -> Option<Coord> {
    let shifted = match shift {
        0 => value.checked_sub(1)?,
        1 => value,
        _ => value.checked_add(1)?,
    };
    (shifted < bound).then_some(shifted)
}
