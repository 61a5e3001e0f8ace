/// Single coordinate axis used for board rows, columns, and sizes.
pub type Coord = u8;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// A stepping vector `(row_delta, col_delta)`; not itself a board position.
pub type Step = (i8, i8);

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

/// Applies `step` to `coords` without any bounds, returning a value only while
/// both axes stay representable.
pub(crate) fn advance(coords: Coord2, step: Step) -> Option<Coord2> {
    let row = coords.0.checked_add_signed(step.0)?;
    let col = coords.1.checked_add_signed(step.1)?;
    Some((row, col))
}

/// Applies `step` to `coords`, returning a value only when it remains in bounds.
pub fn apply_step(coords: Coord2, step: Step, bounds: Coord2) -> Option<Coord2> {
    let (row, col) = advance(coords, step)?;

    if row >= bounds.0 || col >= bounds.1 {
        return None;
    }

    Some((row, col))
}
