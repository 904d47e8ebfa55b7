/// Single coordinate axis used for the board dimension and positions.
pub type Coord = u8;

/// Count type used for card and pair counts.
pub type CardCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Move and second counters.
pub type Counter = u32;

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

/// Number of cards on a square board of side `dimension`.
pub const fn card_count(dimension: Coord) -> CardCount {
    let d = dimension as CardCount;
    d.saturating_mul(d)
}

/// Number of distinct pairs on a square board of side `dimension`.
pub const fn pair_count(dimension: Coord) -> CardCount {
    card_count(dimension) / 2
}
