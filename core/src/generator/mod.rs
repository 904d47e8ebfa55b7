use crate::*;
pub use random::*;

mod random;

pub trait DeckGenerator {
    fn generate(self, dimension: Coord, pool: &ImagePool) -> Result<Board>;
}

/// A board needs an even, positive side so every card has a partner.
pub fn validate_dimension(dimension: Coord) -> Result<Coord> {
    if dimension == 0 || dimension % 2 != 0 {
        Err(GameError::InvalidDimension(dimension))
    } else {
        Ok(dimension)
    }
}
