use alloc::vec::Vec;

use super::*;

/// Picks the images uniformly without replacement, then deals two copies of each in a uniformly shuffled order.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDeckGenerator {
    seed: u64,
}

impl RandomDeckGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl DeckGenerator for RandomDeckGenerator {
    fn generate(self, dimension: Coord, pool: &ImagePool) -> Result<Board> {
        use rand::prelude::*;
        use rand::seq::index;

        let dimension = pool.check_dimension(dimension)?;
        let pairs = usize::from(pair_count(dimension));

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let picks: Vec<ImageId> = index::sample(&mut rng, usize::from(pool.len()), pairs)
            .into_iter()
            // sampled indices are below `pool.len()`, which fits in u16
            .map(|i| ImageId(i as u16))
            .collect();
        log::trace!("picked images: {:?}", picks);

        let mut cards: Vec<Card> = picks
            .iter()
            .chain(picks.iter())
            .map(|&image| Card::hidden(image))
            .collect();
        cards.shuffle(&mut rng);

        log::debug!(
            "dealt {}x{} board with {} pairs (seed {})",
            dimension,
            dimension,
            pairs,
            self.seed
        );
        Board::from_cards(dimension, cards)
    }
}
