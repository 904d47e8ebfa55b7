use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of cards, row-major iteration follows the deal order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cards: Array2<Card>,
}

impl Board {
    /// Lays `cards` out as a `dimension` × `dimension` grid, in order.
    pub fn from_cards(dimension: Coord, cards: Vec<Card>) -> Result<Self> {
        let dimension = usize::from(dimension);
        let cards = Array2::from_shape_vec((dimension, dimension), cards)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { cards })
    }

    pub fn dimension(&self) -> Coord {
        // boards are only built from a `Coord` dimension
        self.cards.nrows() as Coord
    }

    pub fn total_cards(&self) -> CardCount {
        card_count(self.dimension())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let dimension = self.dimension();
        if coords.0 < dimension && coords.1 < dimension {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn card_at(&self, coords: Coord2) -> Card {
        self.cards[coords.to_nd_index()]
    }

    /// Cards in deal order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Cards in deal order, with their coordinates.
    pub fn iter_with_coords(&self) -> impl Iterator<Item = (Coord2, &Card)> {
        self.cards
            .indexed_iter()
            .map(|((row, col), card)| ((row as Coord, col as Coord), card))
    }

    pub fn matched_count(&self) -> CardCount {
        self.cards.iter().filter(|card| card.is_matched()).count() as CardCount
    }

    pub fn is_complete(&self) -> bool {
        self.cards.iter().all(Card::is_matched)
    }

    /// Coordinates of cards that are face up but not matched, in deal order.
    pub fn flipped_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_with_coords()
            .filter(|(_, card)| card.is_flipped())
            .map(|(coords, _)| coords)
    }

    pub(crate) fn set_face(&mut self, coords: Coord2, face: CardFace) {
        log::trace!("card {:?}: {:?}", coords, face);
        self.cards[coords.to_nd_index()].face = face;
    }

    /// Turns every non-matched card face down again, returns how many were turned.
    pub(crate) fn hide_unmatched(&mut self) -> CardCount {
        let mut hidden = 0;
        for card in self.cards.iter_mut().filter(|card| card.is_flipped()) {
            card.face = CardFace::Hidden;
            hidden += 1;
        }
        hidden
    }
}

impl Index<Coord2> for Board {
    type Output = Card;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cards[coords.to_nd_index()]
    }
}
