use serde::{Deserialize, Serialize};

/// Index of an image inside an [`ImagePool`](crate::ImagePool).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImageId(pub u16);

/// Canonical face state of a card, the view is derived from it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    Flipped,
    Matched,
}

impl CardFace {
    /// Whether the image is visible to the player.
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Flipped | Self::Matched)
    }
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub image: ImageId,
    pub face: CardFace,
}

impl Card {
    pub const fn hidden(image: ImageId) -> Self {
        Self {
            image,
            face: CardFace::Hidden,
        }
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.face, CardFace::Hidden)
    }

    pub const fn is_flipped(&self) -> bool {
        matches!(self.face, CardFace::Flipped)
    }

    pub const fn is_matched(&self) -> bool {
        matches!(self.face, CardFace::Matched)
    }
}
