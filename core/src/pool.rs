use alloc::collections::BTreeSet;
use alloc::string::String;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Images bundled with the web front end.
pub const DEFAULT_IMAGES: &[&str] = &[
    "img/athrun.jpg",
    "img/camille.jpg",
    "img/lalah.jpg",
    "img/orga.jpeg",
    "img/sciricco.jpeg",
    "img/sigma_char.jpg",
    "img/you.jpeg",
    "img/zeong.jpeg",
];

/// The set of image references cards can be dealt from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePool {
    images: Vec<String>,
}

impl ImagePool {
    /// Repeated references are dropped, two cards match when they show the same image.
    pub fn new<I, S>(images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let images: Vec<String> = images
            .into_iter()
            .map(Into::into)
            .filter(|image: &String| seen.insert(image.clone()))
            .collect();
        if images.len() > usize::from(u16::MAX) {
            log::warn!(
                "Image pool truncated to {} entries, got {}",
                u16::MAX,
                images.len()
            );
        }
        Self {
            images: images.into_iter().take(usize::from(u16::MAX)).collect(),
        }
    }

    pub fn len(&self) -> CardCount {
        // bounded in `new`
        self.images.len() as CardCount
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, id: ImageId) -> Option<&str> {
        self.images.get(usize::from(id.0)).map(String::as_str)
    }

    /// Checks that a `dimension` × `dimension` board can be dealt from this pool.
    pub fn check_dimension(&self, dimension: Coord) -> Result<Coord> {
        let dimension = validate_dimension(dimension)?;
        let needed = pair_count(dimension);
        if needed > self.len() {
            return Err(GameError::PoolTooSmall {
                needed,
                available: self.len(),
            });
        }
        Ok(dimension)
    }

    /// Every dimension this pool can fill, smallest first.
    pub fn supported_dimensions(&self) -> impl Iterator<Item = Coord> + '_ {
        (2..=Coord::MAX)
            .step_by(2)
            .take_while(|&dimension| pair_count(dimension) <= self.len())
    }
}

impl Default for ImagePool {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGES.iter().copied())
    }
}
