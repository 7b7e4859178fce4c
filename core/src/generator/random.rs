use super::*;
use rand::prelude::*;

/// Uniform draw over the whole category set. Seeded so that boards are reproducible.
#[derive(Clone, Debug)]
pub struct RandomCategories {
    rng: SmallRng,
}

impl RandomCategories {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl CategorySource for RandomCategories {
    fn next_category(&mut self) -> Category {
        Category::ALL[self.rng.random_range(0..Category::COUNT)]
    }
}
