use alloc::vec::Vec;

use crate::*;
pub use random::*;

mod random;

/// Supplies categories for freshly placed tiles and for rerolls.
pub trait CategorySource {
    fn next_category(&mut self) -> Category;
}

impl<F> CategorySource for F
where
    F: FnMut() -> Category,
{
    fn next_category(&mut self) -> Category {
        self()
    }
}

/// Deterministic source that hands out a fixed script in a loop.
#[derive(Clone, Debug, PartialEq)]
pub struct CycleCategories {
    script: Vec<Category>,
    cursor: usize,
}

impl CycleCategories {
    pub fn new(script: impl IntoIterator<Item = Category>) -> Self {
        let mut script: Vec<Category> = script.into_iter().collect();
        if script.is_empty() {
            log::warn!("Empty category script, falling back to every category in order");
            script.extend(Category::ALL);
        }
        Self { script, cursor: 0 }
    }

    /// Round-robin over every category in declaration order.
    pub fn all() -> Self {
        Self::new(Category::ALL)
    }
}

impl CategorySource for CycleCategories {
    fn next_category(&mut self) -> Category {
        let category = self.script[self.cursor];
        self.cursor = (self.cursor + 1) % self.script.len();
        category
    }
}
