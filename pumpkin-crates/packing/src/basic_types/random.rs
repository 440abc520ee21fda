use std::fmt::Debug;
use std::ops::Range;

use rand::Rng;
use rand::SeedableRng;

/// The source of randomness of the search, see [`crate::search::DepthFirstSearch::with_random_values`].
///
/// Any [`SeedableRng`] can be used; tests use a seeded [`rand::rngs::SmallRng`] so that runs are
/// reproducible.
pub trait Random: Debug {
    /// Generates a random usize in `[range.start, range.end)` with equal probability.
    ///
    /// # Example
    /// ```rust
    /// # use rand::rngs::SmallRng;
    /// # use rand::SeedableRng;
    /// # use pumpkin_packing::Random;
    /// let mut rng = SmallRng::seed_from_u64(42);
    /// let elements = vec!["This", "is", "a", "test"];
    /// let selected_index = rng.generate_usize_in_range(0..elements.len());
    /// assert!(selected_index < elements.len());
    /// ```
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize;

    /// Generates a random i32 in `[lb, ub]` with equal probability.
    fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32;
}

impl<T> Random for T
where
    T: SeedableRng + Rng + Debug,
{
    fn generate_usize_in_range(&mut self, range: Range<usize>) -> usize {
        self.gen_range(range)
    }

    fn generate_i32_in_range(&mut self, lb: i32, ub: i32) -> i32 {
        self.gen_range(lb..=ub)
    }
}
