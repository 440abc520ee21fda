use crate::pumpkin_assert_moderate;
use crate::pumpkin_assert_simple;

/// A multiset of sizes in non-increasing order which knows its total.
///
/// The subset-sum oracle [`super::no_sum`] works on anything which provides this view.
pub trait SizeSequence {
    /// The number of sizes.
    fn card(&self) -> usize;

    /// The sum of all sizes.
    fn total(&self) -> i32;

    /// The `index`-th largest size.
    fn size(&self, index: usize) -> i32;
}

/// Sizes appended in non-increasing order, together with their running total.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SizeSet {
    sizes: Vec<i32>,
    total: i32,
}

impl SizeSet {
    pub fn with_capacity(capacity: usize) -> Self {
        SizeSet {
            sizes: Vec::with_capacity(capacity),
            total: 0,
        }
    }

    /// Creates the set from sizes in any order.
    pub fn from_unsorted(sizes: impl IntoIterator<Item = i32>) -> Self {
        let mut sizes = sizes.into_iter().collect::<Vec<_>>();
        sizes.sort_unstable_by(|first, second| second.cmp(first));

        let total = sizes.iter().sum();
        SizeSet { sizes, total }
    }

    /// Appends `size`, which may not be larger than the sizes added before.
    pub fn add(&mut self, size: i32) {
        pumpkin_assert_moderate!(
            self.sizes.last().map_or(true, |&last| last >= size),
            "sizes have to be added in non-increasing order"
        );

        self.sizes.push(size);
        self.total += size;
    }
}

impl SizeSequence for SizeSet {
    fn card(&self) -> usize {
        self.sizes.len()
    }

    fn total(&self) -> i32 {
        self.total
    }

    fn size(&self, index: usize) -> i32 {
        self.sizes[index]
    }
}

/// A [`SizeSet`] from which one size is left out.
///
/// The left out size advances through the set: [`SizeSetMinusOne::minus`] has to be called with
/// sizes in non-increasing order, and every call leaves out the next occurrence of the given size
/// after the previously left out one. Until `minus` is called the set behaves as the full set.
#[derive(Clone, Debug, Default)]
pub struct SizeSetMinusOne {
    set: SizeSet,
    /// Position of the size which is left out.
    excluded: Option<usize>,
}

impl SizeSetMinusOne {
    pub fn with_capacity(capacity: usize) -> Self {
        SizeSetMinusOne {
            set: SizeSet::with_capacity(capacity),
            excluded: None,
        }
    }

    pub fn add(&mut self, size: i32) {
        pumpkin_assert_simple!(
            self.excluded.is_none(),
            "sizes cannot be added once one is left out"
        );
        self.set.add(size);
    }

    /// The set without any size left out.
    pub fn full(&self) -> &SizeSet {
        &self.set
    }

    /// Leaves out the next occurrence of `size` instead of the size left out before.
    pub fn minus(&mut self, size: i32) {
        let mut position = self.excluded.map_or(0, |excluded| excluded + 1);
        while position < self.set.sizes.len() && self.set.sizes[position] > size {
            position += 1;
        }

        pumpkin_assert_simple!(
            position < self.set.sizes.len() && self.set.sizes[position] == size,
            "sizes have to be removed in non-increasing order, {size} is not in the remainder"
        );

        self.excluded = Some(position);
    }
}

impl SizeSequence for SizeSetMinusOne {
    fn card(&self) -> usize {
        match self.excluded {
            Some(_) => self.set.card() - 1,
            None => self.set.card(),
        }
    }

    fn total(&self) -> i32 {
        match self.excluded {
            Some(excluded) => self.set.total - self.set.sizes[excluded],
            None => self.set.total,
        }
    }

    fn size(&self, index: usize) -> i32 {
        match self.excluded {
            Some(excluded) if index >= excluded => self.set.sizes[index + 1],
            _ => self.set.sizes[index],
        }
    }
}
