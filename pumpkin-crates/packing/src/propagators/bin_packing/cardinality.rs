use std::fmt::Debug;

use super::sum_propagation::propagate_sum;
use super::Item;
use super::TellCache;
use crate::engine::propagation::DomainEvents;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::OffsetView;
use crate::engine::EmptyDomain;

/// Whether, and how, the packing propagator keeps track of the number of items per bin.
///
/// [`NoCardinality`] does nothing at all; [`BinCardinalities`] holds one count variable per bin.
/// The propagator checks [`CardinalityTracking::IS_TRACKING`] before gathering the data these
/// rules need.
pub trait CardinalityTracking: Clone + Debug + 'static {
    const IS_TRACKING: bool;

    /// The number of count variables.
    fn num_bins(&self) -> Option<usize>;

    fn register(&self, context: &mut PropagatorConstructorContext<'_>);

    /// Records that an item was committed to `bin`.
    fn eliminate(&mut self, bin: usize);

    /// Bounds every count by the number of items which can still go to the bin, and propagates
    /// that the counts sum to the number of unpacked items.
    fn propagate_counts(
        &self,
        context: &mut PropagationContextMut<'_>,
        possible_counts: &[i32],
        num_items: usize,
    ) -> Result<(), EmptyDomain>;

    /// Propagates between the load and the count of every bin through the sums of the largest
    /// and smallest sizes which can still go to the bin.
    fn propagate_loads<Var: IntegerVariable>(
        &self,
        context: &mut PropagationContextMut<'_>,
        loads: &[OffsetView<Var>],
        items: &[Item<Var>],
    ) -> Result<(), EmptyDomain>;

    /// Excludes the bins which cannot take another item and forces an item into `bin` if the bin
    /// needs every item which can still go to it.
    fn collect_tells(
        &self,
        context: &PropagationContextMut<'_>,
        bin: usize,
        possible_count: i32,
        tell_cache: &mut TellCache,
    );
}

/// The number of items per bin is not constrained.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCardinality;

impl CardinalityTracking for NoCardinality {
    const IS_TRACKING: bool = false;

    fn num_bins(&self) -> Option<usize> {
        None
    }

    fn register(&self, _: &mut PropagatorConstructorContext<'_>) {}

    fn eliminate(&mut self, _: usize) {}

    fn propagate_counts(
        &self,
        _: &mut PropagationContextMut<'_>,
        _: &[i32],
        _: usize,
    ) -> Result<(), EmptyDomain> {
        Ok(())
    }

    fn propagate_loads<Var: IntegerVariable>(
        &self,
        _: &mut PropagationContextMut<'_>,
        _: &[OffsetView<Var>],
        _: &[Item<Var>],
    ) -> Result<(), EmptyDomain> {
        Ok(())
    }

    fn collect_tells(&self, _: &PropagationContextMut<'_>, _: usize, _: i32, _: &mut TellCache) {}
}

/// One variable per bin which counts the items in the bin.
///
/// Like the loads, the counts are kept as views which only describe the items that are not yet
/// committed.
#[derive(Clone, Debug)]
pub struct BinCardinalities<Var> {
    counts: Box<[OffsetView<Var>]>,
}

impl<Var: IntegerVariable> BinCardinalities<Var> {
    pub fn new(counts: impl IntoIterator<Item = Var>) -> Self {
        BinCardinalities {
            counts: counts
                .into_iter()
                .map(|count| OffsetView::new(count, 0))
                .collect(),
        }
    }

    /// The count of `bin` relative to the items which are still unpacked.
    pub fn count(&self, bin: usize) -> &OffsetView<Var> {
        &self.counts[bin]
    }
}

impl<Var: IntegerVariable> CardinalityTracking for BinCardinalities<Var> {
    const IS_TRACKING: bool = true;

    fn num_bins(&self) -> Option<usize> {
        Some(self.counts.len())
    }

    fn register(&self, context: &mut PropagatorConstructorContext<'_>) {
        for count in self.counts.iter() {
            context.register(count.clone(), DomainEvents::BOUNDS);
        }
    }

    fn eliminate(&mut self, bin: usize) {
        let count = &mut self.counts[bin];
        count.set_offset(count.offset() - 1);
    }

    fn propagate_counts(
        &self,
        context: &mut PropagationContextMut<'_>,
        possible_counts: &[i32],
        num_items: usize,
    ) -> Result<(), EmptyDomain> {
        propagate_sum(context, &self.counts, possible_counts, num_items as i32)
    }

    fn propagate_loads<LoadVar: IntegerVariable>(
        &self,
        context: &mut PropagationContextMut<'_>,
        loads: &[OffsetView<LoadVar>],
        items: &[Item<LoadVar>],
    ) -> Result<(), EmptyDomain> {
        let mut sizes = Vec::with_capacity(items.len());
        let mut largest_sums = Vec::with_capacity(items.len() + 1);
        let mut smallest_sums = Vec::with_capacity(items.len() + 1);

        for (bin, (load, count)) in loads.iter().zip(self.counts.iter()).enumerate() {
            sizes.clear();
            sizes.extend(
                items
                    .iter()
                    .filter(|item| context.contains(&item.bin, bin as i32))
                    .map(|item| item.size),
            );

            // The `k`-th entry holds the sum of the `k` largest (resp. smallest) sizes.
            largest_sums.clear();
            largest_sums.push(0);
            for &size in sizes.iter() {
                largest_sums.push(largest_sums[largest_sums.len() - 1] + size);
            }
            smallest_sums.clear();
            smallest_sums.push(0);
            for &size in sizes.iter().rev() {
                smallest_sums.push(smallest_sums[smallest_sums.len() - 1] + size);
            }

            let max_count = (context.upper_bound(count).max(0) as usize).min(sizes.len());
            let min_count = (context.lower_bound(count).max(0) as usize).min(sizes.len());
            context.set_upper_bound(load, largest_sums[max_count])?;
            context.set_lower_bound(load, smallest_sums[min_count])?;

            let load_max = context.upper_bound(load);
            let load_min = context.lower_bound(load);
            let fitting_count = smallest_sums
                .iter()
                .rposition(|&sum| sum <= load_max)
                .unwrap_or(0);
            let needed_count = largest_sums
                .iter()
                .position(|&sum| sum >= load_min)
                .unwrap_or(sizes.len() + 1);
            context.set_upper_bound(count, fitting_count as i32)?;
            context.set_lower_bound(count, needed_count as i32)?;
        }

        Ok(())
    }

    fn collect_tells(
        &self,
        context: &PropagationContextMut<'_>,
        bin: usize,
        possible_count: i32,
        tell_cache: &mut TellCache,
    ) {
        let count = &self.counts[bin];

        if context.upper_bound(count) == 0 {
            tell_cache.exclude(bin as i32);
        }
        if possible_count - 1 < context.lower_bound(count) {
            tell_cache.force(bin as i32);
        }
    }
}
