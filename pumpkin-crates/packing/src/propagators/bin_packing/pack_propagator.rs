use log::trace;

use super::check_required_bins;
use super::no_sum;
use super::sort_by_decreasing_size;
use super::sum_propagation::propagate_sum;
use super::BinPackingOptions;
use super::CardinalityTracking;
use super::Item;
use super::SizeSequence;
use super::SizeSetMinusOne;
use super::TellCache;
use crate::basic_types::ConflictKind;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationOutcome;
use crate::basic_types::PropagationStatusCP;
use crate::create_statistics_struct;
use crate::engine::propagation::DomainEvents;
use crate::engine::propagation::IntDomainEvent;
use crate::engine::propagation::Priority;
use crate::engine::propagation::PropagationContext;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::OffsetView;
use crate::pumpkin_assert_advanced;
use crate::pumpkin_assert_moderate;
use crate::pumpkin_assert_simple;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// Counters of a [`PackPropagator`].
    PackStatistics {
        num_calls: usize,
        /// The number of calls which reached the subset-sum and lower-bound stage.
        num_expensive_calls: usize,
        num_eliminated_items: usize,
        num_no_sum_failures: usize,
        num_lower_bound_failures: usize,
    }
);

/// The [`PropagatorConstructor`] for the [`PackPropagator`].
///
/// The domains of the bins have to lie within `0..loads.len()` when the propagator is added; the
/// items may be given in any order.
#[derive(Clone, Debug)]
pub struct PackPropagatorArgs<Var, Card> {
    pub loads: Box<[Var]>,
    pub items: Vec<Item<Var>>,
    pub cardinalities: Card,
    pub options: BinPackingOptions,
}

impl<Var, Card> PropagatorConstructor for PackPropagatorArgs<Var, Card>
where
    Var: IntegerVariable,
    Card: CardinalityTracking,
{
    type PropagatorImpl = PackPropagator<Var, Card>;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        let PackPropagatorArgs {
            loads,
            mut items,
            cardinalities,
            options,
        } = self;

        pumpkin_assert_simple!(cardinalities
            .num_bins()
            .map_or(true, |num_bins| num_bins == loads.len()));

        sort_by_decreasing_size(&mut items);

        let domains = context.domains();
        pumpkin_assert_simple!(
            items.iter().all(|item| domains.lower_bound(&item.bin) >= 0
                && domains.upper_bound(&item.bin) < loads.len() as i32),
            "every bin has to be restricted to the available bins"
        );

        for load in loads.iter() {
            context.register(load.clone(), DomainEvents::BOUNDS);
        }
        for item in items.iter() {
            context.register(item.bin.clone(), DomainEvents::ANY_INT);
        }
        cardinalities.register(&mut context);

        let total_size = items.iter().map(|item| item.size).sum();

        PackPropagator {
            loads: loads
                .into_vec()
                .into_iter()
                .map(|load| OffsetView::new(load, 0))
                .collect(),
            items,
            cardinalities,
            unassigned_size: total_size,
            total_size,
            options,
            statistics: PackStatistics::default(),
        }
    }
}

/// Propagator for the bin-packing constraint: every item is in exactly one bin, and the load of
/// every bin is the sum of the sizes of its items.
///
/// The propagator only keeps the items which are not yet packed. Once the bin of an item is
/// fixed, its size is committed to the load of that bin: the load is kept as a view whose offset
/// is lowered by the size, so the bounds of the view only concern the unpacked items.
///
/// Every call first runs the cheap stage, consisting of
/// - propagating that the loads sum up to the total size of the unpacked items,
/// - excluding a bin for an item if it does not fit anymore,
/// - and forcing an item into a bin if the bin cannot reach its minimum load without it.
///
/// Only when the cheap stage derives nothing, the subset-sum reasoning of Shaw ("A Constraint
/// for Bin Packing", CP 2004) and the lower bound on the number of bins are applied.
///
/// With [`super::BinCardinalities`] the propagator also constrains the number of items per bin
/// following the simple rules of Derval, Régin and Schaus ("Improved Filtering for the
/// Bin-Packing with Cardinality Constraints", Constraints 2018).
#[derive(Clone, Debug)]
pub struct PackPropagator<Var, Card> {
    loads: Box<[OffsetView<Var>]>,
    /// The unpacked items in non-increasing order of size.
    items: Vec<Item<Var>>,
    cardinalities: Card,
    unassigned_size: i32,
    total_size: i32,
    options: BinPackingOptions,
    statistics: PackStatistics,
}

impl<Var: IntegerVariable, Card: CardinalityTracking> PackPropagator<Var, Card> {
    /// The total size of the items which are not yet packed.
    pub fn unassigned_size(&self) -> i32 {
        self.unassigned_size
    }

    /// The total size of the items which are packed into `bin`.
    pub fn committed_load(&self, bin: usize) -> i32 {
        -self.loads[bin].offset()
    }

    pub fn active_items(&self) -> &[Item<Var>] {
        &self.items
    }

    pub fn num_bins(&self) -> usize {
        self.loads.len()
    }

    fn commit(&mut self, bin: i32, size: i32) {
        pumpkin_assert_moderate!(0 <= bin && (bin as usize) < self.loads.len());
        let bin = bin as usize;

        let load = &mut self.loads[bin];
        load.set_offset(load.offset() - size);
        self.cardinalities.eliminate(bin);
        self.unassigned_size -= size;
        self.statistics.num_eliminated_items += 1;

        trace!("committed item of size {size} to bin {bin}");
    }

    /// Commits the items whose bin is fixed and removes them, keeping the order of the others.
    fn eliminate_fixed_items(&mut self, context: PropagationContext<'_>) {
        let mut num_kept = 0;
        for index in 0..self.items.len() {
            let size = self.items[index].size;
            match context.fixed_value(&self.items[index].bin) {
                Some(bin) => self.commit(bin, size),
                None => {
                    self.items.swap(num_kept, index);
                    num_kept += 1;
                }
            }
        }
        self.items.truncate(num_kept);
    }

    fn propagate_subset_sums(
        &mut self,
        context: &mut PropagationContextMut<'_>,
    ) -> Result<(), Inconsistency> {
        let num_bins = self.loads.len();

        let mut size_sets = (0..num_bins)
            .map(|_| SizeSetMinusOne::with_capacity(self.items.len()))
            .collect::<Vec<_>>();
        for item in self.items.iter() {
            for bin in context.iterate_domain(&item.bin) {
                size_sets[bin as usize].add(item.size);
            }
        }

        for (bin, load) in self.loads.iter().enumerate() {
            let sizes = size_sets[bin].full();

            if no_sum(sizes, context.lower_bound(load), context.upper_bound(load)).is_some() {
                trace!("no subset of {} items reaches the load of bin {bin}", sizes.card());
                self.statistics.num_no_sum_failures += 1;
                return Err(ConflictKind::UnreachableLoad { bin }.into());
            }

            let lower_bound = context.lower_bound(load);
            if let Some(gap) = no_sum(sizes, lower_bound, lower_bound) {
                context.set_lower_bound(load, gap.above)?;
            }
            let upper_bound = context.upper_bound(load);
            if let Some(gap) = no_sum(sizes, upper_bound, upper_bound) {
                context.set_upper_bound(load, gap.below)?;
            }
        }

        let mut tell_cache = TellCache::with_capacity(num_bins);
        let mut num_kept = 0;
        for index in 0..self.items.len() {
            let size = self.items[index].size;

            for bin in context.iterate_domain(&self.items[index].bin) {
                let load = &self.loads[bin as usize];
                let sizes = &mut size_sets[bin as usize];
                sizes.minus(size);

                let lower_bound = context.lower_bound(load);
                let upper_bound = context.upper_bound(load);
                // The other items cannot complement this one.
                if no_sum(sizes, lower_bound - size, upper_bound - size).is_some() {
                    tell_cache.exclude(bin);
                }
                // The other items cannot fill the bin by themselves.
                if no_sum(sizes, lower_bound, upper_bound).is_some() {
                    tell_cache.force(bin);
                }
            }

            tell_cache.tell(context, &self.items[index].bin)?;

            match context.fixed_value(&self.items[index].bin) {
                Some(bin) => self.commit(bin, size),
                None => {
                    self.items.swap(num_kept, index);
                    num_kept += 1;
                }
            }
        }
        self.items.truncate(num_kept);

        Ok(())
    }

    fn check_lower_bound(&mut self, context: PropagationContext<'_>) -> Result<(), Inconsistency> {
        let item_sizes = self.items.iter().map(|item| item.size).collect::<Vec<_>>();
        let capacities = self
            .loads
            .iter()
            .map(|load| context.upper_bound(load))
            .collect::<Vec<_>>();

        check_required_bins(&item_sizes, &capacities).map_err(|kind| {
            trace!("{} unpacked items cannot be packed: {kind:?}", item_sizes.len());
            self.statistics.num_lower_bound_failures += 1;
            kind.into()
        })
    }
}

impl<Var, Card> Propagator for PackPropagator<Var, Card>
where
    Var: IntegerVariable,
    Card: CardinalityTracking,
{
    fn name(&self) -> &str {
        if Card::IS_TRACKING {
            "CardBinPacking"
        } else {
            "BinPacking"
        }
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatusCP {
        self.statistics.num_calls += 1;
        let num_bins = self.loads.len();

        if context.delta().contains(IntDomainEvent::Assign) {
            self.eliminate_fixed_items(context.as_readonly());
        }

        let mut possible_loads = vec![0; num_bins];
        let mut possible_counts = if Card::IS_TRACKING {
            vec![0; num_bins]
        } else {
            Vec::new()
        };
        for item in self.items.iter() {
            pumpkin_assert_moderate!(!context.is_fixed(&item.bin));
            for bin in context.iterate_domain(&item.bin) {
                possible_loads[bin as usize] += item.size;
                if Card::IS_TRACKING {
                    possible_counts[bin as usize] += 1;
                }
            }
        }

        propagate_sum(
            &mut context,
            &self.loads,
            &possible_loads,
            self.unassigned_size,
        )?;
        if Card::IS_TRACKING {
            self.cardinalities
                .propagate_counts(&mut context, &possible_counts, self.items.len())?;
            self.cardinalities
                .propagate_loads(&mut context, &self.loads, &self.items)?;
        }

        if self.items.is_empty() {
            return Ok(PropagationOutcome::Subsumed);
        }

        let mut tell_cache = TellCache::with_capacity(num_bins);
        let mut num_kept = 0;
        for index in 0..self.items.len() {
            let size = self.items[index].size;

            for bin in context.iterate_domain(&self.items[index].bin) {
                let load = &self.loads[bin as usize];
                if size > context.upper_bound(load) {
                    tell_cache.exclude(bin);
                }
                if possible_loads[bin as usize] - size < context.lower_bound(load) {
                    tell_cache.force(bin);
                }
                if Card::IS_TRACKING {
                    self.cardinalities.collect_tells(
                        &context,
                        bin as usize,
                        possible_counts[bin as usize],
                        &mut tell_cache,
                    );
                }
            }

            tell_cache.tell(&mut context, &self.items[index].bin)?;

            match context.fixed_value(&self.items[index].bin) {
                Some(bin) => {
                    possible_loads[bin as usize] -= size;
                    if Card::IS_TRACKING {
                        possible_counts[bin as usize] -= 1;
                    }
                    self.commit(bin, size);
                }
                None => {
                    self.items.swap(num_kept, index);
                    num_kept += 1;
                }
            }
        }
        self.items.truncate(num_kept);

        if context.has_modified_domains() {
            return Ok(PropagationOutcome::NotYetAtFixpoint);
        }

        if self.options.subset_sum_reasoning || self.options.lower_bound_reasoning {
            self.statistics.num_expensive_calls += 1;

            if self.options.subset_sum_reasoning {
                self.propagate_subset_sums(&mut context)?;
            }
            if self.options.lower_bound_reasoning && !self.items.is_empty() {
                self.check_lower_bound(context.as_readonly())?;
            }
        }

        pumpkin_assert_advanced!(
            self.unassigned_size
                + (0..num_bins)
                    .map(|bin| self.committed_load(bin))
                    .sum::<i32>()
                == self.total_size
        );

        if context.has_modified_domains() {
            Ok(PropagationOutcome::NotYetAtFixpoint)
        } else {
            Ok(PropagationOutcome::Stable)
        }
    }
}

#[cfg(test)]
mod tests {
    use enumset::EnumSet;

    use super::*;
    use crate::engine::test_solver::TestSolver;
    use crate::engine::variables::DomainId;
    use crate::propagators::bin_packing::BinCardinalities;
    use crate::propagators::bin_packing::NoCardinality;

    fn pack(
        solver: &mut TestSolver,
        loads: &[DomainId],
        sizes: &[i32],
    ) -> (Vec<DomainId>, PackPropagatorArgs<DomainId, NoCardinality>) {
        pack_with_options(solver, loads, sizes, BinPackingOptions::default())
    }

    fn pack_with_options(
        solver: &mut TestSolver,
        loads: &[DomainId],
        sizes: &[i32],
        options: BinPackingOptions,
    ) -> (Vec<DomainId>, PackPropagatorArgs<DomainId, NoCardinality>) {
        let bins = sizes
            .iter()
            .map(|_| solver.new_variable(0, loads.len() as i32 - 1))
            .collect::<Vec<_>>();
        let args = PackPropagatorArgs {
            loads: loads.into(),
            items: bins
                .iter()
                .zip(sizes)
                .map(|(&bin, &size)| Item::new(bin, size))
                .collect(),
            cardinalities: NoCardinality,
            options,
        };
        (bins, args)
    }

    #[test]
    fn fixing_an_item_raises_the_load_of_its_bin() {
        let mut solver = TestSolver::default();
        let loads = [solver.new_variable(0, 8), solver.new_variable(0, 8)];
        let (bins, args) = pack(&mut solver, &loads, &[4, 3, 3, 2, 2, 1]);

        let handle = solver.new_propagator(args).expect("15 fits in two bins of 8");
        solver.assert_bounds(loads[0], 7, 8);

        solver
            .assign_and_notify(bins[0], 0)
            .expect("bin 0 can hold the item of size 4");

        assert!(solver.lower_bound(loads[0]) >= 4);
        let propagator = solver.get_propagator(handle);
        assert_eq!(propagator.committed_load(0), 4);
        assert_eq!(propagator.unassigned_size(), 11);
    }

    #[test]
    fn items_which_do_not_fit_are_moved() {
        let mut solver = TestSolver::default();
        let loads = [solver.new_variable(0, 4), solver.new_variable(0, 10)];
        let (bins, args) = pack(&mut solver, &loads, &[5, 3]);

        let handle = solver.new_propagator(args).expect("a packing exists");

        assert!(solver.is_fixed(bins[0]));
        assert_eq!(solver.lower_bound(bins[0]), 1);
        solver.assert_bounds(loads[0], 0, 3);
        solver.assert_bounds(loads[1], 5, 8);
        assert_eq!(solver.get_propagator(handle).active_items().len(), 1);
    }

    #[test]
    fn unique_packing_is_completed() {
        let mut solver = TestSolver::default();
        let loads = [solver.new_variable(33, 33), solver.new_variable(30, 30)];
        let (bins, args) = pack(&mut solver, &loads, &[1, 2, 4, 8, 16, 32]);

        let _ = solver.new_propagator(args).expect("1 + 32 and 2 + 4 + 8 + 16");
        for (bin, value) in [(bins[0], 0), (bins[5], 0), (bins[2], 1), (bins[3], 1), (bins[4], 1)] {
            solver.assign_and_notify(bin, value).expect("the packing is valid");
        }

        assert!(solver.is_fixed(bins[1]));
        assert_eq!(solver.lower_bound(bins[1]), 1);
    }

    #[test]
    fn call_without_changes_is_stable() {
        let mut solver = TestSolver::default();
        let loads = [solver.new_variable(0, 8), solver.new_variable(0, 8)];
        let (_, args) = pack(&mut solver, &loads, &[4, 3, 3, 2, 2, 1]);
        let handle = solver.new_propagator(args).expect("15 fits in two bins of 8");

        let result = solver.propagate_with_delta(handle, EnumSet::empty());

        assert_eq!(result, Ok(PropagationOutcome::Stable));
        solver.assert_bounds(loads[0], 7, 8);
        solver.assert_bounds(loads[1], 7, 8);
    }

    #[test]
    fn subsumed_once_every_item_is_packed() {
        let mut solver = TestSolver::default();
        let loads = [solver.new_variable(0, 10), solver.new_variable(0, 10)];
        let (bins, args) = pack(&mut solver, &loads, &[3, 2, 2]);
        let handle = solver.new_propagator(args).expect("a packing exists");

        solver.assign_and_notify(bins[0], 0).expect("a packing exists");
        solver.assign_and_notify(bins[1], 1).expect("a packing exists");
        solver.assign_and_notify(bins[2], 1).expect("a packing exists");

        solver.assert_bounds(loads[0], 3, 3);
        solver.assert_bounds(loads[1], 4, 4);
        assert!(solver.state.is_subsumed(handle));
    }

    #[test]
    fn unreachable_load_is_detected_by_subset_sums() {
        let mut solver = TestSolver::default();
        let loads = [solver.new_variable(0, 9), solver.new_variable(0, 9)];
        let (_, args) = pack(&mut solver, &loads, &[3, 3, 3]);
        let handle = solver.new_propagator(args).expect("a packing exists");

        for load in loads {
            solver.state.set_lower_bound(load, 4).expect("non-empty domain");
            solver.state.set_upper_bound(load, 5).expect("non-empty domain");
        }
        let result = solver.propagate_with_delta(handle, EnumSet::all());

        assert_eq!(
            result,
            Err(Inconsistency::from(ConflictKind::UnreachableLoad { bin: 0 }))
        );
    }

    #[test]
    fn cheap_stages_do_not_reason_over_subsets() {
        let mut solver = TestSolver::default();
        let loads = [solver.new_variable(4, 5), solver.new_variable(0, 9)];
        let (_, args) = pack_with_options(
            &mut solver,
            &loads,
            &[3, 3, 3],
            BinPackingOptions::cheap(),
        );

        let _ = solver
            .new_propagator(args)
            .expect("without subset sums no conflict is found");
        solver.assert_bounds(loads[1], 4, 5);
    }

    #[test]
    fn too_many_large_items_fail_the_lower_bound() {
        let mut solver = TestSolver::default();
        let loads = [solver.new_variable(0, 20), solver.new_variable(0, 20)];
        let options = BinPackingOptions {
            subset_sum_reasoning: false,
            lower_bound_reasoning: true,
        };
        let (_, args) = pack_with_options(&mut solver, &loads, &[6, 6, 6], options);
        let handle = solver.new_propagator(args).expect("18 fits in 40");

        for load in loads {
            solver.state.set_lower_bound(load, 8).expect("non-empty domain");
            solver.state.set_upper_bound(load, 10).expect("non-empty domain");
        }
        let result = solver.propagate_with_delta(handle, EnumSet::all());

        assert_eq!(
            result,
            Err(Inconsistency::from(ConflictKind::InsufficientBins {
                required: 3,
                available: 2
            }))
        );
    }

    #[test]
    fn cardinalities_determine_the_loads() {
        let mut solver = TestSolver::default();
        let loads = [solver.new_variable(0, 20), solver.new_variable(0, 20)];
        let counts = [solver.new_variable(2, 2), solver.new_variable(2, 2)];
        let (_, args) = pack(&mut solver, &loads, &[5, 5, 5, 5]);
        let args = PackPropagatorArgs {
            loads: args.loads,
            items: args.items,
            cardinalities: BinCardinalities::new(counts),
            options: args.options,
        };

        let handle = solver.new_propagator(args).expect("two items per bin");

        solver.assert_bounds(loads[0], 10, 10);
        solver.assert_bounds(loads[1], 10, 10);
        assert_eq!(solver.get_propagator(handle).name(), "CardBinPacking");
    }

    #[test]
    fn closed_bins_are_excluded_by_their_count() {
        let mut solver = TestSolver::default();
        let loads = [solver.new_variable(0, 10), solver.new_variable(0, 10)];
        let counts = [solver.new_variable(0, 0), solver.new_variable(0, 3)];
        let (bins, args) = pack(&mut solver, &loads, &[2, 1]);
        let args = PackPropagatorArgs {
            loads: args.loads,
            items: args.items,
            cardinalities: BinCardinalities::new(counts),
            options: args.options,
        };

        let _ = solver.new_propagator(args).expect("both items fit in bin 1");

        assert!(bins.iter().all(|&bin| solver.is_fixed(bin)));
        solver.assert_bounds(loads[1], 3, 3);
        solver.assert_bounds(counts[1], 2, 2);
    }
}
