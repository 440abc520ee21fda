use log::debug;

use super::Constraint;
use crate::engine::propagation::PropagatorHandle;
use crate::engine::State;
use crate::propagators::bin_packing::BinCardinalities;
use crate::propagators::bin_packing::BinPackingOptions;
use crate::propagators::bin_packing::CardinalityTracking;
use crate::propagators::bin_packing::Item;
use crate::propagators::bin_packing::NoCardinality;
use crate::propagators::bin_packing::PackPropagator;
use crate::propagators::bin_packing::PackPropagatorArgs;
use crate::variables::IntegerVariable;
use crate::ConstraintOperationError;

/// Creates the [`Constraint`] that item `i` of size `sizes[i]` is packed into bin `bins[i]`, and
/// that `loads[j]` is the total size of the items packed into bin `j`.
///
/// The bins are numbered from `0` to `loads.len() - 1`; posting restricts the bin variables to
/// those values and the loads to `[0, sum(sizes)]`.
///
/// # Example
/// ```rust
/// # use pumpkin_packing::constraints;
/// # use pumpkin_packing::constraints::Constraint;
/// # use pumpkin_packing::State;
/// let mut state = State::default();
/// let loads = vec![state.new_bounded_integer(0, 4), state.new_bounded_integer(0, 10)];
/// let bins = vec![state.new_bounded_integer(0, 1), state.new_bounded_integer(0, 1)];
///
/// constraints::bin_packing(loads.clone(), bins.clone(), vec![5, 3])
///     .post(&mut state)
///     .expect("the item of size 5 fits in the second bin");
///
/// assert_eq!(state.lower_bound(bins[0]), 1);
/// assert!(state.lower_bound(loads[1]) >= 5);
/// ```
pub fn bin_packing<Var: IntegerVariable>(
    loads: impl Into<Box<[Var]>>,
    bins: impl Into<Box<[Var]>>,
    sizes: impl Into<Box<[i32]>>,
) -> BinPacking<Var, NoCardinality> {
    BinPacking {
        loads: loads.into(),
        bins: bins.into(),
        sizes: sizes.into(),
        cardinalities: NoCardinality,
        options: BinPackingOptions::default(),
    }
}

/// Creates the [`bin_packing`] constraint where additionally `counts[j]` is the number of items
/// packed into bin `j`.
pub fn bin_packing_with_cardinality<Var: IntegerVariable>(
    loads: impl Into<Box<[Var]>>,
    counts: impl IntoIterator<Item = Var>,
    bins: impl Into<Box<[Var]>>,
    sizes: impl Into<Box<[i32]>>,
) -> BinPacking<Var, BinCardinalities<Var>> {
    BinPacking {
        loads: loads.into(),
        bins: bins.into(),
        sizes: sizes.into(),
        cardinalities: BinCardinalities::new(counts),
        options: BinPackingOptions::default(),
    }
}

/// The bin-packing constraint, see [`bin_packing`] and [`bin_packing_with_cardinality`].
#[derive(Clone, Debug)]
pub struct BinPacking<Var, Card> {
    loads: Box<[Var]>,
    bins: Box<[Var]>,
    sizes: Box<[i32]>,
    cardinalities: Card,
    options: BinPackingOptions,
}

impl<Var: IntegerVariable, Card: CardinalityTracking> BinPacking<Var, Card> {
    pub fn with_options(mut self, options: BinPackingOptions) -> Self {
        self.options = options;
        self
    }

    /// Posts the constraint and returns the handle to its propagator.
    pub fn post_propagator(
        self,
        state: &mut State,
    ) -> Result<PropagatorHandle<PackPropagator<Var, Card>>, ConstraintOperationError> {
        let BinPacking {
            loads,
            bins,
            sizes,
            cardinalities,
            options,
        } = self;

        if sizes.len() != bins.len() {
            return Err(ConstraintOperationError::ArgumentSizeMismatch {
                argument: "sizes",
                expected: bins.len(),
                actual: sizes.len(),
            });
        }
        if let Some(num_counts) = cardinalities.num_bins() {
            if num_counts != loads.len() {
                return Err(ConstraintOperationError::ArgumentSizeMismatch {
                    argument: "cardinalities",
                    expected: loads.len(),
                    actual: num_counts,
                });
            }
        }
        if let Some((item, &size)) = sizes.iter().enumerate().find(|&(_, &size)| size < 0) {
            return Err(ConstraintOperationError::NegativeSize { item, size });
        }
        let total_size = i32::try_from(sizes.iter().map(|&size| i64::from(size)).sum::<i64>())
            .map_err(|_| ConstraintOperationError::SizeOverflow)?;

        if state.is_infeasible() {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        debug!(
            "Posting bin packing of {} items with total size {total_size} into {} bins",
            bins.len(),
            loads.len()
        );

        if loads.is_empty() && !bins.is_empty() {
            state.declare_infeasible();
            return Err(ConstraintOperationError::InfeasiblePropagator);
        }

        let num_bins = loads.len() as i32;
        for bin in bins.iter() {
            state
                .set_lower_bound(bin.clone(), 0)
                .and_then(|_| state.set_upper_bound(bin.clone(), num_bins - 1))
                .map_err(|_| ConstraintOperationError::InfeasiblePropagator)?;
        }
        for load in loads.iter() {
            state
                .set_lower_bound(load.clone(), 0)
                .and_then(|_| state.set_upper_bound(load.clone(), total_size))
                .map_err(|_| ConstraintOperationError::InfeasiblePropagator)?;
        }

        let items = bins
            .into_vec()
            .into_iter()
            .zip(sizes.iter())
            .map(|(bin, &size)| Item::new(bin, size))
            .collect();

        state.add_propagator(PackPropagatorArgs {
            loads,
            items,
            cardinalities,
            options,
        })
    }
}

impl<Var: IntegerVariable, Card: CardinalityTracking> Constraint for BinPacking<Var, Card> {
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError> {
        self.post_propagator(state).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_arguments_are_rejected() {
        let mut state = State::default();
        let loads = vec![state.new_bounded_integer(0, 5)];
        let bins = vec![state.new_bounded_integer(0, 0)];

        assert_eq!(
            bin_packing(loads.clone(), bins.clone(), vec![1, 2]).post(&mut state),
            Err(ConstraintOperationError::ArgumentSizeMismatch {
                argument: "sizes",
                expected: 1,
                actual: 2
            })
        );
        assert_eq!(
            bin_packing(loads, bins, vec![-1]).post(&mut state),
            Err(ConstraintOperationError::NegativeSize { item: 0, size: -1 })
        );
        assert!(!state.is_infeasible());
    }

    #[test]
    fn total_size_has_to_fit_in_a_load() {
        let mut state = State::default();
        let loads = vec![state.new_bounded_integer(0, 5)];
        let bins = vec![state.new_bounded_integer(0, 0), state.new_bounded_integer(0, 0)];

        assert_eq!(
            bin_packing(loads, bins, vec![i32::MAX, 1]).post(&mut state),
            Err(ConstraintOperationError::SizeOverflow)
        );
    }

    #[test]
    fn items_without_bins_are_infeasible() {
        let mut state = State::default();
        let bins = vec![state.new_bounded_integer(0, 3)];

        assert_eq!(
            bin_packing(Vec::new(), bins, vec![1]).post(&mut state),
            Err(ConstraintOperationError::InfeasiblePropagator)
        );
        assert!(state.is_infeasible());
    }

    #[test]
    fn bins_without_items_are_empty() {
        let mut state = State::default();
        let loads = vec![state.new_bounded_integer(0, 5)];
        let count = state.new_bounded_integer(0, 3);

        let handle = bin_packing_with_cardinality(loads.clone(), [count], Vec::new(), Vec::new())
            .post_propagator(&mut state)
            .expect("nothing has to be packed");

        assert!(state.is_subsumed(handle));
        assert_eq!(state.upper_bound(loads[0]), 0);
        assert_eq!(state.upper_bound(count), 0);
    }

    #[test]
    fn loads_are_bounded_by_the_total_size() {
        let mut state = State::default();
        let loads = vec![state.new_bounded_integer(-5, 100), state.new_bounded_integer(0, 100)];
        let bins = vec![state.new_bounded_integer(-3, 7), state.new_bounded_integer(0, 1)];

        bin_packing(loads.clone(), bins.clone(), vec![4, 2])
            .with_options(BinPackingOptions::cheap())
            .post(&mut state)
            .expect("a packing exists");

        assert_eq!(state.lower_bound(bins[0]), 0);
        assert_eq!(state.upper_bound(bins[0]), 1);
        assert!(state.lower_bound(loads[0]) >= 0);
        assert!(state.upper_bound(loads[1]) <= 6);
    }
}
