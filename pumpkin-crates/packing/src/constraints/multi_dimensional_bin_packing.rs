use itertools::EitherOrBoth;
use itertools::Itertools;
use log::debug;

use super::bin_packing;
use super::Constraint;
use crate::engine::State;
use crate::propagators::bin_packing::ConflictGraph;
use crate::pumpkin_assert_simple;
use crate::variables::IntegerVariable;
use crate::ConstraintOperationError;

/// Posts the packing of items into bins in `num_dimensions` dimensions at once.
///
/// Item `i` has size `sizes[i * d + k]` in dimension `k` and is packed into bin `bins[i]`. The
/// load of bin `j` in dimension `k` is `loads[j * d + k]`, and is bounded by `capacities[k]`. Every
/// dimension is an independent [`bin_packing`]; on top of that, items which cannot share any bin
/// in some dimension are collected into a conflict graph whose cliques are forced into distinct
/// bins.
///
/// Returns the items of the largest clique which was found. The items of that clique all occupy
/// different bins in every solution, which makes them a good target for symmetry breaking.
pub fn multi_dimensional_bin_packing<Var: IntegerVariable>(
    state: &mut State,
    num_dimensions: usize,
    loads: &[Var],
    bins: &[Var],
    sizes: &[i32],
    capacities: &[i32],
) -> Result<Vec<usize>, ConstraintOperationError> {
    pumpkin_assert_simple!(num_dimensions > 0, "items are packed in at least one dimension");
    let d = num_dimensions;
    if capacities.len() != d {
        return Err(ConstraintOperationError::ArgumentSizeMismatch {
            argument: "capacities",
            expected: d,
            actual: capacities.len(),
        });
    }
    if sizes.len() != bins.len() * d {
        return Err(ConstraintOperationError::ArgumentSizeMismatch {
            argument: "sizes",
            expected: bins.len() * d,
            actual: sizes.len(),
        });
    }
    if loads.len() % d != 0 {
        return Err(ConstraintOperationError::ArgumentSizeMismatch {
            argument: "loads",
            expected: loads.len().next_multiple_of(d),
            actual: loads.len(),
        });
    }
    if let Some((dimension, &capacity)) = capacities.iter().enumerate().find(|&(_, &c)| c < 0) {
        return Err(ConstraintOperationError::NegativeCapacity {
            dimension,
            capacity,
        });
    }
    if state.is_infeasible() {
        return Err(ConstraintOperationError::InfeasibleState);
    }

    let num_bins = loads.len() / d;
    debug!(
        "Posting {d}-dimensional bin packing of {} items into {num_bins} bins",
        bins.len()
    );

    for (index, load) in loads.iter().enumerate() {
        state
            .set_upper_bound(load.clone(), capacities[index % d])
            .map_err(|_| ConstraintOperationError::InfeasiblePropagator)?;
    }

    for k in 0..d {
        let dimension_loads = loads.iter().skip(k).step_by(d).cloned().collect::<Vec<_>>();
        let dimension_sizes = sizes.iter().skip(k).step_by(d).copied().collect::<Vec<_>>();
        bin_packing(dimension_loads, bins.to_vec(), dimension_sizes).post(state)?;
    }

    // Items conflict when none of the bins which are admissible for both can hold them together.
    let edges = (0..bins.len())
        .tuple_combinations::<(usize, usize)>()
        .filter(|&(i, j)| {
            common_bins(state, &bins[i], &bins[j]).all(|bin| {
                (0..d).any(|k| {
                    let capacity = state.upper_bound(loads[bin as usize * d + k].clone());
                    i64::from(sizes[i * d + k]) + i64::from(sizes[j * d + k])
                        > i64::from(capacity)
                })
            })
        })
        .collect::<Vec<_>>();

    let mut graph = ConflictGraph::new(state, bins, num_bins);
    for (i, j) in edges {
        graph.add_edge(i, j);
    }
    graph.post()?;

    Ok(graph.max_clique())
}

/// The values which are in the domains of both `a` and `b`, in increasing order.
fn common_bins<'a, Var: IntegerVariable>(
    state: &'a State,
    a: &'a Var,
    b: &'a Var,
) -> impl Iterator<Item = i32> + 'a {
    a.iterate_domain(state.assignments())
        .merge_join_by(b.iterate_domain(state.assignments()), |x, y| x.cmp(y))
        .filter_map(|value| match value {
            EitherOrBoth::Both(bin, _) => Some(bin),
            _ => None,
        })
}
