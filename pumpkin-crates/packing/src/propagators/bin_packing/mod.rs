//! Propagation for bin packing.
//!
//! The [`PackPropagator`] is the propagator for the constraint itself; the other types are the
//! building blocks it is made of, and the [`ConflictGraph`] which derives distinctness constraints
//! for items that cannot share a bin.
mod cardinality;
mod conflict_graph;
mod item;
mod lower_bound;
mod no_sum;
mod options;
mod pack_propagator;
mod size_set;
mod sum_propagation;
mod tell_cache;

pub use cardinality::BinCardinalities;
pub use cardinality::CardinalityTracking;
pub use cardinality::NoCardinality;
pub use conflict_graph::ConflictGraph;
pub use item::Item;
pub(crate) use item::sort_by_decreasing_size;
pub(crate) use lower_bound::check_required_bins;
pub use no_sum::no_sum;
pub use no_sum::NoSum;
pub use options::BinPackingOptions;
pub use pack_propagator::PackPropagator;
pub use pack_propagator::PackPropagatorArgs;
pub use size_set::SizeSequence;
pub use size_set::SizeSet;
pub use size_set::SizeSetMinusOne;
pub use tell_cache::TellCache;
