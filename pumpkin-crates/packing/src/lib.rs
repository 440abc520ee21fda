//! # Pumpkin Packing
//! Bin-packing propagation built in the style of the Pumpkin constraint programming solver.
//!
//! The central constraint is [`constraints::bin_packing`]: given items with a fixed size and a
//! variable bin, and one load variable per bin, it enforces that every item is placed in exactly
//! one bin and that the load of every bin equals the total size of the items placed in it. The
//! propagator behind it combines
//! - incremental elimination of items whose bin became fixed,
//! - propagation of the sum of all loads,
//! - subset-sum reasoning over the sizes which can still go into a bin,
//! - and a lower bound on the number of bins which are required.
//!
//! Optionally, the number of items in every bin can be constrained as well
//! ([`constraints::bin_packing_with_cardinality`]). For packing in multiple dimensions,
//! [`constraints::multi_dimensional_bin_packing`] additionally derives a conflict graph between
//! items which can never share a bin and posts distinctness constraints over its cliques.
//!
//! # Example
//! ```rust
//! # use pumpkin_packing::constraints;
//! # use pumpkin_packing::constraints::Constraint;
//! # use pumpkin_packing::search::DepthFirstSearch;
//! # use pumpkin_packing::search::SatisfactionResult;
//! # use pumpkin_packing::State;
//! let mut state = State::default();
//!
//! let loads = vec![state.new_bounded_integer(0, 5), state.new_bounded_integer(0, 5)];
//! let bins = (0..4).map(|_| state.new_bounded_integer(0, 1)).collect::<Vec<_>>();
//!
//! constraints::bin_packing(loads.clone(), bins.clone(), vec![3, 2, 2, 3])
//!     .post(&mut state)
//!     .expect("the packing is feasible at the root");
//!
//! let mut search = DepthFirstSearch::new(bins.clone());
//! match search.satisfy(&mut state) {
//!     SatisfactionResult::Satisfiable(solution) => {
//!         assert_eq!(solution.value(loads[0]), 5);
//!         assert_eq!(solution.value(loads[1]), 5);
//!     }
//!     SatisfactionResult::Unsatisfiable => panic!("a packing exists"),
//! }
//! ```
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod pumpkin_asserts;

pub mod constraints;
pub mod propagators;
pub mod search;
pub mod statistics;

pub use rand;

pub use crate::basic_types::ConflictKind;
pub use crate::basic_types::ConstraintOperationError;
pub use crate::basic_types::Inconsistency;
pub use crate::basic_types::PropagationOutcome;
pub use crate::basic_types::PropagationStatusCP;
pub use crate::basic_types::PropagatorConflict;
pub use crate::basic_types::Random;
pub use crate::basic_types::Solution;
pub use crate::engine::propagation::PropagatorHandle;
pub use crate::engine::Assignments;
pub use crate::engine::EmptyDomain;
pub use crate::engine::State;

pub mod variables {
    //! The variables which can be used in constraints.
    //!
    //! A [`DomainId`] is an integer variable with an explicit domain. An [`OffsetView`] presents
    //! the domain of another variable shifted by a constant; the packing propagator uses it to
    //! keep the load of a bin relative to the sizes which are already committed to it.
    pub use crate::engine::variables::DomainId;
    pub use crate::engine::variables::IntegerVariable;
    pub use crate::engine::variables::OffsetView;
}

pub mod propagation {
    //! The interface between the constraint store and the propagators.
    pub use crate::engine::propagation::DomainEvents;
    pub use crate::engine::propagation::HasAssignments;
    pub use crate::engine::propagation::IntDomainEvent;
    pub use crate::engine::propagation::Priority;
    pub use crate::engine::propagation::PropagationContext;
    pub use crate::engine::propagation::PropagationContextMut;
    pub use crate::engine::propagation::Propagator;
    pub use crate::engine::propagation::PropagatorConstructor;
    pub use crate::engine::propagation::PropagatorConstructorContext;
    pub use crate::engine::propagation::PropagatorId;
    pub use crate::engine::propagation::ReadDomains;
    pub use crate::engine::Watchers;
}
