//! A constraint is a relation over variables. In the store, constraints are enforced through
//! propagators, and therefore constraints can be viewed as a collection of propagators.
mod all_different;
mod bin_packing;
mod multi_dimensional_bin_packing;
mod not_equals;

pub use all_different::*;
pub use bin_packing::*;
pub use multi_dimensional_bin_packing::*;
pub use not_equals::*;

use crate::engine::propagation::PropagatorConstructor;
use crate::engine::State;
use crate::ConstraintOperationError;

/// A [`Constraint`] is a relation over variables.
pub trait Constraint {
    /// Post the constraint to the store.
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError>;
}

impl<Constructor> Constraint for Constructor
where
    Constructor: PropagatorConstructor,
    Constructor::PropagatorImpl: 'static,
{
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError> {
        state.add_propagator(self).map(|_| ())
    }
}

impl<C: Constraint> Constraint for Vec<C> {
    fn post(self, state: &mut State) -> Result<(), ConstraintOperationError> {
        self.into_iter().try_for_each(|c| c.post(state))
    }
}
