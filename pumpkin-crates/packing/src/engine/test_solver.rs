//! This module exposes helpers that aid testing of propagators. The [`TestSolver`] allows setting
//! up specific scenarios under which to test the various operations of a propagator.
use enumset::EnumSet;

use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatusCP;
use crate::engine::domain_events::IntDomainEvent;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorHandle;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::State;

/// A container for variables, which can be used to test propagators.
#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    pub(crate) state: State,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        self.state.new_bounded_integer(lb, ub)
    }

    /// Adds the propagator and runs the store to a fixpoint.
    pub(crate) fn new_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, ConstraintOperationError>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        self.state.add_propagator(constructor)
    }

    pub(crate) fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> &P {
        self.state
            .get_propagator(handle)
            .expect("the handle was created by this solver")
    }

    pub(crate) fn contains<Var: IntegerVariable>(&self, var: Var, value: i32) -> bool {
        self.state.contains(var, value)
    }

    pub(crate) fn lower_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.state.lower_bound(var)
    }

    pub(crate) fn upper_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        self.state.upper_bound(var)
    }

    pub(crate) fn is_fixed<Var: IntegerVariable>(&self, var: Var) -> bool {
        self.state.is_fixed(var)
    }

    pub(crate) fn assign_and_notify(
        &mut self,
        var: DomainId,
        value: i32,
    ) -> Result<(), Inconsistency> {
        self.state.assign(var, value)?;
        self.state.propagate_to_fixpoint()
    }

    /// Calls the propagator directly with the given delta.
    pub(crate) fn propagate_with_delta<P>(
        &mut self,
        handle: PropagatorHandle<P>,
        delta: EnumSet<IntDomainEvent>,
    ) -> PropagationStatusCP {
        self.state.propagate_single(handle.propagator_id(), delta)
    }

    pub(crate) fn assert_bounds(&self, var: DomainId, lb: i32, ub: i32) {
        let actual_lb = self.lower_bound(var);
        let actual_ub = self.upper_bound(var);

        assert_eq!(
            (lb, ub), (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}]"
        );
    }
}
