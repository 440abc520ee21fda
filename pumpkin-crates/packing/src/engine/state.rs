use enumset::EnumSet;
use log::debug;
use log::trace;

use crate::basic_types::ConstraintOperationError;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationOutcome;
use crate::containers::KeyedVec;
use crate::create_statistics_struct;
use crate::engine::domain_events::IntDomainEvent;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::PropagatorHandle;
use crate::engine::propagation::PropagatorId;
use crate::engine::propagation::PropagatorStore;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::PropagatorQueue;
use crate::engine::WatchList;
use crate::pumpkin_assert_eq_simple;
use crate::pumpkin_assert_simple;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;

create_statistics_struct!(
    /// Counters of the store itself.
    StateStatistics {
        /// The number of times a propagator was called.
        num_propagator_calls: usize,
        /// The number of propagators which were removed because they were subsumed.
        num_subsumed_propagators: usize,
        /// The number of times propagation ended in a conflict.
        num_conflicts: usize,
    }
);

/// The constraint store: the variables, the propagators which are posted over them and the
/// bookkeeping to run those propagators to a fixpoint.
///
/// The store does not keep a trail. A search which wants to explore a branch without losing the
/// current state clones the store and works on the copy; the propagators are cloned with it. Once
/// propagation fails the store is infeasible and should be discarded.
#[derive(Clone, Debug, Default)]
pub struct State {
    assignments: Assignments,
    propagators: PropagatorStore,
    watch_list: WatchList,
    /// The events which the propagator has not seen yet.
    pending_events: KeyedVec<PropagatorId, EnumSet<IntDomainEvent>>,
    is_subsumed: KeyedVec<PropagatorId, bool>,
    queue: PropagatorQueue,
    is_infeasible: bool,
    statistics: StateStatistics,
}

impl State {
    /// Create a new integer variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.watch_list.grow();
        self.assignments.grow(lower_bound, upper_bound)
    }

    /// Create a new integer variable whose domain consists of the given values.
    pub fn new_sparse_integer(&mut self, values: impl Into<Vec<i32>>) -> DomainId {
        self.watch_list.grow();
        self.assignments
            .create_new_integer_variable_sparse(values.into())
    }

    pub fn assignments(&self) -> &Assignments {
        &self.assignments
    }

    pub fn lower_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        var.lower_bound(&self.assignments)
    }

    pub fn upper_bound<Var: IntegerVariable>(&self, var: Var) -> i32 {
        var.upper_bound(&self.assignments)
    }

    pub fn contains<Var: IntegerVariable>(&self, var: Var, value: i32) -> bool {
        var.contains(&self.assignments, value)
    }

    pub fn is_fixed<Var: IntegerVariable>(&self, var: Var) -> bool {
        var.lower_bound(&self.assignments) == var.upper_bound(&self.assignments)
    }

    /// Whether a conflict was found in this store.
    pub fn is_infeasible(&self) -> bool {
        self.is_infeasible
    }

    pub(crate) fn declare_infeasible(&mut self) {
        self.is_infeasible = true;
        self.queue.clear();
    }

    pub fn num_propagators(&self) -> usize {
        self.propagators.len()
    }

    /// Adds a propagator to the store and propagates until a fixpoint is reached.
    ///
    /// The first call of the new propagator receives every event as its delta.
    pub fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, ConstraintOperationError>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        if self.is_infeasible {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let propagator_id = self.propagators.next_id();
        let propagator = constructor.create(PropagatorConstructorContext::new(
            &mut self.watch_list,
            &self.assignments,
            propagator_id,
        ));

        debug!("Adding propagator {} as {propagator_id}", propagator.name());

        let new_id = self.propagators.alloc(Box::new(propagator));
        pumpkin_assert_eq_simple!(propagator_id, new_id);

        self.pending_events
            .accommodate(propagator_id, EnumSet::empty());
        self.pending_events[propagator_id] = EnumSet::all();
        self.is_subsumed.accommodate(propagator_id, false);
        self.queue
            .enqueue_propagator(propagator_id, self.propagators[propagator_id].priority());

        match self.propagate_to_fixpoint() {
            Ok(()) => Ok(PropagatorHandle::new(propagator_id)),
            Err(_) => Err(ConstraintOperationError::InfeasiblePropagator),
        }
    }

    /// Get the propagator behind the handle.
    pub fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self.propagators.get_propagator(handle)
    }

    /// Whether the propagator was subsumed in this store.
    pub fn is_subsumed<P>(&self, handle: PropagatorHandle<P>) -> bool {
        self.is_subsumed
            .get(handle.propagator_id())
            .copied()
            .unwrap_or(false)
    }

    /// Tightens the lower bound of `var` without propagating; see
    /// [`State::propagate_to_fixpoint`].
    pub fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        let result = var.set_lower_bound(&mut self.assignments, bound);
        self.handle_decision_result(result)
    }

    /// Tightens the upper bound of `var` without propagating.
    pub fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        let result = var.set_upper_bound(&mut self.assignments, bound);
        self.handle_decision_result(result)
    }

    /// Fixes `var` to `value` without propagating.
    pub fn assign<Var: IntegerVariable>(&mut self, var: Var, value: i32) -> Result<(), EmptyDomain> {
        let result = var.assign(&mut self.assignments, value);
        self.handle_decision_result(result)
    }

    /// Removes `value` from the domain of `var` without propagating.
    pub fn remove<Var: IntegerVariable>(&mut self, var: Var, value: i32) -> Result<(), EmptyDomain> {
        let result = var.remove(&mut self.assignments, value);
        self.handle_decision_result(result)
    }

    fn handle_decision_result(
        &mut self,
        result: Result<(), EmptyDomain>,
    ) -> Result<(), EmptyDomain> {
        if result.is_err() {
            self.declare_infeasible();
        }
        result
    }

    /// Runs the enqueued propagators until no propagator can derive anything more, or until a
    /// conflict is found.
    pub fn propagate_to_fixpoint(&mut self) -> Result<(), Inconsistency> {
        if self.is_infeasible {
            return Err(Inconsistency::EmptyDomain);
        }

        self.notify_propagators(None);

        while let Some(propagator_id) = self.queue.pop() {
            if self.is_subsumed[propagator_id] {
                continue;
            }

            let delta = std::mem::take(&mut self.pending_events[propagator_id]);
            self.statistics.num_propagator_calls += 1;

            let context = PropagationContextMut::new(&mut self.assignments, delta);
            match self.propagators[propagator_id].propagate(context) {
                Ok(outcome) => {
                    if outcome == PropagationOutcome::Subsumed {
                        trace!("{propagator_id} is subsumed");
                        self.is_subsumed[propagator_id] = true;
                        self.statistics.num_subsumed_propagators += 1;
                    }
                    self.notify_propagators(Some((propagator_id, outcome)));
                }
                Err(inconsistency) => {
                    trace!(
                        "{} ({propagator_id}) failed: {inconsistency:?}",
                        self.propagators[propagator_id].name()
                    );
                    self.statistics.num_conflicts += 1;
                    let _ = self.assignments.drain_domain_events().count();
                    self.declare_infeasible();
                    return Err(inconsistency);
                }
            }
        }

        pumpkin_assert_simple!(!self.assignments.has_pending_events());
        Ok(())
    }

    /// Distributes the events which occurred since the last call to the subscribed propagators.
    ///
    /// The propagator which caused the events only receives them when it reported that it is not
    /// at a fixpoint.
    fn notify_propagators(&mut self, current: Option<(PropagatorId, PropagationOutcome)>) {
        for (event, domain) in self.assignments.drain_domain_events() {
            for propagator_id in self.watch_list.get_affected_propagators(event, domain) {
                if self.is_subsumed[propagator_id] {
                    continue;
                }
                if let Some((current_id, outcome)) = current {
                    if current_id == propagator_id
                        && outcome != PropagationOutcome::NotYetAtFixpoint
                    {
                        continue;
                    }
                }

                let _ = self.pending_events[propagator_id].insert(event);
                self.queue
                    .enqueue_propagator(propagator_id, self.propagators[propagator_id].priority());
            }
        }
    }

    /// Logs the statistics of the store and of every propagator, if statistic logging is
    /// configured (see [`crate::statistics::configure_statistic_logging`]).
    pub fn log_statistics(&self) {
        if !should_log_statistics() {
            return;
        }

        self.statistics.log(StatisticLogger::new("state"));
        for (index, propagator) in self.propagators.iter_propagators().enumerate() {
            propagator.log_statistics(StatisticLogger::new(format!(
                "{}_number_{index}",
                propagator.name()
            )));
        }
        log_statistic_postfix();
    }

    /// Runs a single propagator with the given delta, outside of the queue. Used to observe how a
    /// propagator reacts to a particular call.
    #[cfg(test)]
    pub(crate) fn propagate_single(
        &mut self,
        propagator_id: PropagatorId,
        delta: EnumSet<IntDomainEvent>,
    ) -> crate::basic_types::PropagationStatusCP {
        let context = PropagationContextMut::new(&mut self.assignments, delta);
        let result = self.propagators[propagator_id].propagate(context);
        let _ = self.assignments.drain_domain_events().count();
        result
    }
}
