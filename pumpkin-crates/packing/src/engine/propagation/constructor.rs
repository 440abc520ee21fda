use super::PropagationContext;
use super::Propagator;
use super::PropagatorId;
use crate::engine::domain_events::DomainEvents;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::WatchList;
use crate::engine::Watchers;

/// A propagator constructor creates a fully initialized instance of a [`Propagator`].
///
/// The constructor is responsible for indicating on which events the propagator should be
/// enqueued. Additionally, the propagator can be initialized with values that come from the
/// domains at the moment it is added to the [`crate::State`].
pub trait PropagatorConstructor {
    /// The propagator that is produced by this constructor.
    type PropagatorImpl: Propagator + Clone;

    /// Create the propagator instance from `Self`.
    fn create(self, context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl;
}

/// [`PropagatorConstructorContext`] is used when [`Propagator`]s are initialised after creation.
///
/// Propagators use it to subscribe to domain changes of variables and to retrieve the current
/// bounds of variables.
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    watch_list: &'a mut WatchList,
    assignments: &'a Assignments,
    propagator_id: PropagatorId,
}

impl<'a> PropagatorConstructorContext<'a> {
    pub(crate) fn new(
        watch_list: &'a mut WatchList,
        assignments: &'a Assignments,
        propagator_id: PropagatorId,
    ) -> Self {
        PropagatorConstructorContext {
            watch_list,
            assignments,
            propagator_id,
        }
    }

    /// Get domain information.
    pub fn domains(&self) -> PropagationContext<'_> {
        PropagationContext::new(self.assignments)
    }

    /// Subscribes the propagator to the given [`DomainEvents`] of `var`.
    ///
    /// [`DomainEvents::BOUNDS`] suffices for variables of which only the bounds are read;
    /// reasoning over the individual values of a domain requires [`DomainEvents::ANY_INT`].
    pub fn register(&mut self, var: impl IntegerVariable, domain_events: DomainEvents) {
        let mut watchers = Watchers::new(self.propagator_id, self.watch_list);
        var.watch_all(&mut watchers, domain_events.get_int_events());
    }
}
