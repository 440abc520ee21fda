//! Contains the interface between the store and the propagators.
//!
//! A propagator is created by a [`PropagatorConstructor`], which subscribes it to changes of its
//! variables through the [`PropagatorConstructorContext`]. Every time one of those variables
//! changes, the store enqueues the propagator; when it is popped from the queue its
//! [`Propagator::propagate`] method is called with a [`PropagationContextMut`] which gives access
//! to the domains and the change delta since its previous call.
mod constructor;
mod contexts;
mod propagator;
mod propagator_id;
mod store;

pub use constructor::PropagatorConstructor;
pub use constructor::PropagatorConstructorContext;
pub use contexts::HasAssignments;
pub use contexts::PropagationContext;
pub use contexts::PropagationContextMut;
pub use contexts::ReadDomains;
pub use propagator::Priority;
pub use propagator::Propagator;
pub use propagator_id::PropagatorHandle;
pub use propagator_id::PropagatorId;
pub(crate) use store::PropagatorStore;

pub use crate::engine::domain_events::DomainEvents;
pub use crate::engine::domain_events::IntDomainEvent;
