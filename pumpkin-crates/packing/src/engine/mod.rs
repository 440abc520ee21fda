//! The constraint store which hosts the propagators: variables with explicit domains, the
//! propagators and their subscriptions, and the queue which runs them to a fixpoint.
mod assignments;
pub(crate) mod domain_events;
mod event_sink;
pub(crate) mod propagation;
mod propagator_queue;
mod state;
#[cfg(test)]
pub(crate) mod test_solver;
pub(crate) mod variables;
mod watch_list;

pub use assignments::Assignments;
pub use assignments::EmptyDomain;
pub(crate) use event_sink::EventSink;
pub(crate) use propagator_queue::PropagatorQueue;
pub use state::State;
pub(crate) use watch_list::WatchList;
pub use watch_list::Watchers;
