use downcast_rs::impl_downcast;
use downcast_rs::Downcast;
use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;

use super::PropagationContextMut;
use crate::basic_types::PropagationStatusCP;
#[cfg(doc)]
use crate::create_statistics_struct;
#[cfg(doc)]
use crate::engine::propagation::PropagatorConstructorContext;
use crate::statistics::StatisticLogger;

// Allows inspecting a `Box<dyn Propagator>` as its concrete type through a `PropagatorHandle`.
impl_downcast!(Propagator);

// Search clones the whole `State`, so `Box<dyn Propagator>` has to be cloneable.
clone_trait_object!(Propagator);

/// A propagator removes values from domains which will never be in any solution, or reports that
/// the current domains cannot be extended to a solution.
///
/// The only required functions are [`Propagator::name`] and [`Propagator::propagate`]; all other
/// functions have default implementations.
///
/// The state of a propagator is cloned together with the store it lives in; everything a
/// propagator keeps in its fields therefore belongs to one search branch. Scratch data which is
/// rebuilt in every call should not be kept in fields.
pub trait Propagator: Downcast + DynClone {
    /// Return the name of the propagator.
    ///
    /// This is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// Removes values from the domains of variables which cannot be part of any solution given
    /// the current domains, and detects conflicts.
    ///
    /// The context contains the change delta since the previous call: the union of the events on
    /// the variables which the propagator registered for (see
    /// [`PropagatorConstructorContext::register`]). The first call after the propagator was added
    /// receives all events.
    ///
    /// The returned [`crate::PropagationOutcome`] determines when the propagator runs again:
    /// - `Stable`: only after the domain of one of its variables is changed by someone else,
    /// - `NotYetAtFixpoint`: also after the changes it made itself,
    /// - `Subsumed`: never again in this branch.
    fn propagate(&mut self, context: PropagationContextMut<'_>) -> PropagationStatusCP;

    /// Returns the priority of the propagator represented as an integer. Lower values mean
    /// higher priority and the priority determines the order in which propagators will be asked
    /// to propagate. Cheap propagators should run before expensive ones.
    fn priority(&self) -> Priority {
        Priority::Low
    }

    /// Logs statistics of the propagator using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

/// The priority of a propagator, see [`Propagator::priority`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
    VeryLow = 3,
}

impl Priority {
    pub(crate) const NUM_PRIORITIES: usize = 4;
}
