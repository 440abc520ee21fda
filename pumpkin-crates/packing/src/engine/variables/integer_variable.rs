use std::fmt::Debug;

use enumset::EnumSet;

use crate::engine::domain_events::IntDomainEvent;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::Watchers;

/// A trait specifying the required behaviour of an integer variable such as retrieving a
/// lower-bound ([`IntegerVariable::lower_bound`]).
pub trait IntegerVariable: Clone + Debug + 'static {
    /// Get the lower bound of the variable.
    fn lower_bound(&self, assignment: &Assignments) -> i32;

    /// Get the upper bound of the variable.
    fn upper_bound(&self, assignment: &Assignments) -> i32;

    /// Determine whether the value is in the domain of this variable.
    fn contains(&self, assignment: &Assignments, value: i32) -> bool;

    /// Iterate over the values of the domain in increasing order.
    fn iterate_domain(&self, assignment: &Assignments) -> impl Iterator<Item = i32>;

    /// Remove all values below `value` from the domain.
    fn set_lower_bound(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain>;

    /// Remove all values above `value` from the domain.
    fn set_upper_bound(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain>;

    /// Reduce the domain to `value`.
    fn assign(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain>;

    /// Remove `value` from the domain.
    fn remove(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain>;

    /// Register a watch for this variable on the given domain events.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>);
}
