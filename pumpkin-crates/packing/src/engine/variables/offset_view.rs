use std::fmt::Debug;

use enumset::EnumSet;

use crate::engine::domain_events::IntDomainEvent;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::Watchers;

/// Models `y = x + offset` by expressing the domain of `y` as a translation of the domain of `x`.
///
/// Unlike the variable it wraps, the offset of the view can be changed. The packing propagator
/// keeps one view per bin load and lowers its offset by the size of every item which gets fixed
/// to that bin, so that the view only describes the load which is not yet committed.
#[derive(Clone, Copy, Hash, Eq, PartialEq)]
pub struct OffsetView<Inner> {
    inner: Inner,
    offset: i32,
}

impl<Inner> OffsetView<Inner> {
    pub fn new(inner: Inner, offset: i32) -> Self {
        OffsetView { inner, offset }
    }

    pub fn inner(&self) -> &Inner {
        &self.inner
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
    }
}

impl<Var: IntegerVariable> IntegerVariable for OffsetView<Var> {
    fn lower_bound(&self, assignment: &Assignments) -> i32 {
        self.inner.lower_bound(assignment) + self.offset
    }

    fn upper_bound(&self, assignment: &Assignments) -> i32 {
        self.inner.upper_bound(assignment) + self.offset
    }

    fn contains(&self, assignment: &Assignments, value: i32) -> bool {
        self.inner.contains(assignment, value - self.offset)
    }

    fn iterate_domain(&self, assignment: &Assignments) -> impl Iterator<Item = i32> {
        let offset = self.offset;
        self.inner
            .iterate_domain(assignment)
            .map(move |value| value + offset)
    }

    fn set_lower_bound(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        self.inner.set_lower_bound(assignment, value - self.offset)
    }

    fn set_upper_bound(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        self.inner.set_upper_bound(assignment, value - self.offset)
    }

    fn assign(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        self.inner.assign(assignment, value - self.offset)
    }

    fn remove(&self, assignment: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        self.inner.remove(assignment, value - self.offset)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<IntDomainEvent>) {
        self.inner.watch_all(watchers, events);
    }
}

impl<Var: Debug> Debug for OffsetView<Var> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.offset == 0 {
            write!(f, "{:?}", self.inner)
        } else {
            write!(f, "{:?} + {}", self.inner, self.offset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_shifted_by_the_offset() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(2, 9);
        let view = OffsetView::new(domain, -3);

        assert_eq!(view.lower_bound(&assignments), -1);
        assert_eq!(view.upper_bound(&assignments), 6);

        view.set_upper_bound(&mut assignments, 4)
            .expect("non-empty domain");
        assert_eq!(assignments.get_upper_bound(domain), 7);
    }

    #[test]
    fn changing_the_offset_moves_the_view() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(0, 3);
        let mut view = OffsetView::new(domain, 0);

        view.set_offset(view.offset() - 2);

        assert_eq!(view.iterate_domain(&assignments).collect::<Vec<_>>(), vec![-2, -1, 0, 1]);
        assert!(view.contains(&assignments, -2));
        assert!(!view.contains(&assignments, 2));
    }
}
