use crate::containers::KeyedVec;
use crate::engine::domain_events::IntDomainEvent;
use crate::engine::variables::DomainId;
use crate::engine::EventSink;
use crate::pumpkin_assert_moderate;
use crate::pumpkin_assert_simple;

/// The domains of all integer variables in a [`crate::State`].
///
/// Every modification records the corresponding [`IntDomainEvent`]s which the store later
/// distributes to the subscribed propagators.
#[derive(Clone, Debug, Default)]
pub struct Assignments {
    domains: KeyedVec<DomainId, IntegerDomain>,
    events: EventSink,
}

/// Returned when a modification would leave a domain without values. The domain itself is left
/// untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EmptyDomain;

impl Assignments {
    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        pumpkin_assert_simple!(
            lower_bound <= upper_bound,
            "Cannot create a variable with an empty domain [{lower_bound}, {upper_bound}]"
        );

        self.events.grow();
        self.domains
            .push(IntegerDomain::new(lower_bound, upper_bound))
    }

    pub(crate) fn create_new_integer_variable_sparse(&mut self, mut values: Vec<i32>) -> DomainId {
        pumpkin_assert_simple!(
            !values.is_empty(),
            "Cannot create a variable with an empty domain"
        );

        values.sort();
        let lower_bound = values[0];
        let upper_bound = values[values.len() - 1];

        let mut domain = IntegerDomain::new(lower_bound, upper_bound);
        domain.is_present.iter_mut().for_each(|present| *present = false);
        domain.size = 0;
        for value in values {
            let index = domain.index_of(value);
            if !domain.is_present[index] {
                domain.is_present[index] = true;
                domain.size += 1;
            }
        }

        self.events.grow();
        self.domains.push(domain)
    }

    pub fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    pub fn get_initial_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].initial_lower_bound
    }

    pub fn get_initial_upper_bound(&self, domain_id: DomainId) -> i32 {
        let domain = &self.domains[domain_id];
        domain.initial_lower_bound + domain.is_present.len() as i32 - 1
    }

    pub fn get_domain_size(&self, domain_id: DomainId) -> usize {
        self.domains[domain_id].size
    }

    pub fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    pub fn is_domain_assigned(&self, domain_id: DomainId) -> bool {
        let domain = &self.domains[domain_id];
        domain.lower_bound == domain.upper_bound
    }

    pub fn get_assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        if self.is_domain_assigned(domain_id) {
            Some(self.domains[domain_id].lower_bound)
        } else {
            None
        }
    }

    /// Iterates over the values in the domain in increasing order.
    pub fn get_domain_iterator(&self, domain_id: DomainId) -> impl Iterator<Item = i32> + '_ {
        let domain = &self.domains[domain_id];
        (domain.lower_bound..=domain.upper_bound).filter(move |&value| domain.contains(value))
    }

    pub(crate) fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        new_lower_bound: i32,
    ) -> Result<(), EmptyDomain> {
        let domain = &mut self.domains[domain_id];

        if new_lower_bound <= domain.lower_bound {
            return Ok(());
        }
        if new_lower_bound > domain.upper_bound {
            return Err(EmptyDomain);
        }

        for value in domain.lower_bound..new_lower_bound {
            domain.erase(value);
        }
        domain.lower_bound = new_lower_bound;
        domain.settle_lower_bound();

        self.events
            .event_occurred(IntDomainEvent::LowerBound, domain_id);
        if domain.lower_bound == domain.upper_bound {
            self.events.event_occurred(IntDomainEvent::Assign, domain_id);
        }

        Ok(())
    }

    pub(crate) fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        new_upper_bound: i32,
    ) -> Result<(), EmptyDomain> {
        let domain = &mut self.domains[domain_id];

        if new_upper_bound >= domain.upper_bound {
            return Ok(());
        }
        if new_upper_bound < domain.lower_bound {
            return Err(EmptyDomain);
        }

        for value in new_upper_bound + 1..=domain.upper_bound {
            domain.erase(value);
        }
        domain.upper_bound = new_upper_bound;
        domain.settle_upper_bound();

        self.events
            .event_occurred(IntDomainEvent::UpperBound, domain_id);
        if domain.lower_bound == domain.upper_bound {
            self.events.event_occurred(IntDomainEvent::Assign, domain_id);
        }

        Ok(())
    }

    pub(crate) fn make_assignment(
        &mut self,
        domain_id: DomainId,
        assigned_value: i32,
    ) -> Result<(), EmptyDomain> {
        if !self.is_value_in_domain(domain_id, assigned_value) {
            return Err(EmptyDomain);
        }

        self.tighten_lower_bound(domain_id, assigned_value)?;
        self.tighten_upper_bound(domain_id, assigned_value)?;

        pumpkin_assert_moderate!(self.is_domain_assigned(domain_id));
        Ok(())
    }

    pub(crate) fn remove_value_from_domain(
        &mut self,
        domain_id: DomainId,
        removed_value: i32,
    ) -> Result<(), EmptyDomain> {
        let domain = &mut self.domains[domain_id];

        if !domain.contains(removed_value) {
            return Ok(());
        }
        if domain.size == 1 {
            return Err(EmptyDomain);
        }

        domain.erase(removed_value);
        self.events.event_occurred(IntDomainEvent::Removal, domain_id);

        if removed_value == domain.lower_bound {
            domain.settle_lower_bound();
            self.events
                .event_occurred(IntDomainEvent::LowerBound, domain_id);
        } else if removed_value == domain.upper_bound {
            domain.settle_upper_bound();
            self.events
                .event_occurred(IntDomainEvent::UpperBound, domain_id);
        }

        if domain.lower_bound == domain.upper_bound {
            self.events.event_occurred(IntDomainEvent::Assign, domain_id);
        }

        Ok(())
    }

    pub(crate) fn drain_domain_events(
        &mut self,
    ) -> impl Iterator<Item = (IntDomainEvent, DomainId)> + '_ {
        self.events.drain()
    }

    pub(crate) fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }
}

/// An explicit domain: the bounds together with a flag for every value between the initial
/// bounds. The bounds are always values of the domain.
#[derive(Clone, Debug)]
struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
    initial_lower_bound: i32,
    is_present: Box<[bool]>,
    size: usize,
}

impl IntegerDomain {
    fn new(lower_bound: i32, upper_bound: i32) -> IntegerDomain {
        let size = (upper_bound as i64 - lower_bound as i64 + 1) as usize;
        IntegerDomain {
            lower_bound,
            upper_bound,
            initial_lower_bound: lower_bound,
            is_present: vec![true; size].into_boxed_slice(),
            size,
        }
    }

    fn index_of(&self, value: i32) -> usize {
        (value as i64 - self.initial_lower_bound as i64) as usize
    }

    fn contains(&self, value: i32) -> bool {
        self.lower_bound <= value && value <= self.upper_bound && self.is_present[self.index_of(value)]
    }

    fn erase(&mut self, value: i32) {
        let index = self.index_of(value);
        if self.is_present[index] {
            self.is_present[index] = false;
            self.size -= 1;
        }
    }

    fn settle_lower_bound(&mut self) {
        while !self.is_present[self.index_of(self.lower_bound)] {
            self.lower_bound += 1;
        }
    }

    fn settle_upper_bound(&mut self) {
        while !self.is_present[self.index_of(self.upper_bound)] {
            self.upper_bound -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(assignments: &mut Assignments) -> Vec<(IntDomainEvent, DomainId)> {
        assignments.drain_domain_events().collect()
    }

    #[test]
    fn lower_bound_skips_removed_values() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(0, 10);

        assignments
            .remove_value_from_domain(domain, 3)
            .expect("non-empty domain");
        assignments
            .tighten_lower_bound(domain, 3)
            .expect("non-empty domain");

        assert_eq!(assignments.get_lower_bound(domain), 4);
        assert_eq!(assignments.get_domain_size(domain), 7);
    }

    #[test]
    fn removing_the_upper_bound_tightens_it() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(0, 3);
        let _ = drain(&mut assignments);

        assignments
            .remove_value_from_domain(domain, 3)
            .expect("non-empty domain");

        assert_eq!(assignments.get_upper_bound(domain), 2);
        assert_eq!(
            drain(&mut assignments),
            vec![
                (IntDomainEvent::Removal, domain),
                (IntDomainEvent::UpperBound, domain)
            ]
        );
    }

    #[test]
    fn assignment_is_reported_once() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(0, 3);

        assignments.make_assignment(domain, 2).expect("2 is in the domain");

        let events = drain(&mut assignments);
        assert_eq!(
            events
                .iter()
                .filter(|(event, _)| *event == IntDomainEvent::Assign)
                .count(),
            1
        );
        assert_eq!(assignments.get_assigned_value(domain), Some(2));
    }

    #[test]
    fn empty_domain_leaves_domain_untouched() {
        let mut assignments = Assignments::default();
        let domain = assignments.grow(1, 5);

        assert_eq!(assignments.tighten_lower_bound(domain, 6), Err(EmptyDomain));
        assert_eq!(assignments.tighten_upper_bound(domain, 0), Err(EmptyDomain));
        assert_eq!(assignments.get_lower_bound(domain), 1);
        assert_eq!(assignments.get_upper_bound(domain), 5);
    }

    #[test]
    fn removing_the_last_value_fails() {
        let mut assignments = Assignments::default();
        let domain = assignments.create_new_integer_variable_sparse(vec![4]);

        assert_eq!(
            assignments.remove_value_from_domain(domain, 4),
            Err(EmptyDomain)
        );
    }

    #[test]
    fn sparse_domains_iterate_their_values() {
        let mut assignments = Assignments::default();
        let domain = assignments.create_new_integer_variable_sparse(vec![7, 1, 4, 4]);

        assert_eq!(
            assignments.get_domain_iterator(domain).collect::<Vec<_>>(),
            vec![1, 4, 7]
        );
        assert!(!assignments.is_value_in_domain(domain, 2));
        assert_eq!(assignments.get_initial_upper_bound(domain), 7);
    }
}
