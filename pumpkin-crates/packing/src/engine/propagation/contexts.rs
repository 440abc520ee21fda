use enumset::EnumSet;

use crate::engine::domain_events::IntDomainEvent;
use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;

/// Read-only access to the domains, given to propagators when they are constructed.
#[derive(Clone, Copy, Debug)]
pub struct PropagationContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }
}

/// The context in which a propagator runs.
///
/// Besides access to the domains, it provides the change delta of the call: the events which
/// occurred on the variables of the propagator since its previous call. The context also keeps
/// track of whether the propagator modified a domain itself.
#[derive(Debug)]
pub struct PropagationContextMut<'a> {
    assignments: &'a mut Assignments,
    delta: EnumSet<IntDomainEvent>,
    modified_domains: bool,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(assignments: &'a mut Assignments, delta: EnumSet<IntDomainEvent>) -> Self {
        PropagationContextMut {
            assignments,
            delta,
            modified_domains: false,
        }
    }

    /// The events which occurred on the subscribed variables since the previous call of the
    /// propagator. The first call after posting receives every event.
    pub fn delta(&self) -> EnumSet<IntDomainEvent> {
        self.delta
    }

    /// Whether any domain was changed through this context.
    pub fn has_modified_domains(&self) -> bool {
        self.modified_domains
    }

    pub fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext {
            assignments: self.assignments,
        }
    }
}

pub trait HasAssignments {
    fn assignments(&self) -> &Assignments;
}

mod private {
    use super::*;

    impl HasAssignments for PropagationContext<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }

    impl HasAssignments for PropagationContextMut<'_> {
        fn assignments(&self) -> &Assignments {
            self.assignments
        }
    }
}

pub trait ReadDomains: HasAssignments {
    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    fn fixed_value<Var: IntegerVariable>(&self, var: &Var) -> Option<i32> {
        if self.is_fixed(var) {
            Some(self.lower_bound(var))
        } else {
            None
        }
    }

    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments())
    }

    fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.assignments(), value)
    }

    fn iterate_domain<'this, Var: IntegerVariable>(
        &'this self,
        var: &'this Var,
    ) -> impl Iterator<Item = i32> + 'this {
        var.iterate_domain(self.assignments())
    }
}

impl<T: HasAssignments> ReadDomains for T {}

impl PropagationContextMut<'_> {
    pub fn remove<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> Result<(), EmptyDomain> {
        if var.contains(self.assignments, value) {
            self.modified_domains = true;
            return var.remove(self.assignments, value);
        }
        Ok(())
    }

    pub fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        if bound < var.upper_bound(self.assignments) {
            self.modified_domains = true;
            return var.set_upper_bound(self.assignments, bound);
        }
        Ok(())
    }

    pub fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        if bound > var.lower_bound(self.assignments) {
            self.modified_domains = true;
            return var.set_lower_bound(self.assignments, bound);
        }
        Ok(())
    }

    pub fn assign<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> Result<(), EmptyDomain> {
        if !var.contains(self.assignments, value) {
            return Err(EmptyDomain);
        }
        if var.lower_bound(self.assignments) != var.upper_bound(self.assignments) {
            self.modified_domains = true;
            return var.assign(self.assignments, value);
        }
        Ok(())
    }
}
