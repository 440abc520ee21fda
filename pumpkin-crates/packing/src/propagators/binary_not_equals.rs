use crate::basic_types::ConflictKind;
use crate::basic_types::PropagationOutcome;
use crate::basic_types::PropagationStatusCP;
use crate::engine::propagation::DomainEvents;
use crate::engine::propagation::Priority;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`BinaryNotEqualsPropagator`].
#[derive(Clone, Debug)]
pub struct BinaryNotEqualsPropagatorArgs<AVar, BVar> {
    pub a: AVar,
    pub b: BVar,
}

impl<AVar, BVar> PropagatorConstructor for BinaryNotEqualsPropagatorArgs<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    type PropagatorImpl = BinaryNotEqualsPropagator<AVar, BVar>;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        let BinaryNotEqualsPropagatorArgs { a, b } = self;

        // We only care about the case where one of the two is assigned
        context.register(a.clone(), DomainEvents::ASSIGN);
        context.register(b.clone(), DomainEvents::ASSIGN);

        BinaryNotEqualsPropagator { a, b }
    }
}

/// Propagator for the constraint `a != b`.
#[derive(Clone, Debug)]
pub struct BinaryNotEqualsPropagator<AVar, BVar> {
    a: AVar,
    b: BVar,
}

impl<AVar, BVar> Propagator for BinaryNotEqualsPropagator<AVar, BVar>
where
    AVar: IntegerVariable,
    BVar: IntegerVariable,
{
    fn priority(&self) -> Priority {
        Priority::High
    }

    fn name(&self) -> &str {
        "BinaryNotEq"
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatusCP {
        let a_lb = context.lower_bound(&self.a);
        let a_ub = context.upper_bound(&self.a);

        let b_lb = context.lower_bound(&self.b);
        let b_ub = context.upper_bound(&self.b);

        if a_lb == a_ub && b_lb == b_ub && a_lb == b_lb {
            return Err(ConflictKind::EqualValues.into());
        }

        if a_ub < b_lb || b_ub < a_lb {
            // The domains are non-overlapping
            return Ok(PropagationOutcome::Subsumed);
        }

        if a_lb == a_ub {
            context.remove(&self.b, a_lb)?;
            return Ok(PropagationOutcome::Subsumed);
        }

        if b_lb == b_ub {
            context.remove(&self.a, b_lb)?;
            return Ok(PropagationOutcome::Subsumed);
        }

        Ok(PropagationOutcome::Stable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_solver::TestSolver;

    #[test]
    fn detects_conflicts() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(1, 1);
        let b = solver.new_variable(1, 1);

        let result = solver.new_propagator(BinaryNotEqualsPropagatorArgs { a, b });

        assert!(result.is_err());
    }

    #[test]
    fn removes_the_value_of_a_fixed_variable() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(2, 2);
        let b = solver.new_variable(1, 3);

        let handle = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("no empty domains");

        assert!(!solver.contains(b, 2));
        assert!(solver.state.is_subsumed(handle));
    }

    #[test]
    fn waits_until_a_variable_is_fixed() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 2);
        let b = solver.new_variable(0, 2);

        let _ = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("no empty domains");
        solver.assert_bounds(b, 0, 2);

        solver
            .assign_and_notify(b, 0)
            .expect("a can take another value");
        solver.assert_bounds(a, 1, 2);
    }
}
