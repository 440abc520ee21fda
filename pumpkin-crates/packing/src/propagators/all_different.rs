use crate::basic_types::ConflictKind;
use crate::basic_types::PropagationOutcome;
use crate::basic_types::PropagationStatusCP;
use crate::containers::HashSet;
use crate::engine::propagation::DomainEvents;
use crate::engine::propagation::Priority;
use crate::engine::propagation::PropagationContextMut;
use crate::engine::propagation::Propagator;
use crate::engine::propagation::PropagatorConstructor;
use crate::engine::propagation::PropagatorConstructorContext;
use crate::engine::propagation::ReadDomains;
use crate::engine::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`AllDifferentPropagator`].
#[derive(Clone, Debug)]
pub struct AllDifferentPropagatorArgs<Var> {
    pub vars: Box<[Var]>,
}

impl<Var> PropagatorConstructor for AllDifferentPropagatorArgs<Var>
where
    Var: IntegerVariable,
{
    type PropagatorImpl = AllDifferentPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext<'_>) -> Self::PropagatorImpl {
        let AllDifferentPropagatorArgs { vars } = self;

        for var in vars.iter() {
            context.register(var.clone(), DomainEvents::ANY_INT);
        }

        AllDifferentPropagator { vars }
    }
}

/// Propagator for the constraint that all variables take pairwise different values.
///
/// The value of every fixed variable is removed from the other domains; besides that the
/// propagator fails when the variables together have fewer values than there are variables.
#[derive(Clone, Debug)]
pub struct AllDifferentPropagator<Var> {
    vars: Box<[Var]>,
}

impl<Var: IntegerVariable> Propagator for AllDifferentPropagator<Var> {
    fn name(&self) -> &str {
        "AllDifferent"
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn propagate(&mut self, mut context: PropagationContextMut<'_>) -> PropagationStatusCP {
        let mut fixed_values: HashSet<(usize, i32)> = HashSet::default();
        let mut num_fixed_before = usize::MAX;

        // Removing a value can fix another variable, so repeat until no variable becomes fixed.
        while num_fixed_before != fixed_values.len() {
            num_fixed_before = fixed_values.len();

            for index in 0..self.vars.len() {
                let Some(value) = context.fixed_value(&self.vars[index]) else {
                    continue;
                };
                if !fixed_values.insert((index, value)) {
                    continue;
                }

                for (other_index, other) in self.vars.iter().enumerate() {
                    if other_index == index {
                        continue;
                    }
                    if context.fixed_value(other) == Some(value) {
                        return Err(ConflictKind::EqualValues.into());
                    }
                    context.remove(other, value)?;
                }
            }
        }

        if fixed_values.len() == self.vars.len() {
            return Ok(PropagationOutcome::Subsumed);
        }

        let values = self
            .vars
            .iter()
            .flat_map(|var| context.iterate_domain(var))
            .collect::<HashSet<i32>>();
        if values.len() < self.vars.len() {
            return Err(ConflictKind::TooFewValues {
                variables: self.vars.len(),
                values: values.len(),
            }
            .into());
        }

        Ok(PropagationOutcome::Stable)
    }
}
