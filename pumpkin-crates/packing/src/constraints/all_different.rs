use super::Constraint;
use crate::propagators::AllDifferentPropagatorArgs;
use crate::variables::IntegerVariable;

/// Creates the [`Constraint`] that enforces that all the given `variables` are distinct.
pub fn all_different<Var: IntegerVariable>(variables: impl Into<Box<[Var]>>) -> impl Constraint {
    AllDifferentPropagatorArgs {
        vars: variables.into(),
    }
}
