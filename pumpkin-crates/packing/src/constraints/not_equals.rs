use super::Constraint;
use crate::propagators::BinaryNotEqualsPropagatorArgs;
use crate::variables::IntegerVariable;

/// Creates the [`Constraint`] `a != b`.
pub fn not_equals<AVar: IntegerVariable, BVar: IntegerVariable>(
    a: AVar,
    b: BVar,
) -> impl Constraint {
    BinaryNotEqualsPropagatorArgs { a, b }
}
