use crate::engine::variables::IntegerVariable;
use crate::engine::Assignments;

/// An assignment of all variables of a [`crate::State`], as found by the search.
#[derive(Clone, Debug, Default)]
pub struct Solution {
    assignments: Assignments,
}

impl Solution {
    /// Returns the number of variables in the solution.
    pub fn num_domains(&self) -> usize {
        self.assignments.num_domains()
    }

    /// Returns the value of `var`. Every variable which was part of the search is fixed in a
    /// solution; for other variables this is the lower bound of their final domain.
    pub fn value<Var: IntegerVariable>(&self, var: Var) -> i32 {
        var.lower_bound(&self.assignments)
    }

    /// Whether `var` is fixed in this solution.
    pub fn is_fixed<Var: IntegerVariable>(&self, var: Var) -> bool {
        var.lower_bound(&self.assignments) == var.upper_bound(&self.assignments)
    }
}

impl From<Assignments> for Solution {
    fn from(assignments: Assignments) -> Self {
        Solution { assignments }
    }
}
