use std::ops::ControlFlow;

use log::trace;
use log::warn;

use super::SatisfactionResult;
use crate::basic_types::Random;
use crate::create_statistics_struct;
use crate::engine::variables::IntegerVariable;
use crate::engine::State;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::Solution;

create_statistics_struct!(
    /// Counters of a [`DepthFirstSearch`].
    SearchStatistics {
        /// The number of `x = v` decisions which were made.
        num_decisions: usize,
        /// The number of branches which failed during propagation.
        num_failures: usize,
        num_solutions: usize,
    }
);

/// Depth-first search which branches over `variables` in the order in which they are given.
///
/// By default the smallest value in the domain is tried first; [`DepthFirstSearch::with_random_values`]
/// picks a value uniformly at random from the domain instead.
#[derive(Debug)]
pub struct DepthFirstSearch<Var> {
    variables: Vec<Var>,
    random: Option<Box<dyn Random>>,
    statistics: SearchStatistics,
}

impl<Var: IntegerVariable> DepthFirstSearch<Var> {
    pub fn new(variables: impl Into<Vec<Var>>) -> Self {
        let variables = variables.into();
        if variables.is_empty() {
            warn!("The DepthFirstSearch does not contain any variables");
        }

        DepthFirstSearch {
            variables,
            random: None,
            statistics: SearchStatistics::default(),
        }
    }

    pub fn with_random_values(mut self, random: impl Random + 'static) -> Self {
        self.random = Some(Box::new(random));
        self
    }

    /// Searches for a single solution. The `state` itself is propagated but otherwise left as it
    /// is; the branches are explored on clones of it.
    pub fn satisfy(&mut self, state: &mut State) -> SatisfactionResult {
        let mut result = SatisfactionResult::Unsatisfiable;
        self.run(state, &mut |solution| {
            result = SatisfactionResult::Satisfiable(solution.clone());
            ControlFlow::Break(())
        });
        result
    }

    /// Calls `on_solution` for every solution, and returns the number of solutions.
    ///
    /// Solutions differ in the values of the search variables; variables which are not part of the
    /// search are not enumerated.
    pub fn for_each_solution(
        &mut self,
        state: &mut State,
        mut on_solution: impl FnMut(&Solution),
    ) -> usize {
        let num_solutions_before = self.statistics.num_solutions;
        self.run(state, &mut |solution| {
            on_solution(solution);
            ControlFlow::Continue(())
        });
        self.statistics.num_solutions - num_solutions_before
    }

    fn run(
        &mut self,
        state: &mut State,
        on_solution: &mut dyn FnMut(&Solution) -> ControlFlow<()>,
    ) {
        if state.propagate_to_fixpoint().is_ok() {
            let _ = self.search(state.clone(), on_solution);
        } else {
            self.statistics.num_failures += 1;
        }

        if should_log_statistics() {
            self.statistics.log(StatisticLogger::new("search"));
            state.log_statistics();
        }
    }

    /// Explores the subtree below `state`, which has to be at a fixpoint.
    fn search(
        &mut self,
        mut state: State,
        on_solution: &mut dyn FnMut(&Solution) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let Some(variable) = self
            .variables
            .iter()
            .find(|variable| !state.is_fixed((*variable).clone()))
            .cloned()
        else {
            self.statistics.num_solutions += 1;
            return on_solution(&Solution::from(state.assignments().clone()));
        };

        let value = self.select_value(&state, &variable);
        trace!("Branching on {variable:?} = {value}");
        self.statistics.num_decisions += 1;

        let mut assigned = state.clone();
        if assigned.assign(variable.clone(), value).is_ok() && assigned.propagate_to_fixpoint().is_ok()
        {
            self.search(assigned, on_solution)?;
        } else {
            self.statistics.num_failures += 1;
        }

        if state.remove(variable, value).is_ok() && state.propagate_to_fixpoint().is_ok() {
            self.search(state, on_solution)
        } else {
            self.statistics.num_failures += 1;
            ControlFlow::Continue(())
        }
    }

    fn select_value(&mut self, state: &State, variable: &Var) -> i32 {
        match self.random.as_mut() {
            Some(random) => {
                let values = variable
                    .iterate_domain(state.assignments())
                    .collect::<Vec<_>>();
                values[random.generate_usize_in_range(0..values.len())]
            }
            None => state.lower_bound(variable.clone()),
        }
    }
}
