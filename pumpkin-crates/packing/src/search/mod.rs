//! A small depth-first search over the [`State`], used to find solutions of packing models.
//!
//! The search selects the first unfixed variable in the given order and branches on `x = v`
//! followed by `x != v`. Every branch is explored on a clone of the store, so nothing has to be
//! undone when a branch fails.
mod depth_first_search;

pub use depth_first_search::*;

#[cfg(doc)]
use crate::State;
use crate::Solution;

/// The result of a call to [`DepthFirstSearch::satisfy`].
#[derive(Debug)]
pub enum SatisfactionResult {
    /// A solution was found.
    Satisfiable(Solution),
    /// The search space was exhausted without finding a solution.
    Unsatisfiable,
}
