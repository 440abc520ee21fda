//! A graph over items which can never be put into the same bin.
//!
//! The bins of the items of a clique in this graph are pairwise different. [`ConflictGraph::post`]
//! searches for cliques and posts a distinctness constraint over the bins of every clique it
//! finds; a clique with more items than bins shows that no packing exists.
mod node_set;

use log::debug;
use node_set::NodeSet;

use crate::basic_types::ConstraintOperationError;
use crate::engine::variables::IntegerVariable;
use crate::engine::State;
use crate::propagators::AllDifferentPropagatorArgs;
use crate::propagators::BinaryNotEqualsPropagatorArgs;
use crate::pumpkin_assert_eq_simple;
use crate::pumpkin_assert_moderate;

#[derive(Clone, Debug)]
struct Node {
    neighbours: NodeSet,
    degree: usize,
    /// The degree before the graph is reduced.
    weight: usize,
}

#[derive(Clone, Debug)]
struct Clique {
    nodes: NodeSet,
    cardinality: usize,
    weight: usize,
}

impl Clique {
    fn new(num_nodes: usize) -> Self {
        Clique {
            nodes: NodeSet::new(num_nodes),
            cardinality: 0,
            weight: 0,
        }
    }

    fn include(&mut self, node: usize, weight: usize) {
        self.nodes.insert(node);
        self.cardinality += 1;
        self.weight += weight;
    }

    fn exclude(&mut self, node: usize, weight: usize) {
        self.nodes.remove(node);
        self.cardinality -= 1;
        self.weight -= weight;
    }
}

/// The conflict graph between the items whose bins are given by `bins`.
///
/// Node `i` corresponds to the item with bin `bins[i]`. The constraints which are found are
/// posted to the [`State`] the graph is created with.
#[derive(Debug)]
pub struct ConflictGraph<'a, Var> {
    state: &'a mut State,
    bins: &'a [Var],
    num_bins: usize,
    nodes: Vec<Node>,
    current: Clique,
    max: Clique,
}

impl<'a, Var: IntegerVariable> ConflictGraph<'a, Var> {
    pub fn new(state: &'a mut State, bins: &'a [Var], num_bins: usize) -> Self {
        let num_nodes = bins.len();
        ConflictGraph {
            state,
            bins,
            num_bins,
            nodes: (0..num_nodes)
                .map(|_| Node {
                    neighbours: NodeSet::new(num_nodes),
                    degree: 0,
                    weight: 0,
                })
                .collect(),
            current: Clique::new(num_nodes),
            max: Clique::new(num_nodes),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Records that items `i` and `j` cannot share a bin.
    pub fn add_edge(&mut self, i: usize, j: usize) {
        pumpkin_assert_moderate!(i != j && !self.adjacent(i, j));

        for (from, to) in [(i, j), (j, i)] {
            let node = &mut self.nodes[from];
            node.neighbours.insert(to);
            node.degree += 1;
            node.weight += 1;
        }
    }

    /// Removes the edge between `i` and `j`; the weights of the nodes are kept.
    fn remove_edge(&mut self, i: usize, j: usize) {
        pumpkin_assert_moderate!(self.adjacent(i, j));

        for (from, to) in [(i, j), (j, i)] {
            let node = &mut self.nodes[from];
            node.neighbours.remove(to);
            node.degree -= 1;
        }
    }

    pub fn adjacent(&self, i: usize, j: usize) -> bool {
        self.nodes[i].neighbours.contains(j)
    }

    /// Posts a distinctness constraint for the cliques in the graph.
    ///
    /// Nodes of degree one and two are handled first, their cliques are found directly. The
    /// maximal cliques of the remaining graph are enumerated with the algorithm of Bron and
    /// Kerbosch. Returns an error if a clique has more nodes than there are bins, or if one of the
    /// posted constraints fails at the root.
    pub fn post(&mut self) -> Result<(), ConstraintOperationError> {
        // A node can be pushed a second time after its degree dropped from two to one.
        let mut stack = (0..self.num_nodes())
            .filter(|&node| matches!(self.nodes[node].degree, 1 | 2))
            .collect::<Vec<_>>();

        while let Some(i) = stack.pop() {
            match self.nodes[i].degree {
                0 => {}
                1 => {
                    let j = self.first_neighbour(i);
                    self.report(&[i, j])?;
                    self.remove_edge(i, j);

                    if matches!(self.nodes[j].degree, 1 | 2) {
                        stack.push(j);
                    }
                }
                2 => {
                    let neighbours = {
                        let mut neighbours = self.nodes[i].neighbours.iter();
                        (neighbours.next(), neighbours.next())
                    };
                    let (Some(j), Some(k)) = neighbours else {
                        unreachable!("a node of degree two has two neighbours");
                    };

                    if self.adjacent(j, k) {
                        self.report(&[i, j, k])?;
                        // Otherwise the edge can still be part of another clique.
                        if self.nodes[j].degree == 2 || self.nodes[k].degree == 2 {
                            self.remove_edge(j, k);
                        }
                    } else {
                        self.report(&[i, j])?;
                        self.report(&[i, k])?;
                    }
                    self.remove_edge(i, j);
                    self.remove_edge(i, k);

                    for neighbour in [j, k] {
                        if matches!(self.nodes[neighbour].degree, 1 | 2) {
                            stack.push(neighbour);
                        }
                    }
                }
                _ => unreachable!("degrees only decrease while peeling"),
            }
        }

        let mut candidates = NodeSet::new(self.num_nodes());
        for node in 0..self.num_nodes() {
            if self.nodes[node].degree > 0 {
                candidates.insert(node);
            } else {
                self.report(&[node])?;
            }
        }

        if !candidates.is_empty() {
            let mut excluded = NodeSet::new(self.num_nodes());
            self.bron_kerbosch(&mut candidates, &mut excluded)?;
        }

        debug!(
            "largest clique in the conflict graph has {} of {} items",
            self.max.cardinality,
            self.num_nodes()
        );

        Ok(())
    }

    /// The nodes of the largest clique found by [`ConflictGraph::post`]; among cliques of the
    /// same size the one with the largest weight.
    pub fn max_clique(&self) -> Vec<usize> {
        self.max.nodes.iter().collect()
    }

    fn first_neighbour(&self, node: usize) -> usize {
        self.nodes[node]
            .neighbours
            .iter()
            .next()
            .unwrap_or_else(|| unreachable!("the node has a neighbour"))
    }

    /// The node in `candidates` or `excluded` with the largest degree.
    fn pivot(&self, candidates: &NodeSet, excluded: &NodeSet) -> usize {
        candidates
            .iter()
            .chain(excluded.iter())
            .max_by_key(|&node| self.nodes[node].degree)
            .unwrap_or_else(|| unreachable!("the search never runs on empty sets"))
    }

    fn bron_kerbosch(
        &mut self,
        candidates: &mut NodeSet,
        excluded: &mut NodeSet,
    ) -> Result<(), ConstraintOperationError> {
        let pivot = self.pivot(candidates, excluded);

        let mut branches = candidates.clone();
        branches.difference_with(&self.nodes[pivot].neighbours);

        let mut next_candidates = NodeSet::new(self.num_nodes());
        let mut next_excluded = NodeSet::new(self.num_nodes());

        for node in branches.iter() {
            let weight = self.nodes[node].weight;
            self.current.include(node, weight);

            let is_maximal = NodeSet::intersect_both(
                &mut next_candidates,
                candidates,
                &mut next_excluded,
                excluded,
                &self.nodes[node].neighbours,
            );
            if is_maximal {
                self.report_current()?;
            } else if !next_candidates.is_empty() {
                self.bron_kerbosch(&mut next_candidates, &mut next_excluded)?;
            }

            self.current.exclude(node, weight);
            candidates.remove(node);
            excluded.insert(node);
        }

        Ok(())
    }

    fn report(&mut self, clique: &[usize]) -> Result<(), ConstraintOperationError> {
        pumpkin_assert_eq_simple!(self.current.cardinality, 0);

        for &node in clique {
            let weight = self.nodes[node].weight;
            self.current.include(node, weight);
        }
        let result = self.report_current();
        for &node in clique {
            let weight = self.nodes[node].weight;
            self.current.exclude(node, weight);
        }

        result
    }

    /// Keeps track of the largest clique and posts the distinctness of the current clique.
    fn report_current(&mut self) -> Result<(), ConstraintOperationError> {
        pumpkin_assert_moderate!(self.current.nodes.len() == self.current.cardinality);

        if (self.current.cardinality, self.current.weight) > (self.max.cardinality, self.max.weight)
        {
            self.max.clone_from(&self.current);

            if self.max.cardinality > self.num_bins {
                debug!(
                    "a clique of {} items does not fit in {} bins",
                    self.max.cardinality, self.num_bins
                );
                self.state.declare_infeasible();
                return Err(ConstraintOperationError::InfeasiblePropagator);
            }
        }

        let mut clique = self.current.nodes.iter();
        match (clique.next(), clique.next(), clique.next()) {
            (Some(a), Some(b), None) => {
                let _ = self.state.add_propagator(BinaryNotEqualsPropagatorArgs {
                    a: self.bins[a].clone(),
                    b: self.bins[b].clone(),
                })?;
            }
            (Some(_), Some(_), Some(_)) => {
                let vars = self
                    .current
                    .nodes
                    .iter()
                    .map(|node| self.bins[node].clone())
                    .collect();
                let _ = self
                    .state
                    .add_propagator(AllDifferentPropagatorArgs { vars })?;
            }
            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::variables::DomainId;

    fn bins(state: &mut State, num_items: usize, num_bins: i32) -> Vec<DomainId> {
        (0..num_items)
            .map(|_| state.new_bounded_integer(0, num_bins - 1))
            .collect()
    }

    #[test]
    fn three_pairwise_conflicts_do_not_fit_in_two_bins() {
        let mut state = State::default();
        let bins = bins(&mut state, 3, 2);

        let mut graph = ConflictGraph::new(&mut state, &bins, 2);
        graph.add_edge(0, 1);
        graph.add_edge(0, 2);
        graph.add_edge(1, 2);

        assert_eq!(
            graph.post(),
            Err(ConstraintOperationError::InfeasiblePropagator)
        );
        assert_eq!(graph.max_clique(), vec![0, 1, 2]);
        assert!(state.is_infeasible());
    }

    #[test]
    fn triangle_with_pendant_is_peeled() {
        let mut state = State::default();
        let bins = bins(&mut state, 4, 3);

        let mut graph = ConflictGraph::new(&mut state, &bins, 3);
        graph.add_edge(0, 1);
        graph.add_edge(0, 2);
        graph.add_edge(1, 2);
        graph.add_edge(2, 3);

        graph.post().expect("three bins suffice");
        assert_eq!(graph.max_clique(), vec![0, 1, 2]);

        assert_eq!(state.num_propagators(), 2);
        state.assign(bins[0], 0).expect("non-empty domain");
        state.assign(bins[1], 1).expect("non-empty domain");
        state.propagate_to_fixpoint().expect("a packing exists");
        assert_eq!(state.lower_bound(bins[2]), 2);
        assert!(state.is_fixed(bins[2]));
        assert!(!state.contains(bins[3], 2));
    }

    #[test]
    fn complete_graph_is_found_by_the_search() {
        let mut state = State::default();
        let bins = bins(&mut state, 5, 4);

        let mut graph = ConflictGraph::new(&mut state, &bins, 4);
        for i in 0..4 {
            for j in i + 1..4 {
                graph.add_edge(i, j);
            }
        }

        graph.post().expect("four bins suffice");

        assert_eq!(graph.max_clique(), vec![0, 1, 2, 3]);
        assert_eq!(state.num_propagators(), 1);
    }

    #[test]
    fn single_conflict_posts_not_equals() {
        let mut state = State::default();
        let bins = bins(&mut state, 2, 2);

        let mut graph = ConflictGraph::new(&mut state, &bins, 2);
        graph.add_edge(0, 1);
        assert!(graph.adjacent(1, 0));
        graph.post().expect("two bins suffice");

        state.assign(bins[0], 0).expect("non-empty domain");
        state.propagate_to_fixpoint().expect("a packing exists");
        assert_eq!(state.lower_bound(bins[1]), 1);
    }

    #[test]
    fn path_is_peeled_into_two_conflicts() {
        let mut state = State::default();
        let bins = bins(&mut state, 3, 2);

        // Node 2 has degree two, its neighbours are not adjacent.
        let mut graph = ConflictGraph::new(&mut state, &bins, 2);
        graph.add_edge(0, 2);
        graph.add_edge(1, 2);

        graph.post().expect("two bins suffice");
        assert_eq!(graph.max_clique(), vec![0, 2]);

        assert_eq!(state.num_propagators(), 2);
        state.assign(bins[2], 0).expect("non-empty domain");
        state.propagate_to_fixpoint().expect("a packing exists");
        assert_eq!(state.lower_bound(bins[0]), 1);
        assert_eq!(state.lower_bound(bins[1]), 1);
    }

    #[test]
    fn heavier_clique_is_the_largest() {
        let mut state = State::default();
        let bins = bins(&mut state, 7, 4);

        let mut graph = ConflictGraph::new(&mut state, &bins, 4);
        for clique in [[0, 1, 2, 3], [2, 3, 4, 5]] {
            for (position, &i) in clique.iter().enumerate() {
                for &j in &clique[position + 1..] {
                    if !graph.adjacent(i, j) {
                        graph.add_edge(i, j);
                    }
                }
            }
        }
        // The pendant adds weight to node 5 only.
        graph.add_edge(5, 6);

        graph.post().expect("four bins suffice");

        assert_eq!(graph.max_clique(), vec![2, 3, 4, 5]);
        assert_eq!(state.num_propagators(), 3);
    }
}
