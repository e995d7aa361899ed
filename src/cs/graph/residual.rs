use log::trace;
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use crate::cs::graph::network::{FlowCapacity, FlowNetwork};
use crate::error::{Error, Result};

/// Parent pointers built during a search, indexed by vertex.
/// The source (and every unvisited vertex) maps to `None`.
type ParentMap = Vec<Option<usize>>;

/// Residual capacities of a flow network, keyed by vertex-index pairs.
///
/// Every forward entry `(u, v)` has a paired reverse entry `(v, u)`.
/// Built fresh from a [`FlowNetwork`] for each flow computation; the network
/// itself is never touched.
#[derive(Debug, Clone)]
pub struct ResidualGraph<C> {
    adjacency: Vec<Vec<usize>>,
    residual: HashMap<(usize, usize), C>,
}

impl<C: FlowCapacity> ResidualGraph<C> {
    /// Builds the residual graph of `network` with no flow pushed yet.
    ///
    /// Each input edge `(u, v)` starts at its full capacity. If the network
    /// has no `(v, u)` edge, a reverse entry with capacity zero is created;
    /// an explicit `(v, u)` edge keeps its own capacity.
    pub fn build<V>(network: &FlowNetwork<V, C>) -> Self
    where
        V: Hash + Eq + Clone + Debug,
    {
        let mut graph = ResidualGraph {
            adjacency: vec![Vec::new(); network.vertex_count()],
            residual: HashMap::with_capacity(2 * network.edge_count()),
        };

        for (u, v, capacity) in network.index_edges() {
            graph.set(u, v, capacity);
            if !graph.residual.contains_key(&(v, u)) {
                graph.set(v, u, C::zero());
            }
        }
        graph
    }

    fn set(&mut self, u: usize, v: usize, capacity: C) {
        if self.residual.insert((u, v), capacity).is_none() {
            self.adjacency[u].push(v);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Remaining capacity on `u -> v`; zero for pairs with no entry.
    pub fn residual_capacity(&self, u: usize, v: usize) -> C {
        self.residual.get(&(u, v)).copied().unwrap_or_else(C::zero)
    }

    /// Neighbours of `u` in the order their entries were created.
    pub fn neighbors(&self, u: usize) -> &[usize] {
        &self.adjacency[u]
    }

    /// Breadth-first search for a fewest-hop path from `source` to `sink`
    /// over edges with strictly positive residual capacity.
    ///
    /// The search stops as soon as the sink is discovered. Among equally short
    /// paths the first one discovered in neighbour order wins. Visited set and
    /// parent pointers are local to each call.
    ///
    /// # Returns
    /// * `Some((path, bottleneck))` - vertices in source-to-sink order and the
    ///   smallest residual capacity along them
    /// * `None` - the sink is unreachable, so the flow is maximal
    pub fn find_augmenting_path(&self, source: usize, sink: usize) -> Option<(Vec<usize>, C)> {
        let n = self.vertex_count();
        let mut visited = vec![false; n];
        let mut parent: ParentMap = vec![None; n];
        let mut queue = VecDeque::new();

        visited[source] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for &v in &self.adjacency[u] {
                if !visited[v] && self.residual_capacity(u, v) > C::zero() {
                    visited[v] = true;
                    parent[v] = Some(u);
                    if v == sink {
                        return Some(self.trace_path(&parent, u, sink));
                    }
                    queue.push_back(v);
                }
            }
        }
        None
    }

    /// Walks `parent` back from the last hop `last -> sink`, collecting the
    /// path and the minimum residual capacity on it.
    fn trace_path(&self, parent: &[Option<usize>], last: usize, sink: usize) -> (Vec<usize>, C) {
        let mut path = vec![sink, last];
        let mut bottleneck = self.residual_capacity(last, sink);
        let mut v = last;

        while let Some(u) = parent[v] {
            let capacity = self.residual_capacity(u, v);
            if capacity < bottleneck {
                bottleneck = capacity;
            }
            path.push(u);
            v = u;
        }
        path.reverse();
        (path, bottleneck)
    }

    /// Pushes `amount` along consecutive vertices of `path`: every forward
    /// entry loses `amount`, its reverse entry gains it.
    ///
    /// # Errors
    /// * `CapacityOverflow` if a reverse entry would exceed what `C` can hold,
    ///   or a forward entry would drop below zero. Nothing is updated then.
    pub fn augment(&mut self, path: &[usize], amount: C) -> Result<()> {
        let mut updates = Vec::with_capacity(path.len().saturating_sub(1));
        for hop in path.windows(2) {
            let (u, v) = (hop[0], hop[1]);
            let forward = self
                .residual_capacity(u, v)
                .checked_sub_capacity(amount)
                .ok_or_else(|| Error::CapacityOverflow(format!("residual edge {} -> {}", u, v)))?;
            let backward = self
                .residual_capacity(v, u)
                .checked_add_capacity(amount)
                .ok_or_else(|| Error::CapacityOverflow(format!("residual edge {} -> {}", v, u)))?;
            updates.push((u, v, forward, backward));
        }

        for (u, v, forward, backward) in updates {
            self.set(u, v, forward);
            self.set(v, u, backward);
            trace!("residual {} -> {}: {:?}, {} -> {}: {:?}", u, v, forward, v, u, backward);
        }
        Ok(())
    }

    /// Marks every vertex reachable from `source` through positive residual
    /// capacity.
    pub fn reachable_from(&self, source: usize) -> Vec<bool> {
        let mut seen = vec![false; self.vertex_count()];
        let mut queue = VecDeque::new();
        seen[source] = true;
        queue.push_back(source);

        while let Some(u) = queue.pop_front() {
            for &v in &self.adjacency[u] {
                if !seen[v] && self.residual_capacity(u, v) > C::zero() {
                    seen[v] = true;
                    queue.push_back(v);
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(edges: &[(char, char, i32)]) -> FlowNetwork<char, i32> {
        FlowNetwork::from_edges(edges.iter().copied()).unwrap()
    }

    #[test]
    fn test_build_synthesizes_zero_reverse_edges() {
        let net = network(&[('s', 'a', 4), ('a', 't', 2)]);
        let graph = ResidualGraph::build(&net);
        let (s, a, t) = (0, 1, 2);

        assert_eq!(graph.residual_capacity(s, a), 4);
        assert_eq!(graph.residual_capacity(a, s), 0);
        assert_eq!(graph.residual_capacity(a, t), 2);
        assert_eq!(graph.residual_capacity(t, a), 0);
        assert_eq!(graph.neighbors(a), &[s, t]);
    }

    #[test]
    fn test_build_keeps_explicit_reverse_capacity() {
        // reverse edge supplied after and before its partner
        let net = network(&[('a', 'b', 3), ('b', 'a', 2), ('c', 'a', 1), ('a', 'c', 6)]);
        let graph = ResidualGraph::build(&net);
        let (a, b, c) = (0, 1, 2);

        assert_eq!(graph.residual_capacity(a, b), 3);
        assert_eq!(graph.residual_capacity(b, a), 2);
        assert_eq!(graph.residual_capacity(c, a), 1);
        assert_eq!(graph.residual_capacity(a, c), 6);
    }

    #[test]
    fn test_build_does_not_touch_network() {
        let net = network(&[('s', 't', 5)]);
        let mut graph = ResidualGraph::build(&net);
        graph.augment(&[0, 1], 5).unwrap();

        assert_eq!(graph.residual_capacity(0, 1), 0);
        assert_eq!(net.capacity(&'s', &'t'), Some(5));
        assert_eq!(net.capacity(&'t', &'s'), None);
    }

    #[test]
    fn test_search_finds_fewest_hops() {
        // s->a->b->t is longer than s->c->t
        let net = network(&[('s', 'a', 9), ('a', 'b', 9), ('b', 't', 9), ('s', 'c', 1), ('c', 't', 1)]);
        let graph = ResidualGraph::build(&net);
        let (path, bottleneck) = graph.find_augmenting_path(0, 3).unwrap();

        assert_eq!(path, vec![0, 4, 3]);
        assert_eq!(bottleneck, 1);
    }

    #[test]
    fn test_search_ties_follow_insertion_order() {
        let net = network(&[('s', 'x', 1), ('s', 'y', 1), ('x', 't', 1), ('y', 't', 1)]);
        let graph = ResidualGraph::build(&net);
        let (path, _) = graph.find_augmenting_path(0, 3).unwrap();
        assert_eq!(path, vec![0, 1, 3]);
    }

    #[test]
    fn test_search_skips_saturated_edges() {
        let net = network(&[('s', 't', 0)]);
        let graph = ResidualGraph::build(&net);
        assert!(graph.find_augmenting_path(0, 1).is_none());
    }

    #[test]
    fn test_augment_moves_capacity_to_reverse_edge() {
        let net = network(&[('s', 'a', 5), ('a', 't', 3)]);
        let mut graph = ResidualGraph::build(&net);
        let (path, bottleneck) = graph.find_augmenting_path(0, 2).unwrap();
        assert_eq!(bottleneck, 3);

        graph.augment(&path, bottleneck).unwrap();
        assert_eq!(graph.residual_capacity(0, 1), 2);
        assert_eq!(graph.residual_capacity(1, 0), 3);
        assert_eq!(graph.residual_capacity(1, 2), 0);
        assert_eq!(graph.residual_capacity(2, 1), 3);
        assert!(graph.find_augmenting_path(0, 2).is_none());
    }

    #[test]
    fn test_reachable_from_stops_at_saturated_edges() {
        let net = network(&[('s', 'a', 1), ('a', 'b', 0), ('b', 't', 1)]);
        let graph = ResidualGraph::build(&net);
        let seen = graph.reachable_from(0);
        assert_eq!(seen, vec![true, true, false, false]);
    }

    #[test]
    fn test_bottleneck_is_smallest_hop() {
        let net = network(&[('s', 'a', 4), ('a', 'b', 1), ('b', 't', 6)]);
        let graph = ResidualGraph::build(&net);
        let (path, bottleneck) = graph.find_augmenting_path(0, 3).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert_eq!(bottleneck, 1);
    }

    #[test]
    fn test_augment_reports_reverse_overflow() {
        // explicit reverse edge already at 200, pushing 200 more overflows u8
        let net: FlowNetwork<char, u8> =
            FlowNetwork::from_edges(vec![('s', 'a', 200), ('a', 's', 200), ('a', 't', 200)]).unwrap();
        let mut graph = ResidualGraph::build(&net);
        let (path, bottleneck) = graph.find_augmenting_path(0, 2).unwrap();
        assert_eq!(bottleneck, 200);

        let result = graph.augment(&path, bottleneck);
        assert!(matches!(result, Err(Error::CapacityOverflow(_))));
        // nothing was applied
        assert_eq!(graph.residual_capacity(0, 1), 200);
        assert_eq!(graph.residual_capacity(1, 0), 200);
        assert_eq!(graph.residual_capacity(1, 2), 200);
    }

    #[test]
    fn test_augment_rejects_more_than_residual() {
        let net = network(&[('s', 't', 2)]);
        let mut graph = ResidualGraph::build(&net);
        let result = graph.augment(&[0, 1], 3);
        assert!(matches!(result, Err(Error::CapacityOverflow(_))));
        assert_eq!(graph.residual_capacity(0, 1), 2);
    }
}
