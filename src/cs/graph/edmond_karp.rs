//! Edmonds-Karp maximum flow.
//!
//! Repeatedly augments along a fewest-hop path of the residual graph until
//! the sink can no longer be reached, recording every augmenting path and the
//! flow pushed along it. The vertices still reachable from the source at that
//! point form a minimum cut.
//!
//! # Examples
//!
//! ```
//! use maxflow::graph::compute_max_flow;
//!
//! let edges = vec![("s", "a", 3), ("s", "b", 2), ("a", "t", 2), ("b", "t", 3)];
//! let result = compute_max_flow(edges, &"s", &"t").unwrap();
//!
//! assert_eq!(result.total_flow, 4);
//! assert_eq!(result.paths.len(), 2);
//! assert_eq!(result.min_cut.capacity, 4);
//! ```

use log::{debug, trace};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::cs::graph::network::{FlowCapacity, FlowNetwork};
use crate::cs::graph::residual::ResidualGraph;
use crate::error::{Error, Result};

/// Configuration for a max-flow computation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaxFlowConfig {
    /// Upper bound on the number of augmenting paths. `None` runs until the
    /// flow is maximal.
    pub max_augmentations: Option<usize>,
}

impl MaxFlowConfig {
    pub fn with_max_augmentations(max_augmentations: usize) -> Self {
        Self {
            max_augmentations: Some(max_augmentations),
        }
    }
}

/// One augmenting path and the flow pushed along it.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentingPath<V, C> {
    /// 1-based iteration number
    pub index: usize,
    /// Vertices from source to sink, both included
    pub vertices: Vec<V>,
    /// Flow pushed along the path
    pub bottleneck: C,
}

/// Source side of a minimum cut and the edges crossing it.
#[derive(Debug, Clone, PartialEq)]
pub struct MinCut<V, C> {
    /// Vertices reachable from the source in the final residual graph
    pub source_side: Vec<V>,
    /// Original edges leaving the source side, with their capacities
    pub edges: Vec<(V, V, C)>,
    /// Sum of the capacities of `edges`
    pub capacity: C,
}

/// Outcome of a max-flow computation.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowResult<V, C> {
    pub total_flow: C,
    pub paths: Vec<AugmentingPath<V, C>>,
    pub min_cut: MinCut<V, C>,
}

impl<V, C> FlowResult<V, C>
where
    V: Hash + Eq + Clone,
    C: FlowCapacity,
{
    /// Number of augmenting iterations performed
    pub fn iterations(&self) -> usize {
        self.paths.len()
    }

    /// Net flow per ordered vertex pair, replayed from the path records.
    ///
    /// Flow pushed in opposite directions between the same two vertices
    /// cancels. Only pairs with strictly positive net flow are returned, in
    /// order of first use.
    ///
    /// Cancellation is exact for integer capacities. With `f32`/`f64` a pair
    /// whose pushes should cancel can keep a rounding remainder and show up
    /// with a tiny positive flow; filter with a tolerance if that matters.
    pub fn edge_flows(&self) -> Vec<(V, V, C)> {
        let mut order: Vec<(V, V)> = Vec::new();
        // at most one direction of a pair holds a non-zero amount
        let mut net: HashMap<(V, V), C> = HashMap::new();

        for path in &self.paths {
            for hop in path.vertices.windows(2) {
                let (u, v) = (hop[0].clone(), hop[1].clone());
                let amount = path.bottleneck;
                let backward = net
                    .get(&(v.clone(), u.clone()))
                    .copied()
                    .unwrap_or_else(C::zero);

                if backward >= amount {
                    net.insert((v, u), backward - amount);
                    continue;
                }
                if backward > C::zero() {
                    net.insert((v.clone(), u.clone()), C::zero());
                }
                // net flow on a pair never exceeds that edge's capacity, so
                // this sum stays in range
                let entry = net.entry((u.clone(), v.clone())).or_insert_with(|| {
                    order.push((u, v));
                    C::zero()
                });
                *entry = *entry + (amount - backward);
            }
        }

        order
            .into_iter()
            .filter_map(|key| {
                let flow = net[&key];
                if flow > C::zero() {
                    Some((key.0, key.1, flow))
                } else {
                    None
                }
            })
            .collect()
    }
}

/// Computes the maximum flow from `source` to `sink` over `edges`.
///
/// `edges` are `(from, to, capacity)` triples. A repeated ordered pair
/// replaces the earlier capacity. Every vertex named by an edge becomes part
/// of the network.
///
/// # Returns
/// * `Ok(FlowResult)` - total flow, augmenting paths in the order found, and
///   a minimum cut
/// * `Err(Error)` - on invalid input
///
/// # Errors
/// * `NegativeCapacity` if any capacity is below zero
/// * `InvalidVertex` if `source` or `sink` does not appear in any edge
/// * `DegenerateRequest` if `source == sink`
/// * `CapacityOverflow` if a residual capacity or the total flow does not
///   fit in `C`
///
/// # Complexity
/// * Time: O(VE²) where V is the number of vertices and E is the number of edges
/// * Space: O(V + E)
pub fn compute_max_flow<V, C, I>(edges: I, source: &V, sink: &V) -> Result<FlowResult<V, C>>
where
    V: Hash + Eq + Clone + Debug,
    C: FlowCapacity,
    I: IntoIterator<Item = (V, V, C)>,
{
    compute_max_flow_with_config(edges, source, sink, &MaxFlowConfig::default())
}

/// Same as [`compute_max_flow`] with an explicit configuration.
///
/// # Errors
/// * `AugmentationLimit` if `config.max_augmentations` paths were used and
///   another augmenting path still exists
pub fn compute_max_flow_with_config<V, C, I>(
    edges: I,
    source: &V,
    sink: &V,
    config: &MaxFlowConfig,
) -> Result<FlowResult<V, C>>
where
    V: Hash + Eq + Clone + Debug,
    C: FlowCapacity,
    I: IntoIterator<Item = (V, V, C)>,
{
    let network = FlowNetwork::from_edges(edges)?;
    max_flow(&network, source, sink, config)
}

/// Computes the maximum flow through an existing network.
///
/// The network is only read; a fresh residual graph is built for every call.
pub fn max_flow<V, C>(
    network: &FlowNetwork<V, C>,
    source: &V,
    sink: &V,
    config: &MaxFlowConfig,
) -> Result<FlowResult<V, C>>
where
    V: Hash + Eq + Clone + Debug,
    C: FlowCapacity,
{
    let s = network
        .index_of(source)
        .ok_or_else(|| Error::invalid_vertex(source))?;
    let t = network
        .index_of(sink)
        .ok_or_else(|| Error::invalid_vertex(sink))?;
    if s == t {
        return Err(Error::DegenerateRequest(format!("{:?}", source)));
    }

    debug!(
        "max flow {:?} -> {:?} over {} vertices and {} edges",
        source,
        sink,
        network.vertex_count(),
        network.edge_count()
    );

    let mut residual = ResidualGraph::build(network);
    let mut total_flow = C::zero();
    let mut paths = Vec::new();

    while let Some((path, bottleneck)) = residual.find_augmenting_path(s, t) {
        if let Some(limit) = config.max_augmentations {
            if paths.len() >= limit {
                return Err(Error::AugmentationLimit(limit));
            }
        }

        residual.augment(&path, bottleneck)?;
        total_flow = total_flow
            .checked_add_capacity(bottleneck)
            .ok_or_else(|| Error::CapacityOverflow("total flow".to_string()))?;

        let record = AugmentingPath {
            index: paths.len() + 1,
            vertices: path.iter().map(|&i| network.vertex(i).clone()).collect(),
            bottleneck,
        };
        trace!(
            "augmenting path {}: {:?} carries {:?}",
            record.index,
            record.vertices,
            record.bottleneck
        );
        paths.push(record);
    }

    let min_cut = extract_min_cut(network, &residual, s)?;
    debug!(
        "max flow {:?} after {} augmenting paths",
        total_flow,
        paths.len()
    );

    Ok(FlowResult {
        total_flow,
        paths,
        min_cut,
    })
}

fn extract_min_cut<V, C>(
    network: &FlowNetwork<V, C>,
    residual: &ResidualGraph<C>,
    source: usize,
) -> Result<MinCut<V, C>>
where
    V: Hash + Eq + Clone + Debug,
    C: FlowCapacity,
{
    let reachable = residual.reachable_from(source);
    let source_side = (0..network.vertex_count())
        .filter(|&i| reachable[i])
        .map(|i| network.vertex(i).clone())
        .collect();

    let mut capacity = C::zero();
    let mut edges = Vec::new();
    for (u, v, c) in network.index_edges() {
        if reachable[u] && !reachable[v] && c > C::zero() {
            capacity = capacity
                .checked_add_capacity(c)
                .ok_or_else(|| Error::CapacityOverflow("cut capacity".to_string()))?;
            edges.push((network.vertex(u).clone(), network.vertex(v).clone(), c));
        }
    }

    Ok(MinCut {
        source_side,
        edges,
        capacity,
    })
}

/// Maximum flow over a dense capacity matrix, where `capacity[u][v]` is the
/// capacity of `u -> v` and zero entries mean no edge.
///
/// # Errors
/// * `InvalidVertex` if `source` or `sink` is out of range
/// * `DegenerateRequest` if `source == sink`
/// * `NegativeCapacity` for a negative entry
pub fn edmond_karp<C: FlowCapacity>(capacity: &[Vec<C>], source: usize, sink: usize) -> Result<C> {
    let mut network = FlowNetwork::new();
    for u in 0..capacity.len() {
        network.add_vertex(u);
    }
    for (u, row) in capacity.iter().enumerate() {
        for (v, &c) in row.iter().enumerate() {
            if c != C::zero() {
                network.add_edge(u, v, c)?;
            }
        }
    }
    Ok(max_flow(&network, &source, &sink, &MaxFlowConfig::default())?.total_flow)
}
