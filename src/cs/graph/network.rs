use num_traits::{CheckedAdd, CheckedSub, Num, Zero};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::cs::graph::edmond_karp::{self, FlowResult, MaxFlowConfig};
use crate::error::{Error, Result};

/// Numeric type usable as an edge capacity.
///
/// Implemented for the primitive signed and unsigned integers and for
/// `f32`/`f64`. Residual and total-flow arithmetic goes through the checked
/// operations below, so a sum that does not fit in `Self` surfaces as
/// `Error::CapacityOverflow` rather than a panic or a wrap.
pub trait FlowCapacity: Num + Copy + PartialOrd + Debug {
    /// `self + other`, or `None` if the result is not representable
    fn checked_add_capacity(self, other: Self) -> Option<Self>;

    /// `self - other`, or `None` if the result would be negative or not
    /// representable
    fn checked_sub_capacity(self, other: Self) -> Option<Self>;
}

macro_rules! integer_capacity {
    ($($t:ty),*) => {
        $(
            impl FlowCapacity for $t {
                fn checked_add_capacity(self, other: Self) -> Option<Self> {
                    CheckedAdd::checked_add(&self, &other)
                }

                fn checked_sub_capacity(self, other: Self) -> Option<Self> {
                    CheckedSub::checked_sub(&self, &other).filter(|d| *d >= <$t as Zero>::zero())
                }
            }
        )*
    };
}

macro_rules! float_capacity {
    ($($t:ty),*) => {
        $(
            impl FlowCapacity for $t {
                fn checked_add_capacity(self, other: Self) -> Option<Self> {
                    Some(self + other).filter(|sum| sum.is_finite())
                }

                fn checked_sub_capacity(self, other: Self) -> Option<Self> {
                    Some(self - other).filter(|d| d.is_finite() && *d >= 0.0)
                }
            }
        )*
    };
}

integer_capacity!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float_capacity!(f32, f64);

/// A directed, capacitated graph with labelled vertices.
///
/// Vertices are numbered in order of first appearance and every vertex keeps
/// its out-edges in insertion order, so traversals over the network (and the
/// residual graphs built from it) are deterministic for a given build order.
#[derive(Debug, Clone)]
pub struct FlowNetwork<V, C> {
    vertices: Vec<V>,
    index: HashMap<V, usize>,
    out_edges: Vec<Vec<usize>>,
    capacities: HashMap<(usize, usize), C>,
}

impl<V, C> Default for FlowNetwork<V, C>
where
    V: Hash + Eq + Clone + Debug,
    C: FlowCapacity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, C> FlowNetwork<V, C>
where
    V: Hash + Eq + Clone + Debug,
    C: FlowCapacity,
{
    pub fn new() -> Self {
        FlowNetwork {
            vertices: Vec::new(),
            index: HashMap::new(),
            out_edges: Vec::new(),
            capacities: HashMap::new(),
        }
    }

    /// Builds a network from `(from, to, capacity)` triples, in order.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (V, V, C)>,
    {
        let mut network = Self::new();
        for (from, to, capacity) in edges {
            network.add_edge(from, to, capacity)?;
        }
        Ok(network)
    }

    /// Adds a vertex with no edges and returns its index.
    /// Adding an existing vertex returns the index it already has.
    pub fn add_vertex(&mut self, vertex: V) -> usize {
        if let Some(&i) = self.index.get(&vertex) {
            return i;
        }
        let i = self.vertices.len();
        self.index.insert(vertex.clone(), i);
        self.vertices.push(vertex);
        self.out_edges.push(Vec::new());
        i
    }

    /// Adds the directed edge `from -> to`.
    ///
    /// Both endpoints are created if needed, `from` first. Adding the same
    /// ordered pair twice replaces the earlier capacity (capacities are not
    /// summed) and the edge keeps its original position in `from`'s edge
    /// order.
    ///
    /// # Errors
    /// * `NegativeCapacity` if `capacity` is below zero or not comparable
    ///   with zero (NaN). The network is left unchanged.
    pub fn add_edge(&mut self, from: V, to: V, capacity: C) -> Result<()> {
        match capacity.partial_cmp(&C::zero()) {
            Some(Ordering::Equal | Ordering::Greater) => {}
            _ => return Err(Error::negative_capacity(&from, &to, &capacity)),
        }

        let u = self.add_vertex(from);
        let v = self.add_vertex(to);
        if self.capacities.insert((u, v), capacity).is_none() {
            self.out_edges[u].push(v);
        }
        Ok(())
    }

    pub fn contains_vertex(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    /// Capacity of `from -> to`, if that edge was added.
    pub fn capacity(&self, from: &V, to: &V) -> Option<C> {
        let u = self.index_of(from)?;
        let v = self.index_of(to)?;
        self.capacities.get(&(u, v)).copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.capacities.len()
    }

    /// Vertices in order of first appearance.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.iter()
    }

    /// Edges grouped by source vertex, each group in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V, C)> + '_ {
        self.index_edges()
            .map(move |(u, v, c)| (&self.vertices[u], &self.vertices[v], c))
    }

    /// Computes the maximum flow from `source` to `sink` with the default
    /// configuration. See [`edmond_karp::max_flow`].
    pub fn max_flow(&self, source: &V, sink: &V) -> Result<FlowResult<V, C>> {
        edmond_karp::max_flow(self, source, sink, &MaxFlowConfig::default())
    }

    pub(crate) fn index_of(&self, vertex: &V) -> Option<usize> {
        self.index.get(vertex).copied()
    }

    pub(crate) fn vertex(&self, i: usize) -> &V {
        &self.vertices[i]
    }

    pub(crate) fn index_edges(&self) -> impl Iterator<Item = (usize, usize, C)> + '_ {
        self.out_edges.iter().enumerate().flat_map(move |(u, targets)| {
            targets
                .iter()
                .map(move |&v| (u, v, self.capacities[&(u, v)]))
        })
    }
}
