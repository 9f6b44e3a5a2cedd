//! Conversion graph.
//!
//! Models are nodes and authored [`edges`] are directed arcs. A conversion
//! between any two models is found by breadth-first search and composed
//! from the edges along the path. Resolved conversions are memoized, so
//! each pair is searched at most once per graph.
//!
//! # Example
//!
//! ```
//! use chromagraph::convert::ConversionGraph;
//! use chromagraph::{channels, Model};
//!
//! let graph = ConversionGraph::standard();
//! let hsl = graph.convert(&channels!["00", "00", "FF"], Model::Hex, Model::Hsl).unwrap();
//! assert_eq!(hsl, channels![240, 100, 50]);
//! ```

pub mod edges;

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, LazyLock, RwLock};

use crate::channel::Channels;
use crate::error::{Error, Result};
use crate::model::Model;

pub use edges::{standard_edges, Edge, EdgeFn};

const COMPONENT: &str = "convert";

/// A resolved conversion: the model path and its composed edge functions.
#[derive(Debug, Clone)]
pub struct Conversion {
    from: Model,
    to: Model,
    path: Vec<Model>,
    steps: Vec<Edge>,
}

impl Conversion {
    /// Models visited, source first and target last.
    #[must_use]
    pub fn path(&self) -> &[Model] {
        &self.path
    }

    /// Runs the conversion over a full channel array.
    ///
    /// Same-model conversion returns the input untouched. Otherwise the
    /// core channels run through every step, alpha is carried over when
    /// the target supports it, and the result is rounded once with the
    /// target's rules.
    pub fn apply(&self, channels: &Channels) -> Result<Channels> {
        if self.from == self.to {
            return Ok(channels.clone());
        }

        let core = self.from.channel_count();
        let mut values = channels[..core.min(channels.len())].to_vec();
        for step in &self.steps {
            values = (step.apply)(&values)?;
        }

        if self.to.supports_alpha() && channels.len() > core {
            values.push(channels[core].clone());
        }
        Ok(self.to.descriptor().round(values))
    }
}

/// Conversion table over a fixed set of authored edges.
///
/// Authored edges never change after construction; composed conversions
/// are added to the resolved cache on first request.
pub struct ConversionGraph {
    authored: HashMap<(Model, Model), Edge>,
    adjacency: HashMap<Model, Vec<Model>>,
    resolved: RwLock<HashMap<(Model, Model), Arc<Conversion>>>,
}

impl std::fmt::Debug for ConversionGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionGraph")
            .field("edges", &self.authored.len())
            .field("resolved", &self.cached_len())
            .finish()
    }
}

static STANDARD: LazyLock<ConversionGraph> = LazyLock::new(|| {
    crate::debug::init_from_env();
    ConversionGraph::with_edges(standard_edges())
});

impl ConversionGraph {
    /// Builds a graph from edges. Adjacency follows edge order.
    ///
    /// A later edge for the same pair replaces an earlier one.
    #[must_use]
    pub fn with_edges(edges: impl IntoIterator<Item = Edge>) -> Self {
        let mut authored = HashMap::new();
        let mut adjacency: HashMap<Model, Vec<Model>> = HashMap::new();
        for edge in edges {
            let targets = adjacency.entry(edge.from).or_default();
            if !targets.contains(&edge.to) {
                targets.push(edge.to);
            }
            authored.insert((edge.from, edge.to), edge);
        }
        Self {
            authored,
            adjacency,
            resolved: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide graph over the built-in models.
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Direct edge, if one was authored.
    #[must_use]
    pub fn edge(&self, from: Model, to: Model) -> Option<&Edge> {
        self.authored.get(&(from, to))
    }

    /// Number of memoized conversions.
    pub fn cached_len(&self) -> usize {
        self.resolved.read().map_or(0, |cache| cache.len())
    }

    /// Resolves the conversion between two models, searching on first use.
    pub fn conversion(&self, from: Model, to: Model) -> Result<Arc<Conversion>> {
        if let Some(hit) = self
            .resolved
            .read()
            .ok()
            .and_then(|cache| cache.get(&(from, to)).cloned())
        {
            return Ok(hit);
        }

        let conversion = Arc::new(self.resolve(from, to)?);
        if let Ok(mut cache) = self.resolved.write() {
            // A concurrent resolve of the same pair produced the same path.
            let entry = Arc::clone(cache.entry((from, to)).or_insert(conversion));
            crate::debug!(COMPONENT, "cached {from} -> {to} ({} entries)", cache.len());
            return Ok(entry);
        }
        Ok(conversion)
    }

    /// Model path used to convert `from` into `to`.
    pub fn path(&self, from: Model, to: Model) -> Result<Vec<Model>> {
        Ok(self.conversion(from, to)?.path.clone())
    }

    /// Converts a channel array between models.
    pub fn convert(&self, channels: &Channels, from: Model, to: Model) -> Result<Channels> {
        self.conversion(from, to)?.apply(channels)
    }

    fn resolve(&self, from: Model, to: Model) -> Result<Conversion> {
        if from == to {
            return Ok(Conversion {
                from,
                to,
                path: vec![from],
                steps: Vec::new(),
            });
        }
        if let Some(edge) = self.edge(from, to) {
            return Ok(Conversion {
                from,
                to,
                path: vec![from, to],
                steps: vec![*edge],
            });
        }

        crate::time_scope!(COMPONENT, format!("search {from} -> {to}"));
        let path = self.search(from, to).ok_or(Error::NoConversionPath {
            from: from.name(),
            to: to.name(),
        })?;
        let steps = path
            .windows(2)
            .filter_map(|pair| self.edge(pair[0], pair[1]).copied())
            .collect();
        crate::trace!(
            COMPONENT,
            "path {}",
            path.iter().map(|m| m.name()).collect::<Vec<_>>().join(" -> ")
        );
        Ok(Conversion {
            from,
            to,
            path,
            steps,
        })
    }

    /// Breadth-first search. A dequeued node with a direct edge to the
    /// target ends the search; neighbors are queued in authored order.
    fn search(&self, from: Model, to: Model) -> Option<Vec<Model>> {
        let mut queue = VecDeque::from([from]);
        let mut visited = HashSet::from([from]);
        let mut predecessor: HashMap<Model, Model> = HashMap::new();

        while let Some(current) = queue.pop_front() {
            if self.authored.contains_key(&(current, to)) {
                let mut path = vec![to, current];
                let mut node = current;
                while let Some(&prev) = predecessor.get(&node) {
                    path.push(prev);
                    node = prev;
                }
                path.reverse();
                return Some(path);
            }
            for &next in self.adjacency.get(&current).into_iter().flatten() {
                if visited.insert(next) {
                    predecessor.insert(next, current);
                    queue.push_back(next);
                }
            }
        }
        None
    }
}

/// Converts a channel array between models using the standard graph.
pub fn convert(channels: &Channels, from: Model, to: Model) -> Result<Channels> {
    ConversionGraph::standard().convert(channels, from, to)
}
