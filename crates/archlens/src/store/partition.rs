//! Single-repository dependency graph.
//!
//! This contains the actual data structures for one repository partition.
//! It is not thread-safe on its own; [`super::GraphStore`] wraps each
//! partition in `Arc<RwLock<>>`.

use crate::domain::Edge;
use chrono::{DateTime, Utc};
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// Attributes stored on each `DEPENDS_ON` edge.
#[derive(Debug, Clone, PartialEq)]
pub struct DependsOn {
    /// Dependency type; part of the edge identity
    pub dep_type: String,

    /// Edge weight
    pub weight: f64,

    /// Analysis run that last wrote this edge
    pub analysis_id: String,

    /// Time of the last write, never decreasing
    pub updated_at: DateTime<Utc>,
}

/// Fields of one edge write.
#[derive(Debug, Clone, Copy)]
pub struct EdgeWrite<'a> {
    /// Depending file
    pub source: &'a str,
    /// File depended upon
    pub target: &'a str,
    /// Dependency type
    pub dep_type: &'a str,
    /// Edge weight
    pub weight: f64,
    /// Analysis run performing the write
    pub analysis_id: &'a str,
}

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new edge was created.
    Inserted(EdgeIndex),
    /// An existing edge had its attributes overwritten.
    Updated(EdgeIndex),
}

impl UpsertOutcome {
    /// Index of the written edge.
    #[must_use]
    pub fn index(self) -> EdgeIndex {
        match self {
            Self::Inserted(index) | Self::Updated(index) => index,
        }
    }
}

/// Identity of an edge within a partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct EdgeKey {
    source: NodeIndex,
    target: NodeIndex,
    dep_type: String,
}

/// Directed multigraph of one repository.
///
/// # Graph Representation
///
/// Nodes carry file paths and edges carry [`DependsOn`] attributes. Edge
/// direction is **dependent -> dependency**: `a -> b` means `a` depends
/// on `b`. Nodes are created implicitly by the first edge that references
/// them and are never removed. petgraph keeps per-node outgoing and incoming
/// adjacency lists, so neighbour iteration in either direction does not scan
/// the whole partition, and edge indices follow insertion order.
#[derive(Debug, Default)]
pub struct RepoGraph {
    /// Dependency graph; node weights are file paths.
    graph: DiGraph<String, DependsOn>,

    /// Mapping from file path to graph node.
    node_map: HashMap<String, NodeIndex>,

    /// Mapping from edge identity to graph edge, used for upserts.
    edge_map: HashMap<EdgeKey, EdgeIndex>,
}

impl RepoGraph {
    /// Create a new empty partition
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct files.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether a file has been referenced by any edge.
    #[must_use]
    pub fn contains_node(&self, path: &str) -> bool {
        self.node_map.contains_key(path)
    }

    /// Insert an edge, or overwrite the attributes of the edge with the same
    /// (source, target, type) key.
    ///
    /// Missing endpoint nodes are created. On overwrite, `updated_at` becomes
    /// the later of `now` and the stored timestamp.
    pub fn upsert_edge(&mut self, write: EdgeWrite<'_>, now: DateTime<Utc>) -> UpsertOutcome {
        let source = self.ensure_node(write.source);
        let target = self.ensure_node(write.target);

        let key = EdgeKey {
            source,
            target,
            dep_type: write.dep_type.to_string(),
        };

        if let Some(&index) = self.edge_map.get(&key) {
            let edge = &mut self.graph[index];
            edge.weight = write.weight;
            write.analysis_id.clone_into(&mut edge.analysis_id);
            edge.updated_at = edge.updated_at.max(now);
            return UpsertOutcome::Updated(index);
        }

        let index = self.graph.add_edge(
            source,
            target,
            DependsOn {
                dep_type: key.dep_type.clone(),
                weight: write.weight,
                analysis_id: write.analysis_id.to_string(),
                updated_at: now,
            },
        );
        self.edge_map.insert(key, index);
        UpsertOutcome::Inserted(index)
    }

    /// Edges leaving `path`. Empty for an unknown file.
    #[must_use]
    pub fn out_edges(&self, path: &str) -> Vec<Edge> {
        self.directed_edges(path, Direction::Outgoing)
    }

    /// Edges arriving at `path`. Empty for an unknown file.
    #[must_use]
    pub fn in_edges(&self, path: &str) -> Vec<Edge> {
        self.directed_edges(path, Direction::Incoming)
    }

    /// All edges of the partition in insertion order.
    pub fn all_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph
            .edge_references()
            .map(|edge| self.materialize(edge.source(), edge.target(), edge.weight()))
    }

    /// Look up the node of a file.
    pub(crate) fn node_index(&self, path: &str) -> Option<NodeIndex> {
        self.node_map.get(path).copied()
    }

    /// The underlying petgraph graph, for traversal algorithms.
    pub(crate) fn graph(&self) -> &DiGraph<String, DependsOn> {
        &self.graph
    }

    fn ensure_node(&mut self, path: &str) -> NodeIndex {
        if let Some(&index) = self.node_map.get(path) {
            return index;
        }
        let index = self.graph.add_node(path.to_string());
        self.node_map.insert(path.to_string(), index);
        index
    }

    fn directed_edges(&self, path: &str, direction: Direction) -> Vec<Edge> {
        let Some(node) = self.node_index(path) else {
            return Vec::new();
        };

        self.graph
            .edges_directed(node, direction)
            .map(|edge| self.materialize(edge.source(), edge.target(), edge.weight()))
            .collect()
    }

    fn materialize(&self, source: NodeIndex, target: NodeIndex, attrs: &DependsOn) -> Edge {
        Edge {
            source: self.graph[source].clone(),
            target: self.graph[target].clone(),
            dep_type: attrs.dep_type.clone(),
            weight: attrs.weight,
            analysis_id: attrs.analysis_id.clone(),
            updated_at: attrs.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;

    fn write<'a>(
        source: &'a str,
        target: &'a str,
        dep_type: &'a str,
        weight: f64,
    ) -> EdgeWrite<'a> {
        EdgeWrite {
            source,
            target,
            dep_type,
            weight,
            analysis_id: "run-1",
        }
    }

    #[test]
    fn upsert_creates_nodes_implicitly() {
        let mut graph = RepoGraph::new();
        let outcome = graph.upsert_edge(write("a", "b", "import", 1.0), Utc::now());

        assert!(matches!(outcome, UpsertOutcome::Inserted(_)));
        assert!(graph.contains_node("a"));
        assert!(graph.contains_node("b"));
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn upsert_same_key_overwrites_in_place() {
        let mut graph = RepoGraph::new();
        let first = graph.upsert_edge(write("a", "b", "import", 1.0), Utc::now());
        let second = graph.upsert_edge(
            EdgeWrite {
                analysis_id: "run-2",
                ..write("a", "b", "import", 2.0)
            },
            Utc::now(),
        );

        assert_eq!(first.index(), second.index());
        assert!(matches!(second, UpsertOutcome::Updated(_)));
        assert_eq!(graph.edge_count(), 1);

        let edges = graph.out_edges("a");
        assert_eq!(edges.len(), 1);
        assert!((edges[0].weight - 2.0).abs() < f64::EPSILON);
        assert_eq!(edges[0].analysis_id, "run-2");
    }

    #[test]
    fn different_types_between_same_pair_are_distinct_edges() {
        let mut graph = RepoGraph::new();
        graph.upsert_edge(write("a", "b", "import", 1.0), Utc::now());
        graph.upsert_edge(write("a", "b", "call", 1.0), Utc::now());

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node_count(), 2);
    }

    #[test]
    fn updated_at_never_moves_backward() {
        let mut graph = RepoGraph::new();
        let now = Utc::now();
        graph.upsert_edge(write("a", "b", "import", 1.0), now);
        graph.upsert_edge(write("a", "b", "import", 3.0), now - Duration::seconds(30));

        let edge = &graph.out_edges("a")[0];
        assert_eq!(edge.updated_at, now);
        assert!((edge.weight - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn in_and_out_edges_follow_direction() {
        let mut graph = RepoGraph::new();
        graph.upsert_edge(write("a", "b", "import", 1.0), Utc::now());
        graph.upsert_edge(write("c", "b", "import", 1.0), Utc::now());

        assert_eq!(graph.out_edges("a").len(), 1);
        assert!(graph.out_edges("b").is_empty());

        let mut sources: Vec<_> = graph.in_edges("b").into_iter().map(|e| e.source).collect();
        sources.sort();
        assert_eq!(sources, vec!["a", "c"]);
    }

    #[test]
    fn unknown_node_has_no_edges() {
        let graph = RepoGraph::new();
        assert!(graph.out_edges("missing").is_empty());
        assert!(graph.in_edges("missing").is_empty());
    }

    #[test]
    fn all_edges_keep_insertion_order_across_updates() {
        let mut graph = RepoGraph::new();
        graph.upsert_edge(write("x", "y", "import", 1.0), Utc::now());
        graph.upsert_edge(write("a", "b", "import", 1.0), Utc::now());
        graph.upsert_edge(write("x", "y", "import", 5.0), Utc::now());

        let order: Vec<_> = graph.all_edges().map(|e| e.source).collect();
        assert_eq!(order, vec!["x", "a"]);
    }

    #[test]
    fn self_loop_is_stored() {
        let mut graph = RepoGraph::new();
        graph.upsert_edge(write("a", "a", "import", 1.0), Utc::now());

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.out_edges("a").len(), 1);
        assert_eq!(graph.in_edges("a").len(), 1);
    }

    proptest! {
        #[test]
        fn replaying_writes_is_idempotent(
            writes in proptest::collection::vec((0..6_u8, 0..6_u8, 0..2_u8), 0..40)
        ) {
            let paths = ["a", "b", "c", "d", "e", "f"];
            let types = ["import", "call"];
            let now = Utc::now();

            let mut graph = RepoGraph::new();
            let apply = |graph: &mut RepoGraph| {
                for &(s, t, ty) in &writes {
                    let (source, target) = (paths[usize::from(s)], paths[usize::from(t)]);
                    graph.upsert_edge(write(source, target, types[usize::from(ty)], 1.0), now);
                }
            };

            apply(&mut graph);
            let first: Vec<Edge> = graph.all_edges().collect();
            apply(&mut graph);
            let second: Vec<Edge> = graph.all_edges().collect();

            prop_assert_eq!(first, second);

            let mut keys: Vec<_> = writes.clone();
            keys.sort_unstable();
            keys.dedup();
            prop_assert_eq!(graph.edge_count(), keys.len());
        }
    }
}
