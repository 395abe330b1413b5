//! Read-only algorithms over one repository partition.
//!
//! - Edge listing in insertion order
//! - Impact analysis (BFS over outgoing edges)
//! - Circular dependency enumeration (depth-bounded backtracking)
//! - Hotspot ranking by distinct-neighbour degree
//!
//! Every function here is a pure function of a [`RepoGraph`] and its
//! parameters. Bounds are resolved by the caller; these functions take
//! them as given.

mod cycles;
mod hotspots;
mod impact;

pub use cycles::find_cycles;
pub use hotspots::rank_hotspots;
pub use impact::affected_files;

use crate::domain::EdgeSummary;
use crate::store::RepoGraph;

/// The first `cap` edges of a partition in insertion order.
#[must_use]
pub fn list_edges(graph: &RepoGraph, cap: usize) -> Vec<EdgeSummary> {
    graph.all_edges().take(cap).map(EdgeSummary::from).collect()
}

/// Build a partition from `(source, target)` pairs, all typed "import".
#[cfg(test)]
pub(crate) fn graph_from(edges: &[(&str, &str)]) -> RepoGraph {
    use crate::store::EdgeWrite;
    use chrono::Utc;

    let mut graph = RepoGraph::new();
    for &(source, target) in edges {
        graph.upsert_edge(
            EdgeWrite {
                source,
                target,
                dep_type: "import",
                weight: 1.0,
                analysis_id: "test",
            },
            Utc::now(),
        );
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_edges_truncates_at_cap() {
        let graph = graph_from(&[("a", "b"), ("b", "c"), ("c", "d")]);

        let edges = list_edges(&graph, 2);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].source, "a");
        assert_eq!(edges[1].source, "b");
    }

    #[test]
    fn list_edges_of_empty_graph() {
        assert!(list_edges(&RepoGraph::new(), 1000).is_empty());
    }
}
