//! Downstream impact analysis.

use crate::domain::AffectedFile;
use crate::store::RepoGraph;
use petgraph::Direction;
use std::collections::{HashSet, VecDeque};

/// Files reachable from `start` within `max_depth` outgoing hops.
///
/// Uses BFS, so each file is recorded once, at the hop count where it was
/// first reached, which is its shortest distance. The starting file is not
/// part of its own impact set, even when a cycle leads back to it. Results
/// are ordered by distance, then path. An unknown starting file yields an
/// empty result.
#[must_use]
pub fn affected_files(graph: &RepoGraph, start: &str, max_depth: usize) -> Vec<AffectedFile> {
    let Some(start_node) = graph.node_index(start) else {
        return Vec::new();
    };
    let g = graph.graph();

    let mut visited = HashSet::from([start_node]);
    let mut queue = VecDeque::from([(start_node, 0_usize)]);
    let mut affected = Vec::new();

    while let Some((node, depth)) = queue.pop_front() {
        if depth >= max_depth {
            continue;
        }

        for neighbor in g.neighbors_directed(node, Direction::Outgoing) {
            if visited.insert(neighbor) {
                affected.push(AffectedFile {
                    path: g[neighbor].clone(),
                    distance: depth + 1,
                });
                queue.push_back((neighbor, depth + 1));
            }
        }
    }

    affected.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.path.cmp(&b.path)));

    tracing::trace!(
        start,
        max_depth,
        affected = affected.len(),
        "Impact traversal complete"
    );

    affected
}
