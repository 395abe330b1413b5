//! Architectural hotspot ranking.

use crate::domain::Hotspot;
use crate::store::RepoGraph;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use std::collections::HashSet;

/// The `top` files with the highest total degree.
///
/// Degrees count distinct neighbour files, not edges: two edges of
/// different types between the same pair contribute one to each side.
/// Every file is ranked, including files with no outgoing or no incoming
/// edges. Ties on total degree are broken by ascending path.
#[must_use]
pub fn rank_hotspots(graph: &RepoGraph, top: usize) -> Vec<Hotspot> {
    let g = graph.graph();

    let mut hotspots: Vec<Hotspot> = g
        .node_indices()
        .map(|node| {
            let out_degree = distinct(g.neighbors_directed(node, Direction::Outgoing));
            let in_degree = distinct(g.neighbors_directed(node, Direction::Incoming));
            Hotspot {
                path: g[node].clone(),
                out_degree,
                in_degree,
                total_degree: out_degree + in_degree,
            }
        })
        .collect();

    hotspots.sort_by(|a, b| {
        b.total_degree
            .cmp(&a.total_degree)
            .then_with(|| a.path.cmp(&b.path))
    });
    hotspots.truncate(top);
    hotspots
}

fn distinct(neighbors: impl Iterator<Item = NodeIndex>) -> usize {
    neighbors.collect::<HashSet<_>>().len()
}
