//! Circular dependency enumeration.
//!
//! A cycle is a simple path that returns to its starting file. Each cycle
//! is reported once, starting from its lexicographically smallest path:
//! the search from a start node only visits nodes ordered after it, so a
//! rotation of an already-found cycle is never explored. Parallel edges of
//! different types collapse to one successor, so they do not duplicate
//! cycles either.
//!
//! The search is a depth-first backtracking bounded by the maximum hop
//! count and stopped globally once `max_cycles` cycles have been found.

use crate::store::RepoGraph;
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use std::ops::RangeInclusive;

/// Enumerate simple cycles whose edge count lies in `hops`.
///
/// Each cycle is returned as its node paths with the start repeated at the
/// end (`[a, b, c, a]`). Start nodes and successors are visited in path
/// order, so output is deterministic.
#[must_use]
pub fn find_cycles(
    graph: &RepoGraph,
    hops: RangeInclusive<usize>,
    max_cycles: usize,
) -> Vec<Vec<String>> {
    let g = graph.graph();

    let mut order: Vec<NodeIndex> = g.node_indices().collect();
    order.sort_by(|a, b| g[*a].cmp(&g[*b]));

    let mut rank = vec![0_usize; g.node_count()];
    for (position, node) in order.iter().enumerate() {
        rank[node.index()] = position;
    }

    let successors: Vec<Vec<NodeIndex>> = g
        .node_indices()
        .map(|node| {
            let mut next: Vec<NodeIndex> =
                g.neighbors_directed(node, Direction::Outgoing).collect();
            next.sort_by_key(|n| rank[n.index()]);
            next.dedup();
            next
        })
        .collect();

    let mut search = CycleSearch {
        successors: &successors,
        rank: &rank,
        hops,
        max_cycles,
        path: Vec::new(),
        on_path: vec![false; g.node_count()],
        found: Vec::new(),
    };

    for &start in &order {
        if search.is_full() {
            break;
        }
        search.path.push(start);
        search.on_path[start.index()] = true;
        search.extend(start);
        search.on_path[start.index()] = false;
        search.path.pop();
    }

    tracing::trace!(
        nodes = g.node_count(),
        cycles = search.found.len(),
        "Cycle search complete"
    );

    search
        .found
        .into_iter()
        .map(|cycle| cycle.into_iter().map(|n| g[n].clone()).collect())
        .collect()
}

/// Backtracking state for one cycle enumeration.
struct CycleSearch<'a> {
    /// Distinct successors per node, sorted by path rank
    successors: &'a [Vec<NodeIndex>],
    /// Position of each node in path order
    rank: &'a [usize],
    hops: RangeInclusive<usize>,
    max_cycles: usize,
    /// Current simple path, starting at the start node
    path: Vec<NodeIndex>,
    on_path: Vec<bool>,
    found: Vec<Vec<NodeIndex>>,
}

impl CycleSearch<'_> {
    fn is_full(&self) -> bool {
        self.found.len() >= self.max_cycles
    }

    fn extend(&mut self, start: NodeIndex) {
        let Some(&current) = self.path.last() else {
            return;
        };
        let edges_so_far = self.path.len() - 1;
        let successors = self.successors;

        for &next in &successors[current.index()] {
            if self.is_full() {
                return;
            }

            if next == start {
                if self.hops.contains(&(edges_so_far + 1)) {
                    let mut cycle = self.path.clone();
                    cycle.push(start);
                    self.found.push(cycle);
                }
                continue;
            }

            // Going through `next` needs at least one more edge to close
            if edges_so_far + 2 > *self.hops.end() {
                continue;
            }
            if self.rank[next.index()] < self.rank[start.index()] || self.on_path[next.index()] {
                continue;
            }

            self.path.push(next);
            self.on_path[next.index()] = true;
            self.extend(start);
            self.on_path[next.index()] = false;
            self.path.pop();
        }
    }
}
