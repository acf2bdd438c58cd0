use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::isochrone::network::Network;

/// Distance and predecessor labels for one bounded search.
///
/// One pair is allocated per worker and reused across origins. Labels
/// left over from a previous pruned search are indistinguishable from
/// "not yet visited", so [`SearchBuffers::reset`] must run before every
/// search.
pub(crate) struct SearchBuffers {
    /// Minimum cumulative cost per node; `+infinity` marks unreached.
    pub distances: Vec<f64>,
    /// Predecessor on the shortest path, by dense node index.
    pub predecessors: Vec<Option<usize>>,
}

impl SearchBuffers {
    pub(crate) fn new(nodes: usize) -> SearchBuffers {
        SearchBuffers {
            distances: vec![f64::INFINITY; nodes],
            predecessors: vec![None; nodes],
        }
    }

    pub(crate) fn reset(&mut self) {
        self.distances.fill(f64::INFINITY);
        self.predecessors.fill(None);
    }
}

struct SmallestHolder {
    cost: f64,
    node: usize,
}

impl PartialEq for SmallestHolder {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Eq for SmallestHolder {}

impl PartialOrd for SmallestHolder {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestHolder {
    // Reversed so the max-heap yields the smallest (cost, node) first.
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Cutoff-bounded Dijkstra from `start` over the network's adjacency.
///
/// The loop stops as soon as the cheapest frontier entry reaches
/// `cutoff`, keeping the search proportional to the reachable ball
/// rather than the whole network. The bound is strict: a node whose
/// cheapest label equals the cutoff is popped but never relaxed, so
/// anything beyond it (e.g. across a zero-cost edge) stays unreached.
pub(crate) fn bounded_search(
    network: &Network,
    start: usize,
    cutoff: f64,
    buffers: &mut SearchBuffers,
) {
    buffers.reset();
    buffers.distances[start] = 0.0;

    let mut queue = BinaryHeap::with_capacity(256);
    queue.push(SmallestHolder {
        cost: 0.0,
        node: start,
    });

    while let Some(SmallestHolder { cost, node }) = queue.pop() {
        if cost >= cutoff {
            break;
        }

        // Lazy invalidation: a stale entry superseded by a cheaper
        // relaxation is skipped rather than removed from the heap.
        if cost > buffers.distances[node] {
            continue;
        }

        for &edge_ix in &network.adjacency[node] {
            let edge = &network.edges[edge_ix as usize];

            // Adjacency entries reference the owning edge from either
            // endpoint; which end matches the current node determines
            // the traversal direction and its cost.
            let (next, move_cost) = if edge.target as usize == node {
                (edge.source as usize, edge.reverse_cost)
            } else {
                (edge.target as usize, edge.cost)
            };

            if move_cost < 0.0 {
                continue;
            }

            let aggregate = cost + move_cost;
            if aggregate < buffers.distances[next] {
                buffers.distances[next] = aggregate;
                buffers.predecessors[next] = Some(node);
                queue.push(SmallestHolder {
                    cost: aggregate,
                    node: next,
                });
            }
        }
    }
}
