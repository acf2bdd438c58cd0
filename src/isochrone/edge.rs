use serde::{Deserialize, Serialize};

/// Edge identifier reported for an origin that appears in no edge.
///
/// Such an origin still yields exactly one degenerate fragment so the
/// caller receives one row per requested origin.
pub const ISOLATED_EDGE_ID: i64 = -1;

/// One directed/bidirectional edge of the input network.
///
/// `id` is caller-opaque and passed through to the output verbatim.
/// `source` and `target` carry external node identifiers on input; the
/// [`Network`](crate::isochrone::Network) builder rewrites them in place
/// to dense indices for the lifetime of the computation.
///
/// A negative `cost` (resp. `reverse_cost`) marks the source→target
/// (resp. target→source) direction as untraversable.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: i64,
    pub source: i64,
    pub target: i64,
    pub cost: f64,
    pub reverse_cost: f64,
}

impl Edge {
    pub fn new(id: i64, source: i64, target: i64, cost: f64, reverse_cost: f64) -> Self {
        Edge {
            id,
            source,
            target,
            cost,
            reverse_cost,
        }
    }

    #[inline]
    pub(crate) fn forward_traversable(&self) -> bool {
        self.cost >= 0.0
    }

    #[inline]
    pub(crate) fn reverse_traversable(&self) -> bool {
        self.reverse_cost >= 0.0
    }
}

/// A sub-segment of one edge lying within one cost band, as seen from
/// one origin.
///
/// Percentages are expressed in the edge's forward (source→target)
/// frame regardless of which traversal direction produced the fragment.
/// For fragments produced by a reverse traversal the cost endpoints are
/// swapped alongside the percentage reflection, so `start_cost` pairs
/// with `start_perc` positionally; its value then exceeds `end_cost`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub start_id: i64,
    pub edge: i64,
    pub start_perc: f64,
    pub end_perc: f64,
    pub start_cost: f64,
    pub end_cost: f64,
}
