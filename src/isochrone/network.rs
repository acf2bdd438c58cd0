use log::debug;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::isochrone::edge::Edge;

/// Index of an edge within the network's flat edge array.
pub(crate) type EdgeIx = u32;

// Street-network nodes rarely exceed degree four.
type AdjacencyBucket = SmallVec<[EdgeIx; 4]>;

/// An edge network remapped onto a dense, zero-based node index space.
///
/// External node identifiers may be arbitrary and sparse; replacing them
/// with compact array offsets lets every per-search structure be a plain
/// vector instead of a map. Internal indices never leak into output:
/// fragments reference edges by their preserved `id` and origins by the
/// externally supplied id.
pub struct Network {
    pub(crate) edges: Vec<Edge>,
    pub(crate) mapping: FxHashMap<i64, usize>,
    pub(crate) adjacency: Vec<AdjacencyBucket>,
}

impl Network {
    /// Builds the network, rewriting each edge's endpoints in place to
    /// dense indices assigned in order of first appearance (scanning
    /// edges in input order, source before target).
    pub fn new(mut edges: Vec<Edge>) -> Network {
        let mapping = Self::remap(&mut edges);
        let adjacency = Self::adjacency(mapping.len(), &edges);

        debug!(
            "Network built: {} nodes over {} edges",
            mapping.len(),
            edges.len()
        );

        Network {
            edges,
            mapping,
            adjacency,
        }
    }

    /// Number of distinct node identifiers seen across all edges.
    pub fn node_count(&self) -> usize {
        self.mapping.len()
    }

    /// Translates an external node id to its dense index, if the id
    /// appeared in any edge.
    #[inline]
    pub fn node_index(&self, external: i64) -> Option<usize> {
        self.mapping.get(&external).copied()
    }

    fn remap(edges: &mut [Edge]) -> FxHashMap<i64, usize> {
        let mut mapping: FxHashMap<i64, usize> = FxHashMap::default();

        for edge in edges.iter_mut() {
            let next = mapping.len();
            let source = *mapping.entry(edge.source).or_insert(next);
            let next = mapping.len();
            let target = *mapping.entry(edge.target).or_insert(next);

            edge.source = source as i64;
            edge.target = target as i64;
        }

        mapping
    }

    /// Each bucket holds indices of the edges incident to that node in a
    /// traversable direction: a forward entry at `source` iff `cost ≥ 0`,
    /// a reverse entry at `target` iff `reverse_cost ≥ 0`. An edge with
    /// both costs negative contributes no adjacency at all.
    fn adjacency(nodes: usize, edges: &[Edge]) -> Vec<AdjacencyBucket> {
        let mut adjacency = vec![AdjacencyBucket::new(); nodes];

        for (ix, edge) in edges.iter().enumerate() {
            if edge.forward_traversable() {
                adjacency[edge.source as usize].push(ix as EdgeIx);
            }
            if edge.reverse_traversable() {
                adjacency[edge.target as usize].push(ix as EdgeIx);
            }
        }

        adjacency
    }
}
