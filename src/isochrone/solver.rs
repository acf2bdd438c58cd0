use itertools::Itertools;
use log::debug;
use measure_time::debug_time;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::isochrone::dijkstra::{bounded_search, SearchBuffers};
use crate::isochrone::edge::{Edge, Fragment, ISOLATED_EDGE_ID};
use crate::isochrone::network::Network;
use crate::isochrone::segment::append_band_fragments;

/// Multi-origin isochrone computation over a [`Network`].
pub trait Isochrone {
    /// Computes the reachable edge fragments of every origin, one
    /// bounded search per origin, banded by `distance_limits`.
    ///
    /// The limits need not be pre-sorted; their maximum bounds each
    /// search. With `only_minimum_cover`, an edge whose full traversal
    /// stays within the cutoff from both endpoints is reported for the
    /// strictly cheaper direction only.
    ///
    /// The returned table is sorted by `(start_id, end_cost)`.
    fn fragments(
        &self,
        origins: &[i64],
        distance_limits: &[f64],
        only_minimum_cover: bool,
    ) -> Vec<Fragment>;

    /// Same contract as [`Isochrone::fragments`], with origins fanned
    /// out across the rayon pool. Each worker owns its scratch buffers
    /// and result slice; output ordering is identical to the serial
    /// path.
    fn fragments_parallel(
        &self,
        origins: &[i64],
        distance_limits: &[f64],
        only_minimum_cover: bool,
    ) -> Vec<Fragment>;
}

impl Isochrone for Network {
    fn fragments(
        &self,
        origins: &[i64],
        distance_limits: &[f64],
        only_minimum_cover: bool,
    ) -> Vec<Fragment> {
        debug_time!("isochrone fragments ({} origins)", origins.len());

        let limits = sorted_limits(distance_limits);
        let cutoff = max_cutoff(&limits);

        let mut buffers = SearchBuffers::new(self.node_count());
        let mut results = Vec::new();

        for &start_id in origins {
            self.origin_fragments(
                start_id,
                &limits,
                cutoff,
                only_minimum_cover,
                &mut buffers,
                &mut results,
            );
        }

        order_fragments(&mut results);
        results
    }

    fn fragments_parallel(
        &self,
        origins: &[i64],
        distance_limits: &[f64],
        only_minimum_cover: bool,
    ) -> Vec<Fragment> {
        debug_time!("isochrone fragments, parallel ({} origins)", origins.len());

        let limits = sorted_limits(distance_limits);
        let cutoff = max_cutoff(&limits);

        // Collected per origin, in origin order, so the final stable
        // sort sees the same sequence as the serial path.
        let per_origin: Vec<Vec<Fragment>> = origins
            .par_iter()
            .map(|&start_id| {
                let mut buffers = SearchBuffers::new(self.node_count());
                let mut results = Vec::new();
                self.origin_fragments(
                    start_id,
                    &limits,
                    cutoff,
                    only_minimum_cover,
                    &mut buffers,
                    &mut results,
                );
                results
            })
            .collect();

        let mut results: Vec<Fragment> = per_origin.into_iter().flatten().collect();
        order_fragments(&mut results);
        results
    }
}

impl Network {
    /// Runs one bounded search and classifies every edge's contribution
    /// for `start_id`, appending fragments onto `results`.
    fn origin_fragments(
        &self,
        start_id: i64,
        limits: &[f64],
        cutoff: f64,
        only_minimum_cover: bool,
        buffers: &mut SearchBuffers,
        results: &mut Vec<Fragment>,
    ) {
        let Some(start) = self.node_index(start_id) else {
            // The origin appears in no edge: one degenerate row, edge
            // sentinel, zero-length percentage range.
            results.push(Fragment {
                start_id,
                edge: ISOLATED_EDGE_ID,
                start_perc: 0.0,
                end_perc: 0.0,
                start_cost: 0.0,
                end_cost: 0.0,
            });
            return;
        };

        bounded_search(self, start, cutoff, buffers);
        let appended_from = results.len();

        for edge in &self.edges {
            let scost = buffers.distances[edge.source as usize];
            let tcost = buffers.distances[edge.target as usize];

            // Unreached endpoints hold +infinity, which fails here too.
            let s_reached = scost <= cutoff;
            let t_reached = tcost <= cutoff;
            if !s_reached && !t_reached {
                continue;
            }

            let mut skip_forward = false;
            let mut skip_reverse = false;
            if only_minimum_cover {
                // When the whole edge sits inside the cutoff region from
                // either side, keep only the cheaper direction. Ties
                // keep both.
                let forward_total = scost + edge.cost;
                let reverse_total = tcost + edge.reverse_cost;
                let forward_covered = edge.forward_traversable() && forward_total <= cutoff;
                let reverse_covered = edge.reverse_traversable() && reverse_total <= cutoff;

                skip_reverse = forward_covered && reverse_covered && forward_total < reverse_total;
                skip_forward = forward_covered && reverse_covered && reverse_total < forward_total;
            }

            let first = results.len();

            // Walking backward from the target. Skipped when the target
            // was reached through this very edge, which the forward
            // fragments of the search already describe exactly.
            if !skip_reverse
                && t_reached
                && edge.reverse_traversable()
                && buffers.predecessors[edge.target as usize] != Some(edge.source as usize)
            {
                append_band_fragments(tcost, edge.reverse_cost, limits, results);

                // Re-express the traversal in the edge's forward
                // percentage frame; the cost endpoints follow the
                // reflection.
                for fragment in &mut results[first..] {
                    let start_perc = 1.0 - fragment.end_perc;
                    fragment.end_perc = 1.0 - fragment.start_perc;
                    fragment.start_perc = start_perc;
                    std::mem::swap(&mut fragment.start_cost, &mut fragment.end_cost);
                }
            }

            if !skip_forward
                && s_reached
                && edge.forward_traversable()
                && buffers.predecessors[edge.source as usize] != Some(edge.target as usize)
            {
                append_band_fragments(scost, edge.cost, limits, results);
            }

            for fragment in &mut results[first..] {
                fragment.edge = edge.id;
                fragment.start_id = start_id;
            }
        }

        debug!(
            "Origin {start_id}: {} fragments within cutoff {cutoff}",
            results.len() - appended_from
        );
    }
}

/// One-shot entry point matching the raw edge-list contract: builds the
/// network (remapping endpoints in place) and computes all fragments.
pub fn compute_isochrone_fragments(
    edges: Vec<Edge>,
    origins: &[i64],
    distance_limits: &[f64],
    only_minimum_cover: bool,
) -> Vec<Fragment> {
    Network::new(edges).fragments(origins, distance_limits, only_minimum_cover)
}

fn sorted_limits(distance_limits: &[f64]) -> Vec<f64> {
    distance_limits
        .iter()
        .copied()
        .sorted_by(|a, b| a.total_cmp(b))
        .collect()
}

/// An empty limit list admits nothing: with a `-infinity` cutoff even
/// the origin itself fails the reachability test, while unmapped
/// origins still produce their sentinel row.
fn max_cutoff(sorted: &[f64]) -> f64 {
    sorted.last().copied().unwrap_or(f64::NEG_INFINITY)
}

/// Groups fragments per origin, ordered by increasing cumulative cost,
/// the order a boundary-construction pass consumes them in.
fn order_fragments(results: &mut [Fragment]) {
    results.sort_by(|a, b| {
        a.start_id
            .cmp(&b.start_id)
            .then_with(|| a.end_cost.total_cmp(&b.end_cost))
    });
}
