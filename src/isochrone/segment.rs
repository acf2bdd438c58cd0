use crate::isochrone::edge::Fragment;

/// Splits one directed edge traversal into per-band fragments.
///
/// `cost_at_node` is the cumulative cost already incurred at the near
/// endpoint, `edge_cost` the cost of traversing the edge in this
/// direction, and `limits` the ascending threshold sequence. Fragments
/// are appended with placeholder identity; the caller tags `edge` and
/// `start_id` afterwards (and, for reverse traversals, reflects the
/// percentage frame).
///
/// Any remainder of the edge beyond the last limit lies outside every
/// requested band and is dropped.
pub(crate) fn append_band_fragments(
    cost_at_node: f64,
    edge_cost: f64,
    limits: &[f64],
    results: &mut Vec<Fragment>,
) {
    let mut current_cost = cost_at_node;
    let mut travel_cost = edge_cost;
    let mut start_perc = 0.0;

    for &limit in limits {
        // The near endpoint is already past this band.
        if cost_at_node >= limit {
            continue;
        }

        let cost_at_target = current_cost + travel_cost;
        if cost_at_target < limit {
            // The rest of the edge fits entirely under this limit.
            results.push(Fragment {
                start_id: 0,
                edge: 0,
                start_perc,
                end_perc: 1.0,
                start_cost: current_cost,
                end_cost: cost_at_target,
            });
            break;
        }

        // The edge crosses the limit: emit the span up to the boundary
        // and carry the remainder into the next band.
        let end_perc = start_perc + (limit - current_cost) / edge_cost;
        results.push(Fragment {
            start_id: 0,
            edge: 0,
            start_perc,
            end_perc,
            start_cost: current_cost,
            end_cost: limit,
        });

        travel_cost = cost_at_target - limit;
        current_cost = limit;
        start_perc = end_perc;
    }
}
