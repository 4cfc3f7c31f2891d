use rustc_hash::FxHashSet;
use tracing::debug;

use crate::RoadGraph;

/// Returns true only if all the edges of the path are sequentially connected
/// in the given graph, i.e. every edge starts at the junction the previous
/// edge ends at.
pub fn is_path_connected<G: RoadGraph>(graph: &G, path: &[G::EdgeId]) -> bool {
    path.windows(2).all(|window| {
        let [e1, e2] = [window[0], window[1]];
        graph
            .junction_exiting_edges(graph.get_edge_end_junction(e1))
            .any(|(e, _)| e == e2)
    })
}

/// Returns true only if the path visits no junction twice. The visited
/// junctions of a path are the start junction of every edge plus the end
/// junction of the last edge.
pub fn is_path_cycle_free<G: RoadGraph>(graph: &G, path: &[G::EdgeId]) -> bool {
    let junctions = path
        .iter()
        .map(|&e| graph.get_edge_start_junction(e))
        .chain(path.last().map(|&e| graph.get_edge_end_junction(e)));

    let mut seen = FxHashSet::default();

    for junction in junctions {
        if !seen.insert(junction) {
            debug!("Found loop at {junction:?}: {path:?}");
            return false;
        }
    }

    true
}
