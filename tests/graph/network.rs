use std::collections::BTreeMap;
use std::sync::LazyLock;

use geo::{Distance, Haversine};
use openlr_matcher::{Coordinate, Fow, Frc, Length, RoadGraph};

/// Hand built road network with four isolated clusters, all one way roads:
///
/// - a straight road of two edges running due north (junctions 901..903);
/// - a hub (910) with seven spokes, two of them due east on the same
///   parallel (to 911 and 912);
/// - a closed triangle with no way out (921..923);
/// - a triangle with an eastbound escape road (931..934).
///
/// Edges carry declared lengths independent of their geometry, so that
/// expansion thresholds can sit exactly on junctions.
pub static NETWORK_GRAPH: LazyLock<NetworkGraph> = LazyLock::new(NetworkGraph::new);

const NEARBY_EDGES_RADIUS: Length = Length::from_meters(50.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JunctionId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub i64);

#[derive(Debug)]
struct JunctionRecord {
    coordinate: Coordinate,
    exiting: Vec<(EdgeId, JunctionId)>,
    entering: Vec<(EdgeId, JunctionId)>,
}

#[derive(Debug)]
struct EdgeRecord {
    start: JunctionId,
    end: JunctionId,
    length: Length,
}

pub struct NetworkGraph {
    junctions: BTreeMap<u64, JunctionRecord>,
    edges: BTreeMap<i64, EdgeRecord>,
}

impl NetworkGraph {
    fn new() -> Self {
        let junctions = [
            (901, 13.43, 52.52),
            (902, 13.43, 52.5206),
            (903, 13.43, 52.521),
            (910, 13.44, 52.52),
            (911, 13.4404, 52.52),
            (912, 13.4408, 52.52),
            (913, 13.4402, 52.5202),
            (914, 13.4401, 52.5203),
            (915, 13.4399, 52.5197),
            (916, 13.4398, 52.5198),
            (917, 13.4396, 52.52),
            (921, 13.45, 52.52),
            (922, 13.45, 52.52005),
            (923, 13.45005, 52.52),
            (931, 13.455, 52.52),
            (932, 13.455, 52.52003),
            (933, 13.45505, 52.52),
            (934, 13.4556, 52.52),
        ];
        let edges = [
            (801, 901, 902, 25.0),
            (802, 902, 903, 75.0),
            (811, 910, 911, 30.0),
            (812, 910, 912, 30.0),
            (813, 910, 913, 30.0),
            (814, 910, 914, 30.0),
            (815, 910, 915, 30.0),
            (816, 910, 916, 30.0),
            (817, 910, 917, 30.0),
            (821, 921, 922, 6.0),
            (822, 922, 923, 6.0),
            (823, 923, 921, 6.0),
            (831, 931, 932, 6.0),
            (832, 932, 933, 6.0),
            (833, 933, 931, 6.0),
            (834, 933, 934, 40.0),
        ];

        let mut graph = NetworkGraph {
            junctions: junctions
                .into_iter()
                .map(|(id, lon, lat)| {
                    let record = JunctionRecord {
                        coordinate: Coordinate { lon, lat },
                        exiting: vec![],
                        entering: vec![],
                    };
                    (id, record)
                })
                .collect(),
            edges: edges
                .into_iter()
                .map(|(id, start, end, meters)| {
                    let record = EdgeRecord {
                        start: JunctionId(start),
                        end: JunctionId(end),
                        length: Length::from_meters(meters),
                    };
                    (id, record)
                })
                .collect(),
        };

        // ascending edge ids keep the adjacency lists deterministic
        for (&id, edge) in &graph.edges {
            let (start, end) = (edge.start, edge.end);
            if let Some(junction) = graph.junctions.get_mut(&start.0) {
                junction.exiting.push((EdgeId(id), end));
            }
            if let Some(junction) = graph.junctions.get_mut(&end.0) {
                junction.entering.push((EdgeId(id), start));
            }
        }

        graph
    }

    fn junction(&self, junction: JunctionId) -> &JunctionRecord {
        &self.junctions[&junction.0]
    }

    fn edge(&self, edge: EdgeId) -> &EdgeRecord {
        &self.edges[&edge.0]
    }
}

impl RoadGraph for NetworkGraph {
    type JunctionId = JunctionId;
    type EdgeId = EdgeId;

    fn get_junction_coordinate(&self, junction: JunctionId) -> Coordinate {
        self.junction(junction).coordinate
    }

    fn get_edge_start_junction(&self, edge: EdgeId) -> JunctionId {
        self.edge(edge).start
    }

    fn get_edge_end_junction(&self, edge: EdgeId) -> JunctionId {
        self.edge(edge).end
    }

    fn get_edge_length(&self, edge: EdgeId) -> Length {
        self.edge(edge).length
    }

    fn get_edge_frc(&self, _edge: EdgeId) -> Frc {
        // the whole network shares one road class
        Frc::Frc2
    }

    fn get_edge_fow(&self, _edge: EdgeId) -> Fow {
        Fow::SingleCarriageway
    }

    fn get_edge_reverse(&self, edge: EdgeId) -> EdgeId {
        // every road is one way
        edge
    }

    fn junction_exiting_edges(
        &self,
        junction: JunctionId,
    ) -> impl Iterator<Item = (EdgeId, JunctionId)> {
        self.junction(junction).exiting.iter().copied()
    }

    fn junction_entering_edges(
        &self,
        junction: JunctionId,
    ) -> impl Iterator<Item = (EdgeId, JunctionId)> {
        self.junction(junction).entering.iter().copied()
    }

    fn nearby_edges(
        &self,
        coordinate: Coordinate,
        is_last_point: bool,
    ) -> impl Iterator<Item = EdgeId> {
        let point = geo::Point::new(coordinate.lon, coordinate.lat);

        self.junctions
            .values()
            .filter(move |junction| {
                let location = geo::Point::new(junction.coordinate.lon, junction.coordinate.lat);
                Haversine.distance(location, point) <= NEARBY_EDGES_RADIUS.meters()
            })
            .flat_map(move |junction| {
                let edges = if is_last_point { &junction.entering } else { &junction.exiting };
                edges.iter().map(|&(edge, _)| edge)
            })
    }
}

#[test]
fn network_graph_clusters() {
    let graph: &NetworkGraph = &NETWORK_GRAPH;

    assert_eq!(graph.junction_exiting_edges(JunctionId(910)).count(), 7);
    assert_eq!(graph.junction_entering_edges(JunctionId(934)).collect::<Vec<_>>(), [(
        EdgeId(834),
        JunctionId(933)
    )]);

    let mut nearby: Vec<_> =
        graph.nearby_edges(Coordinate { lon: 13.45, lat: 52.52 }, false).collect();
    nearby.sort_unstable();
    assert_eq!(nearby, [EdgeId(821), EdgeId(822), EdgeId(823)]);
}
