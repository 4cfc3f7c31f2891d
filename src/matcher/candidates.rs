//! Ranking of expanded paths into the candidate lists of a reference point.

use std::cmp::Reverse;
use std::ops::{Deref, DerefMut};

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::matcher::MatcherConfig;
use crate::matcher::expansion::{LinkArena, LinkId};
use crate::{
    Bearing, Coordinate, Length, LocationReferencePoint, ReferenceSource, RoadGraph, Score,
    geometry,
};

/// How many links of a terminal chain become candidates of their own.
const CANDIDATE_TRACE_BACK: usize = 3;

/// Bearing score of a perfectly aligned path.
const MAX_BEARING_SCORE: f64 = 60.0;

/// Controls how fast the bearing score decays with the angular deviation.
const BEARING_SCORE_DIVISOR: f64 = 4.3;

/// A path of edges in travel order matching one reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePath<EdgeId> {
    pub edges: Vec<EdgeId>,
    /// Combined score of the path, `None` when ranked ordinally.
    pub score: Option<Score>,
}

/// Ranked candidate paths of a single reference point, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCandidates<EdgeId>(Vec<CandidatePath<EdgeId>>);

impl<EdgeId> From<Vec<CandidatePath<EdgeId>>> for PointCandidates<EdgeId> {
    fn from(paths: Vec<CandidatePath<EdgeId>>) -> Self {
        Self(paths)
    }
}

impl<EdgeId> Deref for PointCandidates<EdgeId> {
    type Target = Vec<CandidatePath<EdgeId>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<EdgeId> DerefMut for PointCandidates<EdgeId> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Computes the two points between which the bearing of a candidate path
/// is measured.
#[derive(Debug, Clone, Copy)]
pub struct BearingPointsSelector {
    pub bearing_distance: Length,
    pub is_last_point: bool,
}

impl BearingPointsSelector {
    /// Start point of a chain: the coordinate of the given first chain
    /// edge's junction facing the reference point.
    pub fn path_start_point<G: RoadGraph>(&self, graph: &G, edge: G::EdgeId) -> Coordinate {
        let junction = if self.is_last_point {
            graph.get_edge_end_junction(edge)
        } else {
            graph.get_edge_start_junction(edge)
        };
        graph.get_junction_coordinate(junction)
    }

    /// End point of a chain: the point on the given edge where the covered
    /// length reaches the bearing distance, or the far endpoint of the
    /// edge when the bearing distance reaches beyond it. `distance` is the
    /// length covered by the chain before this edge.
    pub fn path_end_point<G: RoadGraph>(
        &self,
        graph: &G,
        edge: G::EdgeId,
        distance: Length,
    ) -> Coordinate {
        let length = graph.get_edge_length(edge);
        let within = self.bearing_distance - distance;

        if within >= length {
            let junction = if self.is_last_point {
                graph.get_edge_start_junction(edge)
            } else {
                graph.get_edge_end_junction(edge)
            };
            graph.get_junction_coordinate(junction)
        } else if self.is_last_point {
            // last point chains run against the travel direction, so the
            // bearing distance is measured back from the edge end
            graph.get_coordinate_along_edge(edge, length - within)
        } else {
            graph.get_coordinate_along_edge(edge, within)
        }
    }
}

/// Score of the angular deviation in degrees between a measured path
/// bearing and the bearing of a reference point.
pub fn bearing_score(deviation: f64) -> Score {
    Score::from(MAX_BEARING_SCORE / (1.0 + deviation / BEARING_SCORE_DIVISOR))
}

struct ProvisionalCandidate<EdgeId> {
    key: (u8, Length, Length),
    edges: Vec<EdgeId>,
    has_fake: bool,
}

/// Ranks the expanded chains of a reference point by how well their
/// bearing bucket, covered length and start point agree with it.
///
/// Every terminal chain and its up to two enclosing prefixes are ranked by
/// the ascending key (bearing bucket difference, covered length difference,
/// start point distance); chains with equal keys collapse into the first
/// one found. Chains rooted in a fake edge always rank after the pure
/// ones: the result holds at most `max_candidates` pure paths followed by
/// at most `max_fake_candidates` fake ones.
pub fn find_candidate_paths<G: RoadGraph>(
    config: &MatcherConfig,
    graph: &G,
    point: &LocationReferencePoint,
    is_last_point: bool,
    bearing_distance: Length,
    arena: &LinkArena<G::EdgeId>,
    terminals: &[LinkId],
) -> PointCandidates<G::EdgeId> {
    let selector = BearingPointsSelector { bearing_distance, is_last_point };
    let mut provisional = vec![];
    let mut seen = FxHashSet::default();

    for &terminal in terminals {
        let mut current = Some(terminal);

        for _ in 0..CANDIDATE_TRACE_BACK {
            let Some(id) = current else { break };
            if !seen.insert(id) {
                break;
            }

            let link = arena.get(id);
            let edges = arena.path_edges(id, is_last_point);
            debug_assert!(!edges.is_empty());

            let root = if is_last_point { edges[edges.len() - 1] } else { edges[0] };
            let start = selector.path_start_point(graph, root);
            let end = selector.path_end_point(graph, link.edge, link.distance);
            let measured = Bearing::from_degrees(geometry::bearing_degrees(start, end));

            let covered = link.distance + graph.get_edge_length(link.edge);
            let key = (
                measured.difference(point.bearing),
                covered.abs_diff(bearing_distance),
                geometry::distance(start, point.coordinate),
            );

            trace!("Traced candidate {edges:?} with key {key:?}");
            provisional.push(ProvisionalCandidate { key, edges, has_fake: link.has_fake });
            current = link.parent;
        }
    }

    provisional.sort_by_key(|candidate| candidate.key);

    let (mut pure, mut fake): (Vec<_>, Vec<_>) =
        provisional.into_iter().partition(|candidate| !candidate.has_fake);

    pure.dedup_by_key(|candidate| candidate.key);
    fake.dedup_by_key(|candidate| candidate.key);
    pure.truncate(config.max_candidates);
    fake.truncate(config.max_fake_candidates);

    pure.into_iter()
        .chain(fake)
        .map(|candidate| CandidatePath { edges: candidate.edges, score: None })
        .collect::<Vec<_>>()
        .into()
}

/// Ranks the expanded chains of a reference point by a combined score,
/// best first.
///
/// Every terminal chain and its up to two enclosing prefixes are scored
/// with the sum of the point score, the minimum road score and the bearing
/// score of their angular deviation. Chains deviating by more than
/// `max_bearing_deviation` degrees are dropped, unless the reference
/// carries coordinates only and its bearings are not trusted. The result
/// holds at most `max_candidates` paths.
#[allow(clippy::too_many_arguments)]
pub fn score_candidate_paths<G: RoadGraph>(
    config: &MatcherConfig,
    graph: &G,
    point: &LocationReferencePoint,
    source: ReferenceSource,
    is_last_point: bool,
    bearing_distance: Length,
    arena: &LinkArena<G::EdgeId>,
    terminals: &[LinkId],
) -> PointCandidates<G::EdgeId> {
    let selector = BearingPointsSelector { bearing_distance, is_last_point };
    let mut candidates = vec![];
    let mut seen = FxHashSet::default();

    for &terminal in terminals {
        let mut current = Some(terminal);

        for _ in 0..CANDIDATE_TRACE_BACK {
            let Some(id) = current else { break };
            if !seen.insert(id) {
                break;
            }

            let link = arena.get(id);
            let edges = arena.path_edges(id, is_last_point);
            debug_assert!(!edges.is_empty());

            let root = if is_last_point { edges[edges.len() - 1] } else { edges[0] };
            let start = selector.path_start_point(graph, root);
            let end = selector.path_end_point(graph, link.edge, link.distance);
            let measured = geometry::bearing_degrees(start, end);
            let deviation = geometry::bearing_deviation_degrees(measured, point.bearing.degrees());
            current = link.parent;

            if deviation > config.max_bearing_deviation
                && source != ReferenceSource::CoordinatesOnly
            {
                trace!("Rejecting candidate {edges:?}: bearing deviates by {deviation:.1} degrees");
                continue;
            }

            let score = link.point_score + link.min_road_score + bearing_score(deviation);
            debug!("Accepted candidate {edges:?} with score {score}");
            candidates.push(CandidatePath { edges, score: Some(score) });
        }
    }

    candidates.sort_by_key(|candidate| Reverse(candidate.score));
    candidates.truncate(config.max_candidates);
    candidates.into()
}
