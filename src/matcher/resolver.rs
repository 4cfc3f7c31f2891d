//! Resolution of complete location references against a road graph.

use tracing::{debug, warn};

use crate::matcher::candidates::{PointCandidates, find_candidate_paths, score_candidate_paths};
use crate::matcher::expansion::{LinkArena, expand_all_paths};
use crate::matcher::{MatcherConfig, RankingVariant};
use crate::{Length, LocationReference, MatchError, RestrictionChecker, RoadGraph};

/// Tallies of a batch of resolved references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// References resolved to candidates for every point.
    pub references_resolved: usize,
    /// References dropped because a point other than the last declares a
    /// zero distance to its successor.
    pub zero_distance_failures: usize,
    /// References dropped because a point matched no candidate path.
    pub no_candidate_failures: usize,
}

/// Resolves every point of a location reference to a non-empty ranked
/// list of candidate paths, best first.
///
/// The reference must hold at least two points. Expansion covers at most
/// the configured bearing distance, clamped to the distance declared
/// between the point and its successor (the distance declared by its
/// predecessor for the last point).
///
/// Fails with [`MatchError::ZeroDistanceToNextPoint`] when a point other
/// than the last declares a zero distance to its successor, and with
/// [`MatchError::NoCandidateFound`] when a point matches no path at all.
pub fn resolve_reference<G, R>(
    config: &MatcherConfig,
    graph: &G,
    restrictions: &R,
    reference: &LocationReference,
) -> Result<Vec<PointCandidates<G::EdgeId>>, MatchError>
where
    G: RoadGraph,
    R: RestrictionChecker<G>,
{
    let points = &reference.points;
    debug_assert!(points.len() >= 2);

    let mut candidates = Vec::with_capacity(points.len());

    for (index, point) in points.iter().enumerate() {
        let is_last_point = index + 1 == points.len();

        let governing_distance = if is_last_point {
            points[index - 1].distance_to_next
        } else if point.distance_to_next == Length::ZERO {
            return Err(MatchError::ZeroDistanceToNextPoint { index });
        } else {
            point.distance_to_next
        };
        let bearing_distance = config.bearing_distance.min(governing_distance);

        let mut seeds: Vec<_> = graph.nearby_edges(point.coordinate, is_last_point).collect();
        seeds.sort_unstable();
        seeds.dedup();

        let mut arena = LinkArena::default();
        let terminals = expand_all_paths(
            config,
            graph,
            restrictions,
            point,
            reference.source,
            is_last_point,
            bearing_distance,
            &seeds,
            &mut arena,
        );

        let ranked = match config.ranking {
            RankingVariant::Ordinal => find_candidate_paths(
                config,
                graph,
                point,
                is_last_point,
                bearing_distance,
                &arena,
                &terminals,
            ),
            RankingVariant::Scored => score_candidate_paths(
                config,
                graph,
                point,
                reference.source,
                is_last_point,
                bearing_distance,
                &arena,
                &terminals,
            ),
        };

        if ranked.is_empty() {
            return Err(MatchError::NoCandidateFound { index });
        }

        debug!("Resolved point {index} to {} candidate paths", ranked.len());
        candidates.push(ranked);
    }

    Ok(candidates)
}

/// Resolves a batch of location references independently.
///
/// A failing reference leaves `None` in its slot and is tallied in the
/// returned stats instead of failing the batch.
pub fn resolve_references<G, R>(
    config: &MatcherConfig,
    graph: &G,
    restrictions: &R,
    references: &[LocationReference],
) -> (Vec<Option<Vec<PointCandidates<G::EdgeId>>>>, MatchStats)
where
    G: RoadGraph,
    R: RestrictionChecker<G>,
{
    let mut stats = MatchStats::default();

    let resolved = references
        .iter()
        .map(|reference| match resolve_reference(config, graph, restrictions, reference) {
            Ok(candidates) => {
                stats.references_resolved += 1;
                Some(candidates)
            }
            Err(error) => {
                warn!("Skipping location reference: {error}");
                match error {
                    MatchError::ZeroDistanceToNextPoint { .. } => {
                        stats.zero_distance_failures += 1;
                    }
                    MatchError::NoCandidateFound { .. } => stats.no_candidate_failures += 1,
                }
                None
            }
        })
        .collect();

    (resolved, stats)
}
