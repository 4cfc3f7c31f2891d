//! Expansion of seed edges into paths covering the bearing distance of a
//! reference point.

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::matcher::{MatcherConfig, RankingVariant};
use crate::{
    Length, LocationReferencePoint, ReferenceSource, RestrictionChecker, RoadGraph, Score,
    geometry,
};

/// Identifies a link within its [`LinkArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkId(usize);

/// A single expanded edge together with the state of the path growing
/// through it. Links form backward chains through their parent ids: the
/// root link holds a seed edge next to the reference point and every child
/// extends the chain by one edge away from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link<EdgeId> {
    pub edge: EdgeId,
    pub parent: Option<LinkId>,
    /// Length of the chain covered before entering this edge.
    pub distance: Length,
    /// Score for the proximity of the seed edge to the reference point
    /// coordinate, shared by the whole chain.
    pub point_score: Score,
    /// Minimum road class score over the checked edges of the chain.
    pub min_road_score: Score,
    /// True if the chain starts with a fake edge.
    pub has_fake: bool,
}

/// Arena owning every link created while expanding one reference point.
#[derive(Debug)]
pub struct LinkArena<EdgeId> {
    links: Vec<Link<EdgeId>>,
}

impl<EdgeId> Default for LinkArena<EdgeId> {
    fn default() -> Self {
        Self { links: Vec::new() }
    }
}

impl<EdgeId: Copy> LinkArena<EdgeId> {
    pub fn push(&mut self, link: Link<EdgeId>) -> LinkId {
        let id = LinkId(self.links.len());
        self.links.push(link);
        id
    }

    pub fn get(&self, id: LinkId) -> &Link<EdgeId> {
        &self.links[id.0]
    }

    /// Edges of the chain ending at the given link, in travel order.
    pub fn path_edges(&self, link: LinkId, is_last_point: bool) -> Vec<EdgeId> {
        let mut edges = vec![];
        let mut current = Some(link);

        while let Some(id) = current {
            let link = self.get(id);
            edges.push(link.edge);
            current = link.parent;
        }

        // chains of the last point grow against the travel direction and
        // are therefore already collected in travel order
        if !is_last_point {
            edges.reverse();
        }
        edges
    }
}

/// Expands the given seed edges into all the paths covering the bearing
/// distance of the reference point.
///
/// Seeds grow along the travel direction of the reference, or against it
/// for the last point, by appending one edge at a time. A path whose
/// covered length reaches the bearing distance becomes terminal and stops
/// growing; shorter paths continue through the edges of their far
/// junction. Fake edges, U-turns onto the reverse edge, edges failing the
/// road class restriction and edges leading back to an already visited
/// junction never extend a path.
///
/// Returns the terminal links in expansion order; their chains live in the
/// provided arena.
#[allow(clippy::too_many_arguments)]
pub fn expand_all_paths<G, R>(
    config: &MatcherConfig,
    graph: &G,
    restrictions: &R,
    point: &LocationReferencePoint,
    source: ReferenceSource,
    is_last_point: bool,
    bearing_distance: Length,
    seeds: &[G::EdgeId],
    arena: &mut LinkArena<G::EdgeId>,
) -> Vec<LinkId>
where
    G: RoadGraph,
    R: RestrictionChecker<G>,
{
    debug_assert!(seeds.is_sorted());

    let mut terminals = vec![];
    let mut frontier = VecDeque::new();

    for &seed in seeds {
        if graph.is_edge_fake(seed) && !graph.edge_has_real_part(seed) {
            trace!("Skipping seed {seed:?} without a real part");
            continue;
        }

        let near = graph.get_junction_coordinate(edge_near_junction(graph, seed, is_last_point));
        let link = Link {
            edge: seed,
            parent: None,
            distance: Length::ZERO,
            point_score: point_score(config, geometry::distance(point.coordinate, near)),
            min_road_score: config.max_road_score,
            has_fake: graph.is_edge_fake(seed),
        };
        frontier.push_back(arena.push(link));
    }

    while let Some(id) = frontier.pop_front() {
        let link = *arena.get(id);
        let covered = link.distance + graph.get_edge_length(link.edge);

        if covered >= bearing_distance {
            terminals.push(id);
            continue;
        }

        let visited = chain_junctions(graph, arena, id, is_last_point);
        let junction = edge_far_junction(graph, link.edge, is_last_point);

        let next_edges: Box<dyn Iterator<Item = _>> = if is_last_point {
            Box::new(graph.junction_entering_edges(junction))
        } else {
            Box::new(graph.junction_exiting_edges(junction))
        };

        for (next, far) in next_edges {
            if graph.get_edge_reverse(next) == link.edge {
                trace!("Rejecting U-turn from {:?} onto {next:?}", link.edge);
                continue;
            }

            if graph.is_edge_fake(next) {
                trace!("Rejecting fake edge {next:?}");
                continue;
            }

            let mut min_road_score = link.min_road_score;
            if source == ReferenceSource::ReferenceTag {
                match config.ranking {
                    RankingVariant::Ordinal => {
                        if !restrictions.check_restriction(graph, next, point.frc, point.fow) {
                            trace!("Rejecting {next:?}: road class restriction failed");
                            continue;
                        }
                    }
                    RankingVariant::Scored => {
                        let (accepted, score) = restrictions.check_restriction_scored(
                            graph,
                            next,
                            point.frc,
                            point.fow,
                            config.max_road_score,
                        );
                        if !accepted {
                            trace!("Rejecting {next:?}: road class restriction failed");
                            continue;
                        }
                        min_road_score = min_road_score.min(score);
                    }
                }
            }

            if visited.contains(&far) {
                trace!("Rejecting {next:?}: junction {far:?} already visited");
                continue;
            }

            let child = Link {
                edge: next,
                parent: Some(id),
                distance: covered,
                point_score: link.point_score,
                min_road_score,
                has_fake: link.has_fake,
            };
            frontier.push_back(arena.push(child));
        }
    }

    terminals
}

/// Junction of the edge facing the reference point coordinate.
fn edge_near_junction<G: RoadGraph>(
    graph: &G,
    edge: G::EdgeId,
    is_last_point: bool,
) -> G::JunctionId {
    if is_last_point {
        graph.get_edge_end_junction(edge)
    } else {
        graph.get_edge_start_junction(edge)
    }
}

/// Junction of the edge facing away from the reference point coordinate.
fn edge_far_junction<G: RoadGraph>(
    graph: &G,
    edge: G::EdgeId,
    is_last_point: bool,
) -> G::JunctionId {
    if is_last_point {
        graph.get_edge_start_junction(edge)
    } else {
        graph.get_edge_end_junction(edge)
    }
}

/// All the junctions touched by the chain ending at the given link.
fn chain_junctions<G: RoadGraph>(
    graph: &G,
    arena: &LinkArena<G::EdgeId>,
    tail: LinkId,
    is_last_point: bool,
) -> FxHashSet<G::JunctionId> {
    let mut junctions = FxHashSet::default();
    junctions.insert(edge_far_junction(graph, arena.get(tail).edge, is_last_point));

    let mut current = Some(tail);
    while let Some(id) = current {
        let link = arena.get(id);
        junctions.insert(edge_near_junction(graph, link.edge, is_last_point));
        current = link.parent;
    }

    junctions
}

fn point_score(config: &MatcherConfig, distance_to_point: Length) -> Score {
    let falloff = 1.0 - distance_to_point.meters() / config.point_search_radius.meters();
    config.max_point_score * falloff.max(0.0)
}
