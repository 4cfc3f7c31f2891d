//! The matcher resolves the points of a location reference to ranked
//! candidate paths on the road graph.
//!
//! 1. Check the validity of the reference point distances.
//! 2. For each reference point collect nearby seed edges.
//! 3. Expand every seed along the travel direction until the expanded paths
//!    cover the bearing distance.
//! 4. Rank the expanded paths with the configured ranking variant and keep
//!    the best candidates for each point.

pub(crate) mod candidates;
pub(crate) mod expansion;
pub(crate) mod resolver;

use crate::model::{Length, Score};

/// Ranking applied to the expanded candidate paths of a reference point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RankingVariant {
    /// Orders candidates by bearing bucket difference, covered distance
    /// difference and distance to the path start, preferring paths made of
    /// real edges over paths ending in a fake edge.
    Ordinal,
    /// Orders candidates by a combined point, road class and bearing score.
    #[default]
    Scored,
}

#[derive(Debug, Clone, Copy)]
pub struct MatcherConfig {
    /// Ranking variant applied to the expanded candidate paths.
    pub ranking: RankingVariant,
    /// Maximum distance from the reference point coordinate to the junctions
    /// whose edges seed the expansion.
    pub point_search_radius: Length,
    /// Distance along the expanded path over which its bearing is measured.
    pub bearing_distance: Length,
    /// Maximum number of candidate paths kept per reference point.
    pub max_candidates: usize,
    /// Maximum number of candidate paths ending in a fake edge kept per
    /// reference point by the ordinal ranking.
    pub max_fake_candidates: usize,
    /// Maximum difference in degrees between the candidate bearing and the
    /// reference point bearing for the candidate to be accepted by the
    /// scored ranking.
    pub max_bearing_deviation: f64,
    /// Score of a candidate path starting at the reference point coordinate.
    pub max_point_score: Score,
    /// Score of a candidate path whose edges all match the wanted road class.
    pub max_road_score: Score,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            ranking: RankingVariant::default(),
            point_search_radius: Length::from_meters(100.0),
            bearing_distance: Length::from_meters(25.0),
            max_candidates: 5,
            max_fake_candidates: 2,
            max_bearing_deviation: 50.0,
            max_point_score: Score::from(100.0),
            max_road_score: Score::from(30.0),
        }
    }
}
