#![doc = include_str!("../README.md")]

mod error;
mod geometry;
mod graph;
mod matcher;
mod model;
mod restriction;

pub use error::MatchError;
pub use graph::RoadGraph;
pub use graph::path::{is_path_connected, is_path_cycle_free};
pub use matcher::candidates::{
    BearingPointsSelector, CandidatePath, PointCandidates, bearing_score, find_candidate_paths,
    score_candidate_paths,
};
pub use matcher::expansion::{Link, LinkArena, LinkId, expand_all_paths};
pub use matcher::resolver::{MatchStats, resolve_reference, resolve_references};
pub use matcher::{MatcherConfig, RankingVariant};
pub use model::{
    Bearing, Coordinate, Fow, Frc, Length, LocationReference, LocationReferencePoint,
    ReferenceSource, Score,
};
pub use restriction::{FrcRestrictionPolicy, RestrictionChecker};
