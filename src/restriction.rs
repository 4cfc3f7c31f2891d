use crate::{Fow, Frc, RoadGraph, Score};

/// Decides whether a graph edge conforms to the road attributes a location
/// reference point declares.
///
/// The matcher consults the checker for every edge it considers appending to
/// a candidate path. Implementations are free to use any edge attribute the
/// graph exposes; the declared FRC and FOW of the reference point are passed
/// alongside the edge.
pub trait RestrictionChecker<G: RoadGraph> {
    /// Returns whether the edge conforms to the wanted road attributes.
    ///
    /// Used by the ordinal ranking variant, where conformance is a hard
    /// filter with no notion of partial credit.
    fn check_restriction(&self, graph: &G, edge: G::EdgeId, frc: Frc, fow: Fow) -> bool;

    /// Returns whether the edge conforms, together with a road score in
    /// `0..=max_score` that is higher the closer the edge matches the wanted
    /// attributes.
    ///
    /// Used by the scored ranking variant, which accumulates the minimum
    /// score along each candidate path. The score of a failing edge is
    /// irrelevant since the edge is rejected outright.
    fn check_restriction_scored(
        &self,
        graph: &G,
        edge: G::EdgeId,
        frc: Frc,
        fow: Fow,
        max_score: Score,
    ) -> (bool, Score);
}

/// Conformance by functional road class distance.
///
/// An edge conforms when it is at most `frc_tolerance` classes less important
/// than the class the reference point declares. More important roads always
/// conform. Form of way is accepted but not inspected by this policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrcRestrictionPolicy {
    /// How many classes less important than the wanted FRC an edge may be
    /// while still conforming.
    pub frc_tolerance: u8,
}

impl Default for FrcRestrictionPolicy {
    fn default() -> Self {
        Self { frc_tolerance: 2 }
    }
}

impl FrcRestrictionPolicy {
    /// Least important FRC that still conforms to the wanted FRC.
    fn least_important_frc(&self, frc: Frc) -> Frc {
        let repr = (frc as u8).saturating_add(self.frc_tolerance);
        Frc::from_repr(repr.min(Frc::Frc7 as u8)).unwrap_or(Frc::Frc7)
    }
}

impl<G: RoadGraph> RestrictionChecker<G> for FrcRestrictionPolicy {
    fn check_restriction(&self, graph: &G, edge: G::EdgeId, frc: Frc, _fow: Fow) -> bool {
        graph.get_edge_frc(edge) <= self.least_important_frc(frc)
    }

    fn check_restriction_scored(
        &self,
        graph: &G,
        edge: G::EdgeId,
        frc: Frc,
        _fow: Fow,
        max_score: Score,
    ) -> (bool, Score) {
        let excess = u32::from((graph.get_edge_frc(edge) as u8).saturating_sub(frc as u8));
        let tolerance = u32::from(self.frc_tolerance);

        if excess > tolerance {
            return (false, Score::from(0.0));
        }

        let score = max_score * f64::from(1 + tolerance - excess) / f64::from(1 + tolerance);
        (true, score)
    }
}
