use thiserror::Error;

/// Failure while resolving a location reference. Resolution aborts at the
/// first failing point; both kinds are expected, recoverable outcomes on
/// real world data and are counted by [`MatchStats`](crate::MatchStats).
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum MatchError {
    /// A point other than the last declares a zero distance to its
    /// successor, leaving no distance to expand over.
    #[error("Reference point {index} declares zero distance to the next point")]
    ZeroDistanceToNextPoint { index: usize },

    /// No candidate path exists for the point, e.g. because no edge lies
    /// nearby or every expansion dead-ends.
    #[error("Cannot find candidate paths for reference point {index}")]
    NoCandidateFound { index: usize },
}
