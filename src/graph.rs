use std::fmt::Debug;
use std::hash::Hash;

use crate::{Coordinate, Fow, Frc, Length, geometry};

/// Directed road graph.
/// Exposes the behavior of a Geospatial Index and of a Road Network Graph.
/// Should be implemented by the graph that represents the map the matcher
/// runs on.
///
/// Every iterator method must yield its items in a deterministic order for
/// a given graph: the matcher breaks ranking ties by insertion order, so
/// output stability depends on it.
pub trait RoadGraph {
    /// Uniquely identify a junction that belongs to the graph.
    type JunctionId: Debug + Copy + Ord + Hash;
    /// Uniquely identify a directed edge that belongs to the graph.
    type EdgeId: Debug + Copy + Ord + Hash;

    /// Gets the junction coordinate.
    fn get_junction_coordinate(&self, junction: Self::JunctionId) -> Coordinate;

    /// Gets the start junction of the directed edge.
    fn get_edge_start_junction(&self, edge: Self::EdgeId) -> Self::JunctionId;

    /// Gets the end junction of the directed edge.
    fn get_edge_end_junction(&self, edge: Self::EdgeId) -> Self::JunctionId;

    /// Gets the total length of the directed edge.
    fn get_edge_length(&self, edge: Self::EdgeId) -> Length;

    /// Gets the Functional Road Class (FRC) of the directed edge.
    fn get_edge_frc(&self, edge: Self::EdgeId) -> Frc;

    /// Gets the Form of Way (FOW) of the directed edge.
    fn get_edge_fow(&self, edge: Self::EdgeId) -> Fow;

    /// Gets the directed edge covering the same road in the opposite
    /// direction. An edge without such a twin returns itself.
    fn get_edge_reverse(&self, edge: Self::EdgeId) -> Self::EdgeId;

    /// Returns true if the edge is a synthetic connector attaching an
    /// off-network position to the graph. A fake edge may start a candidate
    /// path but is never entered while growing one.
    fn is_edge_fake(&self, _edge: Self::EdgeId) -> bool {
        false
    }

    /// Returns true if the edge overlays at least part of a real road.
    /// A fake edge without a real part cannot even start a candidate path.
    fn edge_has_real_part(&self, edge: Self::EdgeId) -> bool {
        !self.is_edge_fake(edge)
    }

    /// Gets an iterator over all the outgoing edges from the given junction.
    /// For each edge returns the edge ID and the edge end junction.
    fn junction_exiting_edges(
        &self,
        junction: Self::JunctionId,
    ) -> impl Iterator<Item = (Self::EdgeId, Self::JunctionId)>;

    /// Gets an iterator over all the incoming edges to the given junction.
    /// For each edge returns the edge ID and the edge start junction.
    fn junction_entering_edges(
        &self,
        junction: Self::JunctionId,
    ) -> impl Iterator<Item = (Self::EdgeId, Self::JunctionId)>;

    /// Gets an iterator over the edges plausibly starting near the given
    /// coordinate, or plausibly ending near it when the coordinate belongs
    /// to the last point of a reference.
    /// No particular order is required and duplicates are fine; the
    /// resolver sorts and deduplicates the edges internally.
    /// Returns an empty iterator if no edge lies nearby.
    fn nearby_edges(
        &self,
        coordinate: Coordinate,
        is_last_point: bool,
    ) -> impl Iterator<Item = Self::EdgeId>;

    /// Gets the coordinate along the edge geometry which is at the given
    /// distance from the edge start junction.
    ///
    /// The distance is clamped within the edge length, therefore for
    /// distances lower or equal to zero the edge start junction coordinate
    /// will be returned and for distances greater or equal to the edge
    /// length the edge end junction coordinate will be returned.
    ///
    /// The provided implementation interpolates a straight segment between
    /// the junction coordinates; graphs carrying curved edge geometries
    /// should override it.
    fn get_coordinate_along_edge(&self, edge: Self::EdgeId, distance: Length) -> Coordinate {
        let start = self.get_junction_coordinate(self.get_edge_start_junction(edge));
        let end = self.get_junction_coordinate(self.get_edge_end_junction(edge));
        let ratio = distance.meters() / self.get_edge_length(edge).meters();
        geometry::interpolate(start, end, ratio)
    }
}

pub mod path;
