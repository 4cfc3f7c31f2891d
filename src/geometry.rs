//! Geodesic helpers shared by the matcher internals.

use geo::{Distance, Haversine, InterpolatableLine, LineString, Point};

use crate::{Coordinate, Length};

fn point(coordinate: Coordinate) -> Point {
    Point::new(coordinate.lon, coordinate.lat)
}

/// Haversine distance between two coordinates.
pub(crate) fn distance(from: Coordinate, to: Coordinate) -> Length {
    Length::from_meters(Haversine.distance(point(from), point(to)))
}

/// Initial bearing from one coordinate to another, normalized to [0, 360)
/// degrees clockwise from true North.
pub(crate) fn bearing_degrees(from: Coordinate, to: Coordinate) -> f64 {
    use geo::Bearing;
    Haversine.bearing(point(from), point(to)).rem_euclid(360.0)
}

/// Circular difference between two angles in degrees, in [0, 180].
pub(crate) fn bearing_deviation_degrees(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    diff.min(360.0 - diff)
}

/// Coordinate at `ratio` of the geodesic between two coordinates.
pub(crate) fn interpolate(from: Coordinate, to: Coordinate, ratio: f64) -> Coordinate {
    let line = LineString::from(vec![(from.lon, from.lat), (to.lon, to.lat)]);
    let point = line
        .point_at_ratio_from_start(&Haversine, ratio.clamp(0.0, 1.0))
        .unwrap_or_else(|| point(from));
    Coordinate { lon: point.x(), lat: point.y() }
}
