use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

use approx::abs_diff_eq;
use ordered_float::OrderedFloat;
use strum::FromRepr;

/// Functional Road Class.
/// The functional road class (FRC) of an edge is a road classification based
/// on the importance of the road. Lower values identify more important roads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr)]
#[repr(u8)]
pub enum Frc {
    /// Main road, highest importance.
    Frc0 = 0,
    /// First class road.
    Frc1 = 1,
    /// Second class road.
    Frc2 = 2,
    /// Third class road.
    Frc3 = 3,
    /// Fourth class road.
    Frc4 = 4,
    /// Fifth class road.
    Frc5 = 5,
    /// Sixth class road.
    Frc6 = 6,
    /// Other class road, lowest importance.
    Frc7 = 7,
}

impl Default for Frc {
    fn default() -> Self {
        Self::Frc7
    }
}

/// Form of Way.
/// The form of way (FOW) describes the physical road type of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, FromRepr)]
#[repr(u8)]
pub enum Fow {
    /// The physical road type is unknown.
    Undefined = 0,
    /// A road permitted for motorized vehicles only, with two or more
    /// physically separated carriageways and no single level-crossings.
    Motorway = 1,
    /// A road with physically separated carriageways regardless of the
    /// number of lanes, which is not a motorway.
    MultipleCarriageway = 2,
    /// A road without separate carriageways.
    SingleCarriageway = 3,
    /// A road forming a ring on which traffic travels in one direction only.
    Roundabout = 4,
    /// An open area (partly) enclosed by roads which is used for non-traffic
    /// purposes and which is not a roundabout.
    TrafficSquare = 5,
    /// A road especially designed to enter or leave another road.
    SlipRoad = 6,
    /// The physical road type is known but fits no other category.
    Other = 7,
}

impl Default for Fow {
    fn default() -> Self {
        Self::Undefined
    }
}

/// Distance in meters, totally ordered.
#[derive(Debug, Clone, Copy, Default)]
pub struct Length(f64);

impl Length {
    pub const ZERO: Self = Self(0.0);
    pub const MAX: Self = Self(f64::MAX);

    pub const fn from_meters(meters: f64) -> Self {
        Self(meters)
    }

    pub const fn meters(&self) -> f64 {
        self.0
    }

    pub fn abs_diff(&self, other: Self) -> Self {
        Self((self.0 - other.0).abs())
    }
}

impl PartialEq for Length {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0).is_eq()
    }
}

impl Eq for Length {}

impl PartialOrd for Length {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Length {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Add for Length {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Candidate score, usable as a totally ordered sort key and accumulator.
pub type Score = OrderedFloat<f64>;

/// Width of one bearing bucket in degrees.
const DEGREES_PER_BUCKET: f64 = 360.0 / 256.0;

/// The bearing describes the angle between the true North and the road,
/// quantized into 256 buckets of 360/256 degrees each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Bearing(u8);

impl Bearing {
    /// Quantizes an angle in degrees, truncating to the containing bucket.
    /// Angles outside [0, 360) clamp to the first or last bucket.
    pub fn from_degrees(degrees: f64) -> Self {
        Self((degrees / DEGREES_PER_BUCKET).clamp(0.0, 255.0) as u8)
    }

    pub const fn from_bucket(bucket: u8) -> Self {
        Self(bucket)
    }

    pub const fn bucket(&self) -> u8 {
        self.0
    }

    /// Angle of the lower bound of this bucket in degrees.
    pub fn degrees(&self) -> f64 {
        f64::from(self.0) * DEGREES_PER_BUCKET
    }

    /// Plain absolute difference in buckets, deliberately not circular:
    /// buckets 0 and 255 are 255 apart.
    pub const fn difference(&self, other: Self) -> u8 {
        self.0.abs_diff(other.0)
    }
}

/// Coordinate pair stands for a pair of WGS84 longitude (lon) and latitude
/// (lat) values specifying a geometric point in a digital map.
#[derive(Debug, Clone, Copy, Default)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        const EPSILON: f64 = 1e-5;
        abs_diff_eq!(self.lon, other.lon, epsilon = EPSILON)
            && abs_diff_eq!(self.lat, other.lat, epsilon = EPSILON)
    }
}

/// A single location reference point (LRP). The coordinate refers to a
/// junction of the road network or a point on an edge, the line attributes
/// describe the road the point sits on, and the distance covers the path
/// towards the next point of the reference.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LocationReferencePoint {
    pub coordinate: Coordinate,
    /// Bearing of the road at this point, measured in the travel direction
    /// of the reference (the last point measures against travel direction).
    pub bearing: Bearing,
    pub frc: Frc,
    pub fow: Fow,
    /// Distance to the next point of the reference, zero for the last one.
    pub distance_to_next: Length,
}

/// Provenance of a location reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReferenceSource {
    /// Decoded from a full location reference tag: bearing, FRC and FOW
    /// carry meaningful values.
    #[default]
    ReferenceTag,
    /// Synthesized from raw coordinates only: bearing, FRC and FOW are
    /// placeholders and must not constrain matching.
    CoordinatesOnly,
}

/// An ordered sequence of location reference points describing a path
/// within a map. A valid reference has at least two points; all points
/// except the last declare a non-zero distance to their successor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationReference {
    pub points: Vec<LocationReferencePoint>,
    pub source: ReferenceSource,
}
