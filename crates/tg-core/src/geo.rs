//! Geographic coordinate types, Earth constants and distance units.
//!
//! `Coordinate` is `f64` latitude/longitude in decimal degrees, WGS84 datum.

use std::fmt;
use std::str::FromStr;

use crate::GeoError;

// ── Earth constants ───────────────────────────────────────────────────────────

/// Mean Earth radius in kilometres, used by every spherical formula.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = EARTH_RADIUS_KM * 1_000.0;

/// WGS84 semi-major axis, metres.
pub const WGS84_A: f64 = 6_378_137.0;

/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;

/// WGS84 semi-minor axis, metres (`a · (1 − f)`).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);

const METRES_PER_MILE: f64 = 1_609.344;
const METRES_PER_FOOT: f64 = 0.3048;

// ── Coordinate ────────────────────────────────────────────────────────────────

/// A WGS84 geographic coordinate in decimal degrees.
///
/// Nothing is validated on construction; see
/// [`is_valid_coordinates`](crate::format::is_valid_coordinates) for the
/// boundary check.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `(lat, lng)` in radians.
    #[inline]
    pub fn to_radians(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lng.to_radians())
    }

    /// Square bounding-box check in degree space, `half_deg` each way.
    #[inline]
    pub fn within_bbox(self, center: Coordinate, half_deg: f64) -> bool {
        (self.lat - center.lat).abs() <= half_deg
            && (self.lng - center.lng).abs() <= half_deg
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Interprets the tuple as `(lat, lng)`.
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned bounding rectangle in degrees.
///
/// `north >= south` always holds for bounds produced by this crate.  East and
/// west are stored as given; a box that crosses the antimeridian has
/// `west > east` and callers must normalise it themselves.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east:  f64,
    pub west:  f64,
}

impl Bounds {
    pub const fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self { north, south, east, west }
    }

    /// `true` if `point` lies inside or on the edge of the rectangle.
    pub fn contains(&self, point: Coordinate) -> bool {
        point.lat <= self.north
            && point.lat >= self.south
            && point.lng <= self.east
            && point.lng >= self.west
    }

    /// Arithmetic centre of the rectangle.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.north + self.south) * 0.5,
            (self.east + self.west) * 0.5,
        )
    }
}

// ── DistanceUnit ──────────────────────────────────────────────────────────────

/// Output unit for distance functions.  Metres unless stated otherwise.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistanceUnit {
    Kilometers,
    #[default]
    Meters,
    Miles,
    Feet,
}

impl DistanceUnit {
    /// Convert a distance in metres into this unit.
    #[inline]
    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => meters / 1_000.0,
            DistanceUnit::Meters     => meters,
            DistanceUnit::Miles      => meters / METRES_PER_MILE,
            DistanceUnit::Feet       => meters / METRES_PER_FOOT,
        }
    }

    /// Convert a distance in this unit back into metres.
    #[inline]
    pub fn to_meters(self, value: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => value * 1_000.0,
            DistanceUnit::Meters     => value,
            DistanceUnit::Miles      => value * METRES_PER_MILE,
            DistanceUnit::Feet       => value * METRES_PER_FOOT,
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Meters     => "m",
            DistanceUnit::Miles      => "mi",
            DistanceUnit::Feet       => "ft",
        };
        f.write_str(s)
    }
}

impl FromStr for DistanceUnit {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "km" => Ok(DistanceUnit::Kilometers),
            "m"  => Ok(DistanceUnit::Meters),
            "mi" => Ok(DistanceUnit::Miles),
            "ft" => Ok(DistanceUnit::Feet),
            other => Err(GeoError::InvalidArgument(format!(
                "unknown distance unit {other:?}: expected \"km\", \"m\", \"mi\" or \"ft\""
            ))),
        }
    }
}
