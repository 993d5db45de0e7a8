//! Geofence zone model.
//!
//! A zone's shape is an explicit [`Geometry`] enum, so every containment
//! dispatch is an exhaustive `match`.  Zones are immutable snapshots owned by
//! whatever store manages their lifecycle; this crate only reads them.

use tg_core::{Bounds, Coordinate, GeoResult, ZoneId};

use crate::containment::{distance_to_polygon, is_point_in_circle, is_point_in_polygon};
use crate::measure::{calculate_bounds, calculate_polygon_area, calculate_polygon_centroid};

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Circular geofence.  `radius_m > 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    pub center:   Coordinate,
    pub radius_m: f64,
}

impl Circle {
    pub const fn new(center: Coordinate, radius_m: f64) -> Self {
        Self { center, radius_m }
    }

    #[inline]
    pub fn contains(&self, point: Coordinate) -> bool {
        is_point_in_circle(point, self)
    }

    /// Planar area πr², m².
    pub fn area_m2(&self) -> f64 {
        std::f64::consts::PI * self.radius_m * self.radius_m
    }
}

/// Polygonal geofence.  Closure from the last vertex back to the first is
/// implicit; do not repeat the first vertex.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    pub vertices: Vec<Coordinate>,
}

impl Polygon {
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self { vertices }
    }

    /// `true` for fewer than three vertices (no enclosed area).
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }

    #[inline]
    pub fn contains(&self, point: Coordinate) -> bool {
        is_point_in_polygon(point, &self.vertices)
    }

    pub fn area_m2(&self) -> f64 {
        calculate_polygon_area(&self.vertices)
    }

    pub fn centroid(&self) -> GeoResult<Coordinate> {
        calculate_polygon_centroid(&self.vertices)
    }

    pub fn bounds(&self) -> GeoResult<Bounds> {
        calculate_bounds(&self.vertices)
    }
}

/// The shape of a zone.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Geometry {
    Circle(Circle),
    Polygon(Polygon),
}

impl Geometry {
    pub fn contains(&self, point: Coordinate) -> bool {
        match self {
            Geometry::Circle(c)  => c.contains(point),
            Geometry::Polygon(p) => p.contains(point),
        }
    }

    /// Distance in metres from `point` to the nearest point on the boundary,
    /// whichever side of it `point` is on.
    pub fn distance_to_boundary(&self, point: Coordinate) -> f64 {
        match self {
            Geometry::Circle(c) => {
                (tg_core::haversine_m(point, c.center) - c.radius_m).abs()
            }
            Geometry::Polygon(p) => distance_to_polygon(point, &p.vertices),
        }
    }

    pub fn area_m2(&self) -> f64 {
        match self {
            Geometry::Circle(c)  => c.area_m2(),
            Geometry::Polygon(p) => p.area_m2(),
        }
    }
}

// ── Risk & alerts ─────────────────────────────────────────────────────────────

/// Risk classification attached to a zone by its operators.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RiskLevel {
    #[default]
    Safe,
    Low,
    Medium,
    High,
    Restricted,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskLevel::Safe       => "safe",
            RiskLevel::Low        => "low",
            RiskLevel::Medium     => "medium",
            RiskLevel::High       => "high",
            RiskLevel::Restricted => "restricted",
        };
        f.pad(s)
    }
}

/// Which transitions raise an alert for this zone.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AlertConfig {
    pub alert_on_entry: bool,
    pub alert_on_exit:  bool,
    /// Raise once per visit when a tourist has been inside this long.
    pub dwell_time_limit_secs: Option<u64>,
}

// ── GeofenceZone ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeofenceZone {
    pub id:       ZoneId,
    pub name:     String,
    pub geometry: Geometry,
    #[cfg_attr(feature = "serde", serde(default))]
    pub risk:     RiskLevel,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alerts:   AlertConfig,
}

impl GeofenceZone {
    /// A zone with [`RiskLevel::Safe`] and no alerts configured.
    pub fn new(id: ZoneId, name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            id,
            name: name.into(),
            geometry,
            risk: RiskLevel::default(),
            alerts: AlertConfig::default(),
        }
    }

    pub fn with_risk(mut self, risk: RiskLevel) -> Self {
        self.risk = risk;
        self
    }

    pub fn with_alerts(mut self, alerts: AlertConfig) -> Self {
        self.alerts = alerts;
        self
    }

    #[inline]
    pub fn contains(&self, point: Coordinate) -> bool {
        self.geometry.contains(point)
    }
}
