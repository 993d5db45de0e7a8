//! Route analysis over ordered waypoints and candidate point sets.
//!
//! # Ordering
//!
//! [`optimize_route`] is a greedy nearest-neighbour heuristic, O(n²).  The
//! order it returns is not guaranteed to be the shortest tour.
//!
//! All distances are haversine metres.

use tg_core::{
    calculate_bearing, haversine_m, interpolate_great_circle, Coordinate, GeoError, GeoResult,
};

// ── RouteSegment ──────────────────────────────────────────────────────────────

/// One leg of a route with its derived length and initial bearing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSegment {
    pub start:       Coordinate,
    pub end:         Coordinate,
    /// Haversine length, metres.
    pub distance_m:  f64,
    /// Initial bearing from `start`, degrees in `[0, 360)`.
    pub bearing_deg: f64,
    /// Intermediate points between `start` and `end`, exclusive.  Empty unless
    /// filled by [`with_waypoints`](Self::with_waypoints).
    pub waypoints:   Vec<Coordinate>,
}

impl RouteSegment {
    pub fn new(start: Coordinate, end: Coordinate) -> Self {
        Self {
            start,
            end,
            distance_m: haversine_m(start, end),
            bearing_deg: calculate_bearing(start, end),
            waypoints: Vec::new(),
        }
    }

    /// Fill `waypoints` with `n` great-circle intermediates.
    pub fn with_waypoints(mut self, n: usize) -> Self {
        let mut pts = interpolate_great_circle(self.start, self.end, n);
        // Drop the endpoints; they are already `start` and `end`.
        pts.pop();
        pts.remove(0);
        self.waypoints = pts;
        self
    }

    /// `true` if the leg has zero length.
    pub fn is_trivial(&self) -> bool {
        self.distance_m == 0.0
    }
}

/// Consecutive segments `w[0]→w[1]`, `w[1]→w[2]`, …  Empty for fewer than two
/// waypoints.
pub fn build_route_segments(waypoints: &[Coordinate]) -> Vec<RouteSegment> {
    waypoints
        .windows(2)
        .map(|w| RouteSegment::new(w[0], w[1]))
        .collect()
}

// ── Distances ─────────────────────────────────────────────────────────────────

/// Sum of consecutive haversine distances.  `0.0` for zero or one waypoint.
pub fn calculate_route_distance(waypoints: &[Coordinate]) -> f64 {
    waypoints.windows(2).map(|w| haversine_m(w[0], w[1])).sum()
}

// ── Ordering ──────────────────────────────────────────────────────────────────

/// Visiting order produced by the nearest-neighbour heuristic, as a
/// permutation of input indices beginning with `start_index`.
///
/// Ties go to the lowest index.  Empty input yields an empty order.
///
/// # Errors
///
/// [`GeoError::IndexOutOfRange`] if `start_index` is not a valid index into
/// a non-empty `waypoints`.
pub fn optimize_route(waypoints: &[Coordinate], start_index: usize) -> GeoResult<Vec<usize>> {
    let n = waypoints.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if start_index >= n {
        return Err(GeoError::IndexOutOfRange { index: start_index, len: n });
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = start_index;
    visited[current] = true;
    order.push(current);

    while order.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for (i, &p) in waypoints.iter().enumerate() {
            if visited[i] {
                continue;
            }
            let d = haversine_m(waypoints[current], p);
            // Strict `<` keeps the first index on ties.
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        // At least one unvisited waypoint remains while order.len() < n.
        let Some((next, _)) = best else { break };
        visited[next] = true;
        order.push(next);
        current = next;
    }

    Ok(order)
}

// ── Candidate queries ─────────────────────────────────────────────────────────

/// Result of [`find_closest_point`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosestPoint {
    pub index:      usize,
    pub distance_m: f64,
}

/// A candidate annotated with its distance from the query centre.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointWithDistance {
    /// Position in the candidate slice.
    pub index:      usize,
    pub point:      Coordinate,
    pub distance_m: f64,
}

/// Linear scan for the candidate nearest to `target`.  Ties go to the lowest
/// index.
///
/// # Errors
///
/// [`GeoError::EmptyInput`] for an empty candidate slice.
pub fn find_closest_point(target: Coordinate, candidates: &[Coordinate]) -> GeoResult<ClosestPoint> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, &p)| ClosestPoint { index, distance_m: haversine_m(target, p) })
        .reduce(|best, c| if c.distance_m < best.distance_m { c } else { best })
        .ok_or(GeoError::EmptyInput { what: "find_closest_point" })
}

/// All candidates within `radius_m` of `center` (inclusive), nearest first.
///
/// Equal distances keep their input order.
pub fn find_points_within_radius(
    center: Coordinate,
    radius_m: f64,
    candidates: &[Coordinate],
) -> Vec<PointWithDistance> {
    let mut hits: Vec<PointWithDistance> = candidates
        .iter()
        .enumerate()
        .filter_map(|(index, &point)| {
            let distance_m = haversine_m(center, point);
            (distance_m <= radius_m).then_some(PointWithDistance { index, point, distance_m })
        })
        .collect();
    hits.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    hits
}
