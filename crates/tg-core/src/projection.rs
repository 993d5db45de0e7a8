//! Forward projection, great-circle interpolation and midpoints on a
//! spherical Earth.

use crate::distance::{calculate_bearing, haversine_m};
use crate::format::normalize_longitude;
use crate::geo::EARTH_RADIUS_M;
use crate::Coordinate;

/// Point reached by travelling `distance_m` metres from `start` on the
/// initial bearing `bearing_deg`.
///
/// The returned longitude lies in `(-180, 180]`.
pub fn calculate_destination(start: Coordinate, distance_m: f64, bearing_deg: f64) -> Coordinate {
    let (lat1, lng1) = start.to_radians();
    let bearing = bearing_deg.to_radians();
    let delta = distance_m / EARTH_RADIUS_M;

    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_delta, cos_delta) = delta.sin_cos();

    let lat2 = (sin_lat1 * cos_delta + cos_lat1 * sin_delta * bearing.cos()).asin();
    let lng2 = lng1
        + (bearing.sin() * sin_delta * cos_lat1).atan2(cos_delta - sin_lat1 * lat2.sin());

    Coordinate::new(lat2.to_degrees(), wrap_half_open(lng2.to_degrees()))
}

/// `numPoints + 2` coordinates from `start` to `end`: the two endpoints with
/// `num_points` evenly spaced intermediates between them.
///
/// Intermediates are projected along the *initial* bearing from `start`, at
/// `i / (num_points + 1)` of the total haversine distance.
pub fn interpolate_great_circle(start: Coordinate, end: Coordinate, num_points: usize) -> Vec<Coordinate> {
    let mut out = Vec::with_capacity(num_points + 2);
    out.push(start);

    if num_points > 0 {
        let total = haversine_m(start, end);
        let bearing = calculate_bearing(start, end);
        let steps = (num_points + 1) as f64;
        out.extend(
            (1..=num_points).map(|i| calculate_destination(start, total * (i as f64 / steps), bearing)),
        );
    }

    out.push(end);
    out
}

/// Geographic midpoint of `p1` and `p2` along their great circle.
///
/// Vector form; valid across the antimeridian.
pub fn calculate_midpoint(p1: Coordinate, p2: Coordinate) -> Coordinate {
    let (lat1, lng1) = p1.to_radians();
    let (lat2, lng2) = p2.to_radians();
    let d_lng = lng2 - lng1;

    let bx = lat2.cos() * d_lng.cos();
    let by = lat2.cos() * d_lng.sin();

    let lat_m = (lat1.sin() + lat2.sin()).atan2(((lat1.cos() + bx).powi(2) + by * by).sqrt());
    let lng_m = lng1 + by.atan2(lat1.cos() + bx);

    Coordinate::new(lat_m.to_degrees(), normalize_longitude(lng_m.to_degrees()))
}

/// Wrap into `(-180, 180]`.
fn wrap_half_open(lng: f64) -> f64 {
    let wrapped = (lng + 540.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 { 180.0 } else { wrapped }
}
