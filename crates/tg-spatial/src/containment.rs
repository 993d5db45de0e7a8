//! Geofence containment and point-to-boundary distance.
//!
//! Polygon tests treat `(lng, lat)` as planar Cartesian coordinates.  That is
//! accurate for zone-scale polygons (a few km across) and increasingly wrong
//! for polygons spanning many degrees or crossing the antimeridian.

use tg_core::{haversine_m, Coordinate};

use crate::zone::{Circle, GeofenceZone};

/// `true` iff the haversine distance from `point` to the centre is at most the
/// radius.  The boundary itself counts as inside.
#[inline]
pub fn is_point_in_circle(point: Coordinate, circle: &Circle) -> bool {
    haversine_m(point, circle.center) <= circle.radius_m
}

/// Ray-casting (even-odd) containment test.
///
/// Returns `false` for fewer than three vertices.  Points exactly on an edge
/// may land on either side.
pub fn is_point_in_polygon(point: Coordinate, vertices: &[Coordinate]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let (x, y) = (point.lng, point.lat);
    let mut inside = false;
    let mut j = vertices.len() - 1;

    for (i, vi) in vertices.iter().enumerate() {
        let vj = vertices[j];
        let (xi, yi) = (vi.lng, vi.lat);
        let (xj, yj) = (vj.lng, vj.lat);

        // The straddle check guarantees yj != yi, so the division is safe.
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Every zone whose geometry contains `point`, in input order.
pub fn get_containing_zones<'a>(point: Coordinate, zones: &'a [GeofenceZone]) -> Vec<&'a GeofenceZone> {
    zones.iter().filter(|z| z.contains(point)).collect()
}

/// Minimum distance in metres from `point` to any edge of the polygon,
/// including the closing edge.
///
/// A single vertex is treated as a zero-length edge.  An empty vertex list
/// has no edges and yields `f64::INFINITY`.
pub fn distance_to_polygon(point: Coordinate, vertices: &[Coordinate]) -> f64 {
    let n = vertices.len();
    (0..n)
        .map(|i| distance_to_line_segment(point, vertices[i], vertices[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min)
}

/// Distance in metres from `point` to the segment `[a, b]`.
///
/// The foot of the perpendicular is found in planar `(lng, lat)` space with
/// the projection parameter clamped to `[0, 1]`; the distance to that foot is
/// then measured with haversine.  `a == b` degenerates to the distance to `a`.
pub fn distance_to_line_segment(point: Coordinate, a: Coordinate, b: Coordinate) -> f64 {
    let dx = b.lng - a.lng;
    let dy = b.lat - a.lat;
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        return haversine_m(point, a);
    }

    let t = (((point.lng - a.lng) * dx + (point.lat - a.lat) * dy) / len_sq).clamp(0.0, 1.0);
    let foot = Coordinate::new(a.lat + t * dy, a.lng + t * dx);
    haversine_m(point, foot)
}
