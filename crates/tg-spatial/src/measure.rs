//! Bounding boxes, polygon area and centroid.

use tg_core::geo::EARTH_RADIUS_M;
use tg_core::{Bounds, Coordinate, GeoError, GeoResult};

/// Min/max bounding box over `points`.
///
/// # Errors
///
/// [`GeoError::EmptyInput`] for an empty slice.
pub fn calculate_bounds(points: &[Coordinate]) -> GeoResult<Bounds> {
    let (first, rest) = points
        .split_first()
        .ok_or(GeoError::EmptyInput { what: "calculate_bounds" })?;

    let init = Bounds::new(first.lat, first.lat, first.lng, first.lng);
    Ok(rest.iter().fold(init, |b, p| Bounds {
        north: b.north.max(p.lat),
        south: b.south.min(p.lat),
        east:  b.east.max(p.lng),
        west:  b.west.min(p.lng),
    }))
}

/// Area of a polygon on the sphere, m².
///
/// Sums `Δλ · (2 + sin φ₁ + sin φ₂)` over every edge (closing edge included)
/// and scales by `R² / 2`.  Winding order does not matter; the absolute value
/// is returned.  Fewer than three vertices enclose nothing and return `0.0`.
pub fn calculate_polygon_area(vertices: &[Coordinate]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }

    let sum: f64 = (0..n)
        .map(|i| {
            let p1 = vertices[i];
            let p2 = vertices[(i + 1) % n];
            (p2.lng - p1.lng).to_radians()
                * (2.0 + p1.lat.to_radians().sin() + p2.lat.to_radians().sin())
        })
        .sum();

    (sum * EARTH_RADIUS_M * EARTH_RADIUS_M * 0.5).abs()
}

/// Arithmetic mean of the vertices.
///
/// Not the area-weighted centroid.  Concave or unevenly sampled outlines pull
/// it towards their densest vertices.
///
/// # Errors
///
/// [`GeoError::EmptyInput`] for an empty slice.
pub fn calculate_polygon_centroid(vertices: &[Coordinate]) -> GeoResult<Coordinate> {
    if vertices.is_empty() {
        return Err(GeoError::EmptyInput { what: "calculate_polygon_centroid" });
    }

    let n = vertices.len() as f64;
    let (lat_sum, lng_sum) = vertices
        .iter()
        .fold((0.0, 0.0), |(la, ln), p| (la + p.lat, ln + p.lng));
    Ok(Coordinate::new(lat_sum / n, lng_sum / n))
}
