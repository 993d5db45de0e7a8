//! Random and regular-grid point generation inside a [`Bounds`] rectangle.
//!
//! Used to seed tests and simulations; nothing on the alerting path calls
//! these.

use crate::{Bounds, Coordinate, GeoError, GeoResult, GeoRng};

/// `count` points drawn uniformly (in degree space) from `bounds`.
///
/// A zero-height or zero-width rectangle is fine; every point then shares that
/// latitude or longitude.
pub fn generate_random_points(bounds: &Bounds, count: usize, rng: &mut GeoRng) -> Vec<Coordinate> {
    let lat_span = bounds.north - bounds.south;
    let lng_span = bounds.east - bounds.west;

    (0..count)
        .map(|_| {
            Coordinate::new(
                bounds.south + rng.unit() * lat_span,
                bounds.west + rng.unit() * lng_span,
            )
        })
        .collect()
}

/// Regular lattice with `spacing_deg` between neighbours, starting at the
/// south-west corner and including the far edges when they fall on the grid.
///
/// Rows run south to north, and each row runs west to east.
///
/// # Errors
///
/// [`GeoError::InvalidArgument`] if `spacing_deg` is not a positive finite
/// number, or so small that the point count overflows `usize`.
pub fn generate_grid_points(bounds: &Bounds, spacing_deg: f64) -> GeoResult<Vec<Coordinate>> {
    if !(spacing_deg.is_finite() && spacing_deg > 0.0) {
        return Err(GeoError::InvalidArgument(format!(
            "grid spacing must be positive and finite, got {spacing_deg}"
        )));
    }

    // Fixed step counts; the far edge is included within EPS.
    const EPS: f64 = 1e-9;
    let too_dense = || {
        GeoError::InvalidArgument(format!("grid spacing {spacing_deg} yields too many points"))
    };
    let rows = steps(bounds.north - bounds.south, spacing_deg, EPS).ok_or_else(too_dense)?;
    let cols = steps(bounds.east - bounds.west, spacing_deg, EPS).ok_or_else(too_dense)?;
    let total = rows.checked_mul(cols).ok_or_else(too_dense)?;

    let mut out = Vec::with_capacity(total);
    for r in 0..rows {
        let lat = bounds.south + r as f64 * spacing_deg;
        for c in 0..cols {
            out.push(Coordinate::new(lat, bounds.west + c as f64 * spacing_deg));
        }
    }
    Ok(out)
}

/// Lattice points along one axis, `None` if the count overflows `usize`.
fn steps(span: f64, spacing: f64, eps: f64) -> Option<usize> {
    if span < 0.0 {
        return Some(0);
    }
    ((span / spacing + eps).floor() as usize).checked_add(1)
}
