//! Great-circle and ellipsoidal distance, initial and final bearing.
//!
//! | Function                    | Model                    | Output          |
//! |-----------------------------|--------------------------|-----------------|
//! | [`haversine_distance`]      | sphere, R = 6371 km      | any unit        |
//! | [`haversine_m`]             | sphere, R = 6371 km      | metres          |
//! | [`vincenty_distance`]       | WGS84 ellipsoid          | metres          |
//! | [`calculate_bearing`]       | sphere                   | degrees [0,360) |
//! | [`calculate_final_bearing`] | sphere                   | degrees [0,360) |
//!
//! None of these validate their inputs.  NaN in, NaN out.

use tracing::warn;

use crate::geo::{EARTH_RADIUS_M, WGS84_A, WGS84_B, WGS84_F};
use crate::{Coordinate, DistanceUnit, GeoError, GeoResult};

/// Iteration cap for Vincenty's inverse formula.
pub const VINCENTY_MAX_ITERATIONS: u32 = 100;

/// Convergence threshold on the iterated longitude difference, radians.
pub const VINCENTY_TOLERANCE: f64 = 1e-12;

/// Haversine great-circle distance between `p1` and `p2` in `unit`.
///
/// Symmetric, non-negative, and exactly `0.0` for coincident points.
///
/// ```
/// use tg_core::{Coordinate, DistanceUnit, distance::haversine_distance};
///
/// let india_gate = Coordinate::new(28.6139, 77.2090);
/// let red_fort   = Coordinate::new(28.6562, 77.2410);
/// let km = haversine_distance(india_gate, red_fort, DistanceUnit::Kilometers);
/// assert!((5.1..5.8).contains(&km));
/// ```
#[inline]
pub fn haversine_distance(p1: Coordinate, p2: Coordinate, unit: DistanceUnit) -> f64 {
    unit.from_meters(haversine_m(p1, p2))
}

/// Haversine distance in metres.  The hot-path form used by containment,
/// routing and indexing.
pub fn haversine_m(p1: Coordinate, p2: Coordinate) -> f64 {
    let d_lat = (p2.lat - p1.lat).to_radians();
    let d_lng = (p2.lng - p1.lng).to_radians();

    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();

    let a = (d_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lng * 0.5).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

/// Vincenty inverse distance on the WGS84 ellipsoid, in metres.
///
/// # Errors
///
/// [`GeoError::Convergence`] when the longitude iteration has not settled
/// within [`VINCENTY_MAX_ITERATIONS`].  This happens for nearly antipodal
/// points; callers should fall back to [`haversine_m`].
pub fn vincenty_distance(p1: Coordinate, p2: Coordinate) -> GeoResult<f64> {
    let (lat1, lng1) = p1.to_radians();
    let (lat2, lng2) = p2.to_radians();

    let l = lng2 - lng1;
    let u1 = ((1.0 - WGS84_F) * lat1.tan()).atan();
    let u2 = ((1.0 - WGS84_F) * lat2.tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut iterations = 0;

    // Values carried out of the loop for the series expansion.
    let (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m) = loop {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // Coincident points.
            return Ok(0.0);
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // Both points on the equator: cos²α = 0 and the quotient below is
        // undefined.  The limit of the term is 0.
        let cos_2sigma_m = if cos_sq_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        } else {
            0.0
        };

        let c = WGS84_F / 16.0 * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));
        let lambda_prev = lambda;
        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));

        iterations += 1;
        if (lambda - lambda_prev).abs() <= VINCENTY_TOLERANCE {
            break (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m);
        }
        if iterations >= VINCENTY_MAX_ITERATIONS {
            warn!(%p1, %p2, iterations, "vincenty did not converge");
            return Err(GeoError::Convergence { iterations });
        }
    };

    let u_sq = cos_sq_alpha * (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);
    let a = 1.0 + u_sq / 16_384.0 * (4_096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let b = u_sq / 1_024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = b
        * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sigma_m * cos_2sigma_m)));

    Ok(WGS84_B * a * (sigma - delta_sigma))
}

/// Vincenty distance, falling back to haversine when the iteration does not
/// converge.
pub fn vincenty_or_haversine_m(p1: Coordinate, p2: Coordinate) -> f64 {
    vincenty_distance(p1, p2).unwrap_or_else(|_| haversine_m(p1, p2))
}

/// Initial bearing from `p1` towards `p2`, degrees in `[0, 360)`.
pub fn calculate_bearing(p1: Coordinate, p2: Coordinate) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let d_lng = (p2.lng - p1.lng).to_radians();

    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();

    normalize_bearing(y.atan2(x).to_degrees())
}

/// Bearing on arrival at `p2` when travelling the great circle from `p1`.
pub fn calculate_final_bearing(p1: Coordinate, p2: Coordinate) -> f64 {
    normalize_bearing(calculate_bearing(p2, p1) + 180.0)
}

/// Wrap any angle into `[0, 360)`.
#[inline]
pub fn normalize_bearing(deg: f64) -> f64 {
    let b = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if b >= 360.0 { 0.0 } else { b }
}
