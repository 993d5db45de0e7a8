//! Uniform-grid spatial index for radius queries.
//!
//! # Layout
//!
//! Points are bucketed by the integer cell key
//!
//! ```text
//! (floor(lng / cell_size), floor(lat / cell_size))
//! ```
//!
//! in an `FxHashMap`.  Only occupied cells are stored.  The index is built
//! once from a point set and is read-only afterwards; rebuild it when the
//! tracked population changes.
//!
//! # Queries
//!
//! A radius query converts metres to degrees with the mean Earth radius,
//! widens the longitude span for the query latitude, scans the covered cells, and
//! keeps only points whose haversine distance is within the radius.  A span
//! that crosses the antimeridian is split into two column ranges, and a
//! circle that reaches a pole scans every column.  The grid affects speed
//! only; results always equal a brute-force
//! [`find_points_within_radius`](crate::route::find_points_within_radius).

use std::f64::consts::FRAC_PI_2;

use rustc_hash::FxHashMap;
use tracing::debug;

use tg_core::geo::EARTH_RADIUS_M;
use tg_core::{haversine_m, Coordinate, PointId};

use crate::{SpatialError, SpatialResult};

/// Default grid cell edge, degrees (~1.1 km of latitude).
pub const DEFAULT_CELL_SIZE_DEG: f64 = 0.01;

/// Relative slack on the scan rectangle so haversine rounding at the exact
/// radius cannot fall outside it.
const SCAN_SLACK: f64 = 1.0 + 1e-9;

// ── Config ────────────────────────────────────────────────────────────────────

/// Grid parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexConfig {
    pub cell_size_deg: f64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { cell_size_deg: DEFAULT_CELL_SIZE_DEG }
    }
}

impl IndexConfig {
    /// # Errors
    ///
    /// [`SpatialError::Config`] unless `cell_size_deg` is positive and finite.
    pub fn validate(&self) -> SpatialResult<()> {
        if self.cell_size_deg.is_finite() && self.cell_size_deg > 0.0 {
            Ok(())
        } else {
            Err(SpatialError::Config(format!(
                "cell_size_deg must be positive and finite, got {}",
                self.cell_size_deg
            )))
        }
    }
}

// ── Entries ───────────────────────────────────────────────────────────────────

/// A point stored in the index, with an optional caller payload.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexedPoint<T = ()> {
    pub id:    PointId,
    pub coord: Coordinate,
    pub data:  Option<T>,
}

impl<T> IndexedPoint<T> {
    pub fn new(id: PointId, coord: Coordinate) -> Self {
        Self { id, coord, data: None }
    }

    pub fn with_data(id: PointId, coord: Coordinate, data: T) -> Self {
        Self { id, coord, data: Some(data) }
    }
}

/// A query hit: a borrowed entry plus its distance from the query centre.
#[derive(Debug, Clone, Copy)]
pub struct IndexMatch<'a, T = ()> {
    pub point:      &'a IndexedPoint<T>,
    pub distance_m: f64,
}

/// Integer grid-cell key `(x, y)` = `(floor(lng / s), floor(lat / s))`.
pub type CellKey = (i64, i64);

// ── SpatialIndex ──────────────────────────────────────────────────────────────

/// Grid-bucketed point set.  Build with [`create_spatial_index`].
#[derive(Debug, Clone)]
pub struct SpatialIndex<T = ()> {
    cell_size_deg: f64,
    cells:         FxHashMap<CellKey, Vec<IndexedPoint<T>>>,
    len:           usize,
}

impl<T> SpatialIndex<T> {
    pub fn cell_size_deg(&self) -> f64 {
        self.cell_size_deg
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell key a coordinate falls in.
    #[inline]
    pub fn cell_of(&self, coord: Coordinate) -> CellKey {
        cell_key(coord, self.cell_size_deg)
    }

    /// Points stored in one cell.  Empty slice for an unoccupied cell.
    pub fn cell(&self, key: CellKey) -> &[IndexedPoint<T>] {
        self.cells.get(&key).map_or(&[], Vec::as_slice)
    }

    /// Every indexed point, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedPoint<T>> + '_ {
        self.cells.values().flatten()
    }
}

/// Half-height and half-width in degrees of the rectangle that encloses every
/// point within `radius_m` of `center`.
///
/// The longitude half-width is `asin(sin δ / cos φ)`, the widest point of the
/// circle.  Once the circle reaches a pole every longitude is in range.
fn scan_half_extent(center: Coordinate, radius_m: f64) -> (f64, f64) {
    let delta = radius_m / EARTH_RADIUS_M * SCAN_SLACK;
    let ratio = delta.sin() / center.lat.to_radians().cos().abs();
    let delta_lng = if delta >= FRAC_PI_2 || !(ratio < 1.0) {
        180.0
    } else {
        ratio.asin().to_degrees()
    };
    (delta.to_degrees(), delta_lng)
}

/// Inclusive cell-column ranges covering `center_lng ± delta_lng`.
///
/// A span leaving `[-180, 180]` wraps onto the other side of the
/// antimeridian.  The two pieces sit on opposite sides of longitude 0, so
/// their columns never overlap.
fn column_ranges(center_lng: f64, delta_lng: f64, cell_size: f64) -> Vec<(i64, i64)> {
    if delta_lng >= 180.0 {
        return vec![(i64::MIN, i64::MAX)];
    }
    let col = |lng: f64| (lng / cell_size).floor() as i64;
    let (lo, hi) = (center_lng - delta_lng, center_lng + delta_lng);

    if lo < -180.0 {
        vec![(col(-180.0), col(hi)), (col(lo + 360.0), col(180.0))]
    } else if hi > 180.0 {
        vec![(col(-180.0), col(hi - 360.0)), (col(lo), col(180.0))]
    } else {
        vec![(col(lo), col(hi))]
    }
}

#[inline]
fn cell_key(coord: Coordinate, cell_size: f64) -> CellKey {
    (
        (coord.lng / cell_size).floor() as i64,
        (coord.lat / cell_size).floor() as i64,
    )
}

/// Bucket `points` into a grid of `cell_size_deg` cells.
///
/// # Errors
///
/// [`SpatialError::Config`] for a non-positive or non-finite cell size.
pub fn create_spatial_index<T, I>(points: I, cell_size_deg: f64) -> SpatialResult<SpatialIndex<T>>
where
    I: IntoIterator<Item = IndexedPoint<T>>,
{
    create_spatial_index_with(points, &IndexConfig { cell_size_deg })
}

/// [`create_spatial_index`] taking an [`IndexConfig`].
pub fn create_spatial_index_with<T, I>(points: I, config: &IndexConfig) -> SpatialResult<SpatialIndex<T>>
where
    I: IntoIterator<Item = IndexedPoint<T>>,
{
    config.validate()?;
    let cell_size = config.cell_size_deg;

    let mut cells: FxHashMap<CellKey, Vec<IndexedPoint<T>>> = FxHashMap::default();
    let mut len = 0;
    for p in points {
        cells.entry(cell_key(p.coord, cell_size)).or_default().push(p);
        len += 1;
    }

    debug!(points = len, cells = cells.len(), cell_size, "built spatial index");
    Ok(SpatialIndex { cell_size_deg: cell_size, cells, len })
}

/// All indexed points within `radius_m` of `center` (inclusive), nearest
/// first.  Equal distances are ordered by `PointId`.
pub fn query_points_in_radius<'a, T>(
    index: &'a SpatialIndex<T>,
    center: Coordinate,
    radius_m: f64,
) -> Vec<IndexMatch<'a, T>> {
    if index.is_empty() || !(radius_m >= 0.0) {
        return Vec::new();
    }

    let cell = index.cell_size_deg;
    let (delta_lat, delta_lng) = scan_half_extent(center, radius_m);

    let columns = column_ranges(center.lng, delta_lng, cell);
    let min_y = ((center.lat - delta_lat) / cell).floor() as i64;
    let max_y = ((center.lat + delta_lat) / cell).floor() as i64;

    let within = |p: &'a IndexedPoint<T>| {
        let distance_m = haversine_m(center, p.coord);
        (distance_m <= radius_m).then_some(IndexMatch { point: p, distance_m })
    };

    let span_x: u128 = columns
        .iter()
        .map(|&(lo, hi)| (hi as i128 - lo as i128 + 1).max(0) as u128)
        .sum();
    let span_y = (max_y as i128 - min_y as i128 + 1).max(0) as u128;

    let mut hits: Vec<IndexMatch<'a, T>> = if span_x.saturating_mul(span_y) > index.cells.len() as u128 {
        // Scan rectangle is larger than the occupied set: walk occupied cells.
        index
            .cells
            .iter()
            .filter(|((x, y), _)| {
                (min_y..=max_y).contains(y) && columns.iter().any(|&(lo, hi)| (lo..=hi).contains(x))
            })
            .flat_map(|(_, pts)| pts.iter())
            .filter_map(within)
            .collect()
    } else {
        columns
            .iter()
            .flat_map(|&(lo, hi)| lo..=hi)
            .flat_map(|x| (min_y..=max_y).map(move |y| (x, y)))
            .filter_map(|key| index.cells.get(&key))
            .flat_map(|pts| pts.iter())
            .filter_map(within)
            .collect()
    };

    hits.sort_by(|a, b| {
        a.distance_m
            .total_cmp(&b.distance_m)
            .then_with(|| a.point.id.cmp(&b.point.id))
    });
    hits
}
