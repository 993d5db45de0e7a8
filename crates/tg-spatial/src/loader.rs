//! CSV loader for tourist location fixes.
//!
//! # CSV format
//!
//! ```csv
//! tourist_id,lat,lng,unix_secs
//! 0,28.6139,77.2090,1700000000
//! 0,28.6145,77.2101,1700000060
//! 1,28.6562,77.2410,1700000000
//! ```
//!
//! This is the system boundary for GPS data: every fix is checked with
//! [`is_valid_coordinates`] here, so nothing downstream re-validates.  Rows
//! are returned in file order; the tracker expects per-tourist time order, so
//! sort the file (or the result) if the source interleaves out of order.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use tg_core::{is_valid_coordinates, Coordinate, TouristId};

use crate::{SpatialError, SpatialResult};

/// One GPS fix for one tourist.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub tourist: TouristId,
    pub coord:   Coordinate,
    pub at_secs: u64,
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FixRecord {
    tourist_id: u32,
    lat:        f64,
    lng:        f64,
    unix_secs:  u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load fixes from a CSV file.
pub fn load_fixes_csv(path: &Path) -> SpatialResult<Vec<LocationFix>> {
    let file = std::fs::File::open(path)?;
    load_fixes_reader(file)
}

/// Like [`load_fixes_csv`] but accepts any `Read` source.
///
/// # Errors
///
/// - [`SpatialError::Parse`] for malformed rows.
/// - [`SpatialError::InvalidFix`] for a NaN or out-of-range coordinate;
///   `row` is 1-based and excludes the header.
pub fn load_fixes_reader<R: Read>(reader: R) -> SpatialResult<Vec<LocationFix>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut fixes = Vec::new();

    for (i, result) in csv_reader.deserialize::<FixRecord>().enumerate() {
        let row = result.map_err(|e| SpatialError::Parse(e.to_string()))?;
        let coord = Coordinate::new(row.lat, row.lng);
        if !is_valid_coordinates(coord) {
            warn!(row = i + 1, lat = row.lat, lng = row.lng, "rejecting invalid fix");
            return Err(SpatialError::InvalidFix { row: i + 1, lat: row.lat, lng: row.lng });
        }
        fixes.push(LocationFix {
            tourist: TouristId(row.tourist_id),
            coord,
            at_secs: row.unix_secs,
        });
    }

    Ok(fixes)
}
