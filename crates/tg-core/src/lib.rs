//! `tg-core` — coordinate geometry for the `touristguard` geofencing toolkit.
//!
//! Every operation is a pure free function over plain `Copy` values.  Nothing
//! here holds global state, so any function may be called from any thread.
//!
//! # What lives here
//!
//! | Module           | Contents                                                 |
//! |------------------|----------------------------------------------------------|
//! | [`geo`]          | `Coordinate`, `Bounds`, `DistanceUnit`, Earth constants  |
//! | [`distance`]     | haversine, Vincenty, initial/final bearing               |
//! | [`projection`]   | destination point, great-circle interpolation, midpoint  |
//! | [`format`]       | DMS, display formatting, normalisation, validation       |
//! | [`sample`]       | random and grid point generation                         |
//! | [`ids`]          | `ZoneId`, `TouristId`, `PointId`                         |
//! | [`rng`]          | `GeoRng` (seeded `SmallRng`)                             |
//! | [`error`]        | `GeoError`, `GeoResult`                                  |
//!
//! # Units
//!
//! Angles are degrees at the API boundary.  Distances are metres unless a
//! [`DistanceUnit`] says otherwise.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod distance;
pub mod error;
pub mod format;
pub mod geo;
pub mod ids;
pub mod projection;
pub mod rng;
pub mod sample;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use distance::{
    calculate_bearing, calculate_final_bearing, haversine_distance, haversine_m, vincenty_distance,
};
pub use error::{GeoError, GeoResult};
pub use format::{
    clamp_latitude, degrees_to_dms, format_coordinates, is_valid_coordinates, normalize_longitude,
    Axis, CoordinateFormat, Dms, Hemisphere,
};
pub use geo::{Bounds, Coordinate, DistanceUnit};
pub use ids::{PointId, TouristId, ZoneId};
pub use projection::{calculate_destination, calculate_midpoint, interpolate_great_circle};
pub use rng::GeoRng;
pub use sample::{generate_grid_points, generate_random_points};
