//! `tg-spatial` — geofences, area, route analysis and spatial indexing.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                    |
//! |-----------------|-------------------------------------------------------------|
//! | [`zone`]        | `GeofenceZone`, `Geometry` (`Circle` / `Polygon`), risk, alerts |
//! | [`containment`] | point-in-circle/polygon, containing zones, edge distance    |
//! | [`measure`]     | bounding box, polygon area and centroid                     |
//! | [`route`]       | route distance, nearest-neighbour order, radius queries     |
//! | [`index`]       | `SpatialIndex` uniform grid, `IndexConfig`                  |
//! | [`tracker`]     | `ZoneTracker` entry/exit/dwell events                       |
//! | [`loader`]      | `load_fixes_csv` with boundary validation                   |
//! | [`error`]       | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on zones, routes and events. |

pub mod containment;
pub mod error;
pub mod index;
pub mod loader;
pub mod measure;
pub mod route;
pub mod tracker;
pub mod zone;

#[cfg(test)]
mod tests;

pub use containment::{
    distance_to_line_segment, distance_to_polygon, get_containing_zones, is_point_in_circle,
    is_point_in_polygon,
};
pub use error::{SpatialError, SpatialResult};
pub use index::{
    create_spatial_index, create_spatial_index_with, query_points_in_radius, IndexConfig,
    IndexMatch, IndexedPoint, SpatialIndex,
};
pub use loader::{load_fixes_csv, load_fixes_reader, LocationFix};
pub use measure::{calculate_bounds, calculate_polygon_area, calculate_polygon_centroid};
pub use route::{
    build_route_segments, calculate_route_distance, find_closest_point, find_points_within_radius,
    optimize_route, ClosestPoint, PointWithDistance, RouteSegment,
};
pub use tracker::{ZoneEvent, ZoneEventKind, ZoneTracker};
pub use zone::{AlertConfig, Circle, GeofenceZone, Geometry, Polygon, RiskLevel};
