//! zone-watch — replay tourist GPS fixes against a set of Delhi geofences.
//!
//! Usage:
//!
//! ```text
//! zone-watch [zones.json] [fixes.csv]
//! ```
//!
//! Without arguments the embedded zone set and fix log below are used.  Set
//! `RUST_LOG=debug` to see index construction and tracker internals.

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tg_core::{
    format_coordinates, haversine_distance, CoordinateFormat, Coordinate, DistanceUnit, PointId,
};
use tg_spatial::{
    calculate_route_distance, create_spatial_index_with, load_fixes_csv, load_fixes_reader,
    optimize_route, query_points_in_radius, GeofenceZone, Geometry, IndexConfig, IndexedPoint,
    LocationFix, RiskLevel, ZoneEventKind, ZoneTracker,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const PATROL_START:      usize = 0;
const NEARBY_RADIUS_M:   f64   = 1_500.0;
const INDEX_CELL_DEG:    f64   = 0.01;

// ── Embedded data ─────────────────────────────────────────────────────────────

// Zone 1: India Gate lawns, zone 2: Red Fort precinct, zone 3: a restricted
// area around Rashtrapati Bhavan with a ten-minute dwell limit.
const ZONES_JSON: &str = r#"[
  {
    "id": 1,
    "name": "India Gate",
    "geometry": { "type": "circle", "center": { "lat": 28.6129, "lng": 77.2295 }, "radius_m": 500.0 },
    "risk": "low",
    "alerts": { "alert_on_entry": true, "alert_on_exit": true }
  },
  {
    "id": 2,
    "name": "Red Fort",
    "geometry": {
      "type": "polygon",
      "vertices": [
        { "lat": 28.6530, "lng": 77.2370 },
        { "lat": 28.6530, "lng": 77.2450 },
        { "lat": 28.6590, "lng": 77.2450 },
        { "lat": 28.6590, "lng": 77.2370 }
      ]
    },
    "risk": "medium",
    "alerts": { "alert_on_entry": true }
  },
  {
    "id": 3,
    "name": "Rashtrapati Bhavan",
    "geometry": { "type": "circle", "center": { "lat": 28.6143, "lng": 77.1994 }, "radius_m": 800.0 },
    "risk": "restricted",
    "alerts": { "alert_on_entry": true, "alert_on_exit": true, "dwell_time_limit_secs": 600 }
  }
]"#;

// Three tourists over roughly half an hour.  Tourist 2 lingers in the
// restricted zone long enough to trip the dwell alert.
const FIXES_CSV: &str = "\
tourist_id,lat,lng,unix_secs\n\
0,28.6200,77.2200,1700000000\n\
0,28.6135,77.2290,1700000300\n\
0,28.6128,77.2300,1700000600\n\
0,28.6200,77.2300,1700000900\n\
1,28.6500,77.2400,1700000000\n\
1,28.6560,77.2410,1700000300\n\
1,28.6565,77.2420,1700000600\n\
1,28.6620,77.2410,1700001200\n\
2,28.6250,77.1990,1700000000\n\
2,28.6145,77.1990,1700000120\n\
2,28.6140,77.2000,1700000480\n\
2,28.6142,77.1995,1700000900\n\
2,28.6300,77.2100,1700001500\n";

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_zones(path: Option<&Path>) -> Result<Vec<GeofenceZone>> {
    let zones = match path {
        Some(p) => {
            let text = std::fs::read_to_string(p)
                .with_context(|| format!("reading zones from {}", p.display()))?;
            serde_json::from_str(&text).context("parsing zones JSON")?
        }
        None => serde_json::from_str(ZONES_JSON).context("parsing embedded zones")?,
    };
    Ok(zones)
}

fn load_fixes(path: Option<&Path>) -> Result<Vec<LocationFix>> {
    let fixes = match path {
        Some(p) => load_fixes_csv(p).with_context(|| format!("loading fixes from {}", p.display()))?,
        None => load_fixes_reader(Cursor::new(FIXES_CSV))?,
    };
    Ok(fixes)
}

/// Representative point of a zone, used as a patrol waypoint.
fn zone_anchor(zone: &GeofenceZone) -> Result<Coordinate> {
    match &zone.geometry {
        Geometry::Circle(c)  => Ok(c.center),
        Geometry::Polygon(p) => Ok(p.centroid()?),
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let zones_path = args.first().map(Path::new);
    let fixes_path = args.get(1).map(Path::new);

    // ── 1. Load inputs ────────────────────────────────────────────────────
    let zones = load_zones(zones_path)?;
    let mut fixes = load_fixes(fixes_path)?;
    fixes.sort_by_key(|f| (f.at_secs, f.tourist));
    info!(zones = zones.len(), fixes = fixes.len(), "inputs loaded");

    println!("=== zone-watch ===");
    println!();
    println!("{:<4} {:<20} {:<11} {:>12}", "id", "zone", "risk", "area (m²)");
    for z in &zones {
        println!("{:<4} {:<20} {:<11} {:>12.0}", z.id.0, z.name, z.risk, z.geometry.area_m2());
    }
    println!();

    // ── 2. Replay fixes through the tracker ───────────────────────────────
    // Only transitions the zone alerts on come back as events.
    let mut tracker = ZoneTracker::new();
    let mut alerts = 0usize;
    println!("{:<12} {:<8} {:<20} {:<11} event", "unix_secs", "tourist", "zone", "risk");
    for fix in &fixes {
        for ev in tracker.update(fix.tourist, fix.coord, fix.at_secs, &zones) {
            let Some(zone) = zones.iter().find(|z| z.id == ev.zone) else { continue };
            let label = match ev.kind {
                ZoneEventKind::Entered                      => "entered".to_string(),
                ZoneEventKind::Exited { dwell_secs }        => format!("exited after {dwell_secs}s"),
                ZoneEventKind::DwellExceeded { dwell_secs } => format!("DWELL LIMIT ({dwell_secs}s)"),
            };
            alerts += 1;
            println!(
                "{:<12} {:<8} {:<20} {:<11} {label}",
                ev.at_secs, ev.tourist.0, zone.name, zone.risk,
            );
        }
    }
    println!();
    println!("alerts raised: {alerts}");
    println!();

    // ── 3. Index latest positions, look around risky zones ────────────────
    let mut latest: Vec<LocationFix> = Vec::new();
    for fix in &fixes {
        match latest.iter_mut().find(|l| l.tourist == fix.tourist) {
            Some(l) => *l = *fix,
            None => latest.push(*fix),
        }
    }
    latest.sort_by_key(|f| f.tourist);

    let config = IndexConfig { cell_size_deg: INDEX_CELL_DEG };
    let index = create_spatial_index_with(
        latest
            .iter()
            .enumerate()
            .map(|(i, f)| IndexedPoint::with_data(PointId(i as u32), f.coord, f.tourist)),
        &config,
    )?;

    println!("tourists within {NEARBY_RADIUS_M:.0} m of high-risk zones:");
    for zone in zones.iter().filter(|z| z.risk >= RiskLevel::High) {
        let anchor = zone_anchor(zone)?;
        let hits = query_points_in_radius(&index, anchor, NEARBY_RADIUS_M);
        println!("  {} ({}): {} nearby", zone.name, zone.risk, hits.len());
        for hit in hits {
            if let Some(tourist) = hit.point.data {
                println!(
                    "    {tourist}  {:>7.0} m  inside={}",
                    hit.distance_m,
                    zone.contains(hit.point.coord),
                );
            }
        }
    }
    println!();

    // ── 4. Patrol route over zone anchors ─────────────────────────────────
    let anchors = zones.iter().map(zone_anchor).collect::<Result<Vec<_>>>()?;
    if anchors.is_empty() {
        return Ok(());
    }
    let order = optimize_route(&anchors, PATROL_START)?;
    let route: Vec<Coordinate> = order.iter().map(|&i| anchors[i]).collect();
    let total_m = calculate_route_distance(&route);

    println!("patrol route:");
    for (step, &i) in order.iter().enumerate() {
        println!(
            "  {}. {:<20} {}",
            step + 1,
            zones[i].name,
            format_coordinates(anchors[i], CoordinateFormat::Dms),
        );
    }
    let first_leg_km = match route.as_slice() {
        [a, b, ..] => haversine_distance(*a, *b, DistanceUnit::Kilometers),
        _ => 0.0,
    };
    println!("  total {:.2} km, first leg {first_leg_km:.2} km", total_m / 1_000.0);

    Ok(())
}
