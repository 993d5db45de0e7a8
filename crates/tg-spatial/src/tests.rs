//! Unit tests for tg-spatial.
//!
//! Fixtures are hand-placed around central Delhi so distances are easy to
//! sanity-check on a map.

#[cfg(test)]
mod helpers {
    use tg_core::{Coordinate, ZoneId};

    use crate::{AlertConfig, Circle, GeofenceZone, Geometry, Polygon, RiskLevel};

    pub const INDIA_GATE: Coordinate = Coordinate::new(28.6129, 77.2295);
    pub const RED_FORT: Coordinate = Coordinate::new(28.6562, 77.2410);

    pub fn unit_square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 0.0),
        ]
    }

    /// Box of `half` degrees around `c`, counter-clockwise from south-west.
    pub fn square_around(c: Coordinate, half: f64) -> Vec<Coordinate> {
        vec![
            Coordinate::new(c.lat - half, c.lng - half),
            Coordinate::new(c.lat - half, c.lng + half),
            Coordinate::new(c.lat + half, c.lng + half),
            Coordinate::new(c.lat + half, c.lng - half),
        ]
    }

    /// Zone 1: 500 m circle at India Gate (entry + exit alerts).
    /// Zone 2: ~0.02° box around Red Fort (no alerts).
    /// Zone 3: 2 km restricted circle at India Gate with a 10 minute dwell limit.
    pub fn delhi_zones() -> Vec<GeofenceZone> {
        vec![
            GeofenceZone::new(ZoneId(1), "India Gate lawns", Geometry::Circle(Circle::new(INDIA_GATE, 500.0)))
                .with_risk(RiskLevel::Low)
                .with_alerts(AlertConfig { alert_on_entry: true, alert_on_exit: true, dwell_time_limit_secs: None }),
            GeofenceZone::new(ZoneId(2), "Red Fort", Geometry::Polygon(Polygon::new(square_around(RED_FORT, 0.01))))
                .with_risk(RiskLevel::Medium),
            GeofenceZone::new(ZoneId(3), "Rajpath cordon", Geometry::Circle(Circle::new(INDIA_GATE, 2_000.0)))
                .with_risk(RiskLevel::Restricted)
                .with_alerts(AlertConfig { alert_on_entry: false, alert_on_exit: false, dwell_time_limit_secs: Some(600) }),
        ]
    }
}

// ── Containment ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod containment {
    use tg_core::{calculate_destination, haversine_m, Coordinate};

    use super::helpers::{delhi_zones, unit_square, INDIA_GATE, RED_FORT};
    use crate::{
        distance_to_line_segment, distance_to_polygon, get_containing_zones, is_point_in_circle,
        is_point_in_polygon, Circle, Geometry,
    };

    #[test]
    fn circle_contains_own_center() {
        let c = Circle::new(INDIA_GATE, 250.0);
        assert!(is_point_in_circle(c.center, &c));
    }

    #[test]
    fn circle_excludes_radius_plus_one() {
        let c = Circle::new(INDIA_GATE, 750.0);
        for bearing in (0..360).step_by(15) {
            let outside = calculate_destination(c.center, c.radius_m + 1.0, bearing as f64);
            assert!(!is_point_in_circle(outside, &c), "bearing {bearing}");
            let inside = calculate_destination(c.center, c.radius_m - 1.0, bearing as f64);
            assert!(is_point_in_circle(inside, &c), "bearing {bearing}");
        }
    }

    #[test]
    fn square_polygon() {
        let sq = unit_square();
        assert!(is_point_in_polygon(Coordinate::new(0.5, 0.5), &sq));
        assert!(!is_point_in_polygon(Coordinate::new(2.0, 2.0), &sq));
        assert!(!is_point_in_polygon(Coordinate::new(0.5, -0.1), &sq));
    }

    #[test]
    fn concave_polygon_notch_excluded() {
        // L-shape: the upper-right quadrant of the 2x2 box is cut away.
        let l = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 2.0),
            Coordinate::new(1.0, 2.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(2.0, 1.0),
            Coordinate::new(2.0, 0.0),
        ];
        assert!(is_point_in_polygon(Coordinate::new(0.5, 1.5), &l));
        assert!(is_point_in_polygon(Coordinate::new(1.5, 0.5), &l));
        assert!(!is_point_in_polygon(Coordinate::new(1.5, 1.5), &l));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        let line = vec![Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)];
        assert!(!is_point_in_polygon(Coordinate::new(0.5, 0.5), &line));
        assert!(!is_point_in_polygon(Coordinate::new(0.0, 0.0), &[]));
    }

    #[test]
    fn containing_zones_in_input_order() {
        let zones = delhi_zones();
        let hits: Vec<_> = get_containing_zones(INDIA_GATE, &zones).iter().map(|z| z.id.0).collect();
        assert_eq!(hits, vec![1, 3]);

        let hits: Vec<_> = get_containing_zones(RED_FORT, &zones).iter().map(|z| z.id.0).collect();
        assert_eq!(hits, vec![2]);

        assert!(get_containing_zones(Coordinate::new(0.0, 0.0), &zones).is_empty());
        assert!(get_containing_zones(INDIA_GATE, &[]).is_empty());
    }

    #[test]
    fn segment_perpendicular_foot() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        let p = Coordinate::new(0.1, 0.5);
        let d = distance_to_line_segment(p, a, b);
        let expected = haversine_m(p, Coordinate::new(0.0, 0.5));
        assert!((d - expected).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn segment_clamps_to_endpoint() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        let p = Coordinate::new(0.0, 3.0);
        assert!((distance_to_line_segment(p, a, b) - haversine_m(p, b)).abs() < 1e-6);
        let q = Coordinate::new(0.2, -0.5);
        assert!((distance_to_line_segment(q, a, b) - haversine_m(q, a)).abs() < 1e-6);
    }

    #[test]
    fn segment_degenerate() {
        let a = Coordinate::new(10.0, 10.0);
        let p = Coordinate::new(10.5, 10.0);
        assert_eq!(distance_to_line_segment(p, a, a), haversine_m(p, a));
    }

    #[test]
    fn polygon_edge_distance() {
        let d = distance_to_polygon(Coordinate::new(0.5, 0.5), &unit_square());
        assert!((55_590.0..55_600.0).contains(&d), "got {d}");

        // A point on an edge is at distance zero.
        assert!(distance_to_polygon(Coordinate::new(0.0, 0.5), &unit_square()) < 1e-6);
        assert_eq!(distance_to_polygon(Coordinate::new(0.0, 0.5), &[]), f64::INFINITY);
    }

    #[test]
    fn circle_boundary_distance() {
        let g = Geometry::Circle(Circle::new(INDIA_GATE, 500.0));
        assert!((g.distance_to_boundary(INDIA_GATE) - 500.0).abs() < 1e-9);
        let out = calculate_destination(INDIA_GATE, 800.0, 45.0);
        assert!((g.distance_to_boundary(out) - 300.0).abs() < 0.5);
    }
}

// ── Bounds & area ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod measure {
    use tg_core::geo::EARTH_RADIUS_M;
    use tg_core::{generate_random_points, Bounds, Coordinate, GeoError, GeoRng};

    use super::helpers::{square_around, unit_square, RED_FORT};
    use crate::{calculate_bounds, calculate_polygon_area, calculate_polygon_centroid, Polygon};

    #[test]
    fn bounds_empty_is_error() {
        assert_eq!(
            calculate_bounds(&[]),
            Err(GeoError::EmptyInput { what: "calculate_bounds" })
        );
    }

    #[test]
    fn bounds_single_point() {
        let b = calculate_bounds(&[RED_FORT]).unwrap();
        assert_eq!(b, Bounds::new(RED_FORT.lat, RED_FORT.lat, RED_FORT.lng, RED_FORT.lng));
    }

    #[test]
    fn bounds_contain_all_points() {
        let area = Bounds::new(40.0, -40.0, 120.0, -60.0);
        let mut rng = GeoRng::new(17);
        for n in [1, 2, 10, 300] {
            let pts = generate_random_points(&area, n, &mut rng);
            let b = calculate_bounds(&pts).unwrap();
            assert!(b.north >= b.south);
            assert!(pts.iter().all(|p| b.contains(*p)));
        }
    }

    #[test]
    fn one_degree_square_area() {
        let area = calculate_polygon_area(&unit_square());
        let expected = EARTH_RADIUS_M * EARTH_RADIUS_M * 1f64.to_radians() * 1f64.to_radians().sin();
        assert!((area - expected).abs() / expected < 1e-9, "got {area}, expected {expected}");
    }

    #[test]
    fn area_ignores_winding() {
        let ccw = square_around(RED_FORT, 0.005);
        let mut cw = ccw.clone();
        cw.reverse();
        let (a, b) = (calculate_polygon_area(&ccw), calculate_polygon_area(&cw));
        assert!(a > 0.0);
        assert!((a - b).abs() < 1e-6 * a);
        // ~1.1 km × ~0.98 km at Delhi's latitude.
        assert!((1.0e6..1.2e6).contains(&a), "got {a}");
    }

    #[test]
    fn degenerate_area_is_zero() {
        assert_eq!(calculate_polygon_area(&[]), 0.0);
        assert_eq!(calculate_polygon_area(&unit_square()[..2]), 0.0);
        assert!(Polygon::new(unit_square()[..2].to_vec()).is_degenerate());
    }

    #[test]
    fn centroid_is_vertex_mean() {
        let c = calculate_polygon_centroid(&unit_square()).unwrap();
        assert_eq!(c, Coordinate::new(0.5, 0.5));
        let p = Polygon::new(square_around(RED_FORT, 0.01));
        let c = p.centroid().unwrap();
        assert!((c.lat - RED_FORT.lat).abs() < 1e-12 && (c.lng - RED_FORT.lng).abs() < 1e-12);
    }

    #[test]
    fn centroid_empty_is_error() {
        assert!(matches!(
            calculate_polygon_centroid(&[]),
            Err(GeoError::EmptyInput { .. })
        ));
    }
}

// ── Route analysis ────────────────────────────────────────────────────────────

#[cfg(test)]
mod route {
    use tg_core::{generate_random_points, haversine_m, Bounds, Coordinate, GeoError, GeoRng};

    use super::helpers::{INDIA_GATE, RED_FORT};
    use crate::{
        build_route_segments, calculate_route_distance, find_closest_point,
        find_points_within_radius, optimize_route, RouteSegment,
    };

    fn equator(lngs: &[f64]) -> Vec<Coordinate> {
        lngs.iter().map(|&l| Coordinate::new(0.0, l)).collect()
    }

    #[test]
    fn route_distance_additive() {
        let c = Coordinate::new(28.59, 77.25);
        let total = calculate_route_distance(&[INDIA_GATE, RED_FORT, c]);
        let expected = haversine_m(INDIA_GATE, RED_FORT) + haversine_m(RED_FORT, c);
        assert!((total - expected).abs() < 1e-6);
    }

    #[test]
    fn route_distance_trivial() {
        assert_eq!(calculate_route_distance(&[]), 0.0);
        assert_eq!(calculate_route_distance(&[RED_FORT]), 0.0);
    }

    #[test]
    fn nearest_neighbour_order() {
        let pts = equator(&[0.0, 3.0, 1.0, 2.0]);
        assert_eq!(optimize_route(&pts, 0).unwrap(), vec![0, 2, 3, 1]);
        assert_eq!(optimize_route(&pts, 1).unwrap(), vec![1, 3, 2, 0]);
    }

    #[test]
    fn nearest_neighbour_ties_take_first_index() {
        let pts = equator(&[0.0, -1.0, 1.0]);
        assert_eq!(optimize_route(&pts, 0).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn optimize_route_is_permutation() {
        let delhi = Bounds::new(28.70, 28.50, 77.30, 77.10);
        let pts = generate_random_points(&delhi, 40, &mut GeoRng::new(8));
        let mut order = optimize_route(&pts, 7).unwrap();
        assert_eq!(order[0], 7);
        order.sort_unstable();
        assert_eq!(order, (0..40).collect::<Vec<_>>());
    }

    #[test]
    fn optimize_route_edges() {
        assert_eq!(optimize_route(&[], 0).unwrap(), Vec::<usize>::new());
        assert_eq!(optimize_route(&[RED_FORT], 0).unwrap(), vec![0]);
        assert_eq!(
            optimize_route(&[RED_FORT], 1),
            Err(GeoError::IndexOutOfRange { index: 1, len: 1 })
        );
    }

    #[test]
    fn closest_point() {
        let pts = equator(&[5.0, 2.0, -1.5, 2.0]);
        let c = find_closest_point(Coordinate::new(0.0, 1.8), &pts).unwrap();
        assert_eq!(c.index, 1);
        assert!((c.distance_m - haversine_m(Coordinate::new(0.0, 1.8), pts[1])).abs() < 1e-9);
    }

    #[test]
    fn closest_point_empty_is_error() {
        assert!(matches!(
            find_closest_point(RED_FORT, &[]),
            Err(GeoError::EmptyInput { what: "find_closest_point" })
        ));
    }

    #[test]
    fn within_radius_sorted_and_inclusive() {
        let pts = equator(&[0.3, 0.1, 2.0, 0.2, -0.05]);
        let r = haversine_m(Coordinate::new(0.0, 0.0), pts[3]);
        let hits = find_points_within_radius(Coordinate::new(0.0, 0.0), r, &pts);
        let idx: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(idx, vec![4, 1, 3]);
        assert!(hits.windows(2).all(|w| w[0].distance_m <= w[1].distance_m));
        assert_eq!(hits[2].point, pts[3]);
    }

    #[test]
    fn segments_carry_distance_and_bearing() {
        let segs = build_route_segments(&equator(&[0.0, 1.0, 1.0]));
        assert_eq!(segs.len(), 2);
        assert!((segs[0].bearing_deg - 90.0).abs() < 1e-9);
        assert!((segs[0].distance_m - haversine_m(segs[0].start, segs[0].end)).abs() < 1e-9);
        assert!(segs[1].is_trivial());
        assert!(build_route_segments(&[RED_FORT]).is_empty());
    }

    #[test]
    fn segment_waypoints_exclude_endpoints() {
        let seg = RouteSegment::new(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)).with_waypoints(3);
        assert_eq!(seg.waypoints.len(), 3);
        assert!((seg.waypoints[0].lng - 0.25).abs() < 1e-9);
        assert!((seg.waypoints[2].lng - 0.75).abs() < 1e-9);
        assert!(RouteSegment::new(RED_FORT, INDIA_GATE).with_waypoints(0).waypoints.is_empty());
    }
}

// ── Spatial index ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod index {
    use std::collections::BTreeSet;

    use tg_core::{generate_random_points, Bounds, Coordinate, GeoRng, PointId};

    use crate::{
        create_spatial_index, create_spatial_index_with, find_points_within_radius,
        query_points_in_radius, IndexConfig, IndexedPoint, SpatialError, SpatialIndex,
    };

    fn indexed(pts: &[Coordinate]) -> Vec<IndexedPoint> {
        pts.iter()
            .enumerate()
            .map(|(i, &c)| IndexedPoint::new(PointId(i as u32), c))
            .collect()
    }

    fn assert_matches_brute_force(index: &SpatialIndex, pts: &[Coordinate], center: Coordinate, r: f64) {
        let grid: BTreeSet<u32> = query_points_in_radius(index, center, r)
            .iter()
            .map(|m| m.point.id.0)
            .collect();
        let brute: BTreeSet<u32> = find_points_within_radius(center, r, pts)
            .iter()
            .map(|h| h.index as u32)
            .collect();
        assert_eq!(grid, brute, "center {center} radius {r}");
    }

    #[test]
    fn rejects_bad_cell_size() {
        for s in [0.0, -0.01, f64::NAN] {
            assert!(matches!(
                create_spatial_index::<(), _>(Vec::new(), s),
                Err(SpatialError::Config(_))
            ));
        }
        assert!(IndexConfig::default().validate().is_ok());
        assert_eq!(IndexConfig::default().cell_size_deg, 0.01);
    }

    #[test]
    fn buckets_by_floored_cell() {
        let pts = [
            Coordinate::new(28.6139, 77.2090),
            Coordinate::new(28.6149, 77.2099),
            Coordinate::new(-0.005, -0.005),
        ];
        let index = create_spatial_index(indexed(&pts), 0.01).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.cell_count(), 2);
        assert_eq!(index.cell_of(pts[0]), (7720, 2861));
        assert_eq!(index.cell(index.cell_of(pts[0])).len(), 2);
        assert_eq!(index.cell_of(pts[2]), (-1, -1));
        assert!(index.cell((0, 0)).is_empty());
        assert_eq!(index.iter().count(), 3);
    }

    #[test]
    fn results_sorted_by_distance() {
        let delhi = Bounds::new(28.70, 28.50, 77.30, 77.10);
        let pts = generate_random_points(&delhi, 500, &mut GeoRng::new(21));
        let index = create_spatial_index_with(indexed(&pts), &IndexConfig::default()).unwrap();
        let hits = query_points_in_radius(&index, delhi.center(), 4_000.0);
        assert!(!hits.is_empty());
        assert!(hits.windows(2).all(|w| w[0].distance_m <= w[1].distance_m));
        assert!(hits.iter().all(|h| h.distance_m <= 4_000.0));
    }

    #[test]
    fn equivalent_to_brute_force() {
        let delhi = Bounds::new(28.70, 28.50, 77.30, 77.10);
        let mut rng = GeoRng::new(4242);
        let pts = generate_random_points(&delhi, 2_000, &mut rng);
        let index = create_spatial_index(indexed(&pts), 0.01).unwrap();

        for _ in 0..50 {
            let center = generate_random_points(&delhi, 1, &mut rng)[0];
            let r = rng.gen_range(50.0..6_000.0);
            assert_matches_brute_force(&index, &pts, center, r);
        }
    }

    #[test]
    fn equivalent_at_high_latitude() {
        let tromso = Bounds::new(69.75, 69.55, 19.10, 18.80);
        let mut rng = GeoRng::new(7);
        let pts = generate_random_points(&tromso, 1_000, &mut rng);
        let index = create_spatial_index(indexed(&pts), 0.005).unwrap();

        for _ in 0..30 {
            let center = generate_random_points(&tromso, 1, &mut rng)[0];
            let r = rng.gen_range(100.0..5_000.0);
            assert_matches_brute_force(&index, &pts, center, r);
        }
    }

    #[test]
    fn huge_radius_scans_occupied_cells() {
        let world = Bounds::new(60.0, -60.0, 170.0, -170.0);
        let pts = generate_random_points(&world, 300, &mut GeoRng::new(3));
        let index = create_spatial_index(indexed(&pts), 0.01).unwrap();
        assert_matches_brute_force(&index, &pts, Coordinate::new(10.0, 20.0), 3_000_000.0);
    }

    #[test]
    fn equivalent_across_antimeridian() {
        let pts = [Coordinate::new(0.0, 179.999), Coordinate::new(0.0, -179.999)];
        let index = create_spatial_index(indexed(&pts), 0.01).unwrap();
        assert_matches_brute_force(&index, &pts, Coordinate::new(0.0, -179.9995), 1_000.0);
        assert_matches_brute_force(&index, &pts, Coordinate::new(0.0, 179.9995), 1_000.0);
        assert_eq!(query_points_in_radius(&index, Coordinate::new(0.0, -179.9995), 1_000.0).len(), 2);

        let mut rng = GeoRng::new(180);
        let east = Bounds::new(-15.0, -17.0, 180.0, 179.4);
        let west = Bounds::new(-15.0, -17.0, -179.4, -180.0);
        let mut pts = generate_random_points(&east, 400, &mut rng);
        pts.extend(generate_random_points(&west, 400, &mut rng));
        let index = create_spatial_index(indexed(&pts), 0.01).unwrap();

        for _ in 0..40 {
            let side = if rng.unit() < 0.5 { &east } else { &west };
            let center = generate_random_points(side, 1, &mut rng)[0];
            let r = rng.gen_range(500.0..60_000.0);
            assert_matches_brute_force(&index, &pts, center, r);
        }
    }

    #[test]
    fn equivalent_polar_cap() {
        let pts = [Coordinate::new(89.9, -150.0), Coordinate::new(89.9, 80.0)];
        let index = create_spatial_index(indexed(&pts), 0.01).unwrap();
        assert_matches_brute_force(&index, &pts, Coordinate::new(89.95, 80.0), 50_000.0);
        assert_eq!(query_points_in_radius(&index, Coordinate::new(89.95, 80.0), 50_000.0).len(), 2);

        let cap = Bounds::new(90.0, 89.3, 180.0, -180.0);
        let mut rng = GeoRng::new(90);
        let pts = generate_random_points(&cap, 600, &mut rng);
        let index = create_spatial_index(indexed(&pts), 0.05).unwrap();

        for _ in 0..30 {
            let center = Coordinate::new(rng.gen_range(89.5..89.99), rng.gen_range(-180.0..180.0));
            let r = rng.gen_range(5_000.0..80_000.0);
            assert_matches_brute_force(&index, &pts, center, r);
        }
    }

    #[test]
    fn payload_and_edge_cases() {
        let pts = vec![
            IndexedPoint::with_data(PointId(9), Coordinate::new(28.6139, 77.2090), "tourist-9"),
            IndexedPoint::new(PointId(4), Coordinate::new(28.6562, 77.2410)),
        ];
        let index = create_spatial_index(pts, 0.01).unwrap();

        let hits = query_points_in_radius(&index, Coordinate::new(28.6139, 77.2090), 10.0);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].point.data, Some("tourist-9"));
        assert_eq!(hits[0].distance_m, 0.0);

        assert!(query_points_in_radius(&index, Coordinate::new(28.6139, 77.2090), -1.0).is_empty());
        let empty = create_spatial_index::<(), _>(Vec::new(), 0.01).unwrap();
        assert!(empty.is_empty());
        assert!(query_points_in_radius(&empty, Coordinate::new(0.0, 0.0), 1e6).is_empty());
    }
}

// ── Zone tracker ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tracker {
    use tg_core::{calculate_destination, Coordinate, TouristId, ZoneId};

    use super::helpers::{delhi_zones, INDIA_GATE};
    use crate::{ZoneEvent, ZoneEventKind, ZoneTracker};

    const T: TouristId = TouristId(1);
    const FAR: Coordinate = Coordinate::new(28.0, 76.0);

    #[test]
    fn entry_and_exit_with_dwell() {
        let zones = delhi_zones();
        let mut tracker = ZoneTracker::new();

        assert!(tracker.update(T, FAR, 0, &zones).is_empty());

        let events = tracker.update(T, INDIA_GATE, 100, &zones);
        assert_eq!(
            events,
            vec![ZoneEvent { tourist: T, zone: ZoneId(1), at_secs: 100, kind: ZoneEventKind::Entered }]
        );
        // Zone 3 has no entry alert but occupancy is still tracked.
        assert_eq!(tracker.zones_of(T), vec![ZoneId(1), ZoneId(3)]);

        let events = tracker.update(T, FAR, 400, &zones);
        assert_eq!(
            events,
            vec![ZoneEvent {
                tourist: T,
                zone: ZoneId(1),
                at_secs: 400,
                kind: ZoneEventKind::Exited { dwell_secs: 300 },
            }]
        );
        assert!(tracker.zones_of(T).is_empty());
    }

    #[test]
    fn dwell_raised_once_per_visit() {
        let zones = delhi_zones();
        let mut tracker = ZoneTracker::new();
        // 1 km out: inside the 2 km cordon (zone 3), outside the lawns (zone 1).
        let cordon = calculate_destination(INDIA_GATE, 1_000.0, 0.0);

        assert!(tracker.update(T, cordon, 0, &zones).is_empty());
        assert!(tracker.update(T, cordon, 600, &zones).is_empty());

        let events = tracker.update(T, cordon, 601, &zones);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].zone, ZoneId(3));
        assert_eq!(events[0].kind, ZoneEventKind::DwellExceeded { dwell_secs: 601 });

        assert!(tracker.update(T, cordon, 900, &zones).is_empty());
        assert_eq!(tracker.dwell_secs(T, ZoneId(3), 1_000), Some(1_000));

        // Leave and come back: a fresh visit may raise again.
        tracker.update(T, FAR, 1_000, &zones);
        tracker.update(T, cordon, 1_100, &zones);
        let events = tracker.update(T, cordon, 1_800, &zones);
        assert_eq!(events[0].kind, ZoneEventKind::DwellExceeded { dwell_secs: 700 });
    }

    #[test]
    fn removed_zone_is_dropped_silently() {
        let zones = delhi_zones();
        let mut tracker = ZoneTracker::new();
        tracker.update(T, INDIA_GATE, 0, &zones);

        let remaining: Vec<_> = zones.into_iter().filter(|z| z.id != ZoneId(1)).collect();
        let events = tracker.update(T, INDIA_GATE, 50, &remaining);
        assert!(events.is_empty());
        assert_eq!(tracker.zones_of(T), vec![ZoneId(3)]);
    }

    #[test]
    fn clock_going_backwards_saturates() {
        let zones = delhi_zones();
        let mut tracker = ZoneTracker::new();
        tracker.update(T, INDIA_GATE, 1_000, &zones);
        let events = tracker.update(T, FAR, 900, &zones);
        assert_eq!(events[0].kind, ZoneEventKind::Exited { dwell_secs: 0 });
    }

    #[test]
    fn state_dropped_when_outside_every_zone() {
        let zones = delhi_zones();
        let mut tracker = ZoneTracker::new();

        for t in 0..50 {
            tracker.update(TouristId(t), FAR, 0, &zones);
        }
        assert_eq!(tracker.tracked_count(), 0);

        tracker.update(T, INDIA_GATE, 10, &zones);
        assert_eq!(tracker.tracked_count(), 1);
        tracker.update(T, FAR, 20, &zones);
        assert_eq!(tracker.tracked_count(), 0);
        assert!(tracker.zones_of(T).is_empty());
    }

    #[test]
    fn tourists_are_independent() {
        let zones = delhi_zones();
        let mut tracker = ZoneTracker::new();
        let other = TouristId(2);
        tracker.update(T, INDIA_GATE, 0, &zones);
        assert_eq!(tracker.update(other, INDIA_GATE, 0, &zones).len(), 1);
        assert_eq!(tracker.tracked_count(), 2);

        tracker.forget(T);
        assert!(tracker.zones_of(T).is_empty());
        assert_eq!(tracker.tracked_count(), 1);
        assert_eq!(tracker.dwell_secs(T, ZoneId(1), 10), None);
    }
}

// ── Fix loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use tg_core::TouristId;

    use crate::{load_fixes_reader, SpatialError};

    #[test]
    fn parses_rows_in_order() {
        let csv = "tourist_id,lat,lng,unix_secs\n\
                   0, 28.6139, 77.2090, 1700000000\n\
                   1,28.6562,77.2410,1700000060\n";
        let fixes = load_fixes_reader(Cursor::new(csv)).unwrap();
        assert_eq!(fixes.len(), 2);
        assert_eq!(fixes[0].tourist, TouristId(0));
        assert_eq!(fixes[0].coord.lat, 28.6139);
        assert_eq!(fixes[1].at_secs, 1_700_000_060);
    }

    #[test]
    fn rejects_out_of_range_fix() {
        let csv = "tourist_id,lat,lng,unix_secs\n\
                   0,28.6,77.2,1\n\
                   0,91.0,77.2,2\n";
        match load_fixes_reader(Cursor::new(csv)) {
            Err(SpatialError::InvalidFix { row, lat, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(lat, 91.0);
            }
            other => panic!("expected InvalidFix, got {other:?}"),
        }
    }

    #[test]
    fn rejects_nan_fix() {
        let csv = "tourist_id,lat,lng,unix_secs\n0,NaN,77.2,1\n";
        assert!(matches!(
            load_fixes_reader(Cursor::new(csv)),
            Err(SpatialError::InvalidFix { row: 1, .. })
        ));
    }

    #[test]
    fn malformed_row_is_parse_error() {
        let csv = "tourist_id,lat,lng,unix_secs\nabc,28.6,77.2,1\n";
        assert!(matches!(
            load_fixes_reader(Cursor::new(csv)),
            Err(SpatialError::Parse(_))
        ));
    }
}
