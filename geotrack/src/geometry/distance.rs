//! Distance and containment evaluation.

use crate::coord::{CircleRegion, Coordinate, EARTH_RADIUS_M};

/// Haversine great-circle distance between two coordinates, in meters.
///
/// Uses a spherical Earth (R = 6371 km) and ignores ellipsoidal flattening.
/// Deterministic and side-effect free; inputs are assumed to be valid.
#[inline]
pub fn great_circle_distance_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push h just past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Whether `a` and `b` are no more than `radius_m` meters apart.
///
/// Boundary inclusive. This is the raw threshold test; it accepts any radius,
/// including zero.
#[inline]
pub fn is_within_distance(a: Coordinate, b: Coordinate, radius_m: f64) -> bool {
    great_circle_distance_meters(a, b) <= radius_m
}

/// Whether `point` lies inside `region`. A point exactly on the boundary
/// counts as inside.
#[inline]
pub fn is_inside_region(point: Coordinate, region: &CircleRegion) -> bool {
    is_within_distance(point, region.center(), region.radius_m())
}

/// Signed distance from `point` to the region boundary in meters.
///
/// Positive outside the fence, negative inside, zero on the boundary.
pub fn distance_to_boundary_meters(point: Coordinate, region: &CircleRegion) -> f64 {
    great_circle_distance_meters(point, region.center()) - region.radius_m()
}

/// Initial great-circle bearing from `from` to `to`.
///
/// Returns degrees in `[0, 360)`, 0 = north, 90 = east. Identical points yield 0.
pub fn initial_bearing_degrees(from: Coordinate, to: Coordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let dlon = (to.longitude - from.longitude).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    // rem_euclid rounds tiny negative angles up to exactly 360
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fence(lat: f64, lon: f64, radius_m: f64) -> CircleRegion {
        CircleRegion::new(Coordinate::new(lat, lon), radius_m).unwrap()
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        let p = Coordinate::new(37.43311575, -122.24044723);
        assert_eq!(great_circle_distance_meters(p, p), 0.0);
    }

    #[test]
    fn test_one_degree_latitude_at_equator() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(1.0, 0.0);
        let d = great_circle_distance_meters(a, b);
        assert!(
            (d - 111_195.0).abs() < 111_195.0 * 0.01,
            "Expected ~111195 m, got {}",
            d
        );
    }

    #[test]
    fn test_distance_nyc_to_la() {
        let nyc = Coordinate::new(40.7128, -74.0060);
        let la = Coordinate::new(34.0522, -118.2437);
        let d = great_circle_distance_meters(nyc, la);
        // ~3944 km
        assert!((d - 3_944_000.0).abs() < 50_000.0, "got {}", d);
    }

    #[test]
    fn test_distance_across_antimeridian() {
        let a = Coordinate::new(0.0, 179.5);
        let b = Coordinate::new(0.0, -179.5);
        let d = great_circle_distance_meters(a, b);
        assert!((d - 111_195.0).abs() < 200.0, "got {}", d);
    }

    #[test]
    fn test_antipodal_distance_is_half_circumference() {
        let half = std::f64::consts::PI * EARTH_RADIUS_M;
        for lon in [-180.0, -90.0, 0.0, 45.0, 180.0] {
            for step in 0..=1800 {
                let lat = -90.0 + step as f64 * 0.1;
                let a = Coordinate::new(lat, lon);
                let b = Coordinate::new(-lat, lon - 180.0);
                let d = great_circle_distance_meters(a, b);
                assert!(d.is_finite(), "non-finite distance for {} / {}", a, b);
                assert!((d - half).abs() < 1.0, "{} / {}: {}", a, b, d);
            }
        }
    }

    #[test]
    fn test_globe_sized_fence_contains_antipode() {
        let region = fence(-87.5, 0.0, 30_000_000.0);
        assert!(is_inside_region(Coordinate::new(87.5, -180.0), &region));
    }

    #[test]
    fn test_center_is_inside() {
        let region = fence(37.43311575, -122.24044723, 3000.0);
        assert!(is_inside_region(region.center(), &region));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let center = Coordinate::new(48.8566, 2.3522);
        let point = Coordinate::new(48.8666, 2.3622);
        let exact = great_circle_distance_meters(point, center);

        let region = CircleRegion::new(center, exact).unwrap();
        assert!(is_inside_region(point, &region));
    }

    #[test]
    fn test_point_just_outside() {
        let center = Coordinate::new(48.8566, 2.3522);
        let point = Coordinate::new(48.8666, 2.3622);
        let exact = great_circle_distance_meters(point, center);

        let region = CircleRegion::new(center, exact - 0.01).unwrap();
        assert!(!is_inside_region(point, &region));
    }

    #[test]
    fn test_within_zero_distance() {
        let p = Coordinate::new(10.0, 20.0);
        assert!(is_within_distance(p, p, 0.0));
        assert!(!is_within_distance(p, Coordinate::new(10.0001, 20.0), 0.0));
    }

    #[test]
    fn test_distance_to_boundary_sign() {
        let region = fence(0.0, 0.0, 1000.0);
        let inside = Coordinate::new(0.0, 0.0);
        let outside = Coordinate::new(1.0, 0.0);

        assert_eq!(distance_to_boundary_meters(inside, &region), -1000.0);
        assert!(distance_to_boundary_meters(outside, &region) > 100_000.0);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Coordinate::new(0.0, 0.0);
        let north = initial_bearing_degrees(origin, Coordinate::new(1.0, 0.0));
        let east = initial_bearing_degrees(origin, Coordinate::new(0.0, 1.0));
        let south = initial_bearing_degrees(origin, Coordinate::new(-1.0, 0.0));
        let west = initial_bearing_degrees(origin, Coordinate::new(0.0, -1.0));

        assert!(north.abs() < 0.01, "north {}", north);
        assert!((east - 90.0).abs() < 0.01, "east {}", east);
        assert!((south - 180.0).abs() < 0.01, "south {}", south);
        assert!((west - 270.0).abs() < 0.01, "west {}", west);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn coordinate() -> impl Strategy<Value = Coordinate> {
            (-90.0..=90.0_f64, -180.0..=180.0_f64).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
        }

        proptest! {
            #[test]
            fn test_distance_to_self_is_zero(p in coordinate()) {
                prop_assert_eq!(great_circle_distance_meters(p, p), 0.0);
            }

            #[test]
            fn test_distance_is_symmetric(a in coordinate(), b in coordinate()) {
                let ab = great_circle_distance_meters(a, b);
                let ba = great_circle_distance_meters(b, a);
                prop_assert!((ab - ba).abs() < 1e-6, "{} != {}", ab, ba);
            }

            #[test]
            fn test_distance_bounded_by_half_circumference(a in coordinate(), b in coordinate()) {
                let d = great_circle_distance_meters(a, b);
                prop_assert!(d >= 0.0);
                prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_M + 1e-6);
            }

            #[test]
            fn test_inside_matches_distance(
                p in coordinate(),
                center in coordinate(),
                radius in 1.0..5_000_000.0_f64
            ) {
                let region = CircleRegion::new(center, radius).unwrap();
                let expected = great_circle_distance_meters(p, center) <= radius;
                prop_assert_eq!(is_inside_region(p, &region), expected);
            }

            #[test]
            fn test_center_inside_any_radius(center in coordinate(), radius in 0.001..1e7_f64) {
                let region = CircleRegion::new(center, radius).unwrap();
                prop_assert!(is_inside_region(center, &region));
            }

            #[test]
            fn test_bearing_in_range(a in coordinate(), b in coordinate()) {
                let bearing = initial_bearing_degrees(a, b);
                prop_assert!((0.0..360.0).contains(&bearing), "bearing {}", bearing);
            }
        }
    }
}
