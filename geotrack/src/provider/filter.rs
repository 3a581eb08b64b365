//! Distance filter shared by the bundled providers.

use crate::coord::Coordinate;
use crate::geometry::great_circle_distance_meters;

/// Drops fixes that moved less than a threshold since the last accepted one.
///
/// The first fix is always accepted. A threshold of zero (or below) accepts
/// everything.
#[derive(Debug, Clone)]
pub struct DistanceFilter {
    threshold_m: f64,
    last_accepted: Option<Coordinate>,
}

impl DistanceFilter {
    /// Create a filter with the given threshold in meters.
    pub fn new(threshold_m: f64) -> Self {
        Self {
            threshold_m,
            last_accepted: None,
        }
    }

    /// Decide whether `coordinate` should be delivered, remembering it if so.
    pub fn accept(&mut self, coordinate: Coordinate) -> bool {
        let accepted = match self.last_accepted {
            None => true,
            Some(_) if self.threshold_m <= 0.0 => true,
            Some(last) => great_circle_distance_meters(last, coordinate) >= self.threshold_m,
        };

        if accepted {
            self.last_accepted = Some(coordinate);
        }
        accepted
    }

    /// Forget the last accepted fix.
    pub fn reset(&mut self) {
        self.last_accepted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_fix_always_accepted() {
        let mut filter = DistanceFilter::new(1_000_000.0);
        assert!(filter.accept(Coordinate::new(0.0, 0.0)));
    }

    #[test]
    fn test_drops_small_moves() {
        let mut filter = DistanceFilter::new(10.0);
        assert!(filter.accept(Coordinate::new(0.0, 0.0)));
        // ~1.1 m north
        assert!(!filter.accept(Coordinate::new(0.00001, 0.0)));
        // ~111 m north
        assert!(filter.accept(Coordinate::new(0.001, 0.0)));
    }

    #[test]
    fn test_measures_from_last_accepted() {
        let mut filter = DistanceFilter::new(10.0);
        filter.accept(Coordinate::new(0.0, 0.0));

        // Each step ~5.5 m; rejected steps don't move the reference point
        assert!(!filter.accept(Coordinate::new(0.00005, 0.0)));
        assert!(filter.accept(Coordinate::new(0.0001, 0.0)));
    }

    #[test]
    fn test_zero_threshold_accepts_duplicates() {
        let mut filter = DistanceFilter::new(0.0);
        assert!(filter.accept(Coordinate::new(1.0, 1.0)));
        assert!(filter.accept(Coordinate::new(1.0, 1.0)));
    }

    #[test]
    fn test_reset() {
        let mut filter = DistanceFilter::new(10.0);
        filter.accept(Coordinate::new(0.0, 0.0));
        filter.reset();
        assert!(filter.accept(Coordinate::new(0.0, 0.0)));
    }
}
