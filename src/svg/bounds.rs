//! Bounding box accumulation over path endpoints.
//!
//! The box starts at an invalid sentinel (`+inf`/`-inf`) and is narrowed
//! monotonically as points are folded in. Curve interiors are ignored:
//! only segment endpoints participate, so the box is an endpoint-tight
//! approximation, not a true geometric extremum.

use super::path::Point;

/// Axis-aligned bounding box over folded points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BoundingBox {
    /// Create the invalid sentinel box. Valid only after at least one
    /// finite point has been folded in.
    pub const fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Narrow the box to include `p`.
    pub fn fold_point(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// A box is valid once all four components are finite.
    ///
    /// Stays false when no path existed, every `d` was empty, or a path
    /// carried non-finite coordinates.
    pub fn is_valid(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_invalid() {
        assert!(!BoundingBox::new().is_valid());
    }

    #[test]
    fn test_single_point_is_valid() {
        let mut bbox = BoundingBox::new();
        bbox.fold_point(Point { x: 3.0, y: -2.0 });
        assert!(bbox.is_valid());
        assert_eq!(bbox.min_x, 3.0);
        assert_eq!(bbox.max_x, 3.0);
        assert_eq!(bbox.width(), 0.0);
        assert_eq!(bbox.height(), 0.0);
    }

    #[test]
    fn test_fold_narrows_monotonically() {
        let mut bbox = BoundingBox::new();
        bbox.fold_point(Point { x: 10.0, y: 20.0 });
        bbox.fold_point(Point { x: 30.0, y: 5.0 });
        assert_eq!(bbox.min_x, 10.0);
        assert_eq!(bbox.min_y, 5.0);
        assert_eq!(bbox.max_x, 30.0);
        assert_eq!(bbox.max_y, 20.0);
        assert_eq!(bbox.width(), 20.0);
        assert_eq!(bbox.height(), 15.0);

        // Interior points leave the box unchanged
        bbox.fold_point(Point { x: 15.0, y: 10.0 });
        assert_eq!(bbox.width(), 20.0);
        assert_eq!(bbox.height(), 15.0);
    }

    #[test]
    fn test_nan_only_points_leave_box_invalid() {
        // f64::min/max ignore NaN, so the sentinel survives a NaN-only fold
        let mut bbox = BoundingBox::new();
        bbox.fold_point(Point {
            x: f64::NAN,
            y: f64::NAN,
        });
        assert!(!bbox.is_valid());

        // A later finite point still validates the box
        bbox.fold_point(Point { x: 1.0, y: 2.0 });
        assert!(bbox.is_valid());
    }
}
