//! Geometry value types
//!
//! Host bounds arrive as 3D axis-aligned boxes ([`BoundingBox3`]); recentering
//! only ever looks at their horizontal footprint, accumulated into a
//! [`BoundingBox2D`].

use serde::{Deserialize, Serialize};

/// A point in host model coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the point moved by `delta`
    pub fn translated(&self, delta: &Vector3) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.z + delta.z)
    }
}

/// A displacement in host model coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Axis-aligned 3D bounds of one element as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox3 {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox3 {
    pub const fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Returns the box moved by `delta`
    pub fn translated(&self, delta: &Vector3) -> Self {
        Self::new(self.min.translated(delta), self.max.translated(delta))
    }

    /// Whether the four horizontal scalar bounds are all finite
    pub fn has_finite_footprint(&self) -> bool {
        self.min.x.is_finite()
            && self.min.y.is_finite()
            && self.max.x.is_finite()
            && self.max.y.is_finite()
    }
}

/// Union of element footprints in the horizontal plane
///
/// Starts empty; once at least one footprint has been included the box is
/// valid and `min_x <= max_x && min_y <= max_y` holds. An empty box must not
/// be used to compute a translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox2D {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    /// Number of footprints that contributed
    pub contributors: usize,
}

impl BoundingBox2D {
    /// Create an empty box
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
            contributors: 0,
        }
    }

    /// Create a box from explicit corners (normalized so min <= max)
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let mut bounds = Self::empty();
        bounds.include_xy(x0, y0, x1, y1);
        bounds
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.contributors == 0
    }

    /// Include the horizontal footprint of `bounds`
    ///
    /// Returns `false` (and leaves the union untouched) when any of the four
    /// horizontal bounds is non-finite.
    pub fn include(&mut self, bounds: &BoundingBox3) -> bool {
        self.include_xy(bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y)
    }

    fn include_xy(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) -> bool {
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return false;
        }
        self.min_x = self.min_x.min(x0.min(x1));
        self.min_y = self.min_y.min(y0.min(y1));
        self.max_x = self.max_x.max(x0.max(x1));
        self.max_y = self.max_y.max(y0.max(y1));
        self.contributors += 1;
        true
    }

    /// Midpoint of the box, or `None` when empty or non-finite
    pub fn center(&self) -> Option<(f64, f64)> {
        if self.is_empty() || self.min_x > self.max_x || self.min_y > self.max_y {
            return None;
        }
        let cx = 0.5 * (self.min_x + self.max_x);
        let cy = 0.5 * (self.min_y + self.max_y);
        if cx.is_finite() && cy.is_finite() {
            Some((cx, cy))
        } else {
            None
        }
    }
}

impl Default for BoundingBox2D {
    fn default() -> Self {
        Self::empty()
    }
}

/// Horizontal translation that centers a footprint at the origin
///
/// The vertical component is always zero so the vertical datum is preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecenterTranslation {
    pub delta: Vector3,
}

impl RecenterTranslation {
    /// Derive the translation from a footprint; `None` when the box is empty
    /// or its center is not finite
    pub fn from_bounds(bounds: &BoundingBox2D) -> Option<Self> {
        let (cx, cy) = bounds.center()?;
        let delta = Vector3::new(-cx, -cy, 0.0);
        if delta.is_finite() {
            Some(Self { delta })
        } else {
            None
        }
    }

    /// Length of the horizontal displacement
    pub fn magnitude(&self) -> f64 {
        self.delta.length()
    }
}

impl std::fmt::Display for RecenterTranslation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.4}, {:.4}, {:.4})",
            self.delta.x, self.delta.y, self.delta.z
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bb(x0: f64, y0: f64, x1: f64, y1: f64) -> BoundingBox3 {
        BoundingBox3::new(Point3::new(x0, y0, 0.0), Point3::new(x1, y1, 3.0))
    }

    #[test]
    fn test_empty_box_has_no_center() {
        let bounds = BoundingBox2D::empty();
        assert!(bounds.is_empty());
        assert!(bounds.center().is_none());
        assert!(RecenterTranslation::from_bounds(&bounds).is_none());
        assert_eq!(bounds.contributors, 0);
    }

    #[test]
    fn test_union_of_two_boxes() {
        let mut bounds = BoundingBox2D::empty();
        assert!(bounds.include(&bb(0.0, 0.0, 10.0, 10.0)));
        assert!(bounds.include(&bb(10.0, 0.0, 20.0, 10.0)));

        assert_eq!(bounds.contributors, 2);
        assert_eq!(bounds.center(), Some((10.0, 5.0)));
        assert_eq!((bounds.min_x, bounds.max_x), (0.0, 20.0));
        assert_eq!((bounds.min_y, bounds.max_y), (0.0, 10.0));
    }

    #[test]
    fn test_non_finite_bounds_rejected() {
        let mut bounds = BoundingBox2D::empty();
        assert!(!bounds.include(&bb(f64::NAN, 0.0, 1.0, 1.0)));
        assert!(!bounds.include(&bb(0.0, 0.0, f64::INFINITY, 1.0)));
        assert!(bounds.is_empty());

        assert!(bounds.include(&bb(-1.0, -1.0, 1.0, 1.0)));
        assert_eq!(bounds.contributors, 1);
    }

    #[test]
    fn test_inverted_corners_are_normalized() {
        let bounds = BoundingBox2D::from_corners(5.0, 8.0, -5.0, 2.0);
        assert_eq!(bounds.min_x, -5.0);
        assert_eq!(bounds.max_y, 8.0);
        assert_eq!(bounds.center(), Some((0.0, 5.0)));
    }

    #[test]
    fn test_translation_is_horizontal() {
        let bounds = BoundingBox2D::from_corners(0.0, 0.0, 20.0, 10.0);
        let translation = RecenterTranslation::from_bounds(&bounds).unwrap();
        assert_eq!(translation.delta, Vector3::new(-10.0, -5.0, 0.0));
    }

    #[test]
    fn test_centered_box_gives_near_zero_translation() {
        let bounds = BoundingBox2D::from_corners(-7.5, -2.25, 7.5, 2.25);
        let translation = RecenterTranslation::from_bounds(&bounds).unwrap();
        assert!(translation.magnitude() < 1e-9);
    }

    #[test]
    fn test_box_translation() {
        let moved = bb(0.0, 0.0, 1.0, 1.0).translated(&Vector3::new(2.0, -3.0, 0.0));
        assert_eq!(moved.min, Point3::new(2.0, -3.0, 0.0));
        assert_eq!(moved.max, Point3::new(3.0, -2.0, 3.0));
    }
}
