//! Core domain types and operations
//!
//! This module defines pure geometric types shared by the path and tap
//! state machines. Nothing here knows about Win32, pixmaps or fonts.
//!
//! Two coordinate spaces exist:
//! - **View space**: origin at the top-left corner, y grows downwards.
//!   Pointer messages arrive in this space.
//! - **Scene space**: origin at the bottom-left corner, y grows upwards.
//!   Paths and markers are recorded in this space.

/// Point in view or scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Creates a new point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns this point translated by the given deltas
    pub fn offset(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Returns the Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Width and height of a view or scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Creates a new size
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns true if the point lies inside `[0, width) x [0, height)`
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= 0.0 && point.x < self.width && point.y >= 0.0 && point.y < self.height
    }

    /// Returns true if either dimension is zero or negative
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Converts a point in view coordinates to scene coordinates
///
/// Flips the vertical axis: `scene_y = view_height - view_y`. The conversion
/// is its own inverse when applied with the same height, so it is also used
/// to go from scene space back to view (pixmap) space.
///
/// # Arguments
/// * `point` - Point in view coordinates
/// * `view_height` - Height of the view the point was measured in
pub fn convert_to_point_in_scene(point: Point, view_height: f32) -> Point {
    Point::new(point.x, view_height - point.y)
}

/// Axis-aligned proximity check used for anchor detection
///
/// Returns true when `candidate` lies strictly inside the square of
/// half-width `radius` centered on `origin`.
pub fn within_spot(candidate: &Point, origin: &Point, radius: f32) -> bool {
    let dx = (candidate.x - origin.x).abs();
    let dy = (candidate.y - origin.y).abs();
    dx < radius && dy < radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_basic_properties() {
        let point = Point::new(10.0, 20.0);
        assert_eq!(point.x, 10.0);
        assert_eq!(point.y, 20.0);
        assert_eq!(point.offset(5.0, -5.0), Point::new(15.0, 15.0));
        assert_relative_eq!(Point::new(0.0, 0.0).distance_to(&Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn size_contains_point() {
        let size = Size::new(100.0, 50.0);
        assert!(size.contains(&Point::new(0.0, 0.0))); // Top-left corner
        assert!(size.contains(&Point::new(99.5, 49.5))); // Inside
        assert!(!size.contains(&Point::new(100.0, 10.0))); // Right edge is exclusive
        assert!(!size.contains(&Point::new(-1.0, 10.0))); // Outside left
        assert!(!Size::new(0.0, 10.0).contains(&Point::new(0.0, 0.0)));
    }

    #[test]
    fn empty_size() {
        assert!(Size::new(0.0, 10.0).is_empty());
        assert!(Size::new(10.0, -1.0).is_empty());
        assert!(!Size::new(1.0, 1.0).is_empty());
    }

    #[test]
    fn scene_conversion_flips_vertical_axis() {
        let converted = convert_to_point_in_scene(Point::new(12.0, 30.0), 200.0);
        assert_relative_eq!(converted.x, 12.0);
        assert_relative_eq!(converted.y, 170.0);
    }

    #[test]
    fn scene_conversion_is_an_involution_for_same_height() {
        let height = 768.0;
        let original = Point::new(321.25, 17.5);
        let round_trip =
            convert_to_point_in_scene(convert_to_point_in_scene(original, height), height);
        assert_relative_eq!(round_trip.x, original.x);
        assert_relative_eq!(round_trip.y, original.y);
    }

    #[test]
    fn spot_check_is_bounded_on_both_sides() {
        let origin = Point::new(100.0, 100.0);
        let radius = 20.0;

        assert!(within_spot(&Point::new(119.0, 100.0), &origin, radius));
        assert!(!within_spot(&Point::new(121.0, 100.0), &origin, radius));
        assert!(within_spot(&Point::new(81.0, 100.0), &origin, radius));
        assert!(!within_spot(&Point::new(79.0, 100.0), &origin, radius));
        assert!(!within_spot(&Point::new(100.0, 60.0), &origin, radius));
        // Exactly on the boundary is outside
        assert!(!within_spot(&Point::new(120.0, 100.0), &origin, radius));
    }
}
