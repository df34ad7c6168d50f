//! Retained scene of drawn shapes
//!
//! The drawing session never rasterizes anything itself. It issues draw
//! requests through the [`Canvas`] trait and the renderer later turns the
//! retained [`Scene`] into pixels. All coordinates are in scene space.

use tiny_skia::Color;

use crate::domain::core::Point;
use crate::domain::path::Path;

/// Identifier of a shape added to a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(u64);

/// Circular marker drawn at a touch location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub center: Point,
    pub radius: f32,
    pub fill: Color,
    pub stroke: Option<Color>,
    pub stroke_width: f32,
}

impl Marker {
    /// Translucent spot shown under a finger before the tap is confirmed
    pub fn provisional(center: Point, radius: f32) -> Self {
        Self {
            center,
            radius,
            fill: Color::from_rgba8(255, 255, 255, 90),
            stroke: Some(Color::from_rgba8(255, 255, 255, 200)),
            stroke_width: 1.5,
        }
    }

    /// Spot marking the start point of a path
    pub fn spot(center: Point, radius: f32) -> Self {
        Self {
            center,
            radius,
            fill: Color::from_rgba8(255, 149, 0, 160),
            stroke: Some(Color::from_rgba8(255, 255, 255, 255)),
            stroke_width: 2.0,
        }
    }

    /// Highlight shown when a touch lands near an existing path's start
    pub fn anchor(center: Point, radius: f32) -> Self {
        Self {
            center,
            radius: radius * 1.25,
            fill: Color::TRANSPARENT,
            stroke: Some(Color::from_rgba8(52, 199, 89, 255)),
            stroke_width: 3.0,
        }
    }
}

/// Polyline shape
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
    pub color: Color,
    pub width: f32,
}

impl Polyline {
    /// Builds the shape representing a domain path
    pub fn from_path(path: &Path) -> Self {
        let color = if path.is_closed() {
            Color::from_rgba8(0, 122, 255, 255)
        } else {
            Color::from_rgba8(255, 59, 48, 255)
        };

        Self {
            points: path.points().to_vec(),
            closed: path.is_closed(),
            color,
            width: 3.0,
        }
    }
}

/// Anything the canvas can retain
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polyline(Polyline),
    Marker(Marker),
}

/// Rendering collaborator receiving draw requests
pub trait Canvas {
    /// Adds a shape on top of every existing shape
    fn add_shape(&mut self, shape: Shape) -> ShapeId;

    /// Replaces a shape in place, keeping its stacking order
    ///
    /// # Returns
    /// false if the id is unknown
    fn replace_shape(&mut self, id: ShapeId, shape: Shape) -> bool;

    /// Moves a marker to a new center; polylines are left untouched
    fn move_shape(&mut self, id: ShapeId, center: Point) -> bool;

    /// Removes a single shape
    fn remove_shape(&mut self, id: ShapeId) -> bool;

    /// Removes every shape
    fn remove_all(&mut self);
}

/// In-memory canvas retaining shapes in stacking order
#[derive(Debug, Default)]
pub struct Scene {
    shapes: Vec<(ShapeId, Shape)>,
    next_id: u64,
    dirty: bool,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns shapes from bottom to top
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().map(|(_, shape)| shape)
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes
            .iter()
            .find(|(shape_id, _)| *shape_id == id)
            .map(|(_, shape)| shape)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Returns true if the scene changed since the last call, and resets the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    fn position(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|(shape_id, _)| *shape_id == id)
    }
}

impl Canvas for Scene {
    fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.push((id, shape));
        self.dirty = true;
        id
    }

    fn replace_shape(&mut self, id: ShapeId, shape: Shape) -> bool {
        match self.position(id) {
            Some(index) => {
                self.shapes[index].1 = shape;
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    fn move_shape(&mut self, id: ShapeId, center: Point) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };

        match &mut self.shapes[index].1 {
            Shape::Marker(marker) => {
                marker.center = center;
                self.dirty = true;
                true
            }
            Shape::Polyline(_) => false,
        }
    }

    fn remove_shape(&mut self, id: ShapeId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.shapes.remove(index);
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    fn remove_all(&mut self) {
        if !self.shapes.is_empty() {
            self.dirty = true;
        }
        self.shapes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker_at(x: f32, y: f32) -> Shape {
        Shape::Marker(Marker::spot(Point::new(x, y), 10.0))
    }

    #[test]
    fn added_shapes_keep_order_and_unique_ids() {
        let mut scene = Scene::new();
        let first = scene.add_shape(marker_at(1.0, 1.0));
        let second = scene.add_shape(marker_at(2.0, 2.0));

        assert_ne!(first, second);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.shapes().next(), Some(&marker_at(1.0, 1.0)));
        assert!(scene.take_dirty());
        assert!(!scene.take_dirty());
    }

    #[test]
    fn move_only_applies_to_markers() {
        let mut scene = Scene::new();
        let marker = scene.add_shape(marker_at(1.0, 1.0));
        let line = scene.add_shape(Shape::Polyline(Polyline::from_path(&Path::new(
            Point::new(0.0, 0.0),
        ))));

        assert!(scene.move_shape(marker, Point::new(5.0, 6.0)));
        match scene.get(marker) {
            Some(Shape::Marker(m)) => assert_eq!(m.center, Point::new(5.0, 6.0)),
            other => panic!("Expected marker, got {other:?}"),
        }
        assert!(!scene.move_shape(line, Point::new(5.0, 6.0)));
    }

    #[test]
    fn replace_keeps_stacking_position() {
        let mut scene = Scene::new();
        let first = scene.add_shape(marker_at(1.0, 1.0));
        scene.add_shape(marker_at(2.0, 2.0));

        assert!(scene.replace_shape(first, marker_at(9.0, 9.0)));
        assert_eq!(scene.shapes().next(), Some(&marker_at(9.0, 9.0)));
    }

    #[test]
    fn removal_and_unknown_ids() {
        let mut scene = Scene::new();
        let id = scene.add_shape(marker_at(1.0, 1.0));

        assert!(scene.remove_shape(id));
        assert!(!scene.remove_shape(id));
        assert!(!scene.replace_shape(id, marker_at(0.0, 0.0)));
        assert!(scene.is_empty());
    }

    #[test]
    fn remove_all_clears_and_marks_dirty() {
        let mut scene = Scene::new();
        scene.add_shape(marker_at(1.0, 1.0));
        scene.take_dirty();

        scene.remove_all();
        assert!(scene.is_empty());
        assert!(scene.take_dirty());

        // Clearing an empty scene is not a change
        scene.remove_all();
        assert!(!scene.take_dirty());
    }

    #[test]
    fn polyline_color_depends_on_closed_flag() {
        let mut path = Path::new(Point::new(0.0, 0.0));
        let open = Polyline::from_path(&path);
        path.close();
        let closed = Polyline::from_path(&path);

        assert!(!open.closed);
        assert!(closed.closed);
        assert_ne!(open.color, closed.color);
    }
}
