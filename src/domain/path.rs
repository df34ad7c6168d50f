//! Polyline paths and the session's path accumulator
//!
//! A path is built one confirmed tap at a time: the first tap creates it,
//! following taps append points, and a final tap closes it. The accumulator
//! keeps every path created during the session in creation order.

use crate::domain::core::{within_spot, Point};

/// Errors that can occur while mutating a path
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    /// The path was already closed and cannot take more points
    #[error("path is already closed")]
    AlreadyClosed,
}

/// A polyline defined by an ordered sequence of points
///
/// The first point is the start point and never changes. The end point is
/// always the last point added. Once closed, the path conceptually includes
/// a segment from the end point back to the start point.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Point>,
    closed: bool,
}

impl Path {
    /// Creates a new open path containing only its start point
    pub fn new(start: Point) -> Self {
        Self {
            points: vec![start],
            closed: false,
        }
    }

    /// Returns the start point
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// Returns the end point (last point added)
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Returns all recorded points in insertion order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of recorded points (the closing segment adds none)
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the path has been closed
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Appends a line segment from the current end point to `point`
    ///
    /// # Returns
    /// Ok(()) on success, or `PathError::AlreadyClosed` for a closed path
    pub fn add_line(&mut self, point: Point) -> Result<(), PathError> {
        if self.closed {
            return Err(PathError::AlreadyClosed);
        }
        self.points.push(point);
        Ok(())
    }

    /// Marks the path as closed
    ///
    /// Closing is idempotent; the closing segment is implicit and is not
    /// stored as an extra point.
    pub fn close(&mut self) {
        self.closed = true;
    }
}

/// Ordered collection of all paths drawn during a session
///
/// Append-only except for a full clear. While a path is under construction
/// it is always the last element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathAccumulator {
    paths: Vec<Path>,
}

impl PathAccumulator {
    /// Creates an empty accumulator
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    /// Appends a new path
    pub fn push(&mut self, path: Path) {
        self.paths.push(path);
    }

    /// Returns the most recently created path
    pub fn current(&self) -> Option<&Path> {
        self.paths.last()
    }

    /// Returns the most recently created path mutably
    pub fn current_mut(&mut self) -> Option<&mut Path> {
        self.paths.last_mut()
    }

    /// Removes every path
    pub fn clear(&mut self) {
        self.paths.clear();
    }

    /// Returns the number of paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns true if no path has been created
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Returns all paths in creation order
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Returns the start points of every path whose start lies within
    /// `radius` of `point`
    pub fn starts_near(&self, point: &Point, radius: f32) -> Vec<Point> {
        self.paths
            .iter()
            .map(Path::start)
            .filter(|start| within_spot(point, start, radius))
            .collect()
    }
}
