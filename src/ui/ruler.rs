//! Ruler grid layout
//!
//! The ruler is a grid of evenly spaced dots covering the canvas, used as a
//! visual measurement reference. Dots along the bottom row and the left
//! column can carry distance labels. Positions are in scene space, so the
//! origin of the measurements is the bottom-left corner.

use crate::config::RulerConfig;
use crate::domain::core::{Point, Size};

/// Distance label attached to a ruler dot
#[derive(Debug, Clone, PartialEq)]
pub struct RulerLabel {
    pub anchor: Point,
    pub text: String,
}

/// Pre-calculated ruler geometry for one canvas size
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RulerLayout {
    pub dots: Vec<Point>,
    pub labels: Vec<RulerLabel>,
    pub dot_radius: f32,
}

impl RulerLayout {
    /// Lays out ruler dots for a canvas
    ///
    /// Dots start one spacing away from the origin and stop before the
    /// canvas edge. An empty layout is returned for an empty canvas.
    pub fn new(size: Size, config: &RulerConfig) -> Self {
        let mut layout = Self {
            dots: Vec::new(),
            labels: Vec::new(),
            dot_radius: config.dot_radius,
        };

        if size.is_empty() || config.spacing <= 0.0 {
            return layout;
        }

        let columns = steps(size.width, config.spacing);
        let rows = steps(size.height, config.spacing);

        for row in 1..=rows {
            for column in 1..=columns {
                layout.dots.push(Point::new(
                    column as f32 * config.spacing,
                    row as f32 * config.spacing,
                ));
            }
        }

        if config.label_every > 0 && rows > 0 && columns > 0 {
            layout.calculate_labels(columns, rows, config);
        }

        layout
    }

    /// Labels every `label_every`-th dot of the bottom row and left column
    fn calculate_labels(&mut self, columns: u32, rows: u32, config: &RulerConfig) {
        let every = config.label_every;

        for column in (every..=columns).step_by(every as usize) {
            let x = column as f32 * config.spacing;
            self.labels.push(RulerLabel {
                anchor: Point::new(x, config.spacing),
                text: format!("{}", x.round() as i64),
            });
        }

        for row in (every..=rows).step_by(every as usize) {
            let y = row as f32 * config.spacing;
            self.labels.push(RulerLabel {
                anchor: Point::new(config.spacing, y),
                text: format!("{}", y.round() as i64),
            });
        }
    }
}

/// Number of whole spacings strictly inside `length`
fn steps(length: f32, spacing: f32) -> u32 {
    let count = (length / spacing).floor() as u32;
    if count as f32 * spacing >= length {
        count.saturating_sub(1)
    } else {
        count
    }
}
