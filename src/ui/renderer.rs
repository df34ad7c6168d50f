//! Scene rasterization
//!
//! Turns the retained scene into a tiny-skia pixmap. Layers are drawn back
//! to front: background color, background image, ruler, shapes, status
//! line. Layout (ruler dots, background scale) is computed once at
//! construction so a frame only walks the retained data.

use std::path::PathBuf;

use tiny_skia::{
    Color, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use crate::config::DrawingConfig;
use crate::domain::core::{convert_to_point_in_scene, Point, Size};
use crate::ui::ruler::RulerLayout;
use crate::ui::scene::{Marker, Polyline, Scene, Shape};
use crate::ui::text::TextRasterizer;

/// Rendering errors
#[derive(Debug, thiserror::Error)]
pub enum RendererError {
    #[error("Failed to create pixmap for rendering")]
    PixmapCreationFailed,

    #[error("Failed to load background image {path}: {reason}")]
    BackgroundLoadFailed { path: PathBuf, reason: String },

    #[error("Failed to load font {path}: {reason}")]
    FontLoadFailed { path: PathBuf, reason: String },
}

fn canvas_color() -> Color {
    Color::from_rgba8(28, 28, 30, 255)
}

fn ruler_color() -> Color {
    Color::from_rgba8(255, 255, 255, 110)
}

fn label_color() -> Color {
    Color::from_rgba8(255, 255, 255, 170)
}

fn status_color() -> Color {
    Color::from_rgba8(255, 255, 255, 230)
}

const LABEL_SIZE: f32 = 11.0;
const STATUS_SIZE: f32 = 16.0;

/// What a frame should show besides the retained shapes
#[derive(Debug, Clone, Copy)]
pub struct FrameOptions<'a> {
    pub show_ruler: bool,
    pub status: Option<&'a str>,
}

/// Renderer for drawing sessions using tiny-skia
#[derive(Debug)]
pub struct SceneRenderer {
    size: Size,
    background: Option<Pixmap>,
    ruler: RulerLayout,
    text: TextRasterizer,
}

impl SceneRenderer {
    /// Creates a renderer, loading the background image and font named in
    /// the configuration
    pub fn new(config: &DrawingConfig) -> Result<Self, RendererError> {
        let background = match &config.background {
            Some(path) => {
                let image = Pixmap::load_png(path).map_err(|err| {
                    RendererError::BackgroundLoadFailed {
                        path: path.clone(),
                        reason: err.to_string(),
                    }
                })?;
                log::info!(
                    "Background {} loaded ({}x{})",
                    path.display(),
                    image.width(),
                    image.height()
                );
                Some(image)
            }
            None => None,
        };

        let text = match &config.font {
            Some(path) => TextRasterizer::from_path(path)?,
            None => TextRasterizer::without_font(),
        };

        let size = config.canvas_size();
        Ok(Self {
            size,
            background,
            ruler: RulerLayout::new(size, &config.ruler),
            text,
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn ruler(&self) -> &RulerLayout {
        &self.ruler
    }

    /// Renders one frame of `scene`
    pub fn render(
        &self,
        scene: &Scene,
        options: FrameOptions<'_>,
    ) -> Result<Pixmap, RendererError> {
        let mut pixmap = Pixmap::new(self.size.width as u32, self.size.height as u32)
            .ok_or(RendererError::PixmapCreationFailed)?;

        pixmap.fill(canvas_color());
        self.render_background(&mut pixmap);

        if options.show_ruler {
            self.render_ruler(&mut pixmap);
        }

        for shape in scene.shapes() {
            match shape {
                Shape::Polyline(polyline) => self.render_polyline(&mut pixmap, polyline),
                Shape::Marker(marker) => self.render_marker(&mut pixmap, marker),
            }
        }

        if let Some(status) = options.status {
            self.text.draw(&mut pixmap, status, 12.0, 10.0, STATUS_SIZE, status_color());
        }

        Ok(pixmap)
    }

    /// Scene point to pixmap point
    fn to_pixmap(&self, point: Point) -> Point {
        convert_to_point_in_scene(point, self.size.height)
    }

    fn render_background(&self, pixmap: &mut Pixmap) {
        let Some(image) = &self.background else {
            return;
        };

        let sx = self.size.width / image.width() as f32;
        let sy = self.size.height / image.height() as f32;
        pixmap.draw_pixmap(
            0,
            0,
            image.as_ref(),
            &PixmapPaint::default(),
            Transform::from_scale(sx, sy),
            None,
        );
    }

    fn render_ruler(&self, pixmap: &mut Pixmap) {
        let mut builder = PathBuilder::new();
        for dot in &self.ruler.dots {
            let center = self.to_pixmap(*dot);
            builder.push_circle(center.x, center.y, self.ruler.dot_radius);
        }

        if let Some(path) = builder.finish() {
            let mut paint = Paint::default();
            paint.set_color(ruler_color());
            paint.anti_alias = true;
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }

        for label in &self.ruler.labels {
            let anchor = self.to_pixmap(label.anchor);
            let width = self.text.measure(&label.text, LABEL_SIZE);
            self.text.draw(
                pixmap,
                &label.text,
                anchor.x - width / 2.0,
                anchor.y + self.ruler.dot_radius + 2.0,
                LABEL_SIZE,
                label_color(),
            );
        }
    }

    fn render_polyline(&self, pixmap: &mut Pixmap, polyline: &Polyline) {
        let mut points = polyline.points.iter().map(|p| self.to_pixmap(*p));
        let Some(first) = points.next() else {
            return;
        };

        let mut builder = PathBuilder::new();
        builder.move_to(first.x, first.y);
        for point in points {
            builder.line_to(point.x, point.y);
        }
        if polyline.closed {
            builder.close();
        }

        // A lone move_to yields no path; single points are shown by their spot
        let Some(path) = builder.finish() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(polyline.color);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: polyline.width,
            ..Stroke::default()
        };

        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn render_marker(&self, pixmap: &mut Pixmap, marker: &Marker) {
        let center = self.to_pixmap(marker.center);
        let Some(path) = PathBuilder::from_circle(center.x, center.y, marker.radius) else {
            return;
        };

        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.set_color(marker.fill);
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);

        if let Some(stroke_color) = marker.stroke {
            paint.set_color(stroke_color);
            let stroke = Stroke {
                width: marker.stroke_width,
                ..Stroke::default()
            };
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }
}

/// Converts a tiny-skia pixmap to the BGRA byte order Win32 DIBs expect
pub fn pixmap_to_bgra(pixmap: &Pixmap) -> Vec<u8> {
    let mut data = pixmap.data().to_vec();
    for pixel in data.chunks_exact_mut(4) {
        pixel.swap(0, 2);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::path::Path;
    use crate::ui::scene::Canvas;

    fn small_config() -> DrawingConfig {
        let mut config = DrawingConfig {
            canvas_width: 200,
            canvas_height: 100,
            ..DrawingConfig::default()
        };
        config.ruler.enabled = false;
        config
    }

    fn no_extras() -> FrameOptions<'static> {
        FrameOptions {
            show_ruler: false,
            status: None,
        }
    }

    fn canvas_pixel(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let pixel = pixmap.pixel(x, y).unwrap();
        (pixel.red(), pixel.green(), pixel.blue(), pixel.alpha())
    }

    const CANVAS_RGBA: (u8, u8, u8, u8) = (28, 28, 30, 255);

    #[test]
    fn empty_scene_renders_canvas_color() {
        let renderer = SceneRenderer::new(&small_config()).unwrap();
        let pixmap = renderer.render(&Scene::new(), no_extras()).unwrap();

        assert_eq!(pixmap.width(), 200);
        assert_eq!(pixmap.height(), 100);
        assert_eq!(canvas_pixel(&pixmap, 10, 10), CANVAS_RGBA);
    }

    #[test]
    fn markers_are_drawn_with_flipped_y() {
        let renderer = SceneRenderer::new(&small_config()).unwrap();
        let mut scene = Scene::new();
        scene.add_shape(Shape::Marker(Marker::spot(Point::new(20.0, 80.0), 8.0)));

        let pixmap = renderer.render(&scene, no_extras()).unwrap();

        // Scene y = 80 is pixmap row 20
        assert_ne!(canvas_pixel(&pixmap, 20, 20), CANVAS_RGBA);
        assert_eq!(canvas_pixel(&pixmap, 20, 80), CANVAS_RGBA);
    }

    #[test]
    fn closed_polyline_draws_closing_segment() {
        let renderer = SceneRenderer::new(&small_config()).unwrap();
        let mut path = Path::new(Point::new(20.0, 50.0));
        path.add_line(Point::new(180.0, 50.0)).unwrap();
        path.close();

        let mut scene = Scene::new();
        scene.add_shape(Shape::Polyline(Polyline::from_path(&path)));
        let pixmap = renderer.render(&scene, no_extras()).unwrap();

        assert_ne!(canvas_pixel(&pixmap, 100, 50), CANVAS_RGBA);
        assert_eq!(canvas_pixel(&pixmap, 100, 20), CANVAS_RGBA);
    }

    #[test]
    fn single_point_polyline_draws_nothing() {
        let renderer = SceneRenderer::new(&small_config()).unwrap();
        let mut scene = Scene::new();
        scene.add_shape(Shape::Polyline(Polyline::from_path(&Path::new(Point::new(
            50.0, 50.0,
        )))));

        let pixmap = renderer.render(&scene, no_extras()).unwrap();
        assert_eq!(canvas_pixel(&pixmap, 50, 50), CANVAS_RGBA);
    }

    #[test]
    fn ruler_dots_only_when_requested() {
        let mut config = small_config();
        config.ruler.enabled = true;
        config.ruler.spacing = 50.0;
        config.ruler.dot_radius = 3.0;
        let renderer = SceneRenderer::new(&config).unwrap();
        assert_eq!(renderer.ruler().dots.len(), 3);

        let scene = Scene::new();
        let hidden = renderer.render(&scene, no_extras()).unwrap();
        assert_eq!(canvas_pixel(&hidden, 50, 50), CANVAS_RGBA);

        let shown = renderer
            .render(
                &scene,
                FrameOptions {
                    show_ruler: true,
                    status: Some("ignored without a font"),
                },
            )
            .unwrap();
        assert_ne!(canvas_pixel(&shown, 50, 50), CANVAS_RGBA);
    }

    #[test]
    fn status_line_is_drawn_with_a_font() {
        let mut config = small_config();
        config.font = Some(
            std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("tests/fixtures/DejaVuSansMono.ttf"),
        );
        let renderer = SceneRenderer::new(&config).unwrap();
        let status = FrameOptions {
            show_ruler: false,
            status: Some("Tap to start"),
        };

        let plain = renderer.render(&Scene::new(), no_extras()).unwrap();
        let with_status = renderer.render(&Scene::new(), status).unwrap();

        let changed = plain
            .pixels()
            .iter()
            .zip(with_status.pixels())
            .filter(|(a, b)| a != b)
            .count();
        assert!(changed > 10);
    }

    #[test]
    fn background_is_scaled_to_canvas() {
        let path = std::env::temp_dir().join(format!(
            "tactile-paths-background-{}.png",
            std::process::id()
        ));
        let mut image = Pixmap::new(4, 2).unwrap();
        image.fill(Color::from_rgba8(200, 0, 0, 255));
        image.save_png(&path).unwrap();

        let config = DrawingConfig {
            background: Some(path.clone()),
            ..small_config()
        };
        let renderer = SceneRenderer::new(&config);
        std::fs::remove_file(&path).ok();

        let pixmap = renderer.unwrap().render(&Scene::new(), no_extras()).unwrap();
        let (r, g, b, _) = canvas_pixel(&pixmap, 100, 50);
        assert!(r > 150 && g < 50 && b < 50);
    }

    #[test]
    fn missing_background_is_an_error() {
        let config = DrawingConfig {
            background: Some(PathBuf::from("/definitely/missing/background.png")),
            ..small_config()
        };
        let err = SceneRenderer::new(&config).unwrap_err();
        assert!(matches!(err, RendererError::BackgroundLoadFailed { .. }));
    }

    #[test]
    fn bgra_conversion_swaps_red_and_blue() {
        let mut pixmap = Pixmap::new(1, 1).unwrap();
        pixmap.fill(Color::from_rgba8(10, 20, 30, 255));

        assert_eq!(pixmap_to_bgra(&pixmap), vec![30, 20, 10, 255]);
    }
}
