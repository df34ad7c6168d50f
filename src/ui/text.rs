//! Text rasterization for ruler labels and the status line
//!
//! Glyph outlines come from ab_glyph and are composited into the tiny-skia
//! pixmap one covered pixel at a time. Without a font every draw call is a
//! no-op, so labels are simply not shown.

use std::path::Path;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use tiny_skia::{Color, Paint, Pixmap, Rect as SkiaRect, Transform};

use crate::ui::renderer::RendererError;

/// Optional font used for all text in the drawing window
#[derive(Debug, Default)]
pub struct TextRasterizer {
    font: Option<FontVec>,
}

impl TextRasterizer {
    /// Creates a rasterizer that draws nothing
    pub fn without_font() -> Self {
        Self { font: None }
    }

    /// Loads a TrueType/OpenType font file
    pub fn from_path(path: &Path) -> Result<Self, RendererError> {
        let bytes = std::fs::read(path).map_err(|err| RendererError::FontLoadFailed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let font = FontVec::try_from_vec(bytes).map_err(|err| RendererError::FontLoadFailed {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        Ok(Self { font: Some(font) })
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Width of `text` in pixels at `size`, or 0 without a font
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        let Some(font) = &self.font else {
            return 0.0;
        };

        let scaled = font.as_scaled(PxScale::from(size));
        let mut width = 0.0;
        let mut previous = None;
        for ch in text.chars() {
            let glyph_id = font.glyph_id(ch);
            if let Some(prev) = previous {
                width += scaled.kern(prev, glyph_id);
            }
            width += scaled.h_advance(glyph_id);
            previous = Some(glyph_id);
        }
        width
    }

    /// Draws `text` with its top-left corner at `(x, y)` in pixmap space
    ///
    /// # Returns
    /// false if no font is loaded and nothing was drawn
    pub fn draw(
        &self,
        pixmap: &mut Pixmap,
        text: &str,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    ) -> bool {
        let Some(font) = &self.font else {
            return false;
        };

        let scale = PxScale::from(size);
        let scaled = font.as_scaled(scale);
        let baseline = y + scaled.ascent();
        let mut caret = x;
        let mut previous = None;

        for ch in text.chars() {
            let glyph_id = font.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, glyph_id);
            }
            let glyph = glyph_id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(glyph_id);
            previous = Some(glyph_id);

            let Some(outlined) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x + gx as f32;
                let py = bounds.min.y + gy as f32;
                blend_pixel(pixmap, px, py, color, coverage);
            });
        }

        true
    }
}

fn blend_pixel(pixmap: &mut Pixmap, x: f32, y: f32, color: Color, coverage: f32) {
    if coverage <= 0.0 {
        return;
    }
    let Some(rect) = SkiaRect::from_xywh(x, y, 1.0, 1.0) else {
        return;
    };

    let mut shaded = color;
    shaded.apply_opacity(coverage.min(1.0));

    let mut paint = Paint::default();
    paint.set_color(shaded);
    paint.anti_alias = false;
    pixmap.fill_rect(rect, &paint, Transform::identity(), None);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_font() -> TextRasterizer {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSansMono.ttf");
        TextRasterizer::from_path(&path).unwrap()
    }

    fn covered_pixels(pixmap: &Pixmap) -> usize {
        pixmap.pixels().iter().filter(|p| p.alpha() > 0).count()
    }

    #[test]
    fn font_text_has_width_and_coverage() {
        let text = fixture_font();
        assert!(text.has_font());

        let width = text.measure("250", 16.0);
        assert!(width > 0.0);
        // Monospaced: twice the characters, twice the advance
        assert!((text.measure("250250", 16.0) - 2.0 * width).abs() < 0.01);

        let mut pixmap = Pixmap::new(64, 32).unwrap();
        assert!(text.draw(&mut pixmap, "250", 2.0, 2.0, 16.0, Color::WHITE));
        assert!(covered_pixels(&pixmap) > 10);

        // Glyphs stay within the measured advance
        let beyond = (2.0 + width).ceil() as u32 + 2;
        for y in 0..32 {
            for x in beyond..64 {
                assert_eq!(pixmap.pixel(x, y).unwrap().alpha(), 0);
            }
        }
    }

    #[test]
    fn whitespace_draws_no_pixels() {
        let text = fixture_font();
        let mut pixmap = Pixmap::new(32, 32).unwrap();

        assert!(text.draw(&mut pixmap, "   ", 0.0, 0.0, 16.0, Color::WHITE));
        assert_eq!(covered_pixels(&pixmap), 0);
        assert!(text.measure("   ", 16.0) > 0.0);
    }

    #[test]
    fn text_clipped_by_pixmap_edges_is_skipped() {
        let text = fixture_font();
        let mut pixmap = Pixmap::new(8, 8).unwrap();

        assert!(text.draw(&mut pixmap, "8", 100.0, 100.0, 16.0, Color::WHITE));
        assert_eq!(covered_pixels(&pixmap), 0);
    }

    #[test]
    fn without_font_draws_nothing() {
        let text = TextRasterizer::without_font();
        let mut pixmap = Pixmap::new(20, 20).unwrap();

        assert!(!text.has_font());
        assert!(!text.draw(&mut pixmap, "42", 0.0, 0.0, 12.0, Color::WHITE));
        assert_eq!(text.measure("42", 12.0), 0.0);
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }

    #[test]
    fn missing_font_file_is_an_error() {
        let path = std::env::temp_dir().join("tactile-paths-no-such-font.ttf");
        let err = TextRasterizer::from_path(&path).unwrap_err();
        assert!(matches!(err, RendererError::FontLoadFailed { .. }));
    }

    #[test]
    fn invalid_font_data_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "tactile-paths-bad-font-{}.ttf",
            std::process::id()
        ));
        std::fs::write(&path, b"definitely not a font").unwrap();

        let result = TextRasterizer::from_path(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(RendererError::FontLoadFailed { .. })));
    }
}
