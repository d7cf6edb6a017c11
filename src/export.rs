//! CPU rasterization of strokes, used to save the board as a PNG.

use crate::drawing::{Color, LineCap, Point, Stroke};
use crate::session::paint_stroke;
use crate::surface::{Path, RenderSurface, StrokeStyle};
use anyhow::Context;
use image::{Rgba, RgbaImage};
use tiny_skia::{Paint, PathBuilder, Pixmap, Transform};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Paints onto a `tiny_skia` pixmap over a white background. A zero-sized
/// surface has no pixmap and ignores drawing.
pub struct RasterSurface {
    pixmap: Option<Pixmap>,
    size: (u32, u32),
    style: StrokeStyle,
    path: Path,
}

fn blank_pixmap(width: u32, height: u32) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width, height)?;
    pixmap.fill(tiny_skia::Color::WHITE);
    Some(pixmap)
}

fn skia_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

impl RasterSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixmap: blank_pixmap(width, height),
            size: (width, height),
            style: StrokeStyle::default(),
            path: Path::default(),
        }
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// The pixels as straight (non-premultiplied) RGBA.
    pub fn to_image(&self) -> RgbaImage {
        let (width, height) = self.size;
        let Some(pixmap) = &self.pixmap else {
            return RgbaImage::new(width, height);
        };
        let data = pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        RgbaImage::from_raw(width, height, data)
            .unwrap_or_else(|| RgbaImage::from_pixel(width, height, BACKGROUND))
    }

    fn stroke_segments(&mut self, segments: &[(Point, Point)]) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        if segments.is_empty() || self.style.width <= 0.0 {
            return;
        }

        let mut builder = PathBuilder::new();
        for (from, to) in segments {
            builder.move_to(from[0], from[1]);
            builder.line_to(to[0], to[1]);
        }
        let Some(path) = builder.finish() else {
            return;
        };

        let Color { r, g, b } = self.style.color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, 255);
        let stroke = tiny_skia::Stroke {
            width: self.style.width,
            line_cap: skia_cap(self.style.cap),
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

impl RenderSurface for RasterSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.pixmap = blank_pixmap(width, height);
        self.size = (width, height);
        self.style = StrokeStyle::default();
        self.path.reset();
    }

    fn clear(&mut self) {
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill(tiny_skia::Color::WHITE);
        }
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.style.color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.style.width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.style.cap = cap;
    }

    fn begin_path(&mut self) {
        self.path.reset();
    }

    fn move_to(&mut self, point: Point) {
        self.path.move_to(point);
    }

    fn line_to(&mut self, point: Point) {
        self.path.line_to(point);
    }

    fn stroke(&mut self) {
        let segments = self.path.segments().to_vec();
        self.stroke_segments(&segments);
    }

    fn close_path(&mut self) {
        self.path.close();
    }
}

pub fn rasterize(strokes: &[Stroke], size: (u32, u32)) -> RgbaImage {
    let mut surface = RasterSurface::new(size.0, size.1);
    for stroke in strokes {
        paint_stroke(&mut surface, stroke);
    }
    surface.to_image()
}

pub fn export_png(strokes: &[Stroke], size: (u32, u32), path: &std::path::Path) -> anyhow::Result<()> {
    if size.0 == 0 || size.1 == 0 {
        anyhow::bail!("cannot export an empty {}x{} board", size.0, size.1);
    }
    rasterize(strokes, size)
        .save(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("Exported {} strokes to {}", strokes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(points: &[Point], color: Color, width: f32, cap: LineCap) -> Stroke {
        Stroke {
            points: points.to_vec(),
            color,
            width,
            cap,
        }
    }

    #[test]
    fn paints_along_the_segment() {
        let image = rasterize(
            &[stroke(&[[10.0, 10.0], [10.0, 20.0], [20.0, 20.0]], Color::RED, 2.0, LineCap::Round)],
            (32, 32),
        );
        assert_eq!(*image.get_pixel(10, 15), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(15, 20), Rgba([255, 0, 0, 255]));
        assert_eq!(*image.get_pixel(25, 5), BACKGROUND);
        assert_eq!(*image.get_pixel(15, 14), BACKGROUND);
    }

    #[test]
    fn later_strokes_paint_over_earlier_ones() {
        let image = rasterize(
            &[
                stroke(&[[0.0, 5.0], [10.0, 5.0]], Color::BLUE, 4.0, LineCap::Butt),
                stroke(&[[5.0, 0.0], [5.0, 10.0]], Color::GREEN, 4.0, LineCap::Butt),
            ],
            (10, 10),
        );
        assert_eq!(*image.get_pixel(5, 5), Rgba([0, 255, 0, 255]));
        assert_eq!(*image.get_pixel(1, 5), Rgba([0, 0, 255, 255]));
    }

    #[test]
    fn caps_differ_past_the_endpoint() {
        let line = [[4.0, 8.0], [12.0, 8.0]];
        let butt = rasterize(&[stroke(&line, Color::BLACK, 4.0, LineCap::Butt)], (16, 16));
        let square = rasterize(&[stroke(&line, Color::BLACK, 4.0, LineCap::Square)], (16, 16));
        // Pixel center (13.5, 8.5) is 1.5px past the end.
        assert_eq!(*butt.get_pixel(13, 8), BACKGROUND);
        assert_eq!(*square.get_pixel(13, 8), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn off_surface_strokes_are_clipped() {
        let image = rasterize(
            &[stroke(&[[-50.0, -50.0], [-40.0, -40.0]], Color::BLACK, 2.0, LineCap::Round)],
            (8, 8),
        );
        assert!(image.pixels().all(|p| *p == BACKGROUND));

        let crossing = rasterize(
            &[stroke(&[[-10.0, 4.0], [100.0, 4.0]], Color::BLACK, 2.0, LineCap::Round)],
            (8, 8),
        );
        assert_eq!(*crossing.get_pixel(0, 4), Rgba([0, 0, 0, 255]));
        assert_eq!(*crossing.get_pixel(7, 4), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn clear_restores_background() {
        let mut surface = RasterSurface::new(4, 4);
        surface.set_line_width(4.0);
        surface.begin_path();
        surface.move_to([0.0, 2.0]);
        surface.line_to([4.0, 2.0]);
        surface.stroke();
        assert!(surface.to_image().pixels().any(|p| *p != BACKGROUND));
        surface.clear();
        assert!(surface.to_image().pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn zero_sized_surface_ignores_drawing() {
        let mut surface = RasterSurface::new(0, 0);
        assert!(surface.pixmap().is_none());
        surface.begin_path();
        surface.move_to([0.0, 0.0]);
        surface.line_to([5.0, 5.0]);
        surface.stroke();
        assert_eq!(surface.to_image().dimensions(), (0, 0));

        surface.resize(6, 6);
        assert!(surface.pixmap().is_some());
        assert!(surface.to_image().pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn export_writes_a_png() {
        let path = std::env::temp_dir().join(format!("crewboard-{}.png", uuid::Uuid::new_v4()));
        export_png(
            &[stroke(&[[1.0, 1.0], [6.0, 6.0]], Color::BLACK, 2.0, LineCap::Round)],
            (8, 8),
            &path,
        )
        .unwrap();
        let bytes = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn export_rejects_empty_board() {
        let path = std::env::temp_dir().join("crewboard-empty.png");
        assert!(export_png(&[], (0, 10), &path).is_err());
    }
}
