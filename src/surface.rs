//! The rendering capability a drawing session paints through.
//!
//! Calls follow Canvas 2D path semantics: `stroke` paints every segment of
//! the current path with the current style, `begin_path` starts an empty
//! path, `close_path` joins the subpath back to its start without painting.

use crate::drawing::{Color, LineCap, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    pub cap: LineCap,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            cap: LineCap::Butt,
        }
    }
}

/// A painted line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
    pub style: StrokeStyle,
}

pub trait RenderSurface {
    /// Resizes the backing store, dropping anything painted so far and
    /// resetting the path.
    fn resize(&mut self, width: u32, height: u32);
    fn clear(&mut self);

    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    fn set_line_cap(&mut self, cap: LineCap);

    fn begin_path(&mut self);
    fn move_to(&mut self, point: Point);
    fn line_to(&mut self, point: Point);
    fn stroke(&mut self);
    fn close_path(&mut self);

    fn apply_style(&mut self, style: StrokeStyle) {
        self.set_stroke_color(style.color);
        self.set_line_width(style.width);
        self.set_line_cap(style.cap);
    }
}

/// Current path bookkeeping shared by the surface implementations.
#[derive(Debug, Clone, Default)]
pub struct Path {
    segments: Vec<(Point, Point)>,
    current: Option<Point>,
    subpath_start: Option<Point>,
    subpath_points: usize,
}

impl Path {
    pub fn reset(&mut self) {
        self.segments.clear();
        self.current = None;
        self.subpath_start = None;
        self.subpath_points = 0;
    }

    pub fn move_to(&mut self, point: Point) {
        self.current = Some(point);
        self.subpath_start = Some(point);
        self.subpath_points = 1;
    }

    pub fn line_to(&mut self, point: Point) {
        match self.current {
            Some(current) => {
                self.segments.push((current, point));
                self.subpath_points += 1;
            }
            // Without a current point line_to behaves like move_to.
            None => {
                self.subpath_start = Some(point);
                self.subpath_points = 1;
            }
        }
        self.current = Some(point);
    }

    pub fn close(&mut self) {
        if self.subpath_points > 1 {
            if let (Some(current), Some(start)) = (self.current, self.subpath_start) {
                if current != start {
                    self.segments.push((current, start));
                }
            }
        }
        self.current = self.subpath_start;
        self.subpath_points = self.subpath_points.min(1);
    }

    pub fn segments(&self) -> &[(Point, Point)] {
        &self.segments
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Resize(u32, u32),
    Clear,
    SetStrokeColor(Color),
    SetLineWidth(f32),
    SetLineCap(LineCap),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Stroke,
    ClosePath,
}

/// Keeps every call and the resulting painted segments. Used wherever a
/// session has to run without a real backend.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    size: (u32, u32),
    style: StrokeStyle,
    path: Path,
    ops: Vec<SurfaceOp>,
    segments: Vec<Segment>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            ..Default::default()
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Everything currently visible on the surface, oldest first.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_blank(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }
}

impl RenderSurface for RecordingSurface {
    fn resize(&mut self, width: u32, height: u32) {
        self.ops.push(SurfaceOp::Resize(width, height));
        self.size = (width, height);
        self.style = StrokeStyle::default();
        self.path.reset();
        self.segments.clear();
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
        self.segments.clear();
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.ops.push(SurfaceOp::SetStrokeColor(color));
        self.style.color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.ops.push(SurfaceOp::SetLineWidth(width));
        self.style.width = width;
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ops.push(SurfaceOp::SetLineCap(cap));
        self.style.cap = cap;
    }

    fn begin_path(&mut self) {
        self.ops.push(SurfaceOp::BeginPath);
        self.path.reset();
    }

    fn move_to(&mut self, point: Point) {
        self.ops.push(SurfaceOp::MoveTo(point));
        self.path.move_to(point);
    }

    fn line_to(&mut self, point: Point) {
        self.ops.push(SurfaceOp::LineTo(point));
        self.path.line_to(point);
    }

    fn stroke(&mut self) {
        self.ops.push(SurfaceOp::Stroke);
        let style = self.style;
        self.segments.extend(
            self.path
                .segments()
                .iter()
                .map(|&(from, to)| Segment { from, to, style }),
        );
    }

    fn close_path(&mut self) {
        self.ops.push(SurfaceOp::ClosePath);
        self.path.close();
    }
}
