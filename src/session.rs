//! Pointer-driven drawing state for one whiteboard surface.
//!
//! Rendering is immediate: each `extend_stroke` paints only the newest
//! segment. Finished strokes are kept so the board can be replayed after a
//! resize or an undo, and exported.

use crate::config::BoardConfig;
use crate::drawing::{Color, LineCap, Point, Stroke, Tool};
use crate::surface::{RenderSurface, StrokeStyle};

pub struct DrawingSession<S: RenderSurface> {
    surface: S,
    size: (u32, u32),

    tool: Tool,
    color: Color,
    stroke_width: f32,
    line_cap: LineCap,
    preserve_on_resize: bool,

    active: Option<Stroke>,
    strokes: Vec<Stroke>,
    redo_stack: Vec<Stroke>,
}

impl<S: RenderSurface> DrawingSession<S> {
    pub fn new(surface: S, config: &BoardConfig) -> Self {
        Self {
            surface,
            size: (0, 0),
            tool: config.initial_tool,
            color: config.initial_color,
            stroke_width: config.stroke_width,
            line_cap: config.line_cap,
            preserve_on_resize: config.preserve_on_resize,
            active: None,
            strokes: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Resizing drawing surface to {}x{}", width, height);
        self.size = (width, height);
        self.surface.resize(width, height);
        self.surface.apply_style(self.selected_style());

        if self.preserve_on_resize {
            for stroke in &self.strokes {
                paint_stroke(&mut self.surface, stroke);
            }
        } else if !self.strokes.is_empty() {
            log::debug!("Discarding {} strokes on resize", self.strokes.len());
            self.strokes.clear();
            self.redo_stack.clear();
        }

        if let Some(active) = self.active.as_mut() {
            if self.preserve_on_resize {
                paint_stroke(&mut self.surface, active);
            } else {
                // Only the last point survives, so the committed stroke
                // matches what stays on screen.
                let keep_from = active.points.len().saturating_sub(1);
                active.points.drain(..keep_from);
            }
            self.surface.apply_style(style_of(active));
            self.surface.begin_path();
            if let Some(last) = active.last_point() {
                self.surface.move_to(last);
            }
        } else if self.preserve_on_resize && !self.strokes.is_empty() {
            self.surface.apply_style(self.selected_style());
        }
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn select_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn begin_stroke(&mut self, point: Point) {
        if self.active.is_some() {
            log::debug!("Stroke started while another was active; ending it first");
            self.end_stroke();
        }

        let stroke = Stroke::new(point, self.color, self.stroke_width, self.line_cap);
        self.surface.apply_style(style_of(&stroke));
        self.surface.begin_path();
        self.surface.move_to(point);
        self.active = Some(stroke);
    }

    pub fn extend_stroke(&mut self, point: Point) {
        let Some(stroke) = self.active.as_mut() else {
            return;
        };
        let Some(previous) = stroke.last_point() else {
            return;
        };
        stroke.points.push(point);

        self.surface.begin_path();
        self.surface.move_to(previous);
        self.surface.line_to(point);
        self.surface.stroke();
    }

    pub fn end_stroke(&mut self) {
        let Some(stroke) = self.active.take() else {
            return;
        };
        self.surface.close_path();

        // A lone point never painted anything.
        if stroke.segment_count() > 0 {
            log::trace!("Committed stroke with {} points", stroke.points.len());
            self.strokes.push(stroke);
            self.redo_stack.clear();
        }
    }

    pub fn undo(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(stroke) = self.strokes.pop() else {
            return false;
        };
        self.redo_stack.push(stroke);

        self.surface.clear();
        for stroke in &self.strokes {
            paint_stroke(&mut self.surface, stroke);
        }
        self.surface.apply_style(self.selected_style());
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.active.is_some() {
            return false;
        }
        let Some(stroke) = self.redo_stack.pop() else {
            return false;
        };
        paint_stroke(&mut self.surface, &stroke);
        self.surface.apply_style(self.selected_style());
        self.strokes.push(stroke);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.active.is_none() && !self.strokes.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.active.is_none() && !self.redo_stack.is_empty()
    }

    /// Paints the committed strokes onto another surface.
    pub fn replay_onto<T: RenderSurface>(&self, target: &mut T) {
        for stroke in &self.strokes {
            paint_stroke(target, stroke);
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn is_drawing(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn selected_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.color,
            width: self.stroke_width,
            cap: self.line_cap,
        }
    }
}

fn style_of(stroke: &Stroke) -> StrokeStyle {
    StrokeStyle {
        color: stroke.color,
        width: stroke.width,
        cap: stroke.cap,
    }
}

/// Paints a stroke one segment per path, the same calls live drawing makes.
pub fn paint_stroke<S: RenderSurface>(surface: &mut S, stroke: &Stroke) {
    surface.apply_style(style_of(stroke));
    for pair in stroke.points.windows(2) {
        surface.begin_path();
        surface.move_to(pair[0]);
        surface.line_to(pair[1]);
        surface.stroke();
    }
    surface.close_path();
}
