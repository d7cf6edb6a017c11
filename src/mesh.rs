//! Triangle geometry for the GPU renderer.
//!
//! `StrokeMesh` is the render surface the on-screen session paints into.
//! Between clears it only ever appends, so the uploader can copy just the
//! new tail every frame.

use crate::drawing::{Color, LineCap, Point};
use crate::surface::{Path, RenderSurface, StrokeStyle};
use crate::vertex::Vertex;

const CAP_SEGMENTS: u32 = 12;

#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn push_quad(&mut self, corners: [Point; 4], color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        self.vertices
            .extend(corners.iter().map(|&position| Vertex { position, color }));
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn push_rect(&mut self, position: Point, size: [f32; 2], color: [f32; 4]) {
        let [x, y] = position;
        let [w, h] = size;
        self.push_quad([[x, y], [x + w, y], [x + w, y + h], [x, y + h]], color);
    }

    /// A butt-ended line of the given width.
    pub fn push_line(&mut self, from: Point, to: Point, width: f32, color: [f32; 4]) {
        let dx = to[0] - from[0];
        let dy = to[1] - from[1];
        let len = (dx * dx + dy * dy).sqrt();
        if len == 0.0 {
            return;
        }
        let nx = -dy / len * width * 0.5;
        let ny = dx / len * width * 0.5;
        self.push_quad(
            [
                [from[0] - nx, from[1] - ny],
                [from[0] + nx, from[1] + ny],
                [to[0] + nx, to[1] + ny],
                [to[0] - nx, to[1] - ny],
            ],
            color,
        );
    }

    pub fn push_disc(&mut self, center: Point, radius: f32, color: [f32; 4]) {
        let base = self.vertices.len() as u32;
        self.vertices.push(Vertex {
            position: center,
            color,
        });
        for i in 0..CAP_SEGMENTS {
            let angle = i as f32 * std::f32::consts::TAU / CAP_SEGMENTS as f32;
            self.vertices.push(Vertex {
                position: [
                    center[0] + angle.cos() * radius,
                    center[1] + angle.sin() * radius,
                ],
                color,
            });
        }
        for i in 0..CAP_SEGMENTS {
            let next = (i + 1) % CAP_SEGMENTS;
            self.indices
                .extend_from_slice(&[base, base + 1 + i, base + 1 + next]);
        }
    }

    /// One stroked segment with the style's line cap.
    pub fn push_segment(&mut self, from: Point, to: Point, style: StrokeStyle) {
        let color = style.color.to_rgba();
        let half = style.width * 0.5;
        let dx = to[0] - from[0];
        let dy = to[1] - from[1];
        let len = (dx * dx + dy * dy).sqrt();

        match style.cap {
            LineCap::Butt => self.push_line(from, to, style.width, color),
            LineCap::Round => {
                self.push_line(from, to, style.width, color);
                self.push_disc(from, half, color);
                if len > 0.0 {
                    self.push_disc(to, half, color);
                }
            }
            LineCap::Square if len == 0.0 => {
                self.push_rect([from[0] - half, from[1] - half], [style.width; 2], color);
            }
            LineCap::Square => {
                let ux = dx / len * half;
                let uy = dy / len * half;
                self.push_line(
                    [from[0] - ux, from[1] - uy],
                    [to[0] + ux, to[1] + uy],
                    style.width,
                    color,
                );
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StrokeMesh {
    geometry: Geometry,
    size: (u32, u32),
    style: StrokeStyle,
    path: Path,
    generation: u64,
}

impl StrokeMesh {
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Bumped whenever previously produced geometry is thrown away.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn discard(&mut self) {
        self.geometry.clear();
        self.generation += 1;
    }
}

impl RenderSurface for StrokeMesh {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.style = StrokeStyle::default();
        self.path.reset();
        self.discard();
    }

    fn clear(&mut self) {
        self.discard();
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
        let style = self.style;
        for &(from, to) in self.path.segments() {
            self.geometry.push_segment(from, to, style);
        }
    }

    fn close_path(&mut self) {
        self.path.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::session::DrawingSession;
    use approx::assert_relative_eq;

    fn style(cap: LineCap) -> StrokeStyle {
        StrokeStyle {
            color: Color::RED,
            width: 4.0,
            cap,
        }
    }

    #[test]
    fn butt_segment_is_one_quad() {
        let mut geometry = Geometry::default();
        geometry.push_segment([0.0, 0.0], [10.0, 0.0], style(LineCap::Butt));
        assert_eq!(geometry.vertices.len(), 4);
        assert_eq!(geometry.indices.len(), 6);
        let ys: Vec<f32> = geometry.vertices.iter().map(|v| v.position[1]).collect();
        for y in ys {
            assert_relative_eq!(y.abs(), 2.0);
        }
        assert!(geometry.vertices.iter().all(|v| v.color == [1.0, 0.0, 0.0, 1.0]));
    }

    #[test]
    fn round_segment_adds_caps() {
        let mut geometry = Geometry::default();
        geometry.push_segment([0.0, 0.0], [10.0, 0.0], style(LineCap::Round));
        let disc_vertices = 1 + CAP_SEGMENTS as usize;
        assert_eq!(geometry.vertices.len(), 4 + 2 * disc_vertices);
        assert_eq!(geometry.indices.len(), 6 + 2 * 3 * CAP_SEGMENTS as usize);
    }

    #[test]
    fn zero_length_segments() {
        let mut round = Geometry::default();
        round.push_segment([5.0, 5.0], [5.0, 5.0], style(LineCap::Round));
        assert_eq!(round.vertices.len(), 1 + CAP_SEGMENTS as usize);

        let mut butt = Geometry::default();
        butt.push_segment([5.0, 5.0], [5.0, 5.0], style(LineCap::Butt));
        assert!(butt.is_empty());

        let mut square = Geometry::default();
        square.push_segment([5.0, 5.0], [5.0, 5.0], style(LineCap::Square));
        assert_eq!(square.vertices[0].position, [3.0, 3.0]);
        assert_eq!(square.vertices[2].position, [7.0, 7.0]);
    }

    #[test]
    fn square_cap_extends_ends() {
        let mut geometry = Geometry::default();
        geometry.push_segment([0.0, 0.0], [10.0, 0.0], style(LineCap::Square));
        let xs: Vec<f32> = geometry.vertices.iter().map(|v| v.position[0]).collect();
        assert_relative_eq!(xs.iter().cloned().fold(f32::INFINITY, f32::min), -2.0);
        assert_relative_eq!(xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 12.0);
    }

    #[test]
    fn indices_stay_in_bounds() {
        let mut geometry = Geometry::default();
        geometry.push_segment([0.0, 0.0], [3.0, 4.0], style(LineCap::Round));
        geometry.push_rect([1.0, 1.0], [2.0, 2.0], [0.0; 4]);
        geometry.push_disc([0.0, 0.0], 1.0, [0.0; 4]);
        let count = geometry.vertices.len() as u32;
        assert!(geometry.indices.iter().all(|&i| i < count));
        assert_eq!(geometry.indices.len() % 3, 0);
    }

    #[test]
    fn session_drawing_only_appends() {
        let mut session = DrawingSession::new(StrokeMesh::default(), &BoardConfig::default());
        session.resize(100, 100);
        let generation = session.surface().generation();

        session.begin_stroke([0.0, 0.0]);
        let mut previous = session.surface().geometry().vertices.clone();
        for i in 1..10 {
            session.extend_stroke([i as f32 * 3.0, 0.0]);
            let now = &session.surface().geometry().vertices;
            assert!(now.len() > previous.len());
            assert_eq!(&now[..previous.len()], previous.as_slice());
            previous = now.clone();
        }
        session.end_stroke();
        assert_eq!(session.surface().generation(), generation);
    }

    #[test]
    fn clear_and_resize_bump_generation() {
        let mut mesh = StrokeMesh::default();
        mesh.begin_path();
        mesh.move_to([0.0, 0.0]);
        mesh.line_to([1.0, 0.0]);
        mesh.stroke();
        assert!(!mesh.geometry().is_empty());

        mesh.clear();
        assert!(mesh.geometry().is_empty());
        assert_eq!(mesh.generation(), 1);

        mesh.resize(10, 20);
        assert_eq!(mesh.generation(), 2);
        assert_eq!(mesh.size(), (10, 20));
    }

    #[test]
    fn undo_rebuilds_geometry() {
        let mut session = DrawingSession::new(StrokeMesh::default(), &BoardConfig::default());
        session.resize(100, 100);
        session.begin_stroke([0.0, 0.0]);
        session.extend_stroke([5.0, 0.0]);
        session.end_stroke();
        let one = session.surface().geometry().vertices.len();
        session.begin_stroke([0.0, 5.0]);
        session.extend_stroke([5.0, 5.0]);
        session.end_stroke();

        let generation = session.surface().generation();
        assert!(session.undo());
        assert_eq!(session.surface().generation(), generation + 1);
        assert_eq!(session.surface().geometry().vertices.len(), one);
    }
}
