/// Maps surface-local pixels (origin top-left, y down) to clip space.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    transform: [[f32; 4]; 4],
}

impl Uniforms {
    pub fn for_surface(width: u32, height: u32) -> Self {
        let mut uniforms = Self {
            transform: [[0.0; 4]; 4],
        };
        uniforms.update_size(width, height);
        uniforms
    }

    pub fn update_size(&mut self, width: u32, height: u32) {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;

        // Column-major, as WGSL expects.
        self.transform = [
            [2.0 / w, 0.0, 0.0, 0.0],
            [0.0, -2.0 / h, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [-1.0, 1.0, 0.0, 1.0],
        ];
    }

    pub fn project(&self, point: [f32; 2]) -> [f32; 2] {
        let m = &self.transform;
        [
            m[0][0] * point[0] + m[1][0] * point[1] + m[3][0],
            m[0][1] * point[0] + m[1][1] * point[1] + m[3][1],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn corners_map_to_clip_space() {
        let uniforms = Uniforms::for_surface(800, 600);
        assert_eq!(uniforms.project([0.0, 0.0]), [-1.0, 1.0]);
        let bottom_right = uniforms.project([800.0, 600.0]);
        assert_relative_eq!(bottom_right[0], 1.0);
        assert_relative_eq!(bottom_right[1], -1.0);
        let center = uniforms.project([400.0, 300.0]);
        assert_relative_eq!(center[0], 0.0);
        assert_relative_eq!(center[1], 0.0);
    }

    #[test]
    fn follows_resize() {
        let mut uniforms = Uniforms::for_surface(100, 100);
        uniforms.update_size(200, 50);
        let p = uniforms.project([200.0, 50.0]);
        assert_relative_eq!(p[0], 1.0);
        assert_relative_eq!(p[1], -1.0);
    }

    #[test]
    fn zero_size_is_finite() {
        let uniforms = Uniforms::for_surface(0, 0);
        let p = uniforms.project([1.0, 1.0]);
        assert!(p[0].is_finite() && p[1].is_finite());
    }
}
