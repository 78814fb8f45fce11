// uniform.rs - GPU-side snapshot of a projector

use crate::projector::Projector;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ProjectorUniform {
    pub projection: [[f32; 4]; 4],
    pub model_view: [[f32; 4]; 4],
    pub viewport: [f32; 4], // x, y, width, height
    pub center: [f32; 2],
    pub pixel_per_rad: f32,
    pub fov_rad: f32,
    pub mode: u32, // 0=Perspective, 1=Stereographic, 2=Equidistant
    pub pad1: f32,
    pub pad2: f32,
    pub pad3: f32,
}

impl ProjectorUniform {
    pub fn new(projector: &Projector) -> Self {
        use crate::projection::ProjectionMode;

        Self {
            projection: projector.projection_matrix().as_mat4().to_cols_array_2d(),
            model_view: projector
                .model_view()
                .transform_matrix()
                .as_mat4()
                .to_cols_array_2d(),
            viewport: projector.viewport().as_vec4().to_array(),
            center: projector.viewport_center().as_vec2().to_array(),
            pixel_per_rad: projector.pixel_per_radian() as f32,
            fov_rad: projector.fov().to_radians() as f32,
            mode: match projector.mode() {
                ProjectionMode::Perspective => 0,
                ProjectionMode::Stereographic => 1,
                ProjectionMode::Equidistant => 2,
            },
            pad1: 0.0,
            pad2: 0.0,
            pad3: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ProjectorParams;
    use crate::projection::ProjectionMode;
    use crate::transform::Mat4Transform;
    use std::sync::Arc;

    #[test]
    fn packs_projector_state() {
        let mut p = Projector::new(
            ProjectionMode::Stereographic,
            Arc::new(Mat4Transform::identity()),
        );
        p.init(ProjectorParams::for_viewport(640, 480, 90.0)).unwrap();
        let u = p.uniform();

        assert_eq!(u.viewport, [0.0, 0.0, 640.0, 480.0]);
        assert_eq!(u.center, [320.0, 240.0]);
        assert_eq!(u.mode, 1);
        assert_eq!(u.model_view, glam::Mat4::IDENTITY.to_cols_array_2d());
        assert!((u.fov_rad - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        let bytes: &[u8] = bytemuck::bytes_of(&u);
        assert_eq!(bytes.len(), std::mem::size_of::<ProjectorUniform>());
        assert_eq!(bytes.len() % 16, 0);
    }
}
