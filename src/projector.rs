// projector.rs - sky direction <-> viewport pixel mapping

use crate::error::ProjectorError;
use crate::params::ProjectorParams;
use crate::projection::ProjectionMode;
use crate::transform::ModelViewTransform;
use crate::uniform::ProjectorUniform;
use glam::{DMat4, DVec2, DVec3, DVec4, IVec4};
use std::sync::Arc;

/// Output of a projection call. `point` is always written, but only
/// meaningful when `valid` is set.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub point: DVec3,
    pub valid: bool,
}

impl Projected {
    fn invalid() -> Self {
        Self {
            point: DVec3::ZERO,
            valid: false,
        }
    }

    pub fn ok(self) -> Option<DVec3> {
        self.valid.then_some(self.point)
    }
}

/// Maps directions in the current frame to viewport pixels and back.
///
/// A projector starts uninitialized; every projection call fails until
/// [`Projector::init`] accepts a set of params. The model-view transform may be
/// shared with other projectors; [`Projector::combine_model_view`] clones it
/// before mutating if so.
#[derive(Debug, Clone)]
pub struct Projector {
    mode: ProjectionMode,
    model_view: Arc<dyn ModelViewTransform>,
    params: ProjectorParams,
    ready: bool,
    // pixel per rad at the center of the viewport disk
    pixel_per_rad: f64,
    one_over_z_near_minus_far: f64,
}

impl Projector {
    pub fn new(mode: ProjectionMode, model_view: Arc<dyn ModelViewTransform>) -> Self {
        Self {
            mode,
            model_view,
            params: ProjectorParams::default(),
            ready: false,
            pixel_per_rad: 0.0,
            one_over_z_near_minus_far: 0.0,
        }
    }

    pub fn perspective(model_view: Arc<dyn ModelViewTransform>) -> Self {
        Self::new(ProjectionMode::Perspective, model_view)
    }

    /// Accept new viewport/FOV params and recompute the derived constants.
    /// Invalid params are rejected and the current state is kept.
    pub fn init(&mut self, params: ProjectorParams) -> Result<(), ProjectorError> {
        params.validate(self.mode.max_fov())?;

        let vsf = self.mode.fov_to_view_scaling_factor(params.fov);
        self.pixel_per_rad = 0.5 * params.viewport_fov_diameter / vsf;
        self.one_over_z_near_minus_far = 1.0 / (params.z_near - params.z_far);
        self.params = params;
        self.ready = true;

        log::debug!(
            "{:?} projector ready: viewport {:?}, fov {:.3}°, {:.3} px/rad",
            self.mode,
            params.viewport(),
            params.fov,
            self.pixel_per_rad
        );
        Ok(())
    }

    /// Re-run [`Projector::init`] with only the FOV changed.
    pub fn set_fov(&mut self, fov: f64) -> Result<(), ProjectorError> {
        self.init(ProjectorParams { fov, ..self.params })
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    pub fn params(&self) -> &ProjectorParams {
        &self.params
    }

    pub fn max_fov(&self) -> f64 {
        self.mode.max_fov()
    }

    /// Forward projection in place. Afterwards `v.z` holds the original length
    /// of `v`, whatever the projection family.
    pub fn forward(&self, v: &mut DVec3) -> bool {
        self.mode.forward(v)
    }

    pub fn backward(&self, v: &mut DVec3) -> bool {
        self.mode.backward(v)
    }

    pub fn delta_zoom(&self, fov: f64) -> f64 {
        self.mode.delta_zoom(fov)
    }

    pub fn fov_to_view_scaling_factor(&self, fov: f64) -> f64 {
        self.mode.fov_to_view_scaling_factor(fov)
    }

    pub fn view_scaling_factor_to_fov(&self, vsf: f64) -> f64 {
        self.mode.view_scaling_factor_to_fov(vsf)
    }

    pub fn viewport(&self) -> IVec4 {
        self.params.viewport()
    }

    pub fn viewport_pos_x(&self) -> i32 {
        self.params.viewport_origin.x
    }

    pub fn viewport_pos_y(&self) -> i32 {
        self.params.viewport_origin.y
    }

    pub fn viewport_width(&self) -> i32 {
        self.params.viewport_size.x
    }

    pub fn viewport_height(&self) -> i32 {
        self.params.viewport_size.y
    }

    pub fn viewport_center(&self) -> DVec2 {
        self.params.viewport_center
    }

    /// FOV diameter in degrees.
    pub fn fov(&self) -> f64 {
        self.params.fov
    }

    pub fn pixel_per_radian(&self) -> f64 {
        self.pixel_per_rad
    }

    pub fn model_view(&self) -> &Arc<dyn ModelViewTransform> {
        &self.model_view
    }

    pub fn set_model_view(&mut self, model_view: Arc<dyn ModelViewTransform>) {
        self.model_view = model_view;
    }

    /// Compose `m` into the model-view transform (`current * m`). A transform
    /// shared with other owners is cloned first.
    pub fn combine_model_view(&mut self, m: &DMat4) {
        if let Some(transform) = Arc::get_mut(&mut self.model_view) {
            transform.combine(m);
            return;
        }
        let mut own = self.model_view.clone_box();
        own.combine(m);
        self.model_view = Arc::from(own);
    }

    fn flip(&self) -> DVec2 {
        DVec2::new(
            if self.params.flip_horizontal { -1.0 } else { 1.0 },
            if self.params.flip_vertical { -1.0 } else { 1.0 },
        )
    }

    /// Project `v` from the current frame into the viewport. x, y are screen
    /// pixels and z is the length of the transformed vector.
    pub fn project(&self, v: DVec3) -> Projected {
        let mut win = v;
        let valid = self.project_in_place(&mut win);
        Projected { point: win, valid }
    }

    pub fn project_in_place(&self, v: &mut DVec3) -> bool {
        if !self.ready {
            *v = DVec3::ZERO;
            return false;
        }
        self.model_view.forward(v);
        let mut valid = self.mode.forward(v);
        valid &= self.mode.within_fov(*v, self.params.fov);

        let flip = self.flip();
        let center = self.params.viewport_center;
        v.x = center.x + flip.x * self.pixel_per_rad * v.x;
        v.y = center.y + flip.y * self.pixel_per_rad * v.y;
        valid
    }

    /// Unproject a screen point. `win.z` is ignored.
    pub fn unproject(&self, win: DVec3) -> Projected {
        self.unproject_xy(win.x, win.y)
    }

    pub fn unproject_xy(&self, x: f64, y: f64) -> Projected {
        if !self.ready {
            return Projected::invalid();
        }
        let flip = self.flip();
        let center = self.params.viewport_center;
        let mut v = DVec3::new(
            flip.x * (x - center.x) / self.pixel_per_rad,
            flip.y * (y - center.y) / self.pixel_per_rad,
            0.0,
        );
        let valid = self.mode.backward(&mut v);
        self.model_view.backward(&mut v);
        Projected { point: v, valid }
    }

    /// Linear depth of a projected length: 0 at `z_near`, 1 at `z_far`.
    pub fn depth(&self, length: f64) -> f64 {
        (self.params.z_near - length) * self.one_over_z_near_minus_far
    }

    /// Orthographic matrix taking viewport pixels to normalized device
    /// coordinates.
    pub fn window_matrix(&self) -> DMat4 {
        let [x, y, w, h] = self.params.viewport().as_dvec4().to_array();
        DMat4::orthographic_rh(x, x + w, y, y + h, -1.0, 1.0)
    }

    /// Classical projection matrix for rendering backends.
    ///
    /// For [`ProjectionMode::Perspective`] this is an off-center frustum: a
    /// camera-frame point sent through it and mapped from NDC to the viewport
    /// lands on the same pixel as [`Projector::project`], depth 0 at `z_near`
    /// and 1 at `z_far`. The other families are not linear, they are projected
    /// on the CPU and drawn in pixel space, so they get [`Projector::window_matrix`].
    pub fn projection_matrix(&self) -> DMat4 {
        if self.mode != ProjectionMode::Perspective {
            return self.window_matrix();
        }
        let p = &self.params;
        let flip = self.flip();
        let size = p.viewport_size.as_dvec2();
        let origin = p.viewport_origin.as_dvec2();

        let scale = 2.0 * self.pixel_per_rad * flip / size;
        let offset = DVec2::ONE - 2.0 * (p.viewport_center - origin) / size;
        let (near, far) = (p.z_near, p.z_far);
        let a = far / (near - far);
        let b = near * far / (near - far);

        DMat4::from_cols(
            DVec4::new(scale.x, 0.0, 0.0, 0.0),
            DVec4::new(0.0, scale.y, 0.0, 0.0),
            DVec4::new(offset.x, offset.y, a, -1.0),
            DVec4::new(0.0, 0.0, b, 0.0),
        )
    }

    /// Packed f32 snapshot for upload into a uniform buffer.
    pub fn uniform(&self) -> ProjectorUniform {
        ProjectorUniform::new(self)
    }
}
