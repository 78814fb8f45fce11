// params.rs - viewport and FOV parameters handed over by the viewport owner

use crate::error::ProjectorError;
use glam::{DVec2, IVec2, IVec4};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorParams {
    /// Lower left corner of the viewport in pixels.
    pub viewport_origin: IVec2,
    /// Width and height in pixels.
    pub viewport_size: IVec2,
    /// FOV diameter in degrees.
    pub fov: f64,
    pub z_near: f64,
    pub z_far: f64,
    /// Optical center in screen pixels.
    pub viewport_center: DVec2,
    /// Diameter of the FOV disk in pixels.
    pub viewport_fov_diameter: f64,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

impl Default for ProjectorParams {
    fn default() -> Self {
        Self {
            viewport_origin: IVec2::ZERO,
            viewport_size: IVec2::new(256, 256),
            fov: 60.0,
            z_near: 0.001,
            z_far: 500.0,
            viewport_center: DVec2::new(128.0, 128.0),
            viewport_fov_diameter: 256.0,
            flip_horizontal: false,
            flip_vertical: false,
        }
    }
}

impl ProjectorParams {
    /// Params for a viewport at the origin, centered, with the FOV disk
    /// spanning the smaller side.
    pub fn for_viewport(width: i32, height: i32, fov: f64) -> Self {
        Self {
            viewport_size: IVec2::new(width, height),
            fov,
            viewport_center: DVec2::new(width as f64 * 0.5, height as f64 * 0.5),
            viewport_fov_diameter: width.min(height) as f64,
            ..Default::default()
        }
    }

    /// x, y, width, height.
    pub fn viewport(&self) -> IVec4 {
        IVec4::new(
            self.viewport_origin.x,
            self.viewport_origin.y,
            self.viewport_size.x,
            self.viewport_size.y,
        )
    }

    pub fn validate(&self, max_fov: f64) -> Result<(), ProjectorError> {
        if !(self.fov > 0.0 && self.fov <= max_fov) {
            return Err(ProjectorError::FovOutOfRange {
                fov: self.fov,
                max: max_fov,
            });
        }
        if self.viewport_size.x <= 0 || self.viewport_size.y <= 0 {
            return Err(ProjectorError::InvalidViewport {
                width: self.viewport_size.x,
                height: self.viewport_size.y,
            });
        }
        if !(self.viewport_fov_diameter > 0.0 && self.viewport_fov_diameter.is_finite()) {
            return Err(ProjectorError::InvalidFovDiameter(self.viewport_fov_diameter));
        }
        if !(self.z_near < self.z_far) {
            return Err(ProjectorError::InvalidClipRange {
                near: self.z_near,
                far: self.z_far,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = ProjectorParams::default();
        assert!(p.validate(120.0).is_ok());
        assert_eq!(p.viewport(), IVec4::new(0, 0, 256, 256));
    }

    #[test]
    fn for_viewport_centers_the_disk() {
        let p = ProjectorParams::for_viewport(800, 600, 60.0);
        assert_eq!(p.viewport_center, DVec2::new(400.0, 300.0));
        assert_eq!(p.viewport_fov_diameter, 600.0);
    }

    #[test]
    fn rejects_bad_values() {
        let base = ProjectorParams::default();

        let p = ProjectorParams { fov: 150.0, ..base };
        assert_eq!(
            p.validate(120.0),
            Err(ProjectorError::FovOutOfRange { fov: 150.0, max: 120.0 })
        );
        let p = ProjectorParams { fov: 0.0, ..base };
        assert!(p.validate(120.0).is_err());
        let p = ProjectorParams { fov: f64::NAN, ..base };
        assert!(p.validate(120.0).is_err());

        let p = ProjectorParams {
            viewport_size: IVec2::new(0, 10),
            ..base
        };
        assert!(matches!(
            p.validate(120.0),
            Err(ProjectorError::InvalidViewport { width: 0, height: 10 })
        ));

        let p = ProjectorParams {
            viewport_fov_diameter: -1.0,
            ..base
        };
        assert!(matches!(p.validate(120.0), Err(ProjectorError::InvalidFovDiameter(_))));

        let p = ProjectorParams {
            z_near: 5.0,
            z_far: 5.0,
            ..base
        };
        assert!(matches!(p.validate(120.0), Err(ProjectorError::InvalidClipRange { .. })));
    }

    #[test]
    fn missing_json_fields_fall_back_to_defaults() {
        let p: ProjectorParams =
            serde_json::from_str(r#"{ "fov": 45.0, "flip_vertical": true }"#).unwrap();
        assert_eq!(p.fov, 45.0);
        assert!(p.flip_vertical);
        assert_eq!(p.viewport_size, IVec2::new(256, 256));
    }
}
