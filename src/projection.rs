// projection.rs - projection families (camera looks down -z)
//
// Every forward projection leaves the original vector length in z so that
// depth testing does not depend on the projection family.

use glam::DVec3;

/// Zoom increment scale, in degrees of FOV.
pub const DELTA_ZOOM_SCALE: f64 = 10.0;

// Relative slack when testing a point against the FOV disk edge.
const FOV_EDGE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProjectionMode {
    /// Gnomonic: straight lines stay straight, limited to 120°.
    #[default]
    Perspective,
    /// Conformal, angles preserved locally.
    Stereographic,
    /// Fisheye, radius proportional to the angle from the axis.
    Equidistant,
}

impl ProjectionMode {
    /// Largest FOV diameter in degrees this family can display.
    pub fn max_fov(self) -> f64 {
        match self {
            ProjectionMode::Perspective => 120.0,
            ProjectionMode::Stereographic => 235.0,
            ProjectionMode::Equidistant => 360.0,
        }
    }

    /// Project `v` in place onto the normalized plane. Returns false when the
    /// direction has no image; `v` then holds deterministic placeholder values.
    pub fn forward(self, v: &mut DVec3) -> bool {
        let r = v.length();
        match self {
            ProjectionMode::Perspective => {
                if v.z < 0.0 {
                    v.x /= -v.z;
                    v.y /= -v.z;
                    v.z = r;
                    true
                } else if v.z > 0.0 {
                    v.x /= v.z;
                    v.y /= v.z;
                    v.z = -f64::MAX;
                    false
                } else {
                    *v = DVec3::new(f64::MAX, f64::MAX, -f64::MAX);
                    false
                }
            }
            ProjectionMode::Stereographic => {
                let h = 0.5 * (r - v.z);
                if h > 0.0 && h.is_finite() {
                    v.x /= h;
                    v.y /= h;
                    v.z = r;
                    true
                } else {
                    *v = DVec3::new(f64::MAX, f64::MAX, -f64::MAX);
                    false
                }
            }
            ProjectionMode::Equidistant => {
                if r <= 0.0 || !r.is_finite() {
                    *v = DVec3::new(f64::MAX, f64::MAX, -f64::MAX);
                    return false;
                }
                let h = v.x.hypot(v.y);
                if h > 0.0 {
                    let a = h.atan2(-v.z);
                    let f = a / h;
                    v.x *= f;
                    v.y *= f;
                } else if v.z > 0.0 {
                    // directly behind: the whole outer circle, pick its +x point
                    v.x = std::f64::consts::PI;
                    v.y = 0.0;
                }
                v.z = r;
                true
            }
        }
    }

    /// Inverse of `forward`: turns a normalized plane point into a unit
    /// direction. z on input is ignored.
    pub fn backward(self, v: &mut DVec3) -> bool {
        if !v.x.is_finite() || !v.y.is_finite() {
            return false;
        }
        match self {
            ProjectionMode::Perspective => {
                let z = (1.0 / (1.0 + v.x * v.x + v.y * v.y)).sqrt();
                v.x *= z;
                v.y *= z;
                v.z = -z;
                true
            }
            ProjectionMode::Stereographic => {
                let lqq = 0.25 * (v.x * v.x + v.y * v.y);
                let f = 1.0 / (lqq + 1.0);
                v.x *= f;
                v.y *= f;
                v.z = (lqq - 1.0) * f;
                true
            }
            ProjectionMode::Equidistant => {
                let a = v.x.hypot(v.y);
                let f = if a > 0.0 { a.sin() / a } else { 1.0 };
                v.x *= f;
                v.y *= f;
                v.z = -a.cos();
                a <= std::f64::consts::PI
            }
        }
    }

    /// FOV diameter in degrees to the normalized radius of the FOV disk edge.
    pub fn fov_to_view_scaling_factor(self, fov: f64) -> f64 {
        let half = 0.5 * fov.to_radians();
        match self {
            ProjectionMode::Perspective => half.tan(),
            ProjectionMode::Stereographic => 2.0 * (0.5 * half).tan(),
            ProjectionMode::Equidistant => half,
        }
    }

    pub fn view_scaling_factor_to_fov(self, vsf: f64) -> f64 {
        let half = match self {
            ProjectionMode::Perspective => vsf.atan(),
            ProjectionMode::Stereographic => 2.0 * (0.5 * vsf).atan(),
            ProjectionMode::Equidistant => vsf,
        };
        2.0 * half.to_degrees()
    }

    /// Zoom step in degrees for smooth interaction at `fov`. Shrinks as the
    /// view narrows so the on-screen angular speed stays even.
    pub fn delta_zoom(self, fov: f64) -> f64 {
        let vsf = self.fov_to_view_scaling_factor(fov);
        match self {
            // sin(fov/2)
            ProjectionMode::Perspective => DELTA_ZOOM_SCALE * vsf / (1.0 + vsf * vsf).sqrt(),
            // tan(fov/4)
            ProjectionMode::Stereographic => DELTA_ZOOM_SCALE * 0.5 * vsf,
            ProjectionMode::Equidistant => DELTA_ZOOM_SCALE * vsf,
        }
    }

    /// Whether a normalized plane point lies inside the disk spanned by `fov`.
    pub fn within_fov(self, v: DVec3, fov: f64) -> bool {
        let edge = self.fov_to_view_scaling_factor(fov);
        v.x.hypot(v.y) <= edge * (1.0 + FOV_EDGE_TOLERANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [ProjectionMode; 3] = [
        ProjectionMode::Perspective,
        ProjectionMode::Stereographic,
        ProjectionMode::Equidistant,
    ];

    fn sample_fovs(mode: ProjectionMode) -> Vec<f64> {
        let max = mode.max_fov();
        (1..200).map(|i| max * i as f64 / 200.0).collect()
    }

    #[test]
    fn forward_keeps_length_in_z() {
        let v0 = DVec3::new(0.3, -1.2, -4.0);
        for mode in MODES {
            let mut v = v0;
            assert!(mode.forward(&mut v), "{mode:?}");
            assert!((v.z - v0.length()).abs() < 1e-12, "{mode:?}");
        }
    }

    #[test]
    fn zero_vector_is_rejected() {
        for mode in MODES {
            let mut v = DVec3::ZERO;
            assert!(!mode.forward(&mut v), "{mode:?}");
        }
    }

    #[test]
    fn perspective_rejects_directions_behind() {
        let mut v = DVec3::new(0.1, 0.1, 1.0);
        assert!(!ProjectionMode::Perspective.forward(&mut v));
        let mut side = DVec3::new(1.0, 0.0, 0.0);
        assert!(!ProjectionMode::Perspective.forward(&mut side));
    }

    #[test]
    fn wide_modes_accept_sideways_directions() {
        let mut v = DVec3::new(1.0, 0.0, 0.0);
        assert!(ProjectionMode::Stereographic.forward(&mut v));
        assert!((v.x - 2.0).abs() < 1e-12);

        let mut v = DVec3::new(0.0, 1.0, 0.0);
        assert!(ProjectionMode::Equidistant.forward(&mut v));
        assert!((v.y - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn backward_returns_original_direction() {
        let dirs = [
            DVec3::new(0.0, 0.0, -1.0),
            DVec3::new(0.2, -0.1, -1.0),
            DVec3::new(-0.5, 0.4, -0.7),
        ];
        for mode in MODES {
            for d in dirs {
                let mut v = d;
                assert!(mode.forward(&mut v));
                assert!(mode.backward(&mut v));
                assert!(v.abs_diff_eq(d.normalize(), 1e-12), "{mode:?}: {v:?}");
            }
        }
    }

    #[test]
    fn equidistant_backward_rejects_beyond_pi() {
        let mut v = DVec3::new(3.5, 0.0, 0.0);
        assert!(!ProjectionMode::Equidistant.backward(&mut v));
    }

    #[test]
    fn fov_conversions_are_inverse() {
        for mode in MODES {
            for fov in sample_fovs(mode) {
                let vsf = mode.fov_to_view_scaling_factor(fov);
                let back = mode.view_scaling_factor_to_fov(vsf);
                assert!((back - fov).abs() < 1e-6, "{mode:?}: {fov} -> {back}");
            }
        }
    }

    #[test]
    fn perspective_scaling_factor_is_half_angle_tangent() {
        let vsf = ProjectionMode::Perspective.fov_to_view_scaling_factor(90.0);
        assert!((vsf - 1.0).abs() < 1e-12);
    }

    #[test]
    fn delta_zoom_is_positive_and_non_decreasing() {
        for mode in MODES {
            let mut last = 0.0;
            for fov in sample_fovs(mode) {
                let dz = mode.delta_zoom(fov);
                assert!(dz > 0.0, "{mode:?} at {fov}");
                assert!(dz >= last, "{mode:?} decreases at {fov}");
                last = dz;
            }
        }
    }

    #[test]
    fn fov_disk_edge() {
        let mode = ProjectionMode::Perspective;
        let half = 30.0f64.to_radians();
        let mut edge = DVec3::new(half.sin(), 0.0, -half.cos());
        assert!(mode.forward(&mut edge));
        assert!(mode.within_fov(edge, 60.0));

        let beyond = (30.0f64 + 0.01).to_radians();
        let mut out = DVec3::new(0.0, beyond.sin(), -beyond.cos());
        assert!(mode.forward(&mut out));
        assert!(!mode.within_fov(out, 60.0));
    }
}
