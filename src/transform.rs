// transform.rs - model-view transforms applied before projection

use glam::{DMat4, DVec3};
use std::fmt::Debug;

/// A transform applied to a direction before projection and undone after
/// unprojection. Implementations may be non-linear, but `backward` must invert
/// `forward`.
pub trait ModelViewTransform: Debug + Send + Sync {
    fn forward(&self, v: &mut DVec3);
    fn backward(&self, v: &mut DVec3);

    /// Compose `m` into this transform. Composition is right-multiplication:
    /// the new transform is `current * m`, so `m` is applied first.
    fn combine(&mut self, m: &DMat4);

    /// Deep copy that shares no state with `self`.
    fn clone_box(&self) -> Box<dyn ModelViewTransform>;

    /// Equivalent 4x4 matrix, for backends that need a flat transform.
    fn transform_matrix(&self) -> DMat4;
}

impl Clone for Box<dyn ModelViewTransform> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Plain 4x4 transform. Directions are vectors (w = 0), so any translation
/// part of the matrix has no effect on them.
#[derive(Debug, Clone, PartialEq)]
pub struct Mat4Transform {
    matrix: DMat4,
    inverse: DMat4,
}

impl Mat4Transform {
    pub fn new(matrix: DMat4) -> Self {
        debug_assert!(matrix.determinant() != 0.0, "singular model-view matrix");
        Self {
            matrix,
            inverse: matrix.inverse(),
        }
    }

    pub fn identity() -> Self {
        Self::new(DMat4::IDENTITY)
    }
}

impl Default for Mat4Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ModelViewTransform for Mat4Transform {
    fn forward(&self, v: &mut DVec3) {
        *v = self.matrix.transform_vector3(*v);
    }

    fn backward(&self, v: &mut DVec3) {
        *v = self.inverse.transform_vector3(*v);
    }

    fn combine(&mut self, m: &DMat4) {
        self.matrix *= *m;
        debug_assert!(self.matrix.determinant() != 0.0, "singular model-view matrix");
        self.inverse = self.matrix.inverse();
    }

    fn clone_box(&self) -> Box<dyn ModelViewTransform> {
        Box::new(self.clone())
    }

    fn transform_matrix(&self) -> DMat4 {
        self.matrix
    }
}
