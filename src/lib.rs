//! Projection of sky directions onto a viewport and back.
//!
//! A [`Projector`] owns a [`ModelViewTransform`] that brings directions into
//! the camera frame, a [`ProjectionMode`] that maps the camera frame onto a
//! normalized plane, and the [`ProjectorParams`] that place that plane in
//! screen pixels.

pub mod config;
pub mod error;
pub mod params;
pub mod projection;
pub mod projector;
pub mod transform;
pub mod uniform;

pub use error::{ConfigError, ProjectorError};
pub use params::ProjectorParams;
pub use projection::ProjectionMode;
pub use projector::{Projected, Projector};
pub use transform::{Mat4Transform, ModelViewTransform};
pub use uniform::ProjectorUniform;
