// error.rs - configuration errors

use thiserror::Error;

/// Rejected projector configuration. `Projector::init` returns this and leaves
/// the previous state untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectorError {
    #[error("FOV {fov}° is outside (0, {max}°]")]
    FovOutOfRange { fov: f64, max: f64 },

    #[error("viewport must have a positive size, got {width}x{height}")]
    InvalidViewport { width: i32, height: i32 },

    #[error("FOV disk diameter must be positive and finite, got {0}")]
    InvalidFovDiameter(f64),

    #[error("clip range requires z_near < z_far, got near={near} far={far}")]
    InvalidClipRange { near: f64, far: f64 },
}

/// Failure while loading `ProjectorParams` from disk.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid projector params JSON: {0}")]
    Json(#[from] serde_json::Error),
}
