// main.rs - load params, project a few directions and pick a couple of pixels

use glam::{DMat4, DVec3};
use sky_projector::{config, Mat4Transform, ModelViewTransform, Projector};
use std::sync::Arc;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let explicit = config::resolve_params_path(std::env::args());
    let params = match config::load_params(explicit.as_deref()) {
        Ok(p) => p,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    // shared base; the projector clones it once it gets combined
    let base: Arc<dyn ModelViewTransform> = Arc::new(Mat4Transform::identity());
    let mut projector = Projector::perspective(base.clone());
    if let Err(e) = projector.init(params) {
        log::error!("{}", e);
        std::process::exit(1);
    }
    projector.combine_model_view(&DMat4::from_rotation_y(5f64.to_radians()));

    let half = 0.5 * projector.fov().to_radians();
    let directions = [
        DVec3::NEG_Z,
        DVec3::new(0.1, 0.05, -1.0),
        DVec3::new(half.sin(), 0.0, -half.cos()),
        DVec3::new(0.0, 0.0, 1.0),
    ];

    for d in directions {
        let win = projector.project(d);
        if win.valid {
            log::info!(
                "{:?} -> ({:.2}, {:.2}) depth {:.6}",
                d,
                win.point.x,
                win.point.y,
                projector.depth(win.point.z)
            );
        } else {
            log::info!("{:?} is not visible", d);
        }
    }

    let center = projector.viewport_center();
    for (x, y) in [(center.x, center.y), (0.0, 0.0)] {
        match projector.unproject_xy(x, y).ok() {
            Some(v) => log::info!("pixel ({:.1}, {:.1}) -> {:?}", x, y, v),
            None => log::info!("pixel ({:.1}, {:.1}) has no direction", x, y),
        }
    }

    log::info!(
        "fov {:.1}°, zoom step {:.3}°, {} bytes of uniform data",
        projector.fov(),
        projector.delta_zoom(projector.fov()),
        std::mem::size_of_val(&projector.uniform())
    );
}
