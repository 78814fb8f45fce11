// config.rs - locate and load projector params
//
// Params live in a JSON file whose fields all default (see `ProjectorParams`).
// Lookup order:
//   1) explicit path: CLI `--params <file>` or env SKY_PROJECTOR_PARAMS
//   2) <exe_dir>/assets/projector.json
//   3) ./assets/projector.json (dev working dir)
//   4) built-in defaults

use crate::error::ConfigError;
use crate::params::ProjectorParams;
use std::path::{Path, PathBuf};

pub const PARAMS_FILE: &str = "projector.json";
pub const PARAMS_ENV: &str = "SKY_PROJECTOR_PARAMS";

pub fn params_from_json_str(text: &str) -> Result<ProjectorParams, ConfigError> {
    Ok(serde_json::from_str(text)?)
}

pub fn load_params_file(path: &Path) -> Result<ProjectorParams, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    params_from_json_str(&text)
}

fn find_params_file() -> Option<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let p = dir.join("assets").join(PARAMS_FILE);
            if p.exists() {
                return Some(p);
            }
        }
    }

    let p = PathBuf::from("assets").join(PARAMS_FILE);
    if p.exists() {
        return Some(p);
    }

    None
}

/// Explicit params path from `args` (`--params <file>`), then the environment.
pub fn resolve_params_path<I>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = String>,
{
    let mut it = args.into_iter();
    while let Some(a) = it.next() {
        if a == "--params" {
            if let Some(v) = it.next() {
                return Some(PathBuf::from(v));
            }
        }
    }

    match std::env::var(PARAMS_ENV) {
        Ok(v) if !v.trim().is_empty() => Some(PathBuf::from(v)),
        _ => None,
    }
}

/// Load params following the lookup order above. An explicit path that fails
/// to load is an error; a missing default file just yields defaults.
pub fn load_params(explicit: Option<&Path>) -> Result<ProjectorParams, ConfigError> {
    if let Some(path) = explicit {
        log::info!("loading projector params from {}", path.display());
        return load_params_file(path);
    }

    match find_params_file() {
        Some(path) => match load_params_file(&path) {
            Ok(params) => {
                log::info!("loaded projector params from {}", path.display());
                Ok(params)
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                Ok(ProjectorParams::default())
            }
        },
        None => {
            log::debug!("no {} found, using defaults", PARAMS_FILE);
            Ok(ProjectorParams::default())
        }
    }
}
