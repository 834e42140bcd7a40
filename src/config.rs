use std::path::Path;

use serde::Deserialize;

use crate::error::FluidError;
use crate::impulse::Impulse;
use crate::solver::{Relaxation, SolverParams};

/// Default configuration file name looked up by the reference driver.
pub const DEFAULT_PATH: &str = "fluidstep.yaml";

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub physics: PhysicsConfig,
    pub run: RunConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub grid_size: usize,
    pub dt: f64,
    pub diff: f64,
    pub visc: f64,
    pub iter: usize,
    pub relaxation: Relaxation,
    pub parallel: bool,
}

/// Settings for the frame-driving loop, not read by the solver itself.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub frames: usize,
    pub impulse: Impulse,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            physics: PhysicsConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let p = SolverParams::default();
        Self {
            grid_size: p.grid_size,
            dt: p.dt,
            diff: p.diff,
            visc: p.visc,
            iter: p.iter,
            relaxation: p.relaxation,
            parallel: p.parallel,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 30,
            impulse: Impulse::default(),
        }
    }
}

impl From<&PhysicsConfig> for SolverParams {
    fn from(cfg: &PhysicsConfig) -> Self {
        Self {
            grid_size: cfg.grid_size,
            dt: cfg.dt,
            diff: cfg.diff,
            visc: cfg.visc,
            iter: cfg.iter,
            relaxation: cfg.relaxation,
            parallel: cfg.parallel,
        }
    }
}

impl Config {
    pub fn solver_params(&self) -> SolverParams {
        SolverParams::from(&self.physics)
    }
}

/// Parse a YAML document. Missing keys take their defaults.
pub fn parse(contents: &str) -> Result<Config, FluidError> {
    Ok(serde_yaml::from_str(contents)?)
}

/// Load configuration from `path`, falling back to defaults when the file is
/// missing, unreadable or malformed.
pub fn load(path: impl AsRef<Path>) -> Config {
    let path = path.as_ref();
    if !path.exists() {
        log::debug!("{} not found; using defaults", path.display());
        return Config::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => match parse(&contents) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("failed to parse {}: {e}; using defaults", path.display());
                Config::default()
            }
        },
        Err(e) => {
            log::warn!("failed to read {}: {e}; using defaults", path.display());
            Config::default()
        }
    }
}
