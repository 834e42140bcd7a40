use serde::Deserialize;

use crate::error::FluidError;
use crate::state::DEFAULT_N;

/// Update order of the linear relaxation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relaxation {
    /// In-place sweep reading already-updated neighbours. Sequential only.
    #[default]
    GaussSeidel,
    /// Each sweep reads a snapshot of the previous sweep. Rows are independent,
    /// so the sweep may run in parallel; results differ from Gauss-Seidel.
    Jacobi,
}

/// Solver parameters for the fluid simulation. Fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverParams {
    /// Grid side length N (boundary cells included).
    pub grid_size: usize,
    pub dt: f64,
    /// Density diffusion rate.
    pub diff: f64,
    /// Velocity viscosity.
    pub visc: f64,
    /// Relaxation sweeps per linear solve. Deliberately small (under-converged).
    pub iter: usize,
    pub relaxation: Relaxation,
    /// Run advection rows (and Jacobi sweeps) on the rayon pool.
    pub parallel: bool,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_N,
            dt: 0.2,
            diff: 0.0,
            visc: 0.0,
            iter: 2,
            relaxation: Relaxation::GaussSeidel,
            parallel: false,
        }
    }
}

impl SolverParams {
    /// Default parameters on a grid of side `n`.
    pub fn with_grid_size(n: usize) -> Self {
        Self {
            grid_size: n,
            ..Self::default()
        }
    }

    /// Implicit diffusion coefficient: a = dt * rate * (N-2)^2.
    pub fn diffusion_coefficient(&self, rate: f64) -> f64 {
        let n2 = self.grid_size.saturating_sub(2) as f64;
        self.dt * rate * n2 * n2
    }

    /// Reject parameter sets the solver cannot integrate.
    pub fn validate(&self) -> Result<(), FluidError> {
        if self.grid_size < 3 {
            return Err(FluidError::invalid(
                "grid_size",
                format!("need at least one interior cell, got N={}", self.grid_size),
            ));
        }
        for (field, value) in [("dt", self.dt), ("diff", self.diff), ("visc", self.visc)] {
            if !value.is_finite() {
                return Err(FluidError::invalid(field, format!("must be finite, got {value}")));
            }
        }
        if self.dt < 0.0 {
            return Err(FluidError::invalid("dt", format!("must be >= 0, got {}", self.dt)));
        }
        for (field, rate) in [("diff", self.diff), ("visc", self.visc)] {
            let a = self.diffusion_coefficient(rate);
            if a < 0.0 {
                return Err(FluidError::invalid(
                    field,
                    format!("diffusion coefficient dt*{field}*(N-2)^2 = {a} is negative"),
                ));
            }
        }
        Ok(())
    }
}
