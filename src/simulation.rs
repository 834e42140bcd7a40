use crate::error::FluidError;
use crate::solver::{self, SolverParams};
use crate::state::{FrameSnapshot, SimState};

/// A validated simulation: one grid state and the parameters it was built with.
///
/// The driver injects sources through [`Simulation::state_mut`] between calls
/// to [`Simulation::step`], then reads density back.
#[derive(Clone, Debug)]
pub struct Simulation {
    params: SolverParams,
    state: SimState,
    steps: u64,
}

impl Simulation {
    /// Validate `params` and allocate a zeroed grid.
    pub fn new(params: SolverParams) -> Result<Self, FluidError> {
        params.validate()?;
        log::debug!(
            "new simulation: N={} dt={} diff={} visc={} iter={} relaxation={:?} parallel={}",
            params.grid_size,
            params.dt,
            params.diff,
            params.visc,
            params.iter,
            params.relaxation,
            params.parallel,
        );
        let state = SimState::new(params.grid_size);
        Ok(Self {
            params,
            state,
            steps: 0,
        })
    }

    /// Advance by one fixed timestep.
    pub fn step(&mut self) {
        solver::fluid_step(&mut self.state, &self.params);
        self.steps += 1;
        log::trace!("step {} done", self.steps);
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimState {
        &mut self.state
    }

    /// Number of completed steps.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time: steps * dt.
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.params.dt
    }

    /// Zero all fields and the step counter.
    pub fn reset(&mut self) {
        self.state.clear();
        self.steps = 0;
    }

    pub fn snapshot_into(&self, dst: &mut FrameSnapshot) {
        self.state.snapshot_into(dst);
    }
}
