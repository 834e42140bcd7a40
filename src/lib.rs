//! Real-time 2D fluid simulation using Jos Stam's stable fluids method.
//!
//! A fixed N×N grid carries a density field and a velocity field. Each
//! [`Simulation::step`] diffuses, projects and advects velocity, then diffuses
//! and advects density along it. Callers inject sources between steps and read
//! density back.
//!
//! ```no_run
//! use fluidstep::{Impulse, Simulation, SolverParams};
//!
//! let mut sim = Simulation::new(SolverParams::default())?;
//! for _ in 0..30 {
//!     Impulse::default().apply(sim.state_mut());
//!     sim.step();
//! }
//! let density = sim.state().density_field();
//! # let _ = density;
//! # Ok::<(), fluidstep::FluidError>(())
//! ```

pub mod config;
pub mod error;
pub mod impulse;
pub mod simulation;
pub mod solver;
pub mod state;

pub use error::FluidError;
pub use impulse::Impulse;
pub use simulation::Simulation;
pub use solver::{FieldType, Relaxation, SolverParams};
pub use state::{idx, FrameSnapshot, SimState};
