mod boundary;
mod core;
pub mod diagnostics;
mod params;

// Re-export public API
pub use boundary::{set_bnd, FieldType};
pub use self::core::{advect, diffuse, lin_solve, project};
pub use params::{Relaxation, SolverParams};

use crate::state::SimState;

/// Full fluid simulation step.
///
/// Velocity: diffuse into vx0/vy0, project, advect back into vx/vy along the
/// projected field, project again. Density: diffuse into density_prev, advect
/// back into density along the final velocity. Every sub-step always runs.
///
/// # Panics
///
/// Panics if `state` was not built for `params.grid_size`, or if any of its
/// buffers no longer holds exactly N*N cells.
pub fn fluid_step(state: &mut SimState, params: &SolverParams) {
    assert_eq!(state.n, params.grid_size, "state and params disagree on grid size");
    assert!(state.buffers_sized(), "grid buffers must each hold {}x{} cells", state.n, state.n);

    // Diffuse velocity
    diffuse(FieldType::Vx, &mut state.vx0, &state.vx, params.visc, params);
    diffuse(FieldType::Vy, &mut state.vy0, &state.vy, params.visc, params);

    // Project to make diffused velocity divergence-free
    project(
        &mut state.vx0,
        &mut state.vy0,
        &mut state.pressure,
        &mut state.divergence,
        params,
    );

    // Advect velocity along itself
    advect(FieldType::Vx, &mut state.vx, &state.vx0, &state.vx0, &state.vy0, params);
    advect(FieldType::Vy, &mut state.vy, &state.vy0, &state.vx0, &state.vy0, params);

    // Remove divergence introduced by advection
    project(
        &mut state.vx,
        &mut state.vy,
        &mut state.pressure,
        &mut state.divergence,
        params,
    );

    // Diffuse + advect density
    diffuse(FieldType::Scalar, &mut state.density_prev, &state.density, params.diff, params);
    advect(FieldType::Scalar, &mut state.density, &state.density_prev, &state.vx, &state.vy, params);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{idx, SimState, DEFAULT_N as N};

    fn seeded_state() -> SimState {
        let mut state = SimState::new(N);
        for j in 4..7 {
            for i in 4..7 {
                state.add_density(i, j, 100.0);
            }
        }
        state.add_velocity(5, 5, 1.0, 2.0);
        state
    }

    #[test]
    fn test_quiescent_state_stays_zero() {
        let mut state = SimState::new(N);
        let params = SolverParams::default();
        for _ in 0..5 {
            fluid_step(&mut state, &params);
        }
        assert!(state.density.iter().all(|&d| d == 0.0));
        assert!(state.vx.iter().chain(state.vy.iter()).all(|&v| v == 0.0));
    }

    #[test]
    fn test_mass_conserved_without_flow() {
        let mut state = SimState::new(N);
        for j in 10..20 {
            for i in 15..18 {
                state.add_density(i, j, (i * j) as f64 * 0.5);
            }
        }
        let params = SolverParams::default();
        let before = diagnostics::total_density(&state.density);
        for _ in 0..10 {
            fluid_step(&mut state, &params);
        }
        let after = diagnostics::total_density(&state.density);
        assert!(
            (after - before).abs() < 1e-6 * (N * N) as f64,
            "Mass should be conserved: before={}, after={}",
            before, after
        );
    }

    #[test]
    fn test_single_step_scenario() {
        let mut state = seeded_state();
        fluid_step(&mut state, &SolverParams::default());

        assert!(state.density[idx(5, 5, N)] > 0.0, "seeded block should keep density");
        assert!(state.density[idx(6, 4, N)] > 0.0);
        assert_eq!(state.density[idx(20, 20, N)], 0.0, "far cells should stay empty");

        // Semi-Lagrangian advection is not conservative, so the total lands below 900
        let total = diagnostics::total_density(&state.density);
        assert!((total - 839.5878844811374).abs() < 1e-9, "total density after one step: {}", total);
        assert!(diagnostics::first_non_finite(&state.density).is_none());
    }

    #[test]
    fn test_velocity_spreads_after_step() {
        let mut state = seeded_state();
        fluid_step(&mut state, &SolverParams::default());
        let touched = (1..(N - 1))
            .flat_map(|j| (1..(N - 1)).map(move |i| (i, j)))
            .filter(|&(i, j)| {
                let (u, v) = state.velocity(i, j);
                u != 0.0 || v != 0.0
            })
            .count();
        assert!(touched > 1, "projection should spread the impulse, touched={}", touched);
    }

    #[test]
    fn test_driver_loop_stays_finite_and_non_negative() {
        let mut state = SimState::new(N);
        let params = SolverParams::default();
        for _ in 0..30 {
            for j in 4..7 {
                for i in 4..7 {
                    state.add_density(i, j, 100.0);
                }
            }
            state.add_velocity(5, 5, 1.0, 2.0);
            fluid_step(&mut state, &params);
        }
        assert!(diagnostics::first_non_finite(&state.density).is_none());
        assert!(diagnostics::first_non_finite(&state.vx).is_none());
        assert!(diagnostics::first_non_finite(&state.vy).is_none());
        assert!(state.density.iter().all(|&d| d >= 0.0), "bilinear advection of non-negative density stays non-negative");
        assert!(diagnostics::total_density(&state.density) > 0.0);
    }

    #[test]
    fn test_parallel_step_matches_sequential() {
        let mut a = seeded_state();
        let mut b = seeded_state();
        let seq = SolverParams::default();
        let par = SolverParams { parallel: true, ..SolverParams::default() };
        for _ in 0..5 {
            fluid_step(&mut a, &seq);
            fluid_step(&mut b, &par);
        }
        assert_eq!(a.density, b.density);
        assert_eq!(a.vx, b.vx);
        assert_eq!(a.vy, b.vy);
    }

    #[test]
    fn test_viscous_step_smooths_velocity() {
        let params = SolverParams {
            visc: 0.0005,
            diff: 0.0005,
            ..SolverParams::default()
        };
        let mut state = seeded_state();
        fluid_step(&mut state, &params);
        assert!(diagnostics::first_non_finite(&state.vx).is_none());
        assert!(diagnostics::first_non_finite(&state.density).is_none());
        let ke = diagnostics::kinetic_energy(&state.vx, &state.vy, N);
        assert!(ke > 0.0);
    }

    #[test]
    #[should_panic(expected = "disagree on grid size")]
    fn test_step_rejects_mismatched_grid() {
        let mut state = SimState::new(10);
        fluid_step(&mut state, &SolverParams::default());
    }

    #[test]
    #[should_panic(expected = "grid buffers")]
    fn test_step_rejects_resized_buffer() {
        let mut state = SimState::new(N);
        state.vx.truncate(N);
        fluid_step(&mut state, &SolverParams::default());
    }

    #[test]
    fn test_jacobi_step_runs() {
        let params = SolverParams {
            relaxation: Relaxation::Jacobi,
            ..SolverParams::default()
        };
        let mut state = seeded_state();
        fluid_step(&mut state, &params);
        assert!(state.density[idx(5, 5, N)] > 0.0);
        assert_eq!(state.density[idx(20, 20, N)], 0.0);
    }
}
