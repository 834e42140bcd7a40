use fluidstep::config;
use fluidstep::solver::diagnostics;
use fluidstep::{FrameSnapshot, Simulation};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cfg = config::load(config::DEFAULT_PATH);
    let mut sim = match Simulation::new(cfg.solver_params()) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    let n = sim.params().grid_size;
    let mut snap = FrameSnapshot::new_empty(n);
    let mut injected = 0.0;

    for frame in 0..cfg.run.frames {
        cfg.run.impulse.apply(sim.state_mut());
        injected += cfg.run.impulse.injected_mass(n);
        sim.step();
        sim.snapshot_into(&mut snap);

        let state = sim.state();
        let mass = diagnostics::total_density(&snap.density);
        let ke = diagnostics::kinetic_energy(&state.vx, &state.vy, n);
        let div = diagnostics::divergence_l2(&state.vx, &state.vy, n);
        eprintln!(
            "frame={} t={:.3} mass={:.3} injected={:.1} KE={:.6e} |div|={:.6e}",
            frame,
            sim.time(),
            mass,
            injected,
            ke,
            div
        );

        if let Some(k) = diagnostics::first_non_finite(&snap.density) {
            eprintln!("Error: density became non-finite at cell {} (i={}, j={})", k, k % n, k / n);
            std::process::exit(1);
        }
    }
}
