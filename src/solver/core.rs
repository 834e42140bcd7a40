use rayon::prelude::*;

use super::boundary::{set_bnd, FieldType};
use super::params::{Relaxation, SolverParams};
use crate::state::idx;

/// Iterative linear solver.
/// Solves: x[i,j] = (x0[i,j] + a * (neighbors)) / c
///
/// Gauss-Seidel sweeps update in place, rows top to bottom and columns left to
/// right, so later cells read neighbours already updated this sweep. Jacobi
/// sweeps read a snapshot of the previous sweep instead.
pub fn lin_solve(field_type: FieldType, x: &mut [f64], x0: &[f64], a: f64, c: f64, params: &SolverParams) {
    match params.relaxation {
        Relaxation::GaussSeidel => lin_solve_gauss_seidel(field_type, x, x0, a, c, params.iter, params.grid_size),
        Relaxation::Jacobi => {
            lin_solve_jacobi(field_type, x, x0, a, c, params.iter, params.grid_size, params.parallel)
        }
    }
}

fn lin_solve_gauss_seidel(field_type: FieldType, x: &mut [f64], x0: &[f64], a: f64, c: f64, iter: usize, n: usize) {
    let c_recip = 1.0 / c;
    for _ in 0..iter {
        for j in 1..(n - 1) {
            for i in 1..(n - 1) {
                let neighbors = x[idx(i + 1, j, n)] + x[idx(i - 1, j, n)] + x[idx(i, j + 1, n)] + x[idx(i, j - 1, n)];
                x[idx(i, j, n)] = (x0[idx(i, j, n)] + a * neighbors) * c_recip;
            }
        }
        set_bnd(field_type, x, n);
    }
}

#[allow(clippy::too_many_arguments)]
fn lin_solve_jacobi(
    field_type: FieldType,
    x: &mut [f64],
    x0: &[f64],
    a: f64,
    c: f64,
    iter: usize,
    n: usize,
    parallel: bool,
) {
    let c_recip = 1.0 / c;
    let mut prev = x.to_vec();
    for _ in 0..iter {
        prev.copy_from_slice(x);
        let relax_row = |(k, row): (usize, &mut [f64])| {
            let j = k + 1;
            for i in 1..(n - 1) {
                let neighbors =
                    prev[idx(i + 1, j, n)] + prev[idx(i - 1, j, n)] + prev[idx(i, j + 1, n)] + prev[idx(i, j - 1, n)];
                row[i] = (x0[idx(i, j, n)] + a * neighbors) * c_recip;
            }
        };
        let interior = &mut x[n..(n - 1) * n];
        if parallel {
            interior.par_chunks_mut(n).enumerate().for_each(relax_row);
        } else {
            interior.chunks_mut(n).enumerate().for_each(relax_row);
        }
        set_bnd(field_type, x, n);
    }
}

/// Diffusion step: spreads the field over time.
/// a = dt * diff * (N-2)^2, c = 1 + 6a
///
/// Runs the full relaxation even when `diff` is zero; the sweep then copies
/// `x0` into the interior of `x` and still applies the boundary pass.
pub fn diffuse(field_type: FieldType, x: &mut [f64], x0: &[f64], diff: f64, params: &SolverParams) {
    let a = params.diffusion_coefficient(diff);
    let c = 1.0 + 6.0 * a;
    // Initialize x from x0
    x.copy_from_slice(x0);
    lin_solve(field_type, x, x0, a, c, params);
}

/// Semi-Lagrangian advection: traces each interior cell backwards through the
/// velocity field and bilinearly samples `d0` there.
///
/// The back-trace scale `dt * (N-2)` is applied here; velocities are never
/// pre-scaled. Rows are independent, so the parallel path gives the same bits
/// as the sequential sweep.
pub fn advect(
    field_type: FieldType,
    d: &mut [f64],
    d0: &[f64],
    vx: &[f64],
    vy: &[f64],
    params: &SolverParams,
) {
    let n = params.grid_size;
    let dt0 = params.dt * (n - 2) as f64;
    let hi = n as f64 - 1.5;

    let advect_row = |(k, row): (usize, &mut [f64])| {
        let j = k + 1;
        for i in 1..(n - 1) {
            let ii = idx(i, j, n);
            // Trace backwards, clamped so i1/j1 stay inside the buffer
            let x = (i as f64 - dt0 * vx[ii]).clamp(0.5, hi);
            let y = (j as f64 - dt0 * vy[ii]).clamp(0.5, hi);

            let i0 = x.floor() as usize;
            let i1 = i0 + 1;
            let j0 = y.floor() as usize;
            let j1 = j0 + 1;
            let s1 = x - i0 as f64;
            let s0 = 1.0 - s1;
            let t1 = y - j0 as f64;
            let t0 = 1.0 - t1;

            row[i] = s0 * (t0 * d0[idx(i0, j0, n)] + t1 * d0[idx(i0, j1, n)])
                + s1 * (t0 * d0[idx(i1, j0, n)] + t1 * d0[idx(i1, j1, n)]);
        }
    };

    let interior = &mut d[n..(n - 1) * n];
    if params.parallel {
        interior.par_chunks_mut(n).enumerate().for_each(advect_row);
    } else {
        interior.chunks_mut(n).enumerate().for_each(advect_row);
    }
    set_bnd(field_type, d, n);
}

/// Pressure projection: enforces incompressibility (divergence-free velocity field).
///
/// `p` and `div` are scratch; both are fully rewritten on the interior before use.
pub fn project(vx: &mut [f64], vy: &mut [f64], p: &mut [f64], div: &mut [f64], params: &SolverParams) {
    let n = params.grid_size;
    let n_f = n as f64;

    // Calculate divergence
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            div[idx(i, j, n)] = -0.5
                * (vx[idx(i + 1, j, n)] - vx[idx(i - 1, j, n)] + vy[idx(i, j + 1, n)] - vy[idx(i, j - 1, n)])
                / n_f;
            p[idx(i, j, n)] = 0.0;
        }
    }
    set_bnd(FieldType::Scalar, div, n);
    set_bnd(FieldType::Scalar, p, n);

    // Solve for the potential
    lin_solve(FieldType::Scalar, p, div, 1.0, 6.0, params);

    // Subtract its gradient from velocity
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            vx[idx(i, j, n)] -= 0.5 * (p[idx(i + 1, j, n)] - p[idx(i - 1, j, n)]) * n_f;
            vy[idx(i, j, n)] -= 0.5 * (p[idx(i, j + 1, n)] - p[idx(i, j - 1, n)]) * n_f;
        }
    }
    set_bnd(FieldType::Vx, vx, n);
    set_bnd(FieldType::Vy, vy, n);
}
