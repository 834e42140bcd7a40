use crate::state::idx;

/// Total amount of the advected substance over the whole grid.
pub fn total_density(density: &[f64]) -> f64 {
    density.iter().sum()
}

/// L2 norm of the central-difference divergence over interior cells:
/// (vx[i+1,j] - vx[i-1,j]) + (vy[i,j+1] - vy[i,j-1]).
pub fn divergence_l2(vx: &[f64], vy: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            let d = (vx[idx(i + 1, j, n)] - vx[idx(i - 1, j, n)]) + (vy[idx(i, j + 1, n)] - vy[idx(i, j - 1, n)]);
            sum += d * d;
        }
    }
    sum.sqrt()
}

/// Compute volume-averaged kinetic energy: KE = 0.5 * <vx² + vy²> over interior cells.
pub fn kinetic_energy(vx: &[f64], vy: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for j in 1..(n - 1) {
        for i in 1..(n - 1) {
            let ii = idx(i, j, n);
            sum += vx[ii] * vx[ii] + vy[ii] * vy[ii];
            count += 1;
        }
    }
    if count > 0 { 0.5 * sum / count as f64 } else { 0.0 }
}

pub fn max_speed(vx: &[f64], vy: &[f64]) -> f64 {
    vx.iter()
        .zip(vy)
        .map(|(u, v)| (u * u + v * v).sqrt())
        .fold(0.0_f64, f64::max)
}

/// Index of the first NaN or infinite value, if any.
pub fn first_non_finite(field: &[f64]) -> Option<usize> {
    field.iter().position(|v| !v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{idx, DEFAULT_N as N};

    #[test]
    fn test_total_density() {
        let mut d = vec![0.0; N * N];
        d[idx(3, 4, N)] = 2.5;
        d[idx(0, 0, N)] = 1.0;
        assert_eq!(total_density(&d), 3.5);
    }

    #[test]
    fn test_divergence_zero_for_uniform_flow() {
        let vx = vec![0.3; N * N];
        let vy = vec![-0.7; N * N];
        assert!(divergence_l2(&vx, &vy, N) < 1e-12);
    }

    #[test]
    fn test_divergence_of_point_source() {
        let mut vx = vec![0.0; N * N];
        let vy = vec![0.0; N * N];
        vx[idx(10, 10, N)] = 1.0;
        // Cells (9,10) and (11,10) each see a difference of magnitude 1
        assert!((divergence_l2(&vx, &vy, N) - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_kinetic_energy_zero() {
        let vx = vec![0.0; N * N];
        let vy = vec![0.0; N * N];
        let ke = kinetic_energy(&vx, &vy, N);
        assert!(ke.abs() < 1e-15, "KE should be 0 with no flow, got {}", ke);
    }

    #[test]
    fn test_kinetic_energy_uniform_flow() {
        let vx = vec![1.0; N * N];
        let vy = vec![0.0; N * N];
        let ke = kinetic_energy(&vx, &vy, N);
        // Interior cells: vx=1 → KE = 0.5 * 1^2 = 0.5
        assert!((ke - 0.5).abs() < 1e-10, "KE should be 0.5, got {}", ke);
    }

    #[test]
    fn test_max_speed() {
        let mut vx = vec![0.0; 9];
        let mut vy = vec![0.0; 9];
        vx[4] = 3.0;
        vy[4] = 4.0;
        vx[1] = -1.0;
        assert_eq!(max_speed(&vx, &vy), 5.0);
    }

    #[test]
    fn test_first_non_finite() {
        let mut f = vec![0.0; 16];
        assert_eq!(first_non_finite(&f), None);
        f[7] = f64::NAN;
        f[9] = f64::INFINITY;
        assert_eq!(first_non_finite(&f), Some(7));
    }
}
