/// Default grid side length.
pub const DEFAULT_N: usize = 40;

/// Row-major index of cell `(i, j)` on an `n`-wide grid.
/// `i` is the column (x), `j` the row (y). Caller keeps both in `0..n`.
#[inline(always)]
pub const fn idx(i: usize, j: usize, n: usize) -> usize {
    j * n + i
}

/// Grid state of one simulation instance.
///
/// Every buffer is `n * n` long and zero-initialized. `density`, `vx` and `vy`
/// persist across steps; the `*0`/`*_prev` buffers and the projection scratch
/// are working memory that each step overwrites before reading.
#[derive(Clone, Debug)]
pub struct SimState {
    pub n: usize,
    pub density: Vec<f64>,
    /// Diffusion target and advection source for density.
    pub density_prev: Vec<f64>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
    pub vx0: Vec<f64>,
    pub vy0: Vec<f64>,
    /// Projection scratch: the potential whose gradient is removed from velocity.
    pub pressure: Vec<f64>,
    /// Projection scratch: discrete divergence of the velocity being projected.
    pub divergence: Vec<f64>,
}

/// Per-frame density capture handed to the external driver.
#[derive(Clone, Debug)]
pub struct FrameSnapshot {
    pub n: usize,
    pub density: Vec<f64>,
}

impl FrameSnapshot {
    /// Pre-allocate a snapshot buffer matching the given grid size.
    pub fn new_empty(n: usize) -> Self {
        FrameSnapshot {
            n,
            density: vec![0.0; n * n],
        }
    }
}

impl SimState {
    pub fn new(n: usize) -> Self {
        let size = n * n;
        Self {
            n,
            density: vec![0.0; size],
            density_prev: vec![0.0; size],
            vx: vec![0.0; size],
            vy: vec![0.0; size],
            vx0: vec![0.0; size],
            vy0: vec![0.0; size],
            pressure: vec![0.0; size],
            divergence: vec![0.0; size],
        }
    }

    fn contains(&self, i: usize, j: usize) -> bool {
        i < self.n && j < self.n
    }

    /// Density at a cell, 0.0 outside the grid.
    pub fn density(&self, i: usize, j: usize) -> f64 {
        if self.contains(i, j) {
            self.density[idx(i, j, self.n)]
        } else {
            0.0
        }
    }

    /// Velocity `(vx, vy)` at a cell, zero outside the grid.
    pub fn velocity(&self, i: usize, j: usize) -> (f64, f64) {
        if self.contains(i, j) {
            let ii = idx(i, j, self.n);
            (self.vx[ii], self.vy[ii])
        } else {
            (0.0, 0.0)
        }
    }

    /// Add density at a cell. Out-of-grid cells are ignored.
    pub fn add_density(&mut self, i: usize, j: usize, amount: f64) {
        if self.contains(i, j) {
            let ii = idx(i, j, self.n);
            self.density[ii] += amount;
        }
    }

    /// Add a velocity vector at a cell. Out-of-grid cells are ignored.
    pub fn add_velocity(&mut self, i: usize, j: usize, vx: f64, vy: f64) {
        if self.contains(i, j) {
            let ii = idx(i, j, self.n);
            self.vx[ii] += vx;
            self.vy[ii] += vy;
        }
    }

    pub fn density_field(&self) -> &[f64] {
        &self.density
    }

    pub fn density_field_mut(&mut self) -> &mut [f64] {
        &mut self.density
    }

    pub fn velocity_field(&self) -> (&[f64], &[f64]) {
        (&self.vx, &self.vy)
    }

    pub fn velocity_field_mut(&mut self) -> (&mut [f64], &mut [f64]) {
        (&mut self.vx, &mut self.vy)
    }

    /// Whether every buffer still holds exactly `n * n` cells.
    pub fn buffers_sized(&self) -> bool {
        let size = self.n * self.n;
        [
            &self.density,
            &self.density_prev,
            &self.vx,
            &self.vy,
            &self.vx0,
            &self.vy0,
            &self.pressure,
            &self.divergence,
        ]
        .iter()
        .all(|buf| buf.len() == size)
    }

    /// Zero every buffer, keeping the allocation.
    pub fn clear(&mut self) {
        for buf in [
            &mut self.density,
            &mut self.density_prev,
            &mut self.vx,
            &mut self.vy,
            &mut self.vx0,
            &mut self.vy0,
            &mut self.pressure,
            &mut self.divergence,
        ] {
            buf.fill(0.0);
        }
    }

    /// Allocating snapshot convenience method (used in tests).
    #[cfg(test)]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            n: self.n,
            density: self.density.clone(),
        }
    }

    /// Copy current density into a pre-allocated snapshot, avoiding allocation.
    pub fn snapshot_into(&self, dst: &mut FrameSnapshot) {
        dst.density.resize(self.density.len(), 0.0);
        dst.density.copy_from_slice(&self.density);
        dst.n = self.n;
    }
}
