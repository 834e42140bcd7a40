use serde::Deserialize;

use crate::state::SimState;

/// Per-frame source injection: a square block of density plus a force at one cell.
///
/// Defaults reproduce the reference driver: +100 on the 3x3 block starting at
/// (4, 4) and +(1, 2) velocity at (5, 5).
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Impulse {
    /// Lower corner `(i, j)` of the density block.
    pub density_origin: (usize, usize),
    /// Side length of the density block in cells.
    pub density_extent: usize,
    pub density_amount: f64,
    pub velocity_cell: (usize, usize),
    pub force: (f64, f64),
}

impl Default for Impulse {
    fn default() -> Self {
        Self {
            density_origin: (4, 4),
            density_extent: 3,
            density_amount: 100.0,
            velocity_cell: (5, 5),
            force: (1.0, 2.0),
        }
    }
}

impl Impulse {
    /// Add this impulse to the state. Cells outside the grid are skipped.
    pub fn apply(&self, state: &mut SimState) {
        let (i0, j0) = self.density_origin;
        for j in j0..j0 + self.density_extent {
            for i in i0..i0 + self.density_extent {
                state.add_density(i, j, self.density_amount);
            }
        }
        let (vi, vj) = self.velocity_cell;
        state.add_velocity(vi, vj, self.force.0, self.force.1);
    }

    /// Density added per application, counting only cells inside an `n`-grid.
    pub fn injected_mass(&self, n: usize) -> f64 {
        let (i0, j0) = self.density_origin;
        let cols = (i0..i0 + self.density_extent).filter(|&i| i < n).count();
        let rows = (j0..j0 + self.density_extent).filter(|&j| j < n).count();
        (cols * rows) as f64 * self.density_amount
    }
}
