use crate::state::idx;

/// Field type for boundary condition dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Scalar,
    /// x-component of velocity: reflected at the left and right walls.
    Vx,
    /// y-component of velocity: reflected at the top and bottom walls.
    Vy,
}

/// Solid-wall boundary conditions.
///   - `FieldType::Vx`: negate columns `i = 0` and `i = n-1` (no penetration)
///   - `FieldType::Vy`: negate rows `j = 0` and `j = n-1` (no penetration)
///   - `FieldType::Scalar`: edges left as they are
///
/// Corners are then set to the mean of their two edge neighbours for every
/// field type.
pub fn set_bnd(field_type: FieldType, x: &mut [f64], n: usize) {
    match field_type {
        FieldType::Vx => {
            for j in 0..n {
                x[idx(0, j, n)] = -x[idx(0, j, n)];
                x[idx(n - 1, j, n)] = -x[idx(n - 1, j, n)];
            }
        }
        FieldType::Vy => {
            for i in 0..n {
                x[idx(i, 0, n)] = -x[idx(i, 0, n)];
                x[idx(i, n - 1, n)] = -x[idx(i, n - 1, n)];
            }
        }
        FieldType::Scalar => {}
    }
    set_corners(x, n);
}

fn set_corners(x: &mut [f64], n: usize) {
    let last = n - 1;
    x[idx(0, 0, n)] = 0.5 * (x[idx(1, 0, n)] + x[idx(0, 1, n)]);
    x[idx(0, last, n)] = 0.5 * (x[idx(1, last, n)] + x[idx(0, last - 1, n)]);
    x[idx(last, 0, n)] = 0.5 * (x[idx(last - 1, 0, n)] + x[idx(last, 1, n)]);
    x[idx(last, last, n)] = 0.5 * (x[idx(last - 1, last, n)] + x[idx(last, last - 1, n)]);
}
