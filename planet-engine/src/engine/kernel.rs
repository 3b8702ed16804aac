// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! All-pairs softened gravity
//!
//! For body `i` the acceleration along each axis is
//!
//! ```text
//! a_i = scale * Σ_j d_ij * (|d_ij|² + ε)^(-3/2) * m_j,    d_ij = p_j - p_i
//! ```
//!
//! where `scale = adjustment * GRAVITY`. The sum runs over every `j`
//! including `j = i`; the self term has `d_ii = 0` and a finite softened
//! inverse cube, so it contributes exactly zero. Coincident distinct bodies
//! are handled the same way.
//!
//! Rows are independent. The parallel path hands whole rows to Rayon workers
//! and each row is summed in the same order as the serial path, so both give
//! bit-identical columns. The call returns only once every row is written.

use super::SOFTENING;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Acceleration of body `i` from every body in the columns
#[inline]
pub fn row_acceleration(i: usize, positions: [&[f64]; 3], mass: &[f64], scale: f64) -> [f64; 3] {
    let [px, py, pz] = positions;
    let (xi, yi, zi) = (px[i], py[i], pz[i]);
    let (mut sx, mut sy, mut sz) = (0.0, 0.0, 0.0);

    for (((&xj, &yj), &zj), &mj) in px.iter().zip(py).zip(pz).zip(mass) {
        let dx = xj - xi;
        let dy = yj - yi;
        let dz = zj - zi;
        let inv_r3 = (dx * dx + dy * dy + dz * dz + SOFTENING).powf(-1.5);
        sx += dx * inv_r3 * mj;
        sy += dy * inv_r3 * mj;
        sz += dz * inv_r3 * mj;
    }

    [scale * sx, scale * sy, scale * sz]
}

/// Write the acceleration of every body into the acceleration columns
///
/// `parallel` is ignored when the `parallel` feature is disabled.
pub fn compute_accelerations(
    positions: [&[f64]; 3],
    mass: &[f64],
    accelerations: [&mut [f64]; 3],
    scale: f64,
    parallel: bool,
) {
    let [ax, ay, az] = accelerations;

    #[cfg(feature = "parallel")]
    {
        if parallel {
            ax.par_iter_mut()
                .zip(ay.par_iter_mut())
                .zip(az.par_iter_mut())
                .enumerate()
                .for_each(|(i, ((ax, ay), az))| {
                    [*ax, *ay, *az] = row_acceleration(i, positions, mass, scale);
                });
            return;
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for (i, ((ax, ay), az)) in ax.iter_mut().zip(ay.iter_mut()).zip(az.iter_mut()).enumerate() {
        [*ax, *ay, *az] = row_acceleration(i, positions, mass, scale);
    }
}
