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
//! Column sweeps for semi-implicit Euler
//!
//! With the `simd` feature the full-width part of each column goes through
//! the selected [`SimdBackend`](crate::simd::SimdBackend) and the remainder
//! through the scalar loop. Without it everything is scalar.

#[cfg(feature = "simd")]
use crate::simd::select_backend;

/// `target[i] += source[i] * scale` for one column
#[cfg_attr(not(feature = "simd"), allow(unused_mut))]
pub fn add_scaled(target: &mut [f64], source: &[f64], scale: f64) {
    debug_assert_eq!(target.len(), source.len());
    let mut done = 0;

    #[cfg(feature = "simd")]
    {
        let backend = select_backend();
        let width = backend.width();
        done = (target.len() / width) * width;
        if done > 0 {
            // SAFETY: equal lengths, backend selected for this CPU.
            unsafe {
                backend.add_scaled_vectorized(&mut target[..done], &source[..done], scale);
            }
        }
    }

    for (t, s) in target[done..].iter_mut().zip(&source[done..]) {
        *t += *s * scale;
    }
}

/// Velocity update: `v' = v + a * dt`
pub fn update_velocities(
    vx: &mut [f64],
    vy: &mut [f64],
    vz: &mut [f64],
    ax: &[f64],
    ay: &[f64],
    az: &[f64],
    dt: f64,
) {
    add_scaled(vx, ax, dt);
    add_scaled(vy, ay, dt);
    add_scaled(vz, az, dt);
}

/// Position update from the already updated velocity: `p' = p + v' * dt`
pub fn update_positions(
    px: &mut [f64],
    py: &mut [f64],
    pz: &mut [f64],
    vx: &[f64],
    vy: &[f64],
    vz: &[f64],
    dt: f64,
) {
    add_scaled(px, vx, dt);
    add_scaled(py, vy, dt);
    add_scaled(pz, vz, dt);
}
