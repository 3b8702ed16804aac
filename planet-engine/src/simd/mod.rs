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
//! SIMD vectorization for the integration sweeps
//!
//! Both halves of a semi-implicit Euler sub-step are the same operation on
//! contiguous `f64` columns: `target += source * scale` (velocities from
//! accelerations, then positions from velocities). This module provides that
//! operation as an AVX2 kernel with runtime CPU detection and a scalar
//! fallback.
//!
//! # Determinism
//!
//! The vector path issues a separate multiply and add per lane, exactly like
//! the scalar loop, so both produce bit-identical columns. A run never
//! depends on which CPU it happened to execute on.

mod dispatch;
mod scalar;

#[cfg(target_arch = "x86_64")]
mod avx2;

use std::sync::OnceLock;

pub use dispatch::{detect_cpu_features, has_avx2, CpuFeatures};
pub use scalar::ScalarBackend;

#[cfg(target_arch = "x86_64")]
pub use avx2::Avx2Backend;

/// Number of f64 lanes in a 256-bit AVX2 register
pub const AVX2_WIDTH: usize = 4;

/// Vectorized column arithmetic used by the integrator
pub trait SimdBackend: Send + Sync {
    /// Name of this backend
    fn name(&self) -> &str;

    /// Number of f64 values processed per instruction
    fn width(&self) -> usize;

    /// Check if this backend can run on the current CPU
    fn is_supported(&self) -> bool;

    /// `target[i] += source[i] * scale` over full `width()` chunks
    ///
    /// # Safety
    ///
    /// - `target` and `source` must have the same length
    /// - Only full chunks are processed; the caller handles the remainder
    /// - Caller must ensure the CPU supports the required instructions
    unsafe fn add_scaled_vectorized(&self, target: &mut [f64], source: &[f64], scale: f64);
}

static BACKEND: OnceLock<&'static dyn SimdBackend> = OnceLock::new();

/// Best backend for this CPU, detected once and cached
pub fn select_backend() -> &'static dyn SimdBackend {
    *BACKEND.get_or_init(|| -> &'static dyn SimdBackend {
        #[cfg(target_arch = "x86_64")]
        {
            if has_avx2() && Avx2Backend.is_supported() {
                log::debug!("SIMD backend: AVX2");
                return &Avx2Backend;
            }
        }
        log::debug!("SIMD backend: scalar");
        &ScalarBackend
    })
}
