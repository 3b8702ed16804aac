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
//! AVX2 backend, 4 × f64 per instruction

use super::{SimdBackend, AVX2_WIDTH};
use std::arch::x86_64::*;

/// AVX2 backend for x86_64 CPUs
pub struct Avx2Backend;

impl SimdBackend for Avx2Backend {
    fn name(&self) -> &str {
        "AVX2"
    }

    fn width(&self) -> usize {
        AVX2_WIDTH
    }

    fn is_supported(&self) -> bool {
        is_x86_feature_detected!("avx2")
    }

    unsafe fn add_scaled_vectorized(&self, target: &mut [f64], source: &[f64], scale: f64) {
        add_scaled_avx2(target, source, scale);
    }
}

// No FMA: multiply and add round separately, matching the scalar loop.
#[target_feature(enable = "avx2")]
unsafe fn add_scaled_avx2(target: &mut [f64], source: &[f64], scale: f64) {
    let scale_vec = _mm256_set1_pd(scale);

    for (t_chunk, s_chunk) in target
        .chunks_exact_mut(AVX2_WIDTH)
        .zip(source.chunks_exact(AVX2_WIDTH))
    {
        let t = _mm256_loadu_pd(t_chunk.as_ptr());
        let s = _mm256_loadu_pd(s_chunk.as_ptr());
        let scaled = _mm256_mul_pd(s, scale_vec);
        _mm256_storeu_pd(t_chunk.as_mut_ptr(), _mm256_add_pd(t, scaled));
    }
}
