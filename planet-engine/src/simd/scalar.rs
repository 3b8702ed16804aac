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
//! Scalar reference backend

use super::SimdBackend;

/// One element at a time; available everywhere
pub struct ScalarBackend;

impl SimdBackend for ScalarBackend {
    fn name(&self) -> &str {
        "Scalar"
    }

    fn width(&self) -> usize {
        1
    }

    fn is_supported(&self) -> bool {
        true
    }

    unsafe fn add_scaled_vectorized(&self, target: &mut [f64], source: &[f64], scale: f64) {
        for (t, s) in target.iter_mut().zip(source) {
            *t += *s * scale;
        }
    }
}
