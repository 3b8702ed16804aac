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
//! CPU feature detection
//!
//! Results are cached for the lifetime of the process.

use std::sync::OnceLock;

/// CPU features relevant to the integration sweeps
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuFeatures {
    /// CPU supports AVX (256-bit float registers)
    pub has_avx: bool,
    /// CPU supports AVX2
    pub has_avx2: bool,
}

impl CpuFeatures {
    /// The AVX2 sweep needs both the AVX register file and AVX2
    pub fn supports_avx2_sweep(&self) -> bool {
        self.has_avx && self.has_avx2
    }
}

static CPU_FEATURES: OnceLock<CpuFeatures> = OnceLock::new();

/// Detect CPU features once via CPUID
pub fn detect_cpu_features() -> CpuFeatures {
    *CPU_FEATURES.get_or_init(detect_cpu_features_impl)
}

#[cfg(target_arch = "x86_64")]
fn detect_cpu_features_impl() -> CpuFeatures {
    use raw_cpuid::CpuId;

    let cpuid = CpuId::new();
    let mut features = CpuFeatures::default();

    if let Some(info) = cpuid.get_feature_info() {
        features.has_avx = info.has_avx();
    }
    if let Some(extended) = cpuid.get_extended_feature_info() {
        features.has_avx2 = extended.has_avx2();
    }

    features
}

#[cfg(not(target_arch = "x86_64"))]
fn detect_cpu_features_impl() -> CpuFeatures {
    CpuFeatures::default()
}

/// Check if the current CPU can run the AVX2 sweep
pub fn has_avx2() -> bool {
    detect_cpu_features().supports_avx2_sweep()
}
