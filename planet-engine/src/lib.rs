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
//! # Planet Engine
//!
//! An N-body planet simulation kernel: pairwise softened gravity,
//! semi-implicit Euler integration, a bounded position trace per planet and
//! a destruction zone around the diagonal through the origin.
//!
//! ## Features
//!
//! - **Gravity kernel**: O(n²) softened pull over dense per-axis columns
//! - **Parallelization**: Optional Rayon row split (`parallel`, on by default),
//!   bit-identical to the serial path
//! - **SIMD**: Optional AVX2 integration sweeps (`simd`) with runtime detection
//! - **Persistence**: TOML save/restore that round-trips every float exactly
//!
//! ## Example
//!
//! ```rust
//! use planet_engine::{PlanetSystem, SimulationConfig};
//!
//! let mut system = PlanetSystem::with_default_scene(SimulationConfig::default());
//! system.simulate(1.0, 10).unwrap();
//!
//! for body in system.bodies() {
//!     assert_eq!(body.trace().len(), 1);
//! }
//! ```

#![warn(missing_docs)]

/// Planets, default names and random construction
pub mod body;

/// Position, velocity, acceleration and colour values
pub mod components;

/// Per-tick driver settings
pub mod config;

/// Destruction zone test
pub mod destruction;

/// Force aggregation and time integration
pub mod engine;

/// Error types
pub mod error;

/// TOML persistence of planet collections
pub mod storage;

/// Collection driver
pub mod system;

/// Bounded position history
pub mod trace;

/// SIMD vectorization support
#[cfg(feature = "simd")]
pub mod simd;

pub use body::{Body, BodyBuilder, NameSequence};
pub use config::SimulationConfig;
pub use engine::GravityEngine;
pub use error::{SimError, StorageError};
pub use system::{BodyField, PlanetSystem};
