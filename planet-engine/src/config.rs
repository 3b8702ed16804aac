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
//! Driver-side simulation settings
//!
//! [`SimulationConfig`] holds the per-tick parameters a viewer would
//! otherwise read from its sliders and toggles. It can be built in code with
//! the `with_*` methods or loaded from a TOML file; keys missing from the
//! file keep their defaults.
//!
//! ```toml
//! adjustment = 0.5
//! iterations_per_tick = 20
//! parallel_threshold = 128
//! destruction_enabled = true
//! running = true
//! seed = 42
//! ```

use crate::engine::{validate_arguments, DEFAULT_PARALLEL_THRESHOLD};
use crate::error::{SimError, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Per-tick parameters for [`PlanetSystem::tick`](crate::system::PlanetSystem::tick)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Gravity multiplier passed to the engine
    pub adjustment: f64,
    /// Sub-steps per tick
    pub iterations_per_tick: i64,
    /// Body count at which force rows are computed in parallel
    pub parallel_threshold: usize,
    /// Run the destruction test after every tick
    pub destruction_enabled: bool,
    /// Ticks are skipped while false
    pub running: bool,
    /// Seed for randomly generated planets, entropy when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            adjustment: 1.0,
            iterations_per_tick: 10,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            destruction_enabled: false,
            running: true,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gravity multiplier
    pub fn with_adjustment(mut self, adjustment: f64) -> Self {
        self.adjustment = adjustment;
        self
    }

    /// Set the number of sub-steps per tick
    pub fn with_iterations_per_tick(mut self, iterations: i64) -> Self {
        self.iterations_per_tick = iterations;
        self
    }

    /// Set the parallel threshold
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Enable the destruction test on every tick
    pub fn with_destruction(mut self) -> Self {
        self.destruction_enabled = true;
        self
    }

    /// Fix the seed for generated planets
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the settings are usable by the engine
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidArgument`] for negative iterations or a non-finite
    /// adjustment.
    pub fn validate(&self) -> Result<(), SimError> {
        validate_arguments(self.adjustment, self.iterations_per_tick).map(|_| ())
    }

    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// [`StorageError::Corrupt`] if the text is not valid TOML for this type
    /// or fails [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self, StorageError> {
        let config: SimulationConfig = toml::from_str(text)?;
        config
            .validate()
            .map_err(|err| StorageError::Corrupt(err.to_string()))?;
        Ok(config)
    }

    /// Load settings from a TOML file
    ///
    /// # Errors
    ///
    /// [`StorageError::Unavailable`] if the file cannot be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| StorageError::Unavailable {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded simulation config from {}", path.display());
        Ok(config)
    }

    /// Render the settings as TOML
    ///
    /// # Errors
    ///
    /// [`StorageError::Corrupt`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, StorageError> {
        Ok(toml::to_string_pretty(self)?)
    }
}
