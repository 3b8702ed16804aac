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
//! Planet collection driver
//!
//! [`PlanetSystem`] owns everything a front end needs between frames: the
//! planets, the engine and its scratch columns, the default-name sequence
//! and the per-tick settings. A viewer calls [`PlanetSystem::tick`] once per
//! frame and reads [`PlanetSystem::bodies`] to draw.

use crate::body::{random_body, Body, NameSequence};
use crate::components::{Color, Position, Velocity};
use crate::config::SimulationConfig;
use crate::destruction;
use crate::engine::GravityEngine;
use crate::error::{SimError, StorageError};
use crate::storage;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt;
use std::path::Path;

/// A single editable field of a planet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyField {
    /// Identifier
    Id,
    /// Mass (radius follows)
    Mass,
    /// Position x
    PosX,
    /// Position y
    PosY,
    /// Position z
    PosZ,
    /// Velocity x
    VelX,
    /// Velocity y
    VelY,
    /// Velocity z
    VelZ,
}

impl BodyField {
    /// Every field in table column order
    pub const ALL: [BodyField; 8] = [
        BodyField::Id,
        BodyField::Mass,
        BodyField::PosX,
        BodyField::PosY,
        BodyField::PosZ,
        BodyField::VelX,
        BodyField::VelY,
        BodyField::VelZ,
    ];

    /// Short label for the field
    pub fn name(&self) -> &'static str {
        match self {
            BodyField::Id => "id",
            BodyField::Mass => "mass",
            BodyField::PosX => "x",
            BodyField::PosY => "y",
            BodyField::PosZ => "z",
            BodyField::VelX => "vx",
            BodyField::VelY => "vy",
            BodyField::VelZ => "vz",
        }
    }

    /// Current value of the field rendered as text
    pub fn read(&self, body: &Body) -> String {
        match self {
            BodyField::Id => body.id().to_string(),
            BodyField::Mass => body.mass().to_string(),
            BodyField::PosX => body.position().x().to_string(),
            BodyField::PosY => body.position().y().to_string(),
            BodyField::PosZ => body.position().z().to_string(),
            BodyField::VelX => body.velocity().dx().to_string(),
            BodyField::VelY => body.velocity().dy().to_string(),
            BodyField::VelZ => body.velocity().dz().to_string(),
        }
    }
}

impl fmt::Display for BodyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Planets plus the machinery to advance them
///
/// Random planets are drawn from a generator owned by the system, seeded
/// from [`SimulationConfig::seed`] or from entropy when no seed is set.
#[derive(Debug, Clone)]
pub struct PlanetSystem {
    bodies: Vec<Body>,
    engine: GravityEngine,
    names: NameSequence,
    rng: StdRng,
    config: SimulationConfig,
    ticks: u64,
}

impl PlanetSystem {
    /// Empty system
    pub fn new(config: SimulationConfig) -> Self {
        let engine = GravityEngine::with_parallel_threshold(config.parallel_threshold);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        PlanetSystem {
            bodies: Vec::new(),
            engine,
            names: NameSequence::new(),
            rng,
            config,
            ticks: 0,
        }
    }

    /// System holding the three-planet start scene
    ///
    /// `p1` (mass 20, red) orbits around `p2` (mass 10, green) in the xy
    /// plane while `p3` (mass 10, blue) drifts along z.
    pub fn with_default_scene(config: SimulationConfig) -> Self {
        let mut system = Self::new(config);
        let scene = [
            (20.0, [100.0, 0.0, 0.0], [0.0, 5.0, 0.0], [1.0, 0.0, 0.0]),
            (10.0, [0.0, 0.0, 0.0], [0.0, -10.0, 0.0], [0.0, 1.0, 0.0]),
            (10.0, [100.0, 0.0, 100.0], [0.0, 0.0, 3.0], [0.0, 0.0, 1.0]),
        ];
        for (mass, position, velocity, color) in scene {
            let id = system.names.next_name();
            system.add_body(Body::new(
                id,
                mass,
                Position::from_array(position),
                Velocity::from_array(velocity),
                Color::from_array(color),
            ));
        }
        system
    }

    /// Per-tick settings
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Mutable per-tick settings, picked up by the next tick
    pub fn config_mut(&mut self) -> &mut SimulationConfig {
        &mut self.config
    }

    /// Pause or resume [`tick`](Self::tick)
    pub fn set_running(&mut self, running: bool) {
        self.config.running = running;
    }

    /// Number of ticks that actually advanced the simulation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Default-name sequence used by [`add_random_body`](Self::add_random_body)
    pub fn names(&self) -> &NameSequence {
        &self.names
    }

    /// Append a planet
    pub fn add_body(&mut self, body: Body) {
        log::debug!("Added planet {}", body.id());
        self.bodies.push(body);
    }

    /// Append a fully random planet and return it
    pub fn add_random_body(&mut self) -> &Body {
        let body = random_body(&mut self.rng, &mut self.names);
        self.add_body(body);
        let last = self.bodies.len() - 1;
        &self.bodies[last]
    }

    /// Remove and return the planet at `index`
    ///
    /// # Errors
    ///
    /// [`SimError::IndexOutOfRange`] if `index` is past the end.
    pub fn remove_body(&mut self, index: usize) -> Result<Body, SimError> {
        self.check_index(index)?;
        let body = self.bodies.remove(index);
        log::debug!("Removed planet {}", body.id());
        Ok(body)
    }

    /// Planet at `index`
    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    /// All planets in collection order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// All planets, mutably
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Number of planets
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// True when there are no planets
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Swap in a new collection and return the old one
    pub fn replace_bodies(&mut self, bodies: Vec<Body>) -> Vec<Body> {
        std::mem::replace(&mut self.bodies, bodies)
    }

    /// Overwrite one field of the planet at `index` from text
    ///
    /// Numeric fields accept any finite value `f64` parses, surrounding
    /// whitespace ignored. On error nothing is changed.
    ///
    /// # Errors
    ///
    /// [`SimError::IndexOutOfRange`] for a bad index,
    /// [`SimError::InvalidArgument`] for an empty id, an unparsable number or
    /// NaN/infinity.
    pub fn set_field(&mut self, index: usize, field: BodyField, text: &str) -> Result<(), SimError> {
        self.check_index(index)?;
        let text = text.trim();

        if field == BodyField::Id {
            if text.is_empty() {
                return Err(SimError::invalid("id", "must not be empty"));
            }
            self.bodies[index].set_id(text);
            return Ok(());
        }

        let value: f64 = text.parse().map_err(|_| {
            SimError::invalid(field.name(), format!("`{}` is not a number", text))
        })?;
        if !value.is_finite() {
            return Err(SimError::invalid(
                field.name(),
                format!("must be finite, got {}", value),
            ));
        }

        let body = &mut self.bodies[index];
        match field {
            BodyField::Id => {}
            BodyField::Mass => body.set_mass(value),
            BodyField::PosX => body.position_mut().set_x(value),
            BodyField::PosY => body.position_mut().set_y(value),
            BodyField::PosZ => body.position_mut().set_z(value),
            BodyField::VelX => body.velocity_mut().set_dx(value),
            BodyField::VelY => body.velocity_mut().set_dy(value),
            BodyField::VelZ => body.velocity_mut().set_dz(value),
        }
        Ok(())
    }

    /// Advance every planet; see [`GravityEngine::simulate`]
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidArgument`] for a negative `iteration` or a
    /// non-finite `adjustment`.
    pub fn simulate(&mut self, adjustment: f64, iteration: i64) -> Result<(), SimError> {
        self.engine
            .set_parallel_threshold(self.config.parallel_threshold);
        self.engine.simulate(&mut self.bodies, adjustment, iteration)
    }

    /// Remove every planet inside the destruction zone and return them
    pub fn apply_destruction(&mut self) -> Vec<Body> {
        destruction::apply_destruction(&mut self.bodies)
    }

    /// Run one frame with the configured settings
    ///
    /// Does nothing while paused or empty. Otherwise simulates
    /// `iterations_per_tick` sub-steps and, if enabled, runs the destruction
    /// test. Returns the planets destroyed during this tick.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidArgument`] if the configuration is invalid.
    pub fn tick(&mut self) -> Result<Vec<Body>, SimError> {
        if !self.config.running || self.bodies.is_empty() {
            return Ok(Vec::new());
        }

        let adjustment = self.config.adjustment;
        let iterations = self.config.iterations_per_tick;
        self.simulate(adjustment, iterations)?;
        self.ticks += 1;

        if self.config.destruction_enabled {
            Ok(self.apply_destruction())
        } else {
            Ok(Vec::new())
        }
    }

    /// Write the collection to `path`
    ///
    /// # Errors
    ///
    /// See [`storage::save`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        storage::save(path, &self.bodies)
    }

    /// Replace the collection with the one stored at `path`
    ///
    /// On error the current collection is kept.
    ///
    /// # Errors
    ///
    /// See [`storage::load`].
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), StorageError> {
        let bodies = storage::load(path)?;
        self.bodies = bodies;
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), SimError> {
        if index < self.bodies.len() {
            Ok(())
        } else {
            Err(SimError::IndexOutOfRange {
                index,
                len: self.bodies.len(),
            })
        }
    }
}

impl Default for PlanetSystem {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
