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
//! Planets and how they are constructed
//!
//! A [`Body`] is a point mass with an identifier, a colour, a radius derived
//! from its mass, and a [`Trace`] of recent positions. Bodies are built with
//! [`BodyBuilder`]; any field left unset is drawn from an injected random
//! source so that runs stay reproducible under a fixed seed.
//!
//! # Mass precondition
//!
//! Mass is expected to be non-negative. It is not enforced: a zero, negative
//! or non-finite mass does not panic, it only yields a degenerate radius and
//! degenerate forces on the other bodies.

use crate::components::{Color, Position, Velocity};
use crate::trace::Trace;
use rand::Rng;

/// Divisor turning mass into radius
pub const RADIUS_DIVISOR: f64 = 20.0;

/// Upper bound (exclusive) of a randomly drawn mass
pub const RANDOM_MASS_MAX: f64 = 1000.0;

/// Half-width of the cube random positions are drawn from
pub const RANDOM_POSITION_EXTENT: f64 = 1000.0;

/// Half-width of the cube random velocities are drawn from
pub const RANDOM_VELOCITY_EXTENT: f64 = 250.0;

/// A simulated planet
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: String,
    mass: f64,
    radius: f64,
    position: Position,
    velocity: Velocity,
    color: Color,
    trace: Trace,
}

impl Body {
    /// Create a body from fully specified state
    ///
    /// The radius is derived from `mass` and the trace starts empty.
    pub fn new(
        id: impl Into<String>,
        mass: f64,
        position: Position,
        velocity: Velocity,
        color: Color,
    ) -> Self {
        Body {
            id: id.into(),
            mass,
            radius: mass / RADIUS_DIVISOR,
            position,
            velocity,
            color,
            trace: Trace::new(),
        }
    }

    /// Identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Rename the body
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Change the mass and recompute the radius
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
        self.radius = mass / RADIUS_DIVISOR;
    }

    /// Radius, always `mass / 20`
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Mutable access to the position
    pub fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    /// Replace the position
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Current velocity
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Mutable access to the velocity
    pub fn velocity_mut(&mut self) -> &mut Velocity {
        &mut self.velocity
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    /// Colour metadata
    pub fn color(&self) -> Color {
        self.color
    }

    /// Replace the colour
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Recent positions, oldest first when iterated
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Record the current position in the trace
    pub fn update_trace(&mut self) {
        self.trace.push(self.position);
    }

    /// Check that position and velocity are finite
    pub fn is_finite(&self) -> bool {
        self.position.is_valid() && self.velocity.is_valid()
    }
}

/// Source of default identifiers `p1`, `p2`, ...
///
/// Owned by whoever creates bodies; there is no process-wide counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameSequence {
    next: u64,
}

impl NameSequence {
    /// Sequence whose first name is `p1`
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Sequence whose first name is `p{first}`
    pub fn starting_at(first: u64) -> Self {
        NameSequence { next: first }
    }

    /// Number the next call to [`next_name`](Self::next_name) will use
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Consume one number without producing a name
    pub fn advance(&mut self) -> u64 {
        let current = self.next;
        self.next += 1;
        current
    }

    /// Produce the next default name
    pub fn next_name(&mut self) -> String {
        format!("p{}", self.advance())
    }
}

impl Default for NameSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Body`] with random defaults for unset fields
///
/// Every build consumes one number from the [`NameSequence`], whether or not
/// an explicit id was supplied, so the numbering of default names reflects
/// how many bodies were created.
///
/// # Examples
///
/// ```
/// use planet_engine::body::{BodyBuilder, NameSequence};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut names = NameSequence::new();
///
/// let body = BodyBuilder::new().mass(40.0).build(&mut rng, &mut names);
/// assert_eq!(body.id(), "p1");
/// assert_eq!(body.radius(), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BodyBuilder {
    id: Option<String>,
    mass: Option<f64>,
    position: Option<Position>,
    velocity: Option<Velocity>,
    color: Option<Color>,
}

impl BodyBuilder {
    /// Builder with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an explicit identifier
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Use an explicit mass
    pub fn mass(mut self, mass: f64) -> Self {
        self.mass = Some(mass);
        self
    }

    /// Use an explicit position
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Use an explicit velocity
    pub fn velocity(mut self, velocity: Velocity) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Use an explicit colour
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Build the body, drawing unset fields from `rng`
    ///
    /// Draw order is fixed (mass, position, velocity, colour) and only unset
    /// fields consume random numbers.
    pub fn build<R: Rng + ?Sized>(self, rng: &mut R, names: &mut NameSequence) -> Body {
        let number = names.advance();
        let id = self.id.unwrap_or_else(|| format!("p{}", number));
        let mass = self
            .mass
            .unwrap_or_else(|| rng.gen::<f64>() * RANDOM_MASS_MAX);
        let position = self
            .position
            .unwrap_or_else(|| Position::from_array(random_cube(rng, RANDOM_POSITION_EXTENT)));
        let velocity = self
            .velocity
            .unwrap_or_else(|| Velocity::from_array(random_cube(rng, RANDOM_VELOCITY_EXTENT)));
        let color = self
            .color
            .unwrap_or_else(|| Color::new(rng.gen(), rng.gen(), rng.gen()));

        Body::new(id, mass, position, velocity, color)
    }
}

/// Build a body with every field randomised
pub fn random_body<R: Rng + ?Sized>(rng: &mut R, names: &mut NameSequence) -> Body {
    BodyBuilder::new().build(rng, names)
}

// Uniform in [-extent, extent) per axis.
fn random_cube<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> [f64; 3] {
    let mut draw = || rng.gen::<f64>() * (2.0 * extent) - extent;
    [draw(), draw(), draw()]
}
