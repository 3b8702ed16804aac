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
//! Force aggregation and time integration
//!
//! [`GravityEngine::simulate`] advances a borrowed collection of planets by a
//! number of fixed sub-steps. Each sub-step computes every pairwise softened
//! gravitational pull from the positions at the start of the sub-step, then
//! applies semi-implicit Euler:
//!
//! ```text
//! v(t + dt) = v(t) + a(t) * dt
//! x(t + dt) = x(t) + v(t + dt) * dt
//! ```
//!
//! After the last sub-step every planet pushes exactly one sample into its
//! trace, so the trace advances once per call regardless of the sub-step
//! count (including zero).
//!
//! # Cost
//!
//! O(n² · iteration) per call. The collection is gathered into dense columns
//! once per call and only the sub-step loop runs on them; see
//! [`DenseState`]. Above [`GravityEngine::parallel_threshold`] bodies the
//! pairwise rows are split across Rayon workers when the `parallel` feature is
//! enabled.

mod dense;
mod kernel;
mod sweep;

pub use dense::DenseState;
pub use kernel::{compute_accelerations, row_acceleration};
pub use sweep::{add_scaled, update_positions, update_velocities};

use crate::body::Body;
use crate::components::Acceleration;
use crate::error::SimError;

/// Global gravitational constant of the simulation
pub const GRAVITY: f64 = 1000.0;

/// Duration of one sub-step
pub const TIME: f64 = 0.001;

/// Added to every squared distance before the inverse cube
pub const SOFTENING: f64 = 1e-10;

/// Body count at which the pairwise rows go parallel by default
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Check `simulate` arguments and convert the sub-step count
///
/// Rejects a negative `iteration` and a non-finite `adjustment`.
pub fn validate_arguments(adjustment: f64, iteration: i64) -> Result<usize, SimError> {
    if !adjustment.is_finite() {
        return Err(SimError::invalid(
            "adjustment",
            format!("must be finite, got {}", adjustment),
        ));
    }
    usize::try_from(iteration).map_err(|_| {
        SimError::invalid(
            "iteration",
            format!("must be non-negative, got {}", iteration),
        )
    })
}

/// N-body gravity integrator with reusable scratch columns
///
/// The engine never holds on to the planets it is given; only the numeric
/// columns survive between calls so they need not be reallocated.
///
/// # Example
///
/// ```
/// use planet_engine::body::Body;
/// use planet_engine::components::{Color, Position, Velocity};
/// use planet_engine::engine::GravityEngine;
///
/// let mut bodies = vec![
///     Body::new("p1", 20.0, Position::new(100.0, 0.0, 0.0), Velocity::new(0.0, 5.0, 0.0), Color::default()),
///     Body::new("p2", 10.0, Position::zero(), Velocity::new(0.0, -10.0, 0.0), Color::default()),
/// ];
///
/// let mut engine = GravityEngine::new();
/// engine.simulate(&mut bodies, 1.0, 10).unwrap();
/// assert_eq!(bodies[0].trace().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GravityEngine {
    state: DenseState,
    parallel_threshold: usize,
}

impl GravityEngine {
    /// Engine with the default parallel threshold
    pub fn new() -> Self {
        Self::with_parallel_threshold(DEFAULT_PARALLEL_THRESHOLD)
    }

    /// Engine that goes parallel at `threshold` bodies or more
    ///
    /// Use `usize::MAX` to force the serial path.
    pub fn with_parallel_threshold(threshold: usize) -> Self {
        GravityEngine {
            state: DenseState::new(),
            parallel_threshold: threshold,
        }
    }

    /// Body count at which the pairwise rows go parallel
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    /// Change the parallel threshold
    pub fn set_parallel_threshold(&mut self, threshold: usize) {
        self.parallel_threshold = threshold;
    }

    fn use_parallel(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && count >= self.parallel_threshold
    }

    /// Advance `bodies` by `iteration` sub-steps of [`TIME`]
    ///
    /// `adjustment` multiplies [`GRAVITY`]; any finite sign or magnitude is
    /// accepted. Arguments are validated before anything is touched, so on
    /// error the collection is unchanged. An empty collection is a no-op.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidArgument`] for a negative `iteration` or a
    /// non-finite `adjustment`.
    pub fn simulate(
        &mut self,
        bodies: &mut [Body],
        adjustment: f64,
        iteration: i64,
    ) -> Result<(), SimError> {
        let steps = validate_arguments(adjustment, iteration)?;
        if bodies.is_empty() {
            return Ok(());
        }

        let scale = adjustment * GRAVITY;
        let parallel = self.use_parallel(bodies.len());

        self.state.gather(bodies);
        for _ in 0..steps {
            self.state.step(scale, TIME, parallel);
        }

        if !self.state.is_finite() {
            log::warn!(
                "Non-finite planet state after {} sub-steps (adjustment {})",
                steps,
                adjustment
            );
        }

        self.state.scatter(bodies);
        for body in bodies.iter_mut() {
            body.update_trace();
        }

        log::debug!(
            "Simulated {} bodies for {} sub-steps (parallel: {})",
            bodies.len(),
            steps,
            parallel
        );
        Ok(())
    }

    /// Acceleration every body currently feels, without moving anything
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidArgument`] for a non-finite `adjustment`.
    pub fn accelerations(
        &mut self,
        bodies: &[Body],
        adjustment: f64,
    ) -> Result<Vec<Acceleration>, SimError> {
        validate_arguments(adjustment, 0)?;
        let parallel = self.use_parallel(bodies.len());

        self.state.gather(bodies);
        self.state.compute_accelerations(adjustment * GRAVITY, parallel);

        let state = &self.state;
        Ok((0..state.len())
            .map(|i| Acceleration::new(state.ax[i], state.ay[i], state.az[i]))
            .collect())
    }
}

impl Default for GravityEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Color, Position, Velocity};

    fn body(id: &str, mass: f64, p: [f64; 3], v: [f64; 3]) -> Body {
        Body::new(id, mass, p.into(), v.into(), Color::default())
    }

    #[test]
    fn test_validate_arguments() {
        assert_eq!(validate_arguments(0.5, 0), Ok(0));
        assert_eq!(validate_arguments(-3.0, 12), Ok(12));
        assert!(matches!(
            validate_arguments(1.0, -1),
            Err(SimError::InvalidArgument { name: "iteration", .. })
        ));
        assert!(matches!(
            validate_arguments(f64::NAN, 1),
            Err(SimError::InvalidArgument { name: "adjustment", .. })
        ));
        assert!(validate_arguments(f64::INFINITY, 1).is_err());
    }

    #[test]
    fn test_negative_iteration_leaves_state_untouched() {
        let mut bodies = vec![body("a", 10.0, [1.0, 2.0, 3.0], [4.0, 5.0, 6.0])];
        let before = bodies.clone();

        let mut engine = GravityEngine::new();
        let result = engine.simulate(&mut bodies, 1.0, -5);

        assert!(result.is_err());
        assert_eq!(bodies, before);
        assert!(bodies[0].trace().is_empty());
    }

    #[test]
    fn test_zero_iterations_only_pushes_trace() {
        let mut bodies = vec![
            body("a", 10.0, [1.0, 2.0, 3.0], [4.0, 5.0, 6.0]),
            body("b", 30.0, [-1.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        ];

        let mut engine = GravityEngine::new();
        engine.simulate(&mut bodies, 1.0, 0).unwrap();

        assert_eq!(bodies[0].position(), Position::new(1.0, 2.0, 3.0));
        assert_eq!(bodies[0].velocity(), Velocity::new(4.0, 5.0, 6.0));
        assert_eq!(bodies[0].trace().len(), 1);
        assert_eq!(bodies[1].trace().latest(), Some(Position::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_empty_collection_is_noop() {
        let mut bodies: Vec<Body> = Vec::new();
        let mut engine = GravityEngine::new();
        assert!(engine.simulate(&mut bodies, 1.0, 100).is_ok());
        assert!(engine.accelerations(&bodies, 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_one_sub_step_by_hand() {
        // Two unit masses 10 apart on x, adjustment 1.
        let mut bodies = vec![
            body("a", 1.0, [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            body("b", 1.0, [10.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
        ];
        let mut engine = GravityEngine::with_parallel_threshold(usize::MAX);
        engine.simulate(&mut bodies, 1.0, 1).unwrap();

        let inv_r3 = (100.0_f64 + SOFTENING).powf(-1.5);
        let a = GRAVITY * (10.0 * inv_r3 * 1.0);
        let v = 0.0 + a * TIME;
        let x = 0.0 + v * TIME;

        assert_eq!(bodies[0].velocity().dx(), v);
        assert_eq!(bodies[0].position().x(), x);
        assert_eq!(bodies[1].velocity().dx(), -v);
    }

    #[test]
    fn test_accelerations_do_not_mutate() {
        let bodies = vec![
            body("a", 100.0, [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
            body("b", 100.0, [0.0, 50.0, 0.0], [0.0, 0.0, 0.0]),
        ];
        let snapshot = bodies.clone();
        let mut engine = GravityEngine::new();
        let acc = engine.accelerations(&bodies, 0.5).unwrap();

        assert_eq!(acc.len(), 2);
        assert!(acc[0].ay() > 0.0);
        assert!(acc[1].ay() < 0.0);
        assert_eq!(bodies, snapshot);
    }

    #[test]
    fn test_parallel_threshold_configuration() {
        let mut engine = GravityEngine::new();
        assert_eq!(engine.parallel_threshold(), DEFAULT_PARALLEL_THRESHOLD);
        engine.set_parallel_threshold(2);
        assert_eq!(engine.parallel_threshold(), 2);
        assert_eq!(engine.use_parallel(3), cfg!(feature = "parallel"));
        assert!(!engine.use_parallel(1));
    }
}
