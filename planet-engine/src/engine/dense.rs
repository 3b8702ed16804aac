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
//! Structure-of-arrays scratch state for one `simulate` call
//!
//! Bodies are gathered into contiguous columns once per call, all sub-steps
//! run on the columns, and the result is scattered back. Index `i` in every
//! column is the body at index `i` of the borrowed slice, so the slice must
//! not be reordered between gather and scatter.
//!
//! The columns are owned by the engine and reused across calls; only their
//! length changes with the body count.

use super::kernel;
use super::sweep::{update_positions, update_velocities};
use crate::body::Body;
use crate::components::{Position, Velocity};

/// Dense per-axis columns of the collection being simulated
#[derive(Debug, Clone, Default)]
pub struct DenseState {
    pub(crate) px: Vec<f64>,
    pub(crate) py: Vec<f64>,
    pub(crate) pz: Vec<f64>,
    pub(crate) vx: Vec<f64>,
    pub(crate) vy: Vec<f64>,
    pub(crate) vz: Vec<f64>,
    pub(crate) mass: Vec<f64>,
    pub(crate) ax: Vec<f64>,
    pub(crate) ay: Vec<f64>,
    pub(crate) az: Vec<f64>,
}

impl DenseState {
    /// Empty scratch state
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bodies currently gathered
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    /// True when nothing is gathered
    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }

    /// Copy positions, velocities and masses out of `bodies`
    ///
    /// Acceleration columns are resized and zeroed.
    pub fn gather(&mut self, bodies: &[Body]) {
        let n = bodies.len();
        for column in self.columns_mut() {
            column.clear();
            column.reserve(n);
        }

        for body in bodies {
            let p = body.position();
            let v = body.velocity();
            self.px.push(p.x());
            self.py.push(p.y());
            self.pz.push(p.z());
            self.vx.push(v.dx());
            self.vy.push(v.dy());
            self.vz.push(v.dz());
            self.mass.push(body.mass());
        }

        self.ax.resize(n, 0.0);
        self.ay.resize(n, 0.0);
        self.az.resize(n, 0.0);
    }

    /// Write positions and velocities back into `bodies`
    ///
    /// `bodies` must be the slice passed to the last [`gather`](Self::gather).
    pub fn scatter(&self, bodies: &mut [Body]) {
        debug_assert_eq!(bodies.len(), self.len());
        for (i, body) in bodies.iter_mut().enumerate() {
            body.set_position(Position::new(self.px[i], self.py[i], self.pz[i]));
            body.set_velocity(Velocity::new(self.vx[i], self.vy[i], self.vz[i]));
        }
    }

    /// Fill the acceleration columns from the current positions
    pub fn compute_accelerations(&mut self, scale: f64, parallel: bool) {
        kernel::compute_accelerations(
            [&self.px[..], &self.py[..], &self.pz[..]],
            &self.mass,
            [&mut self.ax[..], &mut self.ay[..], &mut self.az[..]],
            scale,
            parallel,
        );
    }

    /// One semi-implicit Euler sub-step: accelerations, then velocities, then
    /// positions from the new velocities
    pub fn step(&mut self, scale: f64, dt: f64, parallel: bool) {
        self.compute_accelerations(scale, parallel);
        update_velocities(
            &mut self.vx,
            &mut self.vy,
            &mut self.vz,
            &self.ax,
            &self.ay,
            &self.az,
            dt,
        );
        update_positions(
            &mut self.px,
            &mut self.py,
            &mut self.pz,
            &self.vx,
            &self.vy,
            &self.vz,
            dt,
        );
    }

    /// Check every gathered position and velocity is finite
    pub fn is_finite(&self) -> bool {
        [&self.px, &self.py, &self.pz, &self.vx, &self.vy, &self.vz]
            .iter()
            .all(|column| column.iter().all(|value| value.is_finite()))
    }

    fn columns_mut(&mut self) -> [&mut Vec<f64>; 10] {
        [
            &mut self.px,
            &mut self.py,
            &mut self.pz,
            &mut self.vx,
            &mut self.vy,
            &mut self.vz,
            &mut self.mass,
            &mut self.ax,
            &mut self.ay,
            &mut self.az,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Color;

    fn body(id: &str, mass: f64, p: [f64; 3], v: [f64; 3]) -> Body {
        Body::new(id, mass, p.into(), v.into(), Color::default())
    }

    #[test]
    fn test_gather_scatter_round_trip() {
        let mut bodies = vec![
            body("a", 20.0, [100.0, 0.0, 0.0], [0.0, 5.0, 0.0]),
            body("b", 10.0, [0.0, 0.0, 0.0], [0.0, -10.0, 0.0]),
        ];
        let original = bodies.clone();

        let mut state = DenseState::new();
        state.gather(&bodies);
        assert_eq!(state.len(), 2);
        assert_eq!(state.mass, vec![20.0, 10.0]);
        assert_eq!(state.ax, vec![0.0, 0.0]);

        state.scatter(&mut bodies);
        assert_eq!(bodies, original);
    }

    #[test]
    fn test_gather_reuses_columns() {
        let mut state = DenseState::new();
        state.gather(&[body("a", 1.0, [1.0; 3], [0.0; 3]), body("b", 1.0, [2.0; 3], [0.0; 3])]);
        state.gather(&[body("c", 3.0, [5.0; 3], [1.0; 3])]);

        assert_eq!(state.len(), 1);
        assert_eq!(state.px, vec![5.0]);
        assert_eq!(state.vz, vec![1.0]);
        assert_eq!(state.ax.len(), 1);
    }

    #[test]
    fn test_step_is_semi_implicit() {
        // A lone body feels no force, so one step moves it by v * dt exactly.
        let mut state = DenseState::new();
        state.gather(&[body("a", 50.0, [1.0, 2.0, 3.0], [10.0, 0.0, -20.0])]);
        state.step(1000.0, 0.5, false);

        assert_eq!(state.ax, vec![0.0]);
        assert_eq!(state.vx, vec![10.0]);
        assert_eq!(state.px, vec![6.0]);
        assert_eq!(state.pz, vec![-7.0]);
        assert!(state.is_finite());
    }

    #[test]
    fn test_empty_state() {
        let mut state = DenseState::new();
        state.gather(&[]);
        assert!(state.is_empty());
        state.step(1.0, 0.001, false);
        assert!(state.is_finite());
    }
}
