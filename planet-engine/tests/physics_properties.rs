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
//! Integration tests for the physical properties of `simulate`

use planet_engine::body::{random_body, Body, NameSequence};
use planet_engine::components::{Color, Position, Velocity};
use planet_engine::engine::{GravityEngine, TIME};
use planet_engine::trace::MAX_TRACE;
use planet_engine::SimError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn planet(id: &str, mass: f64, p: [f64; 3], v: [f64; 3]) -> Body {
    Body::new(id, mass, p.into(), v.into(), Color::default())
}

fn random_planets(count: usize, seed: u64) -> Vec<Body> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut names = NameSequence::new();
    (0..count).map(|_| random_body(&mut rng, &mut names)).collect()
}

fn assert_bitwise_eq(a: &[Body], b: &[Body]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(b) {
        for (p, q) in x.position().as_array().iter().zip(y.position().as_array()) {
            assert_eq!(p.to_bits(), q.to_bits(), "position of {}", x.id());
        }
        for (p, q) in x.velocity().as_array().iter().zip(y.velocity().as_array()) {
            assert_eq!(p.to_bits(), q.to_bits(), "velocity of {}", x.id());
        }
    }
}

#[test]
fn test_single_body_feels_no_force() {
    for adjustment in [0.0, 1.0, -7.5, 250.0] {
        let mut bodies = vec![planet("solo", 500.0, [12.0, -3.0, 40.0], [1.5, 0.0, -2.0])];
        let mut engine = GravityEngine::new();
        engine.simulate(&mut bodies, adjustment, 25).unwrap();

        // Velocity is untouched; position drifts by exactly v * TIME per sub-step.
        let mut expected = [12.0, -3.0, 40.0];
        let v = [1.5, 0.0, -2.0];
        for _ in 0..25 {
            for axis in 0..3 {
                expected[axis] += v[axis] * TIME;
            }
        }

        assert_eq!(bodies[0].velocity(), Velocity::new(1.5, 0.0, -2.0));
        assert_eq!(bodies[0].position(), Position::from_array(expected));
    }
}

#[test]
fn test_single_body_at_rest_stays_put() {
    let mut bodies = vec![planet("rest", 80.0, [5.0, 5.0, -5.0], [0.0, 0.0, 0.0])];
    let mut engine = GravityEngine::new();
    engine.simulate(&mut bodies, 3.0, 1000).unwrap();

    assert_eq!(bodies[0].position(), Position::new(5.0, 5.0, -5.0));
    assert_eq!(bodies[0].velocity(), Velocity::zero());
}

#[test]
fn test_two_equal_bodies_accelerate_symmetrically() {
    let bodies = vec![
        planet("a", 30.0, [-40.0, 10.0, 5.0], [0.0, 0.0, 0.0]),
        planet("b", 30.0, [40.0, -10.0, -5.0], [0.0, 0.0, 0.0]),
    ];
    let mut engine = GravityEngine::new();
    let acc = engine.accelerations(&bodies, 1.0).unwrap();

    assert_eq!(acc[0].magnitude(), acc[1].magnitude());
    for axis in 0..3 {
        assert_eq!(acc[0].as_array()[axis], -acc[1].as_array()[axis]);
    }
    // Pulled towards each other.
    assert!(acc[0].ax() > 0.0);
    assert!(acc[1].ax() < 0.0);
}

#[test]
fn test_symmetric_pair_stays_symmetric() {
    let mut bodies = vec![
        planet("a", 30.0, [-40.0, 10.0, 5.0], [0.0, 3.0, 0.0]),
        planet("b", 30.0, [40.0, -10.0, -5.0], [0.0, -3.0, 0.0]),
    ];
    let mut engine = GravityEngine::new();
    for _ in 0..20 {
        engine.simulate(&mut bodies, 1.0, 10).unwrap();
    }

    let p0 = bodies[0].position().as_array();
    let p1 = bodies[1].position().as_array();
    for axis in 0..3 {
        assert_eq!(p0[axis], -p1[axis]);
    }
}

#[test]
fn test_iteration_additivity_and_trace_count() {
    let mut once = random_planets(12, 11);
    let mut stepped = once.clone();

    let mut engine = GravityEngine::with_parallel_threshold(usize::MAX);
    engine.simulate(&mut once, 0.8, 10).unwrap();
    for _ in 0..10 {
        engine.simulate(&mut stepped, 0.8, 1).unwrap();
    }

    assert_bitwise_eq(&once, &stepped);
    for (a, b) in once.iter().zip(&stepped) {
        assert_eq!(a.trace().len(), 1);
        assert_eq!(b.trace().len(), 10);
    }
}

#[test]
fn test_negative_iteration_is_rejected() {
    let mut bodies = random_planets(5, 2);
    let before = bodies.clone();
    let mut engine = GravityEngine::new();

    let result = engine.simulate(&mut bodies, 1.0, -1);
    assert!(matches!(
        result,
        Err(SimError::InvalidArgument { name: "iteration", .. })
    ));
    assert_eq!(bodies, before);
}

#[test]
fn test_coincident_bodies_stay_finite() {
    let mut bodies = vec![
        planet("a", 100.0, [7.0, 7.0, 7.0], [0.0, 0.0, 0.0]),
        planet("b", 100.0, [7.0, 7.0, 7.0], [0.0, 0.0, 0.0]),
        planet("c", 100.0, [7.0, 7.0, 7.0], [1.0, 0.0, 0.0]),
    ];
    let mut engine = GravityEngine::new();
    engine.simulate(&mut bodies, 1.0, 1).unwrap();

    for body in &bodies {
        assert!(body.is_finite());
    }
    // No separation means no pull on the first sub-step.
    assert_eq!(bodies[0].velocity(), Velocity::zero());
}

#[test]
fn test_parallel_matches_serial_bitwise() {
    let mut serial = random_planets(150, 5);
    let mut parallel = serial.clone();

    GravityEngine::with_parallel_threshold(usize::MAX)
        .simulate(&mut serial, 1.0, 20)
        .unwrap();
    GravityEngine::with_parallel_threshold(0)
        .simulate(&mut parallel, 1.0, 20)
        .unwrap();

    assert_bitwise_eq(&serial, &parallel);
}

#[test]
fn test_trace_keeps_latest_samples() {
    let mut bodies = vec![planet("drift", 1.0, [0.0, 0.0, 0.0], [1000.0, 0.0, 0.0])];
    let mut engine = GravityEngine::new();
    let calls = MAX_TRACE + 37;
    let mut history = Vec::new();
    for _ in 0..calls {
        engine.simulate(&mut bodies, 1.0, 1).unwrap();
        history.push(bodies[0].position());
    }

    let trace: Vec<Position> = bodies[0].trace().iter().collect();
    assert_eq!(trace.len(), MAX_TRACE);
    assert_eq!(&trace[..], &history[calls - MAX_TRACE..]);
}
