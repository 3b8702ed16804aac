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
//! Integration tests for the destruction zone through the driver

use planet_engine::body::Body;
use planet_engine::components::{Color, Velocity};
use planet_engine::destruction::{apply_destruction, destruction_distance, is_destroyed};
use planet_engine::{PlanetSystem, SimulationConfig};

fn planet_at(id: &str, mass: f64, p: [f64; 3]) -> Body {
    Body::new(id, mass, p.into(), Velocity::zero(), Color::default())
}

#[test]
fn test_origin_is_destroyed_for_any_positive_radius() {
    for mass in [1e-9, 1.0, 20.0, 1e6] {
        assert!(is_destroyed(&planet_at("o", mass, [0.0, 0.0, 0.0])));
    }
}

#[test]
fn test_large_off_diagonal_point_survives() {
    let body = planet_at("far", 20.0, [1000.0, -1000.0, 0.0]);
    assert_eq!(body.radius(), 1.0);
    assert!(!is_destroyed(&body));
}

#[test]
fn test_diagonal_point_is_inside_zone() {
    // (1000, 1000, 1000) lies on x = y = z, so its distance is zero.
    let body = planet_at("diag", 20.0, [1000.0, 1000.0, 1000.0]);
    assert_eq!(destruction_distance(body.position()), 0.0);
    assert!(is_destroyed(&body));
}

#[test]
fn test_five_bodies_two_hits() {
    let mut bodies = vec![
        planet_at("keep0", 20.0, [900.0, -900.0, 0.0]),
        planet_at("hit1", 20.0, [0.0, 0.0, 0.0]),
        planet_at("keep2", 20.0, [0.0, 400.0, -400.0]),
        planet_at("hit3", 60.0, [10.0, 10.0, 10.0]),
        planet_at("keep4", 20.0, [-700.0, 0.0, 700.0]),
    ];

    let removed = apply_destruction(&mut bodies);

    let kept: Vec<&str> = bodies.iter().map(|b| b.id()).collect();
    assert_eq!(kept, vec!["keep0", "keep2", "keep4"]);
    assert_eq!(removed.len(), 2);
}

#[test]
fn test_system_tick_removes_destroyed() {
    let mut system = PlanetSystem::new(
        SimulationConfig::new()
            .with_iterations_per_tick(1)
            .with_destruction(),
    );
    system.add_body(planet_at("safe", 20.0, [500.0, -500.0, 0.0]));
    system.add_body(planet_at("doomed", 20.0, [0.0, 0.0, 0.0]));

    let removed = system.tick().unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].id(), "doomed");
    assert_eq!(system.len(), 1);
    assert_eq!(system.body(0).unwrap().id(), "safe");
}

#[test]
fn test_destruction_disabled_by_default() {
    let mut system = PlanetSystem::with_default_scene(SimulationConfig::default());
    assert!(system.tick().unwrap().is_empty());
    assert_eq!(system.len(), 3);
}

#[test]
fn test_empty_system_destruction_is_noop() {
    let mut system = PlanetSystem::default();
    assert!(system.apply_destruction().is_empty());
    assert!(system.is_empty());
}
