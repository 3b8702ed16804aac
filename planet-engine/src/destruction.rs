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
//! Destruction zone around the diagonal through the origin
//!
//! A planet is destroyed when it comes within its own radius of the line
//! `x = y = z`. With `t = p / 3` the three per-axis offsets are
//!
//! ```text
//! s1 =  2·t.x −   t.y −   t.z
//! s2 =   −t.x + 2·t.y −   t.z
//! s3 =   −t.x −   t.y + 2·t.z
//! ```
//!
//! and the distance is `sqrt(s1² + s2² + s3²)`. The operation order above is
//! the one used for evaluation; results near the threshold depend on it.

use crate::body::Body;
use crate::components::Position;

/// Distance metric from `position` to the destruction line
pub fn destruction_distance(position: Position) -> f64 {
    let tx = position.x() / 3.0;
    let ty = position.y() / 3.0;
    let tz = position.z() / 3.0;

    let s1 = tx * 2.0 + ty * -1.0 + tz * -1.0;
    let s2 = tx * -1.0 + ty * 2.0 + tz * -1.0;
    let s3 = tx * -1.0 + ty * -1.0 + tz * 2.0;

    (s1 * s1 + s2 * s2 + s3 * s3).sqrt()
}

/// Check whether `body` is inside the destruction zone
pub fn is_destroyed(body: &Body) -> bool {
    destruction_distance(body.position()) < body.radius()
}

/// Indices of every destroyed body, ascending
pub fn find_destroyed(bodies: &[Body]) -> Vec<usize> {
    bodies
        .iter()
        .enumerate()
        .filter(|(_, body)| is_destroyed(body))
        .map(|(i, _)| i)
        .collect()
}

/// Remove every destroyed body in one pass and return them
///
/// The predicate is evaluated for the whole collection before anything is
/// removed, so several hits in one call never shift each other out of
/// place. Survivors keep their relative order.
pub fn apply_destruction(bodies: &mut Vec<Body>) -> Vec<Body> {
    let flags: Vec<bool> = bodies.iter().map(is_destroyed).collect();
    if !flags.contains(&true) {
        return Vec::new();
    }

    let mut removed = Vec::new();
    let mut survivors = Vec::with_capacity(bodies.len());
    for (body, destroyed) in bodies.drain(..).zip(flags) {
        if destroyed {
            removed.push(body);
        } else {
            survivors.push(body);
        }
    }
    *bodies = survivors;

    for body in &removed {
        log::info!("Planet {} destroyed at {:?}", body.id(), body.position().as_array());
    }
    removed
}
