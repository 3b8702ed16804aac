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
//! Saving and restoring planet collections
//!
//! A collection is stored as a TOML document with a format version and one
//! `[[bodies]]` table per planet:
//!
//! ```toml
//! version = 1
//!
//! [[bodies]]
//! id = "p1"
//! mass = 20.0
//! position = [100.0, 0.0, 0.0]
//! velocity = [0.0, 5.0, 0.0]
//! color = [1.0, 0.0, 0.0]
//! ```
//!
//! Floats are written in shortest round-trip form, so a restored collection
//! is bit-for-bit equal in every stored field. Radius is recomputed from mass
//! and the trace starts empty.

use crate::body::Body;
use crate::components::{Color, Position, Velocity};
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current record format
pub const FORMAT_VERSION: u32 = 1;

/// Default file name used by the generator and the demo
pub const DEFAULT_FILE_NAME: &str = "planets.toml";

/// Stored state of one planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRecord {
    /// Identifier
    pub id: String,
    /// Mass
    pub mass: f64,
    /// Position
    pub position: [f64; 3],
    /// Velocity
    pub velocity: [f64; 3],
    /// Colour
    pub color: [f64; 3],
}

impl From<&Body> for BodyRecord {
    fn from(body: &Body) -> Self {
        BodyRecord {
            id: body.id().to_string(),
            mass: body.mass(),
            position: body.position().as_array(),
            velocity: body.velocity().as_array(),
            color: body.color().as_array(),
        }
    }
}

impl BodyRecord {
    /// Rebuild the planet with a fresh trace
    pub fn into_body(self) -> Body {
        Body::new(
            self.id,
            self.mass,
            Position::from_array(self.position),
            Velocity::from_array(self.velocity),
            Color::from_array(self.color),
        )
    }

    fn check(&self) -> Result<(), StorageError> {
        let finite = self.mass.is_finite()
            && self.position.iter().all(|v| v.is_finite())
            && self.velocity.iter().all(|v| v.is_finite());
        if finite {
            Ok(())
        } else {
            Err(StorageError::Corrupt(format!(
                "planet {} has non-finite state",
                self.id
            )))
        }
    }
}

/// Whole stored collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetFile {
    /// Record format version
    pub version: u32,
    /// Planets in collection order
    #[serde(default)]
    pub bodies: Vec<BodyRecord>,
}

impl PlanetFile {
    /// Snapshot a collection
    pub fn from_bodies(bodies: &[Body]) -> Self {
        PlanetFile {
            version: FORMAT_VERSION,
            bodies: bodies.iter().map(BodyRecord::from).collect(),
        }
    }

    /// Rebuild the collection
    pub fn into_bodies(self) -> Vec<Body> {
        self.bodies.into_iter().map(BodyRecord::into_body).collect()
    }
}

/// Serialize a collection to TOML text
///
/// # Errors
///
/// [`StorageError::Corrupt`] if a value cannot be represented, for example a
/// non-finite coordinate.
pub fn to_toml_string(bodies: &[Body]) -> Result<String, StorageError> {
    let file = PlanetFile::from_bodies(bodies);
    for record in &file.bodies {
        record.check()?;
    }
    Ok(toml::to_string_pretty(&file)?)
}

/// Parse a collection from TOML text
///
/// # Errors
///
/// [`StorageError::Corrupt`] for malformed TOML, an unknown format version
/// or non-finite planet state.
pub fn from_toml_str(text: &str) -> Result<Vec<Body>, StorageError> {
    let file: PlanetFile = toml::from_str(text)?;
    if file.version != FORMAT_VERSION {
        return Err(StorageError::Corrupt(format!(
            "unsupported format version {} (expected {})",
            file.version, FORMAT_VERSION
        )));
    }
    for record in &file.bodies {
        record.check()?;
    }
    Ok(file.into_bodies())
}

/// Write a collection to `path`
///
/// The document is written to a sibling temporary file first and renamed
/// into place, so an existing file is never left half-written.
///
/// # Errors
///
/// [`StorageError::Unavailable`] on I/O failure, [`StorageError::Corrupt`]
/// if the collection cannot be serialized.
pub fn save(path: impl AsRef<Path>, bodies: &[Body]) -> Result<(), StorageError> {
    let path = path.as_ref();
    let text = to_toml_string(bodies)?;

    let unavailable = |source: std::io::Error| StorageError::Unavailable {
        path: path.to_path_buf(),
        source,
    };
    let staging = path.with_extension("toml.tmp");
    fs::write(&staging, text).map_err(unavailable)?;
    fs::rename(&staging, path).map_err(unavailable)?;

    log::info!("Saved {} planets to {}", bodies.len(), path.display());
    Ok(())
}

/// Read a collection from `path`
///
/// # Errors
///
/// [`StorageError::Unavailable`] if the file cannot be read,
/// [`StorageError::Corrupt`] if its contents are not a valid collection.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<Body>, StorageError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| StorageError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let bodies = from_toml_str(&text)?;
    log::info!("Loaded {} planets from {}", bodies.len(), path.display());
    Ok(bodies)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Body> {
        vec![
            Body::new(
                "p1",
                20.0,
                Position::new(100.0, 0.0, 0.0),
                Velocity::new(0.0, 5.0, 0.0),
                Color::new(1.0, 0.0, 0.0),
            ),
            Body::new(
                "moon",
                0.1 + 0.2,
                Position::new(-1.0 / 3.0, 1e-300, -0.0),
                Velocity::new(f64::MIN_POSITIVE, 123456.789, -2.5e17),
                Color::new(0.1, 0.2, 0.3),
            ),
        ]
    }

    #[test]
    fn test_text_round_trip_is_exact() {
        let bodies = sample();
        let text = to_toml_string(&bodies).unwrap();
        let restored = from_toml_str(&text).unwrap();

        assert_eq!(restored.len(), bodies.len());
        for (a, b) in bodies.iter().zip(&restored) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.mass().to_bits(), b.mass().to_bits());
            assert_eq!(a.radius().to_bits(), b.radius().to_bits());
            for (x, y) in a.position().as_array().iter().zip(b.position().as_array()) {
                assert_eq!(x.to_bits(), y.to_bits());
            }
            for (x, y) in a.velocity().as_array().iter().zip(b.velocity().as_array()) {
                assert_eq!(x.to_bits(), y.to_bits());
            }
            assert_eq!(a.color(), b.color());
        }
    }

    #[test]
    fn test_empty_collection_round_trip() {
        let text = to_toml_string(&[]).unwrap();
        assert!(from_toml_str(&text).unwrap().is_empty());
    }

    #[test]
    fn test_trace_is_not_stored() {
        let mut bodies = sample();
        bodies[0].update_trace();
        let restored = from_toml_str(&to_toml_string(&bodies).unwrap()).unwrap();
        assert!(restored[0].trace().is_empty());
    }

    #[test]
    fn test_wrong_version_is_corrupt() {
        let text = "version = 99\nbodies = []\n";
        assert!(matches!(from_toml_str(text), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_truncated_record_is_corrupt() {
        let text = to_toml_string(&sample()).unwrap();
        let cut = text.rfind("velocity").unwrap();
        let truncated = &text[..cut];
        assert!(matches!(from_toml_str(truncated), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_non_finite_state_is_rejected() {
        let mut bodies = sample();
        bodies[1].set_position(Position::new(f64::NAN, 0.0, 0.0));
        assert!(matches!(to_toml_string(&bodies), Err(StorageError::Corrupt(_))));

        let text = "version = 1\n[[bodies]]\nid = \"x\"\nmass = inf\nposition = [0.0, 0.0, 0.0]\nvelocity = [0.0, 0.0, 0.0]\ncolor = [0.0, 0.0, 0.0]\n";
        assert!(matches!(from_toml_str(text), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let result = load("/nonexistent/planet-engine/planets.toml");
        assert!(matches!(result, Err(StorageError::Unavailable { .. })));
    }
}
