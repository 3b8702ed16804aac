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
//! Error types for the simulation core and its persistence layer
//!
//! The physics kernel itself has exactly one failure mode: a caller handing it
//! arguments it cannot honour. Everything numeric (coincident bodies, the
//! self-interaction term) is absorbed by softening and never reported.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the simulation core and the driver around it
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    /// An argument was rejected before any state was touched
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        name: &'static str,
        /// Human-readable explanation
        reason: String,
    },

    /// A driver operation addressed a body that does not exist
    #[error("body index {index} out of range for collection of {len}")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Collection length at the time of the call
        len: usize,
    },
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Errors raised while saving or restoring a planet collection
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written
    #[error("storage unavailable at {path}: {source}")]
    Unavailable {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The record was readable but its contents are not a valid collection
    #[error("corrupt planet record: {0}")]
    Corrupt(String),
}

impl From<toml::de::Error> for StorageError {
    fn from(err: toml::de::Error) -> Self {
        StorageError::Corrupt(err.to_string())
    }
}

impl From<toml::ser::Error> for StorageError {
    fn from(err: toml::ser::Error) -> Self {
        StorageError::Corrupt(err.to_string())
    }
}
