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
//! Fixed-capacity ring buffer of recent planet positions
//!
//! Each planet keeps the last [`MAX_TRACE`] positions it was sampled at so a
//! viewer can draw its tail. Once the buffer is full the oldest sample is
//! overwritten first.

use crate::components::Position;

/// Number of samples a trace holds
pub const MAX_TRACE: usize = 100;

/// Circular history of positions
///
/// `head` is the slot of the most recent write, `None` until the first push.
///
/// # Examples
///
/// ```
/// use planet_engine::components::Position;
/// use planet_engine::trace::Trace;
///
/// let mut trace = Trace::new();
/// trace.push(Position::new(1.0, 0.0, 0.0));
/// trace.push(Position::new(2.0, 0.0, 0.0));
///
/// let xs: Vec<f64> = trace.iter().map(|p| p.x()).collect();
/// assert_eq!(xs, vec![1.0, 2.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    slots: [Option<Position>; MAX_TRACE],
    head: Option<usize>,
}

impl Trace {
    /// Create an empty trace
    pub fn new() -> Self {
        Trace {
            slots: [None; MAX_TRACE],
            head: None,
        }
    }

    /// Record a sample, overwriting the oldest one once full
    pub fn push(&mut self, point: Position) {
        let next = match self.head {
            Some(head) => (head + 1) % MAX_TRACE,
            None => 0,
        };
        self.slots[next] = Some(point);
        self.head = Some(next);
    }

    /// Slot of the most recent write
    pub fn head(&self) -> Option<usize> {
        self.head
    }

    /// Most recent sample
    pub fn latest(&self) -> Option<Position> {
        self.head.and_then(|head| self.slots[head])
    }

    /// Number of valid samples, never more than [`MAX_TRACE`]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// True until the first push
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        MAX_TRACE
    }

    /// Iterate valid samples from oldest to newest
    ///
    /// Walks from the slot after `head` around to `head`, skipping slots that
    /// were never written.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        let start = self.head.map_or(0, |head| head + 1);
        let count = if self.head.is_some() { MAX_TRACE } else { 0 };
        (0..count).filter_map(move |offset| self.slots[(start + offset) % MAX_TRACE])
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::new()
    }
}
