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
//! Vector state carried by every planet
//!
//! Position, velocity and acceleration are plain double-precision triples.
//! They are kept as distinct types so a velocity can never be pushed into a
//! trace or integrated as if it were a position.

macro_rules! triple {
    (
        $(#[$meta:meta])*
        $name:ident { $a:ident, $b:ident, $c:ident }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Default)]
        pub struct $name {
            $a: f64,
            $b: f64,
            $c: f64,
        }

        impl $name {
            #[doc = concat!("Create a `", stringify!($name), "` from its components")]
            pub fn new($a: f64, $b: f64, $c: f64) -> Self {
                $name { $a, $b, $c }
            }

            #[doc = concat!("`", stringify!($a), "` component")]
            pub fn $a(&self) -> f64 {
                self.$a
            }

            #[doc = concat!("`", stringify!($b), "` component")]
            pub fn $b(&self) -> f64 {
                self.$b
            }

            #[doc = concat!("`", stringify!($c), "` component")]
            pub fn $c(&self) -> f64 {
                self.$c
            }

            /// True when no component is NaN or infinite
            pub fn is_valid(&self) -> bool {
                self.$a.is_finite() && self.$b.is_finite() && self.$c.is_finite()
            }

            /// Components in declaration order
            pub fn as_array(&self) -> [f64; 3] {
                [self.$a, self.$b, self.$c]
            }

            /// Inverse of [`as_array`](Self::as_array)
            pub fn from_array([$a, $b, $c]: [f64; 3]) -> Self {
                $name { $a, $b, $c }
            }
        }

        impl From<[f64; 3]> for $name {
            fn from(components: [f64; 3]) -> Self {
                $name::from_array(components)
            }
        }
    };
}

// Per-component setters, only for the state a driver may edit.
macro_rules! triple_setters {
    ($name:ident { $($field:ident / $setter:ident),+ }) => {
        impl $name {
            $(
                #[doc = concat!("Overwrite the `", stringify!($field), "` component")]
                pub fn $setter(&mut self, value: f64) {
                    self.$field = value;
                }
            )+
        }
    };
}

triple! {
    /// 3D position in simulation units
    ///
    /// # Examples
    ///
    /// ```
    /// use planet_engine::components::Position;
    ///
    /// let pos = Position::new(100.0, 0.0, -50.0);
    /// assert_eq!(pos.x(), 100.0);
    /// assert!(pos.is_valid());
    /// ```
    Position { x, y, z }
}

triple! {
    /// 3D velocity in simulation units per time unit
    Velocity { dx, dy, dz }
}

triple! {
    /// 3D acceleration produced by the gravity kernel
    ///
    /// Never stored on a planet; only handed out by
    /// [`GravityEngine::accelerations`](crate::engine::GravityEngine::accelerations)
    /// for inspection.
    Acceleration { ax, ay, az }
}

triple! {
    /// RGB colour in `[0, 1]³`
    ///
    /// Only a renderer cares about it; the simulation carries it as opaque
    /// metadata so it survives persistence.
    Color { r, g, b }
}

triple_setters!(Position { x / set_x, y / set_y, z / set_z });
triple_setters!(Velocity { dx / set_dx, dy / set_dy, dz / set_dz });

impl Position {
    /// The origin
    pub fn zero() -> Self {
        Position::default()
    }
}

impl Velocity {
    /// At rest
    pub fn zero() -> Self {
        Velocity::default()
    }
}

impl Acceleration {
    /// Euclidean length
    pub fn magnitude(&self) -> f64 {
        (self.ax * self.ax + self.ay * self.ay + self.az * self.az).sqrt()
    }
}
