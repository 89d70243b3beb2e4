//! Typed 2D kinematic quantities
//!
//! `Position`, `Velocity`, `Acceleration` and `Force` share one operation set
//! (component/vector add, scaling, polar construction, magnitude and heading)
//! but stay distinct types, so the physics conversions are explicit:
//! velocity over a timestep is a displacement, acceleration over a timestep is
//! a change in velocity, and force over mass is an acceleration.
//!
//! Headings follow the screen convention of [`crate::polar_to_cartesian`]:
//! 0 rad points up and `angle_radians()` is `atan2(x, y)`.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{cartesian_to_polar, polar_to_cartesian};

macro_rules! quantity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Vec2);

        impl $name {
            pub const ZERO: Self = Self(Vec2::ZERO);

            #[inline]
            pub const fn new(x: f32, y: f32) -> Self {
                Self(Vec2::new(x, y))
            }

            /// Build from magnitude and heading
            #[inline]
            pub fn from_polar(magnitude: f32, angle: f32) -> Self {
                Self(polar_to_cartesian(magnitude, angle))
            }

            /// Unit vector along a heading
            #[inline]
            pub fn forward(angle: f32) -> Self {
                Self::from_polar(1.0, angle)
            }

            #[inline]
            pub fn x(self) -> f32 {
                self.0.x
            }

            #[inline]
            pub fn y(self) -> f32 {
                self.0.y
            }

            #[inline]
            pub fn set_x(&mut self, x: f32) {
                self.0.x = x;
            }

            #[inline]
            pub fn set_y(&mut self, y: f32) {
                self.0.y = y;
            }

            #[inline]
            pub fn add_xy(&mut self, dx: f32, dy: f32) {
                self.0 += Vec2::new(dx, dy);
            }

            #[inline]
            pub fn set_polar(&mut self, magnitude: f32, angle: f32) {
                self.0 = polar_to_cartesian(magnitude, angle);
            }

            #[inline]
            pub fn magnitude(self) -> f32 {
                self.0.length()
            }

            /// Heading as `atan2(x, y)`
            #[inline]
            pub fn angle_radians(self) -> f32 {
                cartesian_to_polar(self.0).1
            }

            #[inline]
            pub fn as_vec2(self) -> Vec2 {
                self.0
            }
        }

        impl Add for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl AddAssign for $name {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                self.0 += rhs.0;
            }
        }

        impl Sub for $name {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Neg for $name {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                Self(-self.0)
            }
        }

        impl Mul<f32> for $name {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: f32) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl From<Vec2> for $name {
            #[inline]
            fn from(v: Vec2) -> Self {
                Self(v)
            }
        }
    };
}

quantity!(
    /// A point on the field
    Position
);
quantity!(
    /// Change in position per tick
    Velocity
);
quantity!(
    /// Change in velocity per tick
    Acceleration
);
quantity!(
    /// Mass times acceleration
    Force
);

impl Position {
    #[inline]
    pub fn distance(self, other: Position) -> f32 {
        self.0.distance(other.0)
    }
}

impl Velocity {
    /// Alias of `magnitude()`
    #[inline]
    pub fn speed(self) -> f32 {
        self.magnitude()
    }

    /// Displacement covered over `dt` ticks
    #[inline]
    pub fn displacement(self, dt: f32) -> Position {
        Position(self.0 * dt)
    }
}

impl Acceleration {
    /// Velocity change accumulated over `dt` ticks
    #[inline]
    pub fn delta_velocity(self, dt: f32) -> Velocity {
        Velocity(self.0 * dt)
    }
}

impl Force {
    /// Acceleration this force gives a body of `mass`.
    ///
    /// `mass` must be positive; bodies guarantee this at construction.
    #[inline]
    pub fn acceleration(self, mass: f32) -> Acceleration {
        Acceleration(self.0 / mass)
    }
}

/// One integration step: `p += v`
impl AddAssign<Velocity> for Position {
    #[inline]
    fn add_assign(&mut self, v: Velocity) {
        self.0 += v.0;
    }
}

impl AddAssign<Acceleration> for Velocity {
    #[inline]
    fn add_assign(&mut self, a: Acceleration) {
        self.0 += a.0;
    }
}
