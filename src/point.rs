//! Screen positions targeted by effects.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A 2-D screen position in pixels.
///
/// Equality is exact and component-wise. Two effects only target "the same
/// place" when both coordinates compare equal; there is no tolerance.
///
/// # Examples
///
/// ```
/// use slotwise::Point;
///
/// let p = Point::from_ints(10, 20);
/// assert_eq!(p, Point::new(10.0, 20.0));
/// assert_eq!(p.to_string(), "(10, 20)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Creates a point from float coordinates.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Creates a point from integer pixel coordinates.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_ints(x: i32, y: i32) -> Self {
        Self {
            x: x as f32,
            y: y as f32,
        }
    }

    /// Creates a point, rejecting NaN and infinite coordinates.
    pub fn checked(x: f32, y: f32) -> Result<Self, ValidationError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(ValidationError::NonFinitePosition { x, y });
        }
        Ok(Self { x, y })
    }

    /// Returns true if both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::from_ints(x, y)
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
