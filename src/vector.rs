//! The 2D vector value type and the conversions that validate input into it.
//!
//! Every public operation accepts anything implementing [`AsVector2D`]:
//! arrays, slices, `Vec`s, pairs and [`Vector2D`] itself. Validation
//! happens once, in that conversion, and the arithmetic afterwards only
//! sees well-formed vectors.

use std::fmt;
use std::str::FromStr;

use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorError};

/// An ordered pair of finite real components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Vector2D {
    x: f64,
    y: f64,
}

impl Vector2D {
    /// Builds a vector, rejecting NaN and infinite components.
    pub fn new(x: f64, y: f64) -> Result<Vector2D> {
        Ok(Vector2D {
            x: finite(0, x)?,
            y: finite(1, y)?,
        })
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn dot(self, other: Vector2D) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Euclidean length. Squares are never formed, so tiny components
    /// do not underflow to zero; the result is infinite only when the
    /// length itself exceeds `f64::MAX`.
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Unit vector in the same direction, `None` for the zero vector.
    ///
    /// Components are first divided by the larger absolute component so
    /// the intermediate length stays within `[1, √2]` for any finite input.
    pub fn unit(self) -> Option<Vector2D> {
        if self.is_zero() {
            return None;
        }
        let scale = self.x.abs().max(self.y.abs());
        let (x, y) = (self.x / scale, self.y / scale);
        let length = x.hypot(y);
        Some(Vector2D {
            x: x / length,
            y: y / length,
        })
    }

    fn from_components<T: ToPrimitive>(components: &[T]) -> Result<Vector2D> {
        if components.len() != 2 {
            return Err(VectorError::dimension(components.len()));
        }
        Ok(Vector2D {
            x: component(0, &components[0])?,
            y: component(1, &components[1])?,
        })
    }
}

fn finite(index: usize, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(VectorError::conversion(index, format!("{value} is not finite")))
    }
}

fn component<T: ToPrimitive>(index: usize, value: &T) -> Result<f64> {
    let value = value
        .to_f64()
        .ok_or_else(|| VectorError::conversion(index, "value has no f64 representation"))?;
    finite(index, value)
}

/// Conversion of caller-supplied data into a validated [`Vector2D`].
///
/// Fails with [`VectorError::Dimension`] when the input does not hold
/// exactly two components and with [`VectorError::TypeConversion`] when
/// a component is not a finite real number.
pub trait AsVector2D {
    fn to_vector(&self) -> Result<Vector2D>;
}

impl AsVector2D for Vector2D {
    fn to_vector(&self) -> Result<Vector2D> {
        Ok(*self)
    }
}

impl<T: ToPrimitive> AsVector2D for [T] {
    fn to_vector(&self) -> Result<Vector2D> {
        Vector2D::from_components(self)
    }
}

impl<T: ToPrimitive, const N: usize> AsVector2D for [T; N] {
    fn to_vector(&self) -> Result<Vector2D> {
        Vector2D::from_components(self.as_slice())
    }
}

impl<T: ToPrimitive> AsVector2D for Vec<T> {
    fn to_vector(&self) -> Result<Vector2D> {
        Vector2D::from_components(self.as_slice())
    }
}

impl<A: ToPrimitive, B: ToPrimitive> AsVector2D for (A, B) {
    fn to_vector(&self) -> Result<Vector2D> {
        Ok(Vector2D {
            x: component(0, &self.0)?,
            y: component(1, &self.1)?,
        })
    }
}

impl<V: AsVector2D + ?Sized> AsVector2D for &V {
    fn to_vector(&self) -> Result<Vector2D> {
        (**self).to_vector()
    }
}

impl TryFrom<[f64; 2]> for Vector2D {
    type Error = VectorError;

    fn try_from(value: [f64; 2]) -> Result<Vector2D> {
        Vector2D::new(value[0], value[1])
    }
}

impl From<Vector2D> for [f64; 2] {
    fn from(vector: Vector2D) -> [f64; 2] {
        vector.to_array()
    }
}

/// Parses `"x,y"`, `"(x, y)"` or `"[x, y]"`.
impl FromStr for Vector2D {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Vector2D> {
        let s = s.trim();
        let inner = s
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .or_else(|| s.strip_prefix('[').and_then(|rest| rest.strip_suffix(']')))
            .unwrap_or(s)
            .trim();
        if inner.is_empty() {
            return Err(VectorError::dimension(0));
        }
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 2 {
            return Err(VectorError::dimension(parts.len()));
        }
        let mut values = [0.0; 2];
        for (index, part) in parts.iter().enumerate() {
            values[index] = part
                .parse::<f64>()
                .map_err(|e| VectorError::conversion(index, format!("{part:?}: {e}")))?;
        }
        Vector2D::new(values[0], values[1])
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
