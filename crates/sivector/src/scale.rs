//! Conversion between a display unit and the canonical SI value.
//!
//! Storage only ever holds SI values; a [`Scale`] is consulted once at
//! construction time (and when a caller asks for a value in a display unit).

use std::fmt::Debug;

/// Conversion function between a unit's display representation and SI.
pub trait Scale: Debug + Send + Sync {
    /// Convert a value expressed in the display unit to its SI value.
    fn to_standard_unit(&self, value: f64) -> f64;

    /// Convert an SI value to the display unit.
    fn from_standard_unit(&self, value: f64) -> f64;

    /// Whether this scale is the identity on SI values.
    fn is_base_si(&self) -> bool {
        false
    }
}

/// Scale of an SI unit: values pass through unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IdentityScale;

impl Scale for IdentityScale {
    #[inline]
    fn to_standard_unit(&self, value: f64) -> f64 {
        value
    }

    #[inline]
    fn from_standard_unit(&self, value: f64) -> f64 {
        value
    }

    fn is_base_si(&self) -> bool {
        true
    }
}

/// Pure multiplicative scale: `si = value * factor`.
///
/// # Example
///
/// ```
/// use sivector::scale::{LinearScale, Scale};
///
/// let km = LinearScale::new(1000.0);
/// assert_eq!(km.to_standard_unit(1.5), 1500.0);
/// assert_eq!(km.from_standard_unit(500.0), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    factor: f64,
}

impl LinearScale {
    pub const fn new(factor: f64) -> Self {
        Self { factor }
    }

    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl Scale for LinearScale {
    #[inline]
    fn to_standard_unit(&self, value: f64) -> f64 {
        value * self.factor
    }

    #[inline]
    fn from_standard_unit(&self, value: f64) -> f64 {
        value / self.factor
    }

    fn is_base_si(&self) -> bool {
        self.factor == 1.0
    }
}

/// Scale with an offset applied before the factor: `si = (value + offset) * factor`.
///
/// Used for units whose zero differs from the SI zero, such as degrees
/// Celsius (`factor = 1.0`, `offset = 273.15`) or Fahrenheit
/// (`factor = 5/9`, `offset = 459.67`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetLinearScale {
    factor: f64,
    offset: f64,
}

impl OffsetLinearScale {
    pub const fn new(factor: f64, offset: f64) -> Self {
        Self { factor, offset }
    }

    #[inline]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl Scale for OffsetLinearScale {
    #[inline]
    fn to_standard_unit(&self, value: f64) -> f64 {
        (value + self.offset) * self.factor
    }

    #[inline]
    fn from_standard_unit(&self, value: f64) -> f64 {
        value / self.factor - self.offset
    }

    fn is_base_si(&self) -> bool {
        self.factor == 1.0 && self.offset == 0.0
    }
}
