//! Scalar trait for vector element types.

use num_traits::Float;
use std::fmt::{Debug, Display};

/// Trait for scalar types supported by sivector.
///
/// This wraps `num_traits::Float` with the additional bounds required for
/// parallel element-wise kernels and for conversion through a [`Scale`],
/// which always computes in `f64`.
///
/// [`Scale`]: crate::scale::Scale
pub trait Scalar: Float + Debug + Display + Default + Send + Sync + 'static {
    /// Widen to `f64`.
    fn as_f64(self) -> f64;

    /// Narrow from `f64` (rounding to nearest for `f32`).
    fn from_f64(value: f64) -> Self;

    /// Rounds half to even, like IEEE `roundToIntegralTiesToEven`.
    fn rint(self) -> Self {
        let rounded = self.round();
        if (self - self.trunc()).abs() == Self::from_f64(0.5) {
            // tie: round() went away from zero, step back if that made it odd
            let two = Self::from_f64(2.0);
            if rounded % two != Self::zero() {
                return rounded - self.signum();
            }
        }
        rounded
    }
}

impl Scalar for f32 {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value as f32
    }
}

impl Scalar for f64 {
    #[inline]
    fn as_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(value: f64) -> Self {
        value
    }
}
