//! Unary functions applied element-wise by `assign`.

use crate::scalar::Scalar;

/// A unary numeric function over SI values.
///
/// The parameterised variants carry their operand as `f64` and narrow it to
/// the element type when applied.
///
/// # Example
///
/// ```
/// use sivector::MathFunction;
///
/// assert_eq!(MathFunction::Abs.apply(-2.0f32), 2.0);
/// assert_eq!(MathFunction::Pow(2.0).apply(3.0f64), 9.0);
/// assert_eq!(MathFunction::Cos.apply(0.0f32), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MathFunction {
    Abs,
    Acos,
    Asin,
    Atan,
    Cbrt,
    Ceil,
    Cos,
    Cosh,
    Exp,
    Expm1,
    Floor,
    Log,
    Log10,
    Log1p,
    Neg,
    /// Round half to even.
    Rint,
    /// Round half up: ties go toward positive infinity.
    Round,
    Signum,
    Sin,
    Sinh,
    Sqrt,
    Tan,
    Tanh,
    /// Reciprocal, `1 / x`.
    Inv,
    Pow(f64),
    /// Add a constant.
    Inc(f64),
    /// Subtract a constant.
    Dec(f64),
    /// Multiply by a constant.
    Mult(f64),
    /// Divide by a constant.
    Div(f64),
}

impl MathFunction {
    /// Apply the function to one value.
    pub fn apply<T: Scalar>(self, x: T) -> T {
        match self {
            MathFunction::Abs => x.abs(),
            MathFunction::Acos => x.acos(),
            MathFunction::Asin => x.asin(),
            MathFunction::Atan => x.atan(),
            MathFunction::Cbrt => x.cbrt(),
            MathFunction::Ceil => x.ceil(),
            MathFunction::Cos => x.cos(),
            MathFunction::Cosh => x.cosh(),
            MathFunction::Exp => x.exp(),
            MathFunction::Expm1 => x.exp_m1(),
            MathFunction::Floor => x.floor(),
            MathFunction::Log => x.ln(),
            MathFunction::Log10 => x.log10(),
            MathFunction::Log1p => x.ln_1p(),
            MathFunction::Neg => -x,
            MathFunction::Rint => x.rint(),
            MathFunction::Round => {
                // x - floor(x) is exact, unlike x + 0.5
                let floor = x.floor();
                if x - floor >= T::from_f64(0.5) {
                    floor + T::one()
                } else {
                    floor
                }
            }
            MathFunction::Signum => {
                // signum(0) is 0 here, not 1 as in num_traits
                if x.is_zero() || x.is_nan() {
                    x
                } else {
                    x.signum()
                }
            }
            MathFunction::Sin => x.sin(),
            MathFunction::Sinh => x.sinh(),
            MathFunction::Sqrt => x.sqrt(),
            MathFunction::Tan => x.tan(),
            MathFunction::Tanh => x.tanh(),
            MathFunction::Inv => x.recip(),
            MathFunction::Pow(p) => x.powf(T::from_f64(p)),
            MathFunction::Inc(c) => x + T::from_f64(c),
            MathFunction::Dec(c) => x - T::from_f64(c),
            MathFunction::Mult(c) => x * T::from_f64(c),
            MathFunction::Div(c) => x / T::from_f64(c),
        }
    }

    /// Whether `f(0) == 0` in `T`, i.e. the function keeps implicit sparse
    /// zeros zero.
    ///
    /// Parameters are narrowed to `T` before the check, so `Mult(1e300)`
    /// keeps zero in `f64` but not in `f32`.
    pub fn preserves_zero<T: Scalar>(self) -> bool {
        self.apply(T::zero()).is_zero()
    }
}
