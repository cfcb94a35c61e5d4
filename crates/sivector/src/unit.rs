//! Display units.
//!
//! A [`Unit`] is the compile-time tag of a typed vector. It only has to
//! provide a [`Scale`]; the unit registry itself (parsing, conversion
//! tables, quantity families) lives outside this crate.

use std::fmt::Debug;

use crate::scale::{IdentityScale, Scale};

/// A display unit carrying the scale used to convert to and from SI.
///
/// # Example
///
/// ```
/// use sivector::scale::{LinearScale, Scale};
/// use sivector::unit::Unit;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum LengthUnit {
///     Meter,
///     Kilometer,
/// }
///
/// static METER: LinearScale = LinearScale::new(1.0);
/// static KILOMETER: LinearScale = LinearScale::new(1000.0);
///
/// impl Unit for LengthUnit {
///     fn scale(&self) -> &dyn Scale {
///         match self {
///             LengthUnit::Meter => &METER,
///             LengthUnit::Kilometer => &KILOMETER,
///         }
///     }
///
///     fn abbreviation(&self) -> &str {
///         match self {
///             LengthUnit::Meter => "m",
///             LengthUnit::Kilometer => "km",
///         }
///     }
/// }
///
/// assert_eq!(LengthUnit::Kilometer.scale().to_standard_unit(2.0), 2000.0);
/// ```
pub trait Unit: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Scale converting values in this unit to SI.
    fn scale(&self) -> &dyn Scale;

    /// Short symbol used when printing values.
    fn abbreviation(&self) -> &str;
}

/// The untyped SI unit. Values are stored and shown as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiUnit;

static IDENTITY: IdentityScale = IdentityScale;

impl Unit for SiUnit {
    fn scale(&self) -> &dyn Scale {
        &IDENTITY
    }

    fn abbreviation(&self) -> &str {
        "SI"
    }
}
