//! Immutable unit-tagged vectors.
//!
//! A view pairs shared [`VectorData`] with a display unit `U`. The unit is a
//! type parameter, so adding a length vector to a speed vector does not
//! compile; the storage underneath is the same for every unit.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::config::StorageType;
use crate::error::VectorError;
use crate::functions::MathFunction;
use crate::mutable::MutableVector;
use crate::scalar::Scalar;
use crate::storage::{SiIter, VectorData};
use crate::unit::{SiUnit, Unit};

#[inline]
pub(crate) fn si_to_unit<T: Scalar, U: Unit>(si: T, unit: U) -> T {
    T::from_f64(unit.scale().from_standard_unit(si.as_f64()))
}

#[inline]
pub(crate) fn unit_to_si<T: Scalar, U: Unit>(value: T, unit: U) -> T {
    T::from_f64(unit.scale().to_standard_unit(value.as_f64()))
}

/// Read access shared by [`Vector`] and [`MutableVector`].
pub trait VectorView<T: Scalar, U: Unit> {
    /// Underlying SI storage.
    fn data(&self) -> &VectorData<T>;

    /// Display unit.
    fn unit(&self) -> U;

    fn size(&self) -> usize {
        self.data().size()
    }

    fn storage_type(&self) -> StorageType {
        self.data().storage_type()
    }

    fn is_dense(&self) -> bool {
        self.data().is_dense()
    }

    fn is_sparse(&self) -> bool {
        self.data().is_sparse()
    }

    /// SI value at `index`.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::IndexOutOfRange` if `index >= size()`.
    fn get_si(&self, index: usize) -> Result<T, VectorError> {
        self.data().get_si(index)
    }

    /// Value at `index` expressed in the display unit.
    fn get(&self, index: usize) -> Result<T, VectorError> {
        Ok(si_to_unit(self.get_si(index)?, self.unit()))
    }

    /// Value at `index` expressed in `unit`.
    fn get_in_unit(&self, index: usize, unit: U) -> Result<T, VectorError> {
        Ok(si_to_unit(self.get_si(index)?, unit))
    }

    /// Dense copy of the SI values.
    fn values_si(&self) -> Vec<T> {
        self.data().values_si()
    }

    /// Dense copy of the values in the display unit.
    fn values_in_unit(&self) -> Vec<T> {
        let unit = self.unit();
        self.data().iter_si().map(|x| si_to_unit(x, unit)).collect()
    }

    /// SI values in index order, implicit zeros included.
    fn iter_si(&self) -> SiIter<'_, T> {
        self.data().iter_si()
    }

    fn cardinality(&self) -> usize {
        self.data().cardinality()
    }

    /// Sum of the SI values.
    fn z_sum(&self) -> T {
        self.data().z_sum()
    }

    /// Element-wise sum, in this view's unit.
    fn plus(&self, rhs: &impl VectorView<T, U>) -> Result<Vector<T, U>, VectorError> {
        Ok(Vector::from_data(self.data().plus(rhs.data())?, self.unit()))
    }

    /// Element-wise difference, in this view's unit.
    fn minus(&self, rhs: &impl VectorView<T, U>) -> Result<Vector<T, U>, VectorError> {
        Ok(Vector::from_data(self.data().minus(rhs.data())?, self.unit()))
    }

    /// Element-wise product. The result is a different quantity, so it is
    /// returned untyped.
    fn times<V: Unit>(
        &self,
        rhs: &impl VectorView<T, V>,
    ) -> Result<Vector<T, SiUnit>, VectorError> {
        Ok(Vector::from_data(self.data().times(rhs.data())?, SiUnit))
    }

    /// Element-wise quotient, returned untyped.
    fn divide<V: Unit>(
        &self,
        rhs: &impl VectorView<T, V>,
    ) -> Result<Vector<T, SiUnit>, VectorError> {
        Ok(Vector::from_data(self.data().divide(rhs.data())?, SiUnit))
    }
}

/// Immutable vector of values in unit `U`.
///
/// Cloning shares the storage.
///
/// # Example
///
/// ```
/// use sivector::{StorageType, Vector, VectorView};
/// use sivector::unit::SiUnit;
///
/// let a: Vector<f32> = Vector::from_values(&[1.0, 0.0, 3.0], SiUnit, StorageType::Dense);
/// let b: Vector<f32> = Vector::from_values(&[4.0, 5.0, 0.0], SiUnit, StorageType::Sparse);
/// let c = a.plus(&b).unwrap();
/// assert!(c.is_dense());
/// assert_eq!(c.values_si(), vec![5.0, 5.0, 3.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Vector<T: Scalar = f32, U: Unit = SiUnit> {
    data: Arc<VectorData<T>>,
    unit: U,
}

impl<T: Scalar, U: Unit> Vector<T, U> {
    /// Values given in `unit`, converted to SI for storage.
    pub fn from_values(values: &[T], unit: U, storage_type: StorageType) -> Self {
        Self::from_data(VectorData::from_values(values, unit.scale(), storage_type), unit)
    }

    /// Values already in SI; `unit` is only used for display.
    pub fn from_si(values_si: &[T], unit: U, storage_type: StorageType) -> Self {
        Self::from_data(VectorData::from_si(values_si, storage_type), unit)
    }

    /// Index → value map in `unit`, padded with zeros up to `length`.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::InvalidInput` if a key is not below `length`.
    pub fn from_map(
        values: &BTreeMap<usize, T>,
        length: usize,
        unit: U,
        storage_type: StorageType,
    ) -> Result<Self, VectorError> {
        Ok(Self::from_data(
            VectorData::from_map(values, length, unit.scale(), storage_type)?,
            unit,
        ))
    }

    pub fn from_data(data: VectorData<T>, unit: U) -> Self {
        Self::from_shared(Arc::new(data), unit)
    }

    pub(crate) fn from_shared(data: Arc<VectorData<T>>, unit: U) -> Self {
        Self { data, unit }
    }

    /// Same SI values shown in another unit.
    pub fn with_unit(&self, unit: U) -> Self {
        Self::from_shared(Arc::clone(&self.data), unit)
    }

    /// Dense equivalent; shares storage when already dense.
    pub fn to_dense(&self) -> Self {
        match self.data.as_ref() {
            VectorData::Dense(_) => self.clone(),
            VectorData::Sparse(s) => Self::from_data(s.to_dense().into(), self.unit),
        }
    }

    /// Sparse equivalent; shares storage when already sparse.
    pub fn to_sparse(&self) -> Self {
        match self.data.as_ref() {
            VectorData::Sparse(_) => self.clone(),
            VectorData::Dense(d) => Self::from_data(d.to_sparse().into(), self.unit),
        }
    }

    /// New vector with every element multiplied by `factor`.
    pub fn times_scalar(&self, factor: T) -> Self {
        self.derive(|data| data.multiply_by_scalar(factor))
    }

    /// New vector with every element divided by `divisor`.
    pub fn divide_scalar(&self, divisor: T) -> Self {
        self.derive(|data| data.divide_by_scalar(divisor))
    }

    /// New vector with `function` applied to every element. The storage kind
    /// is kept.
    pub fn apply(&self, function: MathFunction) -> Self {
        self.derive(|data| data.assign(function))
    }

    pub fn abs(&self) -> Self {
        self.apply(MathFunction::Abs)
    }

    pub fn ceil(&self) -> Self {
        self.apply(MathFunction::Ceil)
    }

    pub fn floor(&self) -> Self {
        self.apply(MathFunction::Floor)
    }

    pub fn neg(&self) -> Self {
        self.apply(MathFunction::Neg)
    }

    pub fn rint(&self) -> Self {
        self.apply(MathFunction::Rint)
    }

    pub fn round(&self) -> Self {
        self.apply(MathFunction::Round)
    }

    fn derive(&self, update: impl FnOnce(&mut VectorData<T>)) -> Self {
        let mut data = (*self.data).clone();
        update(&mut data);
        Self::from_data(data, self.unit)
    }

    /// Mutable view over the same storage. The first write through it copies.
    pub fn mutable(&self) -> MutableVector<T, U> {
        MutableVector::from_shared(Arc::clone(&self.data), self.unit, true)
    }
}

impl<T: Scalar, U: Unit> VectorView<T, U> for Vector<T, U> {
    #[inline]
    fn data(&self) -> &VectorData<T> {
        &self.data
    }

    #[inline]
    fn unit(&self) -> U {
        self.unit
    }
}

impl<T: Scalar, U: Unit> PartialEq for Vector<T, U> {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit && self.data == other.data
    }
}

impl<T: Scalar, U: Unit> fmt::Display for Vector<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_view(f, self)
    }
}

pub(crate) fn write_view<T: Scalar, U: Unit>(
    f: &mut fmt::Formatter<'_>,
    view: &impl VectorView<T, U>,
) -> fmt::Result {
    write!(f, "{} [", view.storage_type())?;
    for (i, x) in view.values_in_unit().into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{x}")?;
    }
    write!(f, "] {}", view.unit().abbreviation())
}
