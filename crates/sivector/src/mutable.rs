//! Mutable unit-tagged vectors with copy-on-write sharing.
//!
//! Deriving a view from a [`MutableVector`] (`mutable`, `immutable`, `copy`)
//! shares the storage and flags both sides. The first mutation through a
//! flagged view clones the storage and clears that view's flag, so writes
//! never show through a view taken earlier.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::config::StorageType;
use crate::error::VectorError;
use crate::functions::MathFunction;
use crate::scalar::Scalar;
use crate::storage::VectorData;
use crate::unit::{SiUnit, Unit};
use crate::vector::{Vector, VectorView, unit_to_si, write_view};

/// Mutable vector of values in unit `U`.
///
/// # Example
///
/// ```
/// use sivector::{MutableVector, StorageType, VectorView};
/// use sivector::unit::SiUnit;
///
/// let mut a: MutableVector<f32> =
///     MutableVector::from_si(&[1.0, 2.0, 3.0], SiUnit, StorageType::Dense);
/// let snapshot = a.immutable();
/// a.multiply_by_scalar(2.0);
/// assert_eq!(a.values_si(), vec![2.0, 4.0, 6.0]);
/// assert_eq!(snapshot.values_si(), vec![1.0, 2.0, 3.0]);
/// ```
#[derive(Debug)]
pub struct MutableVector<T: Scalar = f32, U: Unit = SiUnit> {
    data: Arc<VectorData<T>>,
    unit: U,
    copy_on_write: bool,
}

impl<T: Scalar, U: Unit> MutableVector<T, U> {
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
        Self::from_shared(Arc::new(data), unit, false)
    }

    pub(crate) fn from_shared(data: Arc<VectorData<T>>, unit: U, copy_on_write: bool) -> Self {
        Self {
            data,
            unit,
            copy_on_write,
        }
    }

    /// Whether the next mutation will copy the storage first.
    #[inline]
    pub fn is_copy_on_write(&self) -> bool {
        self.copy_on_write
    }

    /// Change the display unit; SI values are untouched.
    pub fn set_display_unit(&mut self, unit: U) {
        self.unit = unit;
    }

    /// Another mutable view over the same storage. Both views copy on their
    /// next write.
    pub fn mutable(&mut self) -> Self {
        self.copy_on_write = true;
        Self::from_shared(Arc::clone(&self.data), self.unit, true)
    }

    /// Same as [`mutable`](Self::mutable).
    pub fn copy(&mut self) -> Self {
        self.mutable()
    }

    /// Immutable snapshot of the current values. Later writes to `self` copy
    /// first and leave the snapshot unchanged.
    pub fn immutable(&mut self) -> Vector<T, U> {
        self.copy_on_write = true;
        Vector::from_shared(Arc::clone(&self.data), self.unit)
    }

    /// Dense equivalent in fresh, unshared storage.
    pub fn to_dense(&self) -> Self {
        Self::from_data(self.data.to_dense().into(), self.unit)
    }

    /// Sparse equivalent in fresh, unshared storage.
    pub fn to_sparse(&self) -> Self {
        Self::from_data(self.data.to_sparse().into(), self.unit)
    }

    fn check_copy_on_write(&mut self) {
        if self.copy_on_write {
            log::debug!("copy on write: cloning {} elements", self.data.size());
            self.data = Arc::new((*self.data).clone());
            self.copy_on_write = false;
        }
    }

    fn data_mut(&mut self) -> &mut VectorData<T> {
        self.check_copy_on_write();
        Arc::make_mut(&mut self.data)
    }

    // ---- element access ----

    /// Overwrite the SI value at `index`.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::IndexOutOfRange` if `index >= size()`; no copy is made.
    pub fn set_si(&mut self, index: usize, value: T) -> Result<(), VectorError> {
        VectorError::check_index(index, self.size())?;
        self.data_mut().set_si(index, value)
    }

    /// Overwrite the value at `index`, given in the display unit.
    pub fn set(&mut self, index: usize, value: T) -> Result<(), VectorError> {
        self.set_si(index, unit_to_si(value, self.unit))
    }

    /// Overwrite the value at `index`, given in `unit`.
    pub fn set_in_unit(&mut self, index: usize, value: T, unit: U) -> Result<(), VectorError> {
        self.set_si(index, unit_to_si(value, unit))
    }

    // ---- element-wise with another vector ----

    /// Add `rhs` element-wise. The storage kind of `self` is kept.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::SizeMismatch` if sizes differ; `self` is untouched.
    pub fn increment_by(&mut self, rhs: &impl VectorView<T, U>) -> Result<&mut Self, VectorError> {
        VectorError::check_size("increment_by", self.size(), rhs.size())?;
        self.data_mut().increment_by(rhs.data())?;
        Ok(self)
    }

    /// Subtract `rhs` element-wise. The storage kind of `self` is kept.
    pub fn decrement_by(&mut self, rhs: &impl VectorView<T, U>) -> Result<&mut Self, VectorError> {
        VectorError::check_size("decrement_by", self.size(), rhs.size())?;
        self.data_mut().decrement_by(rhs.data())?;
        Ok(self)
    }

    /// Multiply element-wise by `factors`, whatever their unit.
    pub fn multiply_by<V: Unit>(
        &mut self,
        factors: &impl VectorView<T, V>,
    ) -> Result<&mut Self, VectorError> {
        VectorError::check_size("multiply_by", self.size(), factors.size())?;
        self.data_mut().multiply_by(factors.data())?;
        Ok(self)
    }

    /// Divide element-wise by `divisors`, whatever their unit.
    pub fn divide_by<V: Unit>(
        &mut self,
        divisors: &impl VectorView<T, V>,
    ) -> Result<&mut Self, VectorError> {
        VectorError::check_size("divide_by", self.size(), divisors.size())?;
        self.data_mut().divide_by(divisors.data())?;
        Ok(self)
    }

    // ---- element-wise with a scalar ----

    /// Add an SI value to every element.
    pub fn increment_by_scalar(&mut self, value_si: T) -> &mut Self {
        self.data_mut().increment_by_scalar(value_si);
        self
    }

    /// Subtract an SI value from every element.
    pub fn decrement_by_scalar(&mut self, value_si: T) -> &mut Self {
        self.data_mut().decrement_by_scalar(value_si);
        self
    }

    pub fn multiply_by_scalar(&mut self, factor: T) -> &mut Self {
        self.data_mut().multiply_by_scalar(factor);
        self
    }

    pub fn divide_by_scalar(&mut self, divisor: T) -> &mut Self {
        self.data_mut().divide_by_scalar(divisor);
        self
    }

    // ---- unary functions ----

    /// Replace every element `x` with `function(x)`.
    pub fn assign(&mut self, function: MathFunction) -> &mut Self {
        self.data_mut().assign(function);
        self
    }

    pub fn abs(&mut self) -> &mut Self {
        self.assign(MathFunction::Abs)
    }

    pub fn ceil(&mut self) -> &mut Self {
        self.assign(MathFunction::Ceil)
    }

    pub fn floor(&mut self) -> &mut Self {
        self.assign(MathFunction::Floor)
    }

    pub fn neg(&mut self) -> &mut Self {
        self.assign(MathFunction::Neg)
    }

    pub fn rint(&mut self) -> &mut Self {
        self.assign(MathFunction::Rint)
    }

    pub fn round(&mut self) -> &mut Self {
        self.assign(MathFunction::Round)
    }

    /// Scale the values so that they sum to one.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::DegenerateOperation` if the sum is zero; the
    /// values are left as they were.
    pub fn normalize(&mut self) -> Result<&mut Self, VectorError> {
        let sum = self.z_sum();
        if sum.is_zero() {
            return Err(VectorError::DegenerateOperation {
                operation: "normalize",
                reason: "zSum is 0".to_string(),
            });
        }
        Ok(self.divide_by_scalar(sum))
    }
}

impl<T: Scalar, U: Unit> VectorView<T, U> for MutableVector<T, U> {
    #[inline]
    fn data(&self) -> &VectorData<T> {
        &self.data
    }

    #[inline]
    fn unit(&self) -> U {
        self.unit
    }
}

impl<T: Scalar, U: Unit> PartialEq for MutableVector<T, U> {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit && self.data == other.data
    }
}

impl<T: Scalar, U: Unit> fmt::Display for MutableVector<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_view(f, self)
    }
}

impl<T: Scalar, U: Unit> From<MutableVector<T, U>> for Vector<T, U> {
    fn from(v: MutableVector<T, U>) -> Self {
        Vector::from_shared(v.data, v.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(values: &[f32]) -> MutableVector<f32> {
        MutableVector::from_si(values, SiUnit, StorageType::Dense)
    }

    #[test]
    fn test_mutable_view_copies_on_first_write() {
        let mut a = dense(&[1.0, 2.0]);
        let mut b = a.mutable();
        assert!(a.is_copy_on_write());
        assert!(b.is_copy_on_write());
        assert!(Arc::ptr_eq(&a.data, &b.data));

        b.set_si(0, 9.0).unwrap();
        assert!(!b.is_copy_on_write());
        assert!(!Arc::ptr_eq(&a.data, &b.data));
        assert_eq!(a.values_si(), vec![1.0, 2.0]);
        assert_eq!(b.values_si(), vec![9.0, 2.0]);

        // a still holds the flag and copies on its own write
        a.set_si(1, 5.0).unwrap();
        assert!(!a.is_copy_on_write());
        assert_eq!(a.values_si(), vec![1.0, 5.0]);
        assert_eq!(b.values_si(), vec![9.0, 2.0]);
    }

    #[test]
    fn test_failed_write_does_not_copy() {
        let mut a = dense(&[1.0]);
        let _b = a.mutable();
        assert!(a.set_si(3, 1.0).is_err());
        assert!(a.is_copy_on_write());
    }

    #[test]
    fn test_vector_mutable_is_flagged() {
        let v: Vector<f32> = Vector::from_si(&[1.0, 0.0], SiUnit, StorageType::Sparse);
        let mut m = v.mutable();
        assert!(m.is_copy_on_write());
        m.increment_by_scalar(1.0);
        assert_eq!(m.values_si(), vec![2.0, 1.0]);
        assert!(m.is_sparse());
        assert_eq!(v.values_si(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_size_mismatch_leaves_receiver() {
        let mut a = dense(&[1.0, 2.0]);
        let b = dense(&[1.0, 2.0, 3.0]);
        let err = a.increment_by(&b).unwrap_err();
        assert_eq!(
            err,
            VectorError::SizeMismatch {
                operation: "increment_by",
                expected: 2,
                actual: 3,
            }
        );
        assert_eq!(a.values_si(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_chained_mutators() {
        let mut a = dense(&[-1.4, 2.6]);
        a.abs().round().neg();
        assert_eq!(a.values_si(), vec![-1.0, -3.0]);
    }

    #[test]
    fn test_normalize() {
        let mut a: MutableVector<f64> =
            MutableVector::from_si(&[1.0, 0.0, 3.0], SiUnit, StorageType::Sparse);
        a.normalize().unwrap();
        assert_eq!(a.values_si(), vec![0.25, 0.0, 0.75]);
        assert!(a.is_sparse());
    }

    #[test]
    fn test_normalize_zero_sum() {
        let mut a = dense(&[1.0, -1.0]);
        let err = a.normalize().unwrap_err();
        assert!(matches!(err, VectorError::DegenerateOperation { operation: "normalize", .. }));
        assert_eq!(a.values_si(), vec![1.0, -1.0]);
    }

    #[test]
    fn test_into_vector() {
        let a = dense(&[3.0]);
        let v: Vector<f32> = a.into();
        assert_eq!(v.values_si(), vec![3.0]);
    }
}
