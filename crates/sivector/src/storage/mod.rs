//! Storage types for vector data.
//!
//! ```text
//! VectorData<T> (enum)
//! ├── Dense<T>   - one slot per logical index
//! └── Sparse<T>  - sorted (index, value) entries + logical length
//! ```
//!
//! All values are SI values. The kind of a `VectorData` never changes
//! through an in-place operation; `to_dense`/`to_sparse` build new storage.
//!
//! Element-wise operations pick the result kind from the operand kinds:
//!
//! | operation          | Dense ∘ Dense | mixed  | Sparse ∘ Sparse |
//! |--------------------|---------------|--------|-----------------|
//! | `plus`, `minus`    | Dense         | Dense  | Sparse          |
//! | `times`, `divide`  | Dense         | Sparse | Sparse          |

mod dense;
mod sparse;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::backend;
use crate::config::StorageType;
use crate::error::VectorError;
use crate::functions::MathFunction;
use crate::scalar::Scalar;
use crate::scale::Scale;

pub use dense::Dense;
pub use sparse::Sparse;

/// SI values of a vector in either dense or sparse layout.
///
/// # Example
///
/// ```
/// use sivector::{StorageType, VectorData};
///
/// let a = VectorData::from_si(&[1.0f32, 0.0, 3.0], StorageType::Dense);
/// let b = VectorData::from_si(&[4.0f32, 5.0, 0.0], StorageType::Dense);
///
/// let sum = a.plus(&b).unwrap();
/// assert_eq!(sum.values_si(), vec![5.0, 5.0, 3.0]);
/// assert_eq!(sum.z_sum(), 13.0);
///
/// let product = a.times(&b).unwrap();
/// assert!(product.is_dense());
/// assert_eq!(product.cardinality(), 1);
/// ```
#[derive(Debug, Clone)]
pub enum VectorData<T: Scalar> {
    Dense(Dense<T>),
    Sparse(Sparse<T>),
}

impl<T: Scalar> VectorData<T> {
    /// Store SI values in the requested layout. The input is copied.
    pub fn from_si(values: &[T], storage_type: StorageType) -> Self {
        Self::from_si_vec(values.to_vec(), storage_type)
    }

    /// Store SI values in the requested layout, taking ownership of the buffer.
    pub fn from_si_vec(values: Vec<T>, storage_type: StorageType) -> Self {
        match storage_type {
            StorageType::Dense => VectorData::Dense(Dense::from_vec(values)),
            StorageType::Sparse => VectorData::Sparse(Sparse::from_dense_values(&values)),
        }
    }

    /// Convert display-unit values to SI through `scale`, then store them.
    ///
    /// # Example
    ///
    /// ```
    /// use sivector::scale::LinearScale;
    /// use sivector::{StorageType, VectorData};
    ///
    /// let km = LinearScale::new(1000.0);
    /// let data = VectorData::from_values(&[1.0f64, 0.0, 2.5], &km, StorageType::Sparse);
    /// assert!(data.is_sparse());
    /// assert_eq!(data.values_si(), vec![1000.0, 0.0, 2500.0]);
    /// ```
    pub fn from_values(values: &[T], scale: &dyn Scale, storage_type: StorageType) -> Self {
        let mut si = values.to_vec();
        if !scale.is_base_si() {
            backend::map_inplace(&mut si, |x| T::from_f64(scale.to_standard_unit(x.as_f64())));
        }
        Self::from_si_vec(si, storage_type)
    }

    /// Store an index → SI value map with the given logical length.
    ///
    /// In sparse layout the supplied entries are kept as-is, zeros included.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::InvalidInput` if a key is not below `length`.
    pub fn from_si_map(
        values: &BTreeMap<usize, T>,
        length: usize,
        storage_type: StorageType,
    ) -> Result<Self, VectorError> {
        Self::from_map_with(values, length, storage_type, |x| x)
    }

    /// Store an index → display value map, converting each value through `scale`.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::InvalidInput` if a key is not below `length`.
    pub fn from_map(
        values: &BTreeMap<usize, T>,
        length: usize,
        scale: &dyn Scale,
        storage_type: StorageType,
    ) -> Result<Self, VectorError> {
        Self::from_map_with(values, length, storage_type, |x| {
            T::from_f64(scale.to_standard_unit(x.as_f64()))
        })
    }

    fn from_map_with(
        values: &BTreeMap<usize, T>,
        length: usize,
        storage_type: StorageType,
        to_si: impl Fn(T) -> T,
    ) -> Result<Self, VectorError> {
        if let Some((&last, _)) = values.last_key_value() {
            if last >= length {
                return Err(VectorError::invalid_input(format!(
                    "map index {last} is out of range for length {length}"
                )));
            }
        }
        Ok(match storage_type {
            StorageType::Dense => {
                let mut data = vec![T::zero(); length];
                for (&i, &x) in values {
                    data[i] = to_si(x);
                }
                VectorData::Dense(Dense::from_vec(data))
            }
            StorageType::Sparse => {
                let indices = values.keys().copied().collect();
                let si = values.values().map(|&x| to_si(x)).collect();
                VectorData::Sparse(Sparse::from_parts(indices, si, length)?)
            }
        })
    }

    /// Logical length.
    #[inline]
    pub fn size(&self) -> usize {
        match self {
            VectorData::Dense(d) => d.len(),
            VectorData::Sparse(s) => s.len(),
        }
    }

    #[inline]
    pub fn storage_type(&self) -> StorageType {
        match self {
            VectorData::Dense(_) => StorageType::Dense,
            VectorData::Sparse(_) => StorageType::Sparse,
        }
    }

    #[inline]
    pub fn is_dense(&self) -> bool {
        matches!(self, VectorData::Dense(_))
    }

    #[inline]
    pub fn is_sparse(&self) -> bool {
        matches!(self, VectorData::Sparse(_))
    }

    /// SI value at `index`.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::IndexOutOfRange` if `index >= size()`.
    pub fn get_si(&self, index: usize) -> Result<T, VectorError> {
        VectorError::check_index(index, self.size())?;
        Ok(match self {
            VectorData::Dense(d) => d[index],
            VectorData::Sparse(s) => s.get_si(index),
        })
    }

    /// Overwrite the SI value at `index`.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::IndexOutOfRange` if `index >= size()`.
    pub fn set_si(&mut self, index: usize, value: T) -> Result<(), VectorError> {
        VectorError::check_index(index, self.size())?;
        match self {
            VectorData::Dense(d) => d[index] = value,
            VectorData::Sparse(s) => s.set_si(index, value),
        }
        Ok(())
    }

    /// Number of values that are not exactly zero.
    pub fn cardinality(&self) -> usize {
        match self {
            VectorData::Dense(d) => d.cardinality(),
            VectorData::Sparse(s) => s.cardinality(),
        }
    }

    /// Sum of all SI values.
    pub fn z_sum(&self) -> T {
        match self {
            VectorData::Dense(d) => d.z_sum(),
            VectorData::Sparse(s) => s.z_sum(),
        }
    }

    /// Dense equivalent of this data.
    pub fn to_dense(&self) -> Dense<T> {
        match self {
            VectorData::Dense(d) => d.clone(),
            VectorData::Sparse(s) => s.to_dense(),
        }
    }

    /// Sparse equivalent of this data.
    pub fn to_sparse(&self) -> Sparse<T> {
        match self {
            VectorData::Dense(d) => d.to_sparse(),
            VectorData::Sparse(s) => s.clone(),
        }
    }

    /// Dense-expanded SI values, borrowed when already dense.
    pub fn dense_values(&self) -> Cow<'_, [T]> {
        match self {
            VectorData::Dense(d) => Cow::Borrowed(d.as_slice()),
            VectorData::Sparse(s) => Cow::Owned(s.to_dense().into_vec()),
        }
    }

    /// Dense-expanded copy of the SI values.
    pub fn values_si(&self) -> Vec<T> {
        self.dense_values().into_owned()
    }

    /// Iterate the dense-expanded SI values without allocating.
    pub fn iter_si(&self) -> SiIter<'_, T> {
        SiIter {
            data: self,
            pos: 0,
            cursor: 0,
        }
    }

    // ---- immutable element-wise operations ----

    /// Element-wise sum. Sparse only if both operands are sparse.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::SizeMismatch` if sizes differ.
    pub fn plus(&self, rhs: &Self) -> Result<Self, VectorError> {
        VectorError::check_size("plus", self.size(), rhs.size())?;
        Ok(self.additive(rhs, |x, y| x + y))
    }

    /// Element-wise difference. Sparse only if both operands are sparse.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::SizeMismatch` if sizes differ.
    pub fn minus(&self, rhs: &Self) -> Result<Self, VectorError> {
        VectorError::check_size("minus", self.size(), rhs.size())?;
        Ok(self.additive(rhs, |x, y| x - y))
    }

    /// Element-wise product. Dense only if both operands are dense.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::SizeMismatch` if sizes differ.
    pub fn times(&self, rhs: &Self) -> Result<Self, VectorError> {
        VectorError::check_size("times", self.size(), rhs.size())?;
        Ok(self.multiplicative(rhs, |x, y| x * y))
    }

    /// Element-wise quotient. Dense only if both operands are dense.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::SizeMismatch` if sizes differ.
    pub fn divide(&self, rhs: &Self) -> Result<Self, VectorError> {
        VectorError::check_size("divide", self.size(), rhs.size())?;
        Ok(self.multiplicative(rhs, |x, y| x / y))
    }

    fn additive(&self, rhs: &Self, op: impl Fn(T, T) -> T + Send + Sync) -> Self {
        match (self, rhs) {
            (VectorData::Sparse(a), VectorData::Sparse(b)) => VectorData::Sparse(a.merge(b, op)),
            _ => {
                let values = backend::zip_map(&*self.dense_values(), &*rhs.dense_values(), op);
                VectorData::Dense(Dense::from_vec(values))
            }
        }
    }

    // Mixed and sparse operands are still evaluated over the full domain:
    // an implicit zero times inf (or divided by zero) is NaN, not zero.
    fn multiplicative(&self, rhs: &Self, op: impl Fn(T, T) -> T + Send + Sync) -> Self {
        let values = backend::zip_map(&*self.dense_values(), &*rhs.dense_values(), op);
        match (self, rhs) {
            (VectorData::Dense(_), VectorData::Dense(_)) => {
                VectorData::Dense(Dense::from_vec(values))
            }
            _ => VectorData::Sparse(Sparse::from_dense_values(&values)),
        }
    }

    // ---- in-place element-wise operations (kind is preserved) ----

    /// Add `rhs` element-wise into `self`.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::SizeMismatch` if sizes differ; `self` is untouched.
    pub fn increment_by(&mut self, rhs: &Self) -> Result<(), VectorError> {
        VectorError::check_size("increment_by", self.size(), rhs.size())?;
        self.additive_inplace(rhs, |x, y| x + y);
        Ok(())
    }

    /// Subtract `rhs` element-wise from `self`.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::SizeMismatch` if sizes differ; `self` is untouched.
    pub fn decrement_by(&mut self, rhs: &Self) -> Result<(), VectorError> {
        VectorError::check_size("decrement_by", self.size(), rhs.size())?;
        self.additive_inplace(rhs, |x, y| x - y);
        Ok(())
    }

    /// Multiply `self` element-wise by `rhs`.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::SizeMismatch` if sizes differ; `self` is untouched.
    pub fn multiply_by(&mut self, rhs: &Self) -> Result<(), VectorError> {
        VectorError::check_size("multiply_by", self.size(), rhs.size())?;
        self.full_domain_inplace(rhs, |x, y| x * y);
        Ok(())
    }

    /// Divide `self` element-wise by `rhs`.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::SizeMismatch` if sizes differ; `self` is untouched.
    pub fn divide_by(&mut self, rhs: &Self) -> Result<(), VectorError> {
        VectorError::check_size("divide_by", self.size(), rhs.size())?;
        self.full_domain_inplace(rhs, |x, y| x / y);
        Ok(())
    }

    fn additive_inplace(&mut self, rhs: &Self, op: impl Fn(T, T) -> T + Send + Sync) {
        match (self, rhs) {
            (VectorData::Dense(a), VectorData::Dense(b)) => {
                backend::zip_inplace(a.as_mut_slice(), b.as_slice(), op)
            }
            // x ∘ 0 == x for addition and subtraction, so only explicit entries matter.
            // Serial on purpose: writes scatter to arbitrary slots, one per stored entry.
            (VectorData::Dense(a), VectorData::Sparse(b)) => {
                for (i, y) in b.iter() {
                    a[i] = op(a[i], y);
                }
            }
            (VectorData::Sparse(a), VectorData::Sparse(b)) => *a = a.merge(b, op),
            (VectorData::Sparse(a), VectorData::Dense(b)) => {
                let values = backend::zip_map(a.to_dense().as_slice(), b.as_slice(), op);
                a.replace_from_dense(&values);
            }
        }
    }

    fn full_domain_inplace(&mut self, rhs: &Self, op: impl Fn(T, T) -> T + Send + Sync) {
        let rhs = rhs.dense_values();
        match self {
            VectorData::Dense(a) => backend::zip_inplace(a.as_mut_slice(), &*rhs, op),
            VectorData::Sparse(a) => {
                let values = backend::zip_map(a.to_dense().as_slice(), &*rhs, op);
                a.replace_from_dense(&values);
            }
        }
    }

    // ---- scalar broadcast (kind is preserved) ----

    /// Add `value` to every element.
    ///
    /// A sparse receiver is evaluated over its whole logical length and stays
    /// sparse; slots that end up zero are not stored.
    pub fn increment_by_scalar(&mut self, value: T) {
        self.broadcast(move |x| x + value, value.is_zero());
    }

    /// Subtract `value` from every element. See [`increment_by_scalar`](Self::increment_by_scalar).
    pub fn decrement_by_scalar(&mut self, value: T) {
        self.broadcast(move |x| x - value, value.is_zero());
    }

    /// Multiply every element by `factor`.
    pub fn multiply_by_scalar(&mut self, factor: T) {
        self.broadcast(move |x| x * factor, factor.is_finite());
    }

    /// Divide every element by `divisor`.
    pub fn divide_by_scalar(&mut self, divisor: T) {
        let keeps_zero = !divisor.is_zero() && !divisor.is_nan();
        self.broadcast(move |x| x / divisor, keeps_zero);
    }

    /// Apply a unary function to every element.
    ///
    /// The function is evaluated over the full logical domain; a sparse
    /// receiver stays sparse afterwards.
    pub fn assign(&mut self, function: MathFunction) {
        self.broadcast(move |x| function.apply(x), function.preserves_zero::<T>());
    }

    /// `keeps_zero` must be true only if `f(0) == 0`; sparse receivers then
    /// skip their implicit slots.
    fn broadcast(&mut self, f: impl Fn(T) -> T + Send + Sync, keeps_zero: bool) {
        match self {
            VectorData::Dense(d) => backend::map_inplace(d.as_mut_slice(), f),
            VectorData::Sparse(s) if keeps_zero => s.map_stored(f),
            VectorData::Sparse(s) => {
                log::debug!(
                    "densifying sparse vector of length {} ({} stored) for a full-domain update",
                    s.len(),
                    s.stored_len()
                );
                let mut dense = s.to_dense();
                backend::map_inplace(dense.as_mut_slice(), f);
                s.replace_from_dense(dense.as_slice());
            }
        }
    }
}

impl<T: Scalar> From<Dense<T>> for VectorData<T> {
    fn from(d: Dense<T>) -> Self {
        VectorData::Dense(d)
    }
}

impl<T: Scalar> From<Sparse<T>> for VectorData<T> {
    fn from(s: Sparse<T>) -> Self {
        VectorData::Sparse(s)
    }
}

/// Equality by logical content: a dense and a sparse vector holding the same
/// values compare equal.
impl<T: Scalar> PartialEq for VectorData<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.size() != other.size() {
            return false;
        }
        match (self, other) {
            (VectorData::Dense(a), VectorData::Dense(b)) => a.as_slice() == b.as_slice(),
            _ => self.iter_si().eq(other.iter_si()),
        }
    }
}

impl<T: Scalar> fmt::Display for VectorData<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [", self.storage_type())?;
        for (i, x) in self.iter_si().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{x}")?;
        }
        f.write_str("]")
    }
}

/// Iterator over the dense-expanded SI values of a [`VectorData`].
#[derive(Debug, Clone)]
pub struct SiIter<'a, T: Scalar> {
    data: &'a VectorData<T>,
    pos: usize,
    cursor: usize,
}

impl<T: Scalar> Iterator for SiIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.pos >= self.data.size() {
            return None;
        }
        let value = match self.data {
            VectorData::Dense(d) => d[self.pos],
            VectorData::Sparse(s) => {
                if s.indices().get(self.cursor) == Some(&self.pos) {
                    self.cursor += 1;
                    s.values()[self.cursor - 1]
                } else {
                    T::zero()
                }
            }
        };
        self.pos += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.size() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<T: Scalar> ExactSizeIterator for SiIter<'_, T> {}
