//! Dense storage for vector data.

use crate::backend;
use crate::scalar::Scalar;
use crate::storage::sparse::Sparse;

/// Dense storage - contiguous array of SI values, one slot per logical index.
#[derive(Debug, Clone)]
pub struct Dense<T: Scalar> {
    data: Vec<T>,
}

impl<T: Scalar> Dense<T> {
    /// Create dense storage with given length, zero-initialized.
    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![T::zero(); len],
        }
    }

    /// Create dense storage from existing vector (takes ownership).
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Logical length; equal to the backing array length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Number of values that are not exactly zero.
    pub fn cardinality(&self) -> usize {
        backend::count_nonzero(&self.data)
    }

    /// Sum of all values.
    pub fn z_sum(&self) -> T {
        backend::sum(&self.data)
    }

    /// Sparse equivalent; exact zeros are dropped.
    pub fn to_sparse(&self) -> Sparse<T> {
        Sparse::from_dense_values(&self.data)
    }
}

impl<T: Scalar> std::ops::Index<usize> for Dense<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T: Scalar> std::ops::IndexMut<usize> for Dense<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}
