//! Sparse storage for vector data.
//!
//! Explicit entries are kept as two parallel arrays, `indices` (strictly
//! ascending, all below the logical length) and `values`. Every index not
//! listed holds an implicit zero.

use std::cmp::Ordering;

use crate::backend;
use crate::error::VectorError;
use crate::scalar::Scalar;
use crate::storage::dense::Dense;

/// Sparse storage - explicit `(index, value)` entries plus a logical length.
///
/// # Example
///
/// ```
/// use sivector::storage::Sparse;
///
/// let s: Sparse<f32> = Sparse::from_parts(vec![1, 3], vec![2.0, 7.0], 5).unwrap();
/// assert_eq!(s.len(), 5);
/// assert_eq!(s.get_si(3), 7.0);
/// assert_eq!(s.get_si(0), 0.0);
/// assert_eq!(s.to_dense().as_slice(), &[0.0, 2.0, 0.0, 7.0, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Sparse<T: Scalar> {
    indices: Vec<usize>,
    values: Vec<T>,
    length: usize,
}

impl<T: Scalar> Sparse<T> {
    /// An all-zero vector of the given logical length.
    pub fn zeros(length: usize) -> Self {
        Self {
            indices: Vec::new(),
            values: Vec::new(),
            length,
        }
    }

    /// Build from explicit entries.
    ///
    /// Entries are kept as given, zeros included.
    ///
    /// # Errors
    ///
    /// Returns `VectorError::InvalidInput` if `indices` and `values` differ in
    /// length, if the indices are not strictly ascending, or if an index is
    /// not below `length`.
    pub fn from_parts(
        indices: Vec<usize>,
        values: Vec<T>,
        length: usize,
    ) -> Result<Self, VectorError> {
        if indices.len() != values.len() {
            return Err(VectorError::invalid_input(format!(
                "sparse layout has {} indices but {} values",
                indices.len(),
                values.len()
            )));
        }
        if let Some(w) = indices.windows(2).find(|w| w[0] >= w[1]) {
            return Err(VectorError::invalid_input(format!(
                "sparse indices must be strictly ascending, found {} before {}",
                w[0], w[1]
            )));
        }
        if let Some(&last) = indices.last() {
            if last >= length {
                return Err(VectorError::invalid_input(format!(
                    "sparse index {last} is out of range for length {length}"
                )));
            }
        }
        Ok(Self {
            indices,
            values,
            length,
        })
    }

    /// Keep the entries of a dense SI array that are not exactly zero.
    pub fn from_dense_values(data: &[T]) -> Self {
        let nnz = backend::count_nonzero(data);
        let mut indices = Vec::with_capacity(nnz);
        let mut values = Vec::with_capacity(nnz);
        // sequential: the write position depends on every earlier slot
        for (i, &x) in data.iter().enumerate() {
            if !x.is_zero() {
                indices.push(i);
                values.push(x);
            }
        }
        Self {
            indices,
            values,
            length: data.len(),
        }
    }

    /// Logical length of the vector.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of explicitly stored entries.
    #[inline]
    pub fn stored_len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Iterate explicit entries in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, T)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Value at `index`; zero when no entry is stored. `index` must be below `len()`.
    pub fn get_si(&self, index: usize) -> T {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => T::zero(),
        }
    }

    /// Write `value` at `index`, inserting an entry if needed.
    ///
    /// Writing zero where no entry exists leaves the layout untouched.
    /// `index` must be below `len()`.
    pub fn set_si(&mut self, index: usize, value: T) {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos] = value,
            Err(_) if value.is_zero() => {}
            Err(pos) => {
                self.indices.insert(pos, index);
                self.values.insert(pos, value);
            }
        }
    }

    /// Number of stored values that are not exactly zero.
    pub fn cardinality(&self) -> usize {
        backend::count_nonzero(&self.values)
    }

    /// Sum of the stored values; implicit zeros contribute nothing.
    pub fn z_sum(&self) -> T {
        backend::sum(&self.values)
    }

    /// Dense equivalent; implicit slots become zero.
    pub fn to_dense(&self) -> Dense<T> {
        let mut data = vec![T::zero(); self.length];
        for (i, x) in self.iter() {
            data[i] = x;
        }
        Dense::from_vec(data)
    }

    /// Apply `f` to the stored values only, then drop entries that became zero.
    ///
    /// Only valid when `f(0) == 0`, otherwise implicit slots would be wrong.
    pub(crate) fn map_stored(&mut self, f: impl Fn(T) -> T + Send + Sync) {
        backend::map_inplace(&mut self.values, f);
        self.prune_zeros();
    }

    /// Replace the contents with the non-zero entries of a full-length dense result.
    pub(crate) fn replace_from_dense(&mut self, data: &[T]) {
        debug_assert_eq!(data.len(), self.length);
        *self = Self::from_dense_values(data);
    }

    /// Union merge of two sparse layouts of equal length. Absent entries count
    /// as zero; zero results are not stored.
    ///
    /// Only valid when `f(0, 0) == 0`.
    pub(crate) fn merge(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        debug_assert_eq!(self.length, other.length);
        let capacity = self.stored_len() + other.stored_len();
        let mut indices = Vec::with_capacity(capacity);
        let mut values = Vec::with_capacity(capacity);
        let (mut i, mut j) = (0, 0);
        while i < self.stored_len() || j < other.stored_len() {
            let ord = match (self.indices.get(i), other.indices.get(j)) {
                (Some(a), Some(b)) => a.cmp(b),
                (Some(_), None) => Ordering::Less,
                _ => Ordering::Greater,
            };
            let (index, value) = match ord {
                Ordering::Equal => {
                    let entry = (self.indices[i], f(self.values[i], other.values[j]));
                    i += 1;
                    j += 1;
                    entry
                }
                Ordering::Less => {
                    let entry = (self.indices[i], f(self.values[i], T::zero()));
                    i += 1;
                    entry
                }
                Ordering::Greater => {
                    let entry = (other.indices[j], f(T::zero(), other.values[j]));
                    j += 1;
                    entry
                }
            };
            if !value.is_zero() {
                indices.push(index);
                values.push(value);
            }
        }
        Self {
            indices,
            values,
            length: self.length,
        }
    }

    fn prune_zeros(&mut self) {
        if self.values.iter().all(|x| !x.is_zero()) {
            return;
        }
        let mut keep = 0;
        for pos in 0..self.values.len() {
            if !self.values[pos].is_zero() {
                self.indices[keep] = self.indices[pos];
                self.values[keep] = self.values[pos];
                keep += 1;
            }
        }
        self.indices.truncate(keep);
        self.values.truncate(keep);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sparse<f32> {
        Sparse::from_parts(vec![1, 3], vec![2.0, 7.0], 5).unwrap()
    }

    #[test]
    fn test_from_parts_validation() {
        assert!(Sparse::<f32>::from_parts(vec![1, 2], vec![1.0], 5).is_err());
        assert!(Sparse::<f32>::from_parts(vec![2, 1], vec![1.0, 1.0], 5).is_err());
        assert!(Sparse::<f32>::from_parts(vec![1, 1], vec![1.0, 1.0], 5).is_err());
        assert!(Sparse::<f32>::from_parts(vec![5], vec![1.0], 5).is_err());
        assert!(Sparse::<f32>::from_parts(vec![], vec![], 0).is_ok());
    }

    #[test]
    fn test_from_parts_keeps_explicit_zero() {
        let s = Sparse::from_parts(vec![0, 2], vec![0.0f32, 4.0], 3).unwrap();
        assert_eq!(s.stored_len(), 2);
        assert_eq!(s.cardinality(), 1);
        assert_eq!(s.z_sum(), 4.0);
    }

    #[test]
    fn test_get_and_to_dense() {
        let s = sample();
        assert_eq!(s.get_si(1), 2.0);
        assert_eq!(s.get_si(2), 0.0);
        assert_eq!(s.to_dense().as_slice(), &[0.0, 2.0, 0.0, 7.0, 0.0]);
        assert_eq!(s.cardinality(), 2);
        assert_eq!(s.z_sum(), 9.0);
    }

    #[test]
    fn test_set_si_insert_keeps_order() {
        let mut s = sample();
        s.set_si(4, 1.0);
        s.set_si(0, 3.0);
        s.set_si(2, 5.0);
        assert_eq!(s.indices(), &[0, 1, 2, 3, 4]);
        assert_eq!(s.values(), &[3.0, 2.0, 5.0, 7.0, 1.0]);
    }

    #[test]
    fn test_set_si_zero() {
        let mut s = sample();
        s.set_si(2, 0.0);
        assert_eq!(s.stored_len(), 2);
        s.set_si(1, 0.0);
        assert_eq!(s.stored_len(), 2);
        assert_eq!(s.get_si(1), 0.0);
        assert_eq!(s.cardinality(), 1);
    }

    #[test]
    fn test_merge_add() {
        let a = Sparse::from_parts(vec![0, 2], vec![1.0f32, 2.0], 4).unwrap();
        let b = Sparse::from_parts(vec![2, 3], vec![-2.0f32, 5.0], 4).unwrap();
        let c = a.merge(&b, |x, y| x + y);
        assert_eq!(c.indices(), &[0, 3]);
        assert_eq!(c.values(), &[1.0, 5.0]);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn test_merge_sub_one_sided() {
        let a = Sparse::from_parts(vec![1], vec![1.0f32], 3).unwrap();
        let b = Sparse::from_parts(vec![2], vec![4.0f32], 3).unwrap();
        let c = a.merge(&b, |x, y| x - y);
        assert_eq!(c.to_dense().as_slice(), &[0.0, 1.0, -4.0]);
    }

    #[test]
    fn test_map_stored_prunes() {
        let mut s = Sparse::from_parts(vec![0, 1], vec![1e-30f32, 3.0], 2).unwrap();
        s.map_stored(|x| x * 1e-30);
        assert_eq!(s.indices(), &[1]);
    }
}
