//! Generic (plain loop) backend implementation.

use crate::backend::ElementwiseBackend;
use crate::scalar::Scalar;

/// Generic backend using sequential loops.
///
/// Always available; used for short slices and when the `parallel`
/// feature is disabled.
pub struct GenericBackend;

impl ElementwiseBackend for GenericBackend {
    fn map_inplace<T, F>(data: &mut [T], f: F)
    where
        T: Scalar,
        F: Fn(T) -> T + Send + Sync,
    {
        for x in data {
            *x = f(*x);
        }
    }

    fn zip_inplace<T, F>(lhs: &mut [T], rhs: &[T], f: F)
    where
        T: Scalar,
        F: Fn(T, T) -> T + Send + Sync,
    {
        debug_assert_eq!(lhs.len(), rhs.len());
        for (x, &y) in lhs.iter_mut().zip(rhs) {
            *x = f(*x, y);
        }
    }

    fn zip_map<T, F>(lhs: &[T], rhs: &[T], f: F) -> Vec<T>
    where
        T: Scalar,
        F: Fn(T, T) -> T + Send + Sync,
    {
        debug_assert_eq!(lhs.len(), rhs.len());
        lhs.iter().zip(rhs).map(|(&x, &y)| f(x, y)).collect()
    }

    fn count_nonzero<T: Scalar>(data: &[T]) -> usize {
        data.iter().filter(|x| !x.is_zero()).count()
    }
}
