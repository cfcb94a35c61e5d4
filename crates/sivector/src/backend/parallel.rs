//! Rayon backend: data-parallel map over the index range.

use rayon::prelude::*;

use crate::backend::ElementwiseBackend;
use crate::scalar::Scalar;

/// Backend splitting each kernel across the global rayon pool.
pub struct RayonBackend;

impl ElementwiseBackend for RayonBackend {
    fn map_inplace<T, F>(data: &mut [T], f: F)
    where
        T: Scalar,
        F: Fn(T) -> T + Send + Sync,
    {
        data.par_iter_mut().for_each(|x| *x = f(*x));
    }

    fn zip_inplace<T, F>(lhs: &mut [T], rhs: &[T], f: F)
    where
        T: Scalar,
        F: Fn(T, T) -> T + Send + Sync,
    {
        debug_assert_eq!(lhs.len(), rhs.len());
        lhs.par_iter_mut()
            .zip(rhs.par_iter())
            .for_each(|(x, &y)| *x = f(*x, y));
    }

    fn zip_map<T, F>(lhs: &[T], rhs: &[T], f: F) -> Vec<T>
    where
        T: Scalar,
        F: Fn(T, T) -> T + Send + Sync,
    {
        debug_assert_eq!(lhs.len(), rhs.len());
        lhs.par_iter()
            .zip(rhs.par_iter())
            .map(|(&x, &y)| f(x, y))
            .collect()
    }

    fn count_nonzero<T: Scalar>(data: &[T]) -> usize {
        data.par_iter().filter(|x| !x.is_zero()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::GenericBackend;

    #[test]
    fn test_rayon_matches_generic() {
        let lhs: Vec<f32> = (0..1000).map(|i| i as f32 * 0.5).collect();
        let rhs: Vec<f32> = (0..1000).map(|i| (i % 3) as f32).collect();
        assert_eq!(
            RayonBackend::zip_map(&lhs, &rhs, |x, y| x - y),
            GenericBackend::zip_map(&lhs, &rhs, |x, y| x - y)
        );
        assert_eq!(
            RayonBackend::count_nonzero(&rhs),
            GenericBackend::count_nonzero(&rhs)
        );
    }

    #[test]
    fn test_rayon_map_inplace() {
        let mut data = vec![1.0f64, -2.0, 3.0];
        RayonBackend::map_inplace(&mut data, |x| x.abs());
        assert_eq!(data, vec![1.0, 2.0, 3.0]);
    }
}
