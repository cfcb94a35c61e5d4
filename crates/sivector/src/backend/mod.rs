//! Backend abstraction for element-wise kernels.
//!
//! # Backends
//!
//! - `GenericBackend`: plain loops (always available)
//! - `RayonBackend`: data-parallel over the index range (cargo feature `parallel`)
//!
//! Storage code calls the dispatch functions below, which pick the rayon
//! backend once a slice reaches [`PARALLEL_THRESHOLD`]. Every kernel touches
//! each slot independently, so both backends produce bit-identical results.
//! Reductions that depend on summation order stay serial.

mod generic;
#[cfg(feature = "parallel")]
mod parallel;

use crate::scalar::Scalar;

#[cfg(feature = "parallel")]
use crate::config::PARALLEL_THRESHOLD;

pub use generic::GenericBackend;
#[cfg(feature = "parallel")]
pub use parallel::RayonBackend;

/// Backend trait for element-wise operations on flat SI slices.
///
/// Binary kernels require `lhs.len() == rhs.len()`; callers validate sizes
/// before dispatching.
pub trait ElementwiseBackend {
    /// Replace every element `x` with `f(x)`.
    fn map_inplace<T, F>(data: &mut [T], f: F)
    where
        T: Scalar,
        F: Fn(T) -> T + Send + Sync;

    /// Replace every `lhs[i]` with `f(lhs[i], rhs[i])`.
    fn zip_inplace<T, F>(lhs: &mut [T], rhs: &[T], f: F)
    where
        T: Scalar,
        F: Fn(T, T) -> T + Send + Sync;

    /// Allocate `out[i] = f(lhs[i], rhs[i])`.
    fn zip_map<T, F>(lhs: &[T], rhs: &[T], f: F) -> Vec<T>
    where
        T: Scalar,
        F: Fn(T, T) -> T + Send + Sync;

    /// Number of elements that are not exactly zero.
    fn count_nonzero<T: Scalar>(data: &[T]) -> usize;
}

#[cfg(feature = "parallel")]
#[inline]
fn use_parallel(len: usize) -> bool {
    let parallel = len >= PARALLEL_THRESHOLD;
    if parallel {
        log::trace!("dispatching {len}-element kernel to rayon");
    }
    parallel
}

pub(crate) fn map_inplace<T, F>(data: &mut [T], f: F)
where
    T: Scalar,
    F: Fn(T) -> T + Send + Sync,
{
    #[cfg(feature = "parallel")]
    if use_parallel(data.len()) {
        return RayonBackend::map_inplace(data, f);
    }
    GenericBackend::map_inplace(data, f)
}

pub(crate) fn zip_inplace<T, F>(lhs: &mut [T], rhs: &[T], f: F)
where
    T: Scalar,
    F: Fn(T, T) -> T + Send + Sync,
{
    #[cfg(feature = "parallel")]
    if use_parallel(lhs.len()) {
        return RayonBackend::zip_inplace(lhs, rhs, f);
    }
    GenericBackend::zip_inplace(lhs, rhs, f)
}

pub(crate) fn zip_map<T, F>(lhs: &[T], rhs: &[T], f: F) -> Vec<T>
where
    T: Scalar,
    F: Fn(T, T) -> T + Send + Sync,
{
    #[cfg(feature = "parallel")]
    if use_parallel(lhs.len()) {
        return RayonBackend::zip_map(lhs, rhs, f);
    }
    GenericBackend::zip_map(lhs, rhs, f)
}

pub(crate) fn count_nonzero<T: Scalar>(data: &[T]) -> usize {
    #[cfg(feature = "parallel")]
    if use_parallel(data.len()) {
        return RayonBackend::count_nonzero(data);
    }
    GenericBackend::count_nonzero(data)
}

/// Sum in `f64`, left to right. Kept serial so the result does not depend
/// on how work was split.
pub(crate) fn sum<T: Scalar>(data: &[T]) -> T {
    T::from_f64(data.iter().map(|x| x.as_f64()).sum())
}
