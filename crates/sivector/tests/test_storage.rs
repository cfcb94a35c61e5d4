//! Tests for VectorData storage.
//!
//! Covers:
//! - Dense and sparse construction from values, SI values and maps
//! - Binary operation results and the result-kind table
//! - In-place operations keeping the receiver's kind
//! - Size mismatch errors
//! - Special values (NaN, infinity) across kinds

use std::collections::BTreeMap;

use approx::assert_relative_eq;
use sivector::{LinearScale, MathFunction, OffsetLinearScale, StorageType, VectorData, VectorError};

fn dense(values: &[f64]) -> VectorData<f64> {
    VectorData::from_si(values, StorageType::Dense)
}

fn sparse(values: &[f64]) -> VectorData<f64> {
    VectorData::from_si(values, StorageType::Sparse)
}

/// Test the dense plus/times scenario.
#[test]
fn test_dense_plus_times() {
    let a = dense(&[1.0, 0.0, 3.0]);
    let b = dense(&[4.0, 5.0, 0.0]);

    let sum = a.plus(&b).unwrap();
    assert!(sum.is_dense());
    assert_eq!(sum.values_si(), vec![5.0, 5.0, 3.0]);
    assert_eq!(sum.z_sum(), 13.0);

    let product = a.times(&b).unwrap();
    assert!(product.is_dense());
    assert_eq!(product.values_si(), vec![4.0, 0.0, 0.0]);
    assert_eq!(product.cardinality(), 1);
}

/// Test a sparse vector built from an index map.
#[test]
fn test_sparse_from_map() {
    let map = BTreeMap::from([(1, 2.0), (3, 7.0)]);
    let v = VectorData::from_si_map(&map, 5, StorageType::Sparse).unwrap();
    assert!(v.is_sparse());
    assert_eq!(v.size(), 5);
    assert_eq!(v.to_dense().as_slice(), &[0.0, 2.0, 0.0, 7.0, 0.0]);
    assert_eq!(v.cardinality(), 2);
    assert_eq!(v.z_sum(), 9.0);
}

/// Test that a map key at or beyond the length is rejected.
#[test]
fn test_map_key_out_of_range() {
    let map = BTreeMap::from([(5, 1.0f32)]);
    let err = VectorData::from_si_map(&map, 5, StorageType::Dense).unwrap_err();
    assert!(matches!(err, VectorError::InvalidInput { .. }));
}

/// Test conversion of display-unit values to SI on construction.
#[test]
fn test_from_values_with_scale() {
    let km = LinearScale::new(1000.0);
    let v = VectorData::from_values(&[1.0, 0.0, 2.5], &km, StorageType::Sparse);
    assert_eq!(v.values_si(), vec![1000.0, 0.0, 2500.0]);
    assert_eq!(v.cardinality(), 2);
}

/// Test an offset scale, where a display zero is not an SI zero.
#[test]
fn test_from_values_offset_scale() {
    let celsius = OffsetLinearScale::new(1.0, 273.15);
    let v = VectorData::from_values(&[0.0, 100.0], &celsius, StorageType::Sparse);
    assert_eq!(v.cardinality(), 2);
    assert_relative_eq!(v.get_si(0).unwrap(), 273.15, epsilon = 1e-9);
    assert_relative_eq!(v.get_si(1).unwrap(), 373.15, epsilon = 1e-9);
}

/// Test the result kind of every binary operation for every operand pair.
#[test]
fn test_result_kind_table() {
    let d = dense(&[1.0, 0.0, 2.0]);
    let s = sparse(&[0.0, 3.0, 2.0]);

    for (lhs, rhs) in [(&d, &d), (&d, &s), (&s, &d), (&s, &s)] {
        let both_sparse = lhs.is_sparse() && rhs.is_sparse();
        let both_dense = lhs.is_dense() && rhs.is_dense();
        assert_eq!(lhs.plus(rhs).unwrap().is_sparse(), both_sparse);
        assert_eq!(lhs.minus(rhs).unwrap().is_sparse(), both_sparse);
        assert_eq!(lhs.times(rhs).unwrap().is_dense(), both_dense);
        assert_eq!(lhs.divide(rhs).unwrap().is_dense(), both_dense);
    }
}

/// Test that values do not depend on the operand kinds.
#[test]
fn test_results_agree_across_kinds() {
    let a = [1.5, 0.0, -2.0, 4.0];
    let b = [0.5, 3.0, 0.0, 2.0];
    let expected_sum = dense(&a).plus(&dense(&b)).unwrap();
    let expected_product = dense(&a).times(&dense(&b)).unwrap();
    for lhs in [dense(&a), sparse(&a)] {
        for rhs in [dense(&b), sparse(&b)] {
            assert_eq!(lhs.plus(&rhs).unwrap(), expected_sum);
            assert_eq!(lhs.times(&rhs).unwrap(), expected_product);
        }
    }
}

/// Test that 0 * inf and 0 / 0 give NaN when one operand is sparse.
#[test]
fn test_nan_from_implicit_zero() {
    let s = sparse(&[0.0, 1.0]);
    let d = dense(&[f64::INFINITY, 2.0]);
    let product = s.times(&d).unwrap();
    assert!(product.is_sparse());
    assert!(product.get_si(0).unwrap().is_nan());
    assert_eq!(product.get_si(1).unwrap(), 2.0);

    let quotient = s.divide(&sparse(&[0.0, 4.0])).unwrap();
    assert!(quotient.get_si(0).unwrap().is_nan());
    assert_eq!(quotient.get_si(1).unwrap(), 0.25);
}

/// Test that a NaN counts toward cardinality.
#[test]
fn test_cardinality_counts_nan() {
    let v = sparse(&[f64::NAN, 0.0, 1.0]);
    assert_eq!(v.cardinality(), 2);
    assert!(v.z_sum().is_nan());
}

/// Test size mismatch on binary and in-place operations.
#[test]
fn test_size_mismatch() {
    let a = dense(&[1.0, 2.0, 3.0]);
    let b = sparse(&[1.0, 2.0]);
    assert_eq!(
        a.plus(&b).unwrap_err(),
        VectorError::SizeMismatch {
            operation: "plus",
            expected: 3,
            actual: 2,
        }
    );
    assert!(a.divide(&b).is_err());

    let mut c = a.clone();
    assert!(c.multiply_by(&b).is_err());
    assert_eq!(c, a);
}

/// Test that in-place operations keep the receiver's kind.
#[test]
fn test_inplace_keeps_kind() {
    let mut s = sparse(&[1.0, 0.0, 0.0]);
    s.increment_by(&dense(&[1.0, 1.0, 0.0])).unwrap();
    assert!(s.is_sparse());
    assert_eq!(s.values_si(), vec![2.0, 1.0, 0.0]);

    let mut d = dense(&[2.0, 2.0, 2.0]);
    d.divide_by(&sparse(&[1.0, 4.0, 2.0])).unwrap();
    assert!(d.is_dense());
    assert_eq!(d.values_si(), vec![2.0, 0.5, 1.0]);

    s.decrement_by(&s.clone()).unwrap();
    assert!(s.is_sparse());
    assert_eq!(s.cardinality(), 0);
}

/// Test scalar broadcast over sparse storage.
#[test]
fn test_sparse_scalar_broadcast() {
    let mut s = sparse(&[0.0, 2.0, 0.0]);
    s.multiply_by_scalar(3.0);
    assert_eq!(s.values_si(), vec![0.0, 6.0, 0.0]);

    s.increment_by_scalar(1.0);
    assert!(s.is_sparse());
    assert_eq!(s.values_si(), vec![1.0, 7.0, 1.0]);

    s.decrement_by_scalar(1.0);
    assert_eq!(s.cardinality(), 1);

    s.divide_by_scalar(0.0);
    assert!(s.get_si(0).unwrap().is_nan());
    assert!(s.get_si(1).unwrap().is_infinite());
}

/// Test assign with zero-preserving and non-preserving functions.
#[test]
fn test_assign() {
    let mut s = sparse(&[0.0, -4.0]);
    s.assign(MathFunction::Abs);
    assert_eq!(s.values_si(), vec![0.0, 4.0]);

    s.assign(MathFunction::Cos);
    assert!(s.is_sparse());
    assert_eq!(s.get_si(0).unwrap(), 1.0);
    assert_relative_eq!(s.get_si(1).unwrap(), 4.0f64.cos(), epsilon = 1e-12);
}

/// Test bounds checking on get and set.
#[test]
fn test_index_out_of_range() {
    let mut v = sparse(&[1.0, 2.0]);
    assert_eq!(
        v.get_si(2).unwrap_err(),
        VectorError::IndexOutOfRange { index: 2, size: 2 }
    );
    assert!(v.set_si(7, 1.0).is_err());
    v.set_si(0, 0.0).unwrap();
    assert_eq!(v.cardinality(), 1);
}

/// Test that zero-length vectors are valid.
#[test]
fn test_empty_vectors() {
    let a = dense(&[]);
    let b = sparse(&[]);
    let sum = a.plus(&b).unwrap();
    assert_eq!(sum.size(), 0);
    assert_eq!(sum.z_sum(), 0.0);
    assert_eq!(sum.cardinality(), 0);
    assert_eq!(a, b);
}

/// Test that assign gives the same content on dense and sparse `f32` data
/// when the function parameter overflows or underflows on narrowing.
#[test]
fn test_assign_narrowed_parameter_agrees_across_kinds() {
    let functions = [
        MathFunction::Mult(1e300),
        MathFunction::Div(1e-50),
        MathFunction::Pow(1e-50),
    ];
    for f in functions {
        let mut d = VectorData::from_si(&[0.0f32, 2.0], StorageType::Dense);
        let mut s = VectorData::from_si(&[0.0f32, 2.0], StorageType::Sparse);
        d.assign(f);
        s.assign(f);
        assert!(s.is_sparse());
        for (x, y) in d.iter_si().zip(s.iter_si()) {
            assert!(x == y || (x.is_nan() && y.is_nan()), "{f:?}: {x} vs {y}");
        }
    }
    let mut s = VectorData::from_si(&[0.0f32, 2.0], StorageType::Sparse);
    s.assign(MathFunction::Pow(1e-50));
    assert_eq!(s.values_si(), vec![1.0, 1.0]);
}
