//! sivector - dense and sparse vectors of SI quantities
//!
//! Values are always stored in SI. A unit attached to a view only affects
//! how values are read in and shown.
//!
//! # Architecture
//!
//! ```text
//! Level 1: Typed views (vector, mutable modules)
//!     → Vector<T, U>          immutable, shared storage
//!     → MutableVector<T, U>   copy-on-write over the same storage
//!
//! Level 2: Storage (storage module)
//!     → VectorData<T>: Dense<T> | Sparse<T>
//!     → element-wise arithmetic, result-kind policy
//!
//! Level 3: Backend implementation (backend module)
//!     → GenericBackend (serial loops)
//!     → RayonBackend (feature "parallel", large arrays)
//! ```
//!
//! # Example
//!
//! ```
//! use sivector::{MutableVector, StorageType, Vector, VectorView};
//! use sivector::unit::SiUnit;
//!
//! // Mostly-zero data is cheaper as sparse storage
//! let a: Vector<f32> = Vector::from_si(&[0.0, 2.0, 0.0, 4.0], SiUnit, StorageType::Sparse);
//! let b: Vector<f32> = Vector::from_si(&[1.0, 1.0, 1.0, 1.0], SiUnit, StorageType::Dense);
//!
//! let sum = a.plus(&b).unwrap();
//! assert!(sum.is_dense());
//! assert_eq!(sum.values_si(), vec![1.0, 3.0, 1.0, 5.0]);
//!
//! // Mutate a derived view; `a` is untouched
//! let mut m: MutableVector<f32> = a.mutable();
//! m.normalize().unwrap();
//! assert_eq!(m.values_si(), vec![0.0, 1.0 / 3.0, 0.0, 2.0 / 3.0]);
//! assert_eq!(a.z_sum(), 6.0);
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod functions;
pub mod mutable;
pub mod scalar;
pub mod scale;
pub mod storage;
pub mod unit;
pub mod vector;

pub use config::StorageType;
pub use error::VectorError;
pub use functions::MathFunction;
pub use mutable::MutableVector;
pub use scalar::Scalar;
pub use scale::{IdentityScale, LinearScale, OffsetLinearScale, Scale};
pub use storage::{Dense, SiIter, Sparse, VectorData};
pub use unit::{SiUnit, Unit};
pub use vector::{Vector, VectorView};
