//! Storage configuration and kernel tuning constants.

use std::fmt;
use std::str::FromStr;

use crate::error::VectorError;

/// Minimum number of elements before a kernel is split across the rayon pool.
///
/// Below this the per-task overhead outweighs the arithmetic.
pub const PARALLEL_THRESHOLD: usize = 16 * 1024;

/// Requested physical layout of a vector's SI values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    /// Every slot is stored, zeros included.
    Dense,
    /// Only explicit entries are stored, alongside their indices.
    Sparse,
}

impl StorageType {
    pub fn is_dense(self) -> bool {
        self == StorageType::Dense
    }

    pub fn is_sparse(self) -> bool {
        self == StorageType::Sparse
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::Dense => f.write_str("DENSE"),
            StorageType::Sparse => f.write_str("SPARSE"),
        }
    }
}

impl FromStr for StorageType {
    type Err = VectorError;

    /// Parse `"dense"` or `"sparse"`, ignoring ASCII case.
    ///
    /// # Example
    ///
    /// ```
    /// use sivector::StorageType;
    ///
    /// assert_eq!("Sparse".parse::<StorageType>().unwrap(), StorageType::Sparse);
    /// assert!("packed".parse::<StorageType>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("dense") {
            Ok(StorageType::Dense)
        } else if s.eq_ignore_ascii_case("sparse") {
            Ok(StorageType::Sparse)
        } else {
            Err(VectorError::invalid_input(format!(
                "unknown storage type {s:?}"
            )))
        }
    }
}
