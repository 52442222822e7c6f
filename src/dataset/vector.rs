//! Dense and sparse numeric vectors.
//!
//! A [`NumericVec`] is semantically a vector indexed `0..len()`. The sparse
//! mode stores only non-zero `(index, value)` pairs; unset indices read as
//! `0.0`.

use ndarray::Array1;

use crate::error::CodecError;

/// Numeric storage mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NumericStorage {
    #[default]
    Dense,
    Sparse,
}

/// Sparse vector with strictly increasing indices and no stored zeros.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SparseVec {
    dim: usize,
    indices: Vec<usize>,
    values: Vec<f64>,
}

impl SparseVec {
    /// Create an all-zero sparse vector of dimension `dim`.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Create from `(index, value)` pairs sorted by index.
    ///
    /// Zero values are dropped.
    pub fn from_pairs<I>(dim: usize, pairs: I) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut vec = Self::new(dim);
        for (index, value) in pairs {
            if index >= dim {
                return Err(CodecError::SparseIndexOutOfRange { index, dim });
            }
            if let Some(&previous) = vec.indices.last() {
                if index <= previous {
                    return Err(CodecError::UnsortedSparseIndices { previous, index });
                }
            }
            vec.push_unchecked(index, value);
        }
        Ok(vec)
    }

    /// Append a value after the last stored index. Zeros are not stored.
    #[inline]
    pub(crate) fn push_unchecked(&mut self, index: usize, value: f64) {
        debug_assert!(index < self.dim);
        debug_assert!(self.indices.last().map_or(true, |&last| last < index));
        if value != 0.0 {
            self.indices.push(index);
            self.values.push(value);
        }
    }

    /// Dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of stored (non-zero) entries.
    #[inline]
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Value at `index`, `0.0` when unset.
    pub fn get(&self, index: usize) -> f64 {
        match self.indices.binary_search(&index) {
            Ok(pos) => self.values[pos],
            Err(_) => 0.0,
        }
    }

    /// Stored indices.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Stored values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Numeric part of a record.
#[derive(Clone, Debug, PartialEq)]
pub enum NumericVec {
    Dense(Array1<f64>),
    Sparse(SparseVec),
}

impl NumericVec {
    /// All-zero vector of the given storage mode.
    pub fn zeros(storage: NumericStorage, dim: usize) -> Self {
        match storage {
            NumericStorage::Dense => NumericVec::Dense(Array1::zeros(dim)),
            NumericStorage::Sparse => NumericVec::Sparse(SparseVec::new(dim)),
        }
    }

    /// Dense vector from a `Vec`.
    pub fn dense(values: Vec<f64>) -> Self {
        NumericVec::Dense(Array1::from(values))
    }

    /// Storage mode.
    #[inline]
    pub fn storage(&self) -> NumericStorage {
        match self {
            NumericVec::Dense(_) => NumericStorage::Dense,
            NumericVec::Sparse(_) => NumericStorage::Sparse,
        }
    }

    #[inline]
    pub fn is_sparse(&self) -> bool {
        matches!(self, NumericVec::Sparse(_))
    }

    /// Logical dimension.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            NumericVec::Dense(v) => v.len(),
            NumericVec::Sparse(v) => v.dim(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `index`; unset sparse indices read as `0.0`.
    ///
    /// # Panics
    ///
    /// Panics if a dense vector is indexed out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> f64 {
        match self {
            NumericVec::Dense(v) => v[index],
            NumericVec::Sparse(v) => v.get(index),
        }
    }

    /// Dense iteration over all `len()` values.
    pub fn iter(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match self {
            NumericVec::Dense(v) => Box::new(v.iter().copied()),
            NumericVec::Sparse(v) => {
                let mut stored = v.indices.iter().zip(v.values.iter()).peekable();
                Box::new((0..v.dim).map(move |i| match stored.peek() {
                    Some(&(&idx, &val)) if idx == i => {
                        stored.next();
                        val
                    }
                    _ => 0.0,
                }))
            }
        }
    }

    /// Iterate over non-zero `(index, value)` pairs.
    pub fn iter_nonzero(&self) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        match self {
            NumericVec::Dense(v) => Box::new(
                v.iter()
                    .copied()
                    .enumerate()
                    .filter(|&(_, value)| value != 0.0),
            ),
            NumericVec::Sparse(v) => {
                Box::new(v.indices.iter().copied().zip(v.values.iter().copied()))
            }
        }
    }

    /// Number of non-zero values.
    pub fn nnz(&self) -> usize {
        match self {
            NumericVec::Dense(v) => v.iter().filter(|&&x| x != 0.0).count(),
            NumericVec::Sparse(v) => v.nnz(),
        }
    }
}
