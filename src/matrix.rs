//! Dense matrix operations.
//!
//! A minimal, row-major dense matrix type with the primitives the rest of the
//! crate builds on: multiplication, transpose, identity, norms, and matrix
//! inversion by Gauss-Jordan elimination.
//!
//! # Design
//!
//! - **Row-major storage**: `data[i * cols + j] = A[i, j]`
//! - **Value semantics**: every operation returns a fresh `Matrix`; inputs are
//!   borrowed and never mutated
//! - **Empty matrices**: zero rows or zero columns is a valid shape
//! - **Partial pivoting**: Gauss-Jordan picks the largest pivot in each column
//! - **Explicit error handling**: dimension mismatches return
//!   `Err(InvalidDimensions)` rather than panicking
//!
//! # Examples
//!
//! ```
//! use u_numkit::matrix::Matrix;
//!
//! let a = Matrix::from_rows(&[
//!     &[1.0, 2.0],
//!     &[3.0, 4.0],
//! ]);
//! let b = a.transpose();
//! let c = a.mul_mat(&b).unwrap();
//! assert_eq!(c.rows(), 2);
//! assert_eq!(c.cols(), 2);
//! ```

use log::debug;

use crate::config::Tolerances;
use crate::error::{NumError, Result};

/// A dense matrix stored in row-major order.
///
/// # Storage
///
/// Elements are stored contiguously: `data[i * cols + j]` holds `A[i, j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Creates a matrix from raw data in row-major order.
    ///
    /// # Errors
    /// Returns `Err` if `data.len() != rows * cols`.
    ///
    /// # Examples
    /// ```
    /// use u_numkit::matrix::Matrix;
    /// let m = Matrix::new(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// assert_eq!(m.get(0, 2), 3.0);
    /// assert_eq!(m.get(1, 0), 4.0);
    /// ```
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(NumError::InvalidData {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Creates a matrix from row slices. An empty slice gives the 0×0 matrix.
    ///
    /// # Panics
    /// Panics if rows have inconsistent lengths.
    ///
    /// # Examples
    /// ```
    /// use u_numkit::matrix::Matrix;
    /// let m = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]);
    /// assert_eq!(m.get(1, 1), 4.0);
    /// assert!(Matrix::from_rows(&[]).is_empty());
    /// ```
    pub fn from_rows(rows: &[&[f64]]) -> Self {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(
                row.len(),
                ncols,
                "row {i} has {} columns, expected {ncols}",
                row.len()
            );
            data.extend_from_slice(row);
        }
        Self {
            data,
            rows: nrows,
            cols: ncols,
        }
    }

    /// Creates a matrix from owned rows.
    ///
    /// # Errors
    /// Returns `Err(InvalidData)` if a row's length differs from the first row's.
    pub fn try_from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(NumError::InvalidData {
                    expected: ncols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            rows: nrows,
            cols: ncols,
        })
    }

    /// Creates a zero matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    /// Creates an identity matrix.
    ///
    /// # Examples
    /// ```
    /// use u_numkit::matrix::Matrix;
    /// let eye = Matrix::identity(3);
    /// assert_eq!(eye.get(0, 0), 1.0);
    /// assert_eq!(eye.get(0, 1), 0.0);
    /// assert_eq!(eye.get(2, 2), 1.0);
    /// ```
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.data[i * n + i] = 1.0;
        }
        m
    }

    /// Creates a column vector (n×1 matrix) from a slice.
    pub fn from_col(data: &[f64]) -> Self {
        Self {
            data: data.to_vec(),
            rows: data.len(),
            cols: 1,
        }
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the element at (row, col).
    ///
    /// # Panics
    /// Panics if indices are out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Sets the element at (row, col).
    ///
    /// # Panics
    /// Panics if indices are out of bounds.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns the raw data as a slice.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Returns a row as a slice.
    #[inline]
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Copies the matrix out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|i| self.row(i).to_vec()).collect()
    }

    /// Returns the diagonal elements.
    pub fn diag(&self) -> Vec<f64> {
        let n = self.rows.min(self.cols);
        (0..n).map(|i| self.get(i, i)).collect()
    }

    /// Returns true if the matrix is square.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns true if the matrix has zero rows or zero columns.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    // ========================================================================
    // Basic Operations
    // ========================================================================

    /// Transpose: returns Aᵀ.
    ///
    /// # Examples
    /// ```
    /// use u_numkit::matrix::Matrix;
    /// let m = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
    /// let t = m.transpose();
    /// assert_eq!(t.rows(), 3);
    /// assert_eq!(t.cols(), 2);
    /// assert_eq!(t.get(0, 1), 4.0);
    /// ```
    pub fn transpose(&self) -> Self {
        let mut result = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                result.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        result
    }

    /// Matrix multiplication: A · B.
    ///
    /// Uses i-k-j loop order for better cache locality on row-major storage.
    /// Zero entries of `self` are skipped when `other` is entirely finite; the
    /// skipped terms would add `±0.0`, so the result is unchanged.
    ///
    /// # Errors
    /// Returns `Err(InvalidDimensions)` if `self.cols != other.rows`. A
    /// mismatch is a caller bug; it is reported instead of panicking.
    ///
    /// # Complexity
    /// O(n·m·p) where self is n×m and other is m×p.
    ///
    /// # Examples
    /// ```
    /// use u_numkit::matrix::Matrix;
    /// let a = Matrix::identity(3);
    /// let b = Matrix::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
    /// let c = a.mul_mat(&b).unwrap();
    /// assert_eq!(c.get(2, 2), 9.0);
    /// ```
    pub fn mul_mat(&self, other: &Self) -> Result<Self> {
        if self.cols != other.rows {
            return Err(NumError::InvalidDimensions {
                expected: (self.cols, other.cols),
                got: (other.rows, other.cols),
            });
        }
        let skip_zeros = other.data.iter().all(|x| x.is_finite());
        let mut result = Self::zeros(self.rows, other.cols);
        // i-k-j loop order for row-major cache friendliness
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a_ik = self.data[i * self.cols + k];
                if skip_zeros && a_ik == 0.0 {
                    continue;
                }
                let row_start = i * other.cols;
                let other_row_start = k * other.cols;
                for j in 0..other.cols {
                    result.data[row_start + j] += a_ik * other.data[other_row_start + j];
                }
            }
        }
        Ok(result)
    }

    /// Matrix-vector multiplication: A · v.
    ///
    /// # Errors
    /// Returns `Err` if `self.cols != v.len()`.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>> {
        if self.cols != v.len() {
            return Err(NumError::InvalidDimensions {
                expected: (self.cols, 1),
                got: (v.len(), 1),
            });
        }
        let mut result = vec![0.0; self.rows];
        for (i, res) in result.iter_mut().enumerate() {
            *res = self
                .row(i)
                .iter()
                .zip(v.iter())
                .map(|(&a, &b)| a * b)
                .sum();
        }
        Ok(result)
    }

    /// Transposed matrix-vector multiplication: Aᵀ · v, without forming Aᵀ.
    ///
    /// # Errors
    /// Returns `Err` if `self.rows != v.len()`.
    pub fn mul_transpose_vec(&self, v: &[f64]) -> Result<Vec<f64>> {
        if self.rows != v.len() {
            return Err(NumError::InvalidDimensions {
                expected: (self.rows, 1),
                got: (v.len(), 1),
            });
        }
        let mut result = vec![0.0; self.cols];
        for (i, &vi) in v.iter().enumerate() {
            for (res, &a) in result.iter_mut().zip(self.row(i)) {
                *res += a * vi;
            }
        }
        Ok(result)
    }

    /// 2-norm of the column segment `A[start.., col]`.
    ///
    /// # Panics
    /// Panics if `col >= self.cols()`.
    pub fn column_norm(&self, col: usize, start: usize) -> f64 {
        assert!(col < self.cols, "column {col} out of range for {} columns", self.cols);
        (start..self.rows)
            .map(|i| {
                let x = self.get(i, col);
                x * x
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Frobenius norm: ‖A‖_F = √(Σᵢⱼ aᵢⱼ²).
    pub fn frobenius_norm(&self) -> f64 {
        self.data.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let cols = self.cols;
        for j in 0..cols {
            self.data.swap(a * cols + j, b * cols + j);
        }
    }

    // ========================================================================
    // Inversion
    // ========================================================================

    /// Matrix inverse via Gauss-Jordan elimination with partial pivoting,
    /// using the default singularity threshold of `1e-12`.
    ///
    /// # Algorithm
    /// Augments [A | I], reduces to [I | A⁻¹] using row operations.
    ///
    /// Reference: Golub & Van Loan (1996), *Matrix Computations*, §1.2.
    ///
    /// # Errors
    /// Returns `Err(NonSquareMatrix)` if the matrix is not square, and
    /// `Err(SingularMatrix)` if the largest available pivot in some column is
    /// below the threshold.
    ///
    /// # Examples
    /// ```
    /// use u_numkit::matrix::Matrix;
    /// let a = Matrix::from_rows(&[&[4.0, 7.0], &[2.0, 6.0]]);
    /// let inv = a.inverse().unwrap();
    /// let eye = a.mul_mat(&inv).unwrap();
    /// assert!((eye.get(0, 0) - 1.0).abs() < 1e-10);
    /// assert!(eye.get(0, 1).abs() < 1e-10);
    /// ```
    pub fn inverse(&self) -> Result<Self> {
        self.inverse_with(&Tolerances::default())
    }

    /// Matrix inverse with explicit tolerances. See [`Matrix::inverse`].
    ///
    /// # Errors
    /// Also returns `Err(InvalidConfig)` if `tol` fails [`Tolerances::validate`].
    pub fn inverse_with(&self, tol: &Tolerances) -> Result<Self> {
        tol.validate()?;
        if !self.is_square() {
            return Err(NumError::NonSquareMatrix {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let n = self.rows;
        if n == 0 {
            return Ok(Self::zeros(0, 0));
        }

        // Augmented matrix [A | I]
        let n2 = 2 * n;
        let mut aug = Self::zeros(n, n2);
        for i in 0..n {
            aug.data[i * n2..i * n2 + n].copy_from_slice(self.row(i));
            aug.set(i, n + i, 1.0);
        }

        let pivot_tol = tol.threshold_for(self.frobenius_norm());

        for k in 0..n {
            // Partial pivoting
            let mut max_val = aug.get(k, k).abs();
            let mut max_row = k;
            for i in (k + 1)..n {
                let v = aug.get(i, k).abs();
                if v > max_val {
                    max_val = v;
                    max_row = i;
                }
            }
            // NaN pivots fail as well
            if !(max_val >= pivot_tol) {
                debug!("gauss-jordan: pivot {max_val:e} in column {k} below {pivot_tol:e}");
                return Err(NumError::SingularMatrix {
                    index: k,
                    pivot: aug.get(max_row, k),
                    threshold: pivot_tol,
                });
            }
            aug.swap_rows(k, max_row);

            // Scale pivot row
            let pivot = aug.get(k, k);
            for x in &mut aug.data[k * n2..(k + 1) * n2] {
                *x /= pivot;
            }

            // Eliminate column k in all other rows
            for i in 0..n {
                if i == k {
                    continue;
                }
                let factor = aug.get(i, k);
                if factor == 0.0 {
                    continue;
                }
                for j in 0..n2 {
                    let val = aug.get(i, j) - factor * aug.get(k, j);
                    aug.set(i, j, val);
                }
            }
        }

        // Extract right half
        let mut inv = Self::zeros(n, n);
        for i in 0..n {
            inv.data[i * n..(i + 1) * n].copy_from_slice(&aug.row(i)[n..]);
        }
        Ok(inv)
    }
}

// ============================================================================
// Free-function API
// ============================================================================

/// Euclidean norm of a vector: √(Σ vᵢ²).
///
/// # Examples
/// ```
/// assert_eq!(u_numkit::matrix::norm2(&[3.0, 4.0]), 5.0);
/// ```
pub fn norm2(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Returns Aᵀ. See [`Matrix::transpose`].
pub fn transpose(a: &Matrix) -> Matrix {
    a.transpose()
}

/// Returns A · B. See [`Matrix::mul_mat`].
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    a.mul_mat(b)
}

/// Returns the n×n identity matrix.
pub fn identity(n: usize) -> Matrix {
    Matrix::identity(n)
}

/// Returns A⁻¹. See [`Matrix::inverse`].
pub fn inverse(a: &Matrix) -> Result<Matrix> {
    a.inverse()
}

/// Returns A⁻¹ with explicit tolerances.
pub fn inverse_with(a: &Matrix, tol: &Tolerances) -> Result<Matrix> {
    a.inverse_with(tol)
}

// ============================================================================
// Display
// ============================================================================

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.rows {
            write!(f, "[")?;
            for j in 0..self.cols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{:>10.4}", self.get(i, j))?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
