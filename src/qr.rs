//! QR factorization via Householder reflections.
//!
//! Decomposes an m×n matrix `A` into `A = Q·R` where `Q` (m×m) has
//! orthonormal columns and `R` (m×n) is upper triangular, then solves linear
//! systems by back-substitution on `R`.
//!
//! # Algorithm
//!
//! For each pivot column, the subcolumn `x = R[col.., col]` is mapped onto a
//! multiple of `e₁` by the reflection `H = I − 2vvᵀ` with
//! `v ∝ x + sign(x₀)·‖x‖·e₁`. The sign matches `x₀` so the leading entry
//! never cancels. `H` is applied as a rank-one update and never formed.
//! The reflections are accumulated into `Qᵀ`, which is transposed at the end.
//!
//! Reference: Golub & Van Loan (1996), *Matrix Computations*, §5.2.
//!
//! # Examples
//!
//! ```
//! use u_numkit::matrix::Matrix;
//! use u_numkit::qr::{qr_decompose, solve_qr};
//!
//! let a = Matrix::from_rows(&[&[2.0, 1.0], &[1.0, 3.0]]);
//! let qr = qr_decompose(&a).unwrap();
//! let x = solve_qr(qr.q(), qr.r(), &[3.0, 5.0]).unwrap();
//! assert!((x[0] - 1.0).abs() < 1e-10);
//! assert!((x[1] - 1.0).abs() < 1e-10);
//! ```

use log::{debug, trace};

use crate::config::Tolerances;
use crate::error::{NumError, Result};
use crate::matrix::{norm2, Matrix};

/// Result of a QR decomposition: `A = Q·R`.
#[derive(Debug, Clone, PartialEq)]
pub struct Qr {
    q: Matrix,
    r: Matrix,
}

impl Qr {
    /// Orthogonal factor (m×m).
    pub fn q(&self) -> &Matrix {
        &self.q
    }

    /// Upper-triangular factor (m×n).
    pub fn r(&self) -> &Matrix {
        &self.r
    }

    /// Consumes the factorization, returning `(Q, R)`.
    pub fn into_parts(self) -> (Matrix, Matrix) {
        (self.q, self.r)
    }

    /// Solves `A·x = b` (least squares when `A` is tall). See [`solve_qr`].
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        solve_qr(&self.q, &self.r, b)
    }

    /// Like [`Qr::solve`] with explicit tolerances.
    pub fn solve_with(&self, b: &[f64], tol: &Tolerances) -> Result<Vec<f64>> {
        solve_qr_with(&self.q, &self.r, b, tol)
    }
}

impl Matrix {
    /// QR decomposition of `self`. See [`qr_decompose`].
    pub fn qr(&self) -> Result<Qr> {
        qr_decompose(self)
    }
}

/// Computes the Householder QR factorization of `a`.
///
/// Columns whose remaining subcolumn is exactly zero need no reflection and
/// are skipped. Entries of `R` below the diagonal are set to exactly `0.0`.
///
/// # Errors
/// Returns `Err(InvalidDimensions)` if `a` has no rows or no columns.
///
/// # Complexity
/// O(m²·n).
pub fn qr_decompose(a: &Matrix) -> Result<Qr> {
    let m = a.rows();
    let n = a.cols();
    if a.is_empty() {
        return Err(NumError::InvalidDimensions {
            expected: (m.max(1), n.max(1)),
            got: (m, n),
        });
    }

    let mut r = a.clone();
    let mut qt = Matrix::identity(m);

    for col in 0..m.min(n) {
        let Some(v) = householder_vector(&r, col) else {
            trace!("qr: column {col} already zero, no reflection");
            continue;
        };
        reflect_rows(&mut r, &v, col, col);
        reflect_rows(&mut qt, &v, col, 0);
    }

    // Remove rounding residue below the diagonal
    for i in 1..m {
        for j in 0..i.min(n) {
            r.set(i, j, 0.0);
        }
    }

    Ok(Qr {
        q: qt.transpose(),
        r,
    })
}

/// Unit Householder vector for `r[col.., col]`, or `None` when no
/// reflection is needed.
fn householder_vector(r: &Matrix, col: usize) -> Option<Vec<f64>> {
    let norm_x = r.column_norm(col, col);
    if norm_x == 0.0 {
        return None;
    }
    let mut v: Vec<f64> = (col..r.rows()).map(|i| r.get(i, col)).collect();
    v[0] += if v[0] >= 0.0 { norm_x } else { -norm_x };
    let norm_v = norm2(&v);
    if norm_v == 0.0 {
        return None;
    }
    for t in &mut v {
        *t /= norm_v;
    }
    Some(v)
}

/// Applies `H = I − 2vvᵀ` to rows `start_row..` of `a`, columns `start_col..`.
fn reflect_rows(a: &mut Matrix, v: &[f64], start_row: usize, start_col: usize) {
    for j in start_col..a.cols() {
        let proj: f64 = 2.0
            * v.iter()
                .enumerate()
                .map(|(k, &vk)| vk * a.get(start_row + k, j))
                .sum::<f64>();
        for (k, &vk) in v.iter().enumerate() {
            let val = a.get(start_row + k, j) - proj * vk;
            a.set(start_row + k, j, val);
        }
    }
}

/// Solves `Q·R·x = b` by computing `y = Qᵀb` and back-substituting on `R`.
///
/// With a tall `R` (m > n) the result is the least-squares solution; the
/// trailing `m − n` entries of `y` are the residual and are ignored.
///
/// # Errors
/// - `InvalidDimensions` if `b.len() != Q.rows()`, `Q` is not square,
///   `R.rows() != Q.rows()`, or `R` has more columns than rows.
/// - `SingularMatrix` if some `|R[i][i]|` is below `1e-12`.
pub fn solve_qr(q: &Matrix, r: &Matrix, b: &[f64]) -> Result<Vec<f64>> {
    solve_qr_with(q, r, b, &Tolerances::default())
}

/// [`solve_qr`] with explicit tolerances.
///
/// # Errors
/// Also returns `Err(InvalidConfig)` if `tol` fails [`Tolerances::validate`].
pub fn solve_qr_with(q: &Matrix, r: &Matrix, b: &[f64], tol: &Tolerances) -> Result<Vec<f64>> {
    tol.validate()?;
    let m = q.rows();
    if b.len() != m {
        return Err(NumError::InvalidDimensions {
            expected: (m, 1),
            got: (b.len(), 1),
        });
    }
    if !q.is_square() {
        return Err(NumError::InvalidDimensions {
            expected: (m, m),
            got: (q.rows(), q.cols()),
        });
    }
    let n = r.cols();
    if r.rows() != m {
        return Err(NumError::InvalidDimensions {
            expected: (m, n),
            got: (r.rows(), n),
        });
    }
    if n > m {
        return Err(NumError::InvalidDimensions {
            expected: (m, m),
            got: (r.rows(), n),
        });
    }

    let y = q.mul_transpose_vec(b)?;
    let threshold = tol.threshold_for(r.frobenius_norm());

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let sum: f64 = r.row(i)[i + 1..n]
            .iter()
            .zip(&x[i + 1..])
            .map(|(&rij, &xj)| rij * xj)
            .sum();
        let diag = r.get(i, i);
        if !(diag.abs() >= threshold) {
            debug!("back-substitution: |R[{i}][{i}]| = {:e} below {threshold:e}", diag.abs());
            return Err(NumError::SingularMatrix {
                index: i,
                pivot: diag,
                threshold,
            });
        }
        x[i] = (y[i] - sum) / diag;
    }
    Ok(x)
}

/// Least-squares solution of `A·x ≈ b` via QR.
///
/// # Errors
/// As [`qr_decompose`] and [`solve_qr`]; a rank-deficient or wide `A` fails.
pub fn lstsq(a: &Matrix, b: &[f64]) -> Result<Vec<f64>> {
    qr_decompose(a)?.solve(b)
}

/// Mean squared residual `mean((A·x − b)²)`.
///
/// # Errors
/// Returns `Err(InvalidDimensions)` if `x` or `b` do not fit `a`.
pub fn mean_squared_error(a: &Matrix, x: &[f64], b: &[f64]) -> Result<f64> {
    let ax = a.mul_vec(x)?;
    if b.len() != ax.len() {
        return Err(NumError::InvalidDimensions {
            expected: (ax.len(), 1),
            got: (b.len(), 1),
        });
    }
    if b.is_empty() {
        return Ok(0.0);
    }
    let sse: f64 = ax.iter().zip(b).map(|(p, t)| (p - t) * (p - t)).sum();
    Ok(sse / b.len() as f64)
}
