//! Moore-Penrose pseudoinverse and condition-number estimate.
//!
//! The pseudoinverse is computed from the normal equations:
//!
//! - tall or square (`m ≥ n`): `A⁺ = (AᵀA)⁻¹Aᵀ`
//! - wide (`m < n`): `A⁺ = Aᵀ(AAᵀ)⁻¹`
//!
//! # Limitations
//!
//! Both branches invert a Gram matrix with [`Matrix::inverse`], so they only
//! succeed when `A` has full rank in the relevant dimension. A rank-deficient
//! input fails with `SingularMatrix`; there is no SVD fallback and no
//! regularization. Forming the Gram matrix also squares the condition number,
//! so accuracy degrades faster than an SVD-based pseudoinverse on
//! ill-conditioned inputs.
//!
//! [`normal_equations`] solves the same Gram system for a right-hand side and
//! optionally adds a Tikhonov term `λI`, which keeps rank-deficient designs
//! invertible.

use log::debug;

use crate::config::Tolerances;
use crate::error::{NumError, Result};
use crate::matrix::Matrix;

/// Moore-Penrose pseudoinverse `A⁺` of an m×n matrix, shaped n×m.
///
/// An empty input (no rows or no columns) yields the empty n×m matrix.
///
/// # Errors
/// Returns `Err(SingularMatrix)` if `AᵀA` (tall) or `AAᵀ` (wide) is singular.
///
/// # Examples
/// ```
/// use u_numkit::matrix::Matrix;
/// use u_numkit::pinv::pseudoinverse;
///
/// let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
/// let p = pseudoinverse(&a).unwrap();
/// assert_eq!((p.rows(), p.cols()), (2, 3));
///
/// // A·A⁺·A = A
/// let back = a.mul_mat(&p).unwrap().mul_mat(&a).unwrap();
/// assert!((back.get(2, 1) - 6.0).abs() < 1e-8);
/// ```
pub fn pseudoinverse(a: &Matrix) -> Result<Matrix> {
    pseudoinverse_with(a, &Tolerances::default())
}

/// [`pseudoinverse`] with explicit tolerances for the Gram-matrix inversion.
///
/// # Errors
/// Also returns `Err(InvalidConfig)` if `tol` fails [`Tolerances::validate`],
/// including for empty inputs.
pub fn pseudoinverse_with(a: &Matrix, tol: &Tolerances) -> Result<Matrix> {
    tol.validate()?;
    let (m, n) = (a.rows(), a.cols());
    if a.is_empty() {
        return Ok(Matrix::zeros(n, m));
    }
    let at = a.transpose();
    if m >= n {
        debug!("pseudoinverse: {m}×{n} tall, inverting AᵀA");
        let gram_inv = at.mul_mat(a)?.inverse_with(tol)?;
        gram_inv.mul_mat(&at)
    } else {
        debug!("pseudoinverse: {m}×{n} wide, inverting AAᵀ");
        let gram_inv = a.mul_mat(&at)?.inverse_with(tol)?;
        at.mul_mat(&gram_inv)
    }
}

/// Condition-number estimate `κ ≈ ‖A‖_F · ‖A⁺‖_F`.
///
/// The Frobenius norm is a cheap stand-in for the spectral norm, so this is
/// an upper bound on the 2-norm condition number, not its exact value. For a
/// full-rank n×n input it lies in `[κ₂, n·κ₂]`. An empty input gives `0.0`.
///
/// # Errors
/// Propagates `SingularMatrix` from [`pseudoinverse`].
///
/// # Examples
/// ```
/// use u_numkit::matrix::Matrix;
/// use u_numkit::pinv::condition_number;
///
/// // ‖I₂‖_F² = 2
/// let k = condition_number(&Matrix::identity(2)).unwrap();
/// assert!((k - 2.0).abs() < 1e-12);
/// ```
pub fn condition_number(a: &Matrix) -> Result<f64> {
    condition_number_with(a, &Tolerances::default())
}

/// [`condition_number`] with explicit tolerances.
pub fn condition_number_with(a: &Matrix, tol: &Tolerances) -> Result<f64> {
    let pinv = pseudoinverse_with(a, tol)?;
    Ok(a.frobenius_norm() * pinv.frobenius_norm())
}

/// Least squares through the normal equations `(AᵀA + λI)·x = Aᵀb`.
///
/// Returns the solution together with the condition estimate
/// `‖G‖_F · ‖G⁻¹‖_F` of the regularized Gram matrix `G = AᵀA + λI`, which
/// equals [`condition_number`] of `G` whenever `G` is invertible. With
/// `λ = 0` this is ordinary least squares and needs full column rank; any
/// `λ > 0` makes `G` positive definite.
///
/// # Errors
/// - `InvalidConfig` if `lambda` is negative or not finite
/// - `InvalidDimensions` if `b.len() != a.rows()`
/// - `SingularMatrix` if `G` is singular
///
/// # Examples
/// ```
/// use u_numkit::matrix::Matrix;
/// use u_numkit::pinv::normal_equations;
///
/// let a = Matrix::from_rows(&[&[1.0, 0.0], &[1.0, 1.0], &[1.0, 2.0]]);
/// let (x, cond) = normal_equations(&a, &[1.0, 3.0, 5.0], 0.0).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-10);
/// assert!((x[1] - 2.0).abs() < 1e-10);
/// assert!(cond >= 1.0);
/// ```
pub fn normal_equations(a: &Matrix, b: &[f64], lambda: f64) -> Result<(Vec<f64>, f64)> {
    normal_equations_with(a, b, lambda, &Tolerances::default())
}

/// [`normal_equations`] with explicit tolerances for the Gram-matrix inversion.
pub fn normal_equations_with(
    a: &Matrix,
    b: &[f64],
    lambda: f64,
    tol: &Tolerances,
) -> Result<(Vec<f64>, f64)> {
    tol.validate()?;
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(NumError::InvalidConfig(format!(
            "regularization must be finite and non-negative, got {lambda}"
        )));
    }
    let atb = a.mul_transpose_vec(b)?;
    let mut gram = a.transpose().mul_mat(a)?;
    if lambda != 0.0 {
        for i in 0..gram.rows() {
            gram.set(i, i, gram.get(i, i) + lambda);
        }
    }
    let gram_inv = gram.inverse_with(tol)?;
    let x = gram_inv.mul_vec(&atb)?;
    let cond = gram.frobenius_norm() * gram_inv.frobenius_norm();
    Ok((x, cond))
}

/// Ridge regression: [`normal_equations`] with `λ = alpha`.
pub fn ridge_regression(a: &Matrix, b: &[f64], alpha: f64) -> Result<(Vec<f64>, f64)> {
    normal_equations(a, b, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &Matrix, b: &Matrix, tol: f64) {
        assert_eq!((a.rows(), a.cols()), (b.rows(), b.cols()));
        for i in 0..a.rows() {
            for j in 0..a.cols() {
                assert!(
                    (a.get(i, j) - b.get(i, j)).abs() < tol,
                    "[{i},{j}]: {} vs {}",
                    a.get(i, j),
                    b.get(i, j)
                );
            }
        }
    }

    fn assert_penrose(a: &Matrix, p: &Matrix) {
        let apa = a.mul_mat(p).unwrap().mul_mat(a).unwrap();
        assert_close(&apa, a, 1e-5);
        let pap = p.mul_mat(a).unwrap().mul_mat(p).unwrap();
        assert_close(&pap, p, 1e-5);
    }

    #[test]
    fn test_square_matches_inverse() {
        let a = Matrix::from_rows(&[&[4.0, 7.0], &[2.0, 6.0]]);
        let p = pseudoinverse(&a).unwrap();
        let expected = Matrix::from_rows(&[&[0.6, -0.7], &[-0.2, 0.4]]);
        assert_close(&p, &expected, 1e-6);
        assert_close(&a.mul_mat(&p).unwrap(), &Matrix::identity(2), 1e-6);
    }

    #[test]
    fn test_tall() {
        let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        let p = pseudoinverse(&a).unwrap();
        assert_eq!((p.rows(), p.cols()), (2, 3));
        assert_penrose(&a, &p);
        // Left inverse for full column rank
        assert_close(&p.mul_mat(&a).unwrap(), &Matrix::identity(2), 1e-8);
    }

    #[test]
    fn test_wide() {
        let a = Matrix::from_rows(&[&[1.0, 0.0, 2.0], &[0.0, 1.0, -1.0]]);
        let p = pseudoinverse(&a).unwrap();
        assert_eq!((p.rows(), p.cols()), (3, 2));
        assert_penrose(&a, &p);
        // Right inverse for full row rank
        assert_close(&a.mul_mat(&p).unwrap(), &Matrix::identity(2), 1e-8);
    }

    #[test]
    fn test_empty() {
        let p = pseudoinverse(&Matrix::zeros(0, 0)).unwrap();
        assert!(p.is_empty());
        let p = pseudoinverse(&Matrix::zeros(3, 0)).unwrap();
        assert_eq!((p.rows(), p.cols()), (0, 3));
        assert_eq!(condition_number(&Matrix::zeros(0, 0)).unwrap(), 0.0);
    }

    #[test]
    fn test_rank_deficient_fails() {
        let a = Matrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0], &[3.0, 6.0]]);
        assert!(matches!(
            pseudoinverse(&a),
            Err(NumError::SingularMatrix { .. })
        ));
        assert!(condition_number(&a).is_err());
    }

    #[test]
    fn test_condition_number_tall() {
        let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
        let k = condition_number(&a).unwrap();
        assert!(k.is_finite());
        assert!(k > 0.0 && k < 1e4, "κ = {k}");
    }

    #[test]
    fn test_condition_number_diagonal() {
        // ‖diag(1, 100)‖_F · ‖diag(1, 0.01)‖_F
        let a = Matrix::from_rows(&[&[1.0, 0.0], &[0.0, 100.0]]);
        let expected = (1.0_f64 + 1e4).sqrt() * (1.0_f64 + 1e-4).sqrt();
        assert!((condition_number(&a).unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_invalid_tolerances() {
        let a = Matrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0], &[3.0, 6.0]]);
        let tol = Tolerances {
            singular_threshold: -1.0,
            scale_by_norm: false,
        };
        assert!(matches!(
            pseudoinverse_with(&a, &tol),
            Err(NumError::InvalidConfig(_))
        ));
        assert!(matches!(
            condition_number_with(&a, &tol),
            Err(NumError::InvalidConfig(_))
        ));
        assert!(matches!(
            pseudoinverse_with(&Matrix::zeros(0, 0), &tol),
            Err(NumError::InvalidConfig(_))
        ));
        assert!(matches!(
            normal_equations_with(&a, &[1.0, 2.0, 3.0], 0.0, &tol),
            Err(NumError::InvalidConfig(_))
        ));
    }

    // --- Normal equations ---

    #[test]
    fn test_normal_equations_matches_lstsq() {
        let a = Matrix::from_rows(&[&[1.0, 1.0], &[1.0, 2.0], &[1.0, 3.0]]);
        let b = [1.0, 2.0, 2.0];
        let (x, cond) = normal_equations(&a, &b, 0.0).unwrap();
        let expected = crate::qr::lstsq(&a, &b).unwrap();
        assert!((x[0] - 2.0 / 3.0).abs() < 1e-10);
        assert!((x[1] - 0.5).abs() < 1e-10);
        for (xi, ei) in x.iter().zip(&expected) {
            assert!((xi - ei).abs() < 1e-10);
        }
        // G = [[3, 6], [6, 14]]
        let gram = Matrix::from_rows(&[&[3.0, 6.0], &[6.0, 14.0]]);
        assert!((cond - condition_number(&gram).unwrap()).abs() < 1e-8);
    }

    #[test]
    fn test_ridge_rescues_rank_deficient() {
        let a = Matrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0], &[3.0, 6.0]]);
        let b = [1.0, 2.0, 3.0];
        assert!(matches!(
            normal_equations(&a, &b, 0.0),
            Err(NumError::SingularMatrix { .. })
        ));

        let lambda = 0.1;
        let (x, cond) = normal_equations(&a, &b, lambda).unwrap();
        assert!(cond.is_finite() && cond > 0.0);
        // (AᵀA + λI)·x = Aᵀb
        let mut gram = a.transpose().mul_mat(&a).unwrap();
        for i in 0..2 {
            gram.set(i, i, gram.get(i, i) + lambda);
        }
        let lhs = gram.mul_vec(&x).unwrap();
        let rhs = a.mul_transpose_vec(&b).unwrap();
        for i in 0..2 {
            assert!((lhs[i] - rhs[i]).abs() < 1e-9, "row {i}: {} vs {}", lhs[i], rhs[i]);
        }
        // Ridge picks the minimum-norm direction: x ∥ (1, 2)
        assert!((x[1] - 2.0 * x[0]).abs() < 1e-9);
    }

    #[test]
    fn test_ridge_regression_is_alias() {
        let a = Matrix::from_rows(&[&[2.0, 0.0], &[0.0, 1.0], &[1.0, 1.0]]);
        let b = [1.0, -1.0, 0.5];
        assert_eq!(
            ridge_regression(&a, &b, 0.5).unwrap(),
            normal_equations(&a, &b, 0.5).unwrap()
        );
    }

    #[test]
    fn test_ridge_shrinks_solution() {
        let a = Matrix::identity(2);
        let (x, _) = ridge_regression(&a, &[2.0, 4.0], 1.0).unwrap();
        // (I + I)·x = b
        assert_eq!(x, vec![1.0, 2.0]);
    }

    #[test]
    fn test_normal_equations_invalid_inputs() {
        let a = Matrix::identity(2);
        for lambda in [-0.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                normal_equations(&a, &[1.0, 1.0], lambda),
                Err(NumError::InvalidConfig(_))
            ));
        }
        assert!(matches!(
            normal_equations(&a, &[1.0], 0.0),
            Err(NumError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_condition_number_scalar() {
        let a = Matrix::from_rows(&[&[-4.0]]);
        assert!((condition_number(&a).unwrap() - 1.0).abs() < 1e-15);
    }
}
