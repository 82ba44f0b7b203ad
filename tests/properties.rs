//! End-to-end checks of the public API against known results.

use u_numkit::{
    condition_number, dijkstra, inverse, pseudoinverse, qr_decompose, solve_qr, Matrix, NumError,
};

/// Assert two matrices agree elementwise within `tol`.
fn assert_allclose(a: &Matrix, b: &Matrix, tol: f64, msg: &str) {
    assert_eq!(
        (a.rows(), a.cols()),
        (b.rows(), b.cols()),
        "{msg}: shape mismatch"
    );
    for (i, (x, y)) in a.data().iter().zip(b.data()).enumerate() {
        assert!(
            (x - y).abs() <= tol,
            "{msg}: element {i} differs: {x} vs {y}"
        );
    }
}

#[test]
fn inverse_roundtrips() {
    let a = Matrix::from_rows(&[&[3.0, 0.5, -1.0], &[2.0, 4.0, 0.0], &[-1.0, 1.0, 5.0]]);
    let inv = inverse(&a).unwrap();
    assert_allclose(&a.mul_mat(&inv).unwrap(), &Matrix::identity(3), 1e-6, "A·A⁻¹");
    assert_allclose(&inverse(&inv).unwrap(), &a, 1e-6, "(A⁻¹)⁻¹");
}

#[test]
fn inverse_rejects_singular() {
    let a = Matrix::from_rows(&[&[1.0, 2.0], &[2.0, 4.0]]);
    assert!(matches!(inverse(&a), Err(NumError::SingularMatrix { .. })));
}

#[test]
fn inverse_rejects_non_square() {
    let a = Matrix::zeros(3, 2);
    assert_eq!(
        inverse(&a),
        Err(NumError::NonSquareMatrix { rows: 3, cols: 2 })
    );
}

#[test]
fn pseudoinverse_satisfies_penrose_identities() {
    let shapes = [
        Matrix::from_rows(&[&[4.0, 7.0], &[2.0, 6.0]]),
        Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]),
        Matrix::from_rows(&[&[1.0, 3.0, 5.0], &[2.0, 4.0, 7.0]]),
        Matrix::from_rows(&[&[2.0], &[-1.0], &[0.5]]),
    ];
    for a in &shapes {
        let p = pseudoinverse(a).unwrap();
        let apa = a.mul_mat(&p).unwrap().mul_mat(a).unwrap();
        let pap = p.mul_mat(a).unwrap().mul_mat(&p).unwrap();
        assert_allclose(&apa, a, 1e-5, "A·A⁺·A");
        assert_allclose(&pap, &p, 1e-5, "A⁺·A·A⁺");
    }
}

#[test]
fn pseudoinverse_of_empty_is_empty() {
    let p = pseudoinverse(&Matrix::from_rows(&[])).unwrap();
    assert!(p.is_empty());
}

#[test]
fn condition_number_is_finite_and_positive() {
    let a = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0]]);
    let k = condition_number(&a).unwrap();
    assert!(k.is_finite() && k > 0.0, "κ = {k}");
}

#[test]
fn qr_reconstructs_and_is_orthonormal() {
    let a = Matrix::from_rows(&[
        &[12.0, -51.0, 4.0],
        &[6.0, 167.0, -68.0],
        &[-4.0, 24.0, -41.0],
    ]);
    let qr = qr_decompose(&a).unwrap();
    assert_allclose(&qr.q().mul_mat(qr.r()).unwrap(), &a, 1e-6, "Q·R");
    let qtq = qr.q().transpose().mul_mat(qr.q()).unwrap();
    assert_allclose(&qtq, &Matrix::identity(3), 1e-6, "QᵀQ");
}

#[test]
fn solve_qr_recovers_exact_solution() {
    let a = Matrix::from_rows(&[&[2.0, 1.0], &[1.0, 3.0]]);
    let (q, r) = qr_decompose(&a).unwrap().into_parts();
    let x = solve_qr(&q, &r, &[3.0, 5.0]).unwrap();
    assert!((x[0] - 1.0).abs() < 1e-6);
    assert!((x[1] - 1.0).abs() < 1e-6);
}

#[test]
fn solve_qr_rejects_wrong_rhs_length() {
    let a = Matrix::from_rows(&[&[2.0, 1.0], &[1.0, 3.0]]);
    let (q, r) = qr_decompose(&a).unwrap().into_parts();
    assert!(matches!(
        solve_qr(&q, &r, &[1.0, 2.0, 3.0]),
        Err(NumError::InvalidDimensions { .. })
    ));
}

#[test]
fn dijkstra_sample_graph() {
    let adj = vec![
        vec![(1, 1.0), (2, 4.0)],
        vec![(2, 2.0), (3, 5.0)],
        vec![(3, 1.0)],
        vec![],
    ];
    assert_eq!(dijkstra(4, &adj, 0).unwrap(), vec![0.0, 1.0, 3.0, 4.0]);
}

#[test]
fn dijkstra_rejects_any_negative_weight() {
    let adj = vec![vec![(1, 1.0)], vec![], vec![(1, -2.0)]];
    assert!(matches!(
        dijkstra(3, &adj, 0),
        Err(NumError::NegativeWeight { from: 2, to: 1, .. })
    ));
}
