//! # u-numkit
//!
//! Small, self-contained numerical routines: dense linear algebra and
//! single-source shortest paths.
//!
//! ## Modules
//!
//! - [`matrix`]: Row-major dense [`Matrix`], products, norms, Gauss-Jordan inverse
//! - [`qr`]: Householder QR factorization, back-substitution, least squares
//! - [`pinv`]: Moore-Penrose pseudoinverse and condition-number estimate
//! - [`shortest_path`]: Dijkstra over non-negatively weighted adjacency lists
//! - [`collections`]: Priority queue used by the graph algorithms
//! - [`config`]: Singularity tolerances
//! - [`error`]: [`NumError`] and the crate [`Result`] alias
//!
//! ## Design
//!
//! Every routine is synchronous and allocates its own working storage; no
//! global state is touched, so disjoint inputs may be processed from several
//! threads at once. Failures are reported as [`NumError`] at the point of
//! detection with no partial result. Diagnostics go through the [`log`]
//! facade; the crate never installs a logger.
//!
//! ## Example
//!
//! ```
//! use u_numkit::{inverse, pseudoinverse, Matrix};
//!
//! let a = Matrix::from_rows(&[&[4.0, 7.0], &[2.0, 6.0]]);
//! let inv = inverse(&a).unwrap();
//! let pinv = pseudoinverse(&a).unwrap();
//! assert!((inv.get(0, 1) - pinv.get(0, 1)).abs() < 1e-9);
//! ```

pub mod collections;
pub mod config;
pub mod error;
pub mod matrix;
pub mod pinv;
pub mod qr;
pub mod shortest_path;

pub use config::Tolerances;
pub use error::{NumError, Result};
pub use matrix::{inverse, inverse_with, norm2, Matrix};
pub use pinv::{
    condition_number, condition_number_with, normal_equations, normal_equations_with,
    pseudoinverse, pseudoinverse_with, ridge_regression,
};
pub use qr::{lstsq, qr_decompose, solve_qr, solve_qr_with, Qr};
pub use shortest_path::{dijkstra, dijkstra_with_predecessors, AdjacencyList, ShortestPaths};
