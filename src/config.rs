//! Numerical tolerances.
//!
//! Singularity detection in [`inverse`](crate::matrix::Matrix::inverse) and
//! [`solve_qr`](crate::qr::solve_qr) compares pivots and diagonal entries
//! against an absolute threshold, `1e-12` by default. Setting
//! `scale_by_norm` switches to a threshold relative to the Frobenius norm of
//! the input, in the spirit of `pivot_tol = ε·‖A‖_F`.
//!
//! # Examples
//!
//! ```
//! use u_numkit::config::Tolerances;
//!
//! let tol = Tolerances::from_toml_str("singular_threshold = 1e-10").unwrap();
//! assert_eq!(tol.singular_threshold, 1e-10);
//! assert!(!tol.scale_by_norm);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{NumError, Result};

/// Default absolute singularity threshold.
pub const DEFAULT_SINGULAR_THRESHOLD: f64 = 1e-12;

/// Thresholds used for singularity detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Pivots or diagonal entries with absolute value below this fail.
    pub singular_threshold: f64,
    /// Multiply the threshold by `max(‖A‖_F, 1)`.
    pub scale_by_norm: bool,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            singular_threshold: DEFAULT_SINGULAR_THRESHOLD,
            scale_by_norm: false,
        }
    }
}

impl Tolerances {
    /// Parses tolerances from a TOML document. Missing keys take defaults.
    ///
    /// # Errors
    /// Returns `Err(InvalidConfig)` on malformed TOML or a threshold that is
    /// not finite and positive.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let tol: Self = toml::from_str(s).map_err(|e| NumError::InvalidConfig(e.to_string()))?;
        tol.validate()?;
        Ok(tol)
    }

    /// Checks that the threshold is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.singular_threshold.is_finite() || self.singular_threshold <= 0.0 {
            return Err(NumError::InvalidConfig(format!(
                "singular_threshold must be finite and positive, got {}",
                self.singular_threshold
            )));
        }
        Ok(())
    }

    /// Absolute threshold for an input whose magnitude is `scale`.
    #[inline]
    pub fn threshold_for(&self, scale: f64) -> f64 {
        if self.scale_by_norm {
            self.singular_threshold * scale.max(1.0)
        } else {
            self.singular_threshold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let tol = Tolerances::default();
        assert_eq!(tol.singular_threshold, 1e-12);
        assert!(!tol.scale_by_norm);
        assert_eq!(tol.threshold_for(1e6), 1e-12);
    }

    #[test]
    fn test_scaled_threshold() {
        let tol = Tolerances {
            singular_threshold: 1e-12,
            scale_by_norm: true,
        };
        assert_eq!(tol.threshold_for(100.0), 1e-10);
        // Small matrices never loosen below the absolute threshold
        assert_eq!(tol.threshold_for(1e-3), 1e-12);
    }

    #[test]
    fn test_from_toml() {
        let tol =
            Tolerances::from_toml_str("singular_threshold = 1e-9\nscale_by_norm = true").unwrap();
        assert_eq!(tol.singular_threshold, 1e-9);
        assert!(tol.scale_by_norm);
    }

    #[test]
    fn test_from_toml_empty_is_default() {
        assert_eq!(Tolerances::from_toml_str("").unwrap(), Tolerances::default());
    }

    #[test]
    fn test_from_toml_rejects_nonpositive() {
        assert!(matches!(
            Tolerances::from_toml_str("singular_threshold = -1.0"),
            Err(NumError::InvalidConfig(_))
        ));
        assert!(matches!(
            Tolerances::from_toml_str("singular_threshold = 0.0"),
            Err(NumError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_toml_rejects_garbage() {
        assert!(matches!(
            Tolerances::from_toml_str("singular_threshold = \"tiny\""),
            Err(NumError::InvalidConfig(_))
        ));
    }
}
