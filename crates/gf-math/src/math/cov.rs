//! Symmetric 2x2 covariance stored as three scalars.
//!
//! ```text
//! P = [[gg, gv],
//!      [gv, vv]]
//! ```
//!
//! Only one cross term is kept, so symmetry holds by construction.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymCov2 {
    pub gg: f64,
    pub vv: f64,
    pub gv: f64,
}

impl SymCov2 {
    pub fn new(gg: f64, vv: f64, gv: f64) -> Self {
        Self { gg, vv, gv }
    }

    pub fn determinant(&self) -> f64 {
        self.gg * self.vv - self.gv * self.gv
    }

    /// `[a b] P [a b]^T`.
    pub fn quadratic_form(&self, a: f64, b: f64) -> f64 {
        a * a * self.gg + 2.0 * a * b * self.gv + b * b * self.vv
    }

    /// Pearson correlation between the two components, 0 when undefined.
    pub fn correlation(&self) -> f64 {
        let denom = (self.gg * self.vv).sqrt();
        if denom > 0.0 {
            self.gv / denom
        } else {
            0.0
        }
    }

    /// Positive semi-definite up to `tol` (diagonals and determinant).
    pub fn is_positive_semidefinite(&self, tol: f64) -> bool {
        self.gg >= -tol && self.vv >= -tol && self.determinant() >= -tol
    }
}
