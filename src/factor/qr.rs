//! Thin QR factors and triangular inversion.

use faer::Mat;

use crate::core::DiagnosticsError;

/// QR factors of an n×p design matrix with n >= p.
///
/// `q` holds the first p columns of the orthogonal factor and `r` the leading
/// p×p upper-triangular block of the full factorization, so `x ≈ q * r`.
/// The hat matrix diagonal, the full hat matrix, and the coefficient
/// covariance are all derived from these two factors.
#[derive(Debug, Clone)]
pub struct QrFactors {
    q: Mat<f64>,
    r: Mat<f64>,
}

impl QrFactors {
    /// Factor the design matrix.
    pub fn compute(x: &Mat<f64>) -> Self {
        let n = x.nrows();
        let p = x.ncols();

        let qr = x.as_ref().qr();
        let q_full = qr.compute_Q();
        let r_full = qr.R();

        // First p columns of Q, taken in a single pass.
        let q = Mat::from_fn(n, p, |i, j| q_full[(i, j)]);
        // Leading p×p block of R; entries below the diagonal are exactly zero.
        let r = Mat::from_fn(p, p, |i, j| if j >= i { r_full[(i, j)] } else { 0.0 });

        Self { q, r }
    }

    /// The thin orthogonal factor, n×p.
    pub fn q(&self) -> &Mat<f64> {
        &self.q
    }

    /// The p×p upper-triangular factor.
    pub fn r(&self) -> &Mat<f64> {
        &self.r
    }

    /// Number of diagonal entries of R above `tolerance` in magnitude.
    pub fn rank(&self, tolerance: f64) -> usize {
        (0..self.r.nrows())
            .filter(|&i| self.r[(i, i)].abs() > tolerance)
            .count()
    }

    /// Whether every column of the design matrix is linearly independent.
    pub fn is_full_rank(&self, tolerance: f64) -> bool {
        self.rank(tolerance) == self.r.nrows()
    }
}

/// Invert an upper-triangular matrix by back-substitution, solving
/// `R x = e_j` for one column of the identity at a time.
///
/// Fails with `SingularMatrix` when a diagonal entry is at or below
/// `tolerance` in magnitude.
pub fn invert_upper_triangular(
    r: &Mat<f64>,
    tolerance: f64,
) -> Result<Mat<f64>, DiagnosticsError> {
    let p = r.nrows();

    for i in 0..p {
        if r[(i, i)].abs() <= tolerance {
            return Err(DiagnosticsError::SingularMatrix);
        }
    }

    let mut inv = Mat::zeros(p, p);
    for col in 0..p {
        // Columns of the inverse of an upper-triangular matrix are zero
        // below the diagonal, so only rows 0..=col are solved.
        for i in (0..=col).rev() {
            let mut sum = if i == col { 1.0 } else { 0.0 };
            for j in (i + 1)..=col {
                sum -= r[(i, j)] * inv[(j, col)];
            }
            inv[(i, col)] = sum / r[(i, i)];
        }
    }

    Ok(inv)
}
