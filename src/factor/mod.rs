//! QR factorization of the design matrix.

mod qr;

pub use qr::{invert_upper_triangular, QrFactors};
