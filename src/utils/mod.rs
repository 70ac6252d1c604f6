//! Scalar statistics utilities.

mod stats;

pub use stats::{mean, sample_std_dev};
