//! Core types for regression diagnostics.

mod cancel;
mod model;
mod options;

pub use cancel::CancelToken;
pub use model::{DiagnosticsError, FittedModel, OlsFit};
pub use options::{DiagnosticsOptions, DiagnosticsOptionsBuilder, OptionsError};
