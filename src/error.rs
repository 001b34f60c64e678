use thiserror::Error;

/// Errors returned by the clustering routines in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Input slice is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// The divergence function produced NaN or an infinite value for a pair of items.
    #[error("divergence between items {i} and {j} is not finite ({value})")]
    NonFiniteDivergence {
        /// Row item index.
        i: usize,
        /// Column item index.
        j: usize,
        /// Offending value.
        value: f64,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
