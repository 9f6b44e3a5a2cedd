//! Error types for chromagraph operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, converting or adjusting colors.
///
/// "Nothing matched" inside the library (no model detected, no direct
/// conversion edge) is reported through `Option`; these variants are for
/// conditions the caller has to deal with.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Input string or positional array matches no registered model.
    #[error("Unsupported color format: {0}")]
    UnsupportedFormat(String),

    /// A model name outside the registry was requested.
    #[error("Unknown color model: {0}")]
    UnknownModel(String),

    /// Both models are known but the conversion graph does not connect them.
    #[error("Cannot convert from \"{from}\" to \"{to}\"")]
    NoConversionPath {
        /// Source model name.
        from: &'static str,
        /// Target model name.
        to: &'static str,
    },

    /// Increment token matches none of the accepted grammar patterns.
    #[error("Invalid increment: {0}")]
    InvalidIncrement(String),

    /// Keyword is not a CSS named color.
    #[error("Unknown color keyword: {0}")]
    UnknownKeyword(String),

    /// A channel is missing or has the wrong kind (text where a number is required).
    #[error("Invalid channel {index} for model \"{model}\"")]
    InvalidChannel {
        /// Model the channels were interpreted under.
        model: &'static str,
        /// Zero-based channel index.
        index: usize,
    },

    /// Alternate serialization name is not registered.
    #[error("Unknown format \"{name}\" for model \"{model}\"")]
    UnknownFormat {
        /// Model the format was requested for.
        model: &'static str,
        /// Requested format name.
        name: String,
    },

    /// The OS entropy source failed.
    #[error("Entropy source unavailable: {0}")]
    Entropy(String),

    /// Configuration could not be read.
    #[error("Configuration error: {0}")]
    Config(String),
}
