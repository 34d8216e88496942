//! Error types for tagcloud-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,

    /// The configured font range is inverted.
    #[error("min_font_size ({min}) must not exceed max_font_size ({max})")]
    InvalidFontRange {
        /// Configured minimum font size.
        min: u32,
        /// Configured maximum font size.
        max: u32,
    },

    /// The configured separator set is unusable.
    #[error("invalid separators: {0}")]
    InvalidSeparators(String),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while generating a tag cloud.
#[derive(Error, Debug)]
pub enum CloudError {
    /// The output file could not be created.
    #[error("failed to open output file {path}")]
    OutputOpen {
        /// The output path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input file could not be opened.
    #[error("failed to open input file {path}")]
    InputOpen {
        /// The input path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input file exceeds the configured size limit.
    #[error("input too large: {path} is {size} bytes (limit: {limit} bytes)")]
    InputTooLarge {
        /// The input path.
        path: Utf8PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// Reading the input failed part way through.
    #[error("failed to read from input file {path}")]
    Read {
        /// The input path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the HTML failed.
    #[error("failed to write output file {path}")]
    Write {
        /// The output path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`CloudError`].
pub type CloudResult<T> = Result<T, CloudError>;
