//! Core library for tagcloud.
//!
//! Turns a text file into an HTML tag cloud of its most frequent words.
//!
//! # Modules
//!
//! - [`tokenizer`] - Splitting lines into words and separators
//! - [`frequency`] - Case-insensitive word counting
//! - [`select`] - Top-N selection
//! - [`render`] - Font scaling and HTML output
//! - [`cloud`] - The end-to-end pipeline
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use tagcloud_core::{CloudOptions, FrequencyTable, TagCloud};
//!
//! let options = CloudOptions::default();
//! let text = "apple Apple BANANA banana banana";
//! let table = FrequencyTable::from_reader(text.as_bytes(), &options.separators).unwrap();
//! let cloud = TagCloud::build(&table, 2, "fruit.txt", options.scale);
//!
//! assert_eq!(cloud.words[0].word, "apple");
//! assert_eq!(cloud.words[0].font_size, 35);
//! assert_eq!(cloud.words[1].font_size, 48);
//! ```
#![deny(unsafe_code)]

pub mod cloud;
pub mod config;
pub mod error;
pub mod frequency;
pub mod render;
pub mod select;
pub mod tokenizer;

pub use cloud::{CloudOptions, TagCloud, generate_file};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{CloudError, CloudResult, ConfigError, ConfigResult};
pub use frequency::{FrequencyEntry, FrequencyTable};
pub use render::{FontScale, RenderEntry};
pub use tokenizer::{SeparatorSet, Token};

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 5 * 1024 * 1024;
