//! Tag cloud assembly: count, select, size, write.
//!
//! [`TagCloud::build`] is the in-memory pipeline; [`generate_file`] wraps it
//! with file handling and the error reporting the CLI needs.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};

use camino::Utf8Path;
use serde::Serialize;

use crate::config::Config;
use crate::error::{CloudError, CloudResult, ConfigError};
use crate::frequency::FrequencyTable;
use crate::render::{self, DEFAULT_STYLESHEET, FontScale, RenderEntry};
use crate::select::{effective_count, find_top_n};
use crate::tokenizer::SeparatorSet;

/// Settings that shape a tag cloud.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudOptions {
    /// Characters that split words.
    pub separators: SeparatorSet,
    /// Font size range.
    pub scale: FontScale,
    /// Stylesheet URL linked from the document head.
    pub stylesheet: String,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            separators: SeparatorSet::default(),
            scale: FontScale::default(),
            stylesheet: DEFAULT_STYLESHEET.to_string(),
        }
    }
}

impl TryFrom<&Config> for CloudOptions {
    type Error = ConfigError;

    fn try_from(config: &Config) -> Result<Self, Self::Error> {
        Ok(Self {
            separators: SeparatorSet::new(&config.separators)?,
            scale: FontScale::new(config.min_font_size, config.max_font_size)?,
            stylesheet: config.stylesheet.clone(),
        })
    }
}

/// A rendered-ready tag cloud.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCloud {
    /// Name of the source shown in the title.
    pub source: String,
    /// Number of words the caller asked for.
    pub requested: i64,
    /// Number of distinct words in the source.
    pub distinct_words: usize,
    /// Highest count of any word in the source.
    pub max_count: usize,
    /// Selected words in display (alphabetical) order.
    pub words: Vec<RenderEntry>,
}

impl TagCloud {
    /// Select the `requested` most frequent words of `table` and size them.
    #[tracing::instrument(skip(table, scale), fields(distinct = table.len()))]
    pub fn build(
        table: &FrequencyTable,
        requested: i64,
        source: &str,
        scale: FontScale,
    ) -> Self {
        let max_count = table.max_count();
        let selection = find_top_n(&table.entries_by_count(), requested);
        let words = render::layout(&selection, max_count, scale);

        Self {
            source: source.to_string(),
            requested,
            distinct_words: table.len(),
            max_count,
            words,
        }
    }

    /// Number of words in the cloud, `min(requested, distinct_words)`.
    pub fn effective_count(&self) -> usize {
        debug_assert_eq!(
            self.words.len(),
            effective_count(self.requested, self.distinct_words)
        );
        self.words.len()
    }

    /// Whether more words were requested than the source contains.
    pub fn is_truncated(&self) -> bool {
        i128::from(self.requested) > self.distinct_words as i128
    }

    /// Write the cloud as HTML.
    pub fn write_html<W: Write>(&self, stylesheet: &str, out: &mut W) -> std::io::Result<()> {
        render::write_html(self, stylesheet, out)
    }
}

/// Count the words of `input` and write a tag cloud of the `requested` most
/// frequent ones to `output`.
///
/// The output file is created before the input is opened, and is left empty
/// if anything fails before rendering. Inputs larger than `max_input_bytes`
/// are rejected without being read.
#[tracing::instrument(skip_all, fields(input = %input, output = %output, requested = requested))]
pub fn generate_file(
    input: &Utf8Path,
    output: &Utf8Path,
    requested: i64,
    options: &CloudOptions,
    max_input_bytes: Option<u64>,
) -> CloudResult<TagCloud> {
    let out_file = File::create(output.as_std_path()).map_err(|source| CloudError::OutputOpen {
        path: output.to_path_buf(),
        source,
    })?;

    let in_file = File::open(input.as_std_path()).map_err(|source| CloudError::InputOpen {
        path: input.to_path_buf(),
        source,
    })?;

    if let Some(limit) = max_input_bytes {
        let size = in_file
            .metadata()
            .map_err(|source| CloudError::InputOpen {
                path: input.to_path_buf(),
                source,
            })?
            .len();
        if size > limit {
            return Err(CloudError::InputTooLarge {
                path: input.to_path_buf(),
                size,
                limit,
            });
        }
    }

    let table = FrequencyTable::from_reader(BufReader::new(in_file), &options.separators)
        .map_err(|source| CloudError::Read {
            path: input.to_path_buf(),
            source,
        })?;

    let cloud = TagCloud::build(&table, requested, input.as_str(), options.scale);

    let write_err = |source: std::io::Error| CloudError::Write {
        path: output.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(out_file);
    cloud
        .write_html(&options.stylesheet, &mut writer)
        .map_err(write_err)?;
    writer.flush().map_err(write_err)?;

    tracing::info!(
        effective = cloud.effective_count(),
        distinct = cloud.distinct_words,
        "tag cloud written"
    );
    Ok(cloud)
}
