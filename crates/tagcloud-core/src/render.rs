//! Font scaling and HTML output.

use std::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cloud::TagCloud;
use crate::error::{ConfigError, ConfigResult};
use crate::frequency::FrequencyEntry;

/// Largest font size defined by the stylesheet.
pub const MAX_FONT_SIZE: u32 = 48;

/// Smallest font size defined by the stylesheet.
pub const MIN_FONT_SIZE: u32 = 11;

/// Stylesheet providing the `f11`..`f48` classes.
pub const DEFAULT_STYLESHEET: &str = "http://web.cse.ohio-state.edu/software/2231/web-sw2/assignments/projects/tag-cloud-generator/data/tagcloud.css";

/// Linear mapping from word count to font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScaleBounds")]
pub struct FontScale {
    min: u32,
    max: u32,
}

#[derive(Deserialize)]
struct ScaleBounds {
    min: u32,
    max: u32,
}

impl TryFrom<ScaleBounds> for FontScale {
    type Error = ConfigError;

    fn try_from(bounds: ScaleBounds) -> ConfigResult<Self> {
        Self::new(bounds.min, bounds.max)
    }
}

impl FontScale {
    /// Create a scale spanning `min..=max`.
    pub fn new(min: u32, max: u32) -> ConfigResult<Self> {
        if min > max {
            return Err(ConfigError::InvalidFontRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Smallest font size.
    pub const fn min(&self) -> u32 {
        self.min
    }

    /// Largest font size.
    pub const fn max(&self) -> u32 {
        self.max
    }

    /// Font size for a word seen `count` times when the most frequent word
    /// was seen `max_count` times.
    ///
    /// `floor(count * (max - min) / max_count) + min`. A count equal to
    /// `max_count` always maps to `max`.
    pub fn font_size(&self, count: usize, max_count: usize) -> u32 {
        debug_assert!(count <= max_count, "count {count} exceeds max {max_count}");
        if max_count == 0 {
            return self.min;
        }
        let count = count.min(max_count) as u128;
        let span = u128::from(self.max - self.min);
        let step = count * span / max_count as u128;
        // step <= span, which fits in u32
        self.min + step as u32
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self {
            min: MIN_FONT_SIZE,
            max: MAX_FONT_SIZE,
        }
    }
}

/// A selected word with its display font size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderEntry {
    /// The lowercase word.
    pub word: String,
    /// Number of occurrences.
    pub count: usize,
    /// Font size in the scale's range.
    pub font_size: u32,
}

/// Order `selection` alphabetically (case-insensitive) and size each word.
pub fn layout(selection: &[FrequencyEntry], max_count: usize, scale: FontScale) -> Vec<RenderEntry> {
    let mut entries: Vec<RenderEntry> = selection
        .iter()
        .map(|e| RenderEntry {
            word: e.word.clone(),
            count: e.count,
            font_size: scale.font_size(e.count, max_count),
        })
        .collect();
    entries.sort_by_cached_key(|e| (e.word.to_lowercase(), e.word.clone()));
    entries
}

/// Write `cloud` as an HTML document linking `stylesheet`.
pub fn write_html<W: Write>(cloud: &TagCloud, stylesheet: &str, out: &mut W) -> io::Result<()> {
    let title = format!(
        "Top {} words in {}",
        cloud.effective_count(),
        Escaped(&cloud.source)
    );

    writeln!(out, "<html>")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<title>{title}</title>")?;
    writeln!(
        out,
        "<link href=\"{}\" rel=\"stylesheet\" type=\"text/css\">",
        Escaped(stylesheet)
    )?;
    writeln!(out, "<style type=\"text/css\"></style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h2>{title}</h2>")?;
    writeln!(out, "<hr>")?;
    writeln!(out, "<div class=\"cdiv\">")?;
    writeln!(out, "<p class=\"cbox\">")?;
    for entry in &cloud.words {
        writeln!(
            out,
            "<span style=\"cursor:default\" class=\"f{}\" title=\"count: {}\">{}</span>",
            entry.font_size,
            entry.count,
            Escaped(&entry.word)
        )?;
    }
    writeln!(out, "</p>")?;
    writeln!(out, "</div>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(())
}

/// Displays text with HTML special characters escaped.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(i) = rest.find(['&', '<', '>', '"']) {
            f.write_str(&rest[..i])?;
            f.write_str(match rest.as_bytes()[i] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                _ => "&quot;",
            })?;
            rest = &rest[i + 1..];
        }
        f.write_str(rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_count_maps_to_max_font() {
        let scale = FontScale::default();
        assert_eq!(scale.font_size(3, 3), 48);
        assert_eq!(scale.font_size(1, 1), 48);
        assert_eq!(scale.font_size(1_000_000, 1_000_000), 48);
    }

    #[test]
    fn truncating_division() {
        let scale = FontScale::default();
        // floor(2 * 37 / 3) + 11
        assert_eq!(scale.font_size(2, 3), 35);
        assert_eq!(scale.font_size(1, 3), 23);
    }

    #[test]
    fn single_occurrence_approaches_min() {
        let scale = FontScale::default();
        assert_eq!(scale.font_size(1, 10_000), 11);
        assert_eq!(scale.font_size(1, 38), 11);
        assert_eq!(scale.font_size(1, 37), 12);
    }

    #[test]
    fn fonts_stay_in_range() {
        let scale = FontScale::new(8, 20).unwrap();
        for max in 1..50 {
            for count in 1..=max {
                let font = scale.font_size(count, max);
                assert!((8..=20).contains(&font), "{count}/{max} -> {font}");
            }
        }
    }

    #[test]
    fn degenerate_scale() {
        let scale = FontScale::new(20, 20).unwrap();
        assert_eq!(scale.font_size(1, 9), 20);
        assert_eq!(scale.font_size(9, 9), 20);
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(matches!(
            FontScale::new(48, 11),
            Err(ConfigError::InvalidFontRange { min: 48, max: 11 })
        ));
    }

    #[test]
    fn deserialize_validates_range() {
        let err = serde_json::from_str::<FontScale>(r#"{"min":48,"max":11}"#).unwrap_err();
        assert!(err.to_string().contains("must not exceed"), "{err}");

        let scale: FontScale = serde_json::from_str(r#"{"min":10,"max":20}"#).unwrap();
        assert_eq!(scale, FontScale::new(10, 20).unwrap());
        assert_eq!(scale.font_size(1, 2), 15);
    }

    #[test]
    fn layout_sorts_alphabetically() {
        let selection = vec![
            FrequencyEntry::new("pear", 9),
            FrequencyEntry::new("apple", 3),
            FrequencyEntry::new("Mango", 5),
        ];
        let entries = layout(&selection, 9, FontScale::default());
        let words: Vec<_> = entries.iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["apple", "Mango", "pear"]);
        assert_eq!(entries[2].font_size, 48);
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(Escaped("<b>&\"x\"").to_string(), "&lt;b&gt;&amp;&quot;x&quot;");
        assert_eq!(Escaped("plain").to_string(), "plain");
        assert_eq!(Escaped("").to_string(), "");
    }

    fn render(cloud: &TagCloud) -> String {
        let mut out = Vec::new();
        write_html(cloud, "style.css", &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn writes_document_shell() {
        let cloud = TagCloud {
            source: "in.txt".to_string(),
            requested: 2,
            distinct_words: 2,
            max_count: 3,
            words: vec![
                RenderEntry {
                    word: "apple".to_string(),
                    count: 2,
                    font_size: 35,
                },
                RenderEntry {
                    word: "banana".to_string(),
                    count: 3,
                    font_size: 48,
                },
            ],
        };
        let expected = "\
<html>
<head>
<title>Top 2 words in in.txt</title>
<link href=\"style.css\" rel=\"stylesheet\" type=\"text/css\">
<style type=\"text/css\"></style>
</head>
<body>
<h2>Top 2 words in in.txt</h2>
<hr>
<div class=\"cdiv\">
<p class=\"cbox\">
<span style=\"cursor:default\" class=\"f35\" title=\"count: 2\">apple</span>
<span style=\"cursor:default\" class=\"f48\" title=\"count: 3\">banana</span>
</p>
</div>
</body>
</html>
";
        assert_eq!(render(&cloud), expected);
    }

    #[test]
    fn empty_cloud_has_empty_container() {
        let cloud = TagCloud {
            source: "empty.txt".to_string(),
            requested: 5,
            distinct_words: 0,
            max_count: 0,
            words: Vec::new(),
        };
        let html = render(&cloud);
        assert!(html.contains("<title>Top 0 words in empty.txt</title>"));
        assert!(html.contains("<p class=\"cbox\">\n</p>"));
        assert!(!html.contains("<span"));
    }

    #[test]
    fn escapes_source_and_words() {
        let cloud = TagCloud {
            source: "a&b.txt".to_string(),
            requested: 1,
            distinct_words: 1,
            max_count: 1,
            words: vec![RenderEntry {
                word: "<tag>".to_string(),
                count: 1,
                font_size: 48,
            }],
        };
        let html = render(&cloud);
        assert!(html.contains("<title>Top 1 words in a&amp;b.txt</title>"));
        assert!(html.contains(">&lt;tag&gt;</span>"));
    }
}
