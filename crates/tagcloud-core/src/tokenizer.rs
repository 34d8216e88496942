//! Word/separator tokenization.
//!
//! A line is split into a sequence of tokens, each either a single separator
//! character or a maximal run of non-separator characters. Concatenating the
//! tokens of a line reconstructs it exactly.

use std::fmt;

use crate::error::{ConfigError, ConfigResult};

/// Characters that separate words unless configured otherwise.
pub const DEFAULT_SEPARATORS: &str = " \t\n\r,-.!?[]';:/()";

/// An immutable set of ASCII separator characters.
#[derive(Clone, PartialEq, Eq)]
pub struct SeparatorSet {
    chars: String,
    table: [bool; 128],
}

impl SeparatorSet {
    /// Build a separator set from the characters of `chars`.
    ///
    /// Fails if `chars` is empty or contains a non-ASCII character.
    pub fn new(chars: &str) -> ConfigResult<Self> {
        if chars.is_empty() {
            return Err(ConfigError::InvalidSeparators(
                "separator set must not be empty".to_string(),
            ));
        }

        let mut table = [false; 128];
        let mut unique = String::new();
        for c in chars.chars() {
            if !c.is_ascii() {
                return Err(ConfigError::InvalidSeparators(format!(
                    "separator {c:?} is not an ASCII character"
                )));
            }
            let slot = &mut table[c as usize];
            if !*slot {
                *slot = true;
                unique.push(c);
            }
        }

        Ok(Self {
            chars: unique,
            table,
        })
    }

    /// Whether `c` is a separator.
    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.table[c as usize]
    }

    /// The separator characters, in the order first given.
    pub fn as_str(&self) -> &str {
        &self.chars
    }

    /// Iterate over the tokens of `text`.
    pub fn tokens<'a>(&'a self, text: &'a str) -> Tokens<'a> {
        Tokens {
            text,
            position: 0,
            separators: self,
        }
    }
}

impl Default for SeparatorSet {
    fn default() -> Self {
        let mut table = [false; 128];
        for b in DEFAULT_SEPARATORS.bytes() {
            table[b as usize] = true;
        }
        Self {
            chars: DEFAULT_SEPARATORS.to_string(),
            table,
        }
    }
}

impl fmt::Debug for SeparatorSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SeparatorSet").field(&self.chars).finish()
    }
}

/// Returns the word or single separator starting at byte offset `position`.
///
/// `position` must be a char boundary strictly inside `text`. If the
/// character there is a separator, the token is that one character;
/// otherwise it runs up to the next separator or the end of `text`.
pub fn next_word_or_separator<'a>(
    text: &'a str,
    position: usize,
    separators: &SeparatorSet,
) -> &'a str {
    debug_assert!(position < text.len(), "position {position} out of bounds");
    debug_assert!(text.is_char_boundary(position));

    let rest = &text[position..];
    match rest.chars().next() {
        Some(c) if separators.contains(c) => &rest[..c.len_utf8()],
        _ => {
            let end = rest
                .find(|c: char| separators.contains(c))
                .unwrap_or(rest.len());
            &rest[..end]
        }
    }
}

/// A token of a line of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A maximal run of non-separator characters.
    Word(&'a str),
    /// A single separator character.
    Separator(&'a str),
}

impl<'a> Token<'a> {
    /// The text covered by this token.
    pub const fn as_str(&self) -> &'a str {
        match self {
            Self::Word(s) | Self::Separator(s) => *s,
        }
    }

    /// Whether this token is a word.
    pub const fn is_word(&self) -> bool {
        matches!(self, Self::Word(_))
    }
}

/// Iterator over the tokens of a line. See [`SeparatorSet::tokens`].
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    position: usize,
    separators: &'a SeparatorSet,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.text.len() {
            return None;
        }
        let token = next_word_or_separator(self.text, self.position, self.separators);
        self.position += token.len();

        let is_separator = token.chars().next().is_some_and(|c| self.separators.contains(c));
        Some(if is_separator {
            Token::Separator(token)
        } else {
            Token::Word(token)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seps() -> SeparatorSet {
        SeparatorSet::default()
    }

    #[test]
    fn separator_yields_single_char() {
        assert_eq!(next_word_or_separator("a, b", 1, &seps()), ",");
        assert_eq!(next_word_or_separator("a, b", 2, &seps()), " ");
        assert_eq!(next_word_or_separator("--x", 0, &seps()), "-");
    }

    #[test]
    fn word_runs_to_next_separator() {
        assert_eq!(next_word_or_separator("hello world", 0, &seps()), "hello");
        assert_eq!(next_word_or_separator("hello world", 2, &seps()), "llo");
        assert_eq!(next_word_or_separator("hello world", 6, &seps()), "world");
    }

    #[test]
    fn word_runs_to_end_of_text() {
        assert_eq!(next_word_or_separator("(tail", 1, &seps()), "tail");
    }

    #[test]
    fn non_ascii_words_stay_whole() {
        assert_eq!(next_word_or_separator("café, naïve", 0, &seps()), "café");
        let start = "café, ".len();
        assert_eq!(next_word_or_separator("café, naïve", start, &seps()), "naïve");
    }

    #[test]
    fn tokens_reconstruct_text_from_every_start() {
        let samples = [
            "The quick (brown) fox -- jumped!",
            "  leading and trailing  ",
            "don't stop; it's [fine]/ok?",
            "über: straße.",
            "x",
            ",",
        ];
        let set = seps();
        for text in samples {
            for start in (0..text.len()).filter(|&i| text.is_char_boundary(i)) {
                let mut pos = start;
                let mut rebuilt = String::new();
                while pos < text.len() {
                    let token = next_word_or_separator(text, pos, &set);
                    assert!(!token.is_empty());
                    if token.chars().next().is_some_and(|c| set.contains(c)) {
                        assert_eq!(token.len(), 1, "separator token {token:?}");
                    } else {
                        assert!(!token.chars().any(|c| set.contains(c)), "{token:?}");
                    }
                    rebuilt.push_str(token);
                    pos += token.len();
                }
                assert_eq!(rebuilt, &text[start..]);
            }
        }
    }

    #[test]
    fn iterator_tags_words_and_separators() {
        let set = seps();
        let tokens: Vec<_> = set.tokens("Hi, you").collect();
        assert_eq!(
            tokens,
            vec![
                Token::Word("Hi"),
                Token::Separator(","),
                Token::Separator(" "),
                Token::Word("you"),
            ]
        );
    }

    #[test]
    fn iterator_on_empty_line_is_empty() {
        assert_eq!(seps().tokens("").count(), 0);
    }

    #[test]
    fn custom_set_changes_word_boundaries() {
        let set = SeparatorSet::new("|").unwrap();
        let words: Vec<_> = set
            .tokens("a b|c")
            .filter(Token::is_word)
            .map(|t| t.as_str())
            .collect();
        assert_eq!(words, vec!["a b", "c"]);
    }

    #[test]
    fn custom_set_deduplicates() {
        let set = SeparatorSet::new("..,").unwrap();
        assert_eq!(set.as_str(), ".,");
    }

    #[test]
    fn rejects_empty_set() {
        assert!(matches!(
            SeparatorSet::new(""),
            Err(ConfigError::InvalidSeparators(_))
        ));
    }

    #[test]
    fn rejects_non_ascii_separator() {
        assert!(matches!(
            SeparatorSet::new(" —"),
            Err(ConfigError::InvalidSeparators(_))
        ));
    }

    #[test]
    fn default_matches_constant() {
        let set = seps();
        assert_eq!(set.as_str(), DEFAULT_SEPARATORS);
        for c in DEFAULT_SEPARATORS.chars() {
            assert!(set.contains(c));
        }
        assert!(!set.contains('a'));
        assert!(!set.contains('"'));
        assert!(!set.contains('é'));
    }
}
