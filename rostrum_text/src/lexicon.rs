use std::collections::HashSet;
use std::error;
use std::fmt;

use crate::emotion::Emotion;

/// The word lists of the NRC word-level emotion lexicon, one distinct set
/// per category. Built once at startup and shared read-only.
#[derive(Clone, Debug, Default)]
pub struct Lexicon {
    categories: [HashSet<String>; 10],
}

impl Lexicon {
    /// Parses the whitespace-delimited `word affect flag` rows of the NRC
    /// lexicon file, skipping `skip_rows` preamble lines. Only rows with
    /// flag `1` are inserted; rows whose affect label is not one of the ten
    /// categories are ignored.
    pub fn parse(src: &str, skip_rows: usize) -> Result<Lexicon, LexiconError> {
        let mut lexicon = Lexicon::default();

        for (line_no, line) in src.lines().enumerate().skip(skip_rows) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (word, affect, flag) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
                (Some(word), Some(affect), Some(flag), None) => (word, affect, flag),
                _ => return Err(LexiconError::MalformedRow { line: line_no + 1 }),
            };

            let applies = match flag {
                "0" => false,
                "1" => true,
                _ => return Err(LexiconError::InvalidFlag {
                    line: line_no + 1,
                    flag: flag.to_owned(),
                }),
            };

            if !applies {
                continue;
            }

            if let Some(emotion) = Emotion::from_label(affect) {
                lexicon.insert(word, emotion);
            }
        }

        Ok(lexicon)
    }

    /// Builds a lexicon from `(word, category, applies)` triples.
    pub fn from_entries<'a, I>(entries: I) -> Lexicon
    where
        I: IntoIterator<Item = (&'a str, Emotion, bool)>,
    {
        let mut lexicon = Lexicon::default();
        for (word, emotion, applies) in entries {
            if applies {
                lexicon.insert(word, emotion);
            }
        }
        lexicon
    }

    fn insert(&mut self, word: &str, emotion: Emotion) {
        self.categories[emotion.index()].insert(word.to_lowercase());
    }

    pub fn words(&self, emotion: Emotion) -> &HashSet<String> {
        &self.categories[emotion.index()]
    }

    /// Total number of `(word, category)` entries.
    pub fn len(&self) -> usize {
        self.categories.iter().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(HashSet::is_empty)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum LexiconError {
    /// A row did not have exactly three columns.
    MalformedRow { line: usize },
    /// A row's flag column was something other than `0` or `1`.
    InvalidFlag { line: usize, flag: String },
}

impl fmt::Display for LexiconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRow { line } =>
                write!(f, "line {}: expected three columns (word, affect, flag)", line),
            Self::InvalidFlag { line, flag } =>
                write!(f, "line {}: flag must be 0 or 1, got {:?}", line, flag),
        }
    }
}

impl error::Error for LexiconError {}

#[cfg(test)]
mod tests {
    use super::{Lexicon, LexiconError};
    use crate::emotion::Emotion;

    const SAMPLE: &str = "\
preamble line one
preamble line two
abandon\tfear\t1
abandon\tjoy\t0
cherish\tjoy\t1
cherish\tpositive\t1
";

    #[test]
    fn parse_skips_preamble_and_zero_flags() {
        let lexicon = Lexicon::parse(SAMPLE, 2).unwrap();
        assert!(lexicon.words(Emotion::Fear).contains("abandon"));
        assert!(!lexicon.words(Emotion::Joy).contains("abandon"));
        assert!(lexicon.words(Emotion::Joy).contains("cherish"));
        assert!(lexicon.words(Emotion::Positive).contains("cherish"));
        assert_eq!(lexicon.len(), 3);
    }

    #[test]
    fn parse_ignores_unknown_affect_labels() {
        let lexicon = Lexicon::parse("word\tboredom\t1\nword\tjoy\t1\n", 0).unwrap();
        assert_eq!(lexicon.len(), 1);
        assert!(lexicon.words(Emotion::Joy).contains("word"));
    }

    #[test]
    fn parse_lowercases_words() {
        let lexicon = Lexicon::parse("Happy\tjoy\t1\n", 0).unwrap();
        assert!(lexicon.words(Emotion::Joy).contains("happy"));
    }

    #[test]
    fn parse_rejects_malformed_rows() {
        assert_eq!(
            Lexicon::parse("word joy\n", 0).unwrap_err(),
            LexiconError::MalformedRow { line: 1 },
        );
        assert_eq!(
            Lexicon::parse("word joy 1 extra\n", 0).unwrap_err(),
            LexiconError::MalformedRow { line: 1 },
        );
    }

    #[test]
    fn parse_rejects_invalid_flags() {
        assert_eq!(
            Lexicon::parse("word\tjoy\t2\n", 0).unwrap_err(),
            LexiconError::InvalidFlag { line: 1, flag: "2".to_owned() },
        );
    }

    #[test]
    fn parse_skips_blank_lines() {
        let lexicon = Lexicon::parse("\nword\tjoy\t1\n\n", 0).unwrap();
        assert_eq!(lexicon.len(), 1);
    }

    #[test]
    fn from_entries_honors_applies_flag() {
        let lexicon = Lexicon::from_entries([
            ("happy", Emotion::Joy, true),
            ("happy", Emotion::Sadness, false),
        ]);
        assert!(lexicon.words(Emotion::Joy).contains("happy"));
        assert!(lexicon.words(Emotion::Sadness).is_empty());
    }
}
