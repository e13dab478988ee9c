use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use unidecode::unidecode;

use crate::stopwords::Stopwords;

/// Maps smart quotes and dashes to their ASCII equivalents, then
/// transliterates the remainder. Replaces the original's reliance on raw
/// mis-decoded byte sequences in the stopword set.
pub fn normalize(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            c => c,
        })
        .collect();

    unidecode(&replaced)
}

/// Splits text into lowercased word and punctuation runs. Punctuation is
/// kept as tokens here and filtered out by the stopword set, matching the
/// wordpunct tokenization the lexicon was built against.
pub fn tokenize(text: &str) -> Vec<String> {
    lazy_static! {
        static ref WORDPUNCT_RE: Regex = Regex::new(r"\w+|[^\w\s]+").unwrap();
    }

    let normalized = normalize(text);

    WORDPUNCT_RE
        .find_iter(&normalized)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

/// The distinct, stopword-filtered tokens of a document. Only presence
/// matters for emotion scoring, so frequencies are dropped.
pub fn token_set(text: &str, stopwords: &Stopwords) -> HashSet<String> {
    tokenize(text)
        .into_iter()
        .filter(|token| !stopwords.contains(token))
        .collect()
}

/// Stopword-filtered token frequencies.
pub fn token_counts(text: &str, stopwords: &Stopwords) -> HashMap<String, u64> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        if stopwords.contains(&token) {
            continue;
        }
        *counts.entry(token).or_insert(0) += 1;
    }
    counts
}

/// The `n` highest counts, descending; ties break alphabetically so the
/// ordering is stable across runs.
pub fn most_common(counts: &HashMap<String, u64>, n: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = counts
        .iter()
        .map(|(word, &count)| (word.clone(), count))
        .collect();

    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{most_common, normalize, token_counts, token_set, tokenize};
    use crate::stopwords::Stopwords;

    #[test]
    fn tokenize_separates_words_from_punctuation() {
        assert_eq!(tokenize("Don't panic!"), ["don", "'", "t", "panic", "!"]);
        assert_eq!(tokenize("good-hearted"), ["good", "-", "hearted"]);
    }

    #[test]
    fn tokenize_lowercases() {
        assert_eq!(tokenize("AMERICA America"), ["america", "america"]);
    }

    #[test]
    fn tokenize_empty_text() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
    }

    #[test]
    fn normalize_maps_smart_punctuation() {
        assert_eq!(normalize("don\u{2019}t"), "don't");
        assert_eq!(normalize("now \u{2013} then"), "now - then");
        assert_eq!(normalize("\u{201c}quoted\u{201d}"), "\"quoted\"");
    }

    #[test]
    fn tokenize_handles_smart_quotes_like_ascii() {
        assert_eq!(tokenize("don\u{2019}t"), tokenize("don't"));
    }

    #[test]
    fn token_set_filters_and_deduplicates() {
        let stopwords = Stopwords::english();
        let tokens = token_set("The land, the land, the LAND!", &stopwords);
        assert_eq!(tokens.len(), 1);
        assert!(tokens.contains("land"));
    }

    #[test]
    fn token_counts_keeps_frequencies() {
        let stopwords = Stopwords::english();
        let counts = token_counts("jobs, jobs, jobs and trade", &stopwords);
        assert_eq!(counts.get("jobs"), Some(&3));
        assert_eq!(counts.get("trade"), Some(&1));
        assert_eq!(counts.get("and"), None);
        assert_eq!(counts.get(","), None);
    }

    #[test]
    fn most_common_orders_by_count_then_word() {
        let mut counts = HashMap::new();
        counts.insert("beta".to_owned(), 2);
        counts.insert("alpha".to_owned(), 2);
        counts.insert("gamma".to_owned(), 5);

        let top = most_common(&counts, 2);
        assert_eq!(top, [("gamma".to_owned(), 5), ("alpha".to_owned(), 2)]);
    }
}
