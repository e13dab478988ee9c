use std::collections::HashMap;

use rust_stemmers::{Algorithm, Stemmer};

use crate::stopwords::Stopwords;
use crate::tokenize;

/// Stemmed token frequencies for top-word ranking. Stopwords are filtered
/// before stemming so that stems of stopwords cannot slip through. Not used
/// for emotion scoring, where stemming would break lexicon matches.
pub fn stemmed_counts(text: &str, stopwords: &Stopwords) -> HashMap<String, u64> {
    let stemmer = Stemmer::create(Algorithm::English);

    let mut counts = HashMap::new();
    for token in tokenize::tokenize(text) {
        if stopwords.contains(&token) {
            continue;
        }
        let stem = stemmer.stem(&token).into_owned();
        *counts.entry(stem).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::stemmed_counts;
    use crate::stopwords::Stopwords;

    #[test]
    fn variants_collapse_to_one_stem() {
        let counts = stemmed_counts("run running runs", &Stopwords::english());
        assert_eq!(counts.get("run"), Some(&3));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn stopwords_are_filtered_before_stemming() {
        let counts = stemmed_counts("the jobs and the wages", &Stopwords::english());
        assert_eq!(counts.get("job"), Some(&1));
        assert_eq!(counts.get("wage"), Some(&1));
        assert!(!counts.contains_key("the"));
    }

    #[test]
    fn empty_text_yields_no_counts() {
        assert!(stemmed_counts("", &Stopwords::english()).is_empty());
    }
}
