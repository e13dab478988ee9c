use std::collections::HashSet;

/// The classic English stopword list.
const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you",
    "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "her", "hers", "herself", "it", "its", "itself",
    "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if",
    "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during",
    "before", "after", "above", "below", "to", "from", "up", "down", "in",
    "out", "on", "off", "over", "under", "again", "further", "then",
    "once", "here", "there", "when", "where", "why", "how", "all", "any",
    "both", "each", "few", "more", "most", "other", "some", "such", "no",
    "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    "s", "t", "can", "will", "just", "don", "should", "now",
];

/// ASCII punctuation, one stopword per character. The punctuation-aware
/// tokenizer keeps punctuation runs as tokens, so single marks must be
/// filtered here.
const ASCII_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Smart punctuation code points, kept in the set in case a caller scores
/// text that has not gone through `tokenize::normalize`.
const SMART_MARKS: &[&str] = &["\u{2019}", "\u{2013}", "\u{2014}"];

/// Case-insensitive exclusion set for token filtering. Immutable for the
/// lifetime of an analysis run.
#[derive(Clone, Debug)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// The standard set: English stopwords, ASCII punctuation and smart
    /// punctuation marks.
    pub fn english() -> Stopwords {
        let mut words: HashSet<String> = ENGLISH.iter().map(|&w| w.to_owned()).collect();
        words.extend(ASCII_PUNCTUATION.chars().map(String::from));
        words.extend(SMART_MARKS.iter().map(|&m| m.to_owned()));
        Stopwords { words }
    }

    /// Adds extra stopwords, lowercased.
    pub fn extend<I>(&mut self, extra: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for word in extra {
            self.words.insert(word.as_ref().to_lowercase());
        }
    }

    pub fn contains(&self, token: &str) -> bool {
        if token.chars().any(char::is_uppercase) {
            self.words.contains(&token.to_lowercase())
        } else {
            self.words.contains(token)
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Stopwords {
    fn default() -> Stopwords {
        Stopwords::english()
    }
}

#[cfg(test)]
mod tests {
    use super::Stopwords;

    #[test]
    fn contains_common_words_and_punctuation() {
        let stopwords = Stopwords::english();
        assert!(stopwords.contains("the"));
        assert!(stopwords.contains("not"));
        assert!(stopwords.contains("!"));
        assert!(stopwords.contains("'"));
        assert!(stopwords.contains("\u{2019}"));
        assert!(!stopwords.contains("america"));
    }

    #[test]
    fn contains_is_case_insensitive() {
        let stopwords = Stopwords::english();
        assert!(stopwords.contains("The"));
        assert!(stopwords.contains("NOT"));
    }

    #[test]
    fn extend_lowercases_extra_words() {
        let mut stopwords = Stopwords::english();
        stopwords.extend(["RT", "amp"]);
        assert!(stopwords.contains("rt"));
        assert!(stopwords.contains("RT"));
        assert!(stopwords.contains("amp"));
    }
}
