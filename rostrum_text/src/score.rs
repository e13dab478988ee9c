use std::collections::HashSet;

use serde::Serialize;

use crate::emotion::Emotion;
use crate::lexicon::Lexicon;
use crate::stopwords::Stopwords;
use crate::tokenize;

/// Distinct lexicon-word matches per emotion category for one document.
/// The category set is always exactly the ten fixed categories; documents
/// with no matches score zero everywhere.
#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ScoreRecord {
    pub positive: u32,
    pub negative: u32,
    pub anger: u32,
    pub anticipation: u32,
    pub disgust: u32,
    pub fear: u32,
    pub joy: u32,
    pub sadness: u32,
    pub surprise: u32,
    pub trust: u32,
}

impl ScoreRecord {
    pub fn get(&self, emotion: Emotion) -> u32 {
        match emotion {
            Emotion::Positive => self.positive,
            Emotion::Negative => self.negative,
            Emotion::Anger => self.anger,
            Emotion::Anticipation => self.anticipation,
            Emotion::Disgust => self.disgust,
            Emotion::Fear => self.fear,
            Emotion::Joy => self.joy,
            Emotion::Sadness => self.sadness,
            Emotion::Surprise => self.surprise,
            Emotion::Trust => self.trust,
        }
    }

    fn get_mut(&mut self, emotion: Emotion) -> &mut u32 {
        match emotion {
            Emotion::Positive => &mut self.positive,
            Emotion::Negative => &mut self.negative,
            Emotion::Anger => &mut self.anger,
            Emotion::Anticipation => &mut self.anticipation,
            Emotion::Disgust => &mut self.disgust,
            Emotion::Fear => &mut self.fear,
            Emotion::Joy => &mut self.joy,
            Emotion::Sadness => &mut self.sadness,
            Emotion::Surprise => &mut self.surprise,
            Emotion::Trust => &mut self.trust,
        }
    }

    /// The counts in `Emotion::ALL` order.
    pub fn to_array(&self) -> [u32; 10] {
        Emotion::ALL.map(|emotion| self.get(emotion))
    }

    pub fn total(&self) -> u32 {
        self.to_array().iter().sum()
    }
}

/// Counts, per emotion category, how many distinct lexicon words for that
/// category appear in `text`. Presence, not frequency: a word repeated
/// throughout a speech contributes once, so the score measures breadth of
/// emotional vocabulary rather than intensity.
pub fn score(text: &str, lexicon: &Lexicon, stopwords: &Stopwords) -> ScoreRecord {
    let tokens = tokenize::token_set(text, stopwords);
    score_tokens(&tokens, lexicon)
}

/// Scores an already-extracted token set. Useful when the caller also needs
/// the distinct token count, avoiding a second tokenization pass.
pub fn score_tokens(tokens: &HashSet<String>, lexicon: &Lexicon) -> ScoreRecord {
    let mut record = ScoreRecord::default();
    for emotion in Emotion::ALL {
        *record.get_mut(emotion) = lexicon.words(emotion).intersection(tokens).count() as u32;
    }
    record
}

#[cfg(test)]
mod tests {
    use super::{score, ScoreRecord};
    use crate::emotion::Emotion;
    use crate::lexicon::Lexicon;
    use crate::stopwords::Stopwords;
    use crate::tokenize::token_set;

    fn sample_lexicon() -> Lexicon {
        Lexicon::from_entries([
            ("happy", Emotion::Joy, true),
            ("sad", Emotion::Sadness, true),
            ("happy", Emotion::Positive, true),
        ])
    }

    #[test]
    fn repeated_words_count_once_per_category() {
        let record = score("happy happy sad", &sample_lexicon(), &Stopwords::english());
        assert_eq!(record, ScoreRecord {
            positive: 1,
            joy: 1,
            sadness: 1,
            ..ScoreRecord::default()
        });
    }

    #[test]
    fn empty_text_scores_zero_everywhere() {
        let record = score("", &sample_lexicon(), &Stopwords::english());
        assert_eq!(record, ScoreRecord::default());
        assert_eq!(record.total(), 0);
    }

    #[test]
    fn text_without_lexicon_words_scores_zero() {
        let record = score("walked along the river", &sample_lexicon(), &Stopwords::english());
        assert_eq!(record, ScoreRecord::default());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let record = score("HAPPY", &sample_lexicon(), &Stopwords::english());
        assert_eq!(record.joy, 1);
        assert_eq!(record.positive, 1);
        assert_eq!(record.sadness, 0);
    }

    #[test]
    fn scoring_is_idempotent() {
        let lexicon = sample_lexicon();
        let stopwords = Stopwords::english();
        let text = "a happy crowd, a sad goodbye";
        assert_eq!(score(text, &lexicon, &stopwords), score(text, &lexicon, &stopwords));
    }

    #[test]
    fn duplicating_every_token_changes_nothing() {
        let lexicon = sample_lexicon();
        let stopwords = Stopwords::english();
        let text = "happy crowd sad goodbye";
        let doubled = "happy happy crowd crowd sad sad goodbye goodbye";
        assert_eq!(score(text, &lexicon, &stopwords), score(doubled, &lexicon, &stopwords));
    }

    #[test]
    fn counts_never_exceed_distinct_token_count() {
        let lexicon = sample_lexicon();
        let stopwords = Stopwords::english();
        let text = "happy sad happy grateful";

        let distinct = token_set(text, &stopwords).len() as u32;
        let record = score(text, &lexicon, &stopwords);
        for emotion in Emotion::ALL {
            assert!(record.get(emotion) <= distinct);
        }
    }

    #[test]
    fn to_array_follows_category_order() {
        let record = score("happy sad", &sample_lexicon(), &Stopwords::english());
        assert_eq!(record.to_array(), [1, 0, 0, 0, 0, 0, 1, 1, 0, 0]);
    }
}
