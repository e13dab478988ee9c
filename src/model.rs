use serde::Serialize;

use rostrum_text::ScoreRecord;

/// Per-speech scoring row: the typed replacement for the original loose
/// aggregation tables. Immutable once built.
#[derive(Serialize, Clone, Debug)]
pub(crate) struct SpeechScores {
    pub(crate) party: &'static str,
    pub(crate) id: String,
    pub(crate) speaker: String,
    pub(crate) scores: ScoreRecord,
    /// Distinct non-stopword tokens in the speech; the normalization
    /// denominator.
    pub(crate) distinct_words: u32,
}

impl SpeechScores {
    /// Counts divided by the speech's distinct word count, in category
    /// order. An empty speech normalizes to all zeros rather than dividing
    /// by zero.
    pub(crate) fn normalized(&self) -> [f64; 10] {
        let denom = self.distinct_words.max(1) as f64;
        self.scores.to_array().map(|count| count as f64 / denom)
    }
}
