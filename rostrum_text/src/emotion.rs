use std::fmt;

/// The ten emotion categories of the NRC word-level lexicon: the two
/// sentiment polarities followed by the eight basic emotions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Emotion {
    Positive,
    Negative,
    Anger,
    Anticipation,
    Disgust,
    Fear,
    Joy,
    Sadness,
    Surprise,
    Trust,
}

impl Emotion {
    /// Every category, in the fixed order used for score records and charts.
    pub const ALL: [Emotion; 10] = [
        Emotion::Positive,
        Emotion::Negative,
        Emotion::Anger,
        Emotion::Anticipation,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Joy,
        Emotion::Sadness,
        Emotion::Surprise,
        Emotion::Trust,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Emotion::Positive => "positive",
            Emotion::Negative => "negative",
            Emotion::Anger => "anger",
            Emotion::Anticipation => "anticipation",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Joy => "joy",
            Emotion::Sadness => "sadness",
            Emotion::Surprise => "surprise",
            Emotion::Trust => "trust",
        }
    }

    /// Looks a category up by its lexicon label. Labels that are not one of
    /// the ten categories yield `None`.
    pub fn from_label(label: &str) -> Option<Emotion> {
        Emotion::ALL
            .into_iter()
            .find(|emotion| emotion.label().eq_ignore_ascii_case(label))
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::Emotion;

    #[test]
    fn all_lists_ten_distinct_categories() {
        let labels = Emotion::ALL.map(Emotion::label);
        assert_eq!(labels.len(), 10);
        for (i, label) in labels.iter().enumerate() {
            assert!(!labels[i + 1..].contains(label));
        }
    }

    #[test]
    fn label_round_trips() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_label(emotion.label()), Some(emotion));
        }
    }

    #[test]
    fn unknown_labels_are_rejected() {
        assert_eq!(Emotion::from_label("boredom"), None);
        assert_eq!(Emotion::from_label(""), None);
    }

    #[test]
    fn index_matches_all_order() {
        for (i, emotion) in Emotion::ALL.into_iter().enumerate() {
            assert_eq!(emotion.index(), i);
        }
    }
}
