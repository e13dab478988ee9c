use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use rostrum_text::stem::stemmed_counts;
use rostrum_text::stopwords::Stopwords;
use rostrum_text::tokenize::{most_common, token_counts};

use crate::chart::{self, Series};
use crate::corpus;
use crate::Settings;

#[derive(Parser, Debug)]
pub(crate) struct Opts {
    /// First transcript to compare. Defaults to the configured headline
    /// speech of the DNC.
    first: Option<PathBuf>,

    /// Second transcript to compare. Defaults to the configured headline
    /// speech of the RNC.
    second: Option<PathBuf>,

    /// How many top words to take from each transcript.
    #[clap(long, default_value = "10")]
    top: usize,

    /// Count raw words instead of Porter stems.
    #[clap(long)]
    no_stem: bool,
}

pub(crate) fn run(settings: &Settings, stopwords: &Stopwords, opts: Opts) -> anyhow::Result<()> {
    let first_path = opts.first.unwrap_or_else(|| settings.top_words_first.clone());
    let second_path = opts.second.unwrap_or_else(|| settings.top_words_second.clone());

    let first = corpus::load_file(&first_path)?;
    let second = corpus::load_file(&second_path)?;

    let count: fn(&str, &Stopwords) -> HashMap<String, u64> = if opts.no_stem {
        token_counts
    } else {
        stemmed_counts
    };

    let first_counts = count(&first.text, stopwords);
    let second_counts = count(&second.text, stopwords);

    let words = comparison_words(&first_counts, &second_counts, opts.top);
    info!(
        "comparing {} words from {} and {}",
        words.len(),
        first.speaker,
        second.speaker,
    );

    let series = [
        (&first.speaker, &first_counts, chart::DEM_BLUE),
        (&second.speaker, &second_counts, chart::REP_RED),
    ]
    .into_iter()
    .map(|(speaker, counts, color)| Series {
        label: speaker.clone(),
        color,
        values: words
            .iter()
            .map(|word| counts.get(word).copied().unwrap_or(0) as f64)
            .collect(),
    })
    .collect::<Vec<_>>();

    fs::create_dir_all(&settings.figures_dir).with_context(|| {
        format!("failed to create figures directory {}", settings.figures_dir.display())
    })?;

    let path = settings.figures_dir.join("top_words.png");
    chart::grouped_bar_chart(&path, None, "Words", "Count", &words, &series, true)?;
    info!("wrote {}", path.display());

    Ok(())
}

/// The union of each side's top `n` words, ordered by the first side's
/// counts descending (ties alphabetical), so the first speaker's favorite
/// words lead the chart.
fn comparison_words(
    first_counts: &HashMap<String, u64>,
    second_counts: &HashMap<String, u64>,
    n: usize,
) -> Vec<String> {
    let mut words: Vec<String> = most_common(first_counts, n)
        .into_iter()
        .chain(most_common(second_counts, n))
        .map(|(word, _)| word)
        .collect();

    words.sort();
    words.dedup();
    words.sort_by(|a, b| {
        let count_a = first_counts.get(a).copied().unwrap_or(0);
        let count_b = first_counts.get(b).copied().unwrap_or(0);
        count_b.cmp(&count_a).then_with(|| a.cmp(b))
    });

    words
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::comparison_words;

    fn counts(entries: &[(&str, u64)]) -> HashMap<String, u64> {
        entries.iter().map(|&(word, count)| (word.to_owned(), count)).collect()
    }

    #[test]
    fn union_is_ordered_by_first_side() {
        let first = counts(&[("jobs", 9), ("wall", 4), ("trade", 2)]);
        let second = counts(&[("together", 7), ("jobs", 3)]);

        let words = comparison_words(&first, &second, 2);
        // "together" is absent from the first side, so it sorts last
        assert_eq!(words, ["jobs", "wall", "together"]);
    }

    #[test]
    fn union_deduplicates_shared_words() {
        let first = counts(&[("jobs", 5)]);
        let second = counts(&[("jobs", 8)]);
        assert_eq!(comparison_words(&first, &second, 10), ["jobs"]);
    }

    #[test]
    fn absent_words_tie_break_alphabetically() {
        let first = counts(&[("alpha", 1)]);
        let second = counts(&[("zeta", 5), ("beta", 5)]);
        assert_eq!(comparison_words(&first, &second, 2), ["alpha", "beta", "zeta"]);
    }
}
