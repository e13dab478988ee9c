use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;
use plotters::style::RGBColor;

use rostrum_text::score::score_tokens;
use rostrum_text::tokenize::token_set;
use rostrum_text::{Emotion, Lexicon, Stopwords};

use crate::chart::{self, Series};
use crate::corpus;
use crate::model::SpeechScores;
use crate::Settings;

#[derive(Parser, Debug)]
pub(crate) struct Opts {
    /// Also write every per-speech score record to this file as json.
    #[clap(long)]
    json: Option<PathBuf>,
}

struct Convention {
    party: &'static str,
    tag: &'static str,
    title: &'static str,
    dir: PathBuf,
    base_color: RGBColor,
}

pub(crate) fn run(
    settings: &Settings,
    lexicon: &Lexicon,
    stopwords: &Stopwords,
    opts: Opts,
) -> anyhow::Result<()> {
    fs::create_dir_all(&settings.figures_dir).with_context(|| {
        format!("failed to create figures directory {}", settings.figures_dir.display())
    })?;

    let conventions = [
        Convention {
            party: "Democrat",
            tag: "dnc",
            title: "Democratic National Convention",
            dir: settings.dnc_dir.clone(),
            base_color: chart::DEM_BLUE,
        },
        Convention {
            party: "Republican",
            tag: "rnc",
            title: "Republican National Convention",
            dir: settings.rnc_dir.clone(),
            base_color: chart::REP_RED,
        },
    ];

    let labels = emotion_labels();
    let mut all_rows = Vec::new();

    for convention in &conventions {
        let rows = score_convention(convention, lexicon, stopwords)?;
        render_convention_charts(settings, convention, &rows, &labels)?;
        all_rows.extend(rows);
    }

    party_chart(settings, &all_rows, &labels)?;

    if let Some(json_path) = opts.json {
        export_json(&json_path, &all_rows)?;
    }

    Ok(())
}

fn score_convention(
    convention: &Convention,
    lexicon: &Lexicon,
    stopwords: &Stopwords,
) -> anyhow::Result<Vec<SpeechScores>> {
    let speeches = corpus::load_dir(&convention.dir)?;

    let mut rows = Vec::with_capacity(speeches.len());
    for speech in speeches {
        let tokens = token_set(&speech.text, stopwords);
        let scores = score_tokens(&tokens, lexicon);
        info!(
            "scored {}: {} distinct words, {} lexicon matches",
            speech.id,
            tokens.len(),
            scores.total(),
        );
        rows.push(SpeechScores {
            party: convention.party,
            id: speech.id,
            speaker: speech.speaker,
            scores,
            distinct_words: tokens.len() as u32,
        });
    }
    Ok(rows)
}

fn render_convention_charts(
    settings: &Settings,
    convention: &Convention,
    rows: &[SpeechScores],
    labels: &[String],
) -> anyhow::Result<()> {
    // Summed counts across every speaker
    let mut totals = [0.0f64; 10];
    for row in rows {
        for (total, count) in totals.iter_mut().zip(row.scores.to_array()) {
            *total += f64::from(count);
        }
    }

    let path = settings.figures_dir.join(format!("{}_full.png", convention.tag));
    chart::shaded_bar_chart(
        &path,
        convention.title,
        "Emotions",
        "Word Count",
        labels,
        &totals,
        &chart::shade_ramp(convention.base_color, labels.len()),
    )?;
    info!("wrote {}", path.display());

    // Speakers side by side, raw counts
    let raw_series = speaker_series(rows, |row| {
        row.scores.to_array().map(f64::from).to_vec()
    });
    let path = settings.figures_dir.join(format!("{}_individual.png", convention.tag));
    chart::grouped_bar_chart(
        &path,
        Some(convention.title),
        "Emotions",
        "Word Count",
        labels,
        &raw_series,
        false,
    )?;
    info!("wrote {}", path.display());

    // Speakers side by side, counts divided by each speech's vocabulary size
    let normalized_series = speaker_series(rows, |row| row.normalized().to_vec());
    let path = settings.figures_dir.join(format!("{}_normalized.png", convention.tag));
    chart::grouped_bar_chart(
        &path,
        Some(convention.title),
        "Emotions",
        "Normalized Word Count",
        labels,
        &normalized_series,
        false,
    )?;
    info!("wrote {}", path.display());

    Ok(())
}

fn speaker_series<F>(rows: &[SpeechScores], values: F) -> Vec<Series>
where
    F: Fn(&SpeechScores) -> Vec<f64>,
{
    rows.iter()
        .enumerate()
        .map(|(i, row)| Series {
            label: row.speaker.clone(),
            color: chart::paired_color(i),
            values: values(row),
        })
        .collect()
}

/// Mean normalized score per party across both conventions.
fn party_chart(
    settings: &Settings,
    rows: &[SpeechScores],
    labels: &[String],
) -> anyhow::Result<()> {
    let series: Vec<Series> = [("Democrat", chart::DEM_BLUE), ("Republican", chart::REP_RED)]
        .into_iter()
        .map(|(party, color)| Series {
            label: party.to_owned(),
            color,
            values: party_means(rows, party).to_vec(),
        })
        .collect();

    let path = settings.figures_dir.join("convention_full.png");
    chart::grouped_bar_chart(
        &path,
        None,
        "Emotions",
        "Average Normalized Word Count",
        labels,
        &series,
        false,
    )?;
    info!("wrote {}", path.display());
    Ok(())
}

fn party_means(rows: &[SpeechScores], party: &str) -> [f64; 10] {
    let mut means = [0.0f64; 10];
    let mut members = 0usize;

    for row in rows.iter().filter(|row| row.party == party) {
        for (mean, value) in means.iter_mut().zip(row.normalized()) {
            *mean += value;
        }
        members += 1;
    }

    if members > 0 {
        for mean in &mut means {
            *mean /= members as f64;
        }
    }

    means
}

fn export_json(path: &Path, rows: &[SpeechScores]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(rows)
        .context("failed to serialize score records as json")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write score records to {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}

fn emotion_labels() -> Vec<String> {
    Emotion::ALL.iter().map(|emotion| emotion.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use rostrum_text::ScoreRecord;

    use super::{emotion_labels, party_means};
    use crate::model::SpeechScores;

    fn row(party: &'static str, positive: u32, distinct_words: u32) -> SpeechScores {
        SpeechScores {
            party,
            id: "speech".to_owned(),
            speaker: "Speech".to_owned(),
            scores: ScoreRecord { positive, ..ScoreRecord::default() },
            distinct_words,
        }
    }

    #[test]
    fn party_means_average_normalized_rows() {
        let rows = [
            row("Democrat", 10, 100),
            row("Democrat", 30, 100),
            row("Republican", 50, 100),
        ];

        let means = party_means(&rows, "Democrat");
        assert!((means[0] - 0.2).abs() < 1e-9);
        assert_eq!(means[1], 0.0);

        let means = party_means(&rows, "Republican");
        assert!((means[0] - 0.5).abs() < 1e-9);
    }

    #[test]
    fn party_means_of_no_rows_is_zero() {
        assert_eq!(party_means(&[], "Democrat"), [0.0; 10]);
    }

    #[test]
    fn emotion_labels_are_in_category_order() {
        let labels = emotion_labels();
        assert_eq!(labels.first().map(String::as_str), Some("positive"));
        assert_eq!(labels.last().map(String::as_str), Some("trust"));
        assert_eq!(labels.len(), 10);
    }
}
