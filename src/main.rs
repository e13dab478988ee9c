mod chart;
mod cloud;
mod corpus;
mod error;
mod model;
mod sentiment;
mod top_words;

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::{crate_description, crate_version, Parser};
use log::info;
use serde::Deserialize;

use rostrum_text::{Lexicon, Stopwords};

use error::VarError;

#[derive(Parser)]
#[clap(version = crate_version!(), about = crate_description!())]
struct Opts {
    #[clap(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: MainCommand,
}

#[derive(Parser)]
enum MainCommand {
    /// Score every transcript against the emotion lexicon and render the
    /// convention charts.
    Sentiment(sentiment::Opts),

    /// Compare the most frequent stems of two speeches.
    TopWords(top_words::Opts),

    /// Render a masked word cloud from a transcript or a directory of
    /// transcripts.
    Cloud(cloud::Opts),
}

#[derive(Deserialize, Default)]
struct Config {
    lexicon: Option<LexiconConfig>,
    corpus: Option<CorpusConfig>,
    figures_dir: Option<PathBuf>,
    top_words: Option<TopWordsConfig>,
}

#[derive(Deserialize, Default)]
struct LexiconConfig {
    path: Option<PathBuf>,
    skip_rows: Option<usize>,
}

#[derive(Deserialize, Default)]
struct CorpusConfig {
    dnc_dir: Option<PathBuf>,
    rnc_dir: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
struct TopWordsConfig {
    first: Option<PathBuf>,
    second: Option<PathBuf>,
}

/// Everything resolved from config file, environment and defaults, passed
/// by reference into the subcommands.
pub(crate) struct Settings {
    pub(crate) lexicon_path: PathBuf,
    pub(crate) lexicon_skip_rows: usize,
    pub(crate) dnc_dir: PathBuf,
    pub(crate) rnc_dir: PathBuf,
    pub(crate) figures_dir: PathBuf,
    pub(crate) top_words_first: PathBuf,
    pub(crate) top_words_second: PathBuf,
}

const DEFAULT_CONFIG_PATH: &str = "rostrum.yaml";

const VAR_CONFIG_PATH: &str = "ROSTRUM_CONFIG";

const VAR_LEXICON_PATH: &str = "ROSTRUM_LEXICON";
const VAR_LEXICON_SKIP_ROWS: &str = "ROSTRUM_LEXICON_SKIP_ROWS";
const VAR_FIGURES_DIR: &str = "ROSTRUM_FIGURES_DIR";

const DEFAULT_LEXICON_PATH: &str = "NRC-emotion-lexicon-wordlevel-alphabetized-v0.92.txt";
// Length of the lexicon file's license preamble
const DEFAULT_LEXICON_SKIP_ROWS: usize = 45;

const DEFAULT_DNC_DIR: &str = "dnc";
const DEFAULT_RNC_DIR: &str = "rnc";
const DEFAULT_FIGURES_DIR: &str = "figures";

const DEFAULT_TOP_WORDS_FIRST: &str = "dnc/hillary_clinton.txt";
const DEFAULT_TOP_WORDS_SECOND: &str = "rnc/donald_trump.txt";

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "dotenv")] {
        dotenv::dotenv().ok();
    }

    let _logger = flexi_logger::Logger::try_with_env_or_str("info")
        .context("failed to configure logging")?
        .start()
        .context("failed to start logging")?;

    let opts = Opts::parse();

    let config = match opts.config.as_deref() {
        Some(config_path) => load_config(config_path)
            .with_context(|| format!("failed to read config file {}", config_path.to_string_lossy()))?
            .with_context(|| format!("failed to parse config file {}", config_path.to_string_lossy()))?,

        None => match env::var_os(VAR_CONFIG_PATH) {
            Some(config_path) => load_config(config_path.as_ref())
                .with_context(|| format!("failed to read config file {}", config_path.to_string_lossy()))?
                .with_context(|| format!("failed to parse config file {}", config_path.to_string_lossy()))?,

            None => if cfg!(feature = "default-config-file") {
                load_config(DEFAULT_CONFIG_PATH.as_ref())
                    .ok()
                    .map(|res| res
                        .with_context(|| format!("failed to parse config file {}", DEFAULT_CONFIG_PATH)))
                    .transpose()?
                    .unwrap_or_default()
            } else {
                Config::default()
            },
        },
    };

    let settings = resolve_settings(config)?;

    run(opts, settings)
}

fn run(opts: Opts, settings: Settings) -> anyhow::Result<()> {
    match opts.command {
        MainCommand::Sentiment(cmd_opts) => {
            let lexicon = load_lexicon(&settings)?;
            let stopwords = Stopwords::english();
            sentiment::run(&settings, &lexicon, &stopwords, cmd_opts)
        },

        MainCommand::TopWords(cmd_opts) => {
            let stopwords = Stopwords::english();
            top_words::run(&settings, &stopwords, cmd_opts)
        },

        MainCommand::Cloud(cmd_opts) => {
            let stopwords = Stopwords::english();
            cloud::run(&stopwords, cmd_opts)
        },
    }
}

fn load_config(path: &Path) -> io::Result<serde_yaml::Result<Config>> {
    fs::read_to_string(path)
        .map(|contents| serde_yaml::from_str(&contents))
}

fn load_lexicon(settings: &Settings) -> anyhow::Result<Lexicon> {
    let src = fs::read_to_string(&settings.lexicon_path)
        .with_context(|| format!("failed to read lexicon file {}", settings.lexicon_path.display()))?;

    let lexicon = Lexicon::parse(&src, settings.lexicon_skip_rows)
        .with_context(|| format!("failed to parse lexicon file {}", settings.lexicon_path.display()))?;

    info!(
        "loaded {} lexicon entries from {}",
        lexicon.len(),
        settings.lexicon_path.display(),
    );

    Ok(lexicon)
}

fn resolve_settings(config: Config) -> anyhow::Result<Settings> {
    let lexicon_config = config.lexicon.unwrap_or_default();
    let corpus_config = config.corpus.unwrap_or_default();
    let top_words_config = config.top_words.unwrap_or_default();

    let lexicon_path = env_var(VAR_LEXICON_PATH)
        .context("failed to read lexicon path variable")?
        .map(PathBuf::from)
        .or(lexicon_config.path)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LEXICON_PATH));

    let lexicon_skip_rows = env_var_parse::<usize>(VAR_LEXICON_SKIP_ROWS)
        .context("failed to read lexicon skip rows variable")?
        .or(lexicon_config.skip_rows)
        .unwrap_or(DEFAULT_LEXICON_SKIP_ROWS);

    let figures_dir = env_var(VAR_FIGURES_DIR)
        .context("failed to read figures directory variable")?
        .map(PathBuf::from)
        .or(config.figures_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FIGURES_DIR));

    Ok(Settings {
        lexicon_path,
        lexicon_skip_rows,
        dnc_dir: corpus_config.dnc_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DNC_DIR)),
        rnc_dir: corpus_config.rnc_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_RNC_DIR)),
        figures_dir,
        top_words_first: top_words_config.first
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOP_WORDS_FIRST)),
        top_words_second: top_words_config.second
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOP_WORDS_SECOND)),
    })
}

fn env_var(key: &'static str) -> Result<Option<String>, VarError> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(bad_str)) => Err(VarError::not_unicode(key, bad_str)),
    }
}

fn env_var_parse<T>(key: &'static str) -> Result<Option<T>, VarError>
where
    T: FromStr,
{
    env_var(key)
        .and_then(|val| val
            .map(|val| val
                .parse::<T>()
                .map_err(|_| VarError::unparseable(key, val.into())))
            .transpose())
}

#[cfg(test)]
mod tests {
    use clap::{crate_description, crate_version, CommandFactory, Parser};

    use super::{MainCommand, Opts};

    #[test]
    fn cli_reports_the_package_version_and_description() {
        let cmd = Opts::command();
        assert_eq!(cmd.get_version(), Some(crate_version!()));
        assert_eq!(cmd.get_about(), Some(crate_description!()));
    }

    #[test]
    fn cli_parses_the_sentiment_subcommand() {
        let opts = Opts::try_parse_from(["rostrum", "sentiment"]).unwrap();
        assert!(opts.config.is_none());
        assert!(matches!(opts.command, MainCommand::Sentiment(_)));
    }
}
