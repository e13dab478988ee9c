use std::fs;
use std::path::Path;

use anyhow::Context;
use log::debug;

/// One transcript: the file stem as id, a prettified speaker label and the
/// raw text. Transcripts are transient; nothing here is cached.
pub(crate) struct Speech {
    pub(crate) id: String,
    pub(crate) speaker: String,
    pub(crate) text: String,
}

/// Loads every transcript in `dir`, skipping hidden files and anything that
/// is not a regular file. Transcripts are returned sorted by id so output
/// order is deterministic.
pub(crate) fn load_dir(dir: &Path) -> anyhow::Result<Vec<Speech>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read transcript directory {}", dir.display()))?;

    let mut speeches = Vec::new();

    for entry in entries {
        let entry = entry
            .with_context(|| format!("failed to read entry in {}", dir.display()))?;

        if entry.file_name().to_string_lossy().starts_with('.') {
            debug!("skipping hidden file {:?}", entry.file_name());
            continue;
        }

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        speeches.push(load_file(&path)?);
    }

    speeches.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(speeches)
}

/// Loads a single transcript. Undecodable bytes are replaced rather than
/// treated as fatal, since some of the transcripts have stray encodings.
pub(crate) fn load_file(path: &Path) -> anyhow::Result<Speech> {
    let id = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
        .with_context(|| format!("transcript path {} has no usable file name", path.display()))?;

    let bytes = fs::read(path)
        .with_context(|| format!("failed to read transcript {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes).into_owned();

    Ok(Speech {
        speaker: display_name(&id),
        id,
        text,
    })
}

/// `hillary_clinton` becomes `Hillary Clinton`.
pub(crate) fn display_name(id: &str) -> String {
    id.split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
