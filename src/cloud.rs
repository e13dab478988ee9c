use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use clap::Parser;
use image::{Rgba, RgbaImage};
use log::{info, warn};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rostrum_text::stopwords::Stopwords;
use rostrum_text::tokenize::{most_common, token_counts};

use crate::corpus;

const MIN_FONT: f64 = 14.0;
const MAX_FONT: f64 = 96.0;
const PLACEMENT_ATTEMPTS: usize = 400;
const SHRINK_FACTOR: f64 = 0.9;
const MASK_SAMPLE_STEP: i32 = 3;
const MASK_WHITE_CUTOFF: u8 = 250;

// Fixed seed so repeated runs produce the same cloud
const LAYOUT_SEED: u64 = 42;

#[derive(Parser, Debug)]
pub(crate) struct Opts {
    /// Transcript file, or a directory whose transcripts are combined.
    input: PathBuf,

    /// Mask image: words are placed over its non-white pixels and take
    /// their colors from it.
    #[clap(short, long)]
    mask: PathBuf,

    /// Output image path.
    #[clap(short, long)]
    out: PathBuf,

    /// Maximum number of words to place.
    #[clap(long, default_value = "200")]
    max_words: usize,

    /// Fraction of words laid out horizontally; the rest are rotated 90
    /// degrees.
    #[clap(long, default_value = "0.8")]
    horizontal: f64,

    /// Additional stopwords to exclude.
    #[clap(long = "extra-stopword")]
    extra_stopwords: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct Rect {
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
}

impl Rect {
    fn intersects(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }
}

struct PlacedWord {
    text: String,
    rect: Rect,
    size: f64,
    vertical: bool,
    color: RGBColor,
}

pub(crate) fn run(stopwords: &Stopwords, opts: Opts) -> anyhow::Result<()> {
    let text = load_input(&opts.input)?;

    let mut stopwords = stopwords.clone();
    stopwords.extend(&opts.extra_stopwords);

    let mut counts = token_counts(&text, &stopwords);
    counts.retain(|word, _| word.chars().count() >= 2 && word.chars().any(char::is_alphanumeric));

    let words = most_common(&counts, opts.max_words);
    if words.is_empty() {
        return Err(anyhow!("no words left to draw after stopword filtering"));
    }

    let mask = image::open(&opts.mask)
        .with_context(|| format!("failed to read mask image {}", opts.mask.display()))?
        .to_rgba8();
    let (width, height) = mask.dimensions();

    let max_count = words[0].1;
    let mut rng = StdRng::seed_from_u64(LAYOUT_SEED);
    let mut placed: Vec<PlacedWord> = Vec::new();

    for (word, count) in &words {
        let size = font_size(*count, max_count);
        match place_word(word, size, &mask, &placed, &mut rng, opts.horizontal)? {
            Some(placement) => placed.push(placement),
            None => warn!("no room left for {:?}, skipping", word),
        }
    }

    if let Some(parent) = opts.out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }

    draw_cloud(&opts.out, (width, height), &placed)?;
    info!(
        "wrote {} ({} of {} words placed)",
        opts.out.display(),
        placed.len(),
        words.len(),
    );

    Ok(())
}

fn load_input(path: &Path) -> anyhow::Result<String> {
    if path.is_dir() {
        let speeches = corpus::load_dir(path)?;
        if speeches.is_empty() {
            return Err(anyhow!("no transcripts found in {}", path.display()));
        }
        let texts: Vec<String> = speeches.into_iter().map(|speech| speech.text).collect();
        Ok(texts.join(" "))
    } else {
        Ok(corpus::load_file(path)?.text)
    }
}

/// Font size scaled by relative frequency. The square root softens the
/// skew of speech word distributions, which would otherwise leave every
/// word but the top handful at the minimum size.
fn font_size(count: u64, max_count: u64) -> f64 {
    let ratio = (count as f64 / max_count.max(1) as f64).sqrt();
    MIN_FONT + (MAX_FONT - MIN_FONT) * ratio
}

/// Searches for a spot where the word's box sits on non-white mask pixels
/// and clears every previously placed word, shrinking the font when the
/// search fails. `None` means the word does not fit anywhere.
fn place_word(
    word: &str,
    base_size: f64,
    mask: &RgbaImage,
    placed: &[PlacedWord],
    rng: &mut StdRng,
    horizontal: f64,
) -> anyhow::Result<Option<PlacedWord>> {
    let (width, height) = mask.dimensions();
    let mut size = base_size;

    while size >= MIN_FONT {
        let vertical = !rng.gen_bool(horizontal.clamp(0.0, 1.0));

        let font = FontDesc::new(FontFamily::SansSerif, size, FontStyle::Normal);
        let (text_w, text_h) = font
            .box_size(word)
            .map_err(|err| anyhow!("failed to measure {:?}: {}", word, err))?;
        let (box_w, box_h) = if vertical { (text_h, text_w) } else { (text_w, text_h) };

        if box_w > 0 && box_h > 0 && box_w < width && box_h < height {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let x = rng.gen_range(0..width - box_w) as i32;
                let y = rng.gen_range(0..height - box_h) as i32;
                let rect = Rect {
                    x0: x,
                    y0: y,
                    x1: x + box_w as i32,
                    y1: y + box_h as i32,
                };

                if placed.iter().any(|other| other.rect.intersects(&rect)) {
                    continue;
                }
                if !region_in_mask(mask, &rect) {
                    continue;
                }

                return Ok(Some(PlacedWord {
                    text: word.to_owned(),
                    rect,
                    size,
                    vertical,
                    color: region_color(mask, &rect),
                }));
            }
        }

        size *= SHRINK_FACTOR;
    }

    Ok(None)
}

fn sample_points(rect: &Rect) -> impl Iterator<Item = (i32, i32)> + '_ {
    let xs = (rect.x0..rect.x1)
        .step_by(MASK_SAMPLE_STEP as usize)
        .chain([rect.x1 - 1]);
    xs.flat_map(move |x| {
        (rect.y0..rect.y1)
            .step_by(MASK_SAMPLE_STEP as usize)
            .chain([rect.y1 - 1])
            .map(move |y| (x, y))
    })
}

fn region_in_mask(mask: &RgbaImage, rect: &Rect) -> bool {
    sample_points(rect).all(|(x, y)| mask_allows(mask.get_pixel(x as u32, y as u32)))
}

/// Non-white, non-transparent pixels are the drawable region.
fn mask_allows(pixel: &Rgba<u8>) -> bool {
    let [r, g, b, a] = pixel.0;
    a > 0 && !(r >= MASK_WHITE_CUTOFF && g >= MASK_WHITE_CUTOFF && b >= MASK_WHITE_CUTOFF)
}

/// Average mask color under the word's box, so the cloud takes on the
/// logo's colors.
fn region_color(mask: &RgbaImage, rect: &Rect) -> RGBColor {
    let mut sums = [0u64; 3];
    let mut samples = 0u64;

    for (x, y) in sample_points(rect) {
        let pixel = mask.get_pixel(x as u32, y as u32);
        if mask_allows(pixel) {
            let [r, g, b, _] = pixel.0;
            sums[0] += u64::from(r);
            sums[1] += u64::from(g);
            sums[2] += u64::from(b);
            samples += 1;
        }
    }

    if samples == 0 {
        return BLACK;
    }

    RGBColor(
        (sums[0] / samples) as u8,
        (sums[1] / samples) as u8,
        (sums[2] / samples) as u8,
    )
}

fn draw_cloud(path: &Path, (width, height): (u32, u32), placed: &[PlacedWord]) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|err| anyhow!("failed to fill cloud background: {}", err))?;

    for word in placed {
        let font = FontDesc::new(FontFamily::SansSerif, word.size, FontStyle::Normal);
        let style = if word.vertical {
            // Rotate90 extends left of and below the anchor, so anchor at
            // the box's top-right corner
            font.transform(FontTransform::Rotate90)
                .color(&word.color)
                .pos(Pos::new(HPos::Left, VPos::Top))
        } else {
            font.color(&word.color).pos(Pos::new(HPos::Left, VPos::Top))
        };

        let anchor = if word.vertical {
            (word.rect.x1, word.rect.y0)
        } else {
            (word.rect.x0, word.rect.y0)
        };

        root.draw(&Text::new(word.text.clone(), anchor, style))
            .map_err(|err| anyhow!("failed to draw word {:?}: {}", word.text, err))?;
    }

    root.present()
        .map_err(|err| anyhow!("failed to write word cloud {}: {}", path.display(), err))?;
    Ok(())
}
