use std::path::Path;

use anyhow::anyhow;
use plotters::chart::ChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

const WIDTH: u32 = 960;
const HEIGHT: u32 = 640;

pub(crate) const DEM_BLUE: RGBColor = RGBColor(31, 119, 180);
pub(crate) const REP_RED: RGBColor = RGBColor(214, 39, 40);

/// Qualitative palette for per-speaker series (the "Paired" scheme).
const PAIRED: [RGBColor; 12] = [
    RGBColor(166, 206, 227),
    RGBColor(31, 120, 180),
    RGBColor(178, 223, 138),
    RGBColor(51, 160, 44),
    RGBColor(251, 154, 153),
    RGBColor(227, 26, 28),
    RGBColor(253, 191, 111),
    RGBColor(255, 127, 0),
    RGBColor(202, 178, 214),
    RGBColor(106, 61, 154),
    RGBColor(255, 255, 153),
    RGBColor(177, 89, 40),
];

pub(crate) fn paired_color(index: usize) -> RGBColor {
    PAIRED[index % PAIRED.len()]
}

/// One legend entry's worth of bars.
pub(crate) struct Series {
    pub(crate) label: String,
    pub(crate) color: RGBColor,
    pub(crate) values: Vec<f64>,
}

/// A dark-to-light ramp of `n` shades of `base`, one per category.
pub(crate) fn shade_ramp(base: RGBColor, n: usize) -> Vec<RGBColor> {
    (0..n)
        .map(|i| {
            let t = if n <= 1 { 0.0 } else { i as f64 / (n - 1) as f64 };
            lighten(base, 0.6 * t)
        })
        .collect()
}

fn lighten(color: RGBColor, amount: f64) -> RGBColor {
    let mix = |c: u8| (f64::from(c) + (255.0 - f64::from(c)) * amount).round() as u8;
    RGBColor(mix(color.0), mix(color.1), mix(color.2))
}

/// One bar per category, each with its own shade. No legend.
pub(crate) fn shaded_bar_chart(
    path: &Path,
    title: &str,
    x_desc: &str,
    y_desc: &str,
    categories: &[String],
    values: &[f64],
    shades: &[RGBColor],
) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|err| anyhow!("failed to fill chart background: {}", err))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(72)
        .build_cartesian_2d(0f64..categories.len() as f64, 0f64..y_axis_max(values))
        .map_err(|err| anyhow!("failed to lay out chart axes: {}", err))?;

    draw_mesh(&mut chart, x_desc, y_desc)?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, &value)| {
            let x0 = i as f64 + 0.1;
            let shade = shades[i % shades.len()];
            Rectangle::new([(x0, 0.0), (x0 + 0.8, value)], shade.filled())
        }))
        .map_err(|err| anyhow!("failed to draw bars: {}", err))?;

    draw_category_labels(&root, &chart, categories, false)?;

    root.present()
        .map_err(|err| anyhow!("failed to write chart {}: {}", path.display(), err))?;
    Ok(())
}

/// Side-by-side bars per category, one color per series, with a legend.
pub(crate) fn grouped_bar_chart(
    path: &Path,
    title: Option<&str>,
    x_desc: &str,
    y_desc: &str,
    categories: &[String],
    series: &[Series],
    rotate_labels: bool,
) -> anyhow::Result<()> {
    let y_max = {
        let all_values: Vec<f64> = series.iter().flat_map(|s| s.values.iter().copied()).collect();
        y_axis_max(&all_values)
    };

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|err| anyhow!("failed to fill chart background: {}", err))?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(16)
        .x_label_area_size(if rotate_labels { 130 } else { 48 })
        .y_label_area_size(72);
    if let Some(title) = title {
        builder.caption(title, ("sans-serif", 28));
    }

    let mut chart = builder
        .build_cartesian_2d(0f64..categories.len() as f64, 0f64..y_max)
        .map_err(|err| anyhow!("failed to lay out chart axes: {}", err))?;

    draw_mesh(&mut chart, x_desc, y_desc)?;

    // Each category slot is 0.8 wide with 0.1 gutters either side
    let slot = 0.8 / series.len().max(1) as f64;

    for (j, series) in series.iter().enumerate() {
        let color = series.color;
        let offset = 0.1 + j as f64 * slot;

        let anno = chart
            .draw_series(series.values.iter().enumerate().map(|(i, &value)| {
                let x0 = i as f64 + offset;
                Rectangle::new([(x0, 0.0), (x0 + slot, value)], color.filled())
            }))
            .map_err(|err| anyhow!("failed to draw bars for {}: {}", series.label, err))?;

        anno.label(series.label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 15))
        .draw()
        .map_err(|err| anyhow!("failed to draw legend: {}", err))?;

    draw_category_labels(&root, &chart, categories, rotate_labels)?;

    root.present()
        .map_err(|err| anyhow!("failed to write chart {}: {}", path.display(), err))?;
    Ok(())
}

fn y_axis_max(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0f64, f64::max);
    if max > 0.0 {
        max * 1.05
    } else {
        1.0
    }
}

fn draw_mesh(
    chart: &mut ChartContext<BitMapBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    x_desc: &str,
    y_desc: &str,
) -> anyhow::Result<()> {
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(0)
        .x_desc(x_desc)
        .y_desc(y_desc)
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(|err| anyhow!("failed to draw chart mesh: {}", err))?;
    Ok(())
}

/// Category names go below the x axis, centered under each bar slot. The
/// mesh's own x labels are disabled because its ticks land on slot edges,
/// not slot centers.
fn draw_category_labels(
    root: &DrawingArea<BitMapBackend, Shift>,
    chart: &ChartContext<BitMapBackend, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    categories: &[String],
    rotate: bool,
) -> anyhow::Result<()> {
    let font = ("sans-serif", 15).into_font();
    let style = if rotate {
        font.transform(FontTransform::Rotate270)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center))
    } else {
        font.color(&BLACK).pos(Pos::new(HPos::Center, VPos::Top))
    };

    for (i, name) in categories.iter().enumerate() {
        let (px, py) = chart
            .plotting_area()
            .map_coordinate(&(i as f64 + 0.5, 0.0));
        let pos = if rotate { (px, py + 62) } else { (px, py + 8) };

        root.draw(&Text::new(name.clone(), pos, style.clone()))
            .map_err(|err| anyhow!("failed to draw category label {}: {}", name, err))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{lighten, paired_color, shade_ramp, y_axis_max, PAIRED};

    #[test]
    fn shade_ramp_starts_at_base_and_lightens() {
        let base = super::DEM_BLUE;
        let ramp = shade_ramp(base, 10);
        assert_eq!(ramp.len(), 10);
        assert_eq!(ramp[0], base);
        assert!(ramp[9].0 > ramp[0].0);
        assert!(ramp[9].1 > ramp[0].1);
    }

    #[test]
    fn shade_ramp_of_one_is_the_base() {
        assert_eq!(shade_ramp(super::REP_RED, 1), [super::REP_RED]);
    }

    #[test]
    fn lighten_never_overflows() {
        let white = lighten(super::RGBColor(255, 255, 255), 1.0);
        assert_eq!(white, super::RGBColor(255, 255, 255));
    }

    #[test]
    fn paired_palette_wraps() {
        assert_eq!(paired_color(0), PAIRED[0]);
        assert_eq!(paired_color(PAIRED.len()), PAIRED[0]);
        assert_eq!(paired_color(PAIRED.len() + 3), PAIRED[3]);
    }

    #[test]
    fn y_axis_max_pads_and_handles_empty() {
        assert!(y_axis_max(&[2.0, 8.0]) > 8.0);
        assert_eq!(y_axis_max(&[]), 1.0);
        assert_eq!(y_axis_max(&[0.0]), 1.0);
    }
}
