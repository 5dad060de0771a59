//! Line-chart rendering with plotters.
//!
//! Every chart shares the same layout: one line-plus-marker series per mode,
//! a mesh grid, and a legend. Colors come from a fixed palette cycled by
//! series index; since the aggregator hands series over in lexicographic
//! mode order, the same input modes always get the same colors.

use crate::aggregate::ModeSeries;
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

// 12x8 inches at 100 dpi.
const CHART_WIDTH: u32 = 1200;
const CHART_HEIGHT: u32 = 800;

/// Modes drawn with a heavier stroke so the direct variants stand out.
const EMPHASIZED_MODES: [&str; 2] = ["longpull-direct", "webhook-direct"];
const EMPHASIS_STROKE: u32 = 6;
const DEFAULT_STROKE: u32 = 2;
const MARKER_SIZE: i32 = 3;

const PALETTE: [RGBColor; 12] = [
    RGBColor(255, 0, 0),
    RGBColor(0, 0, 255),
    RGBColor(0, 128, 0),
    RGBColor(255, 165, 0),
    RGBColor(128, 0, 128),
    RGBColor(255, 215, 0),
    RGBColor(0, 255, 255),
    RGBColor(165, 42, 42),
    RGBColor(0, 0, 0),
    RGBColor(255, 0, 255),
    RGBColor(128, 128, 128),
    RGBColor(34, 139, 34),
];

/// Title, axis labels, output file and source column for one chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartSpec {
    pub file: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub column: usize,
}

/// Render a chart to the fixed output file named by the spec.
pub fn render_chart(spec: &ChartSpec, series: &[ModeSeries]) -> Result<()> {
    render_to(Path::new(spec.file), spec, series)
}

/// Render to an explicit path; split out so tests can target a temp dir.
pub fn render_to(path: &Path, spec: &ChartSpec, series: &[ModeSeries]) -> Result<()> {
    let (x_range, y_range) = axis_ranges(series);

    let root = BitMapBackend::new(path, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(spec.title, ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .label_style(("sans-serif", 18))
        .draw()?;

    for (idx, s) in series.iter().enumerate() {
        let (color, stroke) = series_style(idx, &s.mode);
        let style = color.stroke_width(stroke);
        let points: Vec<(f64, f64)> = s.points.iter().map(|p| (p.rps, p.value)).collect();

        chart
            .draw_series(LineSeries::new(points.iter().copied(), style))?
            .label(s.mode.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));

        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), MARKER_SIZE, color.filled())),
        )?;
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    root.present()
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Color and stroke width for the series at `idx`: palette cycled by index,
/// heavier stroke for the emphasized modes.
fn series_style(idx: usize, mode: &str) -> (RGBColor, u32) {
    let color = PALETTE[idx % PALETTE.len()];
    let stroke = if EMPHASIZED_MODES.contains(&mode) {
        EMPHASIS_STROKE
    } else {
        DEFAULT_STROKE
    };
    (color, stroke)
}

/// Axis ranges covering all points, with headroom; `0..1` when there is no
/// data so an empty chart still renders.
fn axis_ranges(series: &[ModeSeries]) -> (Range<f64>, Range<f64>) {
    let mut x_max = 0.0_f64;
    let mut y_max = 0.0_f64;
    for s in series {
        for p in &s.points {
            x_max = x_max.max(p.rps);
            y_max = y_max.max(p.value);
        }
    }
    let x_max = if x_max > 0.0 { x_max * 1.05 } else { 1.0 };
    let y_max = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };
    (0.0..x_max, 0.0..y_max)
}
