//! Report rendering for the presentation layer
//!
//! Turns a [`FeatureReport`] into the gender banner, the eight feature tiles
//! (fixed label order, fixed precision, cycled palette) and a text plot of
//! the pitch track.

use serde::Serialize;

use crate::analysis::FeatureReport;

/// Tile background colors, cycled in tile order
pub const TILE_COLORS: [&str; 8] = [
    "#e74c3c", "#3498db", "#9b59b6", "#f1c40f", "#1abc9c", "#34495e", "#e67e22", "#2ecc71",
];

/// One labeled feature value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureTile {
    pub label: &'static str,
    pub value: String,
    pub color: &'static str,
}

/// Banner announcing the detected gender
pub fn gender_banner(report: &FeatureReport) -> String {
    format!("Detected Gender: {}", report.gender)
}

/// The eight feature tiles in display order
///
/// Hz and second values use 2 decimals; energy, RMS and ZCR use 4.
pub fn tiles(report: &FeatureReport) -> Vec<FeatureTile> {
    let values = [
        ("Avg Pitch", format!("{:.2} Hz", report.pitch)),
        ("Duration", format!("{:.2} sec", report.duration)),
        ("Energy", format!("{:.4}", report.energy)),
        ("RMS", format!("{:.4}", report.rms)),
        ("ZCR", format!("{:.4}", report.zcr)),
        ("Centroid", format!("{:.2}", report.centroid)),
        ("Bandwidth", format!("{:.2}", report.bandwidth)),
        ("Rolloff", format!("{:.2}", report.rolloff)),
    ];

    values
        .into_iter()
        .enumerate()
        .map(|(i, (label, value))| FeatureTile {
            label,
            value,
            color: TILE_COLORS[i % TILE_COLORS.len()],
        })
        .collect()
}

/// Banner followed by one `label: value` line per tile
pub fn render_text(report: &FeatureReport) -> String {
    let mut out = gender_banner(report);
    out.push('\n');
    for tile in tiles(report) {
        out.push_str(&format!("{}: {}\n", tile.label, tile.value));
    }
    out
}

/// Line plot of a pitch track as `height` rows of `width` characters
///
/// Columns average consecutive frames when the track is longer than the
/// plot is wide. Rows span the track's min..max; a flat track sits on the
/// bottom row. An empty track or zero-sized plot renders as an empty
/// string.
pub fn pitch_plot(track: &[f32], width: usize, height: usize) -> String {
    if track.is_empty() || width == 0 || height == 0 {
        return String::new();
    }

    let columns = downsample(track, width);
    let min = columns.iter().copied().fold(f32::INFINITY, f32::min);
    let max = columns.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let span = max - min;

    let row_of = |value: f32| -> usize {
        if span <= f32::EPSILON {
            0
        } else {
            (((value - min) / span) * (height - 1) as f32).round() as usize
        }
    };

    let mut grid = vec![vec![' '; columns.len()]; height];
    for (x, &value) in columns.iter().enumerate() {
        // Row 0 is the top line of the plot
        grid[height - 1 - row_of(value)][x] = '*';
    }

    let mut out = format!("Pitch Over Time ({:.1}-{:.1} Hz)\n", min, max);
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}

fn downsample(track: &[f32], width: usize) -> Vec<f32> {
    if track.len() <= width {
        return track.to_vec();
    }

    (0..width)
        .map(|x| {
            let start = x * track.len() / width;
            let end = ((x + 1) * track.len() / width).max(start + 1);
            let bucket = &track[start..end];
            bucket.iter().sum::<f32>() / bucket.len() as f32
        })
        .collect()
}
