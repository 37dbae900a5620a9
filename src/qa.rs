//! QA artifact generation

use crate::config::Config;
use crate::error::{ChipError, Result as ChipResult};
use crate::notes::Note;
use plotters::prelude::*;
use std::fs;
use std::path::Path;

/// Generate QA artifacts (plots) for a finished render
pub fn generate_artifacts(
    notes: &[Note],
    mixed: &[f64],
    sample_rate: u32,
    output_dir: &Path,
    config: &Config,
) -> ChipResult<()> {
    fs::create_dir_all(output_dir)?;

    generate_waveform_plot(mixed, sample_rate, output_dir, config)?;
    generate_note_plot(notes, output_dir, config)?;

    Ok(())
}

/// Peak-decimate the mixed buffer so the overview stays drawable
fn decimate(samples: &[f64], max_points: usize) -> Vec<(f64, f64)> {
    if samples.is_empty() || max_points == 0 {
        return Vec::new();
    }
    let stride = (samples.len() / max_points).max(1);
    samples
        .chunks(stride)
        .enumerate()
        .map(|(chunk_idx, chunk)| {
            let peak = chunk
                .iter()
                .copied()
                .max_by(|a, b| a.abs().partial_cmp(&b.abs()).unwrap_or(std::cmp::Ordering::Equal))
                .unwrap_or(0.0);
            ((chunk_idx * stride) as f64, peak)
        })
        .collect()
}

/// Plot an amplitude overview of the mixed master buffer
fn generate_waveform_plot(
    mixed: &[f64],
    sample_rate: u32,
    output_dir: &Path,
    config: &Config,
) -> ChipResult<()> {
    let path = output_dir.join("waveform.png");
    let root = BitMapBackend::new(&path, (config.qa.plot_width, config.qa.plot_height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(|e| {
        ChipError::QaGeneration(format!("Failed to fill plot background: {:?}", e))
    })?;

    let duration_sec = mixed.len() as f64 / sample_rate as f64;
    let points = decimate(mixed, config.qa.waveform_max_points);

    let mut chart = ChartBuilder::on(&root)
        .caption("Mixed Waveform", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..duration_sec.max(f64::MIN_POSITIVE), -1f64..1f64)
        .map_err(|e| ChipError::QaGeneration(format!("Failed to build chart: {:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Amplitude")
        .draw()
        .map_err(|e| ChipError::QaGeneration(format!("Failed to draw mesh: {:?}", e)))?;

    chart
        .draw_series(LineSeries::new(
            points
                .into_iter()
                .map(|(sample_idx, peak)| (sample_idx / sample_rate as f64, peak)),
            &BLUE,
        ))
        .map_err(|e| ChipError::QaGeneration(format!("Failed to draw series: {:?}", e)))?;

    Ok(())
}

/// Plot assembled notes as a piano roll, colored by chip voice
fn generate_note_plot(notes: &[Note], output_dir: &Path, config: &Config) -> ChipResult<()> {
    let path = output_dir.join("notes.png");
    let root = BitMapBackend::new(&path, (config.qa.plot_width, config.qa.plot_height))
        .into_drawing_area();
    root.fill(&WHITE).map_err(|e| {
        ChipError::QaGeneration(format!("Failed to fill plot background: {:?}", e))
    })?;

    let end_time = notes
        .iter()
        .map(Note::end_time)
        .fold(0.0f64, f64::max)
        .max(f64::MIN_POSITIVE);

    let mut chart = ChartBuilder::on(&root)
        .caption("Assembled Notes", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0f64..end_time, 0f64..128f64)
        .map_err(|e| ChipError::QaGeneration(format!("Failed to build chart: {:?}", e)))?;

    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("MIDI Note")
        .draw()
        .map_err(|e| ChipError::QaGeneration(format!("Failed to draw mesh: {:?}", e)))?;

    chart
        .draw_series(notes.iter().map(|note| {
            // One color per chip voice
            let color = match note.channel % 4 {
                0 => RGBColor(31, 119, 180),
                1 => RGBColor(255, 127, 14),
                2 => RGBColor(44, 160, 44),
                _ => RGBColor(127, 127, 127),
            };
            Rectangle::new(
                [
                    (note.start_time, note.midi_note as f64 - 0.4),
                    (note.end_time(), note.midi_note as f64 + 0.4),
                ],
                color.filled(),
            )
        }))
        .map_err(|e| ChipError::QaGeneration(format!("Failed to draw series: {:?}", e)))?;

    Ok(())
}
