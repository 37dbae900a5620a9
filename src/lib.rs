//! MIDI-to-Chiptune Rendering System
//!
//! Converts a Standard MIDI File into a mono 16-bit PCM WAV that emulates a
//! classic 4-channel console sound chip: two square-wave voices, a triangle
//! voice, and an LFSR noise voice, selected per note by MIDI channel.

pub mod config;
pub mod cursor;
pub mod demo;
pub mod error;
pub mod mixer;
pub mod notes;
pub mod parser;
pub mod qa;
pub mod synth;
pub mod wav;

pub use config::Config;
pub use error::{ChipError, Result as ChipResult};
pub use notes::Note;
pub use parser::MidiDocument;

use std::path::Path;

/// Summary of a completed render, for callers to report on
#[derive(Debug, Clone)]
pub struct RenderReport {
    pub format: u16,
    pub track_count: u16,
    pub ticks_per_quarter: u16,
    pub note_count: usize,
    /// Rendered length in seconds, tail padding included
    pub total_duration: f64,
}

/// Main rendering pipeline for MIDI-to-chiptune conversion
pub struct ChipWave {
    config: Config,
}

impl ChipWave {
    /// Create a new renderer with a validated configuration
    pub fn new(config: Config) -> ChipResult<Self> {
        config::validate_config(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render a MIDI file on disk to a WAV file
    pub fn render<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> ChipResult<RenderReport> {
        let data = std::fs::read(input)?;
        self.render_bytes(&data, output)
    }

    /// Render an in-memory MIDI buffer to a WAV file.
    ///
    /// Parse → assemble → synthesize → mix → encode, as one synchronous
    /// batch. Nothing is written when any stage fails, including when zero
    /// notes survive assembly.
    pub fn render_bytes<Q: AsRef<Path>>(&self, data: &[u8], output: Q) -> ChipResult<RenderReport> {
        let document = parser::parse_document(data)?;
        let notes = notes::assemble_notes(&document, self.config.playback.tempo_bpm)?;
        if notes.is_empty() {
            return Err(ChipError::NoNotesExtracted);
        }

        let total_duration = notes::total_duration(&notes) + self.config.render.tail_seconds;
        let sample_rate = self.config.render.sample_rate;

        let buffers: Vec<Vec<f64>> = notes
            .iter()
            .map(|note| synth::render_note(note, sample_rate, total_duration))
            .collect();
        let mixed = mixer::mix_buffers(&buffers);

        wav::write_wav(output.as_ref(), &mixed, sample_rate)?;

        if self.config.qa.enabled {
            let qa_dir = output
                .as_ref()
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("qa");
            qa::generate_artifacts(&notes, &mixed, sample_rate, &qa_dir, &self.config)?;
        }

        Ok(RenderReport {
            format: document.format,
            track_count: document.track_count,
            ticks_per_quarter: document.ticks_per_quarter,
            note_count: notes.len(),
            total_duration,
        })
    }
}

/// Check that the input path exists before starting a render
pub fn validate_input<P: AsRef<Path>>(input_path: P) -> ChipResult<()> {
    let path = input_path.as_ref();
    if !path.is_file() {
        return Err(ChipError::InputFile(format!(
            "{} does not exist or is not a file",
            path.display()
        )));
    }
    Ok(())
}
