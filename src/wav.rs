//! PCM quantization and WAV container output

use crate::error::Result as ChipResult;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::{Seek, Write};
use std::path::Path;

/// Container parameters: mono, 16-bit signed integer PCM
pub fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

/// Quantize floating-point samples to signed 16-bit PCM.
///
/// Each sample is clamped to [-1.0, 1.0], scaled by 32767, and truncated
/// toward zero, so the output range is [-32767, 32767] and -32768 never
/// occurs.
pub fn quantize(samples: &[f64]) -> Vec<i16> {
    samples
        .iter()
        .map(|&sample| (sample.clamp(-1.0, 1.0) * 32767.0) as i16)
        .collect()
}

/// Write samples as a canonical 44-byte-header WAV file
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f64], sample_rate: u32) -> ChipResult<()> {
    let mut writer = WavWriter::create(path, wav_spec(sample_rate))?;
    for sample in quantize(samples) {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Write samples as WAV into any seekable sink
pub fn write_wav_to<W: Write + Seek>(sink: W, samples: &[f64], sample_rate: u32) -> ChipResult<()> {
    let mut writer = WavWriter::new(sink, wav_spec(sample_rate))?;
    for sample in quantize(samples) {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
