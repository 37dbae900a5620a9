//! Demo-tone generator built from the chip voices

use crate::error::Result as ChipResult;
use crate::mixer::mix_buffers;
use crate::synth::{square_wave, triangle_wave, DutyCycle};
use crate::wav;
use std::path::Path;

const DEMO_SECONDS: f64 = 2.0;

fn scaled(samples: Vec<f64>, gain: f64) -> Vec<f64> {
    samples.into_iter().map(|sample| sample * gain).collect()
}

/// Write a fixed 2-second three-voice chip chord as a WAV file.
///
/// Lead on duty-50 square at 440 Hz, harmony on duty-25 square at 330 Hz,
/// bass on triangle at 110 Hz.
pub fn write_demo<P: AsRef<Path>>(path: P, sample_rate: u32) -> ChipResult<()> {
    let lead = scaled(
        square_wave(440.0, DutyCycle::Half, sample_rate, DEMO_SECONDS),
        0.3,
    );
    let harmony = scaled(
        square_wave(330.0, DutyCycle::Quarter, sample_rate, DEMO_SECONDS),
        0.25,
    );
    let bass = scaled(triangle_wave(110.0, sample_rate, DEMO_SECONDS), 0.4);

    let mixed = mix_buffers(&[lead, harmony, bass]);
    wav::write_wav(path, &mixed, sample_rate)
}
