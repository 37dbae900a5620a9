//! Note assembly: raw timed events to absolute-time note records

use crate::error::{ChipError, Result as ChipResult};
use crate::parser::{MidiDocument, RawMidiEvent};
use std::collections::HashMap;

/// A resolved musical note, immutable after creation
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// MIDI note number (0-127)
    pub midi_note: u8,
    /// MIDI channel (0-15); selects the chip voice via channel % 4
    pub channel: u8,
    /// Onset in seconds from the start of the piece
    pub start_time: f64,
    /// Length in seconds, always strictly positive
    pub duration: f64,
    /// Note-on velocity (1-127)
    pub velocity: u8,
}

impl Note {
    /// Time at which the note stops sounding
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}

/// Pair note-on/note-off events into notes across all tracks.
///
/// Each track keeps its own absolute tick counter and its own pending map
/// keyed by (channel, note); nothing carries over between tracks. A note-on
/// for a key that is already pending overwrites it (the newer onset wins),
/// and the eventual note-off closes only that most recent onset. Note-offs
/// with no pending counterpart, and pairs with non-positive duration, are
/// dropped. The result concatenates tracks in file order and is not
/// globally time-sorted.
pub fn assemble_notes(document: &MidiDocument, tempo_bpm: f64) -> ChipResult<Vec<Note>> {
    if !tempo_bpm.is_finite() || tempo_bpm <= 0.0 {
        return Err(ChipError::InvalidTempo(tempo_bpm));
    }

    let ticks_per_quarter = document.ticks_per_quarter as f64;
    let ticks_to_seconds =
        |tick: u32| -> f64 { tick as f64 / ticks_per_quarter * 60.0 / tempo_bpm };

    let mut notes = Vec::new();

    for track in &document.tracks {
        let mut current_tick = 0u32;
        let mut pending: HashMap<(u8, u8), (u8, f64)> = HashMap::new();

        for event in &track.events {
            current_tick = current_tick.saturating_add(event.delta_ticks());

            match *event {
                RawMidiEvent::NoteOn {
                    channel,
                    note,
                    velocity,
                    ..
                } => {
                    let start_time = ticks_to_seconds(current_tick);
                    pending.insert((channel, note), (velocity, start_time));
                }
                RawMidiEvent::NoteOff { channel, note, .. } => {
                    let end_time = ticks_to_seconds(current_tick);
                    if let Some((velocity, start_time)) = pending.remove(&(channel, note)) {
                        let duration = end_time - start_time;
                        if duration > 0.0 {
                            notes.push(Note {
                                midi_note: note,
                                channel,
                                start_time,
                                duration,
                                velocity,
                            });
                        }
                    }
                }
                RawMidiEvent::ProgramChange { .. } | RawMidiEvent::Unknown { .. } => {}
            }
        }
    }

    Ok(notes)
}

/// Time at which the last note ends, in seconds (0.0 for no notes)
pub fn total_duration(notes: &[Note]) -> f64 {
    notes.iter().map(Note::end_time).fold(0.0f64, f64::max)
}
