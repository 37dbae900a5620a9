//! Standard MIDI File parsing with running status and event-level recovery

use crate::cursor::ByteCursor;
use crate::error::{ChipError, Result as ChipResult};

/// A raw timed event as it appears on a track, before note assembly.
///
/// `delta_ticks` is the tick offset since the previous event on the same
/// track. `Unknown` stands for any event family the renderer does not use
/// (meta events included); unknowns are filtered out of parsed tracks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawMidiEvent {
    NoteOn {
        delta_ticks: u32,
        channel: u8,
        note: u8,
        velocity: u8,
    },
    NoteOff {
        delta_ticks: u32,
        channel: u8,
        note: u8,
    },
    ProgramChange {
        delta_ticks: u32,
        channel: u8,
        program: u8,
    },
    Unknown {
        delta_ticks: u32,
    },
}

impl RawMidiEvent {
    pub fn delta_ticks(&self) -> u32 {
        match *self {
            RawMidiEvent::NoteOn { delta_ticks, .. }
            | RawMidiEvent::NoteOff { delta_ticks, .. }
            | RawMidiEvent::ProgramChange { delta_ticks, .. }
            | RawMidiEvent::Unknown { delta_ticks } => delta_ticks,
        }
    }
}

/// One parsed track chunk, in file order
#[derive(Debug, Clone, Default)]
pub struct Track {
    pub events: Vec<RawMidiEvent>,
}

/// A fully parsed MIDI file, read-only after construction
#[derive(Debug, Clone)]
pub struct MidiDocument {
    pub format: u16,
    pub track_count: u16,
    pub ticks_per_quarter: u16,
    pub tracks: Vec<Track>,
}

/// Parse a complete Standard MIDI File from an in-memory buffer.
///
/// Header and track-chunk headers are parsed strictly; any failure there is
/// fatal. Individual event failures inside a track's declared span are
/// recovered by rescanning (see `parse_track`).
pub fn parse_document(data: &[u8]) -> ChipResult<MidiDocument> {
    let mut cursor = ByteCursor::new(data);
    let (format, track_count, ticks_per_quarter) = parse_header(&mut cursor)?;

    let mut tracks = Vec::with_capacity(track_count as usize);
    for _ in 0..track_count {
        tracks.push(parse_track(&mut cursor)?);
    }

    Ok(MidiDocument {
        format,
        track_count,
        ticks_per_quarter,
        tracks,
    })
}

/// Parse the MThd header chunk: format, track count, ticks per quarter note
fn parse_header(cursor: &mut ByteCursor) -> ChipResult<(u16, u16, u16)> {
    let id = cursor.read_bytes(4)?;
    if id != b"MThd" {
        return Err(ChipError::InvalidHeader(format!(
            "expected chunk id 'MThd', found {:?}",
            id
        )));
    }

    let chunk_length = cursor.read_u32_be()?;
    if chunk_length != 6 {
        return Err(ChipError::InvalidHeader(format!(
            "header chunk length {} (expected 6)",
            chunk_length
        )));
    }

    let format = cursor.read_u16_be()?;
    let track_count = cursor.read_u16_be()?;
    let ticks_per_quarter = cursor.read_u16_be()?;
    if ticks_per_quarter == 0 {
        return Err(ChipError::InvalidHeader(
            "ticks per quarter note must be positive".to_string(),
        ));
    }

    Ok((format, track_count, ticks_per_quarter))
}

/// Parse one MTrk chunk.
///
/// The event region spans exactly the declared chunk length. When a single
/// event fails to parse, the cursor rewinds to one byte past that event's
/// start and rescans, so one corrupt event costs local desynchronization
/// instead of the rest of the track. Unknown events are dropped here.
fn parse_track(cursor: &mut ByteCursor) -> ChipResult<Track> {
    let id = cursor.read_bytes(4)?;
    if id != b"MTrk" {
        return Err(ChipError::InvalidHeader(format!(
            "expected chunk id 'MTrk', found {:?}",
            id
        )));
    }

    let chunk_length = cursor.read_u32_be()?;
    let end_position = cursor.position() + chunk_length as usize;

    let mut events = Vec::new();
    let mut running_status = 0u8;

    while cursor.position() < end_position && cursor.has_more() {
        let checkpoint = cursor.position();
        let parsed = match cursor.read_vlq() {
            Ok(delta_ticks) => parse_event(cursor, &mut running_status, delta_ticks),
            Err(err) => Err(err),
        };
        match parsed {
            Ok(RawMidiEvent::Unknown { .. }) => {}
            Ok(event) => events.push(event),
            Err(_) => cursor.seek(checkpoint + 1),
        }
    }

    Ok(Track { events })
}

/// Parse one event body, applying running status.
///
/// A leading byte with the high bit set becomes the new running status; a
/// data byte reuses the previous status and stays part of the event body.
fn parse_event(
    cursor: &mut ByteCursor,
    running_status: &mut u8,
    delta_ticks: u32,
) -> ChipResult<RawMidiEvent> {
    let first = cursor.peek_u8()?;
    if first & 0x80 != 0 {
        *running_status = first;
        cursor.skip(1)?;
    }

    let status = *running_status;
    let channel = status & 0x0F;

    match status & 0xF0 {
        0x90 => {
            let note = cursor.read_u8()?;
            let velocity = cursor.read_u8()?;
            // Note On with velocity 0 is a Note Off by convention
            if velocity == 0 {
                Ok(RawMidiEvent::NoteOff {
                    delta_ticks,
                    channel,
                    note,
                })
            } else {
                Ok(RawMidiEvent::NoteOn {
                    delta_ticks,
                    channel,
                    note,
                    velocity,
                })
            }
        }
        0x80 => {
            let note = cursor.read_u8()?;
            // Release velocity is unused
            cursor.skip(1)?;
            Ok(RawMidiEvent::NoteOff {
                delta_ticks,
                channel,
                note,
            })
        }
        0xC0 => {
            let program = cursor.read_u8()?;
            Ok(RawMidiEvent::ProgramChange {
                delta_ticks,
                channel,
                program,
            })
        }
        _ => {
            if status == 0xFF {
                // Meta event: type byte, VLQ length, payload
                cursor.skip(1)?;
                let length = cursor.read_vlq()?;
                cursor.skip(length as usize)?;
            } else if status >= 0x80 {
                // Remaining channel events carry two data bytes, except the
                // 0xC0 and 0xD0 families which carry one
                cursor.skip(1)?;
                if !matches!(status & 0xE0, 0xC0 | 0xD0) {
                    cursor.skip(1)?;
                }
            }
            Ok(RawMidiEvent::Unknown { delta_ticks })
        }
    }
}
