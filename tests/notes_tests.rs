//! Validation tests for note assembly

use chipwave::error::ChipError;
use chipwave::notes::{assemble_notes, total_duration};
use chipwave::parser::{MidiDocument, RawMidiEvent, Track};

/// Build a document around pre-parsed tracks
fn document(tracks: Vec<Track>, ticks_per_quarter: u16) -> MidiDocument {
    MidiDocument {
        format: 1,
        track_count: tracks.len() as u16,
        ticks_per_quarter,
        tracks,
    }
}

fn note_on(delta_ticks: u32, channel: u8, note: u8, velocity: u8) -> RawMidiEvent {
    RawMidiEvent::NoteOn {
        delta_ticks,
        channel,
        note,
        velocity,
    }
}

fn note_off(delta_ticks: u32, channel: u8, note: u8) -> RawMidiEvent {
    RawMidiEvent::NoteOff {
        delta_ticks,
        channel,
        note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_simple_pair_produces_one_note() {
        // 480 ticks at 480 tpq and 120 BPM is one quarter note: 0.5 s
        let doc = document(
            vec![Track {
                events: vec![note_on(0, 0, 69, 100), note_off(480, 0, 69)],
            }],
            480,
        );
        let notes = assemble_notes(&doc, 120.0).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].midi_note, 69);
        assert_eq!(notes[0].channel, 0);
        assert_eq!(notes[0].velocity, 100);
        assert!((notes[0].start_time - 0.0).abs() < EPS);
        assert!((notes[0].duration - 0.5).abs() < EPS);
    }

    #[test]
    fn test_tempo_scales_time() {
        let doc = document(
            vec![Track {
                events: vec![note_on(0, 0, 60, 90), note_off(480, 0, 60)],
            }],
            480,
        );
        let notes = assemble_notes(&doc, 60.0).unwrap();
        assert!((notes[0].duration - 1.0).abs() < EPS, "60 BPM doubles the quarter length");

        let notes = assemble_notes(&doc, 240.0).unwrap();
        assert!((notes[0].duration - 0.25).abs() < EPS);
    }

    #[test]
    fn test_unmatched_note_off_is_discarded() {
        let doc = document(
            vec![Track {
                events: vec![note_off(100, 0, 69)],
            }],
            480,
        );
        assert!(assemble_notes(&doc, 120.0).unwrap().is_empty());
    }

    #[test]
    fn test_dangling_note_on_produces_nothing() {
        let doc = document(
            vec![Track {
                events: vec![note_on(0, 0, 69, 100)],
            }],
            480,
        );
        assert!(assemble_notes(&doc, 120.0).unwrap().is_empty());
    }

    #[test]
    fn test_zero_duration_pair_is_discarded() {
        let doc = document(
            vec![Track {
                events: vec![note_on(0, 0, 69, 100), note_off(0, 0, 69)],
            }],
            480,
        );
        assert!(assemble_notes(&doc, 120.0).unwrap().is_empty());
    }

    #[test]
    fn test_retrigger_keeps_newest_onset() {
        // A second NoteOn on the same key overwrites the pending entry;
        // the NoteOff closes only the newest one
        let doc = document(
            vec![Track {
                events: vec![
                    note_on(0, 0, 60, 100),
                    note_on(100, 0, 60, 80),
                    note_off(100, 0, 60),
                ],
            }],
            480,
        );
        let notes = assemble_notes(&doc, 120.0).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].velocity, 80);
        let tick_seconds = 0.5 / 480.0;
        assert!((notes[0].start_time - 100.0 * tick_seconds).abs() < EPS);
        assert!((notes[0].duration - 100.0 * tick_seconds).abs() < EPS);
    }

    #[test]
    fn test_channels_are_independent_keys() {
        let doc = document(
            vec![Track {
                events: vec![
                    note_on(0, 0, 60, 100),
                    note_on(0, 1, 60, 90),
                    note_off(480, 1, 60),
                    note_off(0, 0, 60),
                ],
            }],
            480,
        );
        let mut notes = assemble_notes(&doc, 120.0).unwrap();
        notes.sort_by_key(|n| n.channel);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].channel, 0);
        assert_eq!(notes[1].channel, 1);
    }

    #[test]
    fn test_pending_state_does_not_cross_tracks() {
        // A NoteOff in a later track must not close a NoteOn left open in
        // an earlier one
        let doc = document(
            vec![
                Track {
                    events: vec![note_on(0, 0, 69, 100)],
                },
                Track {
                    events: vec![note_off(480, 0, 69)],
                },
            ],
            480,
        );
        assert!(assemble_notes(&doc, 120.0).unwrap().is_empty());
    }

    #[test]
    fn test_program_change_advances_the_clock() {
        let doc = document(
            vec![Track {
                events: vec![
                    note_on(0, 0, 69, 100),
                    RawMidiEvent::ProgramChange {
                        delta_ticks: 240,
                        channel: 0,
                        program: 5,
                    },
                    note_off(240, 0, 69),
                ],
            }],
            480,
        );
        let notes = assemble_notes(&doc, 120.0).unwrap();
        assert_eq!(notes.len(), 1);
        assert!(
            (notes[0].duration - 0.5).abs() < EPS,
            "delta on the program change must count toward the note length"
        );
    }

    #[test]
    fn test_tracks_concatenate_in_file_order() {
        let doc = document(
            vec![
                Track {
                    events: vec![note_on(480, 0, 72, 100), note_off(480, 0, 72)],
                },
                Track {
                    events: vec![note_on(0, 1, 48, 100), note_off(480, 1, 48)],
                },
            ],
            480,
        );
        let notes = assemble_notes(&doc, 120.0).unwrap();
        // Second track's note starts earlier but stays after the first
        // track's note in the output
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].midi_note, 72);
        assert_eq!(notes[1].midi_note, 48);
        assert!(notes[1].start_time < notes[0].start_time);
    }

    #[test]
    fn test_invalid_tempo_is_rejected() {
        let doc = document(vec![], 480);
        assert!(matches!(
            assemble_notes(&doc, 0.0),
            Err(ChipError::InvalidTempo(_))
        ));
        assert!(matches!(
            assemble_notes(&doc, -30.0),
            Err(ChipError::InvalidTempo(_))
        ));
        assert!(matches!(
            assemble_notes(&doc, f64::NAN),
            Err(ChipError::InvalidTempo(_))
        ));
        assert!(matches!(
            assemble_notes(&doc, f64::INFINITY),
            Err(ChipError::InvalidTempo(_))
        ));
    }

    #[test]
    fn test_total_duration_is_latest_end() {
        let doc = document(
            vec![Track {
                events: vec![
                    note_on(0, 0, 60, 100),
                    note_off(480, 0, 60),
                    note_on(0, 0, 64, 100),
                    note_off(960, 0, 64),
                ],
            }],
            480,
        );
        let notes = assemble_notes(&doc, 120.0).unwrap();
        assert_eq!(notes.len(), 2);
        assert!((total_duration(&notes) - 1.5).abs() < EPS);
        assert_eq!(total_duration(&[]), 0.0);
    }
}
