//! Error types for the chiptune renderer

use std::fmt;

/// Custom error type for MIDI-to-chiptune processing
#[derive(Debug, Clone)]
pub enum ChipError {
    /// E001: Header chunk id mismatch or malformed file header
    InvalidHeader(String),
    /// E002: Byte buffer exhausted mid-read
    UnexpectedEndOfData { offset: usize },
    /// E003: Tempo must be finite and positive
    InvalidTempo(f64),
    /// E004: No notes could be assembled from the input
    NoNotesExtracted,
    /// E005: Input file I/O error
    InputFile(String),
    /// E006: WAV encoding error
    WavEncode(String),
    /// E007: Configuration error
    Config(String),
    /// E008: QA artifact generation error
    QaGeneration(String),
}

impl fmt::Display for ChipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChipError::InvalidHeader(msg) => {
                write!(f, "E001: Invalid MIDI header - {}", msg)
            }
            ChipError::UnexpectedEndOfData { offset } => {
                write!(f, "E002: Unexpected end of data at offset {}", offset)
            }
            ChipError::InvalidTempo(bpm) => {
                write!(f, "E003: Invalid tempo {} BPM (must be finite and > 0)", bpm)
            }
            ChipError::NoNotesExtracted => {
                write!(f, "E004: No notes extracted from input")
            }
            ChipError::InputFile(msg) => {
                write!(f, "E005: Input file error - {}", msg)
            }
            ChipError::WavEncode(msg) => {
                write!(f, "E006: WAV encoding error - {}", msg)
            }
            ChipError::Config(msg) => {
                write!(f, "E007: Configuration error - {}", msg)
            }
            ChipError::QaGeneration(msg) => {
                write!(f, "E008: QA artifact generation error - {}", msg)
            }
        }
    }
}

impl std::error::Error for ChipError {}

// From implementations for common error types
impl From<std::io::Error> for ChipError {
    fn from(err: std::io::Error) -> Self {
        ChipError::InputFile(format!("File I/O error: {}", err))
    }
}

impl From<hound::Error> for ChipError {
    fn from(err: hound::Error) -> Self {
        ChipError::WavEncode(err.to_string())
    }
}

impl From<serde_json::Error> for ChipError {
    fn from(err: serde_json::Error) -> Self {
        ChipError::Config(format!("JSON error: {}", err))
    }
}

/// Result type alias for chiptune rendering operations
pub type Result<T> = std::result::Result<T, ChipError>;
