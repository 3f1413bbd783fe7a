//! Transcription module for scribe-article
//!
//! Handles speech-to-text using whisper-rs.

mod audio;
mod transcriber;
#[cfg(feature = "whisper")]
mod whisper;

pub use audio::{load_audio, WHISPER_SAMPLE_RATE};
pub use transcriber::{build_transcriber, Transcriber};
#[cfg(feature = "whisper")]
pub use whisper::WhisperTranscriber;
