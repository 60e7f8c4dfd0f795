//! scribed: a self-hosted web frontend and relay for Deepgram transcription.
//!
//! A browser uploads an audio/video file to `POST /transcribe`; the server
//! forwards the bytes to the Deepgram API and normalizes the response into
//! one of four result shapes (plain text, speaker-segmented utterances, the
//! raw provider payload, or caption files).

pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod transcription;
