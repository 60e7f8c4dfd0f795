//! Format-aware transcript translation layer.
//!
//! This module owns the one piece of logic with real decision structure:
//! normalizing raw form fields into request options, assembling the outbound
//! provider request, and translating the provider's response into one of
//! four client-facing result shapes.

pub mod api;
pub mod options;
pub mod render;
pub mod response;

pub use options::{CaptionFormat, OutputFormat, TranscriptionOptions};
pub use response::{translate, TranscriptionResult, Utterance};
