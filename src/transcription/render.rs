//! Flattening of results for clipboard copy and file download.
//!
//! The browser UI performs the actual copy and download; these helpers
//! define the exact text, filename, and media type for each result variant
//! so the formatting rules live (and are tested) in one place.

use crate::transcription::options::CaptionFormat;
use crate::transcription::response::{TranscriptionResult, Utterance};

/// Formats a position in seconds as `m:ss`, e.g. 65.4 becomes "1:05".
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

fn utterance_line(utterance: &Utterance) -> String {
    format!(
        "[{} - {}] Speaker {}: {}",
        format_timestamp(utterance.start),
        format_timestamp(utterance.end),
        utterance.speaker,
        utterance.text
    )
}

/// Flattens a result into the text used for clipboard copy and downloads.
///
/// Utterances become one `[start - end] Speaker N: text` line each, joined
/// by blank lines; the raw JSON variant is pretty-printed; text and caption
/// content is exported as-is.
pub fn flatten(result: &TranscriptionResult) -> String {
    match result {
        TranscriptionResult::Text { content } | TranscriptionResult::Caption { content, .. } => {
            content.clone()
        }
        TranscriptionResult::Utterances { content } => content
            .iter()
            .map(utterance_line)
            .collect::<Vec<_>>()
            .join("\n\n"),
        TranscriptionResult::Json(value) => {
            serde_json::to_string_pretty(value).unwrap_or_default()
        }
    }
}

/// Download filename for a result. Captions use their format as extension.
pub fn download_filename(result: &TranscriptionResult) -> String {
    match result {
        TranscriptionResult::Text { .. } | TranscriptionResult::Utterances { .. } => {
            "transcription.txt".to_string()
        }
        TranscriptionResult::Json(_) => "transcription.json".to_string(),
        TranscriptionResult::Caption { format, .. } => {
            format!("transcription.{}", format.as_str())
        }
    }
}

/// Media type for a downloaded result.
pub fn media_type(result: &TranscriptionResult) -> &'static str {
    match result {
        TranscriptionResult::Json(_) => "application/json",
        TranscriptionResult::Caption {
            format: CaptionFormat::Webvtt,
            ..
        } => "text/vtt",
        _ => "text/plain",
    }
}
