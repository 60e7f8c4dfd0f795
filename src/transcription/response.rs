//! Translation of provider responses into client-facing results.
//!
//! The Deepgram payload shape is externally dictated and only loosely
//! validated: the structs below model just the fields the translator
//! inspects, with everything optional so partial responses degrade instead
//! of failing deserialization outright.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::TranscribeError;
use crate::transcription::options::{CaptionFormat, OutputFormat, TranscriptionOptions};

/// A speaker-attributed, time-bounded span of transcribed speech.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Utterance {
    pub speaker: u32,
    /// Start of the span in seconds
    pub start: f64,
    /// End of the span in seconds
    pub end: f64,
    pub text: String,
}

/// The normalized result of one transcription request.
///
/// Exactly one variant per request, chosen by the requested output format
/// and, on the text path, by whether paragraph data came back.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptionResult {
    /// Plain transcript text
    Text { content: String },
    /// Speaker-segmented utterances in order of appearance
    Utterances { content: Vec<Utterance> },
    /// The raw provider payload, passed through unmodified
    Json(Value),
    /// Caption text returned verbatim by the provider
    Caption {
        format: CaptionFormat,
        content: String,
    },
}

impl TranscriptionResult {
    /// Wire representation of the result.
    ///
    /// The json variant serializes as the provider payload itself, exactly
    /// as received; the other variants carry a `type` tag.
    pub fn into_value(self) -> Value {
        match self {
            TranscriptionResult::Json(value) => value,
            TranscriptionResult::Text { content } => json!({
                "type": "text",
                "content": content,
            }),
            TranscriptionResult::Utterances { content } => json!({
                "type": "utterances",
                "content": content,
            }),
            TranscriptionResult::Caption { format, content } => json!({
                "type": "caption",
                "format": format,
                "content": content,
            }),
        }
    }
}

/// Partially-typed view of the Deepgram listen response.
#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: Option<ListenResults>,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    #[serde(default)]
    channels: Vec<Channel>,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    transcript: Option<String>,
    paragraphs: Option<ParagraphGroup>,
}

#[derive(Debug, Deserialize)]
struct ParagraphGroup {
    #[serde(default)]
    paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Deserialize)]
struct Paragraph {
    /// Only present when diarization attributed the paragraph to a speaker
    #[serde(default)]
    speaker: u32,
    start: f64,
    end: f64,
    #[serde(default)]
    sentences: Vec<Sentence>,
}

#[derive(Debug, Deserialize)]
struct Sentence {
    text: String,
}

/// Translates a raw provider response body into a result variant.
///
/// Caption outputs pass the body through without inspection, since Deepgram
/// returns caption text rather than JSON for those. The json output parses
/// but does not reshape. The text path extracts utterances when they were
/// requested and paragraph data is present and non-empty, and otherwise
/// falls back silently to the plain transcript string.
///
/// # Errors
/// - If the body is not JSON where JSON is expected
/// - If `results.channels[0]` is missing on the text path
/// - If neither paragraphs nor a transcript can be extracted
pub fn translate(
    body: &str,
    options: &TranscriptionOptions,
) -> Result<TranscriptionResult, TranscribeError> {
    if let Some(format) = options.output_format.caption() {
        return Ok(TranscriptionResult::Caption {
            format,
            content: body.to_string(),
        });
    }

    let payload: Value = serde_json::from_str(body).map_err(|e| {
        TranscribeError::Extraction(format!("Invalid response format from Deepgram: {e}"))
    })?;

    if options.output_format == OutputFormat::Json {
        return Ok(TranscriptionResult::Json(payload));
    }

    let parsed: ListenResponse = serde_json::from_value(payload).map_err(|e| {
        TranscribeError::Extraction(format!("Invalid response format from Deepgram: {e}"))
    })?;

    let channel = parsed
        .results
        .and_then(|r| r.channels.into_iter().next())
        .ok_or_else(|| {
            TranscribeError::Extraction("Invalid response format from Deepgram".to_string())
        })?;

    let alternative = channel.alternatives.into_iter().next();

    if options.utterances {
        if let Some(group) = alternative.as_ref().and_then(|a| a.paragraphs.as_ref()) {
            if !group.paragraphs.is_empty() {
                let content = group
                    .paragraphs
                    .iter()
                    .map(|p| Utterance {
                        speaker: p.speaker,
                        start: p.start,
                        end: p.end,
                        text: p
                            .sentences
                            .iter()
                            .map(|s| s.text.as_str())
                            .collect::<Vec<_>>()
                            .join(" "),
                    })
                    .collect();
                return Ok(TranscriptionResult::Utterances { content });
            }
        }
    }

    match alternative.and_then(|a| a.transcript) {
        Some(transcript) if !transcript.is_empty() => {
            Ok(TranscriptionResult::Text {
                content: transcript,
            })
        }
        _ => Err(TranscribeError::Extraction(
            "Unable to extract transcript from response".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(output_format: OutputFormat, utterances: bool) -> TranscriptionOptions {
        TranscriptionOptions {
            output_format,
            utterances,
            ..Default::default()
        }
    }

    const PARAGRAPH_RESPONSE: &str = r#"{
        "results": {
            "channels": [{
                "alternatives": [{
                    "transcript": "hello there how are you",
                    "paragraphs": {
                        "transcript": "\nhello there\n\nhow are you\n",
                        "paragraphs": [
                            {
                                "speaker": 0,
                                "start": 0.5,
                                "end": 4.2,
                                "sentences": [
                                    {"text": "Hello there.", "start": 0.5, "end": 1.9},
                                    {"text": "Nice to see you.", "start": 2.0, "end": 4.2}
                                ]
                            },
                            {
                                "speaker": 1,
                                "start": 5.0,
                                "end": 7.5,
                                "sentences": [
                                    {"text": "How are you?", "start": 5.0, "end": 7.5}
                                ]
                            }
                        ]
                    }
                }]
            }]
        }
    }"#;

    #[test]
    fn paragraphs_become_utterances() {
        let result =
            translate(PARAGRAPH_RESPONSE, &options(OutputFormat::Text, true)).unwrap();
        let TranscriptionResult::Utterances { content } = result else {
            panic!("expected utterances");
        };
        assert_eq!(content.len(), 2);
        assert_eq!(content[0].speaker, 0);
        assert_eq!(content[0].start, 0.5);
        assert_eq!(content[0].end, 4.2);
        assert_eq!(content[0].text, "Hello there. Nice to see you.");
        assert_eq!(content[1].speaker, 1);
        assert_eq!(content[1].text, "How are you?");
    }

    #[test]
    fn utterances_disabled_falls_back_to_transcript() {
        let result =
            translate(PARAGRAPH_RESPONSE, &options(OutputFormat::Text, false)).unwrap();
        assert_eq!(
            result,
            TranscriptionResult::Text {
                content: "hello there how are you".to_string()
            }
        );
    }

    #[test]
    fn missing_paragraphs_falls_back_to_transcript() {
        let body = r#"{
            "results": {
                "channels": [{
                    "alternatives": [{"transcript": "just plain text"}]
                }]
            }
        }"#;
        let result = translate(body, &options(OutputFormat::Text, true)).unwrap();
        assert_eq!(
            result,
            TranscriptionResult::Text {
                content: "just plain text".to_string()
            }
        );
    }

    #[test]
    fn empty_paragraph_list_falls_back_to_transcript() {
        let body = r#"{
            "results": {
                "channels": [{
                    "alternatives": [{
                        "transcript": "still here",
                        "paragraphs": {"paragraphs": []}
                    }]
                }]
            }
        }"#;
        let result = translate(body, &options(OutputFormat::Text, true)).unwrap();
        assert_eq!(
            result,
            TranscriptionResult::Text {
                content: "still here".to_string()
            }
        );
    }

    #[test]
    fn missing_channels_is_extraction_error() {
        let body = r#"{"metadata": {"request_id": "abc"}}"#;
        let err = translate(body, &options(OutputFormat::Text, true)).unwrap_err();
        assert!(matches!(err, TranscribeError::Extraction(_)));
    }

    #[test]
    fn missing_transcript_is_extraction_error() {
        let body = r#"{"results": {"channels": [{"alternatives": [{}]}]}}"#;
        let err = translate(body, &options(OutputFormat::Text, true)).unwrap_err();
        let TranscribeError::Extraction(message) = err else {
            panic!("expected extraction error");
        };
        assert!(message.contains("Unable to extract transcript"));
    }

    #[test]
    fn json_output_is_identity() {
        let result =
            translate(PARAGRAPH_RESPONSE, &options(OutputFormat::Json, true)).unwrap();
        let TranscriptionResult::Json(value) = result else {
            panic!("expected json passthrough");
        };
        let expected: Value = serde_json::from_str(PARAGRAPH_RESPONSE).unwrap();
        assert_eq!(value, expected);
    }

    #[test]
    fn json_wire_value_is_untagged() {
        let payload: Value = serde_json::from_str(PARAGRAPH_RESPONSE).unwrap();
        let value = TranscriptionResult::Json(payload.clone()).into_value();
        assert_eq!(value, payload);
        assert!(value.get("type").is_none());
    }

    #[test]
    fn caption_body_passes_through_without_parsing() {
        let vtt = "WEBVTT\n\n00:00:00.500 --> 00:00:04.200\nHello there.\n";
        let result = translate(vtt, &options(OutputFormat::Webvtt, true)).unwrap();
        assert_eq!(
            result,
            TranscriptionResult::Caption {
                format: CaptionFormat::Webvtt,
                content: vtt.to_string()
            }
        );
    }

    #[test]
    fn tagged_wire_values_carry_type() {
        let value = TranscriptionResult::Text {
            content: "hi".to_string(),
        }
        .into_value();
        assert_eq!(value["type"], "text");
        assert_eq!(value["content"], "hi");

        let value = TranscriptionResult::Caption {
            format: CaptionFormat::Srt,
            content: "1\n00:00:00,500 --> 00:00:04,200\nHello\n".to_string(),
        }
        .into_value();
        assert_eq!(value["type"], "caption");
        assert_eq!(value["format"], "srt");
    }
}
