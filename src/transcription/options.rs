//! Request options and their normalization from raw form fields.
//!
//! The browser submits options as multipart form fields, so everything
//! arrives as a string and any field may be absent. Normalization applies
//! the defaults of the simple mode; the advanced/simple duality is purely a
//! UI concern and does not exist here.

use std::collections::HashMap;

use serde::Serialize;

/// Output formats the client can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain transcript text, or utterances when paragraph data is available
    #[default]
    Text,
    /// Raw provider payload, passed through unmodified
    Json,
    /// WebVTT captions
    Webvtt,
    /// SubRip captions
    Srt,
}

impl OutputFormat {
    /// Parses a form value. Unknown values fall back to `Text`, which is
    /// also where the translator's default path sends them.
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            "webvtt" => OutputFormat::Webvtt,
            "srt" => OutputFormat::Srt,
            _ => OutputFormat::Text,
        }
    }

    /// Returns the caption format when this output is one, `None` otherwise.
    pub fn caption(&self) -> Option<CaptionFormat> {
        match self {
            OutputFormat::Webvtt => Some(CaptionFormat::Webvtt),
            OutputFormat::Srt => Some(CaptionFormat::Srt),
            OutputFormat::Text | OutputFormat::Json => None,
        }
    }
}

/// Caption formats Deepgram returns as plain caption text instead of JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionFormat {
    Webvtt,
    Srt,
}

impl CaptionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptionFormat::Webvtt => "webvtt",
            CaptionFormat::Srt => "srt",
        }
    }
}

/// Normalized options for one transcription request.
#[derive(Debug, Clone)]
pub struct TranscriptionOptions {
    /// Deepgram model identifier
    pub model: String,
    /// Apply smart formatting to the transcript
    pub smart_format: bool,
    /// Language code, or "auto" for provider-side detection
    pub language: String,
    /// Segment speech into speaker-attributed utterances
    pub utterances: bool,
    /// Requested result shape
    pub output_format: OutputFormat,
}

impl Default for TranscriptionOptions {
    fn default() -> Self {
        Self {
            model: "nova-3".to_string(),
            smart_format: true,
            language: "auto".to_string(),
            utterances: true,
            output_format: OutputFormat::Text,
        }
    }
}

impl TranscriptionOptions {
    /// Builds options from raw multipart form fields.
    ///
    /// Boolean fields arrive as strings; only the literal "false" turns a
    /// flag off. Missing or empty fields use the defaults.
    pub fn from_form_fields(fields: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            model: fields
                .get("model")
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or(defaults.model),
            smart_format: fields
                .get("smart_format")
                .map(|v| v != "false")
                .unwrap_or(defaults.smart_format),
            language: fields
                .get("language")
                .filter(|v| !v.is_empty())
                .cloned()
                .unwrap_or(defaults.language),
            utterances: fields
                .get("utterances")
                .map(|v| v != "false")
                .unwrap_or(defaults.utterances),
            output_format: fields
                .get("output_format")
                .map(|v| OutputFormat::parse(v))
                .unwrap_or(defaults.output_format),
        }
    }

    /// True when provider-side language detection should be requested
    /// instead of passing a language code.
    pub fn detect_language(&self) -> bool {
        self.language == "auto"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn missing_fields_use_defaults() {
        let options = TranscriptionOptions::from_form_fields(&HashMap::new());
        assert_eq!(options.model, "nova-3");
        assert!(options.smart_format);
        assert_eq!(options.language, "auto");
        assert!(options.utterances);
        assert_eq!(options.output_format, OutputFormat::Text);
        assert!(options.detect_language());
    }

    #[test]
    fn only_literal_false_disables_flags() {
        let options =
            TranscriptionOptions::from_form_fields(&fields(&[("smart_format", "false")]));
        assert!(!options.smart_format);

        // Anything that is not "false" leaves the flag on
        let options = TranscriptionOptions::from_form_fields(&fields(&[
            ("smart_format", "0"),
            ("utterances", "no"),
        ]));
        assert!(options.smart_format);
        assert!(options.utterances);
    }

    #[test]
    fn explicit_values_pass_through() {
        let options = TranscriptionOptions::from_form_fields(&fields(&[
            ("model", "nova-2"),
            ("language", "sv"),
            ("output_format", "srt"),
        ]));
        assert_eq!(options.model, "nova-2");
        assert_eq!(options.language, "sv");
        assert_eq!(options.output_format, OutputFormat::Srt);
        assert!(!options.detect_language());
    }

    #[test]
    fn empty_strings_fall_back_to_defaults() {
        let options =
            TranscriptionOptions::from_form_fields(&fields(&[("model", ""), ("language", "")]));
        assert_eq!(options.model, "nova-3");
        assert_eq!(options.language, "auto");
    }

    #[test]
    fn unknown_output_format_is_text() {
        let options =
            TranscriptionOptions::from_form_fields(&fields(&[("output_format", "docx")]));
        assert_eq!(options.output_format, OutputFormat::Text);
    }

    #[test]
    fn caption_formats_are_recognized() {
        assert_eq!(
            OutputFormat::parse("webvtt").caption(),
            Some(CaptionFormat::Webvtt)
        );
        assert_eq!(OutputFormat::parse("srt").caption(), Some(CaptionFormat::Srt));
        assert_eq!(OutputFormat::parse("json").caption(), None);
        assert_eq!(OutputFormat::parse("text").caption(), None);
    }
}
