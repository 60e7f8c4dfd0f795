//! Deepgram API implementation.
//!
//! Sends the uploaded audio bytes in a single synchronous request. Deepgram
//! takes the raw media as the request body (no multipart) with options as
//! query parameters, and authenticates with a `Token` authorization header.

use serde_json::Value;

use crate::error::TranscribeError;
use crate::transcription::options::TranscriptionOptions;

/// Builds the query parameters for a Deepgram listen request.
///
/// `language` and `detect_language` are mutually exclusive: the "auto"
/// language asks the provider to detect the language itself. `format` is
/// only sent for caption outputs, which Deepgram answers with plain caption
/// text instead of JSON.
pub fn query_params(options: &TranscriptionOptions) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("model", options.model.clone()),
        ("smart_format", options.smart_format.to_string()),
        ("utterances", options.utterances.to_string()),
    ];

    if options.detect_language() {
        params.push(("detect_language", "true".to_string()));
    } else {
        params.push(("language", options.language.clone()));
    }

    if let Some(format) = options.output_format.caption() {
        params.push(("format", format.as_str().to_string()));
    }

    params
}

/// Sends audio to Deepgram and returns the raw response body.
///
/// The content type is taken from the upload so Deepgram can detect the
/// container format.
///
/// # Errors
/// - If the request cannot be sent (connection, timeout)
/// - If Deepgram returns a non-2xx status; its error body is carried in the
///   error's `details`
pub async fn transcribe(
    client: &reqwest::Client,
    api_url: &str,
    api_key: &str,
    audio: Vec<u8>,
    mime_type: &str,
    options: &TranscriptionOptions,
) -> Result<String, TranscribeError> {
    let params = query_params(options);

    tracing::debug!(
        "Deepgram API call: POST {api_url} ({} bytes, {mime_type}), params: {params:?}",
        audio.len()
    );

    let response = match client
        .post(api_url)
        .query(&params)
        .header("Authorization", format!("Token {api_key}"))
        .header("Content-Type", mime_type)
        .body(audio)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            let message = if e.is_connect() {
                "Failed to connect to the Deepgram API server. Check your internet connection."
                    .to_string()
            } else if e.is_timeout() {
                "Request to Deepgram timed out. The API server is not responding.".to_string()
            } else {
                format!("Deepgram network error: {e}")
            };
            return Err(TranscribeError::Provider {
                message,
                details: None,
            });
        }
    };

    let status = response.status();
    if !status.is_success() {
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let details = serde_json::from_str(&error_body)
            .unwrap_or_else(|_| Value::String(error_body.clone()));
        return Err(TranscribeError::Provider {
            message: format_error(status.as_u16(), &error_body),
            details: Some(details),
        });
    }

    response.text().await.map_err(|e| TranscribeError::Provider {
        message: format!("Failed to read Deepgram response: {e}"),
        details: None,
    })
}

/// Formats HTTP error codes into human-readable messages.
fn format_error(status: u16, error_body: &str) -> String {
    match status {
        401 => "Deepgram API key is invalid or expired. Check DEEPGRAM_API_KEY.".to_string(),
        403 => "You don't have permission to use Deepgram's API. Check your API key and account status."
            .to_string(),
        429 => "Too many requests to Deepgram. You've hit the API rate limit. Please wait and try again."
            .to_string(),
        500 | 502 | 503 | 504 => {
            "Deepgram API server is experiencing issues. Please try again later.".to_string()
        }
        _ => format!("Deepgram API error (status {status}): {error_body}"),
    }
}
