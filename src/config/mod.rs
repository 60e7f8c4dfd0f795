//! Configuration management for scribed.
//!
//! Settings are loaded from a TOML file passed on the command line, with
//! sensible defaults when the file or individual fields are absent. The
//! Deepgram API key is never stored in the config file; it is read from the
//! environment only.

pub mod file;

pub use file::{DeepgramConfig, ScribedConfig, ServerConfig};

/// Reads the Deepgram API key from the `DEEPGRAM_API_KEY` environment variable.
///
/// # Errors
/// - If the variable is unset or empty
pub fn api_key_from_env() -> anyhow::Result<String> {
    match std::env::var("DEEPGRAM_API_KEY") {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err(anyhow::anyhow!(
            "DEEPGRAM_API_KEY is not set. Export your Deepgram API key before starting the server"
        )),
    }
}
