//! Outbound client for the transcription provider.
//!
//! scribed relays to a single provider (Deepgram). The client returns the
//! raw response body verbatim; interpretation happens in the response
//! translator, which is the only place that knows what shape to expect.

mod deepgram;

pub use deepgram::{query_params, transcribe};
