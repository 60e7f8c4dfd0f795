//! Temp-file lifecycle for uploaded media.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::multipart::Field;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::error::TranscribeError;

/// Disambiguates uploads landing in the same millisecond.
static UPLOAD_SEQ: AtomicU64 = AtomicU64::new(0);

/// An uploaded file spooled to disk for the duration of one request.
///
/// The file is removed when the guard drops, on success and failure alike.
/// A failed removal is logged and otherwise ignored.
pub struct SpooledUpload {
    path: PathBuf,
    original_name: String,
    mime_type: String,
    size: u64,
}

impl SpooledUpload {
    /// Streams a multipart field into a uniquely named file under `dir`.
    ///
    /// The field's content type is kept for the provider call, falling back
    /// to `audio/wav` when the browser did not send one.
    ///
    /// # Errors
    /// - If the file cannot be created or written
    /// - If reading the multipart stream fails
    pub async fn spool(dir: &Path, mut field: Field<'_>) -> Result<Self, TranscribeError> {
        let original_name = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field.content_type().unwrap_or("audio/wav").to_string();

        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(unique_name(&original_name));
        let file = File::create(&path).await?;

        // Construct the guard before writing so a partial write is still
        // cleaned up when the error propagates.
        let mut upload = Self {
            path,
            original_name,
            mime_type,
            size: 0,
        };
        upload.write_body(file, &mut field).await?;
        Ok(upload)
    }

    async fn write_body(
        &mut self,
        mut file: File,
        field: &mut Field<'_>,
    ) -> Result<(), TranscribeError> {
        while let Some(chunk) = field.chunk().await.map_err(std::io::Error::other)? {
            file.write_all(&chunk).await?;
            self.size += chunk.len() as u64;
        }
        file.flush().await?;
        Ok(())
    }

    /// Reads the spooled file back into memory for the provider call.
    pub async fn read(&self) -> Result<Vec<u8>, TranscribeError> {
        Ok(tokio::fs::read(&self.path).await?)
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Drop for SpooledUpload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(
                "Failed to clean up uploaded file {}: {e}",
                self.path.display()
            );
        }
    }
}

/// Builds a unique spool file name, keeping the upload's extension.
fn unique_name(original: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let seq = UPLOAD_SEQ.fetch_add(1, Ordering::Relaxed);
    let ext = Path::new(original)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    format!("audio-{millis}-{seq}{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_names_keep_extension_and_differ() {
        let a = unique_name("interview.mp3");
        let b = unique_name("interview.mp3");
        assert!(a.starts_with("audio-"));
        assert!(a.ends_with(".mp3"));
        assert_ne!(a, b);
        assert_eq!(unique_name("noext").matches('.').count(), 0);
    }

    #[tokio::test]
    async fn guard_removes_file_on_drop() {
        let dir = std::env::temp_dir().join("scribed-upload-test");
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let path = dir.join(unique_name("clip.wav"));
        tokio::fs::write(&path, b"data").await.unwrap();
        assert!(path.exists());

        let upload = SpooledUpload {
            path: path.clone(),
            original_name: "clip.wav".to_string(),
            mime_type: "audio/wav".to_string(),
            size: 4,
        };
        assert_eq!(upload.read().await.unwrap(), b"data");
        drop(upload);
        assert!(!path.exists());
    }
}
