use crate::error::{AdminError, AdminErrorExt};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use boxdraft_domain::constants::DEFAULT_BANNER_MAX_BYTES;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Turns an uploaded image into a `data:` URL that can be stored as the banner.
///
/// The whole snapshot shares one storage budget, so uploads are capped and checked before
/// anything is read or encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerEncoder {
    max_bytes: u64,
}

impl Default for BannerEncoder {
    fn default() -> Self {
        Self { max_bytes: DEFAULT_BANNER_MAX_BYTES }
    }
}

impl BannerEncoder {
    #[must_use]
    pub const fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    #[must_use]
    pub const fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Reads and encodes an image file, guessing its MIME type from the extension.
    ///
    /// # Errors
    /// [`AdminError::BannerTooLarge`] when the file is bigger than the cap, [`AdminError::Io`]
    /// when it cannot be read.
    pub async fn encode_file(&self, path: impl AsRef<Path>) -> Result<String, AdminError> {
        let path = path.as_ref();
        let size = fs::metadata(path)
            .await
            .context(format!("Failed to inspect banner: {}", path.display()))?
            .len();
        self.check(size)?;

        let bytes =
            fs::read(path).await.context(format!("Failed to read banner: {}", path.display()))?;
        // The file may have grown between the two calls.
        self.check(bytes.len() as u64)?;

        Ok(self.encode_unchecked(&bytes, mime_for(path)))
    }

    /// Encodes in-memory image bytes.
    ///
    /// # Errors
    /// [`AdminError::BannerTooLarge`] when `bytes` is bigger than the cap.
    pub fn encode_bytes(&self, bytes: &[u8], mime: &str) -> Result<String, AdminError> {
        self.check(bytes.len() as u64)?;
        Ok(self.encode_unchecked(bytes, mime))
    }

    fn check(&self, size: u64) -> Result<(), AdminError> {
        if size > self.max_bytes {
            return Err(AdminError::BannerTooLarge {
                size,
                max: self.max_bytes,
                context: Some("Compress it or use an external URL".into()),
            });
        }
        Ok(())
    }

    fn encode_unchecked(&self, bytes: &[u8], mime: &str) -> String {
        debug!(bytes = bytes.len(), max = self.max_bytes, mime, "Encoding banner");
        format!("data:{mime};base64,{}", STANDARD.encode(bytes))
    }
}

/// MIME type of an image file by extension, `application/octet-stream` when unknown.
#[must_use]
pub fn mime_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        _ => "application/octet-stream",
    }
}
