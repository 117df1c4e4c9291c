//! Image storage for uploaded product pictures

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::UploadedImage;

/// URL prefix under which stored files are served
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

const MAX_EXTENSION_LEN: usize = 8;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persists the image and returns the public URL path it is served from
    async fn store(&self, image: UploadedImage) -> ProductResult<String>;
}

/// Stores uploads on local disk as `<sha256-of-content>.<ext>`.
///
/// Identical content always maps to the same file, so a second upload of
/// the same bytes is a no-op. Files are never removed.
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    dir: PathBuf,
}

impl DiskImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the uploads directory if it does not exist yet
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// File name for `image`: content hash plus the sanitized extension
    pub fn file_name_for(image: &UploadedImage) -> String {
        let hash = Sha256::digest(&image.bytes);
        let hash = format!("{hash:x}");

        match image.file_name.as_deref().and_then(sanitized_extension) {
            Some(ext) => format!("{hash}.{ext}"),
            None => hash,
        }
    }
}

/// Lowercase alphanumeric extension of `file_name`, if it has a usable one
fn sanitized_extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    let ext: String = ext
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();

    (!ext.is_empty() && ext.len() <= MAX_EXTENSION_LEN).then_some(ext)
}

#[async_trait]
impl ImageStore for DiskImageStore {
    #[instrument(skip(self, image), fields(size = image.bytes.len()))]
    async fn store(&self, image: UploadedImage) -> ProductResult<String> {
        let file_name = Self::file_name_for(&image);
        let path = self.dir.join(&file_name);

        if tokio::fs::try_exists(&path).await? {
            tracing::debug!(file = %file_name, "Image already stored");
        } else {
            // Write aside then rename so readers never see a partial file
            let tmp = self.dir.join(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));
            tokio::fs::write(&tmp, &image.bytes).await?;
            if let Err(e) = tokio::fs::rename(&tmp, &path).await {
                let _ = tokio::fs::remove_file(&tmp).await;
                return Err(e.into());
            }
            tracing::info!(file = %file_name, "Image stored");
        }

        Ok(format!("{UPLOADS_URL_PREFIX}/{file_name}"))
    }
}
