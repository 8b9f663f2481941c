use std::path::{Path, PathBuf};

use crate::error::ErrorResponse;
use crate::settings::Settings;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use rocket::fs::TempFile;
use rocket::http::Status;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ImageError {
    #[error("Couldn't save image: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ImageError> for ErrorResponse {
    fn from(err: ImageError) -> Self {
        ErrorResponse::new(Status { code: 500 }, err.to_string())
    }
}

/// Keeps uploaded closet images in a local folder that is served under
/// `base_url`.
#[derive(Debug, Clone)]
pub(crate) struct ImageStore {
    folder: PathBuf,
    base_url: String,
}

impl ImageStore {
    pub(crate) fn new(folder: impl Into<PathBuf>, base_url: &str) -> Self {
        ImageStore {
            folder: folder.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn from_settings(settings: &Settings) -> Self {
        Self::new(&settings.image_folder, &settings.image_base_url)
    }

    pub(crate) fn folder(&self) -> &Path {
        &self.folder
    }

    /// Copies the upload under a fresh name and returns the URL it is served at.
    pub(crate) async fn store(&self, file: &mut TempFile<'_>) -> Result<String, ImageError> {
        rocket::tokio::fs::create_dir_all(&self.folder).await?;

        let extension = file
            .content_type()
            .and_then(|content_type| content_type.extension())
            .map(|ext| ext.as_str().to_string());
        let name = image_file_name(extension.as_deref());

        file.copy_to(self.folder.join(&name)).await?;
        tracing::debug!(%name, "stored image");

        Ok(self.url_for(&name))
    }

    /// Deletes an image previously returned by `store`. URLs that don't point
    /// into this store are ignored.
    pub(crate) async fn discard(&self, url: &str) {
        let name = match self.name_from_url(url) {
            Some(name) => name,
            None => return,
        };

        if let Err(err) = rocket::tokio::fs::remove_file(self.folder.join(name)).await {
            tracing::warn!(%err, %url, "couldn't remove image");
        }
    }

    fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    fn name_from_url<'u>(&self, url: &'u str) -> Option<&'u str> {
        url.strip_prefix(self.base_url.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains('/') && !name.contains(".."))
    }
}

fn image_file_name(extension: Option<&str>) -> String {
    const LEN: usize = 24;

    let stem: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(LEN)
        .map(char::from)
        .collect();

    match extension
        .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
    {
        Some(ext) => format!("{}.{}", stem, ext.to_ascii_lowercase()),
        None => stem,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("jpeg"), Some("jpeg"))]
    #[case(Some("PNG"), Some("png"))]
    #[case(Some("../sh"), None)]
    #[case(Some("toolong"), None)]
    #[case(None, None)]
    fn file_names_keep_only_safe_extensions(
        #[case] extension: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let name = image_file_name(extension);
        let (stem, ext) = match name.split_once('.') {
            Some((stem, ext)) => (stem, Some(ext)),
            None => (name.as_str(), None),
        };
        assert_eq!(stem.len(), 24);
        assert!(stem.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(ext, expected);
    }

    #[test]
    fn urls_are_under_base_url() {
        let store = ImageStore::new("images", "/images/");
        assert_eq!(store.url_for("abc.jpg"), "/images/abc.jpg");
        assert_eq!(store.name_from_url("/images/abc.jpg"), Some("abc.jpg"));
        assert_eq!(store.name_from_url("/images/../secret"), None);
        assert_eq!(store.name_from_url("/elsewhere/abc.jpg"), None);
    }

    #[rocket::async_test]
    async fn discard_removes_stored_file() {
        let folder = std::env::temp_dir().join(format!("closet-images-{}", image_file_name(None)));
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("coat.jpg"), b"jpeg").unwrap();

        let store = ImageStore::new(&folder, "/images");
        store.discard("/images/coat.jpg").await;
        store.discard("/images/missing.jpg").await;

        assert!(!folder.join("coat.jpg").exists());
        std::fs::remove_dir_all(&folder).unwrap();
    }
}
