//! Save/download surface
//!
//! Turns an in-memory artifact into a named file on disk. Filenames are
//! `<prefix>-<epoch-millis>.<ext>` with the extension derived from the
//! artifact's mime subtype, so repeated saves never collide.

use crate::models::ImageArtifact;
use crate::Result;
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension for a mime type: the subtype after `/`, defaulting to
/// `jpeg` when the mime type carries no usable subtype.
pub fn extension_for_mime(mime_type: &str) -> &str {
    match mime_type.split_once('/') {
        Some((_, subtype)) if !subtype.is_empty() => subtype,
        _ => "jpeg",
    }
}

pub fn artifact_filename(prefix: &str, mime_type: &str, epoch_millis: i64) -> String {
    format!(
        "{}-{}.{}",
        prefix,
        epoch_millis,
        extension_for_mime(mime_type)
    )
}

pub trait Downloader: Send {
    /// Writes the artifact under a freshly timestamped name, returning the
    /// path. A missing artifact is a no-op returning `Ok(None)`.
    fn save(&self, artifact: Option<&ImageArtifact>, prefix: &str) -> Result<Option<PathBuf>>;
}

/// Downloader writing into a fixed output directory.
#[derive(Debug, Clone)]
pub struct DiskDownloader {
    output_dir: PathBuf,
}

impl DiskDownloader {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }
}

impl Downloader for DiskDownloader {
    fn save(&self, artifact: Option<&ImageArtifact>, prefix: &str) -> Result<Option<PathBuf>> {
        let Some(artifact) = artifact else {
            return Ok(None);
        };

        fs::create_dir_all(&self.output_dir)?;

        let filename =
            artifact_filename(prefix, &artifact.mime_type, Utc::now().timestamp_millis());
        let path = self.output_dir.join(filename);
        fs::write(&path, &artifact.data)?;

        tracing::info!("Saved {} image to {}", prefix, path.display());
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_subtype() {
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("image/jpeg"), "jpeg");
        assert_eq!(extension_for_mime("image/webp"), "webp");
    }

    #[test]
    fn test_extension_defaults_to_jpeg() {
        assert_eq!(extension_for_mime("image"), "jpeg");
        assert_eq!(extension_for_mime("image/"), "jpeg");
        assert_eq!(extension_for_mime(""), "jpeg");
    }

    #[test]
    fn test_filename_shape() {
        assert_eq!(
            artifact_filename("generated-image", "image/png", 1700000000000),
            "generated-image-1700000000000.png"
        );
    }

    #[test]
    fn test_save_writes_bytes_with_derived_extension() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = DiskDownloader::new(dir.path());
        let artifact = ImageArtifact::new(vec![1, 2, 3], "image/png");

        let path = downloader
            .save(Some(&artifact), "generated-image")
            .unwrap()
            .unwrap();

        assert_eq!(path.extension().unwrap(), "png");
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("generated-image-"));
    }

    #[test]
    fn test_save_none_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = DiskDownloader::new(dir.path());

        assert!(downloader.save(None, "generated-image").unwrap().is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_repeated_saves_differ_only_in_timestamp() {
        let artifact = ImageArtifact::new(vec![0xFF], "image/png");
        let first = artifact_filename("edited-image", &artifact.mime_type, 100);
        let second = artifact_filename("edited-image", &artifact.mime_type, 200);

        assert_ne!(first, second);
        assert!(first.starts_with("edited-image-"));
        assert!(second.starts_with("edited-image-"));
        assert!(first.ends_with(".png"));
        assert!(second.ends_with(".png"));
    }
}
