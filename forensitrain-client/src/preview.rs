//! Scoped image preview resources
//!
//! A preview is a transient copy of the selected image on disk, created so
//! an external viewer can show it while the upload is in flight. The file
//! is removed deterministically on drop: selecting a new image or leaving
//! the view releases the previous preview, nothing accumulates across
//! repeated selections.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::ImageUpload;

static PREVIEW_SEQ: AtomicU64 = AtomicU64::new(0);

/// A live preview file, removed when dropped
#[derive(Debug)]
pub struct ImagePreview {
    path: PathBuf,
}

impl ImagePreview {
    /// Write the upload to a uniquely named file under the system temp dir
    pub fn new(upload: &ImageUpload) -> io::Result<Self> {
        let seq = PREVIEW_SEQ.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "forensitrain-preview-{}-{}-{}",
            std::process::id(),
            seq,
            upload.file_name
        ));
        fs::write(&path, &upload.bytes)?;
        debug!("Preview created: {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ImagePreview {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            debug!("Preview cleanup failed for {}: {}", self.path.display(), e);
        }
    }
}
