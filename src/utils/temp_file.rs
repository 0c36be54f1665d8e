use crate::error::Result;
use image::RgbaImage;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Automatically cleaned-up temporary PNG file
pub struct TempPng {
    path: PathBuf,
}

impl TempPng {
    /// Write `image` to a fresh temp file and return its handle.
    pub fn write(image: &RgbaImage) -> Result<Self> {
        let path = std::env::temp_dir().join(format!("screenlens_{}.png", Uuid::new_v4()));
        image.save(&path)?;
        Ok(Self { path })
    }

    /// Get the path to the temporary file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Convert to string path
    pub fn as_str(&self) -> &str {
        self.path.to_str().unwrap_or("")
    }
}

impl Drop for TempPng {
    fn drop(&mut self) {
        // Best effort, logged but never fatal
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::debug!("Failed to cleanup temp file {:?}: {}", self.path, e);
        }
    }
}
