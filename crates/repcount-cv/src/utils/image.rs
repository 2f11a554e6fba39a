//! Frame and font helpers

use crate::Result;
use crate::overlay::Rgb;
use ab_glyph::FontVec;
use anyhow::Context;
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("{path:?} is not a usable TrueType/OpenType font")]
    InvalidFont { path: PathBuf },

    #[error("frame size {width}x{height} is empty")]
    EmptyFrame { width: u32, height: u32 },
}

/// Image utility functions
pub struct ImageUtils;

impl ImageUtils {
    /// Solid frame used when there is no camera image to draw on
    pub fn blank_frame(width: u32, height: u32, color: Rgb) -> Result<RgbImage> {
        if width == 0 || height == 0 {
            return Err(OverlayError::EmptyFrame { width, height }.into());
        }
        Ok(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([color.0, color.1, color.2]),
        ))
    }

    /// Save a frame, creating parent directories as needed
    pub fn save_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        image
            .save(path)
            .with_context(|| format!("Failed to save image: {:?}", path))
    }

    pub fn load_font<P: AsRef<Path>>(path: P) -> Result<FontVec> {
        let path = path.as_ref();
        let bytes = fs::read(path).with_context(|| format!("Failed to read font: {:?}", path))?;
        let font = FontVec::try_from_vec(bytes).map_err(|_| OverlayError::InvalidFont {
            path: path.to_path_buf(),
        })?;
        info!(path = ?path, "loaded overlay font");
        Ok(font)
    }
}
