//! Tile resampling.
//!
//! Resizes with `fast_image_resize` directly on the decoded buffer, so the
//! colour type is preserved. Falls back to `image`'s own resampler when the
//! fast path rejects the pixel layout.

use std::path::Path;

use fast_image_resize as fr;
use image::DynamicImage;
use image::imageops::FilterType;

use crate::error::{Result, SpriteError};
use crate::layout::Size;

/// Resampling filter used when a tile's effective size differs from its
/// natural size.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResizeFilter {
    /// Nearest neighbour; no smoothing.
    Nearest,
    /// Linear interpolation.
    Bilinear,
    CatmullRom,
    Mitchell,
    /// Antialiasing Lanczos with a 3-lobe window.
    #[default]
    Lanczos3,
}

impl ResizeFilter {
    /// Parse a filter name as accepted on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "nearest" => Some(Self::Nearest),
            "bilinear" | "triangle" => Some(Self::Bilinear),
            "catmull-rom" | "catmullrom" => Some(Self::CatmullRom),
            "mitchell" => Some(Self::Mitchell),
            "lanczos3" | "lanczos" | "antialias" => Some(Self::Lanczos3),
            _ => None,
        }
    }

    /// Stable name, inverse of [`from_name`](Self::from_name).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
            Self::CatmullRom => "catmull-rom",
            Self::Mitchell => "mitchell",
            Self::Lanczos3 => "lanczos3",
        }
    }

    fn to_fast_alg(self) -> fr::ResizeAlg {
        match self {
            Self::Nearest => fr::ResizeAlg::Nearest,
            Self::Bilinear => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
            Self::CatmullRom => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
            Self::Mitchell => fr::ResizeAlg::Convolution(fr::FilterType::Mitchell),
            Self::Lanczos3 => fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3),
        }
    }

    fn to_image_filter(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Bilinear => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            // image has no Mitchell; Gaussian is the closest soft cubic.
            Self::Mitchell => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Resize `image` to exactly `size`, keeping its colour type.
///
/// `path` is only used for error context.
pub fn resample(
    image: &DynamicImage,
    size: Size,
    filter: ResizeFilter,
    path: &Path,
) -> Result<DynamicImage> {
    if size.is_empty() {
        return Err(SpriteError::Resample {
            path: path.to_path_buf(),
            reason: format!("target size {}x{} is empty", size.width, size.height),
        });
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(SpriteError::Resample {
            path: path.to_path_buf(),
            reason: "source image is empty".to_string(),
        });
    }

    let resized = match resize_fast(image, size, filter) {
        Ok(resized) => resized,
        Err(err) => {
            log::warn!(
                "fast resize of {} failed, falling back to image::resize_exact: {}",
                path.display(),
                err
            );
            image.resize_exact(size.width, size.height, filter.to_image_filter())
        }
    };

    if resized.width() != size.width || resized.height() != size.height {
        return Err(SpriteError::Resample {
            path: path.to_path_buf(),
            reason: format!(
                "resampler produced {}x{}, expected {}x{}",
                resized.width(),
                resized.height(),
                size.width,
                size.height
            ),
        });
    }
    if resized.color() != image.color() {
        return Err(SpriteError::Resample {
            path: path.to_path_buf(),
            reason: format!(
                "resampler changed colour type {:?} to {:?}",
                image.color(),
                resized.color()
            ),
        });
    }

    log::debug!(
        "resampled {} from {}x{} to {}x{} ({})",
        path.display(),
        image.width(),
        image.height(),
        size.width,
        size.height,
        filter.as_str()
    );
    Ok(resized)
}

fn resize_fast(
    image: &DynamicImage,
    size: Size,
    filter: ResizeFilter,
) -> std::result::Result<DynamicImage, fr::ResizeError> {
    let mut dst = DynamicImage::new(size.width, size.height, image.color());
    let options = fr::ResizeOptions::new().resize_alg(filter.to_fast_alg());
    let mut resizer = fr::Resizer::new();
    resizer.resize(image, &mut dst, Some(&options))?;
    Ok(dst)
}
