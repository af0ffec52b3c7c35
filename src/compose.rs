//! Sheet composition: paste decoded tiles onto one canvas.
//!
//! The canvas takes the colour type of the first source. Tiles with a
//! different colour type are converted into it before pasting
//! ([`ModePolicy::AdoptFirst`]) or rejected ([`ModePolicy::Strict`]).
//! Nothing here touches the filesystem.

use std::path::{Path, PathBuf};

use image::{ColorType, DynamicImage, imageops};

use crate::error::{Result, SpriteError};
use crate::ident::identifier_from_path;
use crate::layout::{Placement, Rect, SheetLayout, Size, Strip};
use crate::resample::{ResizeFilter, resample};

/// A decoded source image and the file it came from.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub path: PathBuf,
    pub image: DynamicImage,
}

impl SourceImage {
    pub fn new(path: impl Into<PathBuf>, image: DynamicImage) -> Self {
        Self {
            path: path.into(),
            image,
        }
    }

    /// Natural dimensions as decoded.
    pub fn size(&self) -> Size {
        Size::new(self.image.width(), self.image.height())
    }

    pub fn color(&self) -> ColorType {
        self.image.color()
    }

    /// Identifier taken from the file name (see [`crate::ident`]).
    pub fn identifier(&self) -> Result<&str> {
        identifier_from_path(&self.path).map_err(|source| SpriteError::Identifier {
            path: self.path.clone(),
            source,
        })
    }
}

/// What to do with tiles whose colour type differs from the first tile's.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModePolicy {
    /// Convert every tile into the first tile's colour type.
    #[default]
    AdoptFirst,
    /// Fail with [`SpriteError::ModeMismatch`].
    Strict,
}

/// Options for [`composite`] and [`pack`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ComposeOptions {
    pub mode_policy: ModePolicy,
    pub filter: ResizeFilter,
}

/// Per-tile metadata for stylesheet generation.
///
/// `x` is the unnegated offset; writers apply whatever sign convention
/// their format needs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PositioningRecord {
    pub identifier: String,
    pub x: u32,
    pub width: u32,
    pub height: u32,
}

impl PositioningRecord {
    /// Region of the sheet this record points at.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, 0, self.width, self.height)
    }
}

/// A composed sheet and one record per tile, in input order.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    pub canvas: DynamicImage,
    pub records: Vec<PositioningRecord>,
}

impl SpriteSheet {
    pub fn size(&self) -> Size {
        Size::new(self.canvas.width(), self.canvas.height())
    }
}

/// Lay out `images` with `strip` and compose them.
pub fn pack(images: &[SourceImage], strip: Strip, options: ComposeOptions) -> Result<SpriteSheet> {
    let sizes: Vec<Size> = images.iter().map(SourceImage::size).collect();
    let layout = strip.compute(&sizes)?;
    composite(images, &layout, options)
}

/// Paste `images` onto a new canvas according to `layout`.
///
/// All identifiers and colour types are checked before the canvas is
/// allocated, so invalid input fails without doing pixel work.
pub fn composite(
    images: &[SourceImage],
    layout: &SheetLayout,
    options: ComposeOptions,
) -> Result<SpriteSheet> {
    let first = images.first().ok_or(crate::layout::LayoutError::EmptyInput)?;
    if layout.len() != images.len() {
        return Err(SpriteError::Config(format!(
            "layout has {} placements for {} images",
            layout.len(),
            images.len()
        )));
    }

    let sheet_color = first.color();
    let mut identifiers = Vec::with_capacity(images.len());
    for (source, placement) in images.iter().zip(&layout.placements) {
        if placement.natural != source.size() {
            return Err(SpriteError::Config(format!(
                "{}: layout expects {}x{}, image is {}x{}",
                source.path.display(),
                placement.natural.width,
                placement.natural.height,
                source.size().width,
                source.size().height
            )));
        }
        if source.color() != sheet_color && options.mode_policy == ModePolicy::Strict {
            return Err(SpriteError::ModeMismatch {
                path: source.path.clone(),
                expected: sheet_color,
                found: source.color(),
            });
        }
        identifiers.push(source.identifier()?);
    }

    let mut canvas = DynamicImage::new(layout.canvas.width, layout.canvas.height, sheet_color);
    let mut records = Vec::with_capacity(images.len());

    let tiles = images.iter().zip(&layout.placements).zip(identifiers);
    for ((source, placement), identifier) in tiles {
        paste_tile(&mut canvas, source, placement, options)?;
        log::debug!(
            "placed {} at x={} ({}x{})",
            source.path.display(),
            placement.x,
            placement.size.width,
            placement.size.height
        );
        records.push(PositioningRecord {
            identifier: identifier.to_string(),
            x: placement.x,
            width: placement.size.width,
            height: placement.size.height,
        });
    }

    Ok(SpriteSheet { canvas, records })
}

fn paste_tile(
    canvas: &mut DynamicImage,
    source: &SourceImage,
    placement: &Placement,
    options: ComposeOptions,
) -> Result<()> {
    let sheet_color = canvas.color();
    let resized;
    let tile = if placement.needs_resize() {
        resized = resample(&source.image, placement.size, options.filter, &source.path)?;
        &resized
    } else {
        &source.image
    };

    if tile.color() == sheet_color {
        return replace(canvas, tile, placement.x, &source.path);
    }

    log::warn!(
        "{}: converting {:?} to sheet colour type {:?}",
        source.path.display(),
        tile.color(),
        sheet_color
    );
    let converted = convert_to(tile, sheet_color).ok_or_else(|| SpriteError::ModeMismatch {
        path: source.path.clone(),
        expected: sheet_color,
        found: tile.color(),
    })?;
    replace(canvas, &converted, placement.x, &source.path)
}

/// Convert `image` to `color`, or `None` for colour types `image` cannot build.
fn convert_to(image: &DynamicImage, color: ColorType) -> Option<DynamicImage> {
    Some(match color {
        ColorType::L8 => DynamicImage::ImageLuma8(image.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(image.to_rgb8()),
        ColorType::Rgba8 => DynamicImage::ImageRgba8(image.to_rgba8()),
        ColorType::L16 => DynamicImage::ImageLuma16(image.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(image.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(image.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(image.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(image.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(image.to_rgba32f()),
        _ => return None,
    })
}

/// Copy `tile` into `canvas` at `(x, 0)`, pixel for pixel. Both must share a
/// colour type.
fn replace(canvas: &mut DynamicImage, tile: &DynamicImage, x: u32, path: &Path) -> Result<()> {
    let expected = canvas.color();
    let found = tile.color();
    let x = i64::from(x);

    macro_rules! same_variant {
        ($($variant:ident),* $(,)?) => {
            match (canvas, tile) {
                $(
                    (DynamicImage::$variant(dst), DynamicImage::$variant(src)) => {
                        imageops::replace(dst, src, x, 0);
                        Ok(())
                    }
                )*
                _ => Err(SpriteError::ModeMismatch {
                    path: path.to_path_buf(),
                    expected,
                    found,
                }),
            }
        };
    }

    same_variant!(
        ImageLuma8,
        ImageLumaA8,
        ImageRgb8,
        ImageRgba8,
        ImageLuma16,
        ImageLumaA16,
        ImageRgb16,
        ImageRgba16,
        ImageRgb32F,
        ImageRgba32F,
    )
}
