//! Errors for the pixel and file stages.

use std::path::PathBuf;

use image::ColorType;

use crate::ident::IdentifierError;
use crate::layout::LayoutError;

/// Result alias for sheet operations.
pub type Result<T> = std::result::Result<T, SpriteError>;

/// Coarse failure category, one per pipeline stage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad arguments or inputs; nothing was decoded or written.
    InvalidInput,
    /// A source image could not be read or decoded.
    Decode,
    /// A tile could not be resampled to its effective size.
    Resample,
    /// An output could not be encoded or written.
    Encode,
}

/// Any failure while building a sprite sheet.
#[derive(Debug, thiserror::Error)]
pub enum SpriteError {
    #[error("invalid input: {0}")]
    Layout(#[from] LayoutError),

    #[error("invalid input: {}: {source}", path.display())]
    Identifier {
        path: PathBuf,
        #[source]
        source: IdentifierError,
    },

    #[error(
        "invalid input: {}: colour type {found:?} does not match sheet colour type {expected:?}",
        path.display()
    )]
    ModeMismatch {
        path: PathBuf,
        expected: ColorType,
        found: ColorType,
    },

    #[error("invalid input: {0}")]
    Config(String),

    #[error("decode failed: {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("resample failed: {}: {reason}", path.display())]
    Resample { path: PathBuf, reason: String },

    #[error("encode failed: {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("encode failed: {}: {reason}", path.display())]
    Unsupported { path: PathBuf, reason: String },

    #[error("write failed: {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SpriteError {
    /// Which stage failed.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Layout(_)
            | Self::Identifier { .. }
            | Self::ModeMismatch { .. }
            | Self::Config(_) => ErrorKind::InvalidInput,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Resample { .. } => ErrorKind::Resample,
            Self::Encode { .. } | Self::Unsupported { .. } | Self::Io { .. } => ErrorKind::Encode,
        }
    }

    /// Offending file, when the failure is tied to one.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Identifier { path, .. }
            | Self::ModeMismatch { path, .. }
            | Self::Decode { path, .. }
            | Self::Resample { path, .. }
            | Self::Encode { path, .. }
            | Self::Unsupported { path, .. }
            | Self::Io { path, .. } => Some(path),
            Self::Layout(_) | Self::Config(_) => None,
        }
    }
}
