//! Horizontal sprite sheet packing with CSS background-position output.
//!
//! Geometry ([`layout`], [`ident`]) is pure and `no_std` compatible. Pixel
//! work and file I/O live behind the `compose` feature.
//!
//! # Modules
//!
//! - [`layout`] — Strip layout: effective tile sizes, offsets, canvas size
//! - [`ident`] — Tile identifiers from file names
//! - [`compose`] — Paste decoded tiles onto one canvas, emit positioning records
//! - [`resample`] — Tile resizing
//! - [`codec`] — Decode sources, encode the sheet
//! - [`stylesheet`] — CSS rules for positioning records
//! - [`config`] — Run configuration
//! - [`pipeline`] — Decode → compose → write, with atomic outputs
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "compose")] {
//! use image::{DynamicImage, RgbaImage};
//! use zensprite::{ComposeOptions, SourceImage, Strip, pack, stylesheet};
//!
//! let images = [
//!     SourceImage::new("home.png", DynamicImage::ImageRgba8(RgbaImage::new(16, 16))),
//!     SourceImage::new("search.png", DynamicImage::ImageRgba8(RgbaImage::new(24, 16))),
//! ];
//! let sheet = pack(&images, Strip::natural(), ComposeOptions::default()).unwrap();
//! assert_eq!((sheet.canvas.width(), sheet.canvas.height()), (40, 16));
//!
//! let css = stylesheet::render(&sheet.records, "/img/", "sprites.png");
//! assert!(css.contains(".sprites_search {"));
//! assert!(css.contains("url(/img/sprites.png) -16px 0 no-repeat"));
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod ident;
pub mod layout;

#[cfg(feature = "compose")]
pub mod codec;
#[cfg(feature = "compose")]
pub mod compose;
#[cfg(feature = "compose")]
pub mod config;
#[cfg(feature = "compose")]
pub mod error;
#[cfg(feature = "compose")]
pub mod pipeline;
#[cfg(feature = "compose")]
pub mod resample;
#[cfg(feature = "compose")]
pub mod stylesheet;

// Re-exports: core types from layout module
pub use ident::{IdentifierError, stem_before_first_dot};
pub use layout::{
    LayoutError, Placement, Rect, SheetLayout, Size, Strip, compute_layout, scale_to_height,
};

#[cfg(feature = "compose")]
pub use compose::{
    ComposeOptions, ModePolicy, PositioningRecord, SourceImage, SpriteSheet, composite, pack,
};
#[cfg(feature = "compose")]
pub use config::SheetConfig;
#[cfg(feature = "compose")]
pub use error::{ErrorKind, SpriteError};
#[cfg(feature = "compose")]
pub use pipeline::{BuildReport, build};
#[cfg(feature = "compose")]
pub use resample::ResizeFilter;
