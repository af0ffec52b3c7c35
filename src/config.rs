//! Run configuration.
//!
//! Built once by the caller (usually the CLI) and passed by reference into
//! [`crate::pipeline::build`].

use std::path::{Path, PathBuf};

use crate::codec;
use crate::compose::{ComposeOptions, ModePolicy};
use crate::error::{Result, SpriteError};
use crate::layout::Strip;
use crate::resample::ResizeFilter;

/// Everything needed to build one sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetConfig {
    /// Where the composite image is written. The extension selects the format.
    pub output_image: PathBuf,
    /// Where the stylesheet is written.
    pub output_css: PathBuf,
    /// Source images, in sheet order.
    pub input_images: Vec<PathBuf>,
    /// Rescale every tile to this height.
    pub fixed_height: Option<u32>,
    /// Lossy encoder quality, `0..=100`.
    pub quality: Option<u8>,
    /// Suppress the argument summary.
    pub silent: bool,
    /// Prepended to the output image name in every `url(...)`.
    pub url_prefix: String,
    pub mode_policy: ModePolicy,
    pub resize_filter: ResizeFilter,
}

impl SheetConfig {
    /// Config with defaults for every optional setting.
    pub fn new(
        output_image: impl Into<PathBuf>,
        output_css: impl Into<PathBuf>,
        input_images: impl IntoIterator<Item = impl Into<PathBuf>>,
    ) -> Self {
        Self {
            output_image: output_image.into(),
            output_css: output_css.into(),
            input_images: input_images.into_iter().map(Into::into).collect(),
            fixed_height: None,
            quality: None,
            silent: false,
            url_prefix: String::new(),
            mode_policy: ModePolicy::default(),
            resize_filter: ResizeFilter::default(),
        }
    }

    pub fn fixed_height(mut self, height: u32) -> Self {
        self.fixed_height = Some(height);
        self
    }

    pub fn quality(mut self, quality: u8) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    pub fn mode_policy(mut self, policy: ModePolicy) -> Self {
        self.mode_policy = policy;
        self
    }

    pub fn resize_filter(mut self, filter: ResizeFilter) -> Self {
        self.resize_filter = filter;
        self
    }

    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Strip layout implied by this config.
    pub fn strip(&self) -> Strip {
        Strip {
            fixed_height: self.fixed_height,
        }
    }

    pub fn compose_options(&self) -> ComposeOptions {
        ComposeOptions {
            mode_policy: self.mode_policy,
            filter: self.resize_filter,
        }
    }

    /// Check everything that can be checked without touching pixels.
    pub fn validate(&self) -> Result<()> {
        if self.input_images.is_empty() {
            return Err(crate::layout::LayoutError::EmptyInput.into());
        }
        if self.fixed_height == Some(0) {
            return Err(crate::layout::LayoutError::ZeroFixedHeight.into());
        }
        if resolve_output(&self.output_image) == resolve_output(&self.output_css) {
            return Err(SpriteError::Config(format!(
                "image and stylesheet outputs are both {}",
                self.output_image.display()
            )));
        }
        let format = codec::output_format(&self.output_image)?;
        codec::check_quality(&self.output_image, format, self.quality)?;
        Ok(())
    }

    /// Human-readable summary of the resolved arguments.
    pub fn summary_lines(&self) -> [String; 4] {
        let inputs: Vec<String> = self
            .input_images
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        [
            format!("Input ({} files): {}", inputs.len(), inputs.join(", ")),
            format!("Output: {}", self.output_image.display()),
            format!("Fixed Height: {}", display_opt(self.fixed_height)),
            format!("Quality: {}", display_opt(self.quality)),
        ]
    }
}

/// Absolute form of an output path with `.` dropped and, when the parent
/// directory exists, symlinks and `..` resolved.
fn resolve_output(path: &Path) -> PathBuf {
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let canonical = match (abs.parent(), abs.file_name()) {
        (Some(dir), Some(name)) => dir.canonicalize().ok().map(|d| d.join(name)),
        _ => None,
    };
    canonical.unwrap_or(abs)
}

fn display_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn base() -> SheetConfig {
        SheetConfig::new("out.png", "out.css", ["a.png", "b.png"])
    }

    #[test]
    fn defaults() {
        let c = base();
        assert_eq!(c.fixed_height, None);
        assert_eq!(c.quality, None);
        assert!(!c.silent);
        assert_eq!(c.url_prefix, "");
        assert_eq!(c.mode_policy, ModePolicy::AdoptFirst);
        assert_eq!(c.strip(), Strip::natural());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let c = base()
            .fixed_height(100)
            .url_prefix("/img/")
            .mode_policy(ModePolicy::Strict)
            .resize_filter(ResizeFilter::Nearest)
            .silent(true);
        assert_eq!(c.strip(), Strip::fixed_height(100));
        assert_eq!(c.compose_options().mode_policy, ModePolicy::Strict);
        assert_eq!(c.compose_options().filter, ResizeFilter::Nearest);
        assert!(c.silent);
    }

    #[test]
    fn empty_inputs_invalid() {
        let c = SheetConfig::new("out.png", "out.css", Vec::<PathBuf>::new());
        assert_eq!(c.validate().unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn zero_fixed_height_invalid() {
        let err = base().fixed_height(0).validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn same_output_paths_invalid() {
        let c = SheetConfig::new("out.png", "out.png", ["a.png"]);
        assert_eq!(c.validate().unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn same_output_file_spelled_differently_invalid() {
        let c = SheetConfig::new("out.png", "./out.png", ["a.png"]);
        assert_eq!(c.validate().unwrap_err().kind(), ErrorKind::InvalidInput);

        let cwd = std::env::current_dir().unwrap();
        let c = SheetConfig::new(cwd.join("out.png"), "out.png", ["a.png"]);
        assert_eq!(c.validate().unwrap_err().kind(), ErrorKind::InvalidInput);

        let dir = std::env::temp_dir();
        let c = SheetConfig::new(dir.join("out.png"), dir.join(".").join("out.png"), ["a.png"]);
        assert_eq!(c.validate().unwrap_err().kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn distinct_outputs_in_same_dir_valid() {
        let c = SheetConfig::new("./sheet.png", "sheet.css", ["a.png"]);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn quality_needs_lossy_output() {
        assert!(base().quality(80).validate().is_err());
        let jpeg = SheetConfig::new("out.jpg", "out.css", ["a.png"]).quality(80);
        assert!(jpeg.validate().is_ok());
        assert!(jpeg.clone().quality(101).validate().is_err());
    }

    #[test]
    fn unknown_output_extension_invalid() {
        let c = SheetConfig::new("out.unknown", "out.css", ["a.png"]);
        assert_eq!(c.validate().unwrap_err().kind(), ErrorKind::Encode);
    }

    #[test]
    fn summary_matches_arguments() {
        let lines = base().fixed_height(100).summary_lines();
        assert_eq!(lines[0], "Input (2 files): a.png, b.png");
        assert_eq!(lines[1], "Output: out.png");
        assert_eq!(lines[2], "Fixed Height: 100");
        assert_eq!(lines[3], "Quality: None");
    }
}
