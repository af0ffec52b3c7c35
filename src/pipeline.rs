//! End-to-end sheet build: decode, lay out, compose, encode, write CSS.
//!
//! Both outputs are first written to sibling temporary files and only
//! renamed into place once both are complete, so a failed run leaves any
//! previous outputs untouched.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::ColorType;

use crate::codec;
use crate::compose::{PositioningRecord, pack};
use crate::config::SheetConfig;
use crate::error::{Result, SpriteError};
use crate::layout::Size;
use crate::stylesheet;

/// What a successful build produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildReport {
    pub canvas: Size,
    pub color: ColorType,
    pub records: Vec<PositioningRecord>,
    pub image_path: PathBuf,
    pub css_path: PathBuf,
}

/// Build the sheet and stylesheet described by `config`.
pub fn build(config: &SheetConfig) -> Result<BuildReport> {
    config.validate()?;
    let format = codec::output_format(&config.output_image)?;

    let sources = codec::decode_all(&config.input_images)?;
    let sheet = pack(&sources, config.strip(), config.compose_options())?;
    drop(sources);

    let image_name = config.output_image.display().to_string();
    let css = stylesheet::render(&sheet.records, &config.url_prefix, &image_name);

    let image_out = PendingFile::write(&config.output_image, |w| {
        codec::encode(&sheet.canvas, w, format, config.quality, &config.output_image)
    })?;
    let css_out = PendingFile::write(&config.output_css, |w| {
        w.write_all(css.as_bytes())
            .map_err(|source| io_err(&config.output_css, source))
    })?;

    image_out.commit()?;
    css_out.commit()?;

    log::info!(
        "wrote {} ({}x{}, {} tiles) and {}",
        config.output_image.display(),
        sheet.canvas.width(),
        sheet.canvas.height(),
        sheet.records.len(),
        config.output_css.display()
    );

    Ok(BuildReport {
        canvas: sheet.size(),
        color: sheet.canvas.color(),
        records: sheet.records,
        image_path: config.output_image.clone(),
        css_path: config.output_css.clone(),
    })
}

fn io_err(path: &Path, source: std::io::Error) -> SpriteError {
    SpriteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// A fully written temporary sibling of `dest`, renamed on [`commit`].
///
/// Dropping it uncommitted removes the temporary file.
///
/// [`commit`]: PendingFile::commit
struct PendingFile {
    dest: PathBuf,
    tmp: PathBuf,
    committed: bool,
}

impl PendingFile {
    /// Create the temporary file, fill it with `contents`, flush and sync.
    fn write(
        dest: &Path,
        contents: impl FnOnce(&mut BufWriter<File>) -> Result<()>,
    ) -> Result<Self> {
        let tmp = temp_sibling(dest);
        let file = File::create(&tmp).map_err(|source| io_err(dest, source))?;
        let pending = Self {
            dest: dest.to_path_buf(),
            tmp,
            committed: false,
        };
        let mut writer = BufWriter::new(file);
        contents(&mut writer)?;
        let file = writer
            .into_inner()
            .map_err(|e| io_err(dest, e.into_error()))?;
        file.sync_all().map_err(|e| io_err(dest, e))?;
        Ok(pending)
    }

    fn commit(mut self) -> Result<()> {
        fs::rename(&self.tmp, &self.dest).map_err(|e| io_err(&self.dest, e))?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PendingFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.tmp);
        }
    }
}

/// `dir/.name.<pid>.tmp` next to `dest`, so the final rename stays on one
/// filesystem.
fn temp_sibling(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    dest.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}
