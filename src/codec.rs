//! Decoding sources and encoding the finished sheet.

use std::io::{Seek, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, ImageReader};

use crate::compose::SourceImage;
use crate::error::{Result, SpriteError};

/// Decode the image at `path`, sniffing the format from its contents.
pub fn decode(path: &Path) -> Result<SourceImage> {
    let decode_err = |source| SpriteError::Decode {
        path: path.to_path_buf(),
        source,
    };
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?;
    let image = reader.decode().map_err(decode_err)?;
    log::debug!(
        "decoded {} ({}x{} {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );
    Ok(SourceImage::new(path, image))
}

/// Decode every path, stopping at the first failure.
pub fn decode_all<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<SourceImage>> {
    paths.iter().map(|p| decode(p.as_ref())).collect()
}

/// Output format implied by the extension of `path`.
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    ImageFormat::from_path(path).map_err(|source| SpriteError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Whether `format` takes a quality setting.
pub fn is_lossy(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Jpeg)
}

/// Reject a quality setting the encoder cannot honour.
///
/// Quality must be `0..=100` and is only accepted for lossy formats.
pub fn check_quality(path: &Path, format: ImageFormat, quality: Option<u8>) -> Result<()> {
    let Some(q) = quality else {
        return Ok(());
    };
    if q > 100 {
        return Err(SpriteError::Unsupported {
            path: path.to_path_buf(),
            reason: format!("quality {q} is outside 0-100"),
        });
    }
    if !is_lossy(format) {
        return Err(SpriteError::Unsupported {
            path: path.to_path_buf(),
            reason: format!("quality is not supported for {format:?} output"),
        });
    }
    Ok(())
}

/// Encode `canvas` as `format` into `writer`.
///
/// `path` is the final destination and only used for error context.
pub fn encode<W: Write + Seek>(
    canvas: &DynamicImage,
    writer: &mut W,
    format: ImageFormat,
    quality: Option<u8>,
    path: &Path,
) -> Result<()> {
    check_quality(path, format, quality)?;
    let encode_err = |source| SpriteError::Encode {
        path: path.to_path_buf(),
        source,
    };
    match quality {
        // JPEG quality 0 is rejected by the encoder; clamp to its minimum.
        Some(q) => canvas
            .write_with_encoder(JpegEncoder::new_with_quality(writer, q.max(1)))
            .map_err(encode_err),
        None => canvas.write_to(writer, format).map_err(encode_err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn format_from_extension() {
        assert_eq!(output_format(Path::new("sheet.png")).unwrap(), ImageFormat::Png);
        assert_eq!(output_format(Path::new("sheet.JPG")).unwrap(), ImageFormat::Jpeg);
        let err = output_format(Path::new("sheet.nope")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encode);
    }

    #[test]
    fn quality_only_for_lossy() {
        let p = Path::new("x");
        assert!(check_quality(p, ImageFormat::Png, None).is_ok());
        assert!(check_quality(p, ImageFormat::Jpeg, Some(80)).is_ok());
        assert!(check_quality(p, ImageFormat::Jpeg, Some(101)).is_err());
        let err = check_quality(p, ImageFormat::Png, Some(80)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encode);
    }

    #[test]
    fn png_round_trip_keeps_rgba() {
        let canvas = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4])));
        let mut buf = Cursor::new(Vec::new());
        encode(&canvas, &mut buf, ImageFormat::Png, None, Path::new("o.png")).unwrap();
        let back = image::load_from_memory(buf.get_ref()).unwrap();
        assert_eq!(back.color(), image::ColorType::Rgba8);
        assert_eq!(back.as_bytes(), canvas.as_bytes());
    }

    #[test]
    fn jpeg_quality_changes_output() {
        let mut img = RgbImage::new(32, 32);
        for (x, y, px) in img.enumerate_pixels_mut() {
            *px = Rgb([(x * 8) as u8, (y * 8) as u8, ((x + y) * 4) as u8]);
        }
        let canvas = DynamicImage::ImageRgb8(img);
        let mut low = Cursor::new(Vec::new());
        let mut high = Cursor::new(Vec::new());
        let p = Path::new("o.jpg");
        encode(&canvas, &mut low, ImageFormat::Jpeg, Some(5), p).unwrap();
        encode(&canvas, &mut high, ImageFormat::Jpeg, Some(95), p).unwrap();
        assert!(low.get_ref().len() < high.get_ref().len());
    }

    #[test]
    fn missing_file_is_decode_error() {
        let err = decode(Path::new("definitely/not/here.png")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
        assert_eq!(err.path(), Some(Path::new("definitely/not/here.png")));
    }
}
