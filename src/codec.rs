//! Image decoding and JPEG encoding.
//! Decoders are picked from file content, never from the extension.

use crate::error::{OverlayError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageError, ImageReader};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Load and fully decode the image at `path`.
///
/// The file handle lives only for the duration of this call and is released on
/// every return path.
pub fn decode(path: &Path) -> Result<DynamicImage> {
    let file = File::open(path).map_err(|e| OverlayError::from_io(path, e))?;
    let reader = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(|e| OverlayError::from_io(path, e))?;

    let Some(format) = reader.format() else {
        return Err(OverlayError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    };

    let img = reader.decode().map_err(|e| decode_error(path, e))?;
    log::debug!(
        "decoded {} as {:?} ({}x{})",
        path.display(),
        format,
        img.width(),
        img.height()
    );
    Ok(img)
}

fn decode_error(path: &Path, err: ImageError) -> OverlayError {
    match err {
        ImageError::Unsupported(_) => OverlayError::UnsupportedFormat {
            path: path.to_path_buf(),
        },
        ImageError::IoError(source) => OverlayError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => OverlayError::Decode {
            path: path.to_path_buf(),
            source: other,
        },
    }
}

/// Write `image` to `path` as a JPEG with the encoder's default quality,
/// creating or truncating the destination.
///
/// Zero-sized images are rejected before the destination is touched. If encoding
/// or flushing fails the partially written file is removed.
pub fn encode_jpeg(path: &Path, image: &DynamicImage) -> Result<()> {
    let (w, h) = (image.width(), image.height());
    if w == 0 || h == 0 {
        return Err(OverlayError::Encode(format!(
            "cannot encode a {}x{} image as jpeg",
            w, h
        )));
    }

    let file = File::create(path).map_err(|source| OverlayError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if let Err(e) = write_jpeg(file, &jpeg_compatible(image), path) {
        if let Err(rm) = std::fs::remove_file(path) {
            log::warn!("could not remove partial jpeg {}: {}", path.display(), rm);
        }
        return Err(e);
    }

    log::debug!("wrote {}x{} jpeg to {}", w, h, path.display());
    Ok(())
}

fn write_jpeg(file: File, image: &DynamicImage, path: &Path) -> Result<()> {
    let io_err = |source: std::io::Error| OverlayError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    image
        .write_with_encoder(JpegEncoder::new(&mut writer))
        .map_err(|e| match e {
            ImageError::IoError(source) => io_err(source),
            other => OverlayError::Encode(other.to_string()),
        })?;

    // Flush and sync explicitly: dropping a File swallows close-time errors.
    let file = writer.into_inner().map_err(|e| io_err(e.into_error()))?;
    file.sync_all().map_err(io_err)?;
    Ok(())
}

/// JPEG carries 8-bit gray or RGB only; alpha and wider samples are dropped.
fn jpeg_compatible(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image {
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) => Cow::Borrowed(image),
        img if img.color().has_color() => Cow::Owned(DynamicImage::ImageRgb8(img.to_rgb8())),
        img => Cow::Owned(DynamicImage::ImageLuma8(img.to_luma8())),
    }
}
