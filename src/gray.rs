//! Grayscale normalization ahead of recognition.

use image::{ColorType, DynamicImage};

/// Return a luminance-only copy of `image`.
///
/// Dimensions are kept and alpha, if any, is carried over untouched. 8-bit colour
/// inputs come back as `Luma8` / `LumaA8`, which are already their own grayscale,
/// so applying this twice yields the same pixels as applying it once.
pub fn grayscale(image: &DynamicImage) -> DynamicImage {
    let (w, h) = (image.width(), image.height());
    // `image`'s pixel walk misbehaves on 0xN buffers; there is nothing to convert.
    if w == 0 || h == 0 {
        return DynamicImage::new(w, h, gray_color_type(image.color()));
    }
    let gray = image.grayscale();
    log::debug!(
        "grayscale {:?} -> {:?} ({}x{})",
        image.color(),
        gray.color(),
        gray.width(),
        gray.height()
    );
    gray
}

fn gray_color_type(color: ColorType) -> ColorType {
    match color {
        ColorType::L8 | ColorType::Rgb8 => ColorType::L8,
        ColorType::La8 | ColorType::Rgba8 => ColorType::La8,
        ColorType::L16 | ColorType::Rgb16 => ColorType::L16,
        ColorType::La16 | ColorType::Rgba16 => ColorType::La16,
        other => other,
    }
}
