//! Typeface used for face labels.
//!
//! DejaVu Sans is compiled into the crate and parsed at most once per process;
//! every [`LabelFont::bundled`] after the first hands out a clone of the same
//! shared font.

use crate::error::{OverlayError, Result};
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use once_cell::sync::OnceCell;

static BUNDLED_TTF: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static BUNDLED: OnceCell<FontArc> = OnceCell::new();

#[derive(Debug, Clone)]
pub struct LabelFont {
    font: FontArc,
}

impl LabelFont {
    pub fn bundled() -> Result<Self> {
        let font = BUNDLED.get_or_try_init(|| {
            log::debug!("parsing bundled label font ({} bytes)", BUNDLED_TTF.len());
            FontArc::try_from_slice(BUNDLED_TTF)
                .map_err(|e| OverlayError::FontLoad(format!("bundled DejaVu Sans: {}", e)))
        })?;
        Ok(Self { font: font.clone() })
    }

    /// Use a caller-supplied TrueType/OpenType font instead of the bundled one.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontArc::try_from_vec(data).map_err(|e| OverlayError::FontLoad(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }

    /// Pixel scale for a size in points, one point per pixel (72 dpi).
    pub fn scale_for_points(&self, points: f32) -> PxScale {
        // PxScale is the full line height, not the em size.
        match self.font.units_per_em() {
            Some(upem) if upem > 0.0 => PxScale::from(points * self.font.height_unscaled() / upem),
            _ => PxScale::from(points),
        }
    }

    /// Distance from the top of the line box to the baseline.
    pub fn ascent(&self, scale: PxScale) -> f32 {
        self.font.as_scaled(scale).ascent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_font_parses() {
        let font = LabelFont::bundled().unwrap();
        assert!(font.font().glyph_count() > 100);
        assert_ne!(font.font().glyph_id('a').0, 0);
    }

    #[test]
    fn bundled_font_is_shared() {
        let a = LabelFont::bundled().unwrap();
        let b = LabelFont::bundled().unwrap();
        assert_eq!(a.font().glyph_count(), b.font().glyph_count());
    }

    #[test]
    fn junk_bytes_are_font_load_error() {
        let err = LabelFont::from_bytes(b"not a font".to_vec()).unwrap_err();
        assert!(matches!(err, OverlayError::FontLoad(_)));
    }

    #[test]
    fn point_size_maps_to_em_pixels() {
        let font = LabelFont::bundled().unwrap();
        let scale = font.scale_for_points(24.0);
        // Line height exceeds the em square; the ascent stays just under it.
        assert!(scale.y > 24.0);
        let ascent = font.ascent(scale);
        assert!(ascent > 18.0 && ascent < 24.0, "ascent {}", ascent);
    }
}
