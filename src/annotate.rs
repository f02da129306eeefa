//! Draw recognised faces onto a copy of the source image and save the result.

use crate::codec;
use crate::config::OverlayStyle;
use crate::error::{OverlayError, Result};
use crate::face::{Face, Rect};
use crate::font::LabelFont;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Annotator {
    font: LabelFont,
    style: OverlayStyle,
}

impl Annotator {
    pub fn new(font: LabelFont, style: OverlayStyle) -> Self {
        Self { font, style }
    }

    pub fn with_bundled_font(style: OverlayStyle) -> Result<Self> {
        Ok(Self::new(LabelFont::bundled()?, style))
    }

    pub fn style(&self) -> &OverlayStyle {
        &self.style
    }

    /// Load the image at `path` and draw `faces` on it in order.
    ///
    /// Decode failures are returned as-is. The file on disk is never modified.
    pub fn draw_faces(&self, path: &Path, faces: &[Face]) -> Result<DynamicImage> {
        let img = codec::decode(path)?;
        log::debug!("drawing {} faces on {}", faces.len(), path.display());
        Ok(self.draw_faces_on(&img, faces))
    }

    /// Composite `faces` onto an RGBA copy of `image`.
    ///
    /// Each face gets a stroked box and its id underneath; later faces are drawn
    /// over earlier ones. Anything outside the canvas is clipped.
    pub fn draw_faces_on(&self, image: &DynamicImage, faces: &[Face]) -> DynamicImage {
        let mut canvas = image.to_rgba8();
        let color = self.style.rgba();
        for face in faces {
            let rect = face.rect.normalized();
            stroke_rect(&mut canvas, rect, self.style.stroke_width, color);
            self.draw_label(&mut canvas, rect, &face.id, color);
        }
        DynamicImage::ImageRgba8(canvas)
    }

    /// Left-aligned, baseline at `label_offset` px below the box. No wrapping.
    fn draw_label(&self, canvas: &mut RgbaImage, rect: Rect, text: &str, color: Rgba<u8>) {
        if text.is_empty() {
            return;
        }
        let scale = self.font.scale_for_points(self.style.font_size);
        let baseline = i64::from(rect.bottom()) + i64::from(self.style.label_offset);
        let x = i64::from(rect.x);
        let top = baseline - self.font.ascent(scale).round() as i64;

        // Labels may run off the edge, but one that cannot touch a single
        // pixel is skipped so glyph offsets stay within i32.
        let (text_w, _) = text_size(scale, self.font.font(), text);
        let slack = scale.x.max(scale.y).ceil() as i64;
        let (w, h) = (i64::from(canvas.width()), i64::from(canvas.height()));
        let reaches_x = x + i64::from(text_w) + slack > 0 && x - slack < w;
        let reaches_y = top + 2 * slack > 0 && top - slack < h;
        if !(reaches_x && reaches_y) {
            return;
        }

        draw_text_mut(
            canvas,
            color,
            x as i32,
            top as i32,
            scale,
            self.font.font(),
            text,
        );
    }

    /// Draw `faces` on `source` and write `<out_dir>/<stem>_annotated.jpg`,
    /// picking `<stem>_annotated_<n>.jpg` when the name is taken.
    ///
    /// The free name is found by checking the directory before writing, so two
    /// concurrent calls for the same stem can pick the same path and the later
    /// write wins.
    pub fn save_annotated(&self, source: &Path, faces: &[Face], out_dir: &Path) -> Result<PathBuf> {
        let annotated = self.draw_faces(source, faces)?;

        std::fs::create_dir_all(out_dir).map_err(|source| OverlayError::Io {
            path: out_dir.to_path_buf(),
            source,
        })?;
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("image");
        let mut out = out_dir.join(format!("{}_annotated.jpg", stem));
        let mut n = 0u32;
        while out.exists() {
            n += 1;
            out = out_dir.join(format!("{}_annotated_{}.jpg", stem, n));
        }

        codec::encode_jpeg(&out, &annotated)?;
        log::debug!("saved annotated image to {}", out.display());
        Ok(out)
    }
}

/// Stroke the outline of `rect` with a line `width` px thick centred on its edges.
fn stroke_rect(canvas: &mut RgbaImage, rect: Rect, width: u32, color: Rgba<u8>) {
    if width == 0 || canvas.width() == 0 || canvas.height() == 0 {
        return;
    }
    let bounds = Rect::new(
        0,
        0,
        i32::try_from(canvas.width()).unwrap_or(i32::MAX),
        i32::try_from(canvas.height()).unwrap_or(i32::MAX),
    );
    let w = i32::try_from(width).unwrap_or(i32::MAX);
    let left = rect.x.saturating_sub(w / 2);
    let top = rect.y.saturating_sub(w / 2);
    let span_x = rect.width.saturating_add(w);
    let span_y = rect.height.saturating_add(w);

    let bands = [
        Rect::new(left, top, span_x, w),
        Rect::new(left, rect.bottom().saturating_sub(w / 2), span_x, w),
        Rect::new(left, top, w, span_y),
        Rect::new(rect.right().saturating_sub(w / 2), top, w, span_y),
    ];
    for band in bands {
        if let Some(clip) = band.intersection(&bounds) {
            let r = imageproc::rect::Rect::at(clip.x, clip.y)
                .of_size(clip.width as u32, clip.height as u32);
            draw_filled_rect_mut(canvas, r, color);
        }
    }
}
