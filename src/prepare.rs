//! Turn a source photo into the grayscale JPEG the recognizer reads.

use crate::codec;
use crate::config::Settings;
use crate::error::Result;
use crate::gray;
use crate::temp::TempNamer;
use image::DynamicImage;
use rand::rngs::OsRng;
use rand::RngCore;
use std::path::{Path, PathBuf};

pub const TEMP_SUFFIX: &str = ".jpeg";

#[derive(Debug, Clone)]
pub struct Preparer<R = OsRng> {
    namer: TempNamer<R>,
}

impl Preparer<OsRng> {
    pub fn system() -> Self {
        Self::new(TempNamer::system())
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(TempNamer::from_settings(settings))
    }
}

impl<R: RngCore> Preparer<R> {
    pub fn new(namer: TempNamer<R>) -> Self {
        Self { namer }
    }

    /// Decode `path`, convert it to grayscale and write it as a JPEG to a fresh
    /// temp path prefixed with `request_id`. Returns that path.
    ///
    /// The temp file is left in place for the recognizer; removing it afterwards is
    /// the caller's job.
    pub fn prepare_grayscale(&mut self, path: &Path, request_id: &str) -> Result<PathBuf> {
        let img = codec::decode(path)?;
        let out = self.prepare_image(&img, request_id)?;
        log::debug!(
            "prepared {} for request {} at {}",
            path.display(),
            request_id,
            out.display()
        );
        Ok(out)
    }

    /// Same as [`prepare_grayscale`](Self::prepare_grayscale) for an image already in memory.
    pub fn prepare_image(&mut self, image: &DynamicImage, request_id: &str) -> Result<PathBuf> {
        let gray = gray::grayscale(image);
        let out = self.namer.new_temp_path(request_id, TEMP_SUFFIX);
        codec::encode_jpeg(&out, &gray)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OverlayError;
    use image::{Rgb, RgbImage};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn writes_grayscale_jpeg_into_namer_dir() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("photo.png");
        DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 20, Rgb([200, 40, 40])))
            .save(&src)
            .unwrap();

        let mut prep = Preparer::new(TempNamer::new(dir.path(), StdRng::seed_from_u64(1)));
        let out = prep.prepare_grayscale(&src, "req7_").unwrap();

        assert_eq!(out.parent().unwrap(), dir.path());
        let name = out.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("req7_") && name.ends_with(".jpeg"), "{}", name);

        let back = codec::decode(&out).unwrap();
        assert_eq!((back.width(), back.height()), (30, 20));
        assert!(!back.color().has_color());
    }

    #[test]
    fn two_calls_get_two_files() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("photo.png");
        DynamicImage::ImageRgb8(RgbImage::new(4, 4)).save(&src).unwrap();

        let mut prep = Preparer::new(TempNamer::new(dir.path(), OsRng));
        let a = prep.prepare_grayscale(&src, "r").unwrap();
        let b = prep.prepare_grayscale(&src, "r").unwrap();
        assert_ne!(a, b);
        assert!(a.exists() && b.exists());
    }

    #[test]
    fn decode_errors_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut prep = Preparer::new(TempNamer::new(dir.path(), OsRng));
        let err = prep
            .prepare_grayscale(&dir.path().join("missing.jpg"), "r")
            .unwrap_err();
        assert!(matches!(err, OverlayError::NotFound { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn encode_errors_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("photo.png");
        DynamicImage::ImageRgb8(RgbImage::new(4, 4)).save(&src).unwrap();

        let mut prep = Preparer::new(TempNamer::new(dir.path().join("gone"), OsRng));
        let err = prep.prepare_grayscale(&src, "r").unwrap_err();
        assert!(matches!(err, OverlayError::Io { .. }));
    }
}
