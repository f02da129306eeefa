//! Prepare photos for a face recognizer and draw its results back onto them.
//!
//! ```no_run
//! use face_overlay::{Annotator, OverlayStyle, Preparer};
//! use std::path::Path;
//!
//! let photo = Path::new("group.jpg");
//! let gray = Preparer::system().prepare_grayscale(photo, "req-17_")?;
//! // hand `gray` to the recognizer, get faces back
//! let faces = face_overlay::face::load_faces(Path::new("faces.json"))?;
//! let annotated = Annotator::with_bundled_font(OverlayStyle::default())?
//!     .draw_faces(photo, &faces)?;
//! face_overlay::codec::encode_jpeg(Path::new("group_annotated.jpg"), &annotated)?;
//! # Ok::<(), face_overlay::OverlayError>(())
//! ```

pub mod annotate;
pub mod codec;
pub mod config;
mod error;
pub mod face;
pub mod font;
pub mod gray;
pub mod logger;
pub mod prepare;
pub mod temp;

pub use annotate::Annotator;
pub use config::{OverlayStyle, Settings};
pub use error::{OverlayError, Result};
pub use face::{Face, Rect};
pub use font::LabelFont;
pub use prepare::Preparer;
pub use temp::TempNamer;

use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Grayscale JPEG of `path` under the OS temp dir, named after `request_id`.
pub fn prepare_grayscale(path: &Path, request_id: &str) -> Result<PathBuf> {
    Preparer::system().prepare_grayscale(path, request_id)
}

/// `faces` drawn on the image at `path` in the default style.
pub fn draw_faces(path: &Path, faces: &[Face]) -> Result<DynamicImage> {
    Annotator::with_bundled_font(OverlayStyle::default())?.draw_faces(path, faces)
}
