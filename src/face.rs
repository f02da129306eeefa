//! Detection records handed over by the face recognizer.

use crate::error::{OverlayError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Axis-aligned box in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Same box with non-negative width and height.
    pub fn normalized(&self) -> Rect {
        let (x0, x1) = (self.x.min(self.right()), self.x.max(self.right()));
        let (y0, y1) = (self.y.min(self.bottom()), self.y.max(self.bottom()));
        Rect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Rect::new(
            x,
            y,
            right.saturating_sub(x),
            bottom.saturating_sub(y),
        ))
    }
}

/// A recognised face: who it is and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    pub id: String,
    #[serde(alias = "rectangle")]
    pub rect: Rect,
}

impl Face {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// Parse a JSON array of faces, keeping detector order.
pub fn parse_faces(json: &str) -> std::result::Result<Vec<Face>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Read the detector's JSON output from `path`.
pub fn load_faces(path: &Path) -> Result<Vec<Face>> {
    let text = std::fs::read_to_string(path).map_err(|e| OverlayError::from_io(path, e))?;
    let faces = parse_faces(&text).map_err(|source| OverlayError::Config {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("loaded {} faces from {}", faces.len(), path.display());
    Ok(faces)
}
