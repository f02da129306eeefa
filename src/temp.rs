//! Collision-resistant names for temporary artifacts.
//!
//! Files created under these names are never removed by this crate; sweeping the
//! temp directory is up to the caller.

use rand::rngs::OsRng;
use rand::RngCore;
use std::path::{Path, PathBuf};

use crate::config::Settings;

/// Builds `<dir>/<prefix><32 hex chars><suffix>` paths from 128 random bits.
#[derive(Debug, Clone)]
pub struct TempNamer<R = OsRng> {
    dir: PathBuf,
    rng: R,
}

impl TempNamer<OsRng> {
    /// Names under the OS temp directory, drawing from the operating system's CSPRNG.
    pub fn system() -> Self {
        Self::new(std::env::temp_dir(), OsRng)
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let dir = settings
            .temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        Self::new(dir, OsRng)
    }
}

impl<R: RngCore> TempNamer<R> {
    pub fn new(dir: impl Into<PathBuf>, rng: R) -> Self {
        Self {
            dir: dir.into(),
            rng,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Generate a fresh path. Nothing is created on disk.
    ///
    /// # Panics
    ///
    /// Panics if the random source fails. Falling back to weaker randomness would
    /// make names guessable, so there is no recovery path.
    pub fn new_temp_path(&mut self, prefix: &str, suffix: &str) -> PathBuf {
        let mut bytes = [0u8; 16];
        if let Err(e) = self.rng.try_fill_bytes(&mut bytes) {
            log::error!("entropy source failed while naming a temp file: {}", e);
            panic!("entropy source unavailable: {}", e);
        }
        let token = u128::from_be_bytes(bytes);
        self.dir.join(format!("{}{:032x}{}", prefix, token, suffix))
    }
}

/// One-off path under the OS temp directory.
pub fn new_temp_path(prefix: &str, suffix: &str) -> PathBuf {
    TempNamer::system().new_temp_path(prefix, suffix)
}
