//! Image payloads
//!
//! Wrapping a buffer in [`Image`] makes it loggable. When the record level
//! reaches the logger's [`log_image`](NamedLogger::log_image) threshold the
//! image is written as PNG to
//!
//! ```text
//! <logger path>/<run subfolder>/<logger name>/<level code>/<n>.png
//! ```
//!
//! and the message shows `Image(WxH){<file>}`. Below the threshold it shows
//! `Image{save disabled}`; a failed write shows `Image{can't save}`.

use crate::core::{LogLevel, LoggerError, Result};
use crate::handle::NamedLogger;
use crate::hook::{Argument, Processed};
use image::{DynamicImage, GenericImageView, GrayImage, ImageFormat, RgbImage, RgbaImage};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const SAVE_DISABLED: &str = "Image{save disabled}";
pub const SAVE_FAILED: &str = "Image{can't save}";

/// Directory used for the default logger, whose name is empty
const DEFAULT_DIR_NAME: &str = "default";

static RUN_SUBFOLDER: RwLock<Option<String>> = parking_lot::const_rwlock(None);

/// Dump numbers keyed by logger name, so a name never reuses a file even
/// when its handle is recreated
static IMAGE_COUNTERS: Mutex<BTreeMap<String, usize>> = parking_lot::const_mutex(BTreeMap::new());

fn next_image_index(name: &str) -> usize {
    let mut counters = IMAGE_COUNTERS.lock();
    let counter = counters.entry(name.to_string()).or_insert(0);
    let index = *counter;
    *counter += 1;
    index
}

/// Insert a per-run folder between every logger's path and its name
pub fn set_run_subfolder(folder: Option<String>) {
    *RUN_SUBFOLDER.write() = folder;
}

pub fn run_subfolder() -> Option<String> {
    RUN_SUBFOLDER.read().clone()
}

/// Directory receiving images logged at `level` on `logger`
pub fn dump_dir(logger: &NamedLogger, level: LogLevel) -> PathBuf {
    let mut dir = logger.path();
    if let Some(folder) = run_subfolder() {
        dir.push(folder);
    }
    if logger.name().is_empty() {
        dir.push(DEFAULT_DIR_NAME);
    } else {
        dir.push(logger.name());
    }
    dir.push(level.short_code());
    dir
}

#[derive(Debug, Clone)]
pub struct Image {
    inner: DynamicImage,
}

impl Image {
    pub fn new(inner: DynamicImage) -> Self {
        Self { inner }
    }

    pub fn width(&self) -> u32 {
        self.inner.dimensions().0
    }

    pub fn height(&self) -> u32 {
        self.inner.dimensions().1
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.inner
    }

    pub fn into_inner(self) -> DynamicImage {
        self.inner
    }

    fn save(&self, logger: &NamedLogger, level: LogLevel) -> Result<PathBuf> {
        let index = next_image_index(logger.name());
        let dir = dump_dir(logger, level);
        std::fs::create_dir_all(&dir).map_err(|e| {
            LoggerError::io_operation("creating image directory", dir.display().to_string(), e)
        })?;

        let file = dir.join(format!("{}.png", index));
        self.inner
            .save_with_format(&file, ImageFormat::Png)
            .map_err(|source| LoggerError::ImageEncode {
                path: file.display().to_string(),
                source,
            })?;
        Ok(file)
    }
}

impl From<DynamicImage> for Image {
    fn from(inner: DynamicImage) -> Self {
        Self::new(inner)
    }
}

impl From<RgbImage> for Image {
    fn from(buffer: RgbImage) -> Self {
        Self::new(DynamicImage::ImageRgb8(buffer))
    }
}

impl From<RgbaImage> for Image {
    fn from(buffer: RgbaImage) -> Self {
        Self::new(DynamicImage::ImageRgba8(buffer))
    }
}

impl From<GrayImage> for Image {
    fn from(buffer: GrayImage) -> Self {
        Self::new(DynamicImage::ImageLuma8(buffer))
    }
}

impl Argument for Image {
    fn preprocess<'a>(&'a self, logger: &NamedLogger, level: LogLevel) -> Processed<'a> {
        let threshold = logger.log_image();
        if threshold == LogLevel::Off || level < threshold {
            return Processed::Owned(SAVE_DISABLED.to_string());
        }

        match self.save(logger, level) {
            Ok(file) => Processed::Owned(format!(
                "Image({}x{}){{{}}}",
                self.width(),
                self.height(),
                file.display()
            )),
            Err(e) => {
                eprintln!(
                    "[LOGGER ERROR] Failed to dump image for logger '{}': {}",
                    logger.name(),
                    e
                );
                Processed::Owned(SAVE_FAILED.to_string())
            }
        }
    }
}
