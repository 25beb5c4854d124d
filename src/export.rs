use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use tracing::info;

use crate::model::IconRecord;

#[derive(Debug)]
pub enum ExportError {
    EmptyTarget,
    Decode {
        source: PathBuf,
        err: image::ImageError,
    },
    Write {
        target: PathBuf,
        err: image::ImageError,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTarget => f.write_str("choose a file to export to"),
            Self::Decode { source, err } => {
                write!(f, "failed to read icon {}: {err}", source.display())
            }
            Self::Write { target, err } => {
                write!(f, "failed to save the icon at {}: {err}", target.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyTarget => None,
            Self::Decode { err, .. } | Self::Write { err, .. } => Some(err),
        }
    }
}

pub fn pixel_data(icon: &IconRecord) -> Result<RgbaImage, ExportError> {
    image::open(icon.path())
        .map(|decoded| decoded.into_rgba8())
        .map_err(|err| ExportError::Decode {
            source: icon.path().to_path_buf(),
            err,
        })
}

pub fn default_export_path(icon: &IconRecord) -> PathBuf {
    PathBuf::from(format!("{}.png", icon.name()))
}

pub fn export_png(icon: &IconRecord, target: &Path) -> Result<PathBuf, ExportError> {
    if target.as_os_str().is_empty() {
        return Err(ExportError::EmptyTarget);
    }
    let pixels = pixel_data(icon)?;
    pixels
        .save_with_format(target, ImageFormat::Png)
        .map_err(|err| ExportError::Write {
            target: target.to_path_buf(),
            err,
        })?;
    info!(icon = %icon.name(), target = %target.display(), "icon exported");
    Ok(target.to_path_buf())
}
