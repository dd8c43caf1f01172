use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use image::ImageResult;

use crate::scoring::TargetCharacter;
use crate::surface::RasterSurface;

/// `aksara-<glyph>-<unix millis>.png`
pub fn export_file_name(target: &TargetCharacter, at: DateTime<Local>) -> String {
    let glyph: String = target
        .as_str()
        .chars()
        .map(|c| if std::path::is_separator(c) { '_' } else { c })
        .collect();
    format!("aksara-{}-{}.png", glyph, at.timestamp_millis())
}

/// Writes the surface as a PNG into `dir` and returns the file path
pub fn save_drawing(
    surface: &RasterSurface,
    target: &TargetCharacter,
    dir: &Path,
) -> ImageResult<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(target, Local::now()));
    surface.image().save(&path)?;
    log::info!("saved drawing of {} to {}", target, path.display());
    Ok(path)
}
