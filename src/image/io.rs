//! I/O helpers for depth frames, label maps and JSON.
//!
//! - `load_depth_png`: read a 16-bit (or 8-bit) single-channel PNG and scale raw
//!   values into metric depth.
//! - `save_label_png`: write a [`LabelMap`] as an 8-bit grayscale PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageView, LabelMap};
use image::{DynamicImage, GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Metric depth map loaded from disk, row-major, `0.0` where depth is missing.
#[derive(Clone, Debug)]
pub struct DepthMap {
    pub width: usize,
    pub height: usize,
    pub depth: Vec<f32>,
}

/// Load a single-channel depth PNG. Raw values are multiplied by `depth_scale`
/// (e.g. `0.001` for millimetre encodings); raw zero means missing depth.
pub fn load_depth_png(path: &Path, depth_scale: f32) -> Result<DepthMap, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let width = img.width() as usize;
    let height = img.height() as usize;
    let depth: Vec<f32> = match img {
        DynamicImage::ImageLuma16(buf) => buf
            .into_raw()
            .into_iter()
            .map(|raw| raw as f32 * depth_scale)
            .collect(),
        DynamicImage::ImageLuma8(buf) => buf
            .into_raw()
            .into_iter()
            .map(|raw| raw as f32 * depth_scale)
            .collect(),
        other => {
            return Err(format!(
                "{} is not a single-channel depth image ({:?})",
                path.display(),
                other.color()
            ))
        }
    };
    Ok(DepthMap {
        width,
        height,
        depth,
    })
}

/// Save labels as grayscale, spreading label ids over the 8-bit range so that
/// neighbouring primitives stay distinguishable.
pub fn save_label_png(labels: &LabelMap, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let max_label = labels.data.iter().copied().max().unwrap_or(0).max(1);
    let step = (255 / max_label).max(1);
    let mut out = GrayImage::new(labels.w as u32, labels.h as u32);
    for (y, row) in labels.rows().enumerate() {
        for (x, &label) in row.iter().enumerate() {
            let v = (label.saturating_mul(step)).min(255) as u8;
            out.put_pixel(x as u32, y as u32, Luma([v]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
