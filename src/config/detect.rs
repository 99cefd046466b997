use crate::camera::Intrinsics;
use crate::DetectorParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Full detection report (result + trace) as pretty JSON.
    pub json_out: Option<PathBuf>,
    /// Label map as an 8-bit PNG.
    pub label_image: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    /// Single-channel 8/16-bit depth PNG.
    pub input_path: PathBuf,
    /// Metres per raw depth unit.
    #[serde(default = "default_depth_scale")]
    pub depth_scale: f32,
    pub intrinsics: Intrinsics,
    #[serde(default)]
    pub params: DetectorParams,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_depth_scale() -> f32 {
    0.001
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<RuntimeConfig, String> {
    let config: RuntimeConfig = serde_json::from_str(contents).map_err(|e| e.to_string())?;
    if !config.intrinsics.is_valid() {
        return Err(format!("unusable intrinsics {:?}", config.intrinsics));
    }
    if !(config.depth_scale.is_finite() && config.depth_scale > 0.0) {
        return Err(format!("depth_scale must be positive, got {}", config.depth_scale));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let cfg = parse_config(
            r#"{
                "input_path": "frame.png",
                "intrinsics": { "fx": 525.0, "fy": 525.0, "cx": 319.5, "cy": 239.5 },
                "params": { "cell_width": 16, "cell_height": 16 }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.depth_scale, 0.001);
        assert_eq!(cfg.params.cell_width, 16);
        assert_eq!(cfg.params.min_region_cells, DetectorParams::default().min_region_cells);
        assert!(cfg.output.json_out.is_none());
    }

    #[test]
    fn rejects_zero_focal_length() {
        let err = parse_config(
            r#"{ "input_path": "f.png", "intrinsics": { "fx": 0.0, "fy": 1.0, "cx": 0.0, "cy": 0.0 } }"#,
        )
        .unwrap_err();
        assert!(err.contains("intrinsics"), "{err}");
    }
}
