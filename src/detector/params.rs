//! Parameter types configuring the detector stages.
//!
//! One [`DetectorParams`] snapshot is validated when the detector is built and
//! then borrowed by every stage for the lifetime of the run. Distances are in
//! the unit of the input points (metres for depth maps backprojected with
//! metric depth); the MSE threshold is in squared units.
//!
//! Defaults target VGA-class depth sensors observing indoor scenes at 0.5–4 m.

use crate::error::DetectorError;
use serde::{Deserialize, Serialize};

/// Detector-wide parameters controlling the cell → region → primitive pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Cell width in pixels.
    pub cell_width: usize,
    /// Cell height in pixels.
    pub cell_height: usize,
    /// Minimum valid points for a cell fit to be trusted.
    pub min_points_per_cell: usize,
    /// Maximum mean squared orthogonal residual of a planar cell or region.
    pub planarity_mse_threshold: f64,
    /// Maximum angle (degrees) between normals when growing or merging.
    pub normal_angle_threshold_deg: f64,
    /// Maximum point-to-plane distance for pixel-level boundary refinement.
    pub refinement_distance: f64,
    /// Minimum number of cells a region needs to survive.
    pub min_region_cells: usize,
    /// Merge adjacent compatible regions after growth.
    pub merge_adjacent_regions: bool,
    /// Optional occlusion-boundary test applied inside each cell.
    pub depth_discontinuity: Option<DepthDiscontinuity>,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            cell_width: 20,
            cell_height: 20,
            min_points_per_cell: 200,
            planarity_mse_threshold: 1e-4,
            normal_angle_threshold_deg: 15.0,
            refinement_distance: 0.02,
            min_region_cells: 5,
            merge_adjacent_regions: true,
            depth_discontinuity: Some(DepthDiscontinuity::default()),
        }
    }
}

/// Depth jump test between neighbouring points of a cell.
///
/// A jump is counted when `|z_a - z_b| > alpha * min(z_a, z_b)`; a cell with
/// more than `max_count` jumps is treated as non-planar.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DepthDiscontinuity {
    pub alpha: f32,
    pub max_count: usize,
}

impl Default for DepthDiscontinuity {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            max_count: 1,
        }
    }
}

impl DetectorParams {
    /// Square cells of `size` pixels, keeping the remaining defaults.
    pub fn with_cell_size(mut self, size: usize) -> Self {
        self.cell_width = size;
        self.cell_height = size;
        self
    }

    pub fn cell_area(&self) -> usize {
        self.cell_width * self.cell_height
    }

    pub fn normal_angle_threshold_rad(&self) -> f64 {
        self.normal_angle_threshold_deg.to_radians()
    }

    /// Smallest inlier count a primitive may carry.
    pub fn min_primitive_points(&self) -> usize {
        self.min_region_cells * self.min_points_per_cell
    }

    /// Check every knob; called once before any frame is processed.
    pub fn validate(&self) -> Result<(), DetectorError> {
        if self.cell_width == 0 {
            return Err(DetectorError::invalid("cell_width", "must be positive"));
        }
        if self.cell_height == 0 {
            return Err(DetectorError::invalid("cell_height", "must be positive"));
        }
        if self.min_points_per_cell < 3 {
            return Err(DetectorError::invalid(
                "min_points_per_cell",
                "a plane fit needs at least 3 points",
            ));
        }
        if self.min_points_per_cell > self.cell_area() {
            return Err(DetectorError::invalid(
                "min_points_per_cell",
                format!(
                    "{} exceeds the {} pixels of a cell",
                    self.min_points_per_cell,
                    self.cell_area()
                ),
            ));
        }
        if !(self.planarity_mse_threshold.is_finite() && self.planarity_mse_threshold > 0.0) {
            return Err(DetectorError::invalid(
                "planarity_mse_threshold",
                "must be finite and positive",
            ));
        }
        if !(self.normal_angle_threshold_deg > 0.0 && self.normal_angle_threshold_deg <= 90.0) {
            return Err(DetectorError::invalid(
                "normal_angle_threshold_deg",
                "must lie in (0, 90]",
            ));
        }
        if !(self.refinement_distance.is_finite() && self.refinement_distance > 0.0) {
            return Err(DetectorError::invalid(
                "refinement_distance",
                "must be finite and positive",
            ));
        }
        if self.min_region_cells == 0 {
            return Err(DetectorError::invalid("min_region_cells", "must be at least 1"));
        }
        if let Some(disc) = &self.depth_discontinuity {
            if !(disc.alpha.is_finite() && disc.alpha > 0.0) {
                return Err(DetectorError::invalid(
                    "depth_discontinuity.alpha",
                    "must be finite and positive",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        DetectorParams::default().validate().unwrap();
    }

    #[test]
    fn zero_cell_size_fails_fast() {
        let params = DetectorParams::default().with_cell_size(0);
        let err = params.validate().unwrap_err();
        assert_eq!(
            err,
            DetectorError::InvalidParams {
                field: "cell_width",
                reason: "must be positive".to_string()
            }
        );
    }

    #[test]
    fn out_of_range_thresholds_are_rejected() {
        let cases: Vec<(DetectorParams, &str)> = vec![
            (
                DetectorParams {
                    normal_angle_threshold_deg: 120.0,
                    ..Default::default()
                },
                "normal_angle_threshold_deg",
            ),
            (
                DetectorParams {
                    planarity_mse_threshold: f64::NAN,
                    ..Default::default()
                },
                "planarity_mse_threshold",
            ),
            (
                DetectorParams {
                    min_points_per_cell: 500,
                    ..Default::default()
                },
                "min_points_per_cell",
            ),
            (
                DetectorParams {
                    refinement_distance: -1.0,
                    ..Default::default()
                },
                "refinement_distance",
            ),
            (
                DetectorParams {
                    min_region_cells: 0,
                    ..Default::default()
                },
                "min_region_cells",
            ),
        ];
        for (params, field) in cases {
            match params.validate() {
                Err(DetectorError::InvalidParams { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected {field} to be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let params: DetectorParams =
            serde_json::from_str(r#"{ "cell_width": 10, "cell_height": 8 }"#).unwrap();
        assert_eq!(params.cell_width, 10);
        assert_eq!(params.cell_height, 8);
        assert_eq!(params.min_region_cells, DetectorParams::default().min_region_cells);
    }
}
