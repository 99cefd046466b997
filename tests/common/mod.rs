#![allow(dead_code)]

pub mod synthetic_depth;

use primitive_detector::DetectorParams;

/// Installs the test logger once per binary.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parameters sized for the 160×120 synthetic frames: 10 px cells.
pub fn test_params() -> DetectorParams {
    DetectorParams {
        min_points_per_cell: 80,
        min_region_cells: 4,
        ..DetectorParams::default().with_cell_size(10)
    }
}
