//! Error type returned by the detector entry points.
//!
//! Only pipeline-level problems surface here: a parameter set that cannot be
//! used, or an input grid whose shape does not agree with the configured cell
//! size. Cells or regions that lack data are absorbed by the pipeline and
//! simply produce no output.

use thiserror::Error;

/// Errors raised before any frame is processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectorError {
    /// A parameter is outside its admissible range.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParams { field: &'static str, reason: String },
    /// The point buffer length does not match `width * height`.
    #[error("grid buffer holds {len} points, expected {width}x{height}")]
    GridShape {
        width: usize,
        height: usize,
        len: usize,
    },
    /// The grid dimensions are not whole multiples of the cell size.
    #[error("grid {width}x{height} is not divisible into {cell_width}x{cell_height} cells")]
    GridNotDivisible {
        width: usize,
        height: usize,
        cell_width: usize,
        cell_height: usize,
    },
    /// The grid holds no cell at all.
    #[error("grid {width}x{height} is empty")]
    GridTooSmall { width: usize, height: usize },
}

impl DetectorError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            field,
            reason: reason.into(),
        }
    }
}
