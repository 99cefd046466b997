use crate::image::LabelMap;
use crate::primitives::Primitive;
use serde::Serialize;

/// Primitives detected in one depth frame.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub primitives: Vec<Primitive>,
    /// Per-pixel owner (0 = none, k = primitive `k - 1`).
    #[serde(skip)]
    pub labels: LabelMap,
    pub latency_ms: f64,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }
}
