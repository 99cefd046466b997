//! Bounded geometric primitives extracted from refined regions.
//!
//! [`Primitive`] is a closed set of tagged variants; [`Plane`] is the only one
//! produced today. Code downstream of the detector should go through the
//! [`Shape`] capabilities rather than match on the concrete variant.

pub mod contour;
pub mod extract;
pub mod plane;

pub use contour::trace_outer_contour;
pub use extract::{extract_primitives, ExtractionSummary};
pub use plane::Plane;

use crate::angle::angle_between;
use crate::mask::PixelMask;
use serde::Serialize;

/// Capabilities shared by every primitive kind.
pub trait Shape {
    /// Index of the primitive within its frame.
    fn id(&self) -> usize;
    /// Unit normal facing the sensor.
    fn normal(&self) -> [f32; 3];
    /// Offset `d` of the plane equation `n · p + d = 0`.
    fn offset(&self) -> f32;
    /// Outer boundary polygon in pixel-corner coordinates.
    fn boundary(&self) -> &[[f32; 2]];
    fn inlier_count(&self) -> usize;
    /// Pixels covered by the primitive.
    fn mask(&self) -> &PixelMask;

    /// Signed orthogonal distance of `p` to the primitive surface; positive on
    /// the sensor side.
    fn signed_distance(&self, p: &[f32; 3]) -> f32 {
        let n = self.normal();
        n[0] * p[0] + n[1] * p[1] + n[2] * p[2] + self.offset()
    }

    /// Intersection over union of the pixel masks.
    fn iou(&self, other: &dyn Shape) -> f64 {
        self.mask().iou(other.mask())
    }

    /// Same surface seen in two detections: masks overlap by at least
    /// `min_iou` and normals differ by less than `max_angle` radians.
    fn is_similar(&self, other: &dyn Shape, min_iou: f64, max_angle: f32) -> bool {
        self.iou(other) >= min_iou && angle_between(&self.normal(), &other.normal()) < max_angle
    }
}

/// Primitive detected in one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Primitive {
    Plane(Plane),
}

impl Primitive {
    pub fn as_plane(&self) -> Option<&Plane> {
        match self {
            Primitive::Plane(plane) => Some(plane),
        }
    }

    fn shape(&self) -> &dyn Shape {
        match self {
            Primitive::Plane(plane) => plane,
        }
    }
}

impl From<Plane> for Primitive {
    fn from(plane: Plane) -> Self {
        Primitive::Plane(plane)
    }
}

impl Shape for Primitive {
    fn id(&self) -> usize {
        self.shape().id()
    }
    fn normal(&self) -> [f32; 3] {
        self.shape().normal()
    }
    fn offset(&self) -> f32 {
        self.shape().offset()
    }
    fn boundary(&self) -> &[[f32; 2]] {
        self.shape().boundary()
    }
    fn inlier_count(&self) -> usize {
        self.shape().inlier_count()
    }
    fn mask(&self) -> &PixelMask {
        self.shape().mask()
    }
    fn signed_distance(&self, p: &[f32; 3]) -> f32 {
        self.shape().signed_distance(p)
    }
}
