//! Pinhole intrinsics used to backproject depth maps and lift image-space
//! polygons onto fitted planes.

use serde::{Deserialize, Serialize};

/// Pinhole camera intrinsics in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Intrinsics {
    pub fx: f32,
    pub fy: f32,
    pub cx: f32,
    pub cy: f32,
}

impl Intrinsics {
    pub fn new(fx: f32, fy: f32, cx: f32, cy: f32) -> Self {
        Self { fx, fy, cx, cy }
    }

    /// Intrinsics with the principal point at the image centre.
    pub fn centered(focal: f32, width: usize, height: usize) -> Self {
        Self {
            fx: focal,
            fy: focal,
            cx: (width as f32 - 1.0) * 0.5,
            cy: (height as f32 - 1.0) * 0.5,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.fx.is_finite()
            && self.fy.is_finite()
            && self.cx.is_finite()
            && self.cy.is_finite()
            && self.fx.abs() > f32::EPSILON
            && self.fy.abs() > f32::EPSILON
    }

    /// Camera-frame point for pixel `(u, v)` observed at depth `z`.
    #[inline]
    pub fn backproject(&self, u: f32, v: f32, z: f32) -> [f32; 3] {
        [(u - self.cx) * z / self.fx, (v - self.cy) * z / self.fy, z]
    }

    /// Viewing ray through `(u, v)` scaled so that its z component is 1.
    #[inline]
    pub fn ray(&self, u: f32, v: f32) -> [f32; 3] {
        [(u - self.cx) / self.fx, (v - self.cy) / self.fy, 1.0]
    }
}
