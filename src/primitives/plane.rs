use super::Shape;
use crate::camera::Intrinsics;
use crate::cells::PlaneFit;
use crate::mask::PixelMask;
use serde::Serialize;

/// Bounded planar primitive.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plane {
    pub id: usize,
    /// Unit normal facing the sensor.
    pub normal: [f32; 3],
    /// `d` in `n · p + d = 0`; the distance of the plane from the sensor.
    pub offset: f32,
    pub centroid: [f32; 3],
    /// Mean squared residual of the final fit.
    pub mse: f32,
    /// Valid mask points within `refinement_distance` of the final fit.
    pub inlier_count: usize,
    /// Outer contour in pixel-corner coordinates, clockwise on screen.
    pub boundary: Vec<[f32; 2]>,
    /// Boundary vertices lifted onto the plane, when intrinsics are known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary_3d: Option<Vec<[f32; 3]>>,
    #[serde(skip)]
    pub mask: PixelMask,
}

impl Plane {
    pub(crate) fn from_fit(
        id: usize,
        fit: &PlaneFit,
        inlier_count: usize,
        mask: PixelMask,
        boundary: Vec<[f32; 2]>,
    ) -> Self {
        let n = fit.normal;
        let c = fit.centroid;
        Self {
            id,
            normal: [n.x as f32, n.y as f32, n.z as f32],
            offset: fit.offset() as f32,
            centroid: [c.x as f32, c.y as f32, c.z as f32],
            mse: fit.mse as f32,
            inlier_count,
            boundary,
            boundary_3d: None,
            mask,
        }
    }

    /// Lift the boundary onto the plane by intersecting each corner's viewing
    /// ray with it. Fails when any ray is parallel to the plane or meets it
    /// behind the sensor.
    pub fn lift_boundary(&self, k: &Intrinsics) -> Option<Vec<[f32; 3]>> {
        self.boundary
            .iter()
            .map(|&[u, v]| {
                // Corner (u, v) sits half a pixel before the centre of pixel (u, v).
                let r = k.ray(u - 0.5, v - 0.5);
                let denom = self.normal[0] * r[0] + self.normal[1] * r[1] + self.normal[2] * r[2];
                if denom.abs() < 1e-6 {
                    return None;
                }
                let t = -self.offset / denom;
                (t > 0.0).then(|| [r[0] * t, r[1] * t, r[2] * t])
            })
            .collect()
    }
}

impl Shape for Plane {
    fn id(&self) -> usize {
        self.id
    }
    fn normal(&self) -> [f32; 3] {
        self.normal
    }
    fn offset(&self) -> f32 {
        self.offset
    }
    fn boundary(&self) -> &[[f32; 2]] {
        &self.boundary
    }
    fn inlier_count(&self) -> usize {
        self.inlier_count
    }
    fn mask(&self) -> &PixelMask {
        &self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifted_corners_lie_on_the_plane() {
        let plane = Plane {
            id: 0,
            normal: [0.0, 0.6, -0.8],
            offset: 1.6,
            centroid: [0.0, 0.0, 2.0],
            mse: 0.0,
            inlier_count: 0,
            boundary: vec![[0.0, 0.0], [10.0, 0.0], [10.0, 8.0], [0.0, 8.0]],
            boundary_3d: None,
            mask: PixelMask::empty(),
        };
        let k = Intrinsics::centered(100.0, 10, 8);
        let lifted = plane.lift_boundary(&k).expect("all rays hit the plane");
        assert_eq!(lifted.len(), 4);
        for p in &lifted {
            assert!(plane.signed_distance(p).abs() < 1e-5, "{p:?}");
            assert!(p[2] > 0.0);
        }
        // Corner (0, 0) maps to pixel position (-0.5, -0.5), left of the axis.
        assert!(lifted[0][0] < 0.0 && lifted[1][0] > 0.0);
    }

    #[test]
    fn plane_behind_sensor_cannot_be_lifted() {
        let plane = Plane {
            id: 0,
            normal: [0.0, 0.0, -1.0],
            offset: -2.0,
            centroid: [0.0, 0.0, -2.0],
            mse: 0.0,
            inlier_count: 0,
            boundary: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]],
            boundary_3d: None,
            mask: PixelMask::empty(),
        };
        assert!(plane.lift_boundary(&Intrinsics::centered(100.0, 4, 4)).is_none());
    }
}
