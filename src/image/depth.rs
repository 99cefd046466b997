//! Organized 3D point grid produced from a depth frame.
//!
//! Points are stored row-major in the camera frame (+z forward). A point is
//! valid when all coordinates are finite and its depth is positive; missing
//! depth is encoded with [`INVALID_POINT`].

use super::traits::ImageView;
use crate::camera::Intrinsics;
use crate::error::DetectorError;

/// Marker stored for pixels without a depth measurement.
pub const INVALID_POINT: [f32; 3] = [f32::NAN; 3];

/// Returns true when `p` carries a usable measurement.
#[inline]
pub fn is_valid_point(p: &[f32; 3]) -> bool {
    p[0].is_finite() && p[1].is_finite() && p[2].is_finite() && p[2] > 0.0
}

#[derive(Clone, Debug, PartialEq)]
pub struct DepthGrid {
    /// Grid width in pixels
    pub w: usize,
    /// Grid height in pixels
    pub h: usize,
    /// Camera-frame points in row-major order
    pub data: Vec<[f32; 3]>,
    /// Intrinsics used to build the grid, when known
    pub intrinsics: Option<Intrinsics>,
}

impl DepthGrid {
    /// Grid of `w × h` missing points.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![INVALID_POINT; w * h],
            intrinsics: None,
        }
    }

    /// Wrap an existing row-major point buffer.
    ///
    /// Points must be expressed in the sensor frame with depth along +z:
    /// any point with `z <= 0` counts as missing, and normals are oriented
    /// toward the origin.
    pub fn from_points(w: usize, h: usize, data: Vec<[f32; 3]>) -> Result<Self, DetectorError> {
        if data.len() != w * h {
            return Err(DetectorError::GridShape {
                width: w,
                height: h,
                len: data.len(),
            });
        }
        Ok(Self {
            w,
            h,
            data,
            intrinsics: None,
        })
    }

    /// Backproject a metric depth map through `k`. Depth values that are not
    /// finite or not positive become [`INVALID_POINT`].
    pub fn from_depth_map(
        w: usize,
        h: usize,
        depth: &[f32],
        k: &Intrinsics,
    ) -> Result<Self, DetectorError> {
        if depth.len() != w * h {
            return Err(DetectorError::GridShape {
                width: w,
                height: h,
                len: depth.len(),
            });
        }
        if !k.is_valid() {
            return Err(DetectorError::invalid(
                "intrinsics",
                format!("unusable camera model {k:?}"),
            ));
        }
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                let z = depth[y * w + x];
                if z.is_finite() && z > 0.0 {
                    data.push(k.backproject(x as f32, y as f32, z));
                } else {
                    data.push(INVALID_POINT);
                }
            }
        }
        Ok(Self {
            w,
            h,
            data,
            intrinsics: Some(*k),
        })
    }

    pub fn with_intrinsics(mut self, k: Intrinsics) -> Self {
        self.intrinsics = Some(k);
        self
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [f32; 3] {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, p: [f32; 3]) {
        let i = self.idx(x, y);
        self.data[i] = p;
    }

    #[inline]
    pub fn is_valid(&self, x: usize, y: usize) -> bool {
        is_valid_point(&self.data[self.idx(x, y)])
    }

    pub fn valid_count(&self) -> usize {
        self.data.iter().filter(|p| is_valid_point(p)).count()
    }
}

impl ImageView for DepthGrid {
    type Pixel = [f32; 3];

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[[f32; 3]] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_map_marks_missing_depth_invalid() {
        let k = Intrinsics::centered(100.0, 3, 2);
        let depth = [1.0, 0.0, f32::NAN, 2.0, -1.0, 1.5];
        let grid = DepthGrid::from_depth_map(3, 2, &depth, &k).unwrap();
        let valid: Vec<bool> = (0..6).map(|i| is_valid_point(&grid.data[i])).collect();
        assert_eq!(valid, vec![true, false, false, true, false, true]);
        assert_eq!(grid.valid_count(), 3);
        assert_eq!(grid.get(2, 1)[2], 1.5);
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let err = DepthGrid::from_points(4, 4, vec![[0.0, 0.0, 1.0]; 15]).unwrap_err();
        assert!(matches!(err, DetectorError::GridShape { len: 15, .. }));
    }

    #[test]
    fn points_behind_the_sensor_are_missing() {
        let data = vec![
            [0.1, 0.0, 1.0],
            [0.1, 0.0, -1.0],
            [0.0, 0.0, 0.0],
            INVALID_POINT,
        ];
        let grid = DepthGrid::from_points(2, 2, data).unwrap();
        assert!(grid.is_valid(0, 0));
        assert!(!grid.is_valid(1, 0));
        assert!(!grid.is_valid(0, 1));
        assert!(!grid.is_valid(1, 1));
        assert_eq!(grid.valid_count(), 1);
    }

    #[test]
    fn rows_iterate_in_order() {
        let mut grid = DepthGrid::new(2, 3);
        grid.set(1, 2, [0.0, 0.0, 4.0]);
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2][1], [0.0, 0.0, 4.0]);
        assert!(!is_valid_point(&rows[0][0]));
    }
}
