//! Summed point statistics and the plane fit derived from them.
//!
//! [`PlaneStats`] keeps `n`, `Σp` and the upper triangle of `Σp·pᵀ` in double
//! precision. Merging two sets is plain addition, so the fitted plane of a
//! union never depends on the order in which cells were absorbed.

use nalgebra::{Matrix3, SymmetricEigen, Vector3};
use serde::Serialize;
use std::ops::{Add, AddAssign};

/// Relative eigenvalue size below which the point set is considered collinear
/// (middle vs largest) or coincident (largest vs raw second moment).
const RANK_EPS: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PlaneStats {
    pub count: usize,
    pub sum: [f64; 3],
    /// xx, xy, xz, yy, yz, zz
    pub sum_sq: [f64; 6],
}

impl PlaneStats {
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a [f32; 3]>,
    {
        let mut stats = Self::default();
        for p in points {
            stats.push(p);
        }
        stats
    }

    #[inline]
    pub fn push(&mut self, p: &[f32; 3]) {
        let x = p[0] as f64;
        let y = p[1] as f64;
        let z = p[2] as f64;
        self.count += 1;
        self.sum[0] += x;
        self.sum[1] += y;
        self.sum[2] += z;
        self.sum_sq[0] += x * x;
        self.sum_sq[1] += x * y;
        self.sum_sq[2] += x * z;
        self.sum_sq[3] += y * y;
        self.sum_sq[4] += y * z;
        self.sum_sq[5] += z * z;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn centroid(&self) -> Option<Vector3<f64>> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as f64;
        Some(Vector3::new(self.sum[0] / n, self.sum[1] / n, self.sum[2] / n))
    }

    /// Scatter matrix `Σ(p - c)(p - c)ᵀ` about the centroid.
    pub fn scatter(&self) -> Matrix3<f64> {
        let Some(c) = self.centroid() else {
            return Matrix3::zeros();
        };
        let n = self.count as f64;
        let s = &self.sum_sq;
        let raw = Matrix3::new(s[0], s[1], s[2], s[1], s[3], s[4], s[2], s[4], s[5]);
        raw - c * c.transpose() * n
    }

    /// Least-squares plane through the accumulated points.
    ///
    /// Returns `None` for fewer than three points or a rank-deficient
    /// (collinear or coincident) configuration.
    pub fn fit(&self) -> Option<PlaneFit> {
        if self.count < 3 {
            return None;
        }
        let centroid = self.centroid()?;
        let eig = SymmetricEigen::new(self.scatter());
        let mut order = [0usize, 1, 2];
        order.sort_by(|&a, &b| eig.eigenvalues[a].total_cmp(&eig.eigenvalues[b]));
        let (l_min, l_mid, l_max) = (
            eig.eigenvalues[order[0]],
            eig.eigenvalues[order[1]],
            eig.eigenvalues[order[2]],
        );
        let energy = self.sum_sq[0] + self.sum_sq[3] + self.sum_sq[5];
        if !l_max.is_finite() || l_max <= RANK_EPS * energy || l_mid <= RANK_EPS * l_max {
            return None;
        }
        let mut normal: Vector3<f64> = eig.eigenvectors.column(order[0]).into_owned();
        let norm = normal.norm();
        if !norm.is_finite() || norm < 1e-12 {
            return None;
        }
        normal /= norm;
        // Face the sensor at the origin.
        if normal.dot(&centroid) > 0.0 {
            normal = -normal;
        }
        let mse = l_min.max(0.0) / self.count as f64;
        Some(PlaneFit {
            centroid,
            normal,
            mse,
        })
    }
}

impl AddAssign<&PlaneStats> for PlaneStats {
    fn add_assign(&mut self, other: &PlaneStats) {
        self.count += other.count;
        for i in 0..3 {
            self.sum[i] += other.sum[i];
        }
        for i in 0..6 {
            self.sum_sq[i] += other.sum_sq[i];
        }
    }
}

impl Add for PlaneStats {
    type Output = PlaneStats;

    fn add(mut self, other: PlaneStats) -> PlaneStats {
        self += &other;
        self
    }
}

/// Plane fitted to a point set: `normal · p + offset = 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlaneFit {
    pub centroid: Vector3<f64>,
    /// Unit normal oriented towards the sensor.
    pub normal: Vector3<f64>,
    /// Mean squared orthogonal residual.
    pub mse: f64,
}

impl PlaneFit {
    /// Plane offset `d` such that `n · p + d = 0`.
    #[inline]
    pub fn offset(&self) -> f64 {
        -self.normal.dot(&self.centroid)
    }

    #[inline]
    pub fn signed_distance(&self, p: &[f32; 3]) -> f64 {
        self.normal.x * p[0] as f64 + self.normal.y * p[1] as f64 + self.normal.z * p[2] as f64
            + self.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::normal_angle;

    fn tilted_plane_points(nx: usize, ny: usize) -> Vec<[f32; 3]> {
        let mut pts = Vec::new();
        for j in 0..ny {
            for i in 0..nx {
                let x = i as f32 * 0.01 - 0.2;
                let y = j as f32 * 0.01 - 0.1;
                // small deterministic wobble so the fit has a residual
                let wobble = ((i * 7 + j * 13) % 5) as f32 * 1e-3;
                pts.push([x, y, 2.0 + 0.3 * x - 0.2 * y + wobble]);
            }
        }
        pts
    }

    #[test]
    fn flat_points_fit_exactly() {
        let pts: Vec<[f32; 3]> = (0..100)
            .map(|i| [(i % 10) as f32 * 0.1, (i / 10) as f32 * 0.1, 1.5])
            .collect();
        let fit = PlaneStats::from_points(&pts).fit().expect("planar fit");
        assert!(fit.mse < 1e-12, "mse={}", fit.mse);
        assert!((fit.normal.z + 1.0).abs() < 1e-9, "normal={:?}", fit.normal);
        assert!((fit.offset() - 1.5).abs() < 1e-6);
        assert!(fit.signed_distance(&[0.3, 0.2, 1.6]) < 0.0);
    }

    #[test]
    fn merging_partitions_matches_joint_fit() {
        let pts = tilted_plane_points(40, 30);
        let joint = PlaneStats::from_points(&pts).fit().unwrap();
        for split in [1usize, 17, 600, 1199] {
            let a = PlaneStats::from_points(&pts[..split]);
            let b = PlaneStats::from_points(&pts[split..]);
            let ab = (a + b).fit().unwrap();
            let ba = (b + a).fit().unwrap();
            for fit in [ab, ba] {
                assert!((fit.centroid - joint.centroid).norm() < 1e-9);
                assert!(normal_angle(&fit.normal, &joint.normal) < 1e-6);
                assert!((fit.mse - joint.mse).abs() < 1e-10, "{} vs {}", fit.mse, joint.mse);
            }
        }
    }

    #[test]
    fn degenerate_sets_have_no_fit() {
        assert!(PlaneStats::default().fit().is_none());
        let two = [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0]];
        assert!(PlaneStats::from_points(&two).fit().is_none());
        let line: Vec<[f32; 3]> = (0..20).map(|i| [i as f32 * 0.1, 0.0, 2.0]).collect();
        assert!(PlaneStats::from_points(&line).fit().is_none());
        let same = [[0.5, 0.5, 1.0]; 10];
        assert!(PlaneStats::from_points(&same).fit().is_none());
    }

    #[test]
    fn normal_faces_the_sensor() {
        let pts = tilted_plane_points(10, 10);
        let fit = PlaneStats::from_points(&pts).fit().unwrap();
        assert!(fit.normal.dot(&fit.centroid) < 0.0);
        assert!(fit.offset() > 0.0);
    }
}
