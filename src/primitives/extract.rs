//! Conversion of refined regions into bounded plane primitives.
//!
//! Each region mask is split into 4-connected components; each component is
//! refitted from its valid pixels and emitted as one [`Plane`] when at least
//! `min_region_cells × min_points_per_cell` of those points lie within
//! `refinement_distance` of the refitted plane. Primitive ids follow emission
//! order and double as label-map entries (`id + 1`).

use super::contour::{polygon_area, trace_outer_contour};
use super::{Plane, Primitive};
use crate::cells::PlaneStats;
use crate::detector::DetectorParams;
use crate::image::{DepthGrid, LabelMap};
use crate::regions::RefinedRegion;
use log::debug;
use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionSummary {
    /// Connected mask components examined.
    pub components: usize,
    pub emitted: usize,
    /// Components dropped for carrying too few valid points.
    pub too_small: usize,
    /// Components whose refit was degenerate.
    pub degenerate: usize,
    /// Components with too few points close to their refitted plane.
    pub unsupported: usize,
}

/// Emit one primitive per sufficiently large mask component, in region order.
pub fn extract_primitives(
    grid: &DepthGrid,
    params: &DetectorParams,
    regions: &[RefinedRegion],
) -> (Vec<Primitive>, LabelMap, ExtractionSummary) {
    let mut labels = LabelMap::new(grid.w, grid.h);
    let mut primitives = Vec::new();
    let mut summary = ExtractionSummary::default();
    let min_points = params.min_primitive_points();

    for refined in regions {
        for component in refined.region.boundary_mask.components() {
            summary.components += 1;
            let points = || {
                component
                    .pixels()
                    .filter(move |&(x, y)| grid.is_valid(x, y))
                    .map(move |(x, y)| &grid.data[grid.idx(x, y)])
            };
            let stats = PlaneStats::from_points(points());
            if stats.count < min_points {
                summary.too_small += 1;
                continue;
            }
            let Some(fit) = stats.fit() else {
                summary.degenerate += 1;
                continue;
            };
            let inliers = points()
                .filter(|p| fit.signed_distance(p).abs() < params.refinement_distance)
                .count();
            if inliers < min_points {
                summary.unsupported += 1;
                debug!(
                    "extract_primitives drop region={} points={} inliers={}",
                    refined.region.id, stats.count, inliers
                );
                continue;
            }

            let id = primitives.len();
            let label = id as u32 + 1;
            for (x, y) in component.pixels() {
                labels.data[y * grid.w + x] = label;
            }
            let boundary = trace_outer_contour(&component);
            let mut plane = Plane::from_fit(id, &fit, inliers, component, boundary);
            if let Some(k) = &grid.intrinsics {
                plane.boundary_3d = plane.lift_boundary(k);
            }
            debug!(
                "extract_primitives plane id={} region={} inliers={} mse={:.3e} vertices={} area={}",
                id,
                refined.region.id,
                plane.inlier_count,
                plane.mse,
                plane.boundary.len(),
                polygon_area(&plane.boundary)
            );
            primitives.push(Primitive::Plane(plane));
        }
    }
    summary.emitted = primitives.len();
    (primitives, labels, summary)
}
