//! Pixel-level boundary refinement.
//!
//! Every kept region first owns all pixels of its cells. Regions are then
//! processed largest first (ties by id): a breadth-first flood starts from the
//! pixels on the sides of the region's cells that face a foreign cell and
//! claims free, valid pixels whose distance to the region plane is below
//! `refinement_distance`. A pixel belongs to the first region that claims it,
//! so masks never overlap. The region plane is not refitted here.

use super::{owner_label, Region};
use crate::cells::CellLayout;
use crate::detector::DetectorParams;
use crate::image::{is_valid_point, DepthGrid};
use crate::mask::PixelMask;
use log::debug;
use std::collections::VecDeque;

/// Region together with the pixels the flood added around it.
#[derive(Clone, Debug, PartialEq)]
pub struct RefinedRegion {
    pub region: Region,
    pub added_pixels: usize,
}

/// Refine region boundaries in area-descending order.
///
/// `cell_owner` must carry the labels written by the growth/merge stages;
/// `pixel_owner` is overwritten with the final per-pixel labels.
pub fn refine_regions(
    grid: &DepthGrid,
    layout: &CellLayout,
    params: &DetectorParams,
    mut regions: Vec<Region>,
    cell_owner: &[u32],
    pixel_owner: &mut Vec<u32>,
) -> Vec<RefinedRegion> {
    pixel_owner.clear();
    pixel_owner.resize(grid.w * grid.h, 0);

    for region in &regions {
        let label = owner_label(region.id);
        for &cell in &region.cells {
            let (x0, y0) = layout.origin(cell);
            for y in y0..y0 + layout.cell_h {
                let start = y * grid.w + x0;
                pixel_owner[start..start + layout.cell_w].fill(label);
            }
        }
    }

    regions.sort_by(|a, b| b.cell_count().cmp(&a.cell_count()).then(a.id.cmp(&b.id)));

    let mut queue = VecDeque::new();
    let mut out = Vec::with_capacity(regions.len());
    for mut region in regions {
        let label = owner_label(region.id);
        queue.clear();
        seed_boundary(&region, layout, cell_owner, grid.w, &mut queue);

        let mut added = Vec::new();
        while let Some(idx) = queue.pop_front() {
            let (x, y) = (idx % grid.w, idx / grid.w);
            let neighbours = [
                (x > 0).then(|| idx - 1),
                (x + 1 < grid.w).then(|| idx + 1),
                (y > 0).then(|| idx - grid.w),
                (y + 1 < grid.h).then(|| idx + grid.w),
            ];
            for n in neighbours.into_iter().flatten() {
                if pixel_owner[n] != 0 {
                    continue;
                }
                let p = &grid.data[n];
                if !is_valid_point(p) {
                    continue;
                }
                if region.fit.signed_distance(p).abs() >= params.refinement_distance {
                    continue;
                }
                pixel_owner[n] = label;
                added.push(n);
                queue.push_back(n);
            }
        }

        let cell_area = layout.cell_w * layout.cell_h;
        let mut pixels = Vec::with_capacity(region.cell_count() * cell_area + added.len());
        for &cell in &region.cells {
            let (x0, y0) = layout.origin(cell);
            for y in y0..y0 + layout.cell_h {
                for x in x0..x0 + layout.cell_w {
                    pixels.push((x, y));
                }
            }
        }
        pixels.extend(added.iter().map(|&i| (i % grid.w, i / grid.w)));
        region.boundary_mask = PixelMask::from_pixels(&pixels);

        out.push(RefinedRegion {
            region,
            added_pixels: added.len(),
        });
    }

    debug!(
        "refine_regions regions={} added_pixels={}",
        out.len(),
        out.iter().map(|r| r.added_pixels).sum::<usize>()
    );
    out
}

/// Queue the pixels lining every cell side that faces a cell owned by
/// something else (another region or nobody).
fn seed_boundary(
    region: &Region,
    layout: &CellLayout,
    cell_owner: &[u32],
    width: usize,
    queue: &mut VecDeque<usize>,
) {
    let label = owner_label(region.id);
    for &cell in &region.cells {
        let (col, row) = layout.coords(cell);
        let (x0, y0) = layout.origin(cell);
        let (x1, y1) = (x0 + layout.cell_w - 1, y0 + layout.cell_h - 1);
        let foreign = |c: usize, r: usize| cell_owner[layout.index(c, r)] != label;

        if col > 0 && foreign(col - 1, row) {
            queue.extend((y0..=y1).map(|y| y * width + x0));
        }
        if col + 1 < layout.cols && foreign(col + 1, row) {
            queue.extend((y0..=y1).map(|y| y * width + x1));
        }
        if row > 0 && foreign(col, row - 1) {
            queue.extend((x0..=x1).map(|x| y0 * width + x));
        }
        if row + 1 < layout.rows && foreign(col, row + 1) {
            queue.extend((x0..=x1).map(|x| y1 * width + x));
        }
    }
}
