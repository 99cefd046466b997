//! Fusing adjacent regions whose planes turned out compatible after growth.
//!
//! Growth evaluates neighbours against a moving aggregate, so one physical
//! plane can end up split across two touching regions. Pairs sharing a cell
//! edge are revisited in ascending id order and joined with a union-find when
//! their aggregates pass the same tests used during growth.

use super::{owner_label, Region};
use crate::angle::normals_agree;
use crate::cells::CellLayout;
use crate::detector::DetectorParams;
use crate::mask::PixelMask;
use log::debug;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeSummary {
    pub adjacent_pairs: usize,
    pub merges: usize,
}

/// Merge compatible neighbouring regions, renumbering the survivors and
/// rewriting `cell_owner` to match.
pub fn merge_adjacent_regions(
    regions: Vec<Region>,
    layout: &CellLayout,
    params: &DetectorParams,
    cell_owner: &mut [u32],
) -> (Vec<Region>, MergeSummary) {
    let pairs = adjacent_pairs(layout, cell_owner);
    let mut summary = MergeSummary {
        adjacent_pairs: pairs.len(),
        merges: 0,
    };
    if pairs.is_empty() {
        return (regions, summary);
    }

    let max_angle = params.normal_angle_threshold_rad();
    let mut parent: Vec<usize> = (0..regions.len()).collect();
    let mut slots: Vec<Option<Region>> = regions.into_iter().map(Some).collect();

    for (a, b) in pairs {
        let ra = find(&mut parent, a);
        let rb = find(&mut parent, b);
        if ra == rb {
            continue;
        }
        let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
        let (Some(keep), Some(other)) = (slots[root].as_ref(), slots[child].as_ref()) else {
            continue;
        };
        if !normals_agree(&keep.fit.normal, &other.fit.normal, max_angle) {
            continue;
        }
        let merged = keep.stats + other.stats;
        let Some(merged_fit) = merged.fit() else {
            continue;
        };
        if merged_fit.mse > params.planarity_mse_threshold {
            continue;
        }
        let Some(absorbed) = slots[child].take() else {
            continue;
        };
        if let Some(keep) = slots[root].as_mut() {
            keep.cells.extend(absorbed.cells);
            keep.stats = merged;
            keep.fit = merged_fit;
        }
        parent[child] = root;
        summary.merges += 1;
    }

    let mut out = Vec::new();
    for mut region in slots.into_iter().flatten() {
        region.id = out.len();
        region.boundary_mask = PixelMask::empty();
        for &c in &region.cells {
            cell_owner[c] = owner_label(region.id);
        }
        out.push(region);
    }
    debug!(
        "merge_adjacent_regions pairs={} merges={} regions={}",
        summary.adjacent_pairs,
        summary.merges,
        out.len()
    );
    (out, summary)
}

/// Region id pairs `(a, b)` with `a < b` that share at least one cell edge.
fn adjacent_pairs(layout: &CellLayout, cell_owner: &[u32]) -> BTreeSet<(usize, usize)> {
    let mut pairs = BTreeSet::new();
    for row in 0..layout.rows {
        for col in 0..layout.cols {
            let a = cell_owner[layout.index(col, row)];
            if a == 0 {
                continue;
            }
            let mut check = |b: u32| {
                if b != 0 && b != a {
                    let (a, b) = ((a - 1) as usize, (b - 1) as usize);
                    pairs.insert((a.min(b), a.max(b)));
                }
            };
            if col + 1 < layout.cols {
                check(cell_owner[layout.index(col + 1, row)]);
            }
            if row + 1 < layout.rows {
                check(cell_owner[layout.index(col, row + 1)]);
            }
        }
    }
    pairs
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}
