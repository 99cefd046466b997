//! Ownership buffers reused across frames.
//!
//! Growth, merging and refinement all label cells or pixels through flat
//! `u32` arrays (`0` = free, `id + 1` = region). Keeping them in the detector
//! avoids two frame-sized allocations per call once the input size settles.

/// Workspace storing the cell and pixel ownership arrays.
#[derive(Debug, Default)]
pub struct DetectorWorkspace {
    cell_owner: Vec<u32>,
    pixel_owner: Vec<u32>,
}

impl DetectorWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero the buffers for a frame with `cells` cells and `pixels` pixels.
    pub fn reset(&mut self, cells: usize, pixels: usize) {
        self.cell_owner.clear();
        self.cell_owner.resize(cells, 0);
        self.pixel_owner.clear();
        self.pixel_owner.resize(pixels, 0);
    }

    /// Both ownership arrays, borrowed together.
    pub fn owners_mut(&mut self) -> (&mut Vec<u32>, &mut Vec<u32>) {
        (&mut self.cell_owner, &mut self.pixel_owner)
    }

    /// Region label of every cell after the last processed frame.
    pub fn cell_owner(&self) -> &[u32] {
        &self.cell_owner
    }

    /// Region label of every pixel after the last refinement.
    pub fn pixel_owner(&self) -> &[u32] {
        &self.pixel_owner
    }
}
