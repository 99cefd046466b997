//! Per-pixel primitive labels for one frame (0 = unassigned, k = primitive
//! index + 1).

use super::traits::ImageView;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelMap {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u32>,
}

impl LabelMap {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.data[y * self.w + x]
    }

    /// Number of pixels carrying `label`.
    pub fn count(&self, label: u32) -> usize {
        self.data.iter().filter(|&&l| l == label).count()
    }
}

impl ImageView for LabelMap {
    type Pixel = u32;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[u32] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
