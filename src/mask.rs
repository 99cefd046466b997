//! Bounding-box pixel masks used for region boundaries and primitive extents.

use serde::Serialize;
use std::collections::VecDeque;

/// Set of pixels stored as a dense bitmap over its bounding box.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PixelMask {
    pub x0: usize,
    pub y0: usize,
    pub w: usize,
    pub h: usize,
    #[serde(skip)]
    bits: Vec<bool>,
    count: usize,
}

impl PixelMask {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a mask from `(x, y)` pixel coordinates. Duplicates are ignored.
    pub fn from_pixels(pixels: &[(usize, usize)]) -> Self {
        let Some(&(fx, fy)) = pixels.first() else {
            return Self::empty();
        };
        let (mut xmin, mut ymin, mut xmax, mut ymax) = (fx, fy, fx, fy);
        for &(x, y) in pixels {
            xmin = xmin.min(x);
            ymin = ymin.min(y);
            xmax = xmax.max(x);
            ymax = ymax.max(y);
        }
        let w = xmax - xmin + 1;
        let h = ymax - ymin + 1;
        let mut bits = vec![false; w * h];
        let mut count = 0;
        for &(x, y) in pixels {
            let i = (y - ymin) * w + (x - xmin);
            if !bits[i] {
                bits[i] = true;
                count += 1;
            }
        }
        Self {
            x0: xmin,
            y0: ymin,
            w,
            h,
            bits,
            count,
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Membership test in image coordinates; out-of-range queries are false.
    #[inline]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        if x < self.x0 as isize || y < self.y0 as isize {
            return false;
        }
        let lx = (x - self.x0 as isize) as usize;
        let ly = (y - self.y0 as isize) as usize;
        lx < self.w && ly < self.h && self.bits[ly * self.w + lx]
    }

    /// Member pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, &b)| b)
            .map(move |(i, _)| (self.x0 + i % self.w, self.y0 + i / self.w))
    }

    pub fn intersection_count(&self, other: &PixelMask) -> usize {
        if self.count() > other.count() {
            return other.intersection_count(self);
        }
        self.pixels()
            .filter(|&(x, y)| other.contains(x as isize, y as isize))
            .count()
    }

    /// Intersection over union of two masks, `0` when both are empty.
    pub fn iou(&self, other: &PixelMask) -> f64 {
        let inter = self.intersection_count(other);
        let union = self.count() + other.count() - inter;
        if union == 0 {
            0.0
        } else {
            inter as f64 / union as f64
        }
    }

    /// Split into 4-connected components, ordered by their first pixel in
    /// row-major order.
    pub fn components(&self) -> Vec<PixelMask> {
        let mut label = vec![usize::MAX; self.bits.len()];
        let mut out = Vec::new();
        let mut queue = VecDeque::new();
        for start in 0..self.bits.len() {
            if !self.bits[start] || label[start] != usize::MAX {
                continue;
            }
            let id = out.len();
            let mut members = Vec::new();
            label[start] = id;
            queue.push_back(start);
            while let Some(i) = queue.pop_front() {
                let (lx, ly) = (i % self.w, i / self.w);
                members.push((self.x0 + lx, self.y0 + ly));
                let neighbours = [
                    (lx > 0).then(|| i - 1),
                    (lx + 1 < self.w).then(|| i + 1),
                    (ly > 0).then(|| i - self.w),
                    (ly + 1 < self.h).then(|| i + self.w),
                ];
                for n in neighbours.into_iter().flatten() {
                    if self.bits[n] && label[n] == usize::MAX {
                        label[n] = id;
                        queue.push_back(n);
                    }
                }
            }
            out.push(PixelMask::from_pixels(&members));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: usize, y0: usize, w: usize, h: usize) -> Vec<(usize, usize)> {
        let mut px = Vec::new();
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                px.push((x, y));
            }
        }
        px
    }

    #[test]
    fn from_pixels_tracks_bbox_and_count() {
        let mut px = rect(3, 4, 2, 3);
        px.push((3, 4));
        let mask = PixelMask::from_pixels(&px);
        assert_eq!((mask.x0, mask.y0, mask.w, mask.h), (3, 4, 2, 3));
        assert_eq!(mask.count(), 6);
        assert!(mask.contains(4, 6));
        assert!(!mask.contains(5, 6));
        assert!(!mask.contains(-1, 0));
        assert_eq!(mask.pixels().next(), Some((3, 4)));
    }

    #[test]
    fn iou_of_overlapping_rects() {
        let a = PixelMask::from_pixels(&rect(0, 0, 4, 4));
        let b = PixelMask::from_pixels(&rect(2, 0, 4, 4));
        assert_eq!(a.intersection_count(&b), 8);
        assert!((a.iou(&b) - 8.0 / 24.0).abs() < 1e-12);
        assert_eq!(a.iou(&PixelMask::empty()), 0.0);
    }

    #[test]
    fn diagonal_touch_splits_components() {
        let mut px = rect(0, 0, 2, 2);
        px.extend(rect(2, 2, 2, 2));
        px.extend(rect(6, 0, 1, 3));
        let comps = PixelMask::from_pixels(&px).components();
        assert_eq!(comps.len(), 3);
        assert_eq!(comps[0].count(), 4);
        assert_eq!((comps[1].x0, comps[1].y0), (6, 0));
        assert_eq!((comps[2].x0, comps[2].y0), (2, 2));
    }
}
