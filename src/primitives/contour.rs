//! Outer contour tracing over pixel masks.
//!
//! The tracer walks the cracks between pixels, keeping the mask on its right
//! hand, so vertices land on integer pixel corners and the polygon encloses
//! exactly the traced component. Diagonal-only contacts are not followed,
//! matching the 4-connectivity used to split components. Holes are ignored.

use crate::mask::PixelMask;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Heading {
    Right,
    Down,
    Left,
    Up,
}

impl Heading {
    fn step(self) -> (isize, isize) {
        match self {
            Heading::Right => (1, 0),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Up => (0, -1),
        }
    }

    fn turn_right(self) -> Self {
        match self {
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
            Heading::Up => Heading::Right,
        }
    }

    fn turn_left(self) -> Self {
        match self {
            Heading::Right => Heading::Up,
            Heading::Up => Heading::Left,
            Heading::Left => Heading::Down,
            Heading::Down => Heading::Right,
        }
    }

    /// Pixels ahead of corner `(x, y)`: (right-hand, left-hand).
    fn ahead(self, x: isize, y: isize) -> ((isize, isize), (isize, isize)) {
        match self {
            Heading::Right => ((x, y), (x, y - 1)),
            Heading::Down => ((x - 1, y), (x, y)),
            Heading::Left => ((x - 1, y - 1), (x - 1, y)),
            Heading::Up => ((x, y - 1), (x - 1, y - 1)),
        }
    }
}

/// Trace the outer boundary of the component holding the mask's first pixel
/// (row-major). Returns polygon vertices in pixel-corner coordinates, clockwise
/// on screen, starting at the top-left corner of that pixel. Only corners
/// where the boundary turns are emitted.
pub fn trace_outer_contour(mask: &PixelMask) -> Vec<[f32; 2]> {
    let Some((sx, sy)) = mask.pixels().next() else {
        return Vec::new();
    };
    let start = (sx as isize, sy as isize);
    let inside = |(x, y): (isize, isize)| mask.contains(x, y);

    let mut vertices = vec![[start.0 as f32, start.1 as f32]];
    let (mut x, mut y) = start;
    let mut heading = Heading::Right;
    // Every crack is walked at most once.
    let max_steps = 4 * mask.count() + 4;
    for _ in 0..max_steps {
        let (dx, dy) = heading.step();
        x += dx;
        y += dy;
        if (x, y) == start {
            break;
        }
        let (right, left) = heading.ahead(x, y);
        let next = if !inside(right) {
            heading.turn_right()
        } else if inside(left) {
            heading.turn_left()
        } else {
            heading
        };
        if next != heading {
            vertices.push([x as f32, y as f32]);
            heading = next;
        }
    }
    vertices
}

/// Shoelace area of a polygon; positive for clockwise-on-screen winding.
pub fn polygon_area(vertices: &[[f32; 2]]) -> f32 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut acc = 0.0f32;
    for i in 0..n {
        let [x0, y0] = vertices[i];
        let [x1, y1] = vertices[(i + 1) % n];
        acc += x0 * y1 - x1 * y0;
    }
    acc * 0.5
}
