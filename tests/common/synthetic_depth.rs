use primitive_detector::camera::Intrinsics;
use primitive_detector::image::DepthGrid;

pub const WIDTH: usize = 160;
pub const HEIGHT: usize = 120;
pub const FOCAL: f32 = 200.0;

pub fn intrinsics() -> Intrinsics {
    Intrinsics::centered(FOCAL, WIDTH, HEIGHT)
}

/// Render a depth frame where `depth(a, b)` gives the depth seen along the
/// normalized ray `(a, b, 1)`; `None` marks missing depth.
pub fn render(depth: impl Fn(f32, f32) -> Option<f32>) -> DepthGrid {
    render_with(&intrinsics(), WIDTH, HEIGHT, depth)
}

pub fn render_with(
    k: &Intrinsics,
    width: usize,
    height: usize,
    depth: impl Fn(f32, f32) -> Option<f32>,
) -> DepthGrid {
    let mut map = vec![0.0f32; width * height];
    for v in 0..height {
        for u in 0..width {
            let [a, b, _] = k.ray(u as f32, v as f32);
            if let Some(z) = depth(a, b) {
                map[v * width + u] = z;
            }
        }
    }
    DepthGrid::from_depth_map(width, height, &map, k).expect("synthetic frame is well formed")
}

/// Depth along `(a, b, 1)` of the plane `n · p + d = 0`.
pub fn plane_depth(n: [f32; 3], d: f32, a: f32, b: f32) -> Option<f32> {
    let denom = n[0] * a + n[1] * b + n[2];
    let z = -d / denom;
    (denom.abs() > 1e-6 && z > 0.0).then_some(z)
}

/// Two planes of slope `±slope` in x meeting along the vertical line seen at
/// normalized image coordinate `a0`, at depth 2.
///
/// Left of the seam: `slope (x - 2 a0) + (z - 2) = 0`; right of it the slope
/// is mirrored. The crease faces the sensor.
pub fn ridge(a0: f32, slope: f32) -> impl Fn(f32, f32) -> Option<f32> {
    move |a, _b| {
        let s = if a < a0 { slope } else { -slope };
        Some(2.0 * (1.0 + s * a0) / (1.0 + s * a))
    }
}

/// Fronto-parallel box face at depth `box_z` covering pixel rectangle
/// `[u0, u1) × [v0, v1)`, in front of a wall at `wall_z`.
pub fn box_on_wall(
    (u0, u1): (usize, usize),
    (v0, v1): (usize, usize),
    box_z: f32,
    wall_z: f32,
) -> DepthGrid {
    let k = intrinsics();
    let mut grid = render(|_, _| Some(wall_z));
    for v in v0..v1 {
        for u in u0..u1 {
            grid.set(u, v, k.backproject(u as f32, v as f32, box_z));
        }
    }
    grid
}

/// Blank every cell of the outermost ring of `cell`-sized cells.
pub fn blank_border_cells(grid: &mut DepthGrid, cell: usize) {
    for v in 0..grid.h {
        for u in 0..grid.w {
            if u < cell || v < cell || u >= grid.w - cell || v >= grid.h - cell {
                grid.set(u, v, primitive_detector::image::INVALID_POINT);
            }
        }
    }
}

/// Perturb every valid depth by uniform noise in `[-amplitude, amplitude)`,
/// keeping each point on its pixel ray.
pub fn add_depth_noise(grid: &mut DepthGrid, amplitude: f32, seed: u64) {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let k = grid.intrinsics.expect("noise needs the rendering intrinsics");
    let mut rng = StdRng::seed_from_u64(seed);
    for v in 0..grid.h {
        for u in 0..grid.w {
            if !grid.is_valid(u, v) {
                continue;
            }
            let z = grid.get(u, v)[2] + rng.random_range(-amplitude..amplitude);
            grid.set(u, v, k.backproject(u as f32, v as f32, z));
        }
    }
}
