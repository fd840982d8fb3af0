use crate::Point;
use rand::distributions::{Distribution, Uniform};
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const SEED: &[u8; 32] = b"wPYxAkIiHcEmSBAxQFoXFrpYToCe1B71";
pub const SEED2: &[u8; 32] = b"14LzG37Y9EHTcmLW8vBDqWwtYsCeVVyF";

/// The 20 reference points, meant for a 99 × 99 frame.
pub const FIXTURE_XS: [i32; 20] = [
    24, 11, 39, 16, 7, 40, 90, 79, 75, 22, 53, 28, 17, 11, 22, 91, 82, 80, 79, 19,
];
pub const FIXTURE_YS: [i32; 20] = [
    31, 62, 72, 84, 87, 9, 60, 66, 50, 18, 47, 9, 92, 85, 54, 30, 90, 57, 87, 84,
];

pub fn fixture_points() -> impl Iterator<Item = Point<f64>> {
    FIXTURE_XS
        .iter()
        .zip(FIXTURE_YS.iter())
        .map(|(&x, &y)| Point::new(x as f64, y as f64))
}

/// Returns `size` random points lying strictly inside `[0, width] × [0, height]`.
pub fn random_points_in_frame(
    width: f64,
    height: f64,
    size: usize,
    seed: &[u8; 32],
) -> Vec<Point<f64>> {
    let mut rng = rand::rngs::StdRng::from_seed(*seed);
    let x_range = Uniform::new(width * 1e-6, width * (1.0 - 1e-6));
    let y_range = Uniform::new(height * 1e-6, height * (1.0 - 1e-6));
    let mut points = Vec::with_capacity(size);
    for _ in 0..size {
        let x = x_range.sample(&mut rng);
        let y = y_range.sample(&mut rng);
        points.push(Point::new(x, y));
    }
    points
}

/// Returns the points `(spacing * i, spacing * j)` for `i, j` in `1..=size`, shuffled.
///
/// Grid points are co-circular in many ways. With a spacing that is not exactly representable,
/// circumcircle tests on them end up within rounding distance of the circle.
pub fn shuffled_grid(size: usize, spacing: f64, seed: u64) -> Vec<Point<f64>> {
    let mut points: Vec<_> = (1..=size)
        .flat_map(|i| {
            (1..=size).map(move |j| Point::new(spacing * i as f64, spacing * j as f64))
        })
        .collect();
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    points.shuffle(&mut rng);
    points
}
