#![allow(missing_docs)]
use crate::Point2;
use rand::distributions::{Distribution, Uniform};
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const SEED: &[u8; 32] = b"wPYxAkIiHcEmSBAxQFoXFrpYToCe1B71";
pub const SEED2: &[u8; 32] = b"14LzG37Y9EHTcmLW8vBDqWwtYsCeVVyF";

pub fn random_points_in_range(range: f64, size: usize, seed: &[u8; 32]) -> Vec<Point2<f64>> {
    let mut rng = rand::rngs::StdRng::from_seed(*seed);
    let range = Uniform::new(-range, range);
    let mut points = Vec::with_capacity(size);
    for _ in 0..size {
        let x = range.sample(&mut rng);
        let y = range.sample(&mut rng);
        points.push(Point2::new(x, y));
    }
    points
}

pub fn random_points_with_seed(size: usize, seed: &[u8; 32]) -> Vec<Point2<f64>> {
    random_points_in_range(1.0, size, seed)
}

/// All integer points of a `size` x `size` grid in shuffled order.
pub fn shuffled_grid(size: i32, seed: &[u8; 32]) -> Vec<Point2<f64>> {
    let mut rng = rand::rngs::StdRng::from_seed(*seed);
    let mut points: Vec<_> = (0..size)
        .flat_map(|x| (0..size).map(move |y| Point2::new(x as f64, y as f64)))
        .collect();
    points.shuffle(&mut rng);
    points
}

/// Points on an outward spiral. Most of them lie outside of the convex hull of their
/// predecessors.
pub fn spiral(size: usize) -> Vec<Point2<f64>> {
    (0..size)
        .map(|i| {
            let angle = i as f64 * 0.7;
            let radius = 1.0 + i as f64 * 0.25;
            Point2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

/// Random points on a grid with spacing `0.1` within `[-0.1 * extent, 0.1 * extent]`.
///
/// Most grid coordinates are not representable, which leaves many nearly collinear
/// triples.
pub fn decimal_grid(extent: i32, size: usize, seed: &[u8; 32]) -> Vec<Point2<f64>> {
    let mut rng = rand::rngs::StdRng::from_seed(*seed);
    let range = Uniform::new_inclusive(-extent, extent);
    (0..size)
        .map(|_| {
            let x = range.sample(&mut rng);
            let y = range.sample(&mut rng);
            Point2::new(x as f64 * 0.1, y as f64 * 0.1)
        })
        .collect()
}
