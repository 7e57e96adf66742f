//! src/topology/layout.rs
//!
//! Seeded force-directed layout for the topology canvas.
//!
//! A small Fruchterman-Reingold relaxation: nodes repel each other, edges
//! pull their endpoints together, and a cooling step shrinks the per-round
//! displacement. The RNG is seeded so the layout is identical every frame
//! and every run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ITERATIONS: usize = 60;
const COOLING: f64 = 0.95;
/// Margin kept between nodes and the unit-square border after normalizing.
const MARGIN: f64 = 0.08;

/// Compute positions in the unit square for `n` nodes and the given edge
/// list (index pairs into `0..n`). Deterministic for a fixed seed.
pub fn spring_layout(n: usize, edges: &[(usize, usize)], seed: u64) -> Vec<(f64, f64)> {
    if n == 0 {
        return Vec::new();
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.random_range(0.0..1.0), rng.random_range(0.0..1.0)))
        .collect();
    if n == 1 {
        return vec![(0.5, 0.5)];
    }

    // ideal edge length for a unit-square drawing area
    let k = (1.0 / n as f64).sqrt();
    let mut temp = 0.1;

    for _ in 0..ITERATIONS {
        let mut disp = vec![(0.0f64, 0.0f64); n];

        // repulsion between every node pair
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-6);
                let force = k * k / dist;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                disp[i].0 += fx;
                disp[i].1 += fy;
                disp[j].0 -= fx;
                disp[j].1 -= fy;
            }
        }

        // attraction along edges
        for &(a, b) in edges {
            let dx = pos[a].0 - pos[b].0;
            let dy = pos[a].1 - pos[b].1;
            let dist = (dx * dx + dy * dy).sqrt().max(1e-6);
            let force = dist * dist / k;
            let (fx, fy) = (dx / dist * force, dy / dist * force);
            disp[a].0 -= fx;
            disp[a].1 -= fy;
            disp[b].0 += fx;
            disp[b].1 += fy;
        }

        // move each node, capped by the current temperature
        for i in 0..n {
            let (dx, dy) = disp[i];
            let len = (dx * dx + dy * dy).sqrt().max(1e-6);
            let step = len.min(temp);
            pos[i].0 += dx / len * step;
            pos[i].1 += dy / len * step;
        }
        temp *= COOLING;
    }

    normalize(&mut pos);
    pos
}

/// Rescale positions into `[MARGIN, 1 - MARGIN]` on both axes.
fn normalize(pos: &mut [(f64, f64)]) {
    let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in pos.iter() {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }
    let span_x = (max_x - min_x).max(1e-6);
    let span_y = (max_y - min_y).max(1e-6);
    let scale = 1.0 - 2.0 * MARGIN;
    for p in pos.iter_mut() {
        p.0 = MARGIN + (p.0 - min_x) / span_x * scale;
        p.1 = MARGIN + (p.1 - min_y) / span_y * scale;
    }
}
