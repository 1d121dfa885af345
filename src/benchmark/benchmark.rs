//! Timing comparison of the two force-evaluation tiers.

use std::time::Instant;

use crate::simulation::body::{Body, BodySet, Vec3};
use crate::simulation::gravity::AU;
use crate::simulation::integrator::{direct_accelerations, tree_accelerations};

/// Time one direct and one tree force pass across growing system sizes and
/// print a comparison table.
pub fn bench_gravity(theta: f64) {
    let ns = [200, 400, 800, 1600, 3200, 6400];

    for n in ns {
        let bodies = scattered_system(n);

        // Warm up both paths
        let _ = direct_accelerations(&bodies);
        let _ = tree_accelerations(&bodies, theta);

        let t0 = Instant::now();
        let _ = direct_accelerations(&bodies);
        let dt_direct = t0.elapsed().as_secs_f64();

        let t1 = Instant::now();
        let _ = tree_accelerations(&bodies, theta);
        let dt_tree = t1.elapsed().as_secs_f64();

        println!(
            "N = {n:5}, direct = {dt_direct:8.6} s, barnes-hut = {dt_tree:8.6} s, speedup = {:5.2}x",
            dt_direct / dt_tree
        );
    }
}

/// Deterministic trig-scattered cloud spanning a few AU, no rng needed.
fn scattered_system(n: usize) -> BodySet {
    let mut bodies = BodySet::new();
    for i in 0..n {
        let i_f = i as f64;
        let position = Vec3::new(
            (i_f * 0.37).sin() * 5.0 * AU + i_f,
            (i_f * 0.13).cos() * 5.0 * AU,
            (i_f * 0.07).sin() * 5.0 * AU,
        );
        let body = Body::new(format!("b{i}"), position, Vec3::zeros(), 1.0e24, false)
            .expect("benchmark body is valid");
        bodies.push(body).expect("scatter positions are distinct");
    }
    bodies
}
