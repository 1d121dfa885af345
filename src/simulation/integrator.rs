//! Fixed-step time integration for the body set.
//!
//! One scheme for the whole engine: semi-implicit (symplectic) Euler.
//! Velocities are kicked from the freshly computed accelerations, then
//! positions drift with the updated velocities. First-order accurate, but
//! its energy error stays bounded over long runs, which matters more at a
//! fixed day-per-tick cadence than the per-step accuracy of RK4.
//!
//! Every acceleration of a tick is computed from one consistent snapshot of
//! positions before any body is mutated, for either force tier.

use log::warn;

use crate::simulation::barnes_hut::{enclosing_bounds, BarnesHutTree};
use crate::simulation::body::{BodySet, Vec3};
use crate::simulation::gravity;

/// How net forces are evaluated each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceModel {
    /// Exact pairwise summation over every unordered pair, O(N^2).
    Direct,
    /// Barnes-Hut tree approximation, O(N log N), rebuilt every tick.
    BarnesHut { theta: f64 },
}

/// Advance every body by one step of `dt` simulated seconds.
pub fn step(bodies: &mut BodySet, dt: f64, model: ForceModel) {
    if bodies.is_empty() {
        return;
    }

    let accels = match model {
        ForceModel::Direct => direct_accelerations(bodies),
        ForceModel::BarnesHut { theta } => tree_accelerations(bodies, theta),
    };

    // Kick then drift. The prior position goes into the trail as part of the
    // move; the stored acceleration is overwritten next tick.
    for (body, accel) in bodies.as_mut_slice().iter_mut().zip(accels) {
        body.acceleration = accel;
        body.velocity += accel * dt;
        let next = body.position + body.velocity * dt;
        body.move_to(next);
    }
}

/// Exact pairwise accelerations: each unordered pair `(i, j)` with `i < j`
/// is evaluated once and accumulated into both sides with opposite sign.
pub(crate) fn direct_accelerations(bodies: &BodySet) -> Vec<Vec3> {
    let n = bodies.len();
    let mut accels = vec![Vec3::zeros(); n];
    let slice = bodies.as_slice();

    for i in 0..n {
        for j in (i + 1)..n {
            match gravity::force(&slice[i], &slice[j]) {
                Ok(f) => {
                    accels[i] += f / slice[i].mass();
                    accels[j] -= f / slice[j].mass();
                }
                Err(_) => warn!(
                    "zero separation between {:?} and {:?}, pair skipped this tick",
                    slice[i].name, slice[j].name
                ),
            }
        }
    }

    accels
}

/// Tree-approximated accelerations: rebuild the octree from the current
/// positions, query the net force per body, convert to acceleration.
pub(crate) fn tree_accelerations(bodies: &BodySet, theta: f64) -> Vec<Vec3> {
    let tree = BarnesHutTree::build(bodies, enclosing_bounds(bodies));
    (0..bodies.len())
        .map(|i| tree.force_on(i, bodies, theta) / bodies.as_slice()[i].mass())
        .collect()
}
