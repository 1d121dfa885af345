//! Physical constants and the pairwise gravitational force law.

use crate::errors::{Result, SimError};
use crate::simulation::body::{Body, Vec3};

/// Universal gravitational constant, m^3 kg^-1 s^-2 (CODATA 2014).
pub const G: f64 = 6.67408e-11;

/// One astronomical unit in meters (IAU 2012 definition).
pub const AU: f64 = 149_597_870_700.0;

/// Gravitational force exerted on `a` by `b`.
///
/// Attractive, so the result points from `a` toward `b`:
/// `F = G * mA * mB * (posB - posA) / |posB - posA|^3`.
/// Zero separation is undefined and reported as [`SimError::NumericDomain`];
/// the set-level duplicate-position check keeps it unreachable in a valid
/// simulation.
pub fn force(a: &Body, b: &Body) -> Result<Vec3> {
    force_between(a.position, a.mass(), b.position, b.mass())
}

/// Force on a point mass at `pos_a` from a (possibly aggregated) mass at `pos_b`.
pub fn force_between(pos_a: Vec3, mass_a: f64, pos_b: Vec3, mass_b: f64) -> Result<Vec3> {
    let r = pos_b - pos_a;
    let dist2 = r.norm_squared();
    if dist2 == 0.0 {
        return Err(SimError::NumericDomain);
    }

    // Dividing by |r|^3 normalizes the direction and applies the
    // inverse-square magnitude in one step.
    let inv_r = dist2.sqrt().recip();
    let inv_r3 = inv_r * inv_r * inv_r;

    Ok(r * (G * mass_a * mass_b * inv_r3))
}
