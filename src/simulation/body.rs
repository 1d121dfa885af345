//! Core state types for the gravity sandbox.
//!
//! `Body` is a named point mass carrying position, velocity, acceleration,
//! and a bounded trail of previous positions for the trail renderer.
//! `BodySet` owns every body of one simulation in insertion order and is the
//! validated mutation boundary: duplicate positions and non-positive masses
//! are rejected here, before any state changes.

use std::collections::VecDeque;

use nalgebra::Vector3;

use crate::errors::{Result, SimError};
use crate::simulation::gravity::AU;

pub type Vec3 = Vector3<f64>;

/// Maximum number of previous positions kept per body.
pub const TRAIL_CAPACITY: usize = 250;

#[derive(Debug, Clone)]
pub struct Body {
    pub name: String, // display name, not required unique
    pub position: Vec3, // m
    pub velocity: Vec3, // m/s
    pub acceleration: Vec3, // m/s^2, last computed tick
    mass: f64, // kg, invariant: > 0
    pub is_star: bool, // emits light when rendered
    trail: VecDeque<Vec3>, // previous positions, oldest first
}

impl Body {
    /// Create a body with explicit initial state. Fails if `mass <= 0`.
    pub fn new(
        name: impl Into<String>,
        position: Vec3,
        velocity: Vec3,
        mass: f64,
        is_star: bool,
    ) -> Result<Self> {
        if !(mass > 0.0) {
            return Err(SimError::NonPositiveMass { value: mass });
        }
        Ok(Self {
            name: name.into(),
            position,
            velocity,
            acceleration: Vec3::zeros(),
            mass,
            is_star,
            trail: VecDeque::new(),
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        if !(mass > 0.0) {
            return Err(SimError::NonPositiveMass { value: mass });
        }
        self.mass = mass;
        Ok(())
    }

    /// Move the body to `position`, recording the prior position in the trail.
    pub fn move_to(&mut self, position: Vec3) {
        if self.trail.len() >= TRAIL_CAPACITY {
            self.trail.pop_front();
        }
        self.trail.push_back(self.position);
        self.position = position;
    }

    /// Previous positions, oldest to newest.
    pub fn trail(&self) -> impl Iterator<Item = &Vec3> {
        self.trail.iter()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Position scaled to astronomical units for display.
    pub fn position_au(&self) -> Vec3 {
        self.position / AU
    }

    /// Log-scaled mass, the renderer's base sphere radius.
    pub fn display_radius(&self) -> f64 {
        self.mass.log10()
    }
}

/// Ordered, owning collection of all bodies in one simulation.
///
/// Insertion order is meaningful: it drives selection lists and the `i < j`
/// pairing of the exact force summation. The set is owned by the session that
/// created it, never shared globally.
#[derive(Debug, Clone, Default)]
pub struct BodySet {
    bodies: Vec<Body>,
    revision: u64,
}

impl BodySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    /// Direct mutable access to one body. Counts as a mutation; callers that
    /// change positions are responsible for keeping them distinct, the way
    /// the validated [`BodySet::update`] path does.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.revision += 1;
        self.bodies.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    /// Bumped on every mutation; the renderer polls it at frame boundaries
    /// instead of being notified per setter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Append a body. Rejects an exact position collision with any body
    /// already in the set, leaving the set unchanged.
    pub fn push(&mut self, body: Body) -> Result<()> {
        if self.position_occupied(&body.position, None) {
            return Err(SimError::DuplicatePosition { name: body.name });
        }
        self.bodies.push(body);
        self.revision += 1;
        Ok(())
    }

    /// Replace the body at `index` with `body`, keeping its trail and
    /// recording the prior position. Position collisions with *other* bodies
    /// are rejected with the set unchanged.
    pub fn update(&mut self, index: usize, body: Body) -> Result<()> {
        if index >= self.bodies.len() {
            return Err(SimError::BadIndex(index));
        }
        if self.position_occupied(&body.position, Some(index)) {
            return Err(SimError::DuplicatePosition { name: body.name });
        }
        let current = &mut self.bodies[index];
        current.name = body.name;
        current.mass = body.mass;
        current.is_star = body.is_star;
        current.velocity = body.velocity;
        current.move_to(body.position);
        self.revision += 1;
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<Body> {
        if index >= self.bodies.len() {
            return Err(SimError::BadIndex(index));
        }
        self.revision += 1;
        Ok(self.bodies.remove(index))
    }

    /// Remove the first body with the given name.
    pub fn remove_named(&mut self, name: &str) -> Result<Body> {
        match self.bodies.iter().position(|b| b.name == name) {
            Some(index) => {
                self.revision += 1;
                Ok(self.bodies.remove(index))
            }
            None => Err(SimError::UnknownBody(name.to_string())),
        }
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.revision += 1;
    }

    /// True if any body (other than the one at `skip`) sits exactly at `position`.
    pub fn position_occupied(&self, position: &Vec3, skip: Option<usize>) -> bool {
        self.bodies
            .iter()
            .enumerate()
            .any(|(i, b)| Some(i) != skip && b.position == *position)
    }

    /// Mutable access for the integrator. Counts as one mutation.
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Body] {
        self.revision += 1;
        &mut self.bodies
    }

    /// Take over the contents of an already-validated set.
    pub(crate) fn adopt(&mut self, other: BodySet) {
        self.bodies = other.bodies;
        self.revision += 1;
    }
}

impl<'a> IntoIterator for &'a BodySet {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
