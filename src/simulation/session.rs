//! Simulation session: the body set plus run settings, owned by the caller.
//!
//! `Session` replaces any notion of global simulation state. The scheduler
//! drives it with [`Session::tick`], the UI edits it through the validated
//! [`BodySpec`] commands, and the renderer reads the body set in between.
//! Everything is synchronous: a tick never overlaps another, and edits are
//! only possible between ticks because both take `&mut self`.

use log::info;

use crate::errors::{Result, SimError};
use crate::simulation::barnes_hut::DEFAULT_THETA;
use crate::simulation::body::{Body, BodySet, Vec3};
use crate::simulation::gravity::AU;
use crate::simulation::integrator::{step, ForceModel};

/// Simulated seconds per tick: one day per rendered frame.
pub const DEFAULT_DT: f64 = 86_400.0;

pub struct Session {
    pub bodies: BodySet,
    /// Simulated seconds advanced per tick.
    pub dt: f64,
    pub model: ForceModel,
    /// Pause gate, checked once per tick. Toggled only between ticks.
    pub running: bool,
}

impl Session {
    /// Empty session, paused, at the default cadence.
    pub fn new() -> Self {
        Self {
            bodies: BodySet::new(),
            dt: DEFAULT_DT,
            model: ForceModel::BarnesHut {
                theta: DEFAULT_THETA,
            },
            running: false,
        }
    }

    /// The stock starting system: Sun at rest in the center, Earth at
    /// perihelion, Jupiter at aphelion.
    pub fn default_system() -> Self {
        let mut session = Self::new();
        let stock = [
            ("Sun", Vec3::zeros(), Vec3::zeros(), 1.9884e30, true),
            (
                "Earth",
                Vec3::new(0.983 * AU, 0.0, 0.0),
                Vec3::new(0.0, 30.3e3, 0.0),
                5.972e24,
                false,
            ),
            (
                "Jupiter",
                Vec3::new(-5.37 * AU, 0.0, 0.0),
                Vec3::new(6.07e3, -13.07e3, 0.0),
                1.899e27,
                false,
            ),
        ];
        for (name, position, velocity, mass, is_star) in stock {
            let body =
                Body::new(name, position, velocity, mass, is_star).expect("stock body is valid");
            session.bodies.push(body).expect("stock bodies are distinct");
        }
        session
    }

    /// Advance one tick if the session is running. Returns whether a step
    /// was taken.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        step(&mut self.bodies, self.dt, self.model);
        true
    }

    /// Add a body from dialog input. Nothing changes unless every field
    /// parses and validates.
    pub fn add_body(&mut self, spec: &BodySpec) -> Result<()> {
        let body = spec.parse()?;
        self.bodies.push(body)?;
        info!("added body {:?}", spec.name);
        Ok(())
    }

    /// Overwrite the body at `index` from dialog input, keeping its trail.
    pub fn update_body(&mut self, index: usize, spec: &BodySpec) -> Result<()> {
        let body = spec.parse()?;
        self.bodies.update(index, body)?;
        info!("updated body {:?}", spec.name);
        Ok(())
    }

    pub fn remove_body(&mut self, index: usize) -> Result<Body> {
        self.bodies.remove(index)
    }

    pub fn remove_body_named(&mut self, name: &str) -> Result<Body> {
        self.bodies.remove_named(name)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw dialog input for adding or editing a body.
///
/// Numeric fields arrive as the text the user typed; [`BodySpec::parse`]
/// turns them into a validated [`Body`] or reports the first offending field
/// without touching any state.
#[derive(Debug, Clone)]
pub struct BodySpec {
    pub name: String,
    pub mass: String,
    pub position: [String; 3],
    pub velocity: [String; 3],
    pub is_star: bool,
}

impl BodySpec {
    pub fn parse(&self) -> Result<Body> {
        let mass = parse_field("mass", &self.mass)?;
        let position = parse_vector("position", &self.position)?;
        let velocity = parse_vector("velocity", &self.velocity)?;
        Body::new(self.name.clone(), position, velocity, mass, self.is_star)
    }
}

fn parse_field(field: &str, value: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(SimError::Parse {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

fn parse_vector(field: &str, components: &[String; 3]) -> Result<Vec3> {
    let axes = ["x", "y", "z"];
    let mut out = [0.0; 3];
    for (i, component) in components.iter().enumerate() {
        out[i] = parse_field(&format!("{field}.{}", axes[i]), component)?;
    }
    Ok(Vec3::new(out[0], out[1], out[2]))
}
