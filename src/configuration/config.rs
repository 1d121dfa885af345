//! Saving and loading body systems as YAML.
//!
//! One record per body, every numeric value printed as round-trippable
//! decimal text:
//!
//! ```yaml
//! bodies:
//! - name: Sun
//!   mass: 1.9884e30
//!   is_star: true
//!   position: [0.0, 0.0, 0.0]
//!   velocity: [0.0, 0.0, 0.0]
//! - name: Earth
//!   mass: 5.972e24
//!   is_star: false
//!   position: [147054206198.1, 0.0, 0.0]
//!   velocity: [0.0, 30300.0, 0.0]
//! ```
//!
//! Loading replaces the whole container: the set is cleared first, and any
//! malformed or invalid record fails the load with the container left empty.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::simulation::body::{Body, BodySet, Vec3};

/// Top-level on-disk form of a body system.
#[derive(Serialize, Deserialize, Debug)]
pub struct SystemConfig {
    pub bodies: Vec<BodyRecord>,
}

/// On-disk form of a single body.
#[derive(Serialize, Deserialize, Debug)]
pub struct BodyRecord {
    pub name: String,
    pub mass: f64,
    pub is_star: bool,
    pub position: [f64; 3],
    pub velocity: [f64; 3],
}

impl BodyRecord {
    fn from_body(body: &Body) -> Self {
        Self {
            name: body.name.clone(),
            mass: body.mass(),
            is_star: body.is_star,
            position: body.position.into(),
            velocity: body.velocity.into(),
        }
    }

    fn into_body(self) -> Result<Body> {
        Body::new(
            self.name,
            Vec3::from(self.position),
            Vec3::from(self.velocity),
            self.mass,
            self.is_star,
        )
    }
}

/// Write the body set to `path`, overwriting any existing file.
pub fn save(path: impl AsRef<Path>, bodies: &BodySet) -> Result<()> {
    let config = SystemConfig {
        bodies: bodies.iter().map(BodyRecord::from_body).collect(),
    };
    let file = File::create(path.as_ref())?;
    serde_yaml::to_writer(BufWriter::new(file), &config)?;
    info!("saved {} bodies to {}", bodies.len(), path.as_ref().display());
    Ok(())
}

/// Read a body system from `path` into a fresh, fully validated set.
pub fn load(path: impl AsRef<Path>) -> Result<BodySet> {
    let file = File::open(path.as_ref())?;
    let config: SystemConfig = serde_yaml::from_reader(BufReader::new(file))?;

    let mut set = BodySet::new();
    for record in config.bodies {
        set.push(record.into_body()?)?;
    }
    info!("loaded {} bodies from {}", set.len(), path.as_ref().display());
    Ok(set)
}

/// Replace the contents of `bodies` with the system stored at `path`.
///
/// The set is cleared before the file is touched; if anything about the file
/// is malformed the error propagates and the set stays empty.
pub fn load_into(path: impl AsRef<Path>, bodies: &mut BodySet) -> Result<()> {
    bodies.clear();
    let loaded = load(path)?;
    bodies.adopt(loaded);
    Ok(())
}
