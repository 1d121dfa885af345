pub mod benchmark;
pub mod configuration;
pub mod errors;
pub mod simulation;

pub use simulation::body::{Body, BodySet, Vec3, TRAIL_CAPACITY};
pub use simulation::gravity::{AU, G};
pub use simulation::barnes_hut::{enclosing_bounds, BarnesHutTree, Octant, DEFAULT_THETA};
pub use simulation::integrator::{step, ForceModel};
pub use simulation::session::{BodySpec, Session, DEFAULT_DT};

pub use configuration::config::{load, load_into, save, BodyRecord, SystemConfig};

pub use errors::{Result, SimError};

pub use benchmark::benchmark::bench_gravity;
