pub mod barnes_hut;
pub mod body;
pub mod gravity;
pub mod integrator;
pub mod session;
