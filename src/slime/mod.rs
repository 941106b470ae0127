//! Slime particle simulator
//!
//! A flat array of particles pushed around by a pressed cursor, bouncing
//! off the field edges and slowly coming to rest. Pure and single-threaded:
//! no rendering or platform dependencies.

pub mod boundary;
pub mod field;
pub mod force;
pub mod particle;
pub mod pointer;
pub mod sim;

pub use boundary::BoundaryPolicy;
pub use field::{FieldState, Link, ParticleField};
pub use force::InteractionForce;
pub use particle::{Particle, ParticleInstance};
pub use pointer::PointerTracker;
pub use sim::SlimeSim;
