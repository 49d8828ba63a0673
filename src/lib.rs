//! Tick-driven dungeon simulation: map generation, field of view, grid
//! movement and reactive animal behavior on top of a `hecs` world.
//!
//! Rendering and input devices live outside this crate. A host feeds a
//! [`TickInput`] into [`Simulation::tick`] and reads the world back.

pub mod animal;
pub mod app;
pub mod config;
pub mod ecs;
pub mod error;
pub mod map;
pub mod sim;

pub use config::SimConfig;
pub use ecs::systems::input::TickInput;
pub use error::SimError;
pub use sim::Simulation;
