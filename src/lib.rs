//! Starfall - Real-time Orbital Visualization Core
//!
//! A library crate providing the orbital visualization components of a
//! narrative solar-system presentation: Keplerian propagation, a locking
//! orbit camera, procedural meteor shapes, and progressive scene
//! population.

pub mod assets;
pub mod body;
pub mod camera;
pub mod input;
pub mod orbit;
pub mod rock;
pub mod scene;
pub mod spawn;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
