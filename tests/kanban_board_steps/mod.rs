//! Step definitions for kanban board BDD scenarios.

mod given;
mod then;
mod when;
pub mod world;
