//! Project kanban board for CRM tasks.
//!
//! Tasks are grouped into four canonical columns. Dragging a card to another
//! column updates the board optimistically, persists the new status on the
//! backend, and restores the previous status exactly if the backend refuses.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
