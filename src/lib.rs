//! crm-board: project kanban board for a small-business CRM.
//!
//! This crate provides the task board of a CRM project: a four-column view
//! of the project's tasks, a drag-and-drop state machine, and optimistic
//! status transitions that are rolled back exactly when the backend refuses
//! them.
//!
//! # Architecture
//!
//! The board follows hexagonal architecture principles:
//!
//! - **Domain**: task records, the column classifier, board state and the
//!   drag controller, free of I/O
//! - **Ports**: traits for the status update call, the task listing and
//!   user notifications
//! - **Adapters**: a `reqwest` client for the CRM backend and in-memory
//!   implementations
//!
//! # Modules
//!
//! - [`board`]: the kanban board
//! - [`config`]: client settings loaded from files and the environment

pub mod board;
pub mod config;
