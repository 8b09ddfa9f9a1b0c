//! Unit tests for the kanban board.

mod session_tests;
mod support;
