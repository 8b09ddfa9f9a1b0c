//! HTTP adapter for the CRM backend.

mod client;
mod models;

pub use client::HttpBoardClient;
