// Public API for integration tests and embedding in a server

pub mod action;
pub mod config;
pub mod session;
pub mod state;
pub mod types;
pub mod view;
