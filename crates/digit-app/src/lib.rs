//! Application service layer - configuration, use cases, UI session state

pub mod app;
pub mod config;
pub mod session;
