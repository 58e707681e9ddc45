//! Use cases

pub mod identify_service;

pub use identify_service::{execute, identify, identify_outcome, IdentifyResponse};
