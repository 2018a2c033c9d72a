//! Core business logic for termhunt.

pub mod services;

pub use services::*;
