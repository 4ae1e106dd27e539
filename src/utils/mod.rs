// Shared error, configuration and validation utilities
pub mod config;
pub mod error;
pub mod validation;
