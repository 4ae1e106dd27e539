// Models module for data structures
pub mod dependency;
pub mod endpoint;
pub mod manifest;
