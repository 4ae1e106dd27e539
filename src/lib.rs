// sitekit - component documentation site build helpers
// Core library functionality

pub mod cli;
pub mod models;
pub mod services;
pub mod utils;
pub mod utils_ext;

// Re-export commonly used types
pub use models::*;
pub use services::*;
pub use utils::error::{Result, SiteError};
