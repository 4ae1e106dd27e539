// Filesystem, path and string helpers
pub mod case;
pub mod fs_utils;
pub mod paths;
