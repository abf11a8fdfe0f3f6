//! CLI command implementations.

pub mod build;
pub mod clean;
pub mod doctor;
pub mod init;
pub mod target;
