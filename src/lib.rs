// Library for the binary and tests

pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod panel;
pub mod refresh;
pub mod render;
pub mod source;
pub mod sysinfo_repo;
pub mod version;
