// Build-time identity from Cargo.toml, shown in the dashboard header

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");
