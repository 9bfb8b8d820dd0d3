// Build-time identity from Cargo.toml

/// Binary/package version, printed in the startup log.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// "name version", e.g. for the startup banner.
pub fn banner() -> String {
    format!("{} {}", NAME, VERSION)
}
