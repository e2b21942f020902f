/// ## Architecture of the processor
/// * x86_64
/// * aarch64
pub const ARCH: &str = env!("TARGET_ARCH");
/// ## The version of Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// ## The commit id of the binary
pub const COMMIT_ID: &str = env!("GIT_HASH");
/// ## The release channel of the binary
/// * stable
/// * nightly
pub const CHANNEL: &str = env!("CHANNEL");
