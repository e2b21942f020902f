#[cfg(feature = "logger")]
pub mod logger;

#[cfg(feature = "build_tools")]
pub mod build_tools;

#[cfg(feature = "ntex")]
pub mod ntex;
