#[cfg(feature = "io")]
pub mod io;

#[cfg(feature = "http")]
pub mod http;
