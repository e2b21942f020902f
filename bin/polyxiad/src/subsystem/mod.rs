mod init;
pub use init::*;
