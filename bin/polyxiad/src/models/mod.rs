mod config;
pub use config::*;

mod event;
pub use event::*;

mod system;
pub use system::*;
