pub mod config;
pub mod misc;
pub mod session;

pub use config::{handle_config_init, handle_config_path};
pub use misc::handle_completions;
pub use session::handle_session;
