pub mod command_handler;
pub mod listener;

pub use command_handler::{apply_command, parse_command, CommandOutcome};
pub use listener::spawn_listener;
