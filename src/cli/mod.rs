pub mod commands;
pub mod handlers;
pub mod prompt;

pub use commands::{AddArgs, CliArgs, Commands, UpdateArgs};
pub use handlers::{handle_add, handle_update};
