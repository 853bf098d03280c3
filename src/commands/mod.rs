pub mod interactive;
pub mod lookup;
pub mod misc;

pub use interactive::{interactive_session, start_demo};
pub use lookup::lookup_command;
pub use misc::{config_command, generate_completions};
