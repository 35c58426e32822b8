//! CLI command handlers.

mod dict;
mod phrases;

pub use dict::run_dict_command;
pub use phrases::run_phrases_command;
