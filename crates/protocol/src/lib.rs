#![forbid(unsafe_code)]

mod command;
mod parse;
mod reply;
mod validate;

pub use command::{Command, SetCondition, SetOptions};
pub use parse::CommandLine;
pub use reply::{INVALID_COMMAND, Reply, Response};
pub use validate::validate;
