#![forbid(unsafe_code)]

pub mod blocking;
mod config;
mod db;
mod entry;

pub use blocking::{BlockingPop, PollLoop};
pub use config::DbConfig;
pub use db::Db;
pub use entry::{Entry, Value};
