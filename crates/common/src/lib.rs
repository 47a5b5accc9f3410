#![forbid(unsafe_code)]

mod error;
mod status;

pub use error::*;
pub use status::Status;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const MAX_CONNECTIONS: usize = 1024;
/// Rota única aceita pelo transporte HTTP.
pub const COMMAND_PATH: &str = "/command/";
/// Intervalo entre tentativas do BQPOP.
pub const POLL_INTERVAL_MS: u64 = 100;
