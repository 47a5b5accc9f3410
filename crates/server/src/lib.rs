#![forbid(unsafe_code)]

pub mod handler;
pub mod http;

pub use handler::Dispatcher;
pub use http::router;
