use std::collections::BTreeMap;

use quiverdb_common::Status;

/// Mensagem genérica para comandos malformados ou desconhecidos.
pub const INVALID_COMMAND: &str = "Invalid Command";

/// Payload devolvido ao transporte.
///
/// O núcleo não serializa nada: cada transporte decide como representar
/// as três formas (o HTTP usa string JSON, objeto JSON e `null`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Scalar(String),
    Fields(BTreeMap<String, String>),
    Empty,
}

impl Reply {
    pub fn scalar(s: impl Into<String>) -> Reply {
        Reply::Scalar(s.into())
    }

    /// Mapa de um único campo, ex.: `{value: ...}` ou `{error: ...}`.
    pub fn field(name: &str, value: impl Into<String>) -> Reply {
        Reply::Fields(BTreeMap::from([(name.to_string(), value.into())]))
    }
}

/// Par (payload, status) produzido para cada comando.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub reply: Reply,
    pub status: Status,
}

impl Response {
    pub fn new(reply: Reply, status: Status) -> Response {
        Response { reply, status }
    }

    pub fn ok(reply: Reply) -> Response {
        Response::new(reply, Status::Ok)
    }
}
