use tracing::debug;

use quiverdb_common::StorageError;
use quiverdb_protocol::{Command, INVALID_COMMAND, Reply, Response};
use quiverdb_storage::Db;

const SET_OK: &str = "OK";
const QPUSH_OK: &str = "OK";

/// Recebe linhas de comando cruas e devolve (payload, status).
///
/// Não conhece HTTP: qualquer transporte pode chamar [`Dispatcher::execute`].
#[derive(Clone)]
pub struct Dispatcher {
    db: Db,
}

impl Dispatcher {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub async fn execute(&self, raw: &str) -> Response {
        let cmd = match Command::parse(raw) {
            Ok(cmd) => cmd,
            Err(e) => {
                debug!("comando rejeitado {raw:?}: {e}");
                return Response::new(Reply::scalar(INVALID_COMMAND), e.status());
            }
        };

        debug!("comando recebido: {} {}", cmd.name(), cmd.key());
        execute_command(&cmd, &self.db).await
    }
}

/// Executa um comando validado e monta a resposta.
async fn execute_command(cmd: &Command, db: &Db) -> Response {
    match cmd {
        Command::Set {
            key,
            value,
            options,
        } => match db.set(key.clone(), value.clone(), options) {
            Ok(()) => Response::ok(Reply::scalar(SET_OK)),
            Err(e) => failure(Reply::scalar(error_message(&e)), &e),
        },
        // GET devolve a mensagem de erro crua
        Command::Get(key) => match db.get(key) {
            Ok(value) => Response::ok(Reply::field("value", value)),
            Err(e) => failure(Reply::scalar(error_message(&e)), &e),
        },
        Command::QPush { key, values } => match db.qpush(key, values) {
            Ok(len) => {
                debug!("fila '{key}' com {len} elemento(s)");
                Response::ok(Reply::scalar(QPUSH_OK))
            }
            Err(e) => failure(Reply::scalar(error_message(&e)), &e),
        },
        // QPOP embrulha o erro em {error: ...}
        Command::QPop(key) => match db.qpop(key) {
            Ok(value) => Response::ok(Reply::field("value", value)),
            Err(e) => failure(Reply::field("error", error_message(&e)), &e),
        },
        // BQPOP falha sem corpo
        Command::BQPop { key, timeout } => match db.bqpop(key, *timeout).await {
            Ok(value) => Response::ok(Reply::field("value", value)),
            Err(e) => failure(Reply::Empty, &e),
        },
    }
}

fn failure(reply: Reply, err: &StorageError) -> Response {
    Response::new(reply, err.status())
}

fn error_message(err: &StorageError) -> &'static str {
    match err {
        StorageError::KeyExists => "Key already exists",
        StorageError::KeyNotFound => "Key does not exist",
        StorageError::WrongType => {
            "WRONGTYPE Operation against a key holding the wrong kind of value"
        }
        StorageError::EmptyQueue => "Queue is empty, nothing to pop",
        StorageError::Timeout => "Timed out waiting for a value",
    }
}
