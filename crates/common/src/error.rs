use crate::Status;

/// Erros de armazenamento/engine de dados.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("chave já existe")]
    KeyExists,
    #[error("chave não encontrada")]
    KeyNotFound,
    #[error("operação contra chave com tipo errado")]
    WrongType,
    #[error("fila vazia")]
    EmptyQueue,
    #[error("tempo de espera esgotado")]
    Timeout,
}

impl StorageError {
    pub fn status(&self) -> Status {
        match self {
            StorageError::KeyExists | StorageError::WrongType => Status::Conflict,
            StorageError::KeyNotFound | StorageError::Timeout => Status::NotFound,
            // Pop não bloqueante em fila vazia é erro do cliente
            StorageError::EmptyQueue => Status::BadRequest,
        }
    }
}

/// Erros de parsing/validação de comandos.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("comando desconhecido: {0}")]
    Unknown(String),
    #[error("número errado de argumentos para '{0}'")]
    WrongArity(String),
    #[error("opção inválida para SET: {0}")]
    InvalidSetOption(String),
    #[error("argumento inválido: {0}")]
    InvalidArgument(String),
}

impl CommandError {
    pub fn status(&self) -> Status {
        Status::BadRequest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_display() {
        let err = StorageError::WrongType;
        assert_eq!(err.to_string(), "operação contra chave com tipo errado");
    }

    #[test]
    fn storage_error_status() {
        assert_eq!(StorageError::KeyExists.status(), Status::Conflict);
        assert_eq!(StorageError::WrongType.status(), Status::Conflict);
        assert_eq!(StorageError::KeyNotFound.status(), Status::NotFound);
        assert_eq!(StorageError::Timeout.status(), Status::NotFound);
        assert_eq!(StorageError::EmptyQueue.status(), Status::BadRequest);
    }

    #[test]
    fn command_error_display() {
        let err = CommandError::WrongArity("GET".into());
        assert_eq!(err.to_string(), "número errado de argumentos para 'GET'");
        assert_eq!(err.status(), Status::BadRequest);
    }
}
