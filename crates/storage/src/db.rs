use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::time::{Duration, Instant};
use tracing::debug;

use quiverdb_common::StorageError;
use quiverdb_protocol::{SetCondition, SetOptions};

use crate::blocking::{BlockingPop, PollLoop};
use crate::config::DbConfig;
use crate::entry::{Entry, Value};

/// Estado compartilhado entre todos os chamadores.
struct SharedState {
    /// Um único lock serializa todas as operações.
    entries: Mutex<HashMap<String, Entry>>,
    poller: PollLoop,
}

/// Handle para o banco de dados in-memory.
///
/// Clonar o handle é barato e todos os clones enxergam o mesmo estado.
/// Instâncias criadas com `new` são independentes entre si.
#[derive(Clone)]
pub struct Db {
    shared: Arc<SharedState>,
}

impl Db {
    pub fn new() -> Self {
        Self::with_config(DbConfig::default())
    }

    pub fn with_config(config: DbConfig) -> Self {
        Db {
            shared: Arc::new(SharedState {
                entries: Mutex::new(HashMap::new()),
                poller: PollLoop::new(config.poll_interval),
            }),
        }
    }

    // Um panic com o lock em mãos não invalida o mapa: cada operação
    // termina sua mutação antes de qualquer ponto que possa falhar.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.shared
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // --- Scalar operations ---

    pub fn set(
        &self,
        key: String,
        value: String,
        options: &SetOptions,
    ) -> Result<(), StorageError> {
        let mut entries = self.entries();
        // NX/XX olham presença: um escalar expirado ainda ocupa a chave
        let current = entries.get(&key);

        // Verificar condição NX/XX
        match (options.condition, current) {
            (Some(SetCondition::Nx), Some(_)) => return Err(StorageError::KeyExists),
            (Some(SetCondition::Xx), None) => return Err(StorageError::KeyNotFound),
            _ => {}
        }

        if let Some(Entry {
            value: Value::Queue(_),
            ..
        }) = current
        {
            return Err(StorageError::WrongType);
        }

        let expires_at = options
            .expire_secs
            .and_then(|secs| Instant::now().checked_add(Duration::from_secs(secs)));

        entries.insert(key, Entry::new(Value::Scalar(value), expires_at));
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String, StorageError> {
        let entries = self.entries();
        match live(&entries, key) {
            Some(Entry {
                value: Value::Scalar(value),
                ..
            }) => Ok(value.clone()),
            Some(_) => Err(StorageError::WrongType),
            None => Err(StorageError::KeyNotFound),
        }
    }

    // --- Queue operations ---

    /// Empilha `values` no fim da fila, na ordem recebida. Retorna o novo tamanho.
    pub fn qpush(&self, key: &str, values: &[String]) -> Result<usize, StorageError> {
        let mut entries = self.entries();

        // Escalar, mesmo expirado, nunca vira fila
        match &mut entries
            .entry(key.to_string())
            .or_insert_with(Entry::queue)
            .value
        {
            Value::Queue(queue) => {
                queue.extend_from_slice(values);
                Ok(queue.len())
            }
            Value::Scalar(_) => Err(StorageError::WrongType),
        }
    }

    /// Remove e retorna o elemento mais recente (LIFO).
    pub fn qpop(&self, key: &str) -> Result<String, StorageError> {
        let mut entries = self.entries();
        match entries.get_mut(key).map(|entry| &mut entry.value) {
            // Fila vazia continua existindo como chave do tipo fila
            Some(Value::Queue(queue)) => queue.pop().ok_or(StorageError::EmptyQueue),
            _ => Err(StorageError::EmptyQueue),
        }
    }

    /// Pop bloqueante: espera até `timeout` por um elemento na fila.
    ///
    /// O lock é adquirido a cada tentativa e nunca fica retido durante a espera.
    pub async fn bqpop(&self, key: &str, timeout: Duration) -> Result<String, StorageError> {
        let popped = self.shared.poller.pop_within(self, key, timeout).await;
        if popped.is_none() {
            debug!("bqpop em '{key}' expirou após {timeout:?}");
        }
        popped.ok_or(StorageError::Timeout)
    }

    /// Número de chaves armazenadas, incluindo escalares expirados ainda não sobrescritos.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Db {
    fn default() -> Self {
        Self::new()
    }
}

/// Entrada visível para leitura: GET trata expirados como ausentes.
fn live<'a>(entries: &'a HashMap<String, Entry>, key: &str) -> Option<&'a Entry> {
    entries.get(key).filter(|entry| !entry.is_expired())
}
