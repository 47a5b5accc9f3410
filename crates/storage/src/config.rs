use std::time::Duration;

use quiverdb_common::POLL_INTERVAL_MS;

/// Configuração do [`Db`](crate::Db).
///
/// ```rust
/// use quiverdb_storage::{Db, DbConfig};
/// use std::time::Duration;
///
/// let db = Db::with_config(DbConfig::default().with_poll_interval(Duration::from_millis(20)));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Intervalo entre tentativas do pop bloqueante (padrão: 100ms)
    pub poll_interval: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
        }
    }
}

impl DbConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
