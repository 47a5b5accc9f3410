//! Espera limitada por dados em uma fila.
//!
//! A implementação atual faz polling: tenta o pop não bloqueante, dorme um
//! intervalo fixo fora do lock e tenta de novo até o prazo. Uma versão com
//! notificação pode substituir [`PollLoop`] implementando [`BlockingPop`]
//! com as mesmas entradas, saídas e limites de tempo.

use std::future::Future;

use tokio::time::{self, Duration, Instant};
use tracing::trace;

use quiverdb_common::POLL_INTERVAL_MS;

use crate::Db;

/// Menor intervalo aceito; evita um loop que nunca cede a CPU.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Estratégia de espera do pop bloqueante.
pub trait BlockingPop: Send + Sync {
    /// Retorna o elemento mais recente de `key` assim que houver um, ou
    /// `None` quando `timeout` se esgotar sem dados.
    ///
    /// Nunca retorna `None` antes de `timeout`. Descartar a future cancela a
    /// espera.
    fn pop_within(
        &self,
        db: &Db,
        key: &str,
        timeout: Duration,
    ) -> impl Future<Output = Option<String>> + Send;
}

/// Polling em intervalo fixo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollLoop {
    interval: Duration,
}

impl PollLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_POLL_INTERVAL),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for PollLoop {
    fn default() -> Self {
        Self::new(Duration::from_millis(POLL_INTERVAL_MS))
    }
}

impl BlockingPop for PollLoop {
    fn pop_within(
        &self,
        db: &Db,
        key: &str,
        timeout: Duration,
    ) -> impl Future<Output = Option<String>> + Send {
        async move {
            // Sem prazo representável (ex.: timeout infinito) espera indefinidamente
            let deadline = Instant::now().checked_add(timeout);
            let mut attempts = 0u64;

            loop {
                attempts += 1;
                if let Ok(value) = db.qpop(key) {
                    trace!("pop em '{key}' após {attempts} tentativa(s)");
                    return Some(value);
                }

                // Dorme no máximo até o prazo, para que a última tentativa
                // aconteça exatamente nele
                let now = Instant::now();
                let wait = match deadline {
                    Some(deadline) if now >= deadline => return None,
                    Some(deadline) => self.interval.min(deadline - now),
                    None => self.interval,
                };
                time::sleep(wait).await;
            }
        }
    }
}
