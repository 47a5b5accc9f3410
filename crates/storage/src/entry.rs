use tokio::time::Instant;

/// Tipo do valor armazenado. O tipo de uma chave não muda enquanto ela está viva.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(String),
    /// Fila LIFO: push e pop acontecem no fim do vetor.
    Queue(Vec<String>),
}

/// Entrada no store: valor + TTL opcional.
#[derive(Debug, Clone)]
pub struct Entry {
    pub value: Value,
    pub expires_at: Option<Instant>,
}

impl Entry {
    pub fn new(value: Value, expires_at: Option<Instant>) -> Self {
        Self { value, expires_at }
    }

    pub fn queue() -> Self {
        Self::new(Value::Queue(Vec::new()), None)
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|t| Instant::now() >= t)
            .unwrap_or(false)
    }
}
