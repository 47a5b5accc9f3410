use std::fmt;

/// Código de status devolvido pelo núcleo junto com cada resposta.
///
/// Os valores numéricos coincidem com os códigos HTTP equivalentes, mas o
/// núcleo não depende de HTTP: o transporte é quem faz a tradução.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    BadRequest,
    NotFound,
    Conflict,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::NotFound => 404,
            Status::Conflict => 409,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
