use std::time::Duration;

use quiverdb_common::CommandError;

use crate::{CommandLine, validate};

/// Condição para SET (NX ou XX).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetCondition {
    /// Só seta se a chave não existir.
    Nx,
    /// Só seta se a chave já existir.
    Xx,
}

/// Opções do comando SET.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetOptions {
    pub expire_secs: Option<u64>,
    pub condition: Option<SetCondition>,
}

/// Enum com todos os comandos suportados.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set {
        key: String,
        value: String,
        options: SetOptions,
    },
    Get(String),
    QPush {
        key: String,
        values: Vec<String>,
    },
    QPop(String),
    BQPop {
        key: String,
        timeout: Duration,
    },
}

impl Command {
    /// Faz o parse e a validação de uma linha de comando crua.
    pub fn parse(raw: &str) -> Result<Command, CommandError> {
        let line = CommandLine::new(raw);
        validate(&line)?;

        let (verb, mut args) = line.into_parts();
        let cmd = match verb.as_str() {
            "SET" => parse_set(args),
            "GET" => Command::Get(args.swap_remove(0)),
            "QPUSH" => {
                let values = args.split_off(1);
                Command::QPush {
                    key: args.swap_remove(0),
                    values,
                }
            }
            "QPOP" => Command::QPop(args.swap_remove(0)),
            "BQPOP" => {
                let secs = args[1].parse::<f64>().map_err(|_| {
                    CommandError::InvalidArgument(format!("'{}' não é um número", args[1]))
                })?;
                args.truncate(1);
                Command::BQPop {
                    key: args.swap_remove(0),
                    timeout: timeout_from_secs(secs),
                }
            }
            _ => return Err(CommandError::Unknown(verb.clone())),
        };

        Ok(cmd)
    }

    /// Nome canônico do comando, usado em logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Set { .. } => "SET",
            Command::Get(_) => "GET",
            Command::QPush { .. } => "QPUSH",
            Command::QPop(_) => "QPOP",
            Command::BQPop { .. } => "BQPOP",
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Command::Set { key, .. }
            | Command::Get(key)
            | Command::QPush { key, .. }
            | Command::QPop(key)
            | Command::BQPop { key, .. } => key,
        }
    }
}

fn parse_set(args: Vec<String>) -> Command {
    let mut args = args.into_iter();
    // validate garante ao menos key e value
    let key = args.next().unwrap_or_default();
    let value = args.next().unwrap_or_default();

    // EX<segundos>: inteiro malformado vira 0 (sem expiração)
    let ttl = args
        .next()
        .and_then(|opt| opt.get(2..).and_then(|n| n.parse::<i64>().ok()))
        .unwrap_or(0);

    let condition = match args.nth(1).as_deref() {
        Some("NX") => Some(SetCondition::Nx),
        Some("XX") => Some(SetCondition::Xx),
        _ => None,
    };

    Command::Set {
        key,
        value,
        options: SetOptions {
            expire_secs: u64::try_from(ttl).ok().filter(|&secs| secs > 0),
            condition,
        },
    }
}

/// Converte o timeout em segundos para `Duration`.
///
/// Negativo ou NaN vira zero; valores que não cabem em `Duration` viram
/// `Duration::MAX`, que o poll loop trata como espera sem prazo.
fn timeout_from_secs(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
}
