use quiverdb_common::CommandError;

use crate::CommandLine;

/// Verifica a forma de um comando antes de qualquer acesso ao store.
///
/// Só olha contagem e formato dos argumentos; a interpretação dos valores
/// fica a cargo de [`Command::parse`](crate::Command::parse).
pub fn validate(line: &CommandLine) -> Result<(), CommandError> {
    let args = line.args();
    let verb = line.verb();

    match verb {
        "SET" => validate_set(args),
        "GET" | "QPOP" => arity(verb, args.len() == 1),
        "QPUSH" => arity(verb, args.len() >= 2),
        "BQPOP" => {
            arity(verb, args.len() == 2)?;
            args[1]
                .parse::<f64>()
                .map(|_| ())
                .map_err(|_| CommandError::InvalidArgument(format!("'{}' não é um número", args[1])))
        }
        _ => Err(CommandError::Unknown(verb.to_string())),
    }
}

fn validate_set(args: &[String]) -> Result<(), CommandError> {
    arity("SET", (2..=5).contains(&args.len()))?;

    // Com 4+ argumentos o terceiro precisa ser EX<segundos>
    if args.len() >= 4 && !(args[2].starts_with("EX") && args[2].len() > 2) {
        return Err(CommandError::InvalidSetOption(args[2].clone()));
    }

    if args.len() == 5 && args[4] != "NX" && args[4] != "XX" {
        return Err(CommandError::InvalidSetOption(args[4].clone()));
    }

    Ok(())
}

fn arity(verb: &str, ok: bool) -> Result<(), CommandError> {
    if ok {
        Ok(())
    } else {
        Err(CommandError::WrongArity(verb.to_string()))
    }
}
