/// Linha de comando já separada em verbo e argumentos posicionais.
///
/// A separação é feita exclusivamente no caractere de espaço: não há aspas,
/// escapes ou trim. Espaços repetidos produzem argumentos vazios, que são
/// mantidos como estão.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandLine {
    verb: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(raw: &str) -> CommandLine {
        let mut tokens = raw.split(' ');
        // split sempre produz ao menos um token (possivelmente vazio)
        let verb = tokens.next().unwrap_or_default().to_uppercase();
        let args = tokens.map(str::to_string).collect();
        CommandLine { verb, args }
    }

    /// Verbo em caixa alta.
    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    pub fn into_parts(self) -> (String, Vec<String>) {
        (self.verb, self.args)
    }
}
