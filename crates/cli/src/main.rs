use std::io::{self, Write};

use clap::Parser;
use serde_json::{Value, json};

use quiverdb_common::{COMMAND_PATH, DEFAULT_HOST, DEFAULT_PORT};

#[derive(Parser, Debug)]
#[command(name = "quiverdb-cli", about = "QuiverDB CLI client")]
struct Args {
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, short, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Comando para executar diretamente (modo não interativo)
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let url = format!("http://{}:{}{COMMAND_PATH}", args.host, args.port);
    let client = reqwest::Client::new();

    // Modo comando único (via argumentos)
    if !args.command.is_empty() {
        let line = args.command.join(" ");
        execute_request(&client, &url, &line).await?;
        return Ok(());
    }

    println!("Conectado a {url}");

    let stdin = io::stdin();
    let mut input = String::new();

    loop {
        print!("quiverdb> ");
        io::stdout().flush()?;

        input.clear();
        if stdin.read_line(&mut input)? == 0 {
            break; // EOF
        }

        // Só remove a quebra de linha: espaços fazem parte do comando
        let line = input.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        if let Err(e) = execute_request(&client, &url, line).await {
            println!("(error) {e}");
        }
    }

    Ok(())
}

async fn execute_request(client: &reqwest::Client, url: &str, line: &str) -> anyhow::Result<()> {
    let response = client
        .post(url)
        .json(&json!({ "command": line }))
        .send()
        .await?;

    let status = response.status().as_u16();
    let text = response.text().await?;
    // Respostas de erro do transporte (400/405) vêm sem corpo
    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text)?
    };

    println!("{}", format_response(status, &body));
    Ok(())
}

/// Formata uma resposta para exibição humana.
fn format_response(status: u16, body: &Value) -> String {
    let rendered = format_body(body);
    if status == 200 {
        rendered
    } else {
        format!("({status}) {rendered}")
    }
}

fn format_body(body: &Value) -> String {
    match body {
        Value::Null => "(nil)".to_string(),
        Value::String(s) => format!("\"{s}\""),
        Value::Object(fields) => match (fields.get("value"), fields.get("error")) {
            (Some(Value::String(v)), _) => format!("\"{v}\""),
            (_, Some(Value::String(e))) => format!("(error) {e}"),
            _ => body.to_string(),
        },
        other => other.to_string(),
    }
}
