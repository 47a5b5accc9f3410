use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use quiverdb_common::{
    COMMAND_PATH, DEFAULT_HOST, DEFAULT_PORT, MAX_CONNECTIONS, POLL_INTERVAL_MS,
};
use quiverdb_server::{Dispatcher, router};
use quiverdb_storage::{Db, DbConfig};

#[derive(Parser, Debug)]
#[command(
    name = "quiverdb-server",
    about = "QuiverDB: in-memory key/value and LIFO queue store"
)]
struct Args {
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Máximo de requisições HTTP simultâneas
    #[arg(long, default_value_t = MAX_CONNECTIONS)]
    max_connections: usize,
    /// Intervalo entre tentativas do BQPOP, em milissegundos
    #[arg(long, default_value_t = POLL_INTERVAL_MS)]
    poll_interval_ms: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quiverdb_server=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);

    let config =
        DbConfig::default().with_poll_interval(Duration::from_millis(args.poll_interval_ms));
    let app = router(Dispatcher::new(Db::with_config(config)), args.max_connections);

    let listener = TcpListener::bind(&addr).await?;
    info!("QuiverDB escutando em http://{addr}{COMMAND_PATH}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("servidor encerrado");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        // Sem handler de sinal o servidor segue até ser morto
        error!("falha ao escutar ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal recebido");
}
