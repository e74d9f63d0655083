use clap::Parser;
use listing_sync::config::LogFormat;
use listing_sync::mock_server;
use listing_sync::utils::logger;
use std::net::SocketAddr;

#[derive(Debug, Parser)]
#[command(name = "mock-temu")]
#[command(about = "Local mock of the TEMU goods API")]
struct MockArgs {
    #[arg(long, default_value = "127.0.0.1:8000")]
    addr: SocketAddr,

    #[arg(long, help = "Emit JSON log lines")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = MockArgs::parse();
    logger::init_logger(if args.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Compact
    });

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    tracing::info!("TEMU mock listening on {}", args.addr);
    axum::serve(listener, mock_server::router()).await?;

    Ok(())
}
