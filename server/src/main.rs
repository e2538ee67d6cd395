use anyhow::{Context, Result};
use clap::Parser;
use server::build_app;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "tfidf-server")]
#[command(about = "Serve TF-IDF search over a directory of text files as JSON", long_about = None)]
struct Args {
    /// Directory of .txt documents loaded and indexed once at startup
    #[arg(long, default_value = "./data")]
    data: String,
    /// Interface the HTTP listener binds to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// TCP port for the search API
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl Args {
    fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let addr = args.listen_addr()?;
    let app = build_app(&args.data).with_context(|| format!("loading documents from {}", args.data))?;

    let listener = TcpListener::bind(addr).await.with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, data = %args.data, "search API listening");
    axum::serve(listener, app).await?;
    Ok(())
}
