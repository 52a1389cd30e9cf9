use anyhow::Result;
use clap::Parser;
use sift_core::SegmenterConfig;
use sift_server::build_app;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Corpus file produced by the preprocessor
    #[arg(long, default_value = "./data/tmp/raw_input")]
    corpus: PathBuf,
    /// Static web root served at /
    #[arg(long, default_value = "./wwwroot")]
    wwwroot: PathBuf,
    /// Optional stop-word list for the segmenter, one word per line
    #[arg(long)]
    stop_words: Option<PathBuf>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 10001)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config = SegmenterConfig { stop_words: args.stop_words };
    let app = build_app(&args.corpus, &args.wwwroot, &config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
