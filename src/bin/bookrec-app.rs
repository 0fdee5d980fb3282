use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;

use bookrec::app::raw_cache::RawDataCache;
use bookrec::app::shutdown::shutdown_signal;
use bookrec::app::{AppState, router};
use bookrec::dashboard::Dashboard;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct AppArgs {
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: SocketAddr,

    /// Precomputed artifacts (default: $BOOKREC_ARTIFACTS_DIR or `artifacts`).
    #[arg(long)]
    artifacts: Option<PathBuf>,

    /// Raw CSV datasets (default: $BOOKREC_DATA_DIR or `data`).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Static web assets directory (serve if exists).
    #[arg(long, default_value = "web/dist")]
    web_dir: PathBuf,
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return std::process::ExitCode::FAILURE;
    }
    std::process::ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    bookrec::logging::init(bookrec::logging::APP_DEFAULT_FILTER)?;

    let args = AppArgs::parse();
    tracing::info!(?args, "starting bookrec-app");

    let artifacts_dir = bookrec::cli::artifacts_dir(args.artifacts);
    let data_dir = bookrec::cli::data_dir(args.data);

    let dashboard = tokio::task::spawn_blocking(move || Dashboard::load(&artifacts_dir))
        .await
        .context("join artifact load task")??;
    tracing::info!(data_dir = %data_dir.display(), "raw datasets load on first request");

    let state = AppState::new(dashboard, RawDataCache::new(data_dir));
    let app = router(state, &args.web_dir);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .map_err(|err| anyhow::anyhow!("bind {}: {err}", args.addr))?;
    tracing::info!(addr = %args.addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
