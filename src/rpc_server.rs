//! autoplay-sync host: runs the background over stdin/stdout.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Input:  browser events, e.g. {"event":"cookieChanged","cookie":{...}}
//! Output: message responses {"id":1,"result":...} / {"id":1,"error":"..."}
//!         and browser commands {"command":"sendMessage",...}
//! Logs go to stderr.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing_subscriber::EnvFilter;

use autoplay_sync::app::App;
use autoplay_sync::host::{protocol, EventHub, Host, HostBrowser, HostHooks};
use autoplay_sync::managers::lifecycle_manager::LifecycleManager;
use autoplay_sync::platform;
use autoplay_sync::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use autoplay_sync::services::storage::{PreferenceStore, SqliteStore};
use autoplay_sync::types::settings::TargetEnv;

#[derive(Parser, Debug)]
#[command(name = "autoplay-sync-host", version, about = "Autoplay preference sync background over stdio")]
struct Cli {
    /// Settings file (defaults to settings.json in the config directory)
    #[arg(long)]
    config: Option<String>,

    /// Directory holding the storage database
    #[arg(long, env = "AUTOPLAY_SYNC_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Browser family, overrides the settings file
    #[arg(long)]
    target_env: Option<TargetEnv>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "autoplay_sync=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = SettingsEngine::new(cli.config);
    engine.load()?;
    if let Some(target_env) = cli.target_env {
        engine.get_settings_mut().target_env = target_env;
    }
    let settings = engine.get_settings().clone();

    let data_dir = cli.data_dir.unwrap_or_else(platform::get_data_dir);
    std::fs::create_dir_all(&data_dir)?;
    let legacy_path = settings
        .legacy_storage_path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir.join("legacy-storage.json"));
    let store: Arc<dyn PreferenceStore> =
        Arc::new(SqliteStore::open(data_dir.join("storage.db"), Some(legacy_path))?);

    let (tx, mut rx) = mpsc::unbounded_channel::<Value>();
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(line) = rx.recv().await {
            stdout.write_all(format!("{}\n", line).as_bytes()).await?;
            stdout.flush().await?;
        }
        Ok::<(), std::io::Error>(())
    });

    let browser = Arc::new(HostBrowser::new(tx.clone(), settings.target_env));
    let hooks = Arc::new(HostHooks::new(Arc::clone(&store), tx.clone()));
    let app = Arc::new(App::new(settings, store, browser.clone(), hooks));
    tracing::info!("background context {}", app.context_url());

    let hub = Arc::new(EventHub::new());
    let lifecycle = LifecycleManager::new(app);
    let setup = lifecycle.init(&*hub);

    tx.send(protocol::ready_line())?;

    let host = Host::new(hub, browser, tx);
    let mut tasks = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if let Some(event) = host.accept_line(&line) {
            let host = host.clone();
            tasks.spawn(async move { host.handle_event(event).await });
        }
    }

    while tasks.join_next().await.is_some() {}
    if let Ok(Err(e)) = setup.await {
        tracing::warn!("storage was not initialized: {e}");
    }

    // The writer ends once every sender is gone.
    drop(host);
    drop(lifecycle);
    writer.await??;
    Ok(())
}
