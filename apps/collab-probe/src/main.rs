//! 数据库连通性验证与单次工作区访问检查。

mod cli;

use cli::Command;
use collab_config::{AppConfig, StoreBackend};
use collab_guard::{TracingNotifier, WorkspaceGuard};
use collab_storage::{EntityStore, InMemoryEntityStore, PgEntityStore, StoreProbe, probe_store};
use collab_telemetry::init_tracing;
use std::sync::Arc;

/// 退出码：存在缺失的表。
const EXIT_UNHEALTHY: i32 = 1;
/// 退出码：守卫拒绝访问。
const EXIT_DENIED: i32 = 2;

struct Backend {
    store: Arc<dyn EntityStore>,
    probe: Arc<dyn StoreProbe>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let command = Command::parse(std::env::args().skip(1))?;
    command.ensure_backend(config.store)?;
    let backend = open_backend(&config).await?;

    match command {
        Command::Probe => {
            let report = probe_store(backend.probe.as_ref()).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if config.probe_fail_on_missing && !report.is_healthy() {
                tracing::error!(missing = ?report.missing_tables(), "store is missing tables");
                std::process::exit(EXIT_UNHEALTHY);
            }
        }
        Command::Check {
            kind,
            entity_id,
            workspace_id,
        } => {
            let guard = WorkspaceGuard::new(backend.store, Arc::new(TracingNotifier));
            let allowed = guard
                .guard_single_access(kind, &entity_id, &workspace_id)
                .await;
            println!(
                "{}",
                serde_json::json!({
                    "kind": kind,
                    "entity_id": entity_id,
                    "workspace_id": workspace_id,
                    "allowed": allowed,
                })
            );
            if !allowed {
                std::process::exit(EXIT_DENIED);
            }
        }
    }
    Ok(())
}

async fn open_backend(config: &AppConfig) -> Result<Backend, Box<dyn std::error::Error>> {
    match config.store {
        StoreBackend::Memory => {
            // 空存储：probe 仅为连通性空跑
            tracing::info!("using in-memory store");
            let store = Arc::new(InMemoryEntityStore::new());
            Ok(Backend {
                store: store.clone(),
                probe: store,
            })
        }
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or("COLLAB_DATABASE_URL required")?;
            let store = Arc::new(PgEntityStore::connect(database_url, config.db_max_connections).await?);
            Ok(Backend {
                store: store.clone(),
                probe: store,
            })
        }
    }
}
