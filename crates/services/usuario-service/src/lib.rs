//! Usuario Service Library
//!
//! CRUD HTTP API for usuario records: field validation, email uniqueness,
//! a minimum age rule and soft delete, persisted through SeaORM.

pub mod api;
pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::UsuarioServiceConfig;
use crate::infra::{Database, Persistence, UnitOfWork};
use crate::service::UsuarioManager;

/// Run the HTTP server, applying pending migrations first.
pub async fn run_server(config: UsuarioServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;

    // Wire unit of work and service
    let storage: Arc<dyn UnitOfWork> = Arc::new(Persistence::new(db));
    let usuarios = Arc::new(UsuarioManager::new(storage.clone()));
    let state = AppState::new(usuarios, storage);

    let app = create_router(state, config.request_timeout());

    // Build address
    let addr: SocketAddr = config.service.addr().parse()?;
    info!("{} listening on {}", config.service.service_name, addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    config: &UsuarioServiceConfig,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
