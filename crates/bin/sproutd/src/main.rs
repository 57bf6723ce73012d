//! # sproutd — sprout daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (TOML file, env vars)
//! - Initialise tracing
//! - Construct the storage backend (Firestore when configured, in-memory
//!   otherwise) and the classifier
//! - Construct application services, injecting adapters via port traits
//! - Spawn the notification worker on the event bus
//! - Build the axum router, bind, serve, and shut down on SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::sync::Arc;

use sprout_adapter_firestore::{FirestoreClient, FirestoreHistoryStore, FirestoreProfileRepository};
use sprout_adapter_http_axum::state::{AppState, SystemInfo};
use sprout_adapter_memory::{MemoryHistoryStore, MemoryProfileRepository};
use sprout_adapter_virtual::VirtualClassifier;
use sprout_app::coordinator::WateringCoordinator;
use sprout_app::event_bus::InProcessEventBus;
use sprout_app::ports::{HistoryStore, ProfileRepository};
use sprout_app::services::diagnosis_service::DiagnosisService;
use sprout_app::services::history_service::HistoryService;
use sprout_app::services::notification_service::NotificationService;
use sprout_app::services::profile_service::ProfileService;
use sprout_app::services::telemetry_service::TelemetryService;
use sprout_app::services::watering_service::WateringService;

use crate::config::{Config, StorageBackend};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.logging.filter))
        .init();

    // Shared in-process infrastructure
    let coordinator = Arc::new(WateringCoordinator::new());
    let event_bus = Arc::new(InProcessEventBus::new(256));
    let notifications = Arc::new(NotificationService::new());
    tokio::spawn({
        let notifications = Arc::clone(&notifications);
        let events = event_bus.subscribe();
        async move { notifications.run(events).await }
    });

    // Storage backend
    let app = match config.storage.backend {
        StorageBackend::Firestore => {
            let Some(project_id) = config.storage.project_id.clone() else {
                anyhow::bail!("firestore backend requires storage.project_id");
            };
            let mut firestore_config = sprout_adapter_firestore::Config::new(project_id);
            if let Some(token) = config.storage.auth_token.clone() {
                firestore_config = firestore_config.with_auth_token(token);
            }
            let client = Arc::new(FirestoreClient::new(firestore_config));
            tracing::info!("storage backend: firestore");
            build_router(
                FirestoreProfileRepository::new(Arc::clone(&client)),
                FirestoreHistoryStore::new(client),
                "firestore",
                &coordinator,
                &event_bus,
                &notifications,
            )
        }
        StorageBackend::Memory => {
            tracing::info!("storage backend: memory (nothing survives a restart)");
            build_router(
                Arc::new(MemoryProfileRepository::new()),
                Arc::new(MemoryHistoryStore::new()),
                "memory",
                &coordinator,
                &event_bus,
                &notifications,
            )
        }
    };

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(version = VERSION, %bind_addr, "sproutd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("sproutd stopped");

    Ok(())
}

/// Wire services over the chosen storage backend and build the router.
fn build_router<PR, HS>(
    profiles: PR,
    history: HS,
    storage_backend: &'static str,
    coordinator: &Arc<WateringCoordinator>,
    event_bus: &Arc<InProcessEventBus>,
    notifications: &Arc<NotificationService>,
) -> axum::Router
where
    PR: ProfileRepository + Clone + Send + Sync + 'static,
    HS: HistoryStore + Clone + Send + Sync + 'static,
{
    let state = AppState::new(
        WateringService::new(
            Arc::clone(coordinator),
            profiles.clone(),
            history.clone(),
            Arc::clone(event_bus),
        ),
        TelemetryService::new(
            Arc::clone(coordinator),
            profiles.clone(),
            history.clone(),
            Arc::clone(event_bus),
        ),
        ProfileService::new(profiles),
        HistoryService::new(history.clone()),
        DiagnosisService::new(VirtualClassifier::new(), history, Arc::clone(event_bus)),
        Arc::clone(notifications),
        Arc::clone(coordinator),
        SystemInfo {
            version: VERSION,
            storage_backend,
            classifier_backend: "virtual",
            started_at: sprout_domain::time::now(),
        },
    );
    sprout_adapter_http_axum::router::build(state)
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::warn!(error = %err, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
