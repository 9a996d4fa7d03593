use std::{process::ExitCode, sync::Arc};

use axum::Router;
use configs::AppConfig;
use sea_orm::{ActiveModelBehavior, DatabaseConnection, IntoActiveModel};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use service::{RegistryService, Resource};

use crate::codec::WireFormat;
use crate::errors::StartupError;
use crate::routes;

/// What distinguishes one registry process from another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceProfile {
    pub name: &'static str,
    pub base_path: &'static str,
    pub default_port: u16,
}

pub const CRM: ServiceProfile = ServiceProfile {
    name: "crm",
    base_path: "/client",
    default_port: 3000,
};

pub const INVENTORY: ServiceProfile = ServiceProfile {
    name: "inventory",
    base_path: "/items",
    default_port: 3060,
};

/// Wire the registry for `E` onto an already connected pool.
pub fn build_router<E, W>(profile: &ServiceProfile, db: DatabaseConnection) -> Router
where
    E: Resource,
    E::Model: Serialize + IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelBehavior + Send,
    W: WireFormat,
{
    let registry = Arc::new(RegistryService::<E>::new(db));
    routes::registry_router::<E, W>(profile.base_path, registry)
}

/// Config, connect and ping, route, serve. The first failing step ends startup.
pub async fn run<E, W>(profile: ServiceProfile) -> Result<(), StartupError>
where
    E: Resource,
    E::Model: Serialize + IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelBehavior + Send,
    W: WireFormat,
{
    let cfg = AppConfig::load(profile.default_port)
        .map_err(|e| StartupError::InvalidConfig(format!("{e:#}")))?;
    info!(service = profile.name, mysql = ?cfg.mysql, "configuration loaded");

    let db = models::db::connect(&cfg.mysql).await?;
    let app = build_router::<E, W>(&profile, db);

    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(service = profile.name, %addr, base_path = profile.base_path, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Process entry used by the binaries: own runtime, panic logging, Ctrl+C exit.
pub fn run_service<E, W>(profile: ServiceProfile) -> ExitCode
where
    E: Resource,
    E::Model: Serialize + IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: ActiveModelBehavior + Send,
    W: WireFormat,
{
    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");
    let name = profile.name;

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = name,
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(
                service = name,
                event = "runtime_build_failed",
                error = %e,
                "failed to build tokio runtime"
            );
            return ExitCode::FAILURE;
        }
    };

    info!(service = name, event = "start", %service_id, pid, version, "service starting");

    rt.block_on(async move {
        let server_task = tokio::spawn(run::<E, W>(profile));

        tokio::select! {
            res = server_task => match res {
                Ok(Ok(())) => {
                    info!(
                        service = name,
                        event = "stop",
                        %service_id,
                        pid,
                        "service stopped normally"
                    );
                    ExitCode::SUCCESS
                }
                Ok(Err(e)) => {
                    error!(service = name, event = "run_failed", error = %e, "service failed");
                    ExitCode::FAILURE
                }
                Err(e) => {
                    error!(
                        service = name,
                        event = "task_join_error",
                        error = %e,
                        "service task join error"
                    );
                    ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(
                    service = name,
                    event = "shutdown_signal",
                    %service_id,
                    pid,
                    "received Ctrl+C, shutting down"
                );
                ExitCode::SUCCESS
            }
        }
    })
}
