use dotenvy::dotenv;
use models::client;
use server::codec::Json;
use tracing::info;

fn init_logging() {
    // .env first so RUST_LOG from it applies
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "crm", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();
    server::run_service::<client::Entity, Json>(server::CRM)
}
