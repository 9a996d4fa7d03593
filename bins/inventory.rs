use dotenvy::dotenv;
use models::item;
use server::codec::Xml;
use tracing::info;

fn init_logging() {
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "inventory", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();
    server::run_service::<item::Entity, Xml>(server::INVENTORY)
}
