pub mod codec;
pub mod errors;
pub mod routes;
pub mod startup;

pub use startup::{build_router, run, run_service, ServiceProfile, CRM, INVENTORY};
