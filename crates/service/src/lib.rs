//! Service layer: the generic create/list registry shared by both services.
//! - `Resource` describes one entity (table, create input, element names).
//! - `RegistryService` runs the queries against the shared pool.
//! - `pagination` parses the list window.

pub mod errors;
pub mod pagination;
pub mod resource;
pub mod registry;
#[cfg(test)]
pub mod test_support;

pub use registry::RegistryService;
pub use resource::Resource;
