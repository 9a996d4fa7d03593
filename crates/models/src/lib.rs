//! Table mappings for the registry services and the storage connector.

pub mod errors;
pub mod db;
pub mod client;
pub mod item;

#[cfg(test)]
mod tests;
