use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot connect to database: {0}")]
    Connect(String),
}
