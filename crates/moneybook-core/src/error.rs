use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid month: {0}")]
    InvalidMonth(String),
    #[error("Group not found: {0}")]
    GroupNotFound(String),
    #[error("Category not found: {0}")]
    CategoryNotFound(String),
    #[error("Unknown calculator key: {0}")]
    InvalidKey(String),
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
