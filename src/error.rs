use std::fmt;
use thiserror::Error;

/// Which API call produced a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::List => "failed to fetch product list",
            Operation::Get => "failed to fetch product",
            Operation::Create => "failed to create product",
            Operation::Update => "failed to update product",
            Operation::Delete => "failed to delete product",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Get => "get",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// The only failure the API client reports. Status codes, bodies and
/// transport details are dropped; only the failing operation is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", .operation.failure_message())]
pub struct FetchError {
    pub operation: Operation,
}

impl FetchError {
    pub fn new(operation: Operation) -> Self {
        FetchError { operation }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

pub type Result<T> = std::result::Result<T, AppError>;
