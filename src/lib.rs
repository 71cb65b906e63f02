pub mod api;
pub mod app;
pub mod console;
pub mod error;
pub mod mock_data;
pub mod models;
pub mod operator;
pub mod settings;
pub mod stub;
pub mod views;

pub use api::{HttpProductApi, ProductApi};
pub use app::{AdminApp, AdminState};
pub use error::{AppError, FetchError, Operation, Result};
pub use models::{Product, ProductDraft};
pub use operator::Operator;
pub use settings::Settings;
