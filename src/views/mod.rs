pub mod form;
pub mod table;

pub use form::{ClickTarget, Field, FormEvent, FormValidationError, ProductForm};
pub use table::{ProductTable, TableAction};
