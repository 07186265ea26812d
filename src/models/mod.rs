pub mod enums;
pub mod finding;
pub mod medication;
pub mod patient;
pub mod plan;

pub use enums::*;
pub use finding::*;
pub use medication::*;
pub use patient::*;
pub use plan::*;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid value '{value}' for {field}")]
    InvalidEnum { field: String, value: String },
}
