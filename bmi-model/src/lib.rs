pub mod classifier;
pub mod input;
pub mod record;

pub use classifier::{classify, Classification};
pub use input::{validate_username, Field, Measurement, ValidationError};
pub use record::{BmiRecord, Category, NewRecord};
