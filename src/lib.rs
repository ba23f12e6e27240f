pub mod chart;
pub mod config;
pub mod error;
pub mod gradebook;
pub mod input;
pub mod output;
pub mod report;
pub mod schema;
pub mod session;
pub mod store;

pub use error::{GradebookError, Result};
pub use gradebook::Gradebook;
pub use store::RecordStore;
