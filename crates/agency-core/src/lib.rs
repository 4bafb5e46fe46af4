pub mod analytics;
pub mod client;
pub mod config;
pub mod convert;
pub mod error;
pub mod lead;
pub mod metrics;
pub mod project;
pub mod search;
pub mod store;
pub mod task;
pub mod types;
pub mod user;

pub use error::{AgencyError, Result};
pub use store::Store;
