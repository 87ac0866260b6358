pub mod analysis;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod flatten;
pub mod model;
pub mod output;
pub mod parser;
pub mod query;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{Dataset, ExerciseRecord};
