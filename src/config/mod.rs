//! Configuration loading for the accrual engine.
//!
//! This module loads a tenant's policy catalogue, its employee policy
//! assignments and the default period mode from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use accrual_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/demo").unwrap();
//! println!("Loaded tenant: {}", config.config().settings().tenant);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AssignmentRecord, AssignmentsConfig, CatalogConfig, EngineSettings, PoliciesConfig,
    PolicyEntry,
};
