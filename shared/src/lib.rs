//! Shared types and advisory logic for the crop advisory platform
//!
//! This crate holds the pure parts of the system: record models, feature
//! extraction, scoring and advice composition. Nothing here performs I/O.

pub mod advisor;
pub mod features;
pub mod models;
pub mod quick_advice;
pub mod scoring;
pub mod types;
pub mod validation;

pub use advisor::CropAdvisor;
pub use features::*;
pub use models::*;
pub use quick_advice::*;
pub use scoring::*;
pub use types::*;
pub use validation::*;
