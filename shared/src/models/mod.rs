//! Domain models for the crop advisory platform

mod activity;
mod advice;
mod crop;
mod farm;

pub use activity::*;
pub use advice::*;
pub use crop::*;
pub use farm::*;
