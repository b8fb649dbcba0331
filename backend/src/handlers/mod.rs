//! HTTP request handlers

pub mod advice;
pub mod farm;
pub mod health;

pub use advice::*;
pub use farm::*;
pub use health::*;
