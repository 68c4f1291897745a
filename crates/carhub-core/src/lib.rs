//! # carhub-core
//!
//! Core crate for the CarHub booking service. Contains collaborator and
//! store traits, configuration schemas, typed identifiers, money, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other CarHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
