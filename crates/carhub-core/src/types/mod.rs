//! Core type definitions used across the CarHub workspace.

pub mod id;
pub mod money;

pub use id::*;
pub use money::Money;
