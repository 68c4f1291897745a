//! Request extractors.

pub mod path;

pub use path::parse_token;
