//! Configuration schema and loading.
//!
//! Settings come from an optional TOML file plus `SONGBOX__*` environment
//! overrides; every field has a default so a missing file is not an error.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
