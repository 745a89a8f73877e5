//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates the field schema the query engine reads records through.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
