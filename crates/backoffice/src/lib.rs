//! # Backoffice
//!
//! A terminal back office for a small shop: user accounts, a product
//! catalogue and a set of analytics reports, all backed by seeded
//! in-memory stores.
//!
//! The crate is split the usual way:
//!
//! - [`model`]: records, drafts and patches, plus seed data
//! - [`store`]: copy-on-write collections and the [`store::ResourceStore`] seam
//! - [`service`]: validation, auth and the simulated services
//! - [`views`] and [`output`]: text rendering and structured serialization
//! - [`config`], [`cli`] and [`app`]: wiring for the `backoffice` binary
//!
//! Listing goes through [`backoffice_query`], which owns search, filter,
//! sort and pagination.

pub mod app;
pub mod cli;
pub mod config;
pub mod model;
pub mod output;
pub mod service;
pub mod store;
pub mod views;

pub use app::App;
pub use cli::{run, Cli};
pub use config::{Config, EnvReader, MockEnv, RealEnv};
pub use output::OutputMode;
