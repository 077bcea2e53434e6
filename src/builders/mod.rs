//! Builders to construct the bootstrap engine from configuration.

pub mod bootstrap_builder;

pub use bootstrap_builder::{build_bootstrap, build_bootstrap_defaults};
