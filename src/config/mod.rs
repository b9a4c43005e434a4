//! Client configuration
//!
//! Loads client-wide graph options and execution profiles from a TOML
//! file and turns them into a [`GraphOptionsResolver`](crate::GraphOptionsResolver).

mod client;

pub use client::{ClientConfig, ConfigError, GraphSection, ProfileGraphSection, ProfileSection};
