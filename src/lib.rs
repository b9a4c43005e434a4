//! Graph Query Options - effective options for graph queries
//!
//! This crate resolves the options of a single graph query by layering
//! per-call overrides over the defaults of the selected execution profile,
//! which in turn fall back to client-wide graph options. The result carries
//! the custom payload sent with the request.

pub mod config;
pub mod defaults;
pub mod error;
pub mod merge;
pub mod options;
pub mod payload;
pub mod profile;
pub mod resolved;
pub mod retry;
pub mod setting;

pub use config::{ClientConfig, ConfigError};
pub use defaults::{profile_graph_defaults, ProfileGraphDefaults};
pub use error::{GraphOptionsError, Result};
pub use graph_protocol::{
    consistency, decode_timeout, encode_str, encode_timeout, keys, ConsistencyCode, CustomPayload,
    ProtocolError,
};
pub use merge::{resolve_query_options, GraphOptionsResolver, Resolution};
pub use options::{BaseGraphOptions, QueryOptions};
pub use payload::set_key;
pub use profile::{
    ExecutionProfile, ProfileDefaultsCache, ProfileGraphOptions, ProfileLookup, ProfileManager,
    DEFAULT_PROFILE_NAME,
};
pub use resolved::ResolvedGraphOptions;
pub use retry::{DefaultRetryPolicy, FallthroughRetryPolicy, RetryPolicy, RetryPolicyRef};
pub use setting::Setting;
