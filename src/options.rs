//! Client-wide and per-call graph options.

use graph_protocol::{ConsistencyCode, CustomPayload};

use crate::retry::RetryPolicyRef;
use crate::setting::Setting;

/// Default graph query language.
pub const DEFAULT_GRAPH_LANGUAGE: &str = "gremlin-groovy";

/// Default traversal source.
pub const DEFAULT_GRAPH_SOURCE: &str = "g";

/// Client-wide graph options, fixed once the client is built.
#[derive(Debug, Clone)]
pub struct BaseGraphOptions {
    /// Query language
    pub language: String,

    /// Traversal source
    pub source: String,

    /// Graph name (None: server picks no graph)
    pub name: Option<String>,

    /// Proxy execution identity
    pub execute_as: Option<String>,

    pub read_consistency: Option<ConsistencyCode>,

    pub write_consistency: Option<ConsistencyCode>,

    /// Client-wide retry policy
    pub retry: Option<RetryPolicyRef>,

    /// Read timeout in milliseconds (0 or less: no server-side timeout)
    pub read_timeout: Option<i64>,
}

impl Default for BaseGraphOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_GRAPH_LANGUAGE.to_string(),
            source: DEFAULT_GRAPH_SOURCE.to_string(),
            name: None,
            execute_as: None,
            read_consistency: None,
            write_consistency: None,
            retry: None,
            read_timeout: Some(0),
        }
    }
}

/// Options supplied with a single graph query.
///
/// Graph-specific fields are tri-state, see [`Setting`].
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Execution profile name (None: the default profile)
    pub execution_profile: Option<String>,

    pub graph_language: Setting<String>,
    pub graph_source: Setting<String>,
    pub graph_name: Setting<String>,
    pub graph_read_consistency: Setting<ConsistencyCode>,
    pub graph_write_consistency: Setting<ConsistencyCode>,
    pub execute_as: Setting<String>,

    /// Read timeout in milliseconds
    pub read_timeout: Setting<i64>,

    /// Caller payload entries, sent alongside the graph keys
    pub custom_payload: Option<CustomPayload>,

    /// Retry policy for this call only
    pub retry: Option<RetryPolicyRef>,
}

impl QueryOptions {
    /// Options targeting a named execution profile.
    pub fn with_profile(name: impl Into<String>) -> Self {
        Self {
            execution_profile: Some(name.into()),
            ..Self::default()
        }
    }

    /// True when no option that ends up in the payload was supplied.
    ///
    /// A suppressed field counts as supplied: it must remove a key the
    /// cached default payload carries.
    pub fn overrides_nothing(&self) -> bool {
        self.custom_payload.is_none()
            && self.graph_language.is_unset()
            && self.graph_source.is_unset()
            && self.execute_as.is_unset()
            && self.graph_name.is_unset()
            && self.graph_read_consistency.is_unset()
            && self.graph_write_consistency.is_unset()
            && self.read_timeout.is_unset()
    }
}
