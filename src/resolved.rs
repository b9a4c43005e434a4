//! Resolved options handed to the request pipeline.

use std::sync::Arc;

use graph_protocol::CustomPayload;

use crate::defaults::ProfileGraphDefaults;
use crate::retry::RetryPolicyRef;

/// Final options for one graph query.
///
/// Read-only apart from the preferred host, which routing may set after
/// resolution. Graph name, consistency and proxy identity travel only in
/// the payload.
#[derive(Debug, Clone)]
pub struct ResolvedGraphOptions {
    execution_profile: String,
    graph_language: Option<String>,
    graph_source: Option<String>,
    read_timeout: Option<i64>,
    retry: Option<RetryPolicyRef>,
    custom_payload: Arc<CustomPayload>,
    preferred_host: Option<String>,
}

/// Scalar fields after the shallow merge.
#[derive(Debug, Default)]
pub(crate) struct MergedFields {
    pub graph_language: Option<String>,
    pub graph_source: Option<String>,
    pub read_timeout: Option<i64>,
    pub retry: Option<RetryPolicyRef>,
}

impl ResolvedGraphOptions {
    /// Options for a call that supplied nothing: the profile defaults as-is.
    pub(crate) fn from_defaults(profile: &str, defaults: &ProfileGraphDefaults) -> Self {
        Self {
            execution_profile: profile.to_string(),
            graph_language: Some(defaults.graph_language().to_string()),
            graph_source: Some(defaults.graph_source().to_string()),
            read_timeout: defaults.read_timeout(),
            retry: defaults.retry().cloned(),
            custom_payload: Arc::clone(defaults.custom_payload()),
            preferred_host: None,
        }
    }

    pub(crate) fn from_merged(
        profile: &str,
        fields: MergedFields,
        custom_payload: Arc<CustomPayload>,
    ) -> Self {
        Self {
            execution_profile: profile.to_string(),
            graph_language: fields.graph_language,
            graph_source: fields.graph_source,
            read_timeout: fields.read_timeout,
            retry: fields.retry,
            custom_payload,
            preferred_host: None,
        }
    }

    /// Name of the execution profile the options were resolved against.
    pub fn execution_profile(&self) -> &str {
        &self.execution_profile
    }

    pub fn graph_language(&self) -> Option<&str> {
        self.graph_language.as_deref()
    }

    pub fn graph_source(&self) -> Option<&str> {
        self.graph_source.as_deref()
    }

    pub fn read_timeout(&self) -> Option<i64> {
        self.read_timeout
    }

    pub fn retry(&self) -> Option<&RetryPolicyRef> {
        self.retry.as_ref()
    }

    /// Payload to transmit. May be shared with the profile cache.
    pub fn custom_payload(&self) -> &Arc<CustomPayload> {
        &self.custom_payload
    }

    pub fn preferred_host(&self) -> Option<&str> {
        self.preferred_host.as_deref()
    }

    /// Hint for request routing.
    pub fn set_preferred_host(&mut self, host: impl Into<String>) {
        self.preferred_host = Some(host.into());
    }
}
