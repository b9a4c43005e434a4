//! Graph defaults for an execution profile
//!
//! Computes, once per profile, the options a graph query gets when the
//! caller overrides nothing, including the fully encoded default payload.
//!
//! Precedence:
//! - language / source: profile graph options, then client options (first non-empty)
//! - name / consistencies: profile graph options, then client options
//! - retry (non-default profile): profile, then client
//! - retry (default profile): graph retry policy, then client
//! - read timeout: profile, then default profile, then client

use std::sync::Arc;

use graph_protocol::{consistency, encode_str, encode_timeout, keys, CustomPayload};

use crate::error::Result;
use crate::options::BaseGraphOptions;
use crate::profile::{ExecutionProfile, ProfileGraphOptions, ProfileLookup};
use crate::retry::RetryPolicyRef;

/// Options applied to a graph query that overrides nothing.
///
/// Immutable once built. The payload is shared behind an `Arc` so the
/// fast path can hand it out without copying.
#[derive(Debug, Clone)]
pub struct ProfileGraphDefaults {
    graph_language: String,
    graph_source: String,
    retry: Option<RetryPolicyRef>,
    read_timeout: Option<i64>,
    custom_payload: Arc<CustomPayload>,
}

impl ProfileGraphDefaults {
    pub fn new(
        graph_language: impl Into<String>,
        graph_source: impl Into<String>,
        retry: Option<RetryPolicyRef>,
        read_timeout: Option<i64>,
        custom_payload: CustomPayload,
    ) -> Self {
        Self {
            graph_language: graph_language.into(),
            graph_source: graph_source.into(),
            retry,
            read_timeout,
            custom_payload: Arc::new(custom_payload),
        }
    }

    pub fn graph_language(&self) -> &str {
        &self.graph_language
    }

    pub fn graph_source(&self) -> &str {
        &self.graph_source
    }

    pub fn retry(&self) -> Option<&RetryPolicyRef> {
        self.retry.as_ref()
    }

    pub fn read_timeout(&self) -> Option<i64> {
        self.read_timeout
    }

    pub fn custom_payload(&self) -> &Arc<CustomPayload> {
        &self.custom_payload
    }
}

/// Graph defaults for `profile`, memoized in the profile registry.
pub fn profile_graph_defaults<P: ProfileLookup>(
    profiles: &P,
    base: &BaseGraphOptions,
    graph_retry: Option<&RetryPolicyRef>,
    profile: &ExecutionProfile,
) -> Result<Arc<ProfileGraphDefaults>> {
    profiles.get_or_create_graph_defaults(profile, || {
        compute_defaults(profiles, base, graph_retry, profile)
    })
}

fn compute_defaults<P: ProfileLookup>(
    profiles: &P,
    base: &BaseGraphOptions,
    graph_retry: Option<&RetryPolicyRef>,
    profile: &ExecutionProfile,
) -> Result<ProfileGraphDefaults> {
    let no_graph_options = ProfileGraphOptions::default();
    let graph = profile.graph_options.as_ref().unwrap_or(&no_graph_options);

    let language = first_non_empty(graph.language.as_deref(), &base.language);
    let source = first_non_empty(graph.source.as_deref(), &base.source);

    // The registry always materializes a retry policy on the default
    // profile, so a policy there says nothing about user intent.
    let retry = if profiles.is_default(profile) {
        graph_retry.or(base.retry.as_ref())
    } else {
        profile.retry.as_ref().or(base.retry.as_ref())
    }
    .cloned();

    let read_timeout = profile
        .read_timeout
        .or_else(|| profiles.default_profile().read_timeout)
        .or(base.read_timeout);

    let mut payload = CustomPayload::new();
    payload.insert(keys::GRAPH_LANGUAGE.to_string(), encode_str(language));
    payload.insert(keys::GRAPH_SOURCE.to_string(), encode_str(source));

    if let Some(execute_as) = non_empty(base.execute_as.as_deref()) {
        payload.insert(keys::PROXY_EXECUTE.to_string(), encode_str(execute_as));
    }

    if let Some(millis) = read_timeout.filter(|ms| *ms > 0) {
        payload.insert(keys::REQUEST_TIMEOUT.to_string(), encode_timeout(&millis));
    }

    if let Some(name) = non_empty(graph.name.as_deref().or(base.name.as_deref())) {
        payload.insert(keys::GRAPH_NAME.to_string(), encode_str(name));
    }

    let read_consistency = graph.read_consistency.or(base.read_consistency);
    if let Some(name) = consistency::name_of(read_consistency)? {
        payload.insert(keys::GRAPH_READ_CONSISTENCY.to_string(), encode_str(name));
    }

    let write_consistency = graph.write_consistency.or(base.write_consistency);
    if let Some(name) = consistency::name_of(write_consistency)? {
        payload.insert(keys::GRAPH_WRITE_CONSISTENCY.to_string(), encode_str(name));
    }

    Ok(ProfileGraphDefaults::new(
        language,
        source,
        retry,
        read_timeout,
        payload,
    ))
}

fn first_non_empty<'a>(preferred: Option<&'a str>, fallback: &'a str) -> &'a str {
    non_empty(preferred).unwrap_or(fallback)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphOptionsError;
    use crate::profile::ProfileManager;
    use crate::retry::{DefaultRetryPolicy, FallthroughRetryPolicy};
    use graph_protocol::{decode_timeout, ProtocolError};

    fn payload_str<'a>(defaults: &'a ProfileGraphDefaults, key: &str) -> Option<&'a str> {
        defaults
            .custom_payload()
            .get(key)
            .map(|v| std::str::from_utf8(v).unwrap())
    }

    #[test]
    fn test_base_options_only() {
        let manager = ProfileManager::default();
        let base = BaseGraphOptions::default();
        let profile = manager.default_profile();

        let defaults = profile_graph_defaults(&manager, &base, None, &profile).unwrap();

        assert_eq!(defaults.graph_language(), "gremlin-groovy");
        assert_eq!(defaults.graph_source(), "g");
        assert_eq!(defaults.read_timeout(), Some(0));
        assert_eq!(defaults.custom_payload().len(), 2);
        assert_eq!(payload_str(&defaults, keys::GRAPH_LANGUAGE), Some("gremlin-groovy"));
        assert_eq!(payload_str(&defaults, keys::GRAPH_SOURCE), Some("g"));
    }

    #[test]
    fn test_profile_graph_options_win() {
        let profile = ExecutionProfile::new("analytics").with_graph_options(ProfileGraphOptions {
            language: Some("bytecode-json".to_string()),
            source: Some("a".to_string()),
            name: Some("olap".to_string()),
            read_consistency: Some(consistency::LOCAL_QUORUM),
            write_consistency: None,
        });
        let manager = ProfileManager::new(vec![profile], None);
        let base = BaseGraphOptions {
            name: Some("oltp".to_string()),
            write_consistency: Some(consistency::ALL),
            ..BaseGraphOptions::default()
        };
        let analytics = manager.profile(Some("analytics")).unwrap();

        let defaults = profile_graph_defaults(&manager, &base, None, &analytics).unwrap();

        assert_eq!(defaults.graph_language(), "bytecode-json");
        assert_eq!(defaults.graph_source(), "a");
        assert_eq!(payload_str(&defaults, keys::GRAPH_NAME), Some("olap"));
        assert_eq!(
            payload_str(&defaults, keys::GRAPH_READ_CONSISTENCY),
            Some("LOCAL_QUORUM")
        );
        assert_eq!(payload_str(&defaults, keys::GRAPH_WRITE_CONSISTENCY), Some("ALL"));
    }

    #[test]
    fn test_empty_profile_language_falls_back() {
        let profile = ExecutionProfile::new("p").with_graph_options(ProfileGraphOptions {
            language: Some(String::new()),
            ..ProfileGraphOptions::default()
        });
        let manager = ProfileManager::new(vec![profile], None);
        let p = manager.profile(Some("p")).unwrap();

        let defaults =
            profile_graph_defaults(&manager, &BaseGraphOptions::default(), None, &p).unwrap();

        assert_eq!(defaults.graph_language(), "gremlin-groovy");
    }

    #[test]
    fn test_execute_as_and_timeout_are_encoded() {
        let manager = ProfileManager::default();
        let base = BaseGraphOptions {
            execute_as: Some("alice".to_string()),
            read_timeout: Some(30_000),
            ..BaseGraphOptions::default()
        };
        let profile = manager.default_profile();

        let defaults = profile_graph_defaults(&manager, &base, None, &profile).unwrap();

        assert_eq!(payload_str(&defaults, keys::PROXY_EXECUTE), Some("alice"));
        let timeout = defaults.custom_payload().get(keys::REQUEST_TIMEOUT).unwrap();
        assert_eq!(decode_timeout(timeout).unwrap(), 30_000);
    }

    #[test]
    fn test_non_positive_timeout_not_encoded() {
        let profile = ExecutionProfile::new("p").with_read_timeout(-5);
        let manager = ProfileManager::new(vec![profile], None);
        let p = manager.profile(Some("p")).unwrap();

        let defaults =
            profile_graph_defaults(&manager, &BaseGraphOptions::default(), None, &p).unwrap();

        assert_eq!(defaults.read_timeout(), Some(-5));
        assert!(!defaults.custom_payload().contains_key(keys::REQUEST_TIMEOUT));
    }

    #[test]
    fn test_read_timeout_falls_back_to_default_profile() {
        let manager = ProfileManager::new(
            vec![
                ExecutionProfile::new("default").with_read_timeout(12_000),
                ExecutionProfile::new("p"),
            ],
            None,
        );
        let base = BaseGraphOptions {
            read_timeout: Some(1_000),
            ..BaseGraphOptions::default()
        };
        let p = manager.profile(Some("p")).unwrap();

        let defaults = profile_graph_defaults(&manager, &base, None, &p).unwrap();

        assert_eq!(defaults.read_timeout(), Some(12_000));
    }

    #[test]
    fn test_retry_precedence_by_profile_kind() {
        let client: RetryPolicyRef = Arc::new(DefaultRetryPolicy);
        let graph: RetryPolicyRef = Arc::new(FallthroughRetryPolicy);
        let own: RetryPolicyRef = Arc::new(DefaultRetryPolicy);
        let manager = ProfileManager::new(
            vec![
                ExecutionProfile::new("own").with_retry(Arc::clone(&own)),
                ExecutionProfile::new("bare"),
            ],
            Some(Arc::clone(&client)),
        );
        let base = BaseGraphOptions {
            retry: Some(Arc::clone(&client)),
            ..BaseGraphOptions::default()
        };

        let default = manager.default_profile();
        let d = profile_graph_defaults(&manager, &base, Some(&graph), &default).unwrap();
        assert!(Arc::ptr_eq(d.retry().unwrap(), &graph));

        let own_profile = manager.profile(Some("own")).unwrap();
        let o = profile_graph_defaults(&manager, &base, Some(&graph), &own_profile).unwrap();
        assert!(Arc::ptr_eq(o.retry().unwrap(), &own));

        let bare = manager.profile(Some("bare")).unwrap();
        let b = profile_graph_defaults(&manager, &base, Some(&graph), &bare).unwrap();
        assert!(Arc::ptr_eq(b.retry().unwrap(), &client));
    }

    #[test]
    fn test_unknown_consistency_is_fatal() {
        let base = BaseGraphOptions {
            read_consistency: Some(0x7f),
            ..BaseGraphOptions::default()
        };
        let manager = ProfileManager::default();
        let profile = manager.default_profile();

        let err = profile_graph_defaults(&manager, &base, None, &profile).unwrap_err();

        assert_eq!(
            err,
            GraphOptionsError::Protocol(ProtocolError::UnknownConsistencyLevel { code: 0x7f })
        );
        assert!(manager.graph_defaults_cache().is_empty());
    }
}
