//! Graph Option Resolution Tests
//!
//! End-to-end checks of profile defaults, per-call overrides and the
//! resulting custom payload.

use std::sync::Arc;

use graph_query_options::{
    consistency, decode_timeout, keys, resolve_query_options, BaseGraphOptions, ExecutionProfile,
    FallthroughRetryPolicy, GraphOptionsError, ProfileGraphOptions, ProfileManager, ProtocolError,
    QueryOptions, Resolution, ResolvedGraphOptions, RetryPolicyRef, Setting,
};

/// Helper to resolve options that are expected to hit a profile
fn resolve_graph(
    manager: &ProfileManager,
    base: &BaseGraphOptions,
    graph_retry: Option<&RetryPolicyRef>,
    options: Option<QueryOptions>,
) -> ResolvedGraphOptions {
    resolve_query_options(manager, base, graph_retry, options)
        .expect("resolution should succeed")
        .into_graph()
        .expect("profile should exist")
}

fn payload_text<'a>(resolved: &'a ResolvedGraphOptions, key: &str) -> Option<&'a str> {
    resolved
        .custom_payload()
        .get(key)
        .map(|v| std::str::from_utf8(v).expect("payload value should be UTF-8"))
}

fn gremlin_base() -> BaseGraphOptions {
    BaseGraphOptions {
        language: "gremlin-groovy".to_string(),
        source: "g".to_string(),
        ..BaseGraphOptions::default()
    }
}

// =============================================================================
// Consistency names
// =============================================================================

#[test]
fn test_registry_names_all_levels() {
    let expected = [
        (consistency::ANY, "ANY"),
        (consistency::ONE, "ONE"),
        (consistency::TWO, "TWO"),
        (consistency::THREE, "THREE"),
        (consistency::QUORUM, "QUORUM"),
        (consistency::ALL, "ALL"),
        (consistency::LOCAL_QUORUM, "LOCAL_QUORUM"),
        (consistency::EACH_QUORUM, "EACH_QUORUM"),
        (consistency::SERIAL, "SERIAL"),
        (consistency::LOCAL_SERIAL, "LOCAL_SERIAL"),
        (consistency::LOCAL_ONE, "LOCAL_ONE"),
    ];
    for (code, name) in expected {
        assert_eq!(consistency::name_of(Some(code)).unwrap(), Some(name));
    }
    assert_eq!(consistency::name_of(None).unwrap(), None);
}

#[test]
fn test_registry_rejects_unknown_code() {
    assert_eq!(
        consistency::name_of(Some(200)),
        Err(ProtocolError::UnknownConsistencyLevel { code: 200 })
    );
}

// =============================================================================
// Fast path
// =============================================================================

#[test]
fn test_no_overrides_reuses_cached_payload() {
    let manager = ProfileManager::default();
    let base = gremlin_base();

    let first = resolve_graph(&manager, &base, None, Some(QueryOptions::default()));
    let second = resolve_graph(&manager, &base, None, Some(QueryOptions::default()));
    let absent = resolve_graph(&manager, &base, None, None);

    assert!(Arc::ptr_eq(first.custom_payload(), second.custom_payload()));
    assert!(Arc::ptr_eq(first.custom_payload(), absent.custom_payload()));
    assert_eq!(manager.graph_defaults_cache().len(), 1);
}

#[test]
fn test_default_profile_payload_has_only_language_and_source() {
    let manager = ProfileManager::default();

    let resolved = resolve_graph(&manager, &gremlin_base(), None, None);

    let payload = resolved.custom_payload();
    assert_eq!(payload.len(), 2, "unexpected keys: {:?}", payload.keys());
    assert_eq!(payload_text(&resolved, keys::GRAPH_LANGUAGE), Some("gremlin-groovy"));
    assert_eq!(payload_text(&resolved, keys::GRAPH_SOURCE), Some("g"));
}

// =============================================================================
// Overrides and suppression
// =============================================================================

#[test]
fn test_suppressed_name_is_omitted() {
    let manager = ProfileManager::default();
    let base = BaseGraphOptions {
        name: Some("base_graph".to_string()),
        ..gremlin_base()
    };

    let inherited = resolve_graph(&manager, &base, None, None);
    assert_eq!(payload_text(&inherited, keys::GRAPH_NAME), Some("base_graph"));

    let suppressed = resolve_graph(
        &manager,
        &base,
        None,
        Some(QueryOptions {
            graph_name: Setting::Suppressed,
            ..QueryOptions::default()
        }),
    );
    assert!(!suppressed.custom_payload().contains_key(keys::GRAPH_NAME));
    assert_eq!(payload_text(&suppressed, keys::GRAPH_SOURCE), Some("g"));
}

#[test]
fn test_suppressed_consistency_and_execute_as_are_omitted() {
    let manager = ProfileManager::default();
    let base = BaseGraphOptions {
        execute_as: Some("alice".to_string()),
        read_consistency: Some(consistency::ONE),
        write_consistency: Some(consistency::ALL),
        ..gremlin_base()
    };

    let resolved = resolve_graph(
        &manager,
        &base,
        None,
        Some(QueryOptions {
            execute_as: Setting::Suppressed,
            graph_read_consistency: Setting::Suppressed,
            ..QueryOptions::default()
        }),
    );

    let payload = resolved.custom_payload();
    assert!(!payload.contains_key(keys::PROXY_EXECUTE));
    assert!(!payload.contains_key(keys::GRAPH_READ_CONSISTENCY));
    assert_eq!(payload_text(&resolved, keys::GRAPH_WRITE_CONSISTENCY), Some("ALL"));
}

#[test]
fn test_unknown_profile_passes_options_through() {
    let manager = ProfileManager::default();
    let options = QueryOptions {
        execution_profile: Some("nonexistent".to_string()),
        graph_name: Setting::Value("g1".to_string()),
        read_timeout: Setting::Value(250),
        ..QueryOptions::default()
    };

    let resolution =
        resolve_query_options(&manager, &gremlin_base(), None, Some(options.clone())).unwrap();

    let returned = match resolution {
        Resolution::Passthrough(Some(returned)) => returned,
        other => panic!("expected passthrough, got {:?}", other),
    };
    assert_eq!(returned.execution_profile, options.execution_profile);
    assert_eq!(returned.graph_name, options.graph_name);
    assert_eq!(returned.graph_language, Setting::Unset);
    assert_eq!(returned.read_timeout, Setting::Value(250));
    assert!(returned.custom_payload.is_none());
    assert!(manager.graph_defaults_cache().is_empty());
}

#[test]
fn test_read_timeout_encoded_as_i64() {
    let manager = ProfileManager::default();

    let resolved = resolve_graph(
        &manager,
        &gremlin_base(),
        None,
        Some(QueryOptions {
            read_timeout: Setting::Value(5000),
            ..QueryOptions::default()
        }),
    );

    let raw = &resolved.custom_payload()[keys::REQUEST_TIMEOUT];
    assert_eq!(raw.len(), 8);
    assert_eq!(decode_timeout(raw).unwrap(), 5000);
    assert_eq!(resolved.read_timeout(), Some(5000));
}

#[test]
fn test_unknown_consistency_override_fails_call() {
    let manager = ProfileManager::default();

    let err = resolve_query_options(
        &manager,
        &gremlin_base(),
        None,
        Some(QueryOptions {
            graph_read_consistency: Setting::Value(77),
            ..QueryOptions::default()
        }),
    )
    .unwrap_err();

    assert_eq!(
        err,
        GraphOptionsError::Protocol(ProtocolError::UnknownConsistencyLevel { code: 77 })
    );
}

// =============================================================================
// Retry policy selection
// =============================================================================

#[test]
fn test_non_default_profile_retry_falls_back_to_base() {
    let base_retry: RetryPolicyRef = Arc::new(graph_query_options::DefaultRetryPolicy);
    let graph_retry: RetryPolicyRef = Arc::new(FallthroughRetryPolicy);
    let manager = ProfileManager::new(
        vec![
            ExecutionProfile::new("regional").with_graph_options(ProfileGraphOptions {
                read_consistency: Some(consistency::LOCAL_QUORUM),
                ..ProfileGraphOptions::default()
            }),
        ],
        Some(Arc::clone(&base_retry)),
    );
    let base = BaseGraphOptions {
        retry: Some(Arc::clone(&base_retry)),
        ..gremlin_base()
    };

    let resolved = resolve_graph(
        &manager,
        &base,
        Some(&graph_retry),
        Some(QueryOptions::with_profile("regional")),
    );

    assert!(Arc::ptr_eq(resolved.retry().unwrap(), &base_retry));
    assert_eq!(
        payload_text(&resolved, keys::GRAPH_READ_CONSISTENCY),
        Some("LOCAL_QUORUM")
    );
}

#[test]
fn test_default_profile_uses_graph_retry() {
    let graph_retry: RetryPolicyRef = Arc::new(FallthroughRetryPolicy);
    let manager = ProfileManager::default();

    let resolved = resolve_graph(&manager, &gremlin_base(), Some(&graph_retry), None);

    assert!(Arc::ptr_eq(resolved.retry().unwrap(), &graph_retry));
}

#[test]
fn test_preferred_host_set_after_resolution() {
    let manager = ProfileManager::default();
    let mut resolved = resolve_graph(&manager, &gremlin_base(), None, None);

    resolved.set_preferred_host("192.168.1.20:9042");

    assert_eq!(resolved.preferred_host(), Some("192.168.1.20:9042"));
    // Each resolution starts without a hint.
    let again = resolve_graph(&manager, &gremlin_base(), None, None);
    assert_eq!(again.preferred_host(), None);
}
