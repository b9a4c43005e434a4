//! Graph query option resolution
//!
//! Merges per-call options over the cached defaults of the selected
//! execution profile.
//!
//! Resolution:
//! 1. Look up the profile; an unknown profile passes the options through
//!    untouched for the general execution-options path to reject
//! 2. Fetch (or compute once) the profile's graph defaults
//! 3. No options at all: the defaults as-is
//! 4. Shallow-merge scalar fields over the defaults
//! 5. Nothing payload-relevant supplied: share the default payload
//! 6. Otherwise rebuild the payload key by key

use std::sync::Arc;

use graph_protocol::{consistency, encode_str, encode_timeout, keys, ConsistencyCode};
use tracing::{debug, trace};

use crate::defaults::{profile_graph_defaults, ProfileGraphDefaults};
use crate::error::Result;
use crate::options::{BaseGraphOptions, QueryOptions};
use crate::payload::set_key;
use crate::profile::{ProfileLookup, ProfileManager};
use crate::resolved::{MergedFields, ResolvedGraphOptions};
use crate::retry::RetryPolicyRef;
use crate::setting::Setting;

/// Outcome of option resolution.
#[derive(Debug)]
pub enum Resolution {
    /// The named profile does not exist; options are returned unchanged.
    Passthrough(Option<QueryOptions>),
    /// Options resolved against a profile.
    Graph(ResolvedGraphOptions),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Graph(_))
    }

    pub fn into_graph(self) -> Option<ResolvedGraphOptions> {
        match self {
            Resolution::Graph(resolved) => Some(resolved),
            Resolution::Passthrough(_) => None,
        }
    }
}

/// Resolve the effective options of one graph query.
pub fn resolve_query_options<P: ProfileLookup>(
    profiles: &P,
    base: &BaseGraphOptions,
    graph_retry: Option<&RetryPolicyRef>,
    options: Option<QueryOptions>,
) -> Result<Resolution> {
    let requested = options.as_ref().and_then(|o| o.execution_profile.as_deref());
    let Some(profile) = profiles.profile(requested) else {
        debug!(profile = requested, "graph.options.passthrough");
        return Ok(Resolution::Passthrough(options));
    };

    let defaults = profile_graph_defaults(profiles, base, graph_retry, &profile)?;

    let Some(options) = options else {
        return Ok(Resolution::Graph(ResolvedGraphOptions::from_defaults(
            &profile.name,
            &defaults,
        )));
    };

    merge(&profile.name, &defaults, options).map(Resolution::Graph)
}

fn merge(
    profile: &str,
    defaults: &ProfileGraphDefaults,
    mut options: QueryOptions,
) -> Result<ResolvedGraphOptions> {
    let overrides_nothing = options.overrides_nothing();
    let fields = merge_fields(defaults, &options)?;

    if overrides_nothing {
        trace!(profile, "graph.options.fast_path");
        return Ok(ResolvedGraphOptions::from_merged(
            profile,
            fields,
            Arc::clone(defaults.custom_payload()),
        ));
    }

    let default_payload = defaults.custom_payload();
    let mut payload = options.custom_payload.take().unwrap_or_default();

    set_key(
        &mut payload,
        default_payload,
        keys::PROXY_EXECUTE,
        as_str(&options.execute_as),
        encode_str,
    );
    set_key(
        &mut payload,
        default_payload,
        keys::GRAPH_LANGUAGE,
        as_str(&options.graph_language),
        encode_str,
    );
    set_key(
        &mut payload,
        default_payload,
        keys::GRAPH_SOURCE,
        as_str(&options.graph_source),
        encode_str,
    );
    set_key(
        &mut payload,
        default_payload,
        keys::GRAPH_NAME,
        as_str(&options.graph_name),
        encode_str,
    );
    set_key(
        &mut payload,
        default_payload,
        keys::GRAPH_READ_CONSISTENCY,
        consistency_name(&options.graph_read_consistency)?,
        encode_str,
    );
    set_key(
        &mut payload,
        default_payload,
        keys::GRAPH_WRITE_CONSISTENCY,
        consistency_name(&options.graph_write_consistency)?,
        encode_str,
    );
    set_key(
        &mut payload,
        default_payload,
        keys::REQUEST_TIMEOUT,
        timeout_setting(&options.read_timeout),
        encode_timeout,
    );

    trace!(profile, payload_keys = payload.len(), "graph.options.rebuilt");
    Ok(ResolvedGraphOptions::from_merged(
        profile,
        fields,
        Arc::new(payload),
    ))
}

fn merge_fields(defaults: &ProfileGraphDefaults, options: &QueryOptions) -> Result<MergedFields> {
    // Validate codes even when the payload is shared, so a bad code fails
    // the same way on both paths.
    consistency_name(&options.graph_read_consistency)?;
    consistency_name(&options.graph_write_consistency)?;

    Ok(MergedFields {
        graph_language: options
            .graph_language
            .clone()
            .or_inherit(Some(defaults.graph_language().to_string())),
        graph_source: options
            .graph_source
            .clone()
            .or_inherit(Some(defaults.graph_source().to_string())),
        read_timeout: options.read_timeout.clone().or_inherit(defaults.read_timeout()),
        retry: options
            .retry
            .clone()
            .or_else(|| defaults.retry().cloned()),
    })
}

fn as_str(setting: &Setting<String>) -> Setting<&str> {
    setting.as_ref().map(String::as_str)
}

/// Non-positive timeouts leave the key out. An unset timeout inherits the
/// default entry, which exists only for a positive default.
fn timeout_setting(setting: &Setting<i64>) -> Setting<&i64> {
    match setting {
        Setting::Value(millis) if *millis > 0 => Setting::Value(millis),
        Setting::Unset => Setting::Unset,
        _ => Setting::Suppressed,
    }
}

fn consistency_name(setting: &Setting<ConsistencyCode>) -> Result<Setting<&'static str>> {
    Ok(setting.as_ref().try_map(|code| consistency::name_for(*code))?)
}

/// Client-lifetime inputs of option resolution bundled together.
#[derive(Debug)]
pub struct GraphOptionsResolver {
    profiles: ProfileManager,
    base: BaseGraphOptions,
    graph_retry: Option<RetryPolicyRef>,
}

impl GraphOptionsResolver {
    pub fn new(
        profiles: ProfileManager,
        base: BaseGraphOptions,
        graph_retry: Option<RetryPolicyRef>,
    ) -> Self {
        Self {
            profiles,
            base,
            graph_retry,
        }
    }

    pub fn resolve(&self, options: Option<QueryOptions>) -> Result<Resolution> {
        resolve_query_options(&self.profiles, &self.base, self.graph_retry.as_ref(), options)
    }

    pub fn profiles(&self) -> &ProfileManager {
        &self.profiles
    }

    pub fn base_options(&self) -> &BaseGraphOptions {
        &self.base
    }
}
