//! Execution profiles
//!
//! A profile is a named bundle of defaults a query can select. The
//! [`ProfileManager`] owns the profiles and the per-profile slot where
//! computed graph defaults are memoized.

mod cache;

use std::collections::HashMap;
use std::sync::Arc;

use graph_protocol::ConsistencyCode;

pub use cache::ProfileDefaultsCache;

use crate::defaults::ProfileGraphDefaults;
use crate::error::Result;
use crate::retry::RetryPolicyRef;

/// Name of the profile used when a query names none.
pub const DEFAULT_PROFILE_NAME: &str = "default";

/// Graph-specific settings carried by a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileGraphOptions {
    pub language: Option<String>,
    pub source: Option<String>,
    pub name: Option<String>,
    pub read_consistency: Option<ConsistencyCode>,
    pub write_consistency: Option<ConsistencyCode>,
}

/// A named execution profile.
#[derive(Debug, Clone)]
pub struct ExecutionProfile {
    /// Profile name, also its identity
    pub name: String,

    pub graph_options: Option<ProfileGraphOptions>,

    pub retry: Option<RetryPolicyRef>,

    /// Read timeout in milliseconds
    pub read_timeout: Option<i64>,
}

impl ExecutionProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph_options: None,
            retry: None,
            read_timeout: None,
        }
    }

    pub fn with_graph_options(mut self, graph_options: ProfileGraphOptions) -> Self {
        self.graph_options = Some(graph_options);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicyRef) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn with_read_timeout(mut self, millis: i64) -> Self {
        self.read_timeout = Some(millis);
        self
    }
}

/// What option resolution needs from a profile registry.
pub trait ProfileLookup {
    /// Profile by name; `None` selects the default profile.
    fn profile(&self, name: Option<&str>) -> Option<Arc<ExecutionProfile>>;

    /// The default profile, which always exists.
    fn default_profile(&self) -> Arc<ExecutionProfile>;

    /// Memoized graph defaults for `profile`, computed by `factory` on
    /// first access.
    fn get_or_create_graph_defaults<F>(
        &self,
        profile: &ExecutionProfile,
        factory: F,
    ) -> Result<Arc<ProfileGraphDefaults>>
    where
        F: FnOnce() -> Result<ProfileGraphDefaults>;

    fn is_default(&self, profile: &ExecutionProfile) -> bool {
        profile.name == self.default_profile().name
    }
}

/// Profiles configured on a client.
#[derive(Debug)]
pub struct ProfileManager {
    profiles: HashMap<String, Arc<ExecutionProfile>>,
    default: Arc<ExecutionProfile>,
    graph_defaults: ProfileDefaultsCache,
}

impl ProfileManager {
    /// Build the registry.
    ///
    /// The default profile is created when missing. It always ends up with a
    /// retry policy: when none was configured, `client_retry` is filled in.
    pub fn new(profiles: Vec<ExecutionProfile>, client_retry: Option<RetryPolicyRef>) -> Self {
        let mut by_name: HashMap<String, Arc<ExecutionProfile>> = HashMap::new();
        let mut default = ExecutionProfile::new(DEFAULT_PROFILE_NAME);

        for profile in profiles {
            if profile.name == DEFAULT_PROFILE_NAME {
                default = profile;
            } else {
                by_name.insert(profile.name.clone(), Arc::new(profile));
            }
        }

        if default.retry.is_none() {
            default.retry = client_retry;
        }
        let default = Arc::new(default);
        by_name.insert(DEFAULT_PROFILE_NAME.to_string(), Arc::clone(&default));

        Self {
            profiles: by_name,
            default,
            graph_defaults: ProfileDefaultsCache::new(),
        }
    }

    /// Profile names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn graph_defaults_cache(&self) -> &ProfileDefaultsCache {
        &self.graph_defaults
    }
}

impl Default for ProfileManager {
    fn default() -> Self {
        Self::new(Vec::new(), None)
    }
}

impl ProfileLookup for ProfileManager {
    fn profile(&self, name: Option<&str>) -> Option<Arc<ExecutionProfile>> {
        match name {
            None => Some(Arc::clone(&self.default)),
            Some(name) => self.profiles.get(name).cloned(),
        }
    }

    fn default_profile(&self) -> Arc<ExecutionProfile> {
        Arc::clone(&self.default)
    }

    fn get_or_create_graph_defaults<F>(
        &self,
        profile: &ExecutionProfile,
        factory: F,
    ) -> Result<Arc<ProfileGraphDefaults>>
    where
        F: FnOnce() -> Result<ProfileGraphDefaults>,
    {
        self.graph_defaults.get_or_create(&profile.name, factory)
    }
}
