//! Client configuration file
//!
//! TOML layout:
//!
//! ```toml
//! [graph]
//! language = "gremlin-groovy"
//! source = "g"
//! read_consistency = "LOCAL_QUORUM"
//! retry = "default"
//! statement_retry = "fallthrough"
//!
//! [profiles.analytics]
//! read_timeout_ms = 60000
//! [profiles.analytics.graph]
//! source = "a"
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use graph_protocol::{consistency, ConsistencyCode};
use serde::Deserialize;

use crate::merge::GraphOptionsResolver;
use crate::options::{BaseGraphOptions, DEFAULT_GRAPH_LANGUAGE, DEFAULT_GRAPH_SOURCE};
use crate::profile::{ExecutionProfile, ProfileGraphOptions, ProfileManager};
use crate::retry::{policy_by_name, RetryPolicyRef};

/// Client-wide graph settings (`[graph]`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphSection {
    pub language: Option<String>,
    pub source: Option<String>,
    pub name: Option<String>,
    pub execute_as: Option<String>,
    /// Canonical consistency name, e.g. `LOCAL_QUORUM`
    pub read_consistency: Option<String>,
    pub write_consistency: Option<String>,
    /// Client-wide retry policy name
    pub retry: Option<String>,
    /// Retry policy for graph statements on the default profile
    pub statement_retry: Option<String>,
    pub read_timeout_ms: Option<i64>,
}

/// Graph settings of one profile (`[profiles.<name>.graph]`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileGraphSection {
    pub language: Option<String>,
    pub source: Option<String>,
    pub name: Option<String>,
    pub read_consistency: Option<String>,
    pub write_consistency: Option<String>,
}

/// One execution profile (`[profiles.<name>]`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileSection {
    pub retry: Option<String>,
    pub read_timeout_ms: Option<i64>,
    pub graph: Option<ProfileGraphSection>,
}

/// Parsed client configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    #[serde(default)]
    pub graph: GraphSection,

    #[serde(default)]
    pub profiles: BTreeMap<String, ProfileSection>,
}

impl ClientConfig {
    /// Load and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::ParseError(format!("TOML parse error: {}", e)))
    }

    /// Validate the configuration and build a resolver from it.
    pub fn into_resolver(self) -> Result<GraphOptionsResolver, ConfigError> {
        let mut policies = PolicyTable::default();

        let graph = self.graph;
        let retry = policies.resolve(graph.retry.as_deref())?;
        let statement_retry = policies.resolve(graph.statement_retry.as_deref())?;

        let base = BaseGraphOptions {
            language: graph
                .language
                .unwrap_or_else(|| DEFAULT_GRAPH_LANGUAGE.to_string()),
            source: graph.source.unwrap_or_else(|| DEFAULT_GRAPH_SOURCE.to_string()),
            name: graph.name,
            execute_as: graph.execute_as,
            read_consistency: parse_consistency("graph.read_consistency", graph.read_consistency)?,
            write_consistency: parse_consistency(
                "graph.write_consistency",
                graph.write_consistency,
            )?,
            retry: retry.clone(),
            read_timeout: Some(graph.read_timeout_ms.unwrap_or(0)),
        };

        let mut profiles = Vec::with_capacity(self.profiles.len());
        for (name, section) in self.profiles {
            profiles.push(build_profile(name, section, &mut policies)?);
        }

        Ok(GraphOptionsResolver::new(
            ProfileManager::new(profiles, retry),
            base,
            statement_retry,
        ))
    }
}

fn build_profile(
    name: String,
    section: ProfileSection,
    policies: &mut PolicyTable,
) -> Result<ExecutionProfile, ConfigError> {
    let graph_options = match section.graph {
        Some(graph) => Some(ProfileGraphOptions {
            read_consistency: parse_consistency(
                &format!("profiles.{}.graph.read_consistency", name),
                graph.read_consistency,
            )?,
            write_consistency: parse_consistency(
                &format!("profiles.{}.graph.write_consistency", name),
                graph.write_consistency,
            )?,
            language: graph.language,
            source: graph.source,
            name: graph.name,
        }),
        None => None,
    };

    Ok(ExecutionProfile {
        retry: policies.resolve(section.retry.as_deref())?,
        read_timeout: section.read_timeout_ms,
        graph_options,
        name,
    })
}

fn parse_consistency(
    field: &str,
    value: Option<String>,
) -> Result<Option<ConsistencyCode>, ConfigError> {
    match value {
        None => Ok(None),
        Some(name) => consistency::code_of(&name).map(Some).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "{} has unknown consistency level '{}'",
                field, name
            ))
        }),
    }
}

/// One shared instance per policy name.
#[derive(Default)]
struct PolicyTable {
    by_name: HashMap<String, RetryPolicyRef>,
}

impl PolicyTable {
    fn resolve(&mut self, name: Option<&str>) -> Result<Option<RetryPolicyRef>, ConfigError> {
        let Some(name) = name else {
            return Ok(None);
        };
        if let Some(policy) = self.by_name.get(name) {
            return Ok(Some(policy.clone()));
        }
        let policy =
            policy_by_name(name).ok_or_else(|| ConfigError::UnknownRetryPolicy(name.to_string()))?;
        self.by_name.insert(name.to_string(), policy.clone());
        Ok(Some(policy))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("unknown retry policy: {0}")]
    UnknownRetryPolicy(String),
}
