//! Consistency name registry
//!
//! Maps numeric consistency codes to the canonical uppercase names sent in
//! `graph-read-consistency` / `graph-write-consistency`.
//!
//! Names are derived by uppercasing the driver key of each level. Four
//! multi-word levels use an underscore-separated canonical form instead of
//! the derived one. The table is built on first use and lives for the
//! rest of the process.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::error::{ProtocolError, Result};

/// Numeric consistency level code.
pub type ConsistencyCode = u16;

pub const ANY: ConsistencyCode = 0x00;
pub const ONE: ConsistencyCode = 0x01;
pub const TWO: ConsistencyCode = 0x02;
pub const THREE: ConsistencyCode = 0x03;
pub const QUORUM: ConsistencyCode = 0x04;
pub const ALL: ConsistencyCode = 0x05;
pub const LOCAL_QUORUM: ConsistencyCode = 0x06;
pub const EACH_QUORUM: ConsistencyCode = 0x07;
pub const SERIAL: ConsistencyCode = 0x08;
pub const LOCAL_SERIAL: ConsistencyCode = 0x09;
pub const LOCAL_ONE: ConsistencyCode = 0x0a;

/// Driver keys for every known level.
const DRIVER_KEYS: &[(&str, ConsistencyCode)] = &[
    ("any", ANY),
    ("one", ONE),
    ("two", TWO),
    ("three", THREE),
    ("quorum", QUORUM),
    ("all", ALL),
    ("localQuorum", LOCAL_QUORUM),
    ("eachQuorum", EACH_QUORUM),
    ("serial", SERIAL),
    ("localSerial", LOCAL_SERIAL),
    ("localOne", LOCAL_ONE),
];

/// Levels whose canonical name differs from the uppercased driver key.
const CANONICAL_OVERRIDES: &[(ConsistencyCode, &str)] = &[
    (LOCAL_QUORUM, "LOCAL_QUORUM"),
    (EACH_QUORUM, "EACH_QUORUM"),
    (LOCAL_SERIAL, "LOCAL_SERIAL"),
    (LOCAL_ONE, "LOCAL_ONE"),
];

static NAMES: OnceLock<HashMap<ConsistencyCode, Box<str>>> = OnceLock::new();

fn registry() -> &'static HashMap<ConsistencyCode, Box<str>> {
    NAMES.get_or_init(|| {
        let mut names: HashMap<ConsistencyCode, Box<str>> = DRIVER_KEYS
            .iter()
            .map(|(key, code)| (*code, key.to_uppercase().into_boxed_str()))
            .collect();
        for (code, name) in CANONICAL_OVERRIDES {
            names.insert(*code, (*name).into());
        }
        names
    })
}

/// Canonical name for a consistency code.
///
/// `None` passes through as `Ok(None)`. A code with no registered name is
/// [`ProtocolError::UnknownConsistencyLevel`].
pub fn name_of(code: Option<ConsistencyCode>) -> Result<Option<&'static str>> {
    code.map(name_for).transpose()
}

/// Canonical name for a code that is known to be present.
pub fn name_for(code: ConsistencyCode) -> Result<&'static str> {
    registry()
        .get(&code)
        .map(|name| &**name)
        .ok_or(ProtocolError::UnknownConsistencyLevel { code })
}

/// Reverse lookup: code for a canonical name, ignoring ASCII case.
pub fn code_of(name: &str) -> Option<ConsistencyCode> {
    registry()
        .iter()
        .find(|(_, candidate)| candidate.eq_ignore_ascii_case(name))
        .map(|(code, _)| *code)
}

/// All registered levels ordered by code.
pub fn entries() -> Vec<(ConsistencyCode, &'static str)> {
    let mut entries: Vec<_> = registry()
        .iter()
        .map(|(code, name)| (*code, &**name))
        .collect();
    entries.sort_by_key(|(code, _)| *code);
    entries
}
