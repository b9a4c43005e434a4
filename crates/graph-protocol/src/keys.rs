//! Custom payload keys understood by graph-capable servers.
//!
//! Keys are case-sensitive.

/// Query language, e.g. `gremlin-groovy`.
pub const GRAPH_LANGUAGE: &str = "graph-language";

/// Traversal source, e.g. `g`.
pub const GRAPH_SOURCE: &str = "graph-source";

/// Target graph name.
pub const GRAPH_NAME: &str = "graph-name";

/// Canonical name of the read consistency level.
pub const GRAPH_READ_CONSISTENCY: &str = "graph-read-consistency";

/// Canonical name of the write consistency level.
pub const GRAPH_WRITE_CONSISTENCY: &str = "graph-write-consistency";

/// Server-side timeout in milliseconds, big-endian i64.
pub const REQUEST_TIMEOUT: &str = "request-timeout";

/// Identity on whose behalf the query runs.
pub const PROXY_EXECUTE: &str = "ProxyExecute";

/// All keys this crate knows about, in wire-table order.
pub const ALL: &[&str] = &[
    GRAPH_LANGUAGE,
    GRAPH_SOURCE,
    GRAPH_NAME,
    GRAPH_READ_CONSISTENCY,
    GRAPH_WRITE_CONSISTENCY,
    REQUEST_TIMEOUT,
    PROXY_EXECUTE,
];
