//! Retry policy seam
//!
//! Retry execution belongs to the request pipeline. Option resolution only
//! selects which policy applies, so policies are shared as trait objects
//! and compared by identity.

use std::fmt;
use std::sync::Arc;

/// A retry policy the request pipeline can execute.
pub trait RetryPolicy: fmt::Debug + Send + Sync {
    /// Stable name used in configuration and diagnostics.
    fn name(&self) -> &str;
}

/// Shared handle to a retry policy.
pub type RetryPolicyRef = Arc<dyn RetryPolicy>;

/// Retries idempotent failures with the driver's standard rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRetryPolicy;

impl RetryPolicy for DefaultRetryPolicy {
    fn name(&self) -> &str {
        "default"
    }
}

/// Never retries; errors are handed straight back to the caller.
///
/// This is the usual choice for graph statements, which are not idempotent
/// in general.
#[derive(Debug, Default, Clone, Copy)]
pub struct FallthroughRetryPolicy;

impl RetryPolicy for FallthroughRetryPolicy {
    fn name(&self) -> &str {
        "fallthrough"
    }
}

/// Look up a built-in policy by name.
pub fn policy_by_name(name: &str) -> Option<RetryPolicyRef> {
    match name {
        "default" => Some(Arc::new(DefaultRetryPolicy)),
        "fallthrough" => Some(Arc::new(FallthroughRetryPolicy)),
        _ => None,
    }
}

/// True when both handles point at the same policy instance.
pub fn same_policy(a: Option<&RetryPolicyRef>, b: Option<&RetryPolicyRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}
