//! Tri-state per-call option values.

/// A per-call override for one option.
///
/// - `Unset`: inherit whatever the execution profile supplies.
/// - `Suppressed`: omit the option entirely, even if a default exists.
/// - `Value(v)`: override with `v`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Setting<T> {
    #[default]
    Unset,
    Suppressed,
    Value(T),
}

impl<T> Setting<T> {
    /// True when the caller left this option alone.
    pub fn is_unset(&self) -> bool {
        matches!(self, Setting::Unset)
    }

    /// True when the caller supplied either a value or a suppression.
    pub fn is_supplied(&self) -> bool {
        !self.is_unset()
    }

    pub fn as_ref(&self) -> Setting<&T> {
        match self {
            Setting::Unset => Setting::Unset,
            Setting::Suppressed => Setting::Suppressed,
            Setting::Value(v) => Setting::Value(v),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Setting<U> {
        match self {
            Setting::Unset => Setting::Unset,
            Setting::Suppressed => Setting::Suppressed,
            Setting::Value(v) => Setting::Value(f(v)),
        }
    }

    /// Like [`Setting::map`] for fallible conversions.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Setting<U>, E> {
        Ok(match self {
            Setting::Unset => Setting::Unset,
            Setting::Suppressed => Setting::Suppressed,
            Setting::Value(v) => Setting::Value(f(v)?),
        })
    }

    /// Resolve against an inherited default: `Unset` takes `default`,
    /// `Suppressed` yields `None`.
    pub fn or_inherit(self, default: Option<T>) -> Option<T> {
        match self {
            Setting::Unset => default,
            Setting::Suppressed => None,
            Setting::Value(v) => Some(v),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Setting::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<T> From<T> for Setting<T> {
    fn from(value: T) -> Self {
        Setting::Value(value)
    }
}
