//! Named job arguments.

use std::collections::BTreeMap;

// Argument keys are caller-supplied constants shared between the job
// declarations and the (external) routing layer.
pub const ARG_NEW_USER_NAME: &str = "new-user-name";
pub const ARG_NEW_PASSWORD: &str = "new-password";
pub const ARG_NEW_EMAIL: &str = "new-email";
pub const ARG_NEW_ACCESS_RANK: &str = "new-access-rank";
pub const ARG_SOURCE_TAG_NAME: &str = "source-tag-name";
pub const ARG_TARGET_TAG_NAME: &str = "target-tag-name";

/// One argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Bool(bool),
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Str(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::Str(v)
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        ArgValue::Int(v)
    }
}

impl From<bool> for ArgValue {
    fn from(v: bool) -> Self {
        ArgValue::Bool(v)
    }
}

/// Immutable mapping from argument key to value.
///
/// Built by the caller, then only read: jobs receive shared access for
/// the duration of one dispatcher invocation. Keys a job does not
/// declare are simply ignored.
#[derive(Debug, Clone, Default)]
pub struct ArgumentSet {
    values: BTreeMap<String, ArgValue>,
}

impl ArgumentSet {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an argument, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// True when the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// String value of the key, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(ArgValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integer value of the key, if present and an integer.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.values.get(key) {
            Some(ArgValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    /// Boolean value of the key, if present and a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.values.get(key) {
            Some(ArgValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Number of arguments in the set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the set holds no arguments.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_getters() {
        let args = ArgumentSet::new()
            .with(ARG_NEW_USER_NAME, "dummy")
            .with("page", 3i64)
            .with("safe-only", true);

        assert_eq!(args.len(), 3);
        assert!(args.contains(ARG_NEW_USER_NAME));
        assert_eq!(args.get_str(ARG_NEW_USER_NAME), Some("dummy"));
        assert_eq!(args.get_int("page"), Some(3));
        assert_eq!(args.get_bool("safe-only"), Some(true));
    }

    #[test]
    fn test_typed_getters_do_not_coerce() {
        let args = ArgumentSet::new().with("page", 3i64);
        assert_eq!(args.get_str("page"), None);
        assert_eq!(args.get_bool("page"), None);
        assert_eq!(args.get_int("missing"), None);
    }

    #[test]
    fn test_later_value_wins() {
        let args = ArgumentSet::new()
            .with(ARG_NEW_PASSWORD, "first")
            .with(ARG_NEW_PASSWORD, "second");
        assert_eq!(args.get_str(ARG_NEW_PASSWORD), Some("second"));
        assert_eq!(args.len(), 1);
    }
}
