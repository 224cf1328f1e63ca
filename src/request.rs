//! # Request Context
//!
//! The inbound collaborator the compiler reads filter values, pagination and
//! sort parameters from. Web frameworks adapt their request type to
//! [`RequestContext`]; [`RequestData`] is an owned implementation suitable for
//! tests and non-HTTP callers.

use std::collections::BTreeMap;

/// A request parameter value: a scalar or an ordered set of strings
/// (`key[]=a&key[]=b` style input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Single(String),
    Multi(Vec<String>),
}

impl ParamValue {
    pub fn is_empty(&self) -> bool {
        match self {
            ParamValue::Single(value) => value.is_empty(),
            ParamValue::Multi(items) => items.is_empty(),
        }
    }

    /// Whether a scalar value parses as a number
    pub fn is_numeric(&self) -> bool {
        match self {
            ParamValue::Single(value) => is_numeric_str(value),
            ParamValue::Multi(_) => false,
        }
    }

    /// Whether this value activates a filter: non-empty, or numeric.
    /// The numeric clause keeps the literal `0` activating even though it is
    /// falsy under general truthiness rules.
    pub fn activates(&self) -> bool {
        !self.is_empty() || self.is_numeric()
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            ParamValue::Single(value) => Some(value),
            ParamValue::Multi(_) => None,
        }
    }

    /// The value as a list: a scalar becomes a one-element slice
    pub fn items(&self) -> Vec<&str> {
        match self {
            ParamValue::Single(value) => vec![value.as_str()],
            ParamValue::Multi(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

/// Numeric in the loose interpolation sense: anything that parses as f64
pub(crate) fn is_numeric_str(value: &str) -> bool {
    !value.trim().is_empty() && value.trim().parse::<f64>().is_ok()
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Single(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Single(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(items: Vec<&str>) -> Self {
        ParamValue::Multi(items.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::Multi(items)
    }
}

/// Read access to the current request's parameters and location
pub trait RequestContext: Send + Sync {
    /// Parameter value by name, if present
    fn get(&self, name: &str) -> Option<ParamValue>;

    /// Whether the parameter key is present
    fn has(&self, name: &str) -> bool;

    /// Alias of [`has`](Self::has); kept separate so adapters can distinguish
    /// key presence from non-empty values if their framework does
    fn exists(&self, name: &str) -> bool {
        self.has(name)
    }

    /// All parameters of the request
    fn all(&self) -> BTreeMap<String, ParamValue>;

    /// Request path without scheme/host or query string, e.g. `admin/users`
    fn path(&self) -> String;

    /// Request URL without the query string
    fn url(&self) -> String;

    /// Normalize a raw query string: drop empty segments, sort by key
    fn normalize_query_string(&self, raw: &str) -> String {
        let mut segments: Vec<&str> = raw.split('&').filter(|s| !s.is_empty()).collect();
        segments.sort_unstable();
        segments.join("&")
    }
}

/// Owned, in-memory request representation
#[derive(Debug, Clone, Default)]
pub struct RequestData {
    path: String,
    url: String,
    params: BTreeMap<String, ParamValue>,
}

impl RequestData {
    pub fn new(path: &str) -> Self {
        let path = path.trim_start_matches('/').to_string();
        let url = format!("/{path}");
        Self {
            path,
            url,
            params: BTreeMap::new(),
        }
    }

    /// Override the URL reported for this request
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    pub fn with_param(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }
}

impl RequestContext for RequestData {
    fn get(&self, name: &str) -> Option<ParamValue> {
        self.params.get(name).cloned()
    }

    fn has(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    fn all(&self) -> BTreeMap<String, ParamValue> {
        self.params.clone()
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn url(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_activates_but_empty_does_not() {
        assert!(ParamValue::from("0").activates());
        assert!(ParamValue::from("abc").activates());
        assert!(!ParamValue::from("").activates());
        assert!(!ParamValue::Multi(vec![]).activates());
        assert!(ParamValue::from(vec!["a"]).activates());
    }

    #[test]
    fn test_numeric_detection() {
        assert!(ParamValue::from("0").is_numeric());
        assert!(ParamValue::from("12.5").is_numeric());
        assert!(!ParamValue::from("12abc").is_numeric());
        assert!(!ParamValue::from(vec!["1"]).is_numeric());
    }

    #[test]
    fn test_request_data_accessors() {
        let request = RequestData::new("/admin/users").with_param("page", "3");

        assert_eq!(request.path(), "admin/users");
        assert_eq!(request.url(), "/admin/users");
        assert!(request.has("page"));
        assert!(!request.has("rpp"));
        assert_eq!(request.get("page"), Some(ParamValue::from("3")));
    }

    #[test]
    fn test_normalize_query_string_sorts_and_drops_empty_segments() {
        let request = RequestData::new("users");
        let normalized = request.normalize_query_string("b=2&&a=1");
        assert_eq!(normalized, "a=1&b=2");
    }
}
