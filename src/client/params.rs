//! Request parameter encoding
//!
//! Every outgoing request carries a set of named parameters. A value is
//! either a scalar or an ordered list, so the GET and POST encoders can
//! branch exhaustively instead of inspecting types at runtime. Insertion
//! order is preserved; inserting an existing key replaces its value in
//! place.

use urlencoding::encode;

/// A single parameter value: a scalar string form, or an ordered list.
///
/// Lists may nest; the POST encoder stringifies nested elements
/// depth-first, while the GET encoder emits one `key[]=` pair per leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<ParamValue>),
}

impl ParamValue {
    /// Scalar string form of this value. Lists collapse to a
    /// comma-separated string, matching how the remote service treats a
    /// list where a scalar is expected.
    pub fn scalar_lossy(&self) -> String {
        match self {
            ParamValue::Scalar(v) => v.clone(),
            ParamValue::List(items) => items
                .iter()
                .map(ParamValue::scalar_lossy)
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    fn append_query(&self, key: &str, out: &mut String) {
        match self {
            ParamValue::Scalar(v) => {
                out.push_str(key);
                out.push('=');
                out.push_str(&encode(v));
                out.push('&');
            }
            ParamValue::List(items) => {
                let item_key = format!("{key}[]");
                for item in items {
                    match item {
                        ParamValue::Scalar(v) => {
                            out.push_str(&item_key);
                            out.push('=');
                            out.push_str(&encode(v));
                            out.push('&');
                        }
                        // nested lists flatten into the same key[]
                        ParamValue::List(_) => item.append_query(key, out),
                    }
                }
            }
        }
    }

    pub(crate) fn flatten_into(&self, key: &str, out: &mut Vec<(String, String)>) {
        match self {
            ParamValue::Scalar(v) => out.push((key.to_string(), v.clone())),
            ParamValue::List(items) => {
                for item in items {
                    item.flatten_into(key, out);
                }
            }
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        ParamValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Insertion-ordered parameter set for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(String, ParamValue)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, replacing any existing value under the same key
    /// without changing its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Builder-style `insert`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a value under `key`, promoting an existing scalar to a list.
    /// Used when a repeated CLI attribute becomes an array parameter.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, ParamValue::List(items))) => items.push(value),
            Some(entry) => {
                let existing = entry.1.clone();
                entry.1 = ParamValue::List(vec![existing, value]);
            }
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize as a GET query string.
    ///
    /// Always starts with `?` and leaves a trailing `&` after each pair,
    /// even with zero parameters. The remote API tolerates both; callers
    /// must not rely on the exact shape.
    pub fn query_string(&self) -> String {
        let mut out = String::from("?");
        for (key, value) in &self.0 {
            value.append_query(key, &mut out);
        }
        out
    }

    /// Flatten into stringified form fields for a POST body. Each list
    /// element becomes one field under the parent key, in order.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for (key, value) in &self.0 {
            value.flatten_into(key, &mut out);
        }
        out
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_string_keeps_question_mark() {
        assert_eq!(Params::new().query_string(), "?");
    }

    #[test]
    fn test_scalar_query_encoding() {
        let params = Params::new().with("name", "My test").with("count", 10i64);
        assert_eq!(params.query_string(), "?name=My%20test&count=10&");
    }

    #[test]
    fn test_array_query_encoding_preserves_order() {
        let params = Params::new().with("browsers", vec!["chrome", "firefox"]);
        assert_eq!(
            params.query_string(),
            "?browsers[]=chrome&browsers[]=firefox&"
        );
    }

    #[test]
    fn test_array_key_emits_no_bare_pair() {
        let params = Params::new().with("tags", vec!["a"]);
        let query = params.query_string();
        assert!(query.contains("tags[]=a"));
        assert!(!query.contains("tags="));
    }

    #[test]
    fn test_query_percent_encodes_values() {
        let params = Params::new().with("url", "https://example.com/?a=1&b=2");
        assert_eq!(
            params.query_string(),
            "?url=https%3A%2F%2Fexample.com%2F%3Fa%3D1%26b%3D2&"
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = Params::new().with("a", "1").with("b", "2");
        params.insert("a", "override");
        assert_eq!(params.query_string(), "?a=override&b=2&");
    }

    #[test]
    fn test_append_promotes_scalar_to_list() {
        let mut params = Params::new();
        params.append("browsers", "chrome");
        assert_eq!(params.get("browsers"), Some(&ParamValue::Scalar("chrome".into())));

        params.append("browsers", "firefox");
        assert_eq!(
            params.get("browsers"),
            Some(&ParamValue::List(vec![
                ParamValue::Scalar("chrome".into()),
                ParamValue::Scalar("firefox".into()),
            ]))
        );
    }

    #[test]
    fn test_form_fields_stringify_scalars() {
        let params = Params::new()
            .with("name", "My test")
            .with("wait", true)
            .with("count", 3i64);
        assert_eq!(
            params.form_fields(),
            vec![
                ("name".to_string(), "My test".to_string()),
                ("wait".to_string(), "true".to_string()),
                ("count".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_form_fields_flatten_nested_lists_in_order() {
        let params = Params::new().with(
            "matrix",
            ParamValue::List(vec![
                ParamValue::List(vec!["a".into(), "b".into()]),
                ParamValue::Scalar("c".into()),
            ]),
        );
        assert_eq!(
            params.form_fields(),
            vec![
                ("matrix".to_string(), "a".to_string()),
                ("matrix".to_string(), "b".to_string()),
                ("matrix".to_string(), "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_scalar_lossy_joins_lists() {
        let value = ParamValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(value.scalar_lossy(), "a,b");
    }

    #[test]
    fn test_remove_returns_value() {
        let mut params = Params::new().with("a", "1");
        assert_eq!(params.remove("a"), Some(ParamValue::Scalar("1".into())));
        assert!(params.is_empty());
        assert_eq!(params.remove("a"), None);
    }
}
