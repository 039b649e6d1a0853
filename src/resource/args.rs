//! Invocation arguments
//!
//! Caller-supplied parameter values. Required arguments are inserted first,
//! then the optional-parameter map is overlaid on top of them.

use super::descriptor::{ParameterSpec, ValueType};
use crate::error::{InvokeError, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// A single parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    List(Vec<String>),
    /// Request body
    Json(Value),
}

impl ParamValue {
    /// Serialize a model as a body value
    pub fn body<T: Serialize>(model: &T) -> Result<Self> {
        serde_json::to_value(model)
            .map(ParamValue::Json)
            .map_err(InvokeError::Encode)
    }

    /// Check the value against its declared spec and normalize it.
    ///
    /// Integers and booleans may arrive as strings (from the command line),
    /// a single string is accepted for a repeated parameter.
    pub fn coerce(self, name: &str, spec: &ParameterSpec) -> Result<Self> {
        let invalid = || InvokeError::InvalidParameter {
            name: name.to_string(),
            expected: spec.describe_type(),
        };

        if spec.repeated {
            return match self {
                ParamValue::List(items) => Ok(ParamValue::List(items)),
                ParamValue::String(s) => Ok(ParamValue::List(vec![s])),
                _ => Err(invalid()),
            };
        }

        match (spec.value_type, self) {
            (ValueType::String, ParamValue::String(s)) => Ok(ParamValue::String(s)),
            (ValueType::Integer, ParamValue::Integer(n)) => Ok(ParamValue::Integer(n)),
            (ValueType::Integer, ParamValue::String(s)) => {
                s.trim().parse().map(ParamValue::Integer).map_err(|_| invalid())
            }
            (ValueType::Boolean, ParamValue::Boolean(b)) => Ok(ParamValue::Boolean(b)),
            (ValueType::Boolean, ParamValue::String(s)) => match s.as_str() {
                "true" => Ok(ParamValue::Boolean(true)),
                "false" => Ok(ParamValue::Boolean(false)),
                _ => Err(invalid()),
            },
            (ValueType::Object, ParamValue::Json(v)) => Ok(ParamValue::Json(v)),
            (ValueType::Object, ParamValue::String(s)) => {
                serde_json::from_str(&s).map(ParamValue::Json).map_err(|_| invalid())
            }
            _ => Err(invalid()),
        }
    }

    /// Values as they appear in a URL, one per repeated pair
    pub fn to_query_values(&self) -> Vec<String> {
        match self {
            ParamValue::String(s) => vec![s.clone()],
            ParamValue::Integer(n) => vec![n.to_string()],
            ParamValue::Boolean(b) => vec![b.to_string()],
            ParamValue::List(items) => items.clone(),
            ParamValue::Json(v) => vec![v.to_string()],
        }
    }

    /// Single value as it appears in a path segment
    pub fn to_path_value(&self) -> String {
        match self {
            ParamValue::String(s) => s.clone(),
            ParamValue::Integer(n) => n.to_string(),
            ParamValue::Boolean(b) => b.to_string(),
            ParamValue::List(items) => items.join(","),
            ParamValue::Json(v) => v.to_string(),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::String(value.clone())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Integer(value.into())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Boolean(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::List(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::List(value.into_iter().map(String::from).collect())
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Json(value)
    }
}

/// Optional parameters, keyed by their API name
pub type OptParams = IndexMap<String, ParamValue>;

/// Build an [`OptParams`] map from `name => value` pairs
#[macro_export]
macro_rules! opt_params {
    () => { $crate::resource::OptParams::new() };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut params = $crate::resource::OptParams::new();
        $( params.insert(($name).to_string(), $crate::resource::ParamValue::from($value)); )+
        params
    }};
}

/// Ordered name to value mapping handed to the invoker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvocationArgs {
    values: IndexMap<String, ParamValue>,
}

impl InvocationArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, replacing any previous value for the same name
    pub fn with(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ParamValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Attach a serialized model as the request body
    pub fn with_body<T: Serialize>(mut self, model: &T) -> Result<Self> {
        self.values.insert(
            super::descriptor::BODY_PARAMETER.to_string(),
            ParamValue::body(model)?,
        );
        Ok(self)
    }

    /// Overlay optional parameters. Later entries win, but a key is never
    /// removed, so required entries supplied first stay present.
    pub fn merge(mut self, opt_params: OptParams) -> Self {
        for (name, value) in opt_params {
            self.values.insert(name, value);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn into_inner(self) -> IndexMap<String, ParamValue> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::descriptor::ParameterSpec;

    #[test]
    fn test_merge_overlays_without_dropping_required() {
        let args = InvocationArgs::new()
            .with("calendarId", "primary")
            .merge(crate::opt_params! {
                "maxResults" => 10,
                "calendarId" => "other",
            });

        assert_eq!(args.len(), 2);
        assert_eq!(args.get("calendarId"), Some(&ParamValue::from("other")));
        assert_eq!(args.get("maxResults"), Some(&ParamValue::Integer(10)));
    }

    #[test]
    fn test_merge_keeps_insertion_order() {
        let args = InvocationArgs::new()
            .with("b", "1")
            .with("a", "2")
            .merge(crate::opt_params! { "c" => "3" });
        let names: Vec<&str> = args.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_coerce_integer_from_string() {
        let spec = ParameterSpec::query(ValueType::Integer);
        let value = ParamValue::from("25").coerce("maxResults", &spec).unwrap();
        assert_eq!(value, ParamValue::Integer(25));
    }

    #[test]
    fn test_coerce_rejects_bad_integer() {
        let spec = ParameterSpec::query(ValueType::Integer);
        let err = ParamValue::from("many").coerce("maxResults", &spec).unwrap_err();
        assert!(matches!(err, InvokeError::InvalidParameter { ref name, .. } if name == "maxResults"));
    }

    #[test]
    fn test_coerce_boolean_from_string() {
        let spec = ParameterSpec::query(ValueType::Boolean);
        assert_eq!(
            ParamValue::from("true").coerce("showDeleted", &spec).unwrap(),
            ParamValue::Boolean(true)
        );
        assert!(ParamValue::from("yes").coerce("showDeleted", &spec).is_err());
    }

    #[test]
    fn test_coerce_single_string_into_repeated() {
        let spec = ParameterSpec::query(ValueType::String).repeated();
        let value = ParamValue::from("x").coerce("tags", &spec).unwrap();
        assert_eq!(value, ParamValue::List(vec!["x".to_string()]));
    }

    #[test]
    fn test_coerce_rejects_list_for_scalar() {
        let spec = ParameterSpec::query(ValueType::String);
        assert!(ParamValue::from(vec!["a", "b"]).coerce("q", &spec).is_err());
    }

    #[test]
    fn test_query_values_preserve_list_order() {
        let value = ParamValue::from(vec!["y", "x", "z"]);
        assert_eq!(value.to_query_values(), vec!["y", "x", "z"]);
    }

    #[test]
    fn test_with_body_uses_body_parameter_name() {
        let args = InvocationArgs::new()
            .with_body(&serde_json::json!({"summary": "Standup"}))
            .unwrap();
        assert!(args.contains("postBody"));
    }
}
