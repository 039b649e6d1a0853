//! Method descriptors
//!
//! The declarative contract of one API operation: HTTP verb, path template,
//! parameter schema, and request/response model names. Descriptors are
//! deserialized from the embedded service tables and never mutated.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the parameter that carries the request body
pub const BODY_PARAMETER: &str = "postBody";

/// HTTP verb of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Where a parameter value goes in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Path,
    Query,
    Body,
}

/// Declared value type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Integer,
    Boolean,
    /// A JSON document, only valid for the body parameter
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::String => "string",
            ValueType::Integer => "integer",
            ValueType::Boolean => "boolean",
            ValueType::Object => "object",
        };
        f.write_str(name)
    }
}

/// Schema of one named parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub location: Location,
    #[serde(rename = "type")]
    pub value_type: ValueType,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    /// Repeated parameters accept a list and are sent as repeated pairs
    #[serde(default, skip_serializing_if = "is_false")]
    pub repeated: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ParameterSpec {
    pub fn path() -> Self {
        Self {
            location: Location::Path,
            value_type: ValueType::String,
            required: true,
            repeated: false,
        }
    }

    pub fn query(value_type: ValueType) -> Self {
        Self {
            location: Location::Query,
            value_type,
            required: false,
            repeated: false,
        }
    }

    pub fn body() -> Self {
        Self {
            location: Location::Body,
            value_type: ValueType::Object,
            required: true,
            repeated: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }

    /// Human readable type, used in validation errors
    pub fn describe_type(&self) -> String {
        if self.repeated {
            format!("list of {}", self.value_type)
        } else {
            self.value_type.to_string()
        }
    }
}

/// One `{name}` or `{+name}` placeholder in a path template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub name: &'a str,
    /// `{+name}`: reserved expansion, `/` is kept literal
    pub reserved: bool,
}

/// Segment of a parsed path template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment<'a> {
    Literal(&'a str),
    Variable(Placeholder<'a>),
}

/// Split a path template into literals and placeholders.
///
/// An unterminated `{` is kept as literal text; it will surface as an
/// unresolved placeholder when the URL is built.
pub fn parse_template(template: &str) -> Vec<TemplateSegment<'_>> {
    let mut segments = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let close = open + close;

        if open > 0 {
            segments.push(TemplateSegment::Literal(&rest[..open]));
        }

        let inner = &rest[open + 1..close];
        let (name, reserved) = match inner.strip_prefix('+') {
            Some(name) => (name, true),
            None => (inner, false),
        };
        segments.push(TemplateSegment::Variable(Placeholder { name, reserved }));
        rest = &rest[close + 1..];
    }

    if !rest.is_empty() {
        segments.push(TemplateSegment::Literal(rest));
    }

    segments
}

/// Declarative contract of one API method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    pub http_method: HttpMethod,
    pub path: String,
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterSpec>,
    /// Model name of the request body, if the method takes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
    /// Model name of the response, `None` for void methods
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

/// Contract defect found while checking a descriptor
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct DescriptorDefect(pub String);

impl MethodDescriptor {
    pub fn new(http_method: HttpMethod, path: &str) -> Self {
        Self {
            http_method,
            path: path.to_string(),
            parameters: IndexMap::new(),
            request: None,
            response: None,
        }
    }

    pub fn param(mut self, name: &str, spec: ParameterSpec) -> Self {
        self.parameters.insert(name.to_string(), spec);
        self
    }

    pub fn request_model(mut self, model: &str) -> Self {
        self.request = Some(model.to_string());
        self
    }

    pub fn response_model(mut self, model: &str) -> Self {
        self.response = Some(model.to_string());
        self
    }

    /// Placeholders of the path template, in order of appearance
    pub fn placeholders(&self) -> Vec<Placeholder<'_>> {
        parse_template(&self.path)
            .into_iter()
            .filter_map(|segment| match segment {
                TemplateSegment::Variable(p) => Some(p),
                TemplateSegment::Literal(_) => None,
            })
            .collect()
    }

    /// Names of the required parameters, in declaration order
    pub fn required_parameters(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|(_, spec)| spec.required)
            .map(|(name, _)| name.as_str())
    }

    /// The body parameter spec, if the method takes a body
    pub fn body_parameter(&self) -> Option<(&str, &ParameterSpec)> {
        self.parameters
            .iter()
            .find(|(_, spec)| spec.location == Location::Body)
            .map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn returns_value(&self) -> bool {
        self.response.is_some()
    }

    /// Check the descriptor's structural invariants.
    ///
    /// Every placeholder needs a required path parameter, every path
    /// parameter must appear in the template once and unrepeated, and at
    /// most one body parameter may exist, typed `object`.
    pub fn validate(&self) -> Result<(), DescriptorDefect> {
        let placeholders = self.placeholders();

        for placeholder in &placeholders {
            match self.parameters.get(placeholder.name) {
                Some(spec) if spec.location == Location::Path && spec.required => {},
                Some(_) => {
                    return Err(DescriptorDefect(format!(
                        "placeholder {{{}}} in '{}' must map to a required path parameter",
                        placeholder.name, self.path
                    )))
                }
                None => {
                    return Err(DescriptorDefect(format!(
                        "placeholder {{{}}} in '{}' has no parameter",
                        placeholder.name, self.path
                    )))
                }
            }
        }

        for (name, spec) in &self.parameters {
            if spec.location == Location::Path && !placeholders.iter().any(|p| p.name == name) {
                return Err(DescriptorDefect(format!(
                    "path parameter '{}' does not appear in '{}'",
                    name, self.path
                )));
            }
            if spec.location == Location::Path && spec.repeated {
                return Err(DescriptorDefect(format!(
                    "path parameter '{}' cannot be repeated",
                    name
                )));
            }
            if spec.location == Location::Body && (spec.value_type != ValueType::Object || spec.repeated) {
                return Err(DescriptorDefect(format!(
                    "body parameter '{}' must be a single object",
                    name
                )));
            }
            if spec.value_type == ValueType::Object && spec.location != Location::Body {
                return Err(DescriptorDefect(format!(
                    "parameter '{}' has type object outside the body",
                    name
                )));
            }
        }

        let bodies = self
            .parameters
            .values()
            .filter(|spec| spec.location == Location::Body)
            .count();
        if bodies > 1 {
            return Err(DescriptorDefect(format!(
                "'{}' declares {} body parameters",
                self.path, bodies
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_template_splits_literals_and_variables() {
        let segments = parse_template("calendars/{calendarId}/events/{eventId}");
        assert_eq!(
            segments,
            vec![
                TemplateSegment::Literal("calendars/"),
                TemplateSegment::Variable(Placeholder {
                    name: "calendarId",
                    reserved: false
                }),
                TemplateSegment::Literal("/events/"),
                TemplateSegment::Variable(Placeholder {
                    name: "eventId",
                    reserved: false
                }),
            ]
        );
    }

    #[test]
    fn test_parse_template_reserved_expansion() {
        let segments = parse_template("v1/{+name}:cancel");
        assert_eq!(
            segments,
            vec![
                TemplateSegment::Literal("v1/"),
                TemplateSegment::Variable(Placeholder {
                    name: "name",
                    reserved: true
                }),
                TemplateSegment::Literal(":cancel"),
            ]
        );
    }

    #[test]
    fn test_parse_template_leading_placeholder() {
        let descriptor = MethodDescriptor::new(HttpMethod::Post, "{packageName}/edits/{editId}:commit")
            .param("packageName", ParameterSpec::path())
            .param("editId", ParameterSpec::path());
        let names: Vec<&str> = descriptor.placeholders().iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["packageName", "editId"]);
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn test_deserialize_from_table_shape() {
        let json = r#"{
            "path": "calendars/{calendarId}/events/{eventId}",
            "httpMethod": "DELETE",
            "parameters": {
                "calendarId": {"location": "path", "type": "string", "required": true},
                "eventId": {"location": "path", "type": "string", "required": true},
                "sendNotifications": {"location": "query", "type": "boolean"}
            }
        }"#;
        let descriptor: MethodDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.http_method, HttpMethod::Delete);
        assert_eq!(descriptor.response, None);
        assert!(!descriptor.returns_value());
        let names: Vec<&str> = descriptor.parameters.keys().map(|k| k.as_str()).collect();
        assert_eq!(names, vec!["calendarId", "eventId", "sendNotifications"]);
        assert!(descriptor.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_placeholder_without_parameter() {
        let descriptor = MethodDescriptor::new(HttpMethod::Get, "files/{fileId}");
        let err = descriptor.validate().unwrap_err();
        assert!(err.0.contains("fileId"));
    }

    #[test]
    fn test_validate_rejects_optional_path_parameter() {
        let mut spec = ParameterSpec::path();
        spec.required = false;
        let descriptor = MethodDescriptor::new(HttpMethod::Get, "files/{fileId}").param("fileId", spec);
        assert!(descriptor.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_orphan_path_parameter() {
        let descriptor = MethodDescriptor::new(HttpMethod::Get, "files")
            .param("fileId", ParameterSpec::path());
        assert!(descriptor.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_two_bodies() {
        let descriptor = MethodDescriptor::new(HttpMethod::Post, "files")
            .param("postBody", ParameterSpec::body())
            .param("other", ParameterSpec::body());
        assert!(descriptor.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_body_that_is_not_one_object() {
        let mut string_body = ParameterSpec::body();
        string_body.value_type = ValueType::String;
        let descriptor = MethodDescriptor::new(HttpMethod::Post, "notes").param("postBody", string_body);
        assert!(descriptor.validate().unwrap_err().0.contains("postBody"));

        let descriptor =
            MethodDescriptor::new(HttpMethod::Post, "notes").param("postBody", ParameterSpec::body().repeated());
        assert!(descriptor.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_repeated_path_parameter() {
        let descriptor = MethodDescriptor::new(HttpMethod::Get, "files/{fileId}")
            .param("fileId", ParameterSpec::path().repeated());
        assert!(descriptor.validate().unwrap_err().0.contains("fileId"));
    }

    #[test]
    fn test_required_parameters_in_declaration_order() {
        let descriptor = MethodDescriptor::new(HttpMethod::Post, "calendars/{calendarId}/events/{eventId}/move")
            .param("calendarId", ParameterSpec::path())
            .param("eventId", ParameterSpec::path())
            .param("destination", ParameterSpec::query(ValueType::String).required())
            .param("sendNotifications", ParameterSpec::query(ValueType::Boolean));
        let required: Vec<&str> = descriptor.required_parameters().collect();
        assert_eq!(required, vec!["calendarId", "eventId", "destination"]);
    }

    #[test]
    fn test_describe_type() {
        assert_eq!(ParameterSpec::query(ValueType::String).repeated().describe_type(), "list of string");
        assert_eq!(ParameterSpec::query(ValueType::Integer).describe_type(), "integer");
    }
}
