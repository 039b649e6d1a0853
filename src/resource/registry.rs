//! Service Registry - Load API descriptor tables from JSON
//!
//! The embedded tables are compiled into the binary and checked once on
//! first access. Extra services can be loaded from JSON or YAML files.

use super::descriptor::{DescriptorDefect, MethodDescriptor};
use crate::error::InvokeError;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Embedded service tables (compiled into the binary)
const SERVICE_FILES: &[&str] = &[
    include_str!("../resources/androidpublisher.json"),
    include_str!("../resources/calendar.json"),
    include_str!("../resources/cloudtrace.json"),
    include_str!("../resources/drive.json"),
    include_str!("../resources/fusiontables.json"),
];

/// A named group of methods sharing a URL prefix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceDef {
    #[serde(default)]
    pub methods: IndexMap<String, MethodDescriptor>,
}

/// One API service: base URL, scopes and resources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDef {
    pub name: String,
    pub version: String,
    pub root_url: String,
    #[serde(default)]
    pub service_path: String,
    /// OAuth scope URL to description
    #[serde(default)]
    pub scopes: IndexMap<String, String>,
    #[serde(default)]
    pub resources: IndexMap<String, ResourceDef>,
}

impl ServiceDef {
    pub fn new(name: &str, root_url: &str, service_path: &str) -> Self {
        Self {
            name: name.to_string(),
            version: String::new(),
            root_url: root_url.to_string(),
            service_path: service_path.to_string(),
            scopes: IndexMap::new(),
            resources: IndexMap::new(),
        }
    }

    /// Add a method, creating its resource on first use
    pub fn with_method(mut self, resource: &str, method: &str, descriptor: MethodDescriptor) -> Self {
        self.resources
            .entry(resource.to_string())
            .or_default()
            .methods
            .insert(method.to_string(), descriptor);
        self
    }

    /// `root_url` joined with `service_path`, ending in `/`
    pub fn base_url(&self) -> String {
        join_base(&self.root_url, &self.service_path)
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceDef> {
        self.resources.get(name)
    }

    pub fn method(&self, resource: &str, method: &str) -> Option<&MethodDescriptor> {
        self.resources.get(resource)?.methods.get(method)
    }

    /// Look up a method, failing with [`InvokeError::UnknownMethod`]
    pub fn require_method(&self, resource: &str, method: &str) -> crate::error::Result<&MethodDescriptor> {
        self.method(resource, method)
            .ok_or_else(|| InvokeError::UnknownMethod {
                service: self.name.clone(),
                resource: resource.to_string(),
                method: method.to_string(),
            })
    }

    pub fn scope_urls(&self) -> Vec<String> {
        self.scopes.keys().cloned().collect()
    }

    /// Check every descriptor of the service
    pub fn validate(&self) -> std::result::Result<(), DescriptorDefect> {
        for (resource_name, resource) in &self.resources {
            for (method_name, descriptor) in &resource.methods {
                descriptor.validate().map_err(|defect| {
                    DescriptorDefect(format!(
                        "{}.{}.{}: {}",
                        self.name, resource_name, method_name, defect
                    ))
                })?;
            }
        }
        Ok(())
    }

    pub fn method_count(&self) -> usize {
        self.resources.values().map(|r| r.methods.len()).sum()
    }
}

/// Join a root URL and a service path with exactly one `/` between them
pub fn join_base(root_url: &str, service_path: &str) -> String {
    let root = root_url.trim_end_matches('/');
    let path = service_path.trim_matches('/');
    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}/", root, path)
    }
}

/// A set of services keyed by name
#[derive(Debug, Clone, Default)]
pub struct Registry {
    services: IndexMap<String, ServiceDef>,
}

impl Registry {
    /// Parse and validate the embedded tables
    fn load_embedded() -> Result<Self> {
        let mut registry = Self::default();
        for content in SERVICE_FILES {
            let service: ServiceDef =
                serde_json::from_str(content).context("Failed to parse embedded service JSON")?;
            registry.add(service)?;
        }
        Ok(registry)
    }

    /// Add a service after validating it; replaces a service of the same name
    pub fn add(&mut self, service: ServiceDef) -> Result<()> {
        service
            .validate()
            .with_context(|| format!("Invalid descriptor table for '{}'", service.name))?;
        if self.services.contains_key(&service.name) {
            tracing::info!("Replacing service '{}'", service.name);
        }
        self.services.insert(service.name.clone(), service);
        Ok(())
    }

    /// Load a service table from a `.json`, `.yaml` or `.yml` file
    pub fn load_file(&mut self, path: &Path) -> Result<&ServiceDef> {
        let service = load_service_file(path)?;
        let name = service.name.clone();
        self.add(service)?;
        self.services
            .get(&name)
            .with_context(|| format!("Service '{}' missing after load", name))
    }

    pub fn get(&self, name: &str) -> Option<&ServiceDef> {
        self.services.get(name)
    }

    pub fn services(&self) -> impl Iterator<Item = &ServiceDef> {
        self.services.values()
    }

    /// Find a method by service, resource and method name
    pub fn method(
        &self,
        service: &str,
        resource: &str,
        method: &str,
    ) -> crate::error::Result<(&ServiceDef, &MethodDescriptor)> {
        let unknown = || InvokeError::UnknownMethod {
            service: service.to_string(),
            resource: resource.to_string(),
            method: method.to_string(),
        };
        let service_def = self.services.get(service).ok_or_else(unknown)?;
        let descriptor = service_def.method(resource, method).ok_or_else(unknown)?;
        Ok((service_def, descriptor))
    }
}

/// Parse a service table file, choosing the format by extension
pub fn load_service_file(path: &Path) -> Result<ServiceDef> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read service table {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    let service: ServiceDef = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML service table {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON service table {}", path.display()))?
    };

    Ok(service)
}

/// Global registry loaded from the embedded tables
static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Get the embedded registry (parsed and validated on first access).
///
/// A defect in an embedded table is a build defect, so it panics.
pub fn get_registry() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        Registry::load_embedded()
            .unwrap_or_else(|e| panic!("Failed to load embedded service tables: {:#}", e))
    })
}

/// Get an embedded service by name
pub fn get_service(name: &str) -> Option<&'static ServiceDef> {
    get_registry().get(name)
}

/// Get an embedded service the crate itself ships
pub(crate) fn builtin_service(name: &str) -> &'static ServiceDef {
    get_service(name).unwrap_or_else(|| panic!("Embedded service table '{}' is missing", name))
}

/// Names of all embedded services
pub fn get_all_service_names() -> Vec<&'static str> {
    get_registry().services().map(|s| s.name.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::descriptor::{HttpMethod, Location, ParameterSpec, ValueType};

    #[test]
    fn test_registry_loads_successfully() {
        let names = get_all_service_names();
        assert_eq!(
            names,
            vec!["androidpublisher", "calendar", "cloudtrace", "drive", "fusiontables"]
        );
    }

    #[test]
    fn test_calendar_events_delete_descriptor() {
        let (service, descriptor) = get_registry()
            .method("calendar", "events", "delete")
            .unwrap();
        assert_eq!(service.base_url(), "https://www.googleapis.com/calendar/v3/");
        assert_eq!(descriptor.http_method, HttpMethod::Delete);
        assert_eq!(descriptor.path, "calendars/{calendarId}/events/{eventId}");
        assert_eq!(descriptor.response, None);
        assert_eq!(
            descriptor.parameters["sendNotifications"].location,
            Location::Query
        );
    }

    #[test]
    fn test_body_methods_declare_request_model() {
        let service = get_service("drive").unwrap();
        let descriptor = service.method("files", "insert").unwrap();
        assert_eq!(descriptor.request.as_deref(), Some("DriveFile"));
        assert_eq!(descriptor.response.as_deref(), Some("DriveFile"));
        let (name, spec) = descriptor.body_parameter().unwrap();
        assert_eq!(name, "postBody");
        assert!(spec.required);
    }

    #[test]
    fn test_repeated_parameters_are_loaded() {
        let descriptor = get_service("calendar")
            .unwrap()
            .method("events", "list")
            .unwrap();
        assert!(descriptor.parameters["privateExtendedProperty"].repeated);
        assert!(!descriptor.parameters["q"].repeated);
    }

    #[test]
    fn test_nested_resource_names() {
        let service = get_service("androidpublisher").unwrap();
        assert!(service.resource("edits.tracks").is_some());
        assert!(service.resource("purchases.subscriptions").is_some());
        assert_eq!(
            service.base_url(),
            "https://www.googleapis.com/androidpublisher/v2/applications/"
        );
    }

    #[test]
    fn test_cloudtrace_has_empty_service_path() {
        let service = get_service("cloudtrace").unwrap();
        assert_eq!(service.base_url(), "https://cloudtrace.googleapis.com/");
        assert!(service.scopes.contains_key("https://www.googleapis.com/auth/trace.readonly"));
    }

    #[test]
    fn test_unknown_method_error() {
        let err = get_registry()
            .method("calendar", "events", "explode")
            .unwrap_err();
        assert!(matches!(err, InvokeError::UnknownMethod { .. }));
        assert_eq!(err.to_string(), "unknown method: calendar.events.explode");
    }

    #[test]
    fn test_add_rejects_defective_table() {
        let service = ServiceDef::new("broken", "https://example.com/", "v1/").with_method(
            "things",
            "get",
            MethodDescriptor::new(HttpMethod::Get, "things/{thingId}"),
        );
        let mut registry = Registry::default();
        let err = registry.add(service).unwrap_err();
        assert!(format!("{:#}", err).contains("thingId"));
    }

    #[test]
    fn test_add_rejects_string_body() {
        let mut body = ParameterSpec::body();
        body.value_type = ValueType::String;
        let service = ServiceDef::new("notes", "https://example.com/", "v1/").with_method(
            "notes",
            "insert",
            MethodDescriptor::new(HttpMethod::Post, "notes").param("postBody", body),
        );
        let mut registry = Registry::default();
        assert!(registry.add(service).is_err());
        assert!(registry.get("notes").is_none());
    }

    #[test]
    fn test_join_base() {
        assert_eq!(join_base("https://x.com/", "a/v1/"), "https://x.com/a/v1/");
        assert_eq!(join_base("https://x.com", "a/v1"), "https://x.com/a/v1/");
        assert_eq!(join_base("http://127.0.0.1:8080/", ""), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_load_yaml_service_file() {
        let dir = std::env::temp_dir().join(format!("gapi-rest-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tasks.yaml");
        std::fs::write(
            &path,
            r#"
name: tasks
version: v1
rootUrl: https://tasks.googleapis.com/
servicePath: tasks/v1/
resources:
  tasklists:
    methods:
      get:
        path: users/@me/lists/{tasklist}
        httpMethod: GET
        parameters:
          tasklist:
            location: path
            type: string
            required: true
        response: TaskList
"#,
        )
        .unwrap();

        let mut registry = Registry::default();
        let service = registry.load_file(&path).unwrap();
        assert_eq!(service.name, "tasks");
        let descriptor = service.method("tasklists", "get").unwrap();
        assert_eq!(descriptor.parameters["tasklist"], ParameterSpec::path());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
