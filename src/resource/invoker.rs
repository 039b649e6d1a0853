//! Resource Invoker - Generic method dispatch
//!
//! Turns a [`MethodDescriptor`] plus caller arguments into one HTTP exchange:
//! required parameters are checked, path values substituted, the rest routed
//! to the query string or body, and the response decoded into the declared
//! model. Nothing is sent when validation fails.

use super::args::{InvocationArgs, OptParams, ParamValue};
use super::descriptor::{parse_template, Location, MethodDescriptor, TemplateSegment};
use super::registry::{join_base, ServiceDef};
use crate::error::{InvokeError, Result};
use crate::gcp::transport::{HttpRequest, HttpResponse, Transport};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Query parameters every Google API accepts without declaring them
pub const STANDARD_PARAMETERS: &[&str] = &[
    "alt",
    "fields",
    "key",
    "oauth_token",
    "prettyPrint",
    "quotaUser",
    "trace",
    "userIp",
];

pub fn is_standard_parameter(name: &str) -> bool {
    STANDARD_PARAMETERS.contains(&name)
}

/// Arguments split by where they go in the request
#[derive(Default)]
struct Partitioned {
    path: IndexMap<String, String>,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

/// Dispatches descriptor-driven calls through a [`Transport`]
#[derive(Debug, Clone)]
pub struct ResourceInvoker<T> {
    transport: T,
    root_override: Option<String>,
    default_params: OptParams,
}

impl<T: Transport> ResourceInvoker<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            root_override: None,
            default_params: OptParams::new(),
        }
    }

    /// Send every service to `root_url` instead of its own root
    pub fn with_root_url(mut self, root_url: impl Into<String>) -> Self {
        self.root_override = Some(root_url.into());
        self
    }

    /// Parameters added to every call unless the caller supplies them
    pub fn with_default_params(mut self, params: OptParams) -> Self {
        self.default_params = params;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Handle for one resource of `service`
    pub fn resource<'a>(&'a self, service: &'a ServiceDef, name: &'a str) -> Resource<'a, T> {
        Resource {
            invoker: self,
            service,
            name,
        }
    }

    fn base_url(&self, service: &ServiceDef) -> String {
        match &self.root_override {
            Some(root) => join_base(root, &service.service_path),
            None => service.base_url(),
        }
    }

    /// Build the request for a call without sending it
    pub fn prepare(
        &self,
        service: &ServiceDef,
        descriptor: &MethodDescriptor,
        args: InvocationArgs,
    ) -> Result<HttpRequest> {
        let mut values = args.into_inner();

        if let Some(name) = descriptor
            .required_parameters()
            .find(|name| !values.contains_key(*name))
        {
            return Err(InvokeError::missing(name));
        }

        for (name, value) in &self.default_params {
            if !values.contains_key(name) {
                values.insert(name.clone(), value.clone());
            }
        }

        let parts = partition(descriptor, values)?;
        let path = expand_path(&descriptor.path, &parts.path)?;

        let mut url = format!("{}{}", self.base_url(service), path);
        if !parts.query.is_empty() {
            let query: Vec<String> = parts
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
                .collect();
            url.push('?');
            url.push_str(&query.join("&"));
        }

        let mut request = HttpRequest::new(descriptor.http_method, url);
        if let Some(body) = parts.body {
            request.body = Some(serde_json::to_string(&body).map_err(InvokeError::Encode)?);
        }
        request.scopes = service.scope_urls();
        Ok(request)
    }

    /// Send the call and return the raw response body, `None` for void methods
    async fn dispatch(
        &self,
        service: &ServiceDef,
        descriptor: &MethodDescriptor,
        args: InvocationArgs,
    ) -> Result<Option<String>> {
        let request = self.prepare(service, descriptor, args)?;
        let HttpResponse { status, body, .. } = self.transport.send(request).await?;

        if !(200..300).contains(&status) {
            return Err(InvokeError::Transport {
                status: Some(status),
                body,
            });
        }

        if descriptor.returns_value() {
            Ok(Some(body))
        } else {
            Ok(None)
        }
    }

    /// Invoke a method and decode the response into `M`.
    ///
    /// Returns `None` when the descriptor declares no response model, even
    /// if the server sent a body.
    pub async fn invoke<M: DeserializeOwned>(
        &self,
        service: &ServiceDef,
        descriptor: &MethodDescriptor,
        args: InvocationArgs,
    ) -> Result<Option<M>> {
        let Some(body) = self.dispatch(service, descriptor, args).await? else {
            return Ok(None);
        };
        let model = descriptor.response.as_deref().unwrap_or("response");
        decode(model, &body).map(Some)
    }

    /// Invoke a method and return the undecoded JSON document
    pub async fn invoke_raw(
        &self,
        service: &ServiceDef,
        descriptor: &MethodDescriptor,
        args: InvocationArgs,
    ) -> Result<Option<Value>> {
        self.invoke::<Value>(service, descriptor, args).await
    }
}

fn decode<M: DeserializeOwned>(model: &str, body: &str) -> Result<M> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|source| InvokeError::Decode {
        model: model.to_string(),
        source,
    })
}

/// Route each argument by its declared location, checking types on the way.
///
/// Query pairs come out in descriptor order, then standard parameters in
/// caller order.
fn partition(descriptor: &MethodDescriptor, mut values: IndexMap<String, ParamValue>) -> Result<Partitioned> {
    let mut parts = Partitioned::default();

    for (name, spec) in &descriptor.parameters {
        let Some(value) = values.shift_remove(name) else {
            continue;
        };
        let value = value.coerce(name, spec)?;
        match spec.location {
            Location::Path => {
                parts.path.insert(name.clone(), value.to_path_value());
            }
            Location::Query => {
                for v in value.to_query_values() {
                    parts.query.push((name.clone(), v));
                }
            }
            Location::Body => match value {
                ParamValue::Json(v) => parts.body = Some(v),
                _ => {
                    return Err(InvokeError::InvalidParameter {
                        name: name.clone(),
                        expected: spec.describe_type(),
                    })
                }
            },
        }
    }

    for (name, value) in values {
        if !is_standard_parameter(&name) {
            return Err(InvokeError::UnknownParameter { name });
        }
        for v in value.to_query_values() {
            parts.query.push((name.clone(), v));
        }
    }

    Ok(parts)
}

/// Substitute path values into a template.
///
/// `{name}` values are encoded as one segment, `{+name}` values keep `/`.
pub fn expand_path(template: &str, values: &IndexMap<String, String>) -> Result<String> {
    let mut path = String::with_capacity(template.len());

    for segment in parse_template(template) {
        match segment {
            TemplateSegment::Literal(text) => {
                if let Some(open) = text.find('{') {
                    return Err(InvokeError::UnresolvedPlaceholder {
                        name: text[open + 1..].to_string(),
                    });
                }
                path.push_str(text);
            }
            TemplateSegment::Variable(placeholder) => {
                let value = values.get(placeholder.name).ok_or_else(|| {
                    InvokeError::UnresolvedPlaceholder {
                        name: placeholder.name.to_string(),
                    }
                })?;
                if placeholder.reserved {
                    let encoded: Vec<_> = value.split('/').map(urlencoding::encode).collect();
                    path.push_str(&encoded.join("/"));
                } else {
                    path.push_str(&urlencoding::encode(value));
                }
            }
        }
    }

    Ok(path)
}

/// One named resource of a service, invoked through a shared invoker
pub struct Resource<'a, T> {
    invoker: &'a ResourceInvoker<T>,
    service: &'a ServiceDef,
    name: &'a str,
}

impl<'a, T: Transport> Resource<'a, T> {
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn descriptor(&self, method: &str) -> Result<&'a MethodDescriptor> {
        self.service.require_method(self.name, method)
    }

    /// Call a method that declares a response model
    pub async fn call<M: DeserializeOwned + Default>(&self, method: &str, args: InvocationArgs) -> Result<M> {
        let descriptor = self.descriptor(method)?;
        let model = self.invoker.invoke(self.service, descriptor, args).await?;
        Ok(model.unwrap_or_default())
    }

    /// Call a method that returns nothing
    pub async fn call_void(&self, method: &str, args: InvocationArgs) -> Result<()> {
        let descriptor = self.descriptor(method)?;
        self.invoker
            .invoke::<Value>(self.service, descriptor, args)
            .await?;
        Ok(())
    }

    pub async fn call_raw(&self, method: &str, args: InvocationArgs) -> Result<Option<Value>> {
        let descriptor = self.descriptor(method)?;
        self.invoker.invoke_raw(self.service, descriptor, args).await
    }
}
