//! Cloud Trace API v1
//!
//! Reading and writing distributed traces.

use crate::error::Result;
use crate::gcp::transport::Transport;
use crate::model::cloudtrace::{Empty, ListTracesResponse, Trace, Traces};
use crate::resource::fetcher::{fetch_all_pages, PAGE_TOKEN_PARAMETER};
use crate::resource::registry::{builtin_service, ServiceDef};
use crate::resource::{InvocationArgs, OptParams, Resource, ResourceInvoker};

/// Typed client for the Cloud Trace API v1
pub struct CloudtraceService<T> {
    invoker: ResourceInvoker<T>,
    service: &'static ServiceDef,
}

impl<T: Transport> CloudtraceService<T> {
    pub fn new(transport: T) -> Self {
        Self::with_invoker(ResourceInvoker::new(transport))
    }

    pub fn with_invoker(invoker: ResourceInvoker<T>) -> Self {
        Self {
            invoker,
            service: builtin_service("cloudtrace"),
        }
    }

    pub fn invoker(&self) -> &ResourceInvoker<T> {
        &self.invoker
    }

    pub fn service(&self) -> &'static ServiceDef {
        self.service
    }

    pub fn projects(&self) -> ProjectsResource<'_, T> {
        ProjectsResource(self.invoker.resource(self.service, "projects"))
    }

    pub fn projects_traces(&self) -> ProjectsTracesResource<'_, T> {
        ProjectsTracesResource(self.invoker.resource(self.service, "projects.traces"))
    }
}

pub struct ProjectsResource<'a, T>(Resource<'a, T>);

impl<T: Transport> ProjectsResource<'_, T> {
    /// Send new traces, or spans to merge into existing traces
    pub async fn patch_traces(
        &self,
        project_id: &str,
        body: &Traces,
        opt_params: OptParams,
    ) -> Result<Empty> {
        let args = InvocationArgs::new()
            .with("projectId", project_id)
            .with_body(body)?;
        self.0.call("patchTraces", args.merge(opt_params)).await
    }
}

pub struct ProjectsTracesResource<'a, T>(Resource<'a, T>);

impl<T: Transport> ProjectsTracesResource<'_, T> {
    pub async fn get(
        &self,
        project_id: &str,
        trace_id: &str,
        opt_params: OptParams,
    ) -> Result<Trace> {
        let args = InvocationArgs::new()
            .with("projectId", project_id)
            .with("traceId", trace_id);
        self.0.call("get", args.merge(opt_params)).await
    }

    pub async fn list(
        &self,
        project_id: &str,
        opt_params: OptParams,
    ) -> Result<ListTracesResponse> {
        let args = InvocationArgs::new().with("projectId", project_id);
        self.0.call("list", args.merge(opt_params)).await
    }
}

impl<T: Transport> ProjectsTracesResource<'_, T> {
    pub async fn list_all(&self, project_id: &str, opt_params: OptParams) -> Result<Vec<Trace>> {
        fetch_all_pages(|page_token| {
            let mut params = opt_params.clone();
            if let Some(token) = page_token {
                params.insert(PAGE_TOKEN_PARAMETER.to_string(), token.into());
            }
            self.list(project_id, params)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcp::transport::spy::SpyTransport;
    use crate::model::cloudtrace::TraceSpan;
    use crate::opt_params;
    use crate::resource::HttpMethod;

    #[tokio::test]
    async fn test_patch_traces() {
        let spy = SpyTransport::new(200, "{}");
        let trace = CloudtraceService::new(&spy);
        let traces = Traces::new(vec![Trace {
            project_id: Some("my-project".to_string()),
            trace_id: Some("0123456789abcdef0123456789abcdef".to_string()),
            spans: Some(vec![TraceSpan::new(1, "root")]),
        }]);

        let empty = trace.projects().patch_traces("my-project", &traces, opt_params!()).await.unwrap();

        assert_eq!(empty, Empty {});
        let call = &spy.calls()[0];
        assert_eq!(call.method, HttpMethod::Patch);
        assert_eq!(call.url, "https://cloudtrace.googleapis.com/v1/projects/my-project/traces");
        assert!(call.body.as_deref().unwrap().contains("\"spanId\":\"1\""));
    }

    #[tokio::test]
    async fn test_list_traces_with_view() {
        let spy = SpyTransport::new(200, r#"{"traces": [{"traceId": "t1"}]}"#);
        let trace = CloudtraceService::new(&spy);

        let traces = trace
            .projects_traces()
            .list_all("my-project", opt_params! { "view" => "MINIMAL", "pageSize" => 50 })
            .await
            .unwrap();

        assert_eq!(traces.len(), 1);
        assert_eq!(
            spy.calls()[0].path_and_query(),
            "/v1/projects/my-project/traces?view=MINIMAL&pageSize=50"
        );
    }
}
