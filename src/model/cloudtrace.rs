//! Cloud Trace API v1 models

use super::impl_paginated;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A trace: a tree of spans describing one request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// 32 hex characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spans: Option<Vec<TraceSpan>>,
}

/// A timed operation within a trace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceSpan {
    /// uint64, sent as a decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_id: Option<String>,
    /// `SPAN_KIND_UNSPECIFIED`, `RPC_SERVER` or `RPC_CLIENT`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

/// A batch of traces sent with `projects.patchTraces`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Traces {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traces: Option<Vec<Trace>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTracesResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traces: Option<Vec<Trace>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Empty response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Empty {}

impl_paginated!(ListTracesResponse, Trace, traces);

impl Traces {
    pub fn new(traces: Vec<Trace>) -> Self {
        Self {
            traces: Some(traces),
        }
    }
}

impl TraceSpan {
    pub fn new(span_id: u64, name: &str) -> Self {
        Self {
            span_id: Some(span_id.to_string()),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn with_times(mut self, start: chrono::DateTime<chrono::Utc>, end: chrono::DateTime<chrono::Utc>) -> Self {
        self.start_time = Some(start.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true));
        self.end_time = Some(end.to_rfc3339_opts(chrono::SecondsFormat::Nanos, true));
        self
    }
}
