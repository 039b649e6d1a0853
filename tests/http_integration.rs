//! Integration tests for the HTTP transport using wiremock
//!
//! These tests drive the invoker and typed services through the real
//! reqwest client against mocked endpoints, covering status handling,
//! bodies, bearer tokens and pagination.

use gapi_rest::gcp::auth::GcpCredentials;
use gapi_rest::gcp::client::GcpClient;
use gapi_rest::gcp::http::{format_api_error, GcpHttpClient};
use gapi_rest::model::calendar::{Event, EventDateTime};
use gapi_rest::opt_params;
use gapi_rest::resource::{get_registry, fetch_all_pages_raw, InvocationArgs, ResourceInvoker};
use gapi_rest::service::{CalendarService, DriveService};
use gapi_rest::InvokeError;
use serde_json::json;
use wiremock::matchers::{
    bearer_token, body_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn authorized_client() -> GcpClient {
    GcpClient::from_parts(
        GcpCredentials::from_token("test-token"),
        GcpHttpClient::new().expect("HTTP client should build"),
    )
}

fn invoker_for(server: &MockServer) -> ResourceInvoker<GcpClient> {
    ResourceInvoker::new(authorized_client()).with_root_url(server.uri())
}

/// Test module for the authenticated transport
mod http_client_tests {
    use super::*;

    /// The canonical delete: bearer token, exact path, nothing returned
    #[tokio::test]
    async fn test_delete_event() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/calendar/v3/calendars/primary/events/abc123"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let calendar = CalendarService::with_invoker(invoker_for(&server));
        calendar
            .events()
            .delete("primary", "abc123", opt_params!())
            .await
            .expect("Delete should succeed");
    }

    /// Test GET with query parameters returns a typed model
    #[tokio::test]
    async fn test_get_with_query_returns_model() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drive/v2/files/file-1"))
            .and(query_param("projection", "BASIC"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "file-1",
                "title": "Budget",
                "mimeType": "application/vnd.google-apps.spreadsheet",
                "somethingNew": {"nested": true}
            })))
            .mount(&server)
            .await;

        let drive = DriveService::with_invoker(invoker_for(&server));
        let file = drive
            .files()
            .get("file-1", opt_params! { "projection" => "BASIC" })
            .await
            .expect("Request should succeed");

        assert_eq!(file.title.as_deref(), Some("Budget"));
        assert!(!file.is_folder());
    }

    /// Test POST request with JSON body
    #[tokio::test]
    async fn test_post_with_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "summary": "Standup",
                "start": {"dateTime": "2026-10-16T09:00:00Z"},
                "end": {"dateTime": "2026-10-16T09:15:00Z"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "evt-1",
                "status": "confirmed",
                "summary": "Standup"
            })))
            .mount(&server)
            .await;

        let start = "2026-10-16T09:00:00Z".parse().unwrap();
        let end = "2026-10-16T09:15:00Z".parse().unwrap();
        let event = Event::new(
            "Standup",
            EventDateTime::from_date_time(start),
            EventDateTime::from_date_time(end),
        );

        let calendar = CalendarService::with_invoker(invoker_for(&server));
        let created = calendar
            .events()
            .insert("primary", &event, opt_params!())
            .await
            .expect("Insert should succeed");

        assert_eq!(created.id.as_deref(), Some("evt-1"));
        assert_eq!(created.status.as_deref(), Some("confirmed"));
    }

    /// Test 404 response surfaces the status
    #[tokio::test]
    async fn test_404_returns_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/calendar/v3/calendars/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {
                    "code": 404,
                    "message": "Not Found"
                }
            })))
            .mount(&server)
            .await;

        let calendar = CalendarService::with_invoker(invoker_for(&server));
        let err = calendar
            .calendars()
            .get("missing", opt_params!())
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(format_api_error(&err), "Resource not found.");
        match err {
            InvokeError::Transport { body, .. } => assert!(body.contains("Not Found")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    /// Test 401 is retried once with a fresh token
    #[tokio::test]
    async fn test_401_is_retried_once() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/calendar/v3/colors"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "code": 401,
                    "message": "Invalid credentials"
                }
            })))
            .expect(2)
            .mount(&server)
            .await;

        let calendar = CalendarService::with_invoker(invoker_for(&server));
        let err = calendar.colors().get(opt_params!()).await.unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert!(format_api_error(&err).starts_with("Authentication failed"));
    }

    /// Test rate limiting (429) response
    #[tokio::test]
    async fn test_rate_limit_429() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/drive/v2/about"))
            .respond_with(ResponseTemplate::new(429).set_body_json(json!({
                "error": {
                    "code": 429,
                    "message": "Rate limit exceeded"
                }
            })))
            .mount(&server)
            .await;

        let drive = DriveService::with_invoker(invoker_for(&server));
        let err = drive.about().get(opt_params!()).await.unwrap_err();

        assert_eq!(err.status(), Some(429));
    }

    /// Test a missing parameter never reaches the server
    #[tokio::test]
    async fn test_missing_parameter_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let invoker = invoker_for(&server);
        let (service, descriptor) = get_registry()
            .method("calendar", "events", "delete")
            .expect("Method should exist");
        let args = InvocationArgs::new().with("calendarId", "primary");

        let err = invoker.invoke_raw(service, descriptor, args).await.unwrap_err();

        assert!(matches!(err, InvokeError::MissingParameter { ref name } if name == "eventId"));
        assert!(err.is_local());
    }

    /// Test empty response handling for a method with a response model
    #[tokio::test]
    async fn test_empty_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/calendar/v3/calendars/primary/events/evt-1/move"))
            .and(query_param("destination", "team@example.com"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let calendar = CalendarService::with_invoker(invoker_for(&server));
        let moved = calendar
            .events()
            .move_event("primary", "evt-1", "team@example.com", opt_params!())
            .await
            .expect("Move should succeed");

        assert_eq!(moved, Event::default());
    }

    /// Test an unreachable host is a transport error without status
    #[tokio::test]
    async fn test_connection_refused_has_no_status() {
        let invoker = ResourceInvoker::new(authorized_client()).with_root_url("http://127.0.0.1:1/");
        let calendar = CalendarService::with_invoker(invoker);

        let err = calendar.colors().get(opt_params!()).await.unwrap_err();

        assert!(matches!(err, InvokeError::Transport { status: None, .. }));
        assert!(!err.is_local());
    }
}

/// Test module for pagination against a server
mod pagination_tests {
    use super::*;

    async fn mount_two_pages(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/drive/v2/files"))
            .and(query_param_is_missing("pageToken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"id": "f1", "title": "one"},
                    {"id": "f2", "title": "two"}
                ],
                "nextPageToken": "token-page-2"
            })))
            .expect(1)
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/drive/v2/files"))
            .and(query_param("pageToken", "token-page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"id": "f3", "title": "three"}
                ]
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    /// Test typed pagination with nextPageToken
    #[tokio::test]
    async fn test_list_all_follows_next_page_token() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;

        let drive = DriveService::with_invoker(invoker_for(&server));
        let files = drive
            .files()
            .list_all(opt_params! { "q" => "trashed = false" })
            .await
            .expect("Listing should succeed");

        let titles: Vec<_> = files.iter().filter_map(|f| f.title.as_deref()).collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }

    /// Test raw pagination keeps each page document
    #[tokio::test]
    async fn test_raw_pages() {
        let server = MockServer::start().await;
        mount_two_pages(&server).await;

        let invoker = invoker_for(&server);
        let (service, descriptor) = get_registry()
            .method("drive", "files", "list")
            .expect("Method should exist");

        let pages = fetch_all_pages_raw(&invoker, service, descriptor, InvocationArgs::new())
            .await
            .expect("Listing should succeed");

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0]["nextPageToken"], "token-page-2");
        assert_eq!(pages[1]["items"][0]["id"], "f3");
    }
}
