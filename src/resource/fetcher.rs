//! Resource Fetcher
//!
//! Pagination and fan-out helpers on top of the invoker. List responses
//! carry a continuation token; the helpers here feed it back as `pageToken`
//! until the server stops returning one.

use super::args::InvocationArgs;
use super::descriptor::MethodDescriptor;
use super::invoker::ResourceInvoker;
use super::registry::ServiceDef;
use crate::error::Result;
use crate::gcp::transport::Transport;
use serde_json::Value;
use std::future::Future;

/// Name of the query parameter that carries the continuation token
pub const PAGE_TOKEN_PARAMETER: &str = "pageToken";

/// Safety limit on the number of pages fetched by one call
const MAX_PAGES: usize = 1000;

/// A list response that may continue on another page
pub trait Paginated {
    type Item;

    fn next_page_token(&self) -> Option<&str>;

    fn into_items(self) -> Vec<Self::Item>;
}

/// Fetch every page and collect the items.
///
/// `fetch_page` receives the token of the page to fetch, `None` for the
/// first one.
pub async fn fetch_all_pages<P, F, Fut>(mut fetch_page: F) -> Result<Vec<P::Item>>
where
    P: Paginated,
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<P>>,
{
    let mut all_items = Vec::new();
    let mut page_token: Option<String> = None;

    for page in 1..=MAX_PAGES {
        let response = fetch_page(page_token.take()).await?;
        let next = response
            .next_page_token()
            .filter(|token| !token.is_empty())
            .map(str::to_string);
        all_items.extend(response.into_items());

        match next {
            Some(token) => page_token = Some(token),
            None => return Ok(all_items),
        }

        if page == MAX_PAGES {
            tracing::warn!("Stopped after {} pages, results are incomplete", MAX_PAGES);
        }
    }

    Ok(all_items)
}

/// Fetch every page of a method as raw JSON documents, one per page
pub async fn fetch_all_pages_raw<T: Transport>(
    invoker: &ResourceInvoker<T>,
    service: &ServiceDef,
    descriptor: &MethodDescriptor,
    args: InvocationArgs,
) -> Result<Vec<Value>> {
    let mut pages = Vec::new();
    let mut page_token: Option<String> = None;

    for _ in 0..MAX_PAGES {
        let mut page_args = args.clone();
        if let Some(token) = page_token.take() {
            page_args.insert(PAGE_TOKEN_PARAMETER, token);
        }

        let Some(page) = invoker.invoke_raw(service, descriptor, page_args).await? else {
            break;
        };

        let next = page
            .get("nextPageToken")
            .and_then(|v| v.as_str())
            .filter(|token| !token.is_empty())
            .map(|s| s.to_string());
        pages.push(page);

        match next {
            Some(token) => {
                tracing::debug!("Fetching page {}", pages.len() + 1);
                page_token = Some(token);
            }
            None => break,
        }
    }

    if page_token.is_some() {
        tracing::warn!("Stopped after {} pages, results are incomplete", MAX_PAGES);
    }

    Ok(pages)
}

/// Run independent calls concurrently, keeping results in input order
pub async fn fetch_concurrent<I, Fut, M>(calls: I) -> Vec<Result<M>>
where
    I: IntoIterator<Item = Fut>,
    Fut: Future<Output = Result<M>>,
{
    futures::future::join_all(calls).await
}

/// Like [`fetch_concurrent`] but fails on the first error
pub async fn try_fetch_concurrent<I, Fut, M>(calls: I) -> Result<Vec<M>>
where
    I: IntoIterator<Item = Fut>,
    Fut: Future<Output = Result<M>>,
{
    futures::future::try_join_all(calls).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvokeError;
    use crate::gcp::transport::spy::SpyTransport;
    use crate::resource::descriptor::{HttpMethod, ParameterSpec, ValueType};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct Page {
        items: Vec<u32>,
        next_page_token: Option<String>,
    }

    impl Paginated for Page {
        type Item = u32;

        fn next_page_token(&self) -> Option<&str> {
            self.next_page_token.as_deref()
        }

        fn into_items(self) -> Vec<u32> {
            self.items
        }
    }

    fn page(items: Vec<u32>, next: Option<&str>) -> Page {
        Page {
            items,
            next_page_token: next.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_pages_follows_tokens() {
        let pages = Mutex::new(VecDeque::from(vec![
            page(vec![1, 2], Some("p2")),
            page(vec![3], Some("p3")),
            page(vec![4], None),
        ]));
        let seen = Mutex::new(Vec::new());

        let items = fetch_all_pages(|token| {
            seen.lock().unwrap().push(token);
            let next = pages.lock().unwrap().pop_front();
            async move { next.ok_or_else(|| InvokeError::network("no more pages")) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![None, Some("p2".to_string()), Some("p3".to_string())]
        );
    }

    #[tokio::test]
    async fn test_empty_token_ends_pagination() {
        let items = fetch_all_pages(|_| async { Ok(page(vec![7], Some(""))) })
            .await
            .unwrap();
        assert_eq!(items, vec![7]);
    }

    #[tokio::test]
    async fn test_fetch_all_pages_propagates_errors() {
        let result = fetch_all_pages::<Page, _, _>(|_| async {
            Err(InvokeError::Transport {
                status: Some(500),
                body: String::new(),
            })
        })
        .await;
        assert_eq!(result.unwrap_err().status(), Some(500));
    }

    #[tokio::test]
    async fn test_fetch_concurrent_keeps_order() {
        let calls = (0..5u32).map(|i| async move { Ok::<_, InvokeError>(i * 10) });
        let results = fetch_concurrent(calls).await;
        let values: Vec<u32> = results.into_iter().map(|r| r.unwrap()).collect();
        assert_eq!(values, vec![0, 10, 20, 30, 40]);
    }

    #[tokio::test]
    async fn test_try_fetch_concurrent_fails_fast() {
        let calls = (0..3u32).map(|i| async move {
            if i == 1 {
                Err(InvokeError::missing("calendarId"))
            } else {
                Ok(i)
            }
        });
        let err = try_fetch_concurrent(calls).await.unwrap_err();
        assert!(matches!(err, InvokeError::MissingParameter { .. }));
    }

    #[tokio::test]
    async fn test_raw_pages_stop_at_page_limit() {
        let descriptor = MethodDescriptor::new(HttpMethod::Get, "items")
            .param(PAGE_TOKEN_PARAMETER, ParameterSpec::query(ValueType::String))
            .response_model("Items");
        let service = ServiceDef::new("endless", "https://example.com/", "api/v1/")
            .with_method("items", "list", descriptor);
        let descriptor = service.method("items", "list").unwrap();
        let spy = SpyTransport::new(200, r#"{"nextPageToken": "more"}"#);
        let invoker = ResourceInvoker::new(&spy);

        let pages = fetch_all_pages_raw(&invoker, &service, descriptor, InvocationArgs::new())
            .await
            .unwrap();

        assert_eq!(pages.len(), MAX_PAGES);
        assert_eq!(spy.calls().len(), MAX_PAGES);
    }
}
