//! Property-based tests using proptest
//!
//! These tests check the invoker's request building against every embedded
//! method descriptor and against randomized parameter values.

use gapi_rest::gcp::transport::{HttpRequest, HttpResponse, Transport};
use gapi_rest::resource::invoker::expand_path;
use gapi_rest::resource::{
    get_registry, HttpMethod, InvocationArgs, Location, MethodDescriptor, ParamValue,
    ParameterSpec, ResourceInvoker, ServiceDef, ValueType,
};
use gapi_rest::InvokeError;
use indexmap::IndexMap;
use proptest::prelude::*;
use serde_json::json;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Answers every request with the same body and counts calls
struct CountingTransport {
    calls: AtomicUsize,
    body: String,
}

impl CountingTransport {
    fn new(body: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            body: body.to_string(),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for CountingTransport {
    fn send(&self, _request: HttpRequest) -> impl Future<Output = gapi_rest::Result<HttpResponse>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = HttpResponse::new(200, self.body.clone());
        async move { Ok(response) }
    }
}

/// Every embedded method as (service, descriptor)
fn all_methods() -> Vec<(&'static ServiceDef, &'static MethodDescriptor)> {
    get_registry()
        .services()
        .flat_map(|service| {
            service
                .resources
                .values()
                .flat_map(|resource| resource.methods.values())
                .map(move |descriptor| (service, descriptor))
        })
        .collect()
}

/// A well-typed value for `spec`, using `text` for strings
fn value_for(spec: &ParameterSpec, text: &str, number: i64) -> ParamValue {
    if spec.location == Location::Body {
        return ParamValue::Json(json!({}));
    }
    if spec.repeated {
        return ParamValue::List(vec![text.to_string()]);
    }
    match spec.value_type {
        ValueType::Integer => ParamValue::Integer(number),
        ValueType::Boolean => ParamValue::Boolean(number % 2 == 0),
        ValueType::Object => ParamValue::Json(json!({})),
        ValueType::String => ParamValue::String(text.to_string()),
    }
}

/// All required parameters of a method, filled in
fn required_args(descriptor: &MethodDescriptor, text: &str, number: i64) -> InvocationArgs {
    let mut args = InvocationArgs::new();
    for (name, spec) in &descriptor.parameters {
        if spec.required {
            args.insert(name, value_for(spec, text, number));
        }
    }
    args
}

/// Test module for required-parameter handling
mod required_parameter_tests {
    use super::*;

    proptest! {
        /// Supplying every required parameter never yields MissingParameter
        #[test]
        fn complete_args_always_prepare(
            text in "[a-zA-Z0-9 /@+._-]{1,24}",
            number in 0i64..1_000_000,
        ) {
            let invoker = ResourceInvoker::new(CountingTransport::new("{}"));
            for (service, descriptor) in all_methods() {
                let request = invoker.prepare(service, descriptor, required_args(descriptor, &text, number));
                prop_assert!(
                    request.is_ok(),
                    "{} {} failed: {:?}",
                    service.name,
                    descriptor.path,
                    request.err()
                );
            }
        }

        /// Omitting one required parameter names it and sends nothing
        #[test]
        fn omitted_required_parameter_is_reported(pick in any::<prop::sample::Index>()) {
            let candidates: Vec<_> = all_methods()
                .into_iter()
                .flat_map(|(service, descriptor)| {
                    descriptor
                        .required_parameters()
                        .map(move |name| (service, descriptor, name))
                        .collect::<Vec<_>>()
                })
                .collect();
            let (service, descriptor, omitted) = *pick.get(&candidates);

            let mut args = InvocationArgs::new();
            for (name, value) in required_args(descriptor, "value", 7).iter() {
                if name != omitted {
                    args.insert(name, value.clone());
                }
            }

            let transport = CountingTransport::new("{}");
            let invoker = ResourceInvoker::new(&transport);
            let result = tokio_test::block_on(invoker.invoke_raw(service, descriptor, args));

            match result {
                Err(InvokeError::MissingParameter { name }) => prop_assert_eq!(name, omitted),
                other => prop_assert!(false, "expected MissingParameter, got {:?}", other),
            }
            prop_assert_eq!(transport.calls(), 0);
        }
    }
}

/// Test module for path and query building
mod request_building_tests {
    use super::*;

    fn tagged_service() -> ServiceDef {
        let descriptor = MethodDescriptor::new(HttpMethod::Get, "items")
            .param("tags", ParameterSpec::query(ValueType::String).repeated());
        ServiceDef::new("tagged", "https://example.com/", "api/v1/").with_method("items", "list", descriptor)
    }

    proptest! {
        /// Unreserved values are substituted verbatim
        #[test]
        fn template_substitutes_in_order(
            a in "[A-Za-z0-9_.~-]{1,12}",
            b in "[A-Za-z0-9_.~-]{1,12}",
        ) {
            let mut values = IndexMap::new();
            values.insert("a".to_string(), a.clone());
            values.insert("b".to_string(), b.clone());
            prop_assert_eq!(expand_path("{a}/x/{b}", &values).unwrap(), format!("{}/x/{}", a, b));
        }

        /// A value never adds path segments or raw spaces
        #[test]
        fn template_values_stay_in_one_segment(a in "[a-z/ ]{1,12}", b in "[a-z/ ]{1,12}") {
            let mut values = IndexMap::new();
            values.insert("a".to_string(), a);
            values.insert("b".to_string(), b);
            let path = expand_path("{a}/x/{b}", &values).unwrap();
            prop_assert_eq!(path.matches('/').count(), 2);
            prop_assert!(!path.contains(' '));
        }

        /// A repeated query parameter becomes one pair per value, in order
        #[test]
        fn repeated_values_become_repeated_pairs(tags in prop::collection::vec("[a-z0-9]{1,8}", 1..6)) {
            let service = tagged_service();
            let descriptor = service.method("items", "list").unwrap();
            let invoker = ResourceInvoker::new(CountingTransport::new("{}"));

            let args = InvocationArgs::new().with("tags", tags.clone());
            let request = invoker.prepare(&service, descriptor, args).unwrap();

            let expected: Vec<String> = tags.iter().map(|t| format!("tags={}", t)).collect();
            prop_assert_eq!(request.url, format!("https://example.com/api/v1/items?{}", expected.join("&")));
        }

        /// A method without a response model returns nothing whatever the body
        #[test]
        fn void_methods_return_nothing(body in "\\PC{0,64}") {
            let service = get_registry().get("calendar").unwrap();
            let descriptor = service.method("events", "delete").unwrap();
            let transport = CountingTransport::new(&body);
            let invoker = ResourceInvoker::new(&transport);

            let args = InvocationArgs::new()
                .with("calendarId", "primary")
                .with("eventId", "abc123");
            let result = tokio_test::block_on(invoker.invoke_raw(service, descriptor, args));

            prop_assert!(matches!(result, Ok(None)));
            prop_assert_eq!(transport.calls(), 1);
        }
    }
}
