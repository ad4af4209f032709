// tests/common/mod.rs
//! Mock Invoice Simple endpoints shared by the integration tests.

#![allow(dead_code)]

use invoice_export::{Credentials, ServiceEndpoints};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LOGIN_PATH: &str = "/api/v3/app/login";
pub const DOCUMENTS_PATH: &str = "/api/docs";
pub const INVOICE_QUERY_PATH: &str = "/parse/classes/Invoice";

pub const LOGIN_SUCCESS: &str = include_str!("../fixtures/login_success.json");
pub const LOGIN_REJECTED: &str = include_str!("../fixtures/login_rejected.json");
pub const INVOICE_INV1: &str = include_str!("../fixtures/invoice_inv1.json");

pub const SESSION_TOKEN: &str = "r:3f6d0b1c9a2e4f58b7c1d2e3f4a5b6c7";

pub fn fixture(raw: &str) -> Value {
    serde_json::from_str(raw).expect("fixture should be valid JSON")
}

pub fn credentials() -> Credentials {
    Credentials::new("me@example.com", "hunter2").expect("test credentials should be valid")
}

pub fn endpoints(server: &MockServer) -> ServiceEndpoints {
    ServiceEndpoints::rooted_at(&server.uri()).expect("mock server URI should be valid")
}

/// Ids `inv0`, `inv1`, ... for `count` invoices.
pub fn invoice_ids(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("inv{}", i)).collect()
}

/// A detail record whose fields are derived from `id`.
pub fn invoice_record(id: &str) -> Value {
    json!({
        "objectId": id,
        "invoiceNo": format!("INV-{}", id),
        "total": 100.0,
        "balanceDue": 25.5,
        "client": { "name": format!("Client {}", id) },
        "setting": { "comment": "thanks" }
    })
}

pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .and(header("x-is-app", "app.invoicesimple.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture(LOGIN_SUCCESS)))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts a listing split into pages of the given sizes.
///
/// The first page answers the default listing query at `/api/docs`; later
/// pages live at `/api/docs/page/N` and are reached only through `next`.
/// Returns every listed id in server order.
pub async fn mount_listing(server: &MockServer, sizes: &[usize]) -> Vec<String> {
    let ids = invoice_ids(sizes.iter().sum());
    let mut offset = 0;

    for (index, size) in sizes.iter().enumerate() {
        let number = index + 1;
        let is_last = number == sizes.len();
        let documents: Vec<Value> = ids[offset..offset + size]
            .iter()
            .map(|id| json!({ "objectId": id, "docType": 0 }))
            .collect();
        let next = (!is_last).then(|| format!("{}{}/page/{}", server.uri(), DOCUMENTS_PATH, number + 1));
        let body = json!({
            "documents": documents,
            "next": next,
            "prev": Value::Null,
            "hasNextPage": !is_last,
        });

        let mock = if number == 1 {
            Mock::given(method("GET"))
                .and(path(DOCUMENTS_PATH))
                .and(query_param("doctype", "0"))
                .and(query_param("sortby", "invoiceDate"))
        } else {
            Mock::given(method("GET")).and(path(format!("{}/page/{}", DOCUMENTS_PATH, number)))
        };

        mock.and(header("x-parse-session-token", SESSION_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;

        offset += size;
    }

    ids
}

/// Mounts one detail response per id, each expected exactly once.
pub async fn mount_details(server: &MockServer, ids: &[String]) {
    for id in ids {
        mount_detail(server, id, ResponseTemplate::new(200).set_body_json(json!({
            "results": [invoice_record(id)]
        })))
        .await;
    }
}

pub async fn mount_detail(server: &MockServer, id: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(INVOICE_QUERY_PATH))
        .and(body_partial_json(json!({
            "where": { "objectId": id },
            "_method": "GET",
            "_SessionToken": SESSION_TOKEN
        })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}
