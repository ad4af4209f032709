// tests/export_end_to_end.rs
//! Full export runs against a mock server, from login to the CSV on disk.

mod common;

use common::*;
use invoice_export::{
    execute_export, write_rows, AppError, DetailFailurePolicy, ExportConfig, ExportRow,
    ExportSchema,
};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;
use wiremock::{MockServer, ResponseTemplate};

const HEADER: &str =
    "Invoice Number,Invoice Total,Invoice Balance Due,Invoice Client Name,Invoice Notes";

fn config(server: &MockServer, dir: &TempDir) -> ExportConfig {
    let mut config = ExportConfig::new(credentials());
    config.endpoints = endpoints(server);
    config.output_file = dir.path().join("invoicesimple-export.csv");
    config.concurrency = 4;
    config
}

#[tokio::test]
async fn export_writes_header_and_one_row_per_invoice() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&server).await;
    let ids = mount_listing(&server, &[3, 2]).await;
    mount_details(&server, &ids).await;
    let config = config(&server, &dir);

    let report = execute_export(&config).await.unwrap();

    assert_eq!(report.path, config.output_file);
    assert_eq!(report.rows_written, 5);
    assert_eq!(report.stats.pages_fetched, 2);
    assert!(report.is_complete());

    let content = fs::read_to_string(&config.output_file).unwrap();
    let mut expected = vec![HEADER.to_string()];
    expected.extend(
        ids.iter()
            .map(|id| format!("INV-{},100,25.5,Client {},thanks", id, id)),
    );
    assert_eq!(content.lines().collect::<Vec<_>>(), expected);
}

#[tokio::test]
async fn empty_listing_writes_only_the_header() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&server).await;
    mount_listing(&server, &[0]).await;
    let config = config(&server, &dir);

    let report = execute_export(&config).await.unwrap();

    assert_eq!(report.rows_written, 0);
    assert_eq!(fs::read_to_string(&config.output_file).unwrap(), format!("{}\n", HEADER));
}

#[tokio::test]
async fn failed_detail_leaves_no_file_behind() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&server).await;
    let ids = mount_listing(&server, &[1]).await;
    mount_detail(&server, &ids[0], ResponseTemplate::new(503)).await;
    let config = config(&server, &dir);

    let err = execute_export(&config).await.unwrap_err();

    assert!(matches!(err, AppError::DetailFetchFailed { .. }), "got {:?}", err);
    assert!(!config.output_file.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn skip_policy_exports_the_rest() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    mount_login(&server).await;
    let ids = mount_listing(&server, &[3]).await;
    mount_details(&server, &[ids[0].clone(), ids[2].clone()]).await;
    mount_detail(&server, &ids[1], ResponseTemplate::new(500)).await;
    let mut config = config(&server, &dir);
    config.on_detail_error = DetailFailurePolicy::Skip;

    let report = execute_export(&config).await.unwrap();

    assert_eq!(report.rows_written, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].id.as_str(), ids[1]);
    let content = fs::read_to_string(&config.output_file).unwrap();
    assert!(!content.contains(&format!("INV-{}", ids[1])));
}

#[tokio::test]
async fn rejected_login_writes_nothing() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .and(wiremock::matchers::path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture(LOGIN_REJECTED)))
        .expect(1)
        .mount(&server)
        .await;
    let config = config(&server, &dir);

    let err = execute_export(&config).await.unwrap_err();

    assert!(matches!(err, AppError::AuthenticationRejected(_)));
    assert!(!config.output_file.exists());
}

#[test]
fn sink_writes_two_rows_after_the_header() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    let rows = vec![
        ExportRow {
            invoice_number: "INV-1".to_string(),
            invoice_total: 100.0,
            invoice_due: 25.0,
            client_name: "Acme".to_string(),
            invoice_notes: "thanks".to_string(),
        },
        ExportRow {
            invoice_number: "INV-2".to_string(),
            invoice_total: 12.5,
            invoice_due: 0.0,
            client_name: "Beta".to_string(),
            invoice_notes: String::new(),
        },
    ];

    write_rows(&rows, &path, &ExportSchema::default()).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content.lines().collect::<Vec<_>>(),
        vec![HEADER, "INV-1,100,25,Acme,thanks", "INV-2,12.5,0,Beta,"]
    );
}
