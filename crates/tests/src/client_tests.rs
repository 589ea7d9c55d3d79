use chrono::{TimeZone, Utc};
use expedientes_models::{AuditAction, DecodeError};
use expedientes_services::audit::{AuditDescription, NewAuditRecord};
use expedientes_services::{ApiClient, ClientError, PageRequest, parse_description};
use serde_json::json;

use crate::fixtures::seed::{SEEDED, audit_rows};
use crate::fixtures::test_app::{Route, TEST_TOKEN, TestApp};

#[tokio::test]
async fn first_page_decodes_records_and_total() {
    let app = TestApp::spawn(audit_rows()).await;
    let client = app.client(Route::Normal);

    let page = client
        .fetch_audits(PageRequest { page: 0, size: 10 })
        .await
        .unwrap();

    assert_eq!(page.records.len(), 10);
    assert_eq!(page.total(), SEEDED as u64);
    assert_eq!(page.range.start, 0);
    assert_eq!(page.range.end, 9);

    let newest = &page.records[0];
    assert_eq!(newest.id, 23);
    assert_eq!(
        newest.timestamp,
        Some(Utc.with_ymd_and_hms(2024, 6, 23, 10, 0, 0).unwrap())
    );
    assert_eq!(newest.actor_name.as_deref(), Some("Ana Ruiz"));
}

#[tokio::test]
async fn last_page_is_partial() {
    let app = TestApp::spawn(audit_rows()).await;
    let page = app
        .client(Route::Normal)
        .fetch_audits(PageRequest { page: 2, size: 10 })
        .await
        .unwrap();

    let ids: Vec<i64> = page.records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(page.total(), 23);
}

#[tokio::test]
async fn empty_table() {
    let app = TestApp::spawn(Vec::new()).await;
    let page = app
        .client(Route::Normal)
        .fetch_audits(PageRequest { page: 0, size: 10 })
        .await
        .unwrap();
    assert!(page.records.is_empty());
    assert_eq!(page.total(), 0);
}

#[tokio::test]
async fn missing_content_range_fails_loudly() {
    let app = TestApp::spawn(audit_rows()).await;
    let err = app
        .client(Route::Broken)
        .fetch_audits(PageRequest { page: 0, size: 10 })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Decode(DecodeError::MissingContentRange)
    ));
}

#[tokio::test]
async fn server_error_is_reported() {
    let app = TestApp::spawn(audit_rows()).await;
    let err = app
        .client(Route::Down)
        .fetch_audits(PageRequest { page: 0, size: 10 })
        .await
        .unwrap_err();
    match err {
        ClientError::Http(e) => assert_eq!(e.status().map(|s| s.as_u16()), Some(500)),
        other => panic!("expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let app = TestApp::spawn(audit_rows()).await;

    let anonymous = app
        .client(Route::Secure)
        .fetch_audits(PageRequest { page: 0, size: 5 })
        .await;
    assert!(matches!(anonymous, Err(ClientError::Http(_))));

    let mut settings = app.settings(Route::Secure);
    settings.token = Some(TEST_TOKEN.to_string());
    let page = ApiClient::new(&settings)
        .unwrap()
        .fetch_audits(PageRequest { page: 0, size: 5 })
        .await
        .unwrap();
    assert_eq!(page.records.len(), 5);
}

#[tokio::test]
async fn fetch_all_honours_limit() {
    let app = TestApp::spawn(audit_rows()).await;
    let client = app.client(Route::Normal);

    assert_eq!(client.fetch_all(100).await.unwrap().len(), 23);
    assert_eq!(client.fetch_all(4).await.unwrap().len(), 4);
    assert!(client.fetch_all(0).await.unwrap().is_empty());
}

#[tokio::test]
async fn created_audit_flattens_on_the_way_back() {
    let app = TestApp::spawn(audit_rows()).await;
    let client = app.client(Route::Normal);

    let description = AuditDescription::update(
        41,
        Some(json!({"Estado": "En trámite", "Titulares": [{"Nombre": "Minera Sur"}]})),
    );
    let draft = NewAuditRecord::new(&AuditAction::Update, "PropiedadMinera", &description).by(7);
    let created = client.create_audit(&draft).await.unwrap();

    assert_eq!(created.id, 24);
    assert_eq!(created.actor_id, Some(7));
    assert_eq!(app.stored().len(), 24);

    let page = client
        .fetch_audits(PageRequest { page: 0, size: 1 })
        .await
        .unwrap();
    let entries = parse_description(page.records[0].description.as_deref());
    let pairs: Vec<(&str, &str)> = entries
        .iter()
        .map(|e| (e.label.as_str(), e.value.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("id", "41"),
            ("Estado", "En trámite"),
            ("Titulares[0].Nombre", "Minera Sur"),
        ]
    );
}
