use expedientes_models::{DescriptionEntry, FilterCriteria};
use expedientes_services::view::{AuditListView, FetchOutcome, LOAD_ERROR};
use expedientes_services::PageRequest;
use tokio::sync::mpsc;

use crate::fixtures::seed::audit_rows;
use crate::fixtures::test_app::{Route, TestApp};

fn ids(view: &AuditListView) -> Vec<i64> {
    view.rows().iter().map(|r| r.record.id).collect()
}

#[tokio::test]
async fn walks_pages_against_the_api() {
    let app = TestApp::spawn(audit_rows()).await;
    let client = app.client(Route::Normal);
    let mut view = AuditListView::new(10).unwrap();

    assert_eq!(view.refresh(&client).await, FetchOutcome::Applied);
    assert_eq!(view.pagination().total_pages(), 3);
    assert_eq!(view.pagination().range_label(), "1 - 10 de 23");
    assert_eq!(ids(&view)[0], 23);

    assert_eq!(view.next_page(&client).await, Some(FetchOutcome::Applied));
    assert_eq!(ids(&view), (4..=13).rev().collect::<Vec<i64>>());

    assert_eq!(view.last_page(&client).await, FetchOutcome::Applied);
    assert_eq!(ids(&view), vec![3, 2, 1]);
    assert_eq!(view.pagination().page_label(), "Página 3 de 3");
    assert_eq!(view.next_page(&client).await, None);

    assert_eq!(view.first_page(&client).await, FetchOutcome::Applied);
    assert_eq!(view.previous_page(&client).await, None);

    assert_eq!(
        view.change_page_size(&client, 25).await.unwrap(),
        FetchOutcome::Applied
    );
    assert_eq!(view.rows().len(), 23);
    assert_eq!(view.pagination().total_pages(), 1);
}

#[tokio::test]
async fn descriptions_are_flattened_per_row() {
    let app = TestApp::spawn(audit_rows()).await;
    let client = app.client(Route::Normal);
    let mut view = AuditListView::new(25).unwrap();
    view.refresh(&client).await;

    let row = |id: i64| {
        view.rows()
            .iter()
            .find(|r| r.record.id == id)
            .expect("seeded row")
    };

    assert_eq!(
        row(12).entries,
        vec![
            DescriptionEntry::new("id", "12"),
            DescriptionEntry::new("Nombre", "Registro 12"),
            DescriptionEntry::new("IdTransaccion", "1012"),
        ]
    );
    assert_eq!(
        row(13).entries,
        vec![
            DescriptionEntry::new("id", "13"),
            DescriptionEntry::new("Estado", "Cerrado"),
        ]
    );
    assert_eq!(
        row(5).entries,
        vec![DescriptionEntry::new(
            "Detalle",
            "Registro migrado del sistema anterior"
        )]
    );
    assert!(row(6).entries.is_empty());
}

#[tokio::test]
async fn failed_fetch_resets_to_empty_with_error() {
    let app = TestApp::spawn(audit_rows()).await;
    let mut view = AuditListView::new(10).unwrap();

    view.refresh(&app.client(Route::Normal)).await;
    assert_eq!(view.rows().len(), 10);

    assert_eq!(
        view.refresh(&app.client(Route::Down)).await,
        FetchOutcome::Failed
    );
    assert!(view.rows().is_empty());
    assert_eq!(view.pagination().total_items(), 0);
    assert_eq!(view.error(), Some(LOAD_ERROR));

    // The next good fetch clears the error.
    view.refresh(&app.client(Route::Normal)).await;
    assert!(view.error().is_none());
}

#[tokio::test]
async fn late_response_does_not_overwrite_newer_page() {
    let app = TestApp::spawn(audit_rows()).await;
    let slow = app.client(Route::Slow);
    let fast = app.client(Route::Normal);
    let mut view = AuditListView::new(10).unwrap();

    let first = view.begin_fetch(PageRequest { page: 0, size: 10 });
    let second = view.begin_fetch(PageRequest { page: 1, size: 10 });

    let (tx, mut rx) = mpsc::channel(2);
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = slow.fetch_audits(first.request).await;
            tx.send((first, result)).await.ok();
        });
    }
    tokio::spawn(async move {
        let result = fast.fetch_audits(second.request).await;
        tx.send((second, result)).await.ok();
    });

    let mut outcomes = Vec::new();
    while let Some((ticket, result)) = rx.recv().await {
        outcomes.push(view.complete(ticket, result));
    }

    assert_eq!(outcomes, vec![FetchOutcome::Applied, FetchOutcome::Stale]);
    assert_eq!(ids(&view), (4..=13).rev().collect::<Vec<i64>>());
    assert!(!view.is_loading());
}

#[tokio::test]
async fn filters_apply_to_the_loaded_page() {
    let app = TestApp::spawn(audit_rows()).await;
    let mut view = AuditListView::new(10).unwrap();
    view.refresh(&app.client(Route::Normal)).await;

    let by_actor = FilterCriteria {
        actor_text: Some("an".into()),
        ..Default::default()
    };
    let visible: Vec<i64> = view
        .visible(&by_actor)
        .iter()
        .map(|r| r.record.id)
        .collect();
    assert_eq!(visible, vec![23, 20, 19, 16, 15]);

    let by_transaction = FilterCriteria {
        transaction_id: Some("1018".into()),
        ..Default::default()
    };
    let visible: Vec<i64> = view
        .visible(&by_transaction)
        .iter()
        .map(|r| r.record.id)
        .collect();
    assert_eq!(visible, vec![18]);
}
