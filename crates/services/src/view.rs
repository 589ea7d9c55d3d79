use async_trait::async_trait;
use expedientes_models::{AuditPage, AuditRecord, DescriptionEntry, FilterCriteria};
use tracing::{debug, error, warn};

use crate::audit::{matches, parse_description};
use crate::client::ClientError;
use crate::pagination::{PageRequest, PaginationController, PaginationError};

pub const LOAD_ERROR: &str = "Ocurrió un error al cargar las auditorías.";

/// Where a list view gets its pages from.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, request: PageRequest) -> Result<AuditPage, ClientError>;
}

/// Identifies one issued fetch. Only the latest ticket may update the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    pub request: PageRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// A newer fetch was issued after this one; the result was dropped.
    Stale,
}

/// A loaded record with its description already flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRow {
    pub record: AuditRecord,
    pub entries: Vec<DescriptionEntry>,
}

impl From<AuditRecord> for AuditRow {
    fn from(record: AuditRecord) -> Self {
        let entries = parse_description(record.description.as_deref());
        Self { record, entries }
    }
}

/// State behind the audit list screen: the current page of records, its
/// pagination, and the loading/error flags.
#[derive(Debug)]
pub struct AuditListView {
    rows: Vec<AuditRow>,
    pagination: PaginationController,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl AuditListView {
    pub fn new(page_size: u64) -> Result<Self, PaginationError> {
        Self::with_page_size_options(page_size, &[])
    }

    pub fn with_page_size_options(
        page_size: u64,
        options: &[u64],
    ) -> Result<Self, PaginationError> {
        Ok(Self {
            rows: Vec::new(),
            pagination: PaginationController::with_options(page_size, options)?,
            loading: false,
            error: None,
            issued: 0,
        })
    }

    pub fn rows(&self) -> &[AuditRow] {
        &self.rows
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Rows of the loaded page that pass `criteria`.
    pub fn visible(&self, criteria: &FilterCriteria) -> Vec<&AuditRow> {
        self.rows
            .iter()
            .filter(|row| criteria.is_empty() || matches(&row.record, criteria))
            .collect()
    }

    pub fn begin_fetch(&mut self, request: PageRequest) -> FetchTicket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        debug!(seq = self.issued, page = request.page, size = request.size, "Issuing audit fetch");
        FetchTicket {
            seq: self.issued,
            request,
        }
    }

    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<AuditPage, ClientError>,
    ) -> FetchOutcome {
        if ticket.seq != self.issued {
            warn!(seq = ticket.seq, latest = self.issued, "Dropping stale audit response");
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.pagination.set_total_items(page.total());
                self.rows = page.records.into_iter().map(AuditRow::from).collect();
                FetchOutcome::Applied
            }
            Err(e) => {
                error!(error = %e, "Failed to load audits");
                self.rows.clear();
                self.pagination.set_total_items(0);
                self.error = Some(LOAD_ERROR.to_string());
                FetchOutcome::Failed
            }
        }
    }

    async fn run<S>(&mut self, source: &S, request: PageRequest) -> FetchOutcome
    where
        S: PageSource + ?Sized,
    {
        let ticket = self.begin_fetch(request);
        let result = source.fetch_page(request).await;
        self.complete(ticket, result)
    }

    /// Re-fetches the current page.
    pub async fn refresh<S: PageSource + ?Sized>(&mut self, source: &S) -> FetchOutcome {
        let request = self.pagination.request();
        self.run(source, request).await
    }

    pub async fn open_page<S: PageSource + ?Sized>(
        &mut self,
        source: &S,
        page: u64,
    ) -> Result<FetchOutcome, PaginationError> {
        let request = self.pagination.jump_to(page)?;
        Ok(self.run(source, request).await)
    }

    pub async fn first_page<S: PageSource + ?Sized>(&mut self, source: &S) -> FetchOutcome {
        let request = self.pagination.first_page();
        self.run(source, request).await
    }

    pub async fn previous_page<S: PageSource + ?Sized>(
        &mut self,
        source: &S,
    ) -> Option<FetchOutcome> {
        let request = self.pagination.previous_page()?;
        Some(self.run(source, request).await)
    }

    pub async fn next_page<S: PageSource + ?Sized>(&mut self, source: &S) -> Option<FetchOutcome> {
        let request = self.pagination.next_page()?;
        Some(self.run(source, request).await)
    }

    pub async fn last_page<S: PageSource + ?Sized>(&mut self, source: &S) -> FetchOutcome {
        let request = self.pagination.last_page();
        self.run(source, request).await
    }

    pub async fn change_page_size<S: PageSource + ?Sized>(
        &mut self,
        source: &S,
        page_size: u64,
    ) -> Result<FetchOutcome, PaginationError> {
        let request = self.pagination.change_page_size(page_size)?;
        Ok(self.run(source, request).await)
    }
}
