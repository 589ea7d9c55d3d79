use std::time::Duration;

use async_trait::async_trait;
use expedientes_config::ApiSettings;
use expedientes_models::{AuditPage, AuditRecord, DecodeError};
use reqwest::header::CONTENT_RANGE;
use thiserror::Error;
use tracing::debug;

use crate::audit::NewAuditRecord;
use crate::pagination::PageRequest;
use crate::view::PageSource;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Typed access to the audit endpoints of the REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.get(self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// `GET /auditorias?range=[start,end]`.
    pub async fn fetch_audits(&self, request: PageRequest) -> ClientResult<AuditPage> {
        let range = request.range_param();
        debug!(%range, "Fetching audit page");

        let resp = self
            .get("auditorias")
            .query(&[("range", range.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let content_range = match resp.headers().get(CONTENT_RANGE) {
            Some(value) => Some(
                value
                    .to_str()
                    .map_err(|_| DecodeError::MalformedContentRange(format!("{value:?}")))?
                    .to_string(),
            ),
            None => None,
        };
        let body = resp.bytes().await?;

        Ok(AuditPage::decode(content_range.as_deref(), &body)?)
    }

    /// Up to `limit` most recent records, for reports.
    pub async fn fetch_all(&self, limit: u64) -> ClientResult<Vec<AuditRecord>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let page = self
            .fetch_audits(PageRequest {
                page: 0,
                size: limit,
            })
            .await?;
        Ok(page.records)
    }

    /// `POST /auditorias`.
    pub async fn create_audit(&self, record: &NewAuditRecord) -> ClientResult<AuditRecord> {
        let builder = self.client.post(self.url("auditorias")).json(record);
        let builder = match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let created = builder
            .send()
            .await?
            .error_for_status()?
            .json::<AuditRecord>()
            .await?;
        Ok(created)
    }
}

#[async_trait]
impl PageSource for ApiClient {
    async fn fetch_page(&self, request: PageRequest) -> ClientResult<AuditPage> {
        self.fetch_audits(request).await
    }
}
