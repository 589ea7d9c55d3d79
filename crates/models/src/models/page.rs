use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::AuditRecord;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Content-Range header missing")]
    MissingContentRange,
    #[error("Malformed Content-Range header: {0:?}")]
    MalformedContentRange(String),
    #[error("Unexpected response body: {0}")]
    Body(#[from] serde_json::Error),
}

/// `Content-Range: <unit> <start>-<end>/<total>`.
///
/// The API reports `end = start - 1` for an empty collection
/// (`auditorias 0--1/0`), so `end` is signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRange {
    pub start: u64,
    pub end: i64,
    pub total: u64,
}

impl ContentRange {
    pub fn parse(header: &str) -> Result<Self, DecodeError> {
        let malformed = || DecodeError::MalformedContentRange(header.to_string());

        let (_unit, spec) = header.trim().split_once(' ').ok_or_else(malformed)?;
        let (range, total) = spec.trim().split_once('/').ok_or_else(malformed)?;
        let (start, end) = range.split_once('-').ok_or_else(malformed)?;

        let start: u64 = start.parse().map_err(|_| malformed())?;
        let end: i64 = end.parse().map_err(|_| malformed())?;
        let total: u64 = total.parse().map_err(|_| malformed())?;

        let first = i64::try_from(start).map_err(|_| malformed())?;
        if end < first - 1 {
            return Err(malformed());
        }

        Ok(Self { start, end, total })
    }
}

/// One decoded page of audit records plus the collection total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditPage {
    pub records: Vec<AuditRecord>,
    pub range: ContentRange,
}

impl AuditPage {
    pub fn decode(content_range: Option<&str>, body: &[u8]) -> Result<Self, DecodeError> {
        let range = ContentRange::parse(content_range.ok_or(DecodeError::MissingContentRange)?)?;
        let records: Vec<AuditRecord> = serde_json::from_slice(body)?;
        Ok(Self { records, range })
    }

    pub fn total(&self) -> u64 {
        self.range.total
    }
}
