pub mod excel;
pub mod pdf;

use expedientes_models::{AuditRecord, FilterCriteria};
use thiserror::Error;

pub use excel::export_audits as export_audits_xlsx;
pub use pdf::export_audits as export_audits_pdf;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub const REPORT_TITLE: &str = "Reporte de Auditorías";

/// `"Total de registros: 3 | Filtros: Usuario: juan - Desde: 01/06/2024"`.
pub fn filter_summary(criteria: &FilterCriteria, total: usize) -> String {
    let mut summary = format!("Total de registros: {total}");
    if criteria.is_empty() {
        return summary;
    }

    let mut parts = Vec::new();
    if let Some(actor) = criteria.actor() {
        parts.push(format!("Usuario: {actor}"));
    }
    if let Some(entity) = criteria.entity() {
        parts.push(format!("Entidad: {entity}"));
    }
    if let Some(action) = criteria.action() {
        parts.push(format!("Acción: {action}"));
    }
    if let Some(transaction) = criteria.transaction() {
        parts.push(format!("ID Transacción: {transaction}"));
    }
    if let Some(from) = criteria.date_from {
        parts.push(format!("Desde: {}", from.format("%d/%m/%Y")));
    }
    if let Some(to) = criteria.date_to {
        parts.push(format!("Hasta: {}", to.format("%d/%m/%Y")));
    }

    summary.push_str(" | Filtros: ");
    summary.push_str(&parts.join(" - "));
    summary
}

pub(crate) fn timestamp_text(record: &AuditRecord) -> String {
    record
        .timestamp
        .map(|ts| ts.format("%d/%m/%Y %H:%M:%S").to_string())
        .unwrap_or_default()
}
