use expedientes_models::AuditRecord;
use rust_xlsxwriter::{Format, Workbook};

use super::{ExportError, timestamp_text};
use crate::audit::render_lines;

const HEADERS: [(&str, f64); 6] = [
    ("ID", 8.0),
    ("Fecha", 20.0),
    ("Acción", 12.0),
    ("Entidad", 20.0),
    ("Usuario", 24.0),
    ("Detalle", 70.0),
];

/// Export audit records to an Excel workbook, one row per record.
pub fn export_audits(records: &[AuditRecord]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Auditorias")?;

    let header_format = Format::new().set_bold();
    let detail_format = Format::new().set_text_wrap();

    for (col, (title, width)) in HEADERS.iter().enumerate() {
        let col = col as u16;
        worksheet.write_string_with_format(0, col, *title, &header_format)?;
        worksheet.set_column_width(col, *width)?;
    }

    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_number(row, 0, record.id as f64)?;
        worksheet.write_string(row, 1, timestamp_text(record))?;
        worksheet.write_string(row, 2, &record.action)?;
        worksheet.write_string(row, 3, &record.entity)?;
        worksheet.write_string(row, 4, record.actor_label())?;

        let detail = render_lines(record.description.as_deref()).join("\n");
        worksheet.write_string_with_format(row, 5, detail, &detail_format)?;
    }

    Ok(workbook.save_to_buffer()?)
}
