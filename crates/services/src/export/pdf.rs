use expedientes_models::{AuditRecord, FilterCriteria};
use std::io::Write;

use super::{ExportError, REPORT_TITLE, filter_summary, timestamp_text};
use crate::audit::render_lines;

/// Export audit records to a PDF report: title, filter summary, then one
/// block per record with its flattened description.
pub fn export_audits(
    records: &[AuditRecord],
    criteria: &FilterCriteria,
) -> Result<Vec<u8>, ExportError> {
    let mut pdf = SimplePdf::new();

    pdf.add_text(REPORT_TITLE, 16.0, true);
    pdf.add_text("", 8.0, false);
    pdf.add_text(&filter_summary(criteria, records.len()), 9.0, false);
    pdf.add_text("", 12.0, false);

    for record in records {
        let header = [
            format!("#{}", record.id),
            timestamp_text(record),
            record.action.clone(),
            record.entity.clone(),
            record.actor_label(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("   ");
        pdf.add_text(&header, 9.0, true);

        for line in render_lines(record.description.as_deref()) {
            pdf.add_text(&format!("  {line}"), 8.0, false);
        }
        pdf.add_text("", 6.0, false);
    }

    pdf.render()
}

const PAGE_WIDTH: f64 = 612.0; // Letter
const PAGE_HEIGHT: f64 = 792.0;
const MARGIN: f64 = 50.0;
const LINE_HEIGHT_FACTOR: f64 = 1.4;
/// Rough Helvetica advance, as a fraction of the font size.
const AVG_CHAR_WIDTH: f64 = 0.5;

/// Minimal PDF generator using the built-in Helvetica fonts with
/// WinAnsi encoding, so Latin-1 text survives. Breaks pages as needed.
struct SimplePdf {
    lines: Vec<PdfLine>,
}

struct PdfLine {
    text: String,
    font_size: f64,
    bold: bool,
}

impl SimplePdf {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn add_text(&mut self, text: &str, font_size: f64, bold: bool) {
        let max_chars = ((PAGE_WIDTH - 2.0 * MARGIN) / (font_size * AVG_CHAR_WIDTH)) as usize;
        for chunk in wrap(text, max_chars.max(1)) {
            self.lines.push(PdfLine {
                text: chunk,
                font_size,
                bold,
            });
        }
    }

    fn escape_pdf_string(s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '(' => out.push_str("\\("),
                ')' => out.push_str("\\)"),
                ' '..='~' => out.push(c),
                // WinAnsi matches Latin-1 in this range.
                '\u{a0}'..='\u{ff}' => out.push_str(&format!("\\{:03o}", c as u32)),
                _ => out.push('?'),
            }
        }
        out
    }

    /// Splits lines into pages by the vertical space they take.
    fn paginate(&self) -> Vec<&[PdfLine]> {
        let mut pages = Vec::new();
        let mut start = 0;
        let mut y = PAGE_HEIGHT - MARGIN;

        for (i, line) in self.lines.iter().enumerate() {
            let step = line.font_size * LINE_HEIGHT_FACTOR;
            if y - step < MARGIN && i > start {
                pages.push(&self.lines[start..i]);
                start = i;
                y = PAGE_HEIGHT - MARGIN;
            }
            y -= step;
        }
        pages.push(&self.lines[start..]);
        pages
    }

    fn content_stream(lines: &[PdfLine]) -> String {
        let mut stream = String::new();
        let mut y = PAGE_HEIGHT - MARGIN;

        for line in lines {
            y -= line.font_size * LINE_HEIGHT_FACTOR;
            if line.text.is_empty() {
                continue;
            }
            let font_ref = if line.bold { "/F2" } else { "/F1" };
            stream.push_str(&format!(
                "BT\n{} {} Tf\n{} {:.2} Td\n({}) Tj\nET\n",
                font_ref,
                line.font_size,
                MARGIN,
                y,
                Self::escape_pdf_string(&line.text)
            ));
        }
        stream
    }

    fn render(&self) -> Result<Vec<u8>, ExportError> {
        let pages = self.paginate();
        let mut buf = Vec::new();

        // Objects: 1 catalog, 2 page tree, 3-4 fonts, then a
        // (page, content) pair per page.
        let page_obj = |i: usize| 5 + 2 * i;
        let mut offsets: Vec<usize> = Vec::new();

        write!(buf, "%PDF-1.4\n")?;
        buf.extend_from_slice(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n']);

        offsets.push(buf.len());
        write!(buf, "1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n")?;

        let kids = (0..pages.len())
            .map(|i| format!("{} 0 R", page_obj(i)))
            .collect::<Vec<_>>()
            .join(" ");
        offsets.push(buf.len());
        write!(
            buf,
            "2 0 obj\n<< /Type /Pages /Kids [{}] /Count {} >>\nendobj\n",
            kids,
            pages.len()
        )?;

        for (num, base_font) in [(3, "Helvetica"), (4, "Helvetica-Bold")] {
            offsets.push(buf.len());
            write!(
                buf,
                "{num} 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /{base_font} /Encoding /WinAnsiEncoding >>\nendobj\n"
            )?;
        }

        for (i, lines) in pages.iter().enumerate() {
            let stream = Self::content_stream(lines);
            let stream_bytes = stream.as_bytes();

            offsets.push(buf.len());
            write!(
                buf,
                "{} 0 obj\n<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Contents {} 0 R /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> >>\nendobj\n",
                page_obj(i),
                PAGE_WIDTH,
                PAGE_HEIGHT,
                page_obj(i) + 1
            )?;

            offsets.push(buf.len());
            write!(
                buf,
                "{} 0 obj\n<< /Length {} >>\nstream\n",
                page_obj(i) + 1,
                stream_bytes.len()
            )?;
            buf.extend_from_slice(stream_bytes);
            write!(buf, "\nendstream\nendobj\n")?;
        }

        let xref_start = buf.len();
        write!(buf, "xref\n0 {}\n", offsets.len() + 1)?;
        write!(buf, "0000000000 65535 f \n")?;
        for offset in &offsets {
            write!(buf, "{:010} 00000 n \n", offset)?;
        }

        write!(
            buf,
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            offsets.len() + 1,
            xref_start
        )?;

        Ok(buf)
    }
}

/// Greedy word wrap; words longer than `max_chars` are split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split(' ') {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
