use expedientes_models::DescriptionEntry;
use serde_json::{Number, Value};
use tracing::warn;

use super::label::clean_label;

const DEFAULT_LABEL: &str = "Valor";
const NULL_VALUE: &str = "Sin datos";
const EMPTY_ARRAY_VALUE: &str = "[]";
const RAW_LABEL: &str = "Detalle";
const NO_DESCRIPTION: &str = "Sin detalle disponible";

/// Flattens a JSON value into `(label, value)` pairs, depth-first.
///
/// Arrays contribute `prefix[i]` paths, objects `prefix.key` paths in the
/// order the keys appear in the document. Every leaf, `null` and empty
/// array yields exactly one entry.
pub fn flatten(value: &Value, prefix: &str) -> Vec<DescriptionEntry> {
    let mut entries = Vec::new();
    flatten_into(value, prefix, &mut entries);
    entries
}

fn flatten_into(value: &Value, prefix: &str, out: &mut Vec<DescriptionEntry>) {
    match value {
        Value::Null => out.push(leaf(prefix, NULL_VALUE.to_string())),
        Value::Array(items) if items.is_empty() => {
            out.push(leaf(prefix, EMPTY_ARRAY_VALUE.to_string()))
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(item, &format!("{prefix}[{index}]"), out);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(item, &path, out);
            }
        }
        Value::String(text) => out.push(leaf(prefix, text.clone())),
        Value::Bool(flag) => out.push(leaf(prefix, flag.to_string())),
        Value::Number(number) => out.push(leaf(prefix, number_text(number))),
    }
}

fn leaf(prefix: &str, value: String) -> DescriptionEntry {
    let label = clean_label(prefix);
    let label = if label.is_empty() { DEFAULT_LABEL } else { label };
    DescriptionEntry::new(label, value)
}

/// Integral floats below `1e21` print as plain digits (`3.0` -> `3`,
/// `1e16` -> `10000000000000000`); larger or fractional ones keep the JSON
/// form.
fn number_text(number: &Number) -> String {
    if let Some(f) = number.as_f64().filter(|_| number.is_f64()) {
        if f == 0.0 {
            return "0".to_string();
        }
        if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
            return format!("{f}");
        }
    }
    number.to_string()
}

/// Turns a stored description into display entries.
///
/// Descriptions that are not valid JSON come back as a single `Detalle`
/// entry holding the raw text. An absent description has no entries.
pub fn parse_description(raw: Option<&str>) -> Vec<DescriptionEntry> {
    let Some(raw) = raw.filter(|r| !r.is_empty()) else {
        return Vec::new();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(value) => flatten(&value, ""),
        Err(e) => {
            warn!(error = %e, "Audit description is not JSON, showing raw text");
            vec![DescriptionEntry::new(RAW_LABEL, raw)]
        }
    }
}

/// `label: value` lines for reports.
pub fn render_lines(raw: Option<&str>) -> Vec<String> {
    match raw.filter(|r| !r.is_empty()) {
        None => vec![NO_DESCRIPTION.to_string()],
        Some(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(value) => flatten(&value, "").iter().map(ToString::to_string).collect(),
            Err(_) => vec![raw.to_string()],
        },
    }
}
