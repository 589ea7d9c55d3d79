use expedientes_models::{AuditRecord, FilterCriteria};
use serde_json::Value;

const TRANSACTION_KEY: &str = "idtransaccion";

/// Records matching every active criterion, in input order.
pub fn filter_records<'a>(
    records: &'a [AuditRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a AuditRecord> {
    if criteria.is_empty() {
        return records.iter().collect();
    }
    records.iter().filter(|r| matches(r, criteria)).collect()
}

pub fn matches(record: &AuditRecord, criteria: &FilterCriteria) -> bool {
    if let Some(actor) = criteria.actor() {
        let needle = actor.to_lowercase();
        let by_name = record
            .actor_name
            .as_deref()
            .is_some_and(|name| name.to_lowercase().contains(&needle));
        let by_id = record
            .actor_id
            .is_some_and(|id| id.to_string().contains(&needle));
        if !by_name && !by_id {
            return false;
        }
    }

    if let Some(entity) = criteria.entity() {
        if !contains_ci(&record.entity, entity) {
            return false;
        }
    }

    if let Some(action) = criteria.action() {
        if record.action.to_lowercase() != action.to_lowercase() {
            return false;
        }
    }

    if criteria.has_date_range() {
        // Day bounds are inclusive UTC calendar days.
        let Some(day) = record.timestamp.map(|ts| ts.date_naive()) else {
            return false;
        };
        if criteria.date_from.is_some_and(|from| day < from) {
            return false;
        }
        if criteria.date_to.is_some_and(|to| day > to) {
            return false;
        }
    }

    if let Some(transaction) = criteria.transaction() {
        if !matches_transaction(record.description.as_deref(), transaction) {
            return false;
        }
    }

    true
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Looks for `needle` under any key naming a transaction id, at any depth.
/// Free-text descriptions are searched as plain text.
fn matches_transaction(description: Option<&str>, needle: &str) -> bool {
    let Some(description) = description.filter(|d| !d.is_empty()) else {
        return false;
    };
    let needle = needle.to_lowercase();
    match serde_json::from_str::<Value>(description) {
        Ok(value) => search_transaction(&value, &needle),
        Err(_) => description.to_lowercase().contains(&needle),
    }
}

fn search_transaction(value: &Value, needle: &str) -> bool {
    match value {
        Value::Object(map) => map.iter().any(|(key, item)| {
            (key.to_lowercase().contains(TRANSACTION_KEY)
                && scalar_text(item).to_lowercase().contains(needle))
                || search_transaction(item, needle)
        }),
        Value::Array(items) => items.iter().any(|item| search_transaction(item, needle)),
        _ => false,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
