/// Envelope keys the backend wraps payloads in; hidden from labels.
const ENVELOPE_PREFIXES: [&str; 2] = ["data.", "changes."];

/// Strips a leading `data.` or `changes.` (any case) from a flattened label.
pub fn clean_label(label: &str) -> &str {
    ENVELOPE_PREFIXES
        .iter()
        .find_map(|prefix| {
            label
                .get(..prefix.len())
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .map(|_| &label[prefix.len()..])
        })
        .unwrap_or(label)
}
