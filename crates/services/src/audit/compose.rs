use chrono::{DateTime, Utc};
use expedientes_models::AuditAction;
use serde::Serialize;
use serde_json::{Value, json};

/// Column limits of the audit table.
pub const MAX_ACTION_LEN: usize = 50;
pub const MAX_ENTITY_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Change description in the envelope shapes the list screens know how to
/// flatten: `{"id", "data"}`, `{"id", "changes"}` and `{"id"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditDescription(Value);

impl AuditDescription {
    pub fn creation(entity_id: impl Serialize, payload: Option<Value>) -> Self {
        Self(json!({
            "id": entity_id,
            "data": payload.unwrap_or_else(|| json!({})),
        }))
    }

    pub fn update(entity_id: impl Serialize, changes: Option<Value>) -> Self {
        Self(json!({
            "id": entity_id,
            "changes": changes.unwrap_or_else(|| json!({})),
        }))
    }

    pub fn deletion(entity_id: impl Serialize) -> Self {
        Self(json!({ "id": entity_id }))
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn encode(&self) -> String {
        self.0.to_string()
    }
}

/// Insert payload for a new audit row (`POST /auditorias`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAuditRecord {
    #[serde(rename = "Accion")]
    pub action: String,
    #[serde(rename = "Entidad")]
    pub entity: String,
    #[serde(rename = "Descripcion")]
    pub description: String,
    #[serde(rename = "AudFecha")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "AudUsuario")]
    pub actor_id: i64,
}

impl NewAuditRecord {
    pub fn new(action: &AuditAction, entity: &str, description: &AuditDescription) -> Self {
        Self::from_raw(action.as_str(), entity, &description.encode())
    }

    /// Free-form variant; each column is cut to its limit on a char boundary.
    pub fn from_raw(action: &str, entity: &str, description: &str) -> Self {
        Self {
            action: truncate(action, MAX_ACTION_LEN),
            entity: truncate(entity, MAX_ENTITY_LEN),
            description: truncate(description, MAX_DESCRIPTION_LEN),
            timestamp: Utc::now(),
            actor_id: 0,
        }
    }

    pub fn by(mut self, actor_id: i64) -> Self {
        self.actor_id = actor_id;
        self
    }

    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
