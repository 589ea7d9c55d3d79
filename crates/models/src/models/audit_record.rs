use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

/// One row of the audit log, as returned by `GET /auditorias`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    #[serde(rename = "IdAuditoria")]
    pub id: i64,
    #[serde(rename = "Accion")]
    pub action: String,
    #[serde(rename = "Entidad")]
    pub entity: String,
    /// JSON-encoded change description; free text on legacy rows.
    #[serde(rename = "Descripcion", default)]
    pub description: Option<String>,
    #[serde(
        rename = "AudFecha",
        default,
        deserialize_with = "timestamp::deserialize_option",
        serialize_with = "timestamp::serialize_option"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(rename = "AudUsuario", default)]
    pub actor_id: Option<i64>,
    #[serde(rename = "UsuarioNombre", default)]
    pub actor_name: Option<String>,
}

impl AuditRecord {
    pub fn action_kind(&self) -> AuditAction {
        AuditAction::from_tag(&self.action)
    }

    /// Display name when known, otherwise the numeric actor id.
    pub fn actor_label(&self) -> String {
        match (&self.actor_name, self.actor_id) {
            (Some(name), _) if !name.is_empty() => name.clone(),
            (_, Some(id)) => id.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Login,
    Other(String),
}

impl AuditAction {
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "create" => Self::Create,
            "update" => Self::Update,
            "delete" => Self::Delete,
            "login" => Self::Login,
            _ => Self::Other(tag.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Login => "LOGIN",
            Self::Other(tag) => tag,
        }
    }

    /// Style class used by list screens; only mutations get their own badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Login | Self::Other(_) => "default",
        }
    }
}
