use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Search form state for the audit list. Every field is optional and the
/// active ones are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Matches the actor display name or the actor id.
    pub actor_text: Option<String>,
    pub entity_text: Option<String>,
    /// Exact (case-insensitive) action tag.
    pub action_tag: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Looked up under any `IdTransaccion`-like key of the description.
    pub transaction_id: Option<String>,
}

impl FilterCriteria {
    pub fn actor(&self) -> Option<&str> {
        active(&self.actor_text)
    }

    pub fn entity(&self) -> Option<&str> {
        active(&self.entity_text)
    }

    pub fn action(&self) -> Option<&str> {
        active(&self.action_tag)
    }

    pub fn transaction(&self) -> Option<&str> {
        active(&self.transaction_id)
    }

    pub fn has_date_range(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.actor().is_none()
            && self.entity().is_none()
            && self.action().is_none()
            && self.transaction().is_none()
            && !self.has_date_range()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Blank form inputs count as unset.
fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
