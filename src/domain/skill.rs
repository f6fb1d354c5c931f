//! Skill domain models returned by the search API.
//!
//! [`SkillSummary`] is the row shown in the results panel; [`SkillDetail`]
//! and its image list back the details panel. Field names follow the
//! backend's JSON so the types deserialize directly.

use serde::{Deserialize, Serialize};

/// A search hit. Opaque beyond what the results list displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

/// Category reference embedded in a skill detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    #[serde(default)]
    pub name: String,
}

/// Full record for a selected skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: CategoryRef,
    #[serde(default)]
    pub amount: Option<serde_json::Number>,
    #[serde(default)]
    pub rate: String,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub delivery_method_online: bool,
    #[serde(default)]
    pub delivery_method_in_person: bool,
    #[serde(default)]
    pub description: String,
}

impl SkillDetail {
    /// Rate with underscores spaced out, e.g. `fixed_cost` → `fixed cost`.
    #[must_use]
    pub fn rate_label(&self) -> String {
        self.rate.replace('_', " ")
    }

    /// `"$ 40 hourly"`, or just the rate when no amount was given.
    #[must_use]
    pub fn pricing_label(&self) -> String {
        match &self.amount {
            Some(amount) => format!("$ {amount} {}", self.rate_label()),
            None => self.rate_label(),
        }
    }
}

/// One image attached to a skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillImage {
    pub image: String,
}
