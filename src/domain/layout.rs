// Layout domain model - A named, persisted dashboard arrangement
use super::chart::ChartItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutId(String);

impl LayoutId {
    pub fn generate() -> Self {
        Self(format!("layout-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for LayoutId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for LayoutId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: LayoutId,
    pub name: String,
    pub items: Vec<ChartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Layout {
    pub fn new(id: LayoutId, name: String, items: Vec<ChartItem>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            items,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrites name and items, keeping `created_at`.
    /// `updated_at` never moves backwards.
    pub fn revise(&mut self, name: String, items: Vec<ChartItem>, now: DateTime<Utc>) {
        self.name = name;
        self.items = items;
        self.updated_at = now.max(self.updated_at);
    }
}
