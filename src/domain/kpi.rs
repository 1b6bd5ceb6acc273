// KPI catalog domain model
use super::chart::ChartKind;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KpiId(String);

impl KpiId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for KpiId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for KpiId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for KpiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    Restricted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub id: KpiId,
    pub name: String,
    pub description: String,
    pub category: String,
    pub access_level: AccessLevel,
    pub target: f64,
    pub key_questions: Vec<String>,
    pub data_sources: Vec<String>,
    pub calculation: String,
    pub industry_context: String,
    pub has_access: bool,
    pub chart_kinds: Vec<ChartKind>,
}

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "all";

impl Kpi {
    pub fn supports(&self, kind: ChartKind) -> bool {
        self.chart_kinds.contains(&kind)
    }

    /// Category filter plus case-insensitive search over name and description.
    pub fn matches(&self, category: Option<&str>, search: Option<&str>) -> bool {
        let category_ok = match category {
            None => true,
            Some(c) => c == ALL_CATEGORIES || c == self.category,
        };

        let search_ok = match search.map(str::trim).filter(|s| !s.is_empty()) {
            None => true,
            Some(s) => {
                let needle = s.to_lowercase();
                self.name.to_lowercase().contains(&needle)
                    || self.description.to_lowercase().contains(&needle)
            }
        };

        category_ok && search_ok
    }
}
