// Chart item domain model
use super::geometry::{Position, Rect, Size};
use super::kpi::KpiId;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Area,
    Radar,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Area => "area",
            ChartKind::Radar => "radar",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

impl DataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Series payload handed to the renderer, tagged by the chart kind it was resolved for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "points", rename_all = "lowercase")]
pub enum SeriesData {
    Bar(Vec<DataPoint>),
    Line(Vec<DataPoint>),
    Pie(Vec<DataPoint>),
    Area(Vec<DataPoint>),
    Radar(Vec<DataPoint>),
}

impl SeriesData {
    pub fn for_kind(kind: ChartKind, points: Vec<DataPoint>) -> Self {
        match kind {
            ChartKind::Bar => SeriesData::Bar(points),
            ChartKind::Line => SeriesData::Line(points),
            ChartKind::Pie => SeriesData::Pie(points),
            ChartKind::Area => SeriesData::Area(points),
            ChartKind::Radar => SeriesData::Radar(points),
        }
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            SeriesData::Bar(_) => ChartKind::Bar,
            SeriesData::Line(_) => ChartKind::Line,
            SeriesData::Pie(_) => ChartKind::Pie,
            SeriesData::Area(_) => ChartKind::Area,
            SeriesData::Radar(_) => ChartKind::Radar,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        Self(format!("item-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A placed, sized chart widget bound to one KPI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartItem {
    pub id: ItemId,
    pub kind: ChartKind,
    pub title: String,
    pub position: Position,
    pub size: Size,
    pub source: KpiId,
    pub series: SeriesData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ChartItem {
    pub fn new(
        kind: ChartKind,
        title: String,
        position: Position,
        size: Size,
        source: KpiId,
        series: SeriesData,
    ) -> Self {
        Self {
            id: ItemId::generate(),
            kind,
            title,
            position,
            size,
            source,
            series,
            comment: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_serializes_with_kind_tag() {
        let series = SeriesData::for_kind(ChartKind::Pie, vec![DataPoint::new("Europe", 30.0)]);
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["kind"], "pie");
        assert_eq!(json["points"][0]["label"], "Europe");
        assert_eq!(series.kind(), ChartKind::Pie);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = ItemId::generate();
        let b = ItemId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("item-"));
    }
}
