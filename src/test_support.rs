// Shared fixtures for unit tests
use crate::application::editor::{EditorSettings, LayoutEditor};
use crate::application::kpi_repository::KpiRepository;
use crate::domain::chart::{ChartItem, ChartKind, DataPoint, SeriesData};
use crate::domain::geometry::{GridGeometry, Position, Size};
use crate::domain::kpi::{AccessLevel, KpiId};
use crate::infrastructure::config::{CatalogConfig, KpiConfig, SeriesTableConfig};
use crate::infrastructure::kpi_catalog::CatalogKpiRepository;
use std::sync::Arc;

fn kpi_config(
    id: &str,
    name: &str,
    category: &str,
    has_access: bool,
    chart_kinds: Vec<ChartKind>,
    series: Option<SeriesTableConfig>,
) -> KpiConfig {
    KpiConfig {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{} across all business units", name),
        category: category.to_string(),
        access_level: if has_access {
            AccessLevel::Public
        } else {
            AccessLevel::Restricted
        },
        target: 10.0,
        key_questions: vec![],
        data_sources: vec![],
        calculation: String::new(),
        industry_context: String::new(),
        has_access,
        chart_kinds,
        series,
    }
}

fn points(labels: &[&str]) -> Option<Vec<DataPoint>> {
    Some(
        labels
            .iter()
            .enumerate()
            .map(|(i, l)| DataPoint::new(*l, (i + 1) as f64 * 10.0))
            .collect(),
    )
}

/// Three KPIs: a public one with series, a restricted one, and one without series.
pub fn sample_catalog_config() -> CatalogConfig {
    CatalogConfig {
        kpis: vec![
            kpi_config(
                "revenue-growth",
                "Revenue Growth",
                "Financial",
                true,
                vec![ChartKind::Bar, ChartKind::Line, ChartKind::Pie, ChartKind::Area],
                Some(SeriesTableConfig {
                    bar: points(&["Oncology", "Cardiology"]),
                    line: points(&["Jan", "Feb", "Mar"]),
                    pie: points(&["Europe", "Asia"]),
                    ..Default::default()
                }),
            ),
            kpi_config(
                "operational-efficiency",
                "Operational Efficiency",
                "Operations",
                false,
                vec![ChartKind::Bar, ChartKind::Radar],
                Some(SeriesTableConfig {
                    bar: points(&["Manufacturing"]),
                    radar: points(&["Yield", "Delivery"]),
                    ..Default::default()
                }),
            ),
            kpi_config("headcount", "Headcount", "Operations", true, vec![ChartKind::Bar], None),
        ],
    }
}

pub fn sample_repository() -> Arc<dyn KpiRepository> {
    Arc::new(CatalogKpiRepository::from_config(&sample_catalog_config()))
}

/// 25px cells, 100px minimum, 8x8 default charts, 10 planner columns, 1000-unit grid.
pub fn sample_settings() -> EditorSettings {
    EditorSettings {
        geometry: GridGeometry::new(25, 100),
        default_size: Size::new(8, 8),
        placement_columns: 10,
        max_extent: 1000,
    }
}

/// 25px cells with a one-unit minimum, for hand-built small layouts.
pub fn unit_settings() -> EditorSettings {
    EditorSettings {
        geometry: GridGeometry::new(25, 25),
        default_size: Size::new(2, 2),
        placement_columns: 10,
        max_extent: 1000,
    }
}

pub fn editor() -> LayoutEditor {
    LayoutEditor::new(sample_settings(), sample_repository())
}

pub fn seeded_item(x: i64, y: i64, width: i64, height: i64) -> ChartItem {
    ChartItem::new(
        ChartKind::Bar,
        "Seeded".into(),
        Position::new(x, y),
        Size::new(width, height),
        KpiId::from("revenue-growth"),
        SeriesData::Bar(vec![]),
    )
}
