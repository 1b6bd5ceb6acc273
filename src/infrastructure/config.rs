use crate::application::editor::EditorSettings;
use crate::application::session_registry::SessionLimits;
use crate::domain::chart::{ChartKind, DataPoint};
use crate::domain::geometry::{GridGeometry, Size};
use crate::domain::kpi::{AccessLevel, Kpi, KpiId};
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub grid: GridSettings,
    pub access: AccessSettings,
    pub sessions: SessionSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GridSettings {
    pub base_size: u32,
    pub min_chart_px: u32,
    pub placement_columns: i64,
    pub default_item_width: i64,
    pub default_item_height: i64,
    pub max_extent: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AccessSettings {
    pub approval_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub idle_timeout_secs: u64,
    pub max_sessions: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    #[serde(default)]
    pub kpis: Vec<KpiConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct KpiConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub access_level: AccessLevel,
    pub target: f64,
    #[serde(default)]
    pub key_questions: Vec<String>,
    #[serde(default)]
    pub data_sources: Vec<String>,
    #[serde(default)]
    pub calculation: String,
    #[serde(default)]
    pub industry_context: String,
    pub has_access: bool,
    #[serde(default)]
    pub chart_kinds: Vec<ChartKind>,
    pub series: Option<SeriesTableConfig>,
}

/// Series tables per chart kind. Area charts fall back to the line table.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SeriesTableConfig {
    pub bar: Option<Vec<DataPoint>>,
    pub line: Option<Vec<DataPoint>>,
    pub pie: Option<Vec<DataPoint>>,
    pub area: Option<Vec<DataPoint>>,
    pub radar: Option<Vec<DataPoint>>,
}

impl SeriesTableConfig {
    pub fn points_for(&self, kind: ChartKind) -> Vec<DataPoint> {
        let table = match kind {
            ChartKind::Bar => self.bar.as_ref(),
            ChartKind::Line => self.line.as_ref(),
            ChartKind::Pie => self.pie.as_ref(),
            ChartKind::Area => self.area.as_ref().or(self.line.as_ref()),
            ChartKind::Radar => self.radar.as_ref(),
        };
        table.cloned().unwrap_or_default()
    }
}

impl KpiConfig {
    pub fn to_kpi(&self) -> Kpi {
        Kpi {
            id: KpiId::from(self.id.as_str()),
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            access_level: self.access_level,
            target: self.target,
            key_questions: self.key_questions.clone(),
            data_sources: self.data_sources.clone(),
            calculation: self.calculation.clone(),
            industry_context: self.industry_context.clone(),
            has_access: self.has_access,
            chart_kinds: self.chart_kinds.clone(),
        }
    }
}

impl DashboardConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.server.host, self.server.port).parse()?)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let grid = &self.grid;
        anyhow::ensure!(grid.base_size > 0, "grid.base_size must be positive");
        anyhow::ensure!(grid.min_chart_px > 0, "grid.min_chart_px must be positive");
        anyhow::ensure!(grid.placement_columns > 0, "grid.placement_columns must be positive");
        anyhow::ensure!(
            grid.default_item_width > 0 && grid.default_item_height > 0,
            "grid default item size must be positive"
        );
        anyhow::ensure!(
            grid.max_extent >= grid.default_item_width.max(grid.default_item_height),
            "grid.max_extent must fit a default chart"
        );
        anyhow::ensure!(self.sessions.idle_timeout_secs > 0, "sessions.idle_timeout_secs must be positive");
        anyhow::ensure!(self.sessions.max_sessions > 0, "sessions.max_sessions must be positive");
        Ok(())
    }
}

impl GridSettings {
    pub fn editor_settings(&self) -> EditorSettings {
        let geometry = GridGeometry::new(self.base_size, self.min_chart_px);
        EditorSettings {
            geometry,
            default_size: geometry.clamp_size(Size::new(
                self.default_item_width,
                self.default_item_height,
            )),
            placement_columns: self.placement_columns,
            max_extent: self.max_extent,
        }
    }
}

impl SessionSettings {
    pub fn limits(&self) -> SessionLimits {
        SessionLimits {
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
            max_sessions: self.max_sessions,
        }
    }
}

impl AccessSettings {
    pub fn approval_delay(&self) -> Duration {
        Duration::from_millis(self.approval_delay_ms)
    }
}

fn dashboard_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("grid.base_size", 25)?
        .set_default("grid.min_chart_px", 100)?
        .set_default("grid.placement_columns", 10)?
        .set_default("grid.default_item_width", 8)?
        .set_default("grid.default_item_height", 8)?
        .set_default("grid.max_extent", 1000)?
        .set_default("access.approval_delay_ms", 2000)?
        .set_default("sessions.idle_timeout_secs", 1800)?
        .set_default("sessions.max_sessions", 1000)
}

fn build_dashboard_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<DashboardConfig> {
    let config: DashboardConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let builder = dashboard_defaults()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("KPI_DASHBOARD")
                .separator("__")
                .try_parsing(true),
        );

    build_dashboard_config(builder)
}

pub fn load_catalog_config() -> anyhow::Result<CatalogConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/catalog"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
