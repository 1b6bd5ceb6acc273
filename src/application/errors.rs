// Error types for layout editing, sessions and the KPI catalog
use crate::domain::chart::{ChartKind, ItemId};
use crate::domain::geometry::GridUnit;
use crate::domain::kpi::KpiId;
use crate::domain::layout::LayoutId;
use thiserror::Error;

/// Every variant means the operation did not happen and state is unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EditorError {
    #[error("chart item {0} not found")]
    ItemNotFound(ItemId),

    #[error("KPI {0} not found")]
    KpiNotFound(KpiId),

    #[error("access to KPI {0} has not been granted")]
    AccessDenied(KpiId),

    #[error("KPI {kpi} does not offer {kind} charts")]
    UnsupportedChartKind { kpi: KpiId, kind: ChartKind },

    #[error("KPI {0} has no series data")]
    NoSeriesData(KpiId),

    #[error("chart would overlap another chart")]
    Collision,

    #[error("chart must stay inside the {extent}x{extent} grid")]
    OutOfBounds { extent: GridUnit },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("layout name must not be empty")]
    InvalidName,

    #[error("layout {0} not found")]
    LayoutNotFound(LayoutId),

    #[error("no action is waiting for confirmation")]
    NothingPending,

    #[error("no drag gesture in progress")]
    NoActiveGesture,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("KPI {0} not found")]
    KpiNotFound(KpiId),
}
