// Repository trait for the KPI catalog and its chart series
use crate::domain::chart::{ChartKind, SeriesData};
use crate::domain::kpi::{Kpi, KpiId};

pub trait KpiRepository: Send + Sync {
    /// All catalog entries in catalog order
    fn list_kpis(&self) -> Vec<Kpi>;

    fn find_kpi(&self, id: &KpiId) -> Option<Kpi>;

    /// Series payload for one chart kind, `None` when the KPI has no series at all
    fn series_for(&self, id: &KpiId, kind: ChartKind) -> Option<SeriesData>;

    /// Marks the KPI as accessible. Returns false for unknown ids.
    fn grant_access(&self, id: &KpiId) -> bool;
}
