// In-memory KPI catalog backed by the catalog configuration
use crate::application::kpi_repository::KpiRepository;
use crate::domain::chart::{ChartKind, SeriesData};
use crate::domain::kpi::{Kpi, KpiId};
use crate::infrastructure::config::{CatalogConfig, SeriesTableConfig};
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone)]
struct CatalogEntry {
    kpi: Kpi,
    series: Option<SeriesTableConfig>,
}

#[derive(Debug)]
pub struct CatalogKpiRepository {
    entries: RwLock<Vec<CatalogEntry>>,
}

impl CatalogKpiRepository {
    pub fn from_config(config: &CatalogConfig) -> Self {
        let entries = config
            .kpis
            .iter()
            .map(|k| CatalogEntry {
                kpi: k.to_kpi(),
                series: k.series.clone(),
            })
            .collect();

        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl KpiRepository for CatalogKpiRepository {
    fn list_kpis(&self) -> Vec<Kpi> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.iter().map(|e| e.kpi.clone()).collect()
    }

    fn find_kpi(&self, id: &KpiId) -> Option<Kpi> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.iter().find(|e| &e.kpi.id == id).map(|e| e.kpi.clone())
    }

    fn series_for(&self, id: &KpiId, kind: ChartKind) -> Option<SeriesData> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.iter().find(|e| &e.kpi.id == id)?;
        let table = entry.series.as_ref()?;
        Some(SeriesData::for_kind(kind, table.points_for(kind)))
    }

    fn grant_access(&self, id: &KpiId) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.iter_mut().find(|e| &e.kpi.id == id) {
            Some(entry) => {
                entry.kpi.has_access = true;
                true
            }
            None => false,
        }
    }
}
