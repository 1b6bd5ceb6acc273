// Application state for HTTP handlers
use crate::application::catalog_service::CatalogService;
use crate::application::session_registry::SessionRegistry;

pub struct AppState {
    pub catalog_service: CatalogService,
    pub sessions: SessionRegistry,
}
