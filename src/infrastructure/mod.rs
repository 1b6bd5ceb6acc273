// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_response;
pub mod kpi_catalog;
pub mod memory_layout_store;
