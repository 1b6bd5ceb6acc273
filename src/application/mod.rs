// Application layer - Use cases and the ports they depend on
pub mod catalog_service;
pub mod collision;
pub mod editor;
pub mod errors;
pub mod gesture;
pub mod kpi_repository;
pub mod layout_repository;
pub mod layout_session;
pub mod placement;
pub mod session_registry;
