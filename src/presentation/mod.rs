// Presentation layer - HTTP state, routes and handlers
pub mod api_error;
pub mod app_state;
pub mod handlers;
pub mod router;
pub mod session_handlers;
