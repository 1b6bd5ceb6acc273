// Domain layer - Plain data and pure rules, no I/O
pub mod chart;
pub mod geometry;
pub mod kpi;
pub mod layout;
