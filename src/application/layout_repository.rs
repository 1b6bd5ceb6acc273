// Storage trait for saved layouts
use crate::domain::layout::{Layout, LayoutId};

/// Saved layouts of one session, kept in insertion order.
pub trait LayoutStore: Send {
    /// Inserts a new layout or replaces the one with the same id in place
    fn save(&mut self, layout: Layout);

    fn get(&self, id: &LayoutId) -> Option<&Layout>;

    fn list(&self) -> Vec<Layout>;

    /// Returns false when no layout had that id
    fn delete(&mut self, id: &LayoutId) -> bool;
}
