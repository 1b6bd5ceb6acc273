// In-memory layout store for one session
use crate::application::layout_repository::LayoutStore;
use crate::domain::layout::{Layout, LayoutId};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct MemoryLayoutStore {
    layouts: Vec<Layout>,
    index: HashMap<LayoutId, usize>,
}

impl MemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn reindex(&mut self) {
        self.index = self
            .layouts
            .iter()
            .enumerate()
            .map(|(i, l)| (l.id.clone(), i))
            .collect();
    }
}

impl LayoutStore for MemoryLayoutStore {
    fn save(&mut self, layout: Layout) {
        match self.index.get(&layout.id) {
            Some(&i) => self.layouts[i] = layout,
            None => {
                self.index.insert(layout.id.clone(), self.layouts.len());
                self.layouts.push(layout);
            }
        }
    }

    fn get(&self, id: &LayoutId) -> Option<&Layout> {
        self.index.get(id).map(|&i| &self.layouts[i])
    }

    fn list(&self) -> Vec<Layout> {
        self.layouts.clone()
    }

    fn delete(&mut self, id: &LayoutId) -> bool {
        match self.index.remove(id) {
            Some(i) => {
                self.layouts.remove(i);
                self.reindex();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn layout(id: &str, name: &str) -> Layout {
        Layout::new(LayoutId::from(id), name.to_string(), vec![], Utc::now())
    }

    #[test]
    fn test_save_replaces_in_place() {
        let mut store = MemoryLayoutStore::new();
        store.save(layout("a", "First"));
        store.save(layout("b", "Second"));
        store.save(layout("a", "First renamed"));

        let names: Vec<_> = store.list().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["First renamed", "Second"]);
    }

    #[test]
    fn test_delete_keeps_index_consistent() {
        let mut store = MemoryLayoutStore::new();
        store.save(layout("a", "A"));
        store.save(layout("b", "B"));
        store.save(layout("c", "C"));

        assert!(store.delete(&LayoutId::from("a")));
        assert!(!store.delete(&LayoutId::from("a")));
        assert_eq!(store.get(&LayoutId::from("c")).map(|l| l.name.as_str()), Some("C"));
        assert_eq!(store.list().len(), 2);
    }
}
