// Session registry - One isolated draft and layout store per session id
use crate::application::editor::{EditorSettings, LayoutEditor};
use crate::application::kpi_repository::KpiRepository;
use crate::application::layout_repository::LayoutStore;
use crate::application::layout_session::LayoutSession;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

pub type StoreFactory = fn() -> Box<dyn LayoutStore>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionLimits {
    /// Sessions untouched for this long are dropped on the next access
    pub idle_timeout: Duration,
    /// Least recently used sessions are dropped beyond this count
    pub max_sessions: usize,
}

struct SessionEntry {
    session: Arc<Mutex<LayoutSession>>,
    last_touched: Instant,
    touch: u64,
}

#[derive(Default)]
struct SessionTable {
    entries: HashMap<String, SessionEntry>,
    clock: u64,
}

impl SessionTable {
    fn evict_idle(&mut self, now: Instant, idle_timeout: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|id, entry| {
            let keep = now.saturating_duration_since(entry.last_touched) < idle_timeout;
            if !keep {
                tracing::debug!("Evicting idle dashboard session {}", id);
            }
            keep
        });
        before - self.entries.len()
    }

    fn evict_least_recent(&mut self, keep: usize) {
        while self.entries.len() > keep {
            let Some(oldest) = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.touch)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            self.entries.remove(&oldest);
            tracing::info!("Session limit reached, evicted dashboard session {}", oldest);
        }
    }
}

pub struct SessionRegistry {
    settings: EditorSettings,
    kpis: Arc<dyn KpiRepository>,
    new_store: StoreFactory,
    limits: SessionLimits,
    table: Mutex<SessionTable>,
}

impl SessionRegistry {
    pub fn new(
        settings: EditorSettings,
        kpis: Arc<dyn KpiRepository>,
        new_store: StoreFactory,
        limits: SessionLimits,
    ) -> Self {
        Self {
            settings,
            kpis,
            new_store,
            limits,
            table: Mutex::new(SessionTable::default()),
        }
    }

    /// Runs `f` against the session, creating it on first use.
    pub fn with_session<R>(&self, session_id: &str, f: impl FnOnce(&mut LayoutSession) -> R) -> R {
        let session = match self.checkout(session_id) {
            Some(session) => session,
            None => self.insert(session_id),
        };
        let mut guard = session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Read-only access. Unknown ids see a fresh session that is not kept.
    pub fn read_session<R>(&self, session_id: &str, f: impl FnOnce(&LayoutSession) -> R) -> R {
        match self.checkout(session_id) {
            Some(session) => {
                let guard = session.lock().unwrap_or_else(PoisonError::into_inner);
                f(&guard)
            }
            None => f(&self.new_session()),
        }
    }

    /// Drops sessions idle at `now`; returns how many went.
    pub fn evict_idle(&self, now: Instant) -> usize {
        self.lock_table().evict_idle(now, self.limits.idle_timeout)
    }

    fn checkout(&self, session_id: &str) -> Option<Arc<Mutex<LayoutSession>>> {
        let now = Instant::now();
        let mut table = self.lock_table();
        table.evict_idle(now, self.limits.idle_timeout);

        table.clock += 1;
        let touch = table.clock;
        let entry = table.entries.get_mut(session_id)?;
        entry.last_touched = now;
        entry.touch = touch;
        Some(entry.session.clone())
    }

    fn insert(&self, session_id: &str) -> Arc<Mutex<LayoutSession>> {
        let mut table = self.lock_table();
        if let Some(entry) = table.entries.get(session_id) {
            return entry.session.clone();
        }

        table.evict_least_recent(self.limits.max_sessions.saturating_sub(1));
        table.clock += 1;
        let touch = table.clock;

        tracing::debug!("Creating dashboard session {}", session_id);
        let session = Arc::new(Mutex::new(self.new_session()));
        table.entries.insert(
            session_id.to_string(),
            SessionEntry {
                session: session.clone(),
                last_touched: Instant::now(),
                touch,
            },
        );
        session
    }

    fn new_session(&self) -> LayoutSession {
        let editor = LayoutEditor::new(self.settings, self.kpis.clone());
        LayoutSession::new(editor, (self.new_store)())
    }

    fn lock_table(&self) -> MutexGuard<'_, SessionTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    fn session_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.lock_table().entries.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::ChartKind;
    use crate::domain::kpi::KpiId;
    use crate::infrastructure::memory_layout_store::MemoryLayoutStore;
    use crate::test_support::{sample_repository, sample_settings};

    fn memory_store() -> Box<dyn LayoutStore> {
        Box::new(MemoryLayoutStore::new())
    }

    fn registry_with(max_sessions: usize) -> SessionRegistry {
        let limits = SessionLimits {
            idle_timeout: Duration::from_secs(60),
            max_sessions,
        };
        SessionRegistry::new(sample_settings(), sample_repository(), memory_store, limits)
    }

    fn registry() -> SessionRegistry {
        registry_with(16)
    }

    #[test]
    fn test_sessions_are_isolated() {
        let registry = registry();

        registry.with_session("alice", |s| {
            s.editor_mut()
                .add_item(ChartKind::Bar, &KpiId::from("revenue-growth"), None)
                .unwrap();
            s.save("Alice's board").unwrap();
        });

        let bob_items = registry.with_session("bob", |s| (s.editor().items().len(), s.list().len()));
        assert_eq!(bob_items, (0, 0));

        let alice = registry.read_session("alice", |s| (s.editor().items().len(), s.list().len()));
        assert_eq!(alice, (1, 1));
    }

    #[test]
    fn test_reads_do_not_create_sessions() {
        let registry = registry();

        let view = registry.read_session("stranger", |s| s.view());
        assert!(view.items.is_empty());
        assert!(!view.has_unsaved_changes);
        assert!(registry.session_ids().is_empty());
    }

    #[test]
    fn test_idle_sessions_are_evicted() {
        let registry = registry();
        registry.with_session("alice", |s| s.editor_mut().rename("Board"));

        assert_eq!(registry.evict_idle(Instant::now()), 0);
        assert_eq!(registry.session_ids(), vec!["alice".to_string()]);

        assert_eq!(registry.evict_idle(Instant::now() + Duration::from_secs(61)), 1);
        assert!(registry.session_ids().is_empty());

        let name = registry.with_session("alice", |s| s.editor().name().to_string());
        assert_eq!(name, "");
    }

    #[test]
    fn test_least_recently_used_session_goes_first() {
        let registry = registry_with(2);
        registry.with_session("a", |_| ());
        registry.with_session("b", |_| ());
        registry.with_session("a", |_| ());
        registry.with_session("c", |_| ());

        assert_eq!(registry.session_ids(), vec!["a".to_string(), "c".to_string()]);
    }
}
