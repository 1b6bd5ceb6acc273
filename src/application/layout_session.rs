// Layout session - Draft, saved layouts and the confirm-before-discard flow
use crate::application::editor::LayoutEditor;
use crate::application::errors::SessionError;
use crate::application::gesture::{DragGesture, GestureCommit, GestureKind, GesturePreview};
use crate::application::layout_repository::LayoutStore;
use crate::domain::chart::ChartItem;
use crate::domain::geometry::PointerPosition;
use crate::domain::layout::{Layout, LayoutId};
use chrono::Utc;
use serde::Serialize;

/// Action parked until the user confirms discarding unsaved changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "layoutId", rename_all = "lowercase")]
pub enum PendingAction {
    Load(LayoutId),
    New,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Completed,
    NeedsConfirmation(PendingAction),
}

/// Snapshot of the draft as seen by clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub layout_id: Option<LayoutId>,
    pub name: String,
    pub items: Vec<ChartItem>,
    pub has_unsaved_changes: bool,
    pub pending: Option<PendingAction>,
    pub gesture: Option<GestureKind>,
}

pub struct LayoutSession {
    editor: LayoutEditor,
    store: Box<dyn LayoutStore>,
    pending: Option<PendingAction>,
    gesture: Option<DragGesture>,
}

impl LayoutSession {
    pub fn new(editor: LayoutEditor, store: Box<dyn LayoutStore>) -> Self {
        Self {
            editor,
            store,
            pending: None,
            gesture: None,
        }
    }

    pub fn editor(&self) -> &LayoutEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut LayoutEditor {
        &mut self.editor
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn view(&self) -> DraftView {
        DraftView {
            layout_id: self.editor.layout_id().cloned(),
            name: self.editor.name().to_string(),
            items: self.editor.items().to_vec(),
            has_unsaved_changes: self.editor.has_unsaved_changes(),
            pending: self.pending.clone(),
            gesture: self.gesture.as_ref().map(|g| g.kind().clone()),
        }
    }

    /// Creates the layout on first save, overwrites it afterwards.
    pub fn save(&mut self, name: &str) -> Result<Layout, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::InvalidName);
        }

        let now = Utc::now();
        let items = self.editor.items().to_vec();
        let existing = self
            .editor
            .layout_id()
            .and_then(|id| self.store.get(id))
            .cloned();

        let layout = match existing {
            Some(mut layout) => {
                layout.revise(name.to_string(), items, now);
                layout
            }
            None => {
                let id = self
                    .editor
                    .layout_id()
                    .cloned()
                    .unwrap_or_else(LayoutId::generate);
                Layout::new(id, name.to_string(), items, now)
            }
        };

        self.store.save(layout.clone());
        self.editor.mark_saved(&layout);
        tracing::info!(
            "Saved layout {} ({}) with {} charts",
            layout.id,
            layout.name,
            layout.items.len()
        );
        Ok(layout)
    }

    pub fn list(&self) -> Vec<Layout> {
        self.store.list()
    }

    /// Loads right away on a clean draft, otherwise waits for `confirm`.
    pub fn request_load(&mut self, id: &LayoutId) -> Result<Transition, SessionError> {
        if self.store.get(id).is_none() {
            return Err(SessionError::LayoutNotFound(id.clone()));
        }

        if self.editor.has_unsaved_changes() {
            let action = PendingAction::Load(id.clone());
            self.pending = Some(action.clone());
            return Ok(Transition::NeedsConfirmation(action));
        }

        self.load(id)?;
        Ok(Transition::Completed)
    }

    /// Starts a fresh draft right away on a clean draft, otherwise waits for `confirm`.
    pub fn request_new(&mut self) -> Transition {
        if self.editor.has_unsaved_changes() {
            self.pending = Some(PendingAction::New);
            return Transition::NeedsConfirmation(PendingAction::New);
        }

        self.reset();
        Transition::Completed
    }

    pub fn confirm(&mut self) -> Result<PendingAction, SessionError> {
        let action = self.pending.take().ok_or(SessionError::NothingPending)?;

        match &action {
            PendingAction::Load(id) => self.load(id)?,
            PendingAction::New => self.reset(),
        }
        Ok(action)
    }

    pub fn cancel(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }

    /// Deleting the layout behind the draft resets the draft.
    pub fn delete(&mut self, id: &LayoutId) -> Result<(), SessionError> {
        if !self.store.delete(id) {
            return Err(SessionError::LayoutNotFound(id.clone()));
        }

        if self.pending.as_ref() == Some(&PendingAction::Load(id.clone())) {
            self.pending = None;
        }
        if self.editor.layout_id() == Some(id) {
            self.reset();
        }

        tracing::info!("Deleted layout {}", id);
        Ok(())
    }

    /// Replaces any gesture already in progress.
    pub fn begin_gesture(
        &mut self,
        kind: GestureKind,
        pointer: PointerPosition,
        origin: PointerPosition,
    ) -> Result<(), SessionError> {
        let gesture = DragGesture::begin(&self.editor, kind, pointer, origin)?;
        if self.gesture.replace(gesture).is_some() {
            tracing::debug!("Abandoned unfinished gesture");
        }
        Ok(())
    }

    pub fn update_gesture(&mut self, pointer: PointerPosition) -> Result<GesturePreview, SessionError> {
        let gesture = self.gesture.as_mut().ok_or(SessionError::NoActiveGesture)?;
        Ok(gesture.update(&self.editor, pointer)?)
    }

    pub fn end_gesture(&mut self) -> Result<GestureCommit, SessionError> {
        let gesture = self.gesture.take().ok_or(SessionError::NoActiveGesture)?;
        Ok(gesture.end(&mut self.editor)?)
    }

    pub fn cancel_gesture(&mut self) -> bool {
        self.gesture.take().is_some()
    }

    fn load(&mut self, id: &LayoutId) -> Result<(), SessionError> {
        let layout = self
            .store
            .get(id)
            .ok_or_else(|| SessionError::LayoutNotFound(id.clone()))?;

        self.editor.adopt(layout);
        self.pending = None;
        self.gesture = None;
        tracing::info!("Loaded layout {} ({})", layout.id, layout.name);
        Ok(())
    }

    fn reset(&mut self) {
        self.editor.reset();
        self.pending = None;
        self.gesture = None;
    }
}
