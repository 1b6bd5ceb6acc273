// Drag gestures - begin / update / end protocol over the editor
use crate::application::editor::LayoutEditor;
use crate::application::errors::EditorError;
use crate::domain::chart::{ChartItem, ChartKind, ItemId};
use crate::domain::geometry::{PixelRect, PointerPosition, Position, Rect, Size};
use crate::domain::kpi::KpiId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GestureKind {
    /// Drag an existing chart to a new cell
    Move { item: ItemId },
    /// Drag the resize handle of an existing chart
    Resize { item: ItemId },
    /// Drag a new chart from the palette onto the grid
    Place { chart: ChartKind, kpi: KpiId },
}

/// Live feedback while the pointer moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GesturePreview {
    pub rect: Rect,
    pub pixels: PixelRect,
    pub blocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "lowercase")]
pub enum GestureCommit {
    Moved(Position),
    Resized(Size),
    Placed(ChartItem),
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct DragGesture {
    kind: GestureKind,
    origin: PointerPosition,
    start: PointerPosition,
    last: PointerPosition,
    start_size: Size,
}

impl DragGesture {
    /// `origin` is the client position of the grid's top-left corner.
    pub fn begin(
        editor: &LayoutEditor,
        kind: GestureKind,
        pointer: PointerPosition,
        origin: PointerPosition,
    ) -> Result<Self, EditorError> {
        let start_size = match &kind {
            GestureKind::Move { item } | GestureKind::Resize { item } => editor
                .item(item)
                .map(|i| i.size)
                .ok_or_else(|| EditorError::ItemNotFound(item.clone()))?,
            GestureKind::Place { .. } => editor.settings().default_size,
        };

        Ok(Self {
            kind,
            origin,
            start: pointer,
            last: pointer,
            start_size,
        })
    }

    pub fn kind(&self) -> &GestureKind {
        &self.kind
    }

    pub fn update(
        &mut self,
        editor: &LayoutEditor,
        pointer: PointerPosition,
    ) -> Result<GesturePreview, EditorError> {
        self.last = pointer;
        self.preview(editor)
    }

    fn preview(&self, editor: &LayoutEditor) -> Result<GesturePreview, EditorError> {
        let geometry = editor.settings().geometry;

        let (rect, exclude) = match &self.kind {
            GestureKind::Move { item } => {
                let current = Self::current(editor, item)?;
                let position = geometry.pointer_to_position(self.last, self.origin);
                (Rect::new(position, current.size), Some(item))
            }
            GestureKind::Resize { item } => {
                let current = Self::current(editor, item)?;
                let (dx, dy) = geometry.pointer_delta_units(self.start, self.last);
                let size = geometry.clamp_size(Size::new(
                    self.start_size.width + dx,
                    self.start_size.height + dy,
                ));
                (Rect::new(current.position, size), Some(item))
            }
            GestureKind::Place { .. } => {
                let position = geometry.pointer_to_position(self.last, self.origin);
                (Rect::new(position, self.start_size), None)
            }
        };

        Ok(GesturePreview {
            rect,
            pixels: geometry.rect_to_pixels(&rect),
            blocked: !editor.in_bounds(&rect) || !editor.fits(&rect, exclude),
        })
    }

    /// Commits through the gated editor operations.
    pub fn end(self, editor: &mut LayoutEditor) -> Result<GestureCommit, EditorError> {
        let preview = self.preview(editor)?;

        match self.kind {
            GestureKind::Move { item } => {
                editor.move_item(&item, preview.rect.position)?;
                Ok(GestureCommit::Moved(preview.rect.position))
            }
            GestureKind::Resize { item } => {
                if preview.rect.size == self.start_size {
                    return Ok(GestureCommit::Unchanged);
                }
                let size = editor.resize_item(&item, preview.rect.size)?;
                Ok(GestureCommit::Resized(size))
            }
            GestureKind::Place { chart, kpi } => {
                let placed = editor.add_item(chart, &kpi, Some(preview.rect.position))?;
                Ok(GestureCommit::Placed(placed))
            }
        }
    }

    fn current<'a>(editor: &'a LayoutEditor, item: &ItemId) -> Result<&'a ChartItem, EditorError> {
        editor
            .item(item)
            .ok_or_else(|| EditorError::ItemNotFound(item.clone()))
    }
}
