// Layout editor - Owns the draft and gates every structural change
use crate::application::collision::collides;
use crate::application::errors::EditorError;
use crate::application::kpi_repository::KpiRepository;
use crate::application::placement::{frontier_row, next_available_position};
use crate::domain::chart::{ChartItem, ChartKind, ItemId};
use crate::domain::geometry::{GridGeometry, GridUnit, Position, Rect, Size};
use crate::domain::kpi::KpiId;
use crate::domain::layout::{Layout, LayoutId};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorSettings {
    pub geometry: GridGeometry,
    /// Footprint of a freshly added chart
    pub default_size: Size,
    /// Columns scanned by the placement planner
    pub placement_columns: GridUnit,
    /// Charts must end at or before this unit on both axes
    pub max_extent: GridUnit,
}

pub struct LayoutEditor {
    settings: EditorSettings,
    kpis: Arc<dyn KpiRepository>,
    layout_id: Option<LayoutId>,
    name: String,
    items: Vec<ChartItem>,
    index: HashMap<ItemId, usize>,
    dirty: bool,
}

impl LayoutEditor {
    pub fn new(settings: EditorSettings, kpis: Arc<dyn KpiRepository>) -> Self {
        Self {
            settings,
            kpis,
            layout_id: None,
            name: String::new(),
            items: Vec::new(),
            index: HashMap::new(),
            dirty: false,
        }
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Id of the saved layout backing this draft, if any
    pub fn layout_id(&self) -> Option<&LayoutId> {
        self.layout_id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[ChartItem] {
        &self.items
    }

    pub fn item(&self, id: &ItemId) -> Option<&ChartItem> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    /// True when `rect` overlaps no item other than `exclude`.
    pub fn fits(&self, rect: &Rect, exclude: Option<&ItemId>) -> bool {
        !collides(rect, &self.items, exclude)
    }

    pub fn in_bounds(&self, rect: &Rect) -> bool {
        rect.within(self.settings.max_extent)
    }

    pub fn next_available_position(&self) -> Position {
        next_available_position(&self.items, self.settings.placement_columns)
    }

    pub fn add_item(
        &mut self,
        kind: ChartKind,
        source: &KpiId,
        explicit: Option<Position>,
    ) -> Result<ChartItem, EditorError> {
        let kpi = self
            .kpis
            .find_kpi(source)
            .ok_or_else(|| EditorError::KpiNotFound(source.clone()))?;

        if !kpi.has_access {
            return Err(EditorError::AccessDenied(source.clone()));
        }
        if !kpi.supports(kind) {
            return Err(EditorError::UnsupportedChartKind {
                kpi: source.clone(),
                kind,
            });
        }

        let series = self
            .kpis
            .series_for(source, kind)
            .ok_or_else(|| EditorError::NoSeriesData(source.clone()))?;

        let size = self.settings.default_size;
        if let Some(requested) = explicit {
            self.ensure_in_bounds(&Rect::new(requested.clamped(), size))?;
        }
        let position = self.resolve_position(explicit, size);
        self.ensure_in_bounds(&Rect::new(position, size))?;
        let item = ChartItem::new(
            kind,
            format!("{} ({})", kpi.name, kind),
            position,
            size,
            source.clone(),
            series,
        );

        tracing::debug!(
            "Added {} chart {} for {} at ({}, {})",
            kind,
            item.id,
            source,
            position.x,
            position.y
        );

        self.index.insert(item.id.clone(), self.items.len());
        self.items.push(item.clone());
        self.dirty = true;
        Ok(item)
    }

    fn resolve_position(&self, explicit: Option<Position>, size: Size) -> Position {
        if let Some(requested) = explicit.map(Position::clamped) {
            if self.fits(&Rect::new(requested, size), None) {
                return requested;
            }
            tracing::debug!(
                "Drop position ({}, {}) is occupied, using placement planner",
                requested.x,
                requested.y
            );
        }

        let planned = self.next_available_position();
        if self.fits(&Rect::new(planned, size), None) {
            return planned;
        }

        // The planner only checks single cells; the wrap row is below everything.
        let wrapped = Position::new(0, frontier_row(&self.items) + 1);
        tracing::warn!(
            "Planned position ({}, {}) overlaps existing charts, wrapping to row {}",
            planned.x,
            planned.y,
            wrapped.y
        );
        wrapped
    }

    pub fn move_item(&mut self, id: &ItemId, position: Position) -> Result<(), EditorError> {
        let index = self.position_of(id)?;
        let position = position.clamped();
        let candidate = Rect::new(position, self.items[index].size);

        self.ensure_in_bounds(&candidate)?;
        if !self.fits(&candidate, Some(id)) {
            tracing::debug!("Rejected move of {} to ({}, {})", id, position.x, position.y);
            return Err(EditorError::Collision);
        }

        self.items[index].position = position;
        self.dirty = true;
        Ok(())
    }

    /// Clamps to the minimum size first. Returns the size that was applied.
    pub fn resize_item(&mut self, id: &ItemId, size: Size) -> Result<Size, EditorError> {
        let index = self.position_of(id)?;
        let size = self.settings.geometry.clamp_size(size);
        let candidate = Rect::new(self.items[index].position, size);

        self.ensure_in_bounds(&candidate)?;
        if !self.fits(&candidate, Some(id)) {
            tracing::debug!("Rejected resize of {} to {}x{}", id, size.width, size.height);
            return Err(EditorError::Collision);
        }

        self.items[index].size = size;
        self.dirty = true;
        Ok(size)
    }

    /// Returns false when the id is unknown; nothing changes in that case.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        let Some(index) = self.index.remove(id) else {
            return false;
        };

        self.items.remove(index);
        self.reindex();
        self.dirty = true;
        true
    }

    pub fn update_title(&mut self, id: &ItemId, title: String) -> Result<(), EditorError> {
        let index = self.position_of(id)?;
        self.items[index].title = title;
        self.dirty = true;
        Ok(())
    }

    /// Blank comments clear the annotation.
    pub fn update_comment(&mut self, id: &ItemId, comment: Option<String>) -> Result<(), EditorError> {
        let index = self.position_of(id)?;
        self.items[index].comment = comment.filter(|c| !c.trim().is_empty());
        self.dirty = true;
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Fresh, empty, unnamed and clean draft.
    pub(crate) fn reset(&mut self) {
        self.layout_id = None;
        self.name.clear();
        self.items.clear();
        self.index.clear();
        self.dirty = false;
    }

    /// Replaces the draft with a copy of a saved layout.
    pub(crate) fn adopt(&mut self, layout: &Layout) {
        self.layout_id = Some(layout.id.clone());
        self.name = layout.name.clone();
        self.items = layout.items.clone();
        self.reindex();
        self.dirty = false;
    }

    pub(crate) fn mark_saved(&mut self, layout: &Layout) {
        self.layout_id = Some(layout.id.clone());
        self.name = layout.name.clone();
        self.dirty = false;
    }

    fn ensure_in_bounds(&self, rect: &Rect) -> Result<(), EditorError> {
        if self.in_bounds(rect) {
            return Ok(());
        }
        tracing::debug!(
            "Rejected {}x{} chart at ({}, {}) outside the grid",
            rect.size.width,
            rect.size.height,
            rect.position.x,
            rect.position.y
        );
        Err(EditorError::OutOfBounds {
            extent: self.settings.max_extent,
        })
    }

    fn position_of(&self, id: &ItemId) -> Result<usize, EditorError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| EditorError::ItemNotFound(id.clone()))
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id.clone(), i))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::SeriesData;
    use crate::test_support::{editor, seeded_item, unit_settings};
    use chrono::Utc;

    fn revenue() -> KpiId {
        KpiId::from("revenue-growth")
    }

    fn assert_no_overlaps(editor: &LayoutEditor) {
        let items = editor.items();
        for (i, a) in items.iter().enumerate() {
            for b in &items[i + 1..] {
                assert!(
                    !a.rect().overlaps(&b.rect()),
                    "{} overlaps {}",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn test_first_chart_goes_to_origin() {
        let mut editor = editor();
        let item = editor.add_item(ChartKind::Bar, &revenue(), None).unwrap();

        assert_eq!(item.position, Position::new(0, 0));
        assert_eq!(item.size, Size::new(8, 8));
        assert_eq!(item.title, "Revenue Growth (bar)");
        assert_eq!(item.series.kind(), ChartKind::Bar);
        assert!(editor.has_unsaved_changes());
    }

    #[test]
    fn test_row_wrap_after_full_row() {
        let mut editor = LayoutEditor::new(unit_settings(), crate::test_support::sample_repository());
        let items: Vec<_> = (0..10).map(|x| seeded_item(x, 0, 1, 1)).collect();
        editor.adopt(&Layout::new(LayoutId::generate(), "Row".into(), items, Utc::now()));

        let item = editor.add_item(ChartKind::Line, &revenue(), None).unwrap();
        assert_eq!(item.position, Position::new(0, 1));
    }

    #[test]
    fn test_explicit_position_used_when_free() {
        let mut editor = editor();
        let item = editor
            .add_item(ChartKind::Pie, &revenue(), Some(Position::new(12, 3)))
            .unwrap();
        assert_eq!(item.position, Position::new(12, 3));
    }

    #[test]
    fn test_occupied_drop_falls_back_to_planner() {
        let mut editor = editor();
        editor.add_item(ChartKind::Bar, &revenue(), None).unwrap();

        let item = editor
            .add_item(ChartKind::Line, &revenue(), Some(Position::new(4, 4)))
            .unwrap();
        assert_eq!(item.position, Position::new(0, 8));
        assert_no_overlaps(&editor);
    }

    #[test]
    fn test_add_rejections_leave_draft_untouched() {
        let mut editor = editor();

        assert_eq!(
            editor.add_item(ChartKind::Bar, &KpiId::from("missing"), None),
            Err(EditorError::KpiNotFound(KpiId::from("missing")))
        );
        assert_eq!(
            editor.add_item(ChartKind::Bar, &KpiId::from("operational-efficiency"), None),
            Err(EditorError::AccessDenied(KpiId::from("operational-efficiency")))
        );
        assert!(matches!(
            editor.add_item(ChartKind::Radar, &revenue(), None),
            Err(EditorError::UnsupportedChartKind { .. })
        ));
        assert_eq!(
            editor.add_item(ChartKind::Bar, &KpiId::from("headcount"), None),
            Err(EditorError::NoSeriesData(KpiId::from("headcount")))
        );

        assert!(editor.items().is_empty());
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_collision_blocked_move_is_rejected() {
        let mut editor = LayoutEditor::new(unit_settings(), crate::test_support::sample_repository());
        let a = seeded_item(0, 0, 2, 2);
        let b = seeded_item(5, 5, 2, 2);
        let b_id = b.id.clone();
        editor.adopt(&Layout::new(LayoutId::generate(), "Pair".into(), vec![a, b], Utc::now()));

        assert_eq!(editor.move_item(&b_id, Position::new(1, 1)), Err(EditorError::Collision));
        assert_eq!(editor.item(&b_id).unwrap().position, Position::new(5, 5));
        assert!(!editor.has_unsaved_changes());

        editor.move_item(&b_id, Position::new(2, 0)).unwrap();
        assert_eq!(editor.item(&b_id).unwrap().position, Position::new(2, 0));
        assert!(editor.has_unsaved_changes());
    }

    #[test]
    fn test_rejected_move_keeps_dirty_flag() {
        let mut editor = editor();
        let a = editor.add_item(ChartKind::Bar, &revenue(), None).unwrap();
        let b = editor.add_item(ChartKind::Line, &revenue(), None).unwrap();
        assert!(editor.has_unsaved_changes());

        assert_eq!(editor.move_item(&b.id, a.position), Err(EditorError::Collision));
        assert!(editor.has_unsaved_changes());
        assert_eq!(editor.item(&b.id).unwrap().position, b.position);
    }

    #[test]
    fn test_move_clamps_negative_positions() {
        let mut editor = editor();
        let item = editor
            .add_item(ChartKind::Bar, &revenue(), Some(Position::new(10, 10)))
            .unwrap();

        editor.move_item(&item.id, Position::new(-3, 2)).unwrap();
        assert_eq!(editor.item(&item.id).unwrap().position, Position::new(0, 2));
    }

    #[test]
    fn test_resize_clamps_and_checks_collisions() {
        let mut editor = editor();
        let a = editor.add_item(ChartKind::Bar, &revenue(), None).unwrap();
        let b = editor
            .add_item(ChartKind::Line, &revenue(), Some(Position::new(10, 0)))
            .unwrap();

        assert_eq!(editor.resize_item(&a.id, Size::new(1, 2)), Ok(Size::new(4, 4)));
        assert_eq!(editor.item(&a.id).unwrap().size, Size::new(4, 4));

        assert_eq!(editor.resize_item(&a.id, Size::new(12, 4)), Err(EditorError::Collision));
        assert_eq!(editor.item(&a.id).unwrap().size, Size::new(4, 4));

        assert_eq!(editor.resize_item(&a.id, Size::new(10, 10)), Ok(Size::new(10, 10)));
        assert_eq!(editor.item(&b.id).unwrap().size, Size::new(8, 8));
        assert_no_overlaps(&editor);
    }

    #[test]
    fn test_rejected_resize_keeps_clean_draft() {
        let mut editor = LayoutEditor::new(unit_settings(), crate::test_support::sample_repository());
        let a = seeded_item(0, 0, 2, 2);
        let b = seeded_item(3, 0, 2, 2);
        let a_id = a.id.clone();
        editor.adopt(&Layout::new(LayoutId::generate(), "Pair".into(), vec![a, b], Utc::now()));

        assert_eq!(editor.resize_item(&a_id, Size::new(5, 2)), Err(EditorError::Collision));
        assert_eq!(editor.item(&a_id).unwrap().size, Size::new(2, 2));
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_huge_coordinates_are_out_of_bounds() {
        let mut editor = LayoutEditor::new(unit_settings(), crate::test_support::sample_repository());
        let a = seeded_item(0, 0, 8, 8);
        let b = seeded_item(10, 0, 8, 8);
        let (a_id, b_id) = (a.id.clone(), b.id.clone());
        editor.adopt(&Layout::new(LayoutId::generate(), "Pair".into(), vec![a, b], Utc::now()));
        let out_of_bounds = Err(EditorError::OutOfBounds { extent: 1000 });

        assert_eq!(editor.move_item(&a_id, Position::new(i64::MAX - 2, 0)), out_of_bounds);
        assert_eq!(editor.move_item(&b_id, Position::new(i64::MAX - 5, 0)), out_of_bounds);
        assert_eq!(
            editor.resize_item(&a_id, Size::new(i64::MAX, 8)),
            Err(EditorError::OutOfBounds { extent: 1000 })
        );
        assert_eq!(
            editor
                .add_item(ChartKind::Bar, &revenue(), Some(Position::new(i64::MAX, 0)))
                .map(|_| ()),
            out_of_bounds
        );

        assert_eq!(editor.item(&a_id).unwrap().position, Position::new(0, 0));
        assert_eq!(editor.item(&b_id).unwrap().position, Position::new(10, 0));
        assert_eq!(editor.item(&a_id).unwrap().size, Size::new(8, 8));
        assert_eq!(editor.items().len(), 2);
        assert!(!editor.has_unsaved_changes());

        assert_eq!(editor.move_item(&b_id, Position::new(993, 0)), out_of_bounds);
        assert_eq!(editor.move_item(&b_id, Position::new(992, 0)), Ok(()));
        assert_no_overlaps(&editor);
    }

    #[test]
    fn test_unknown_item_operations_are_rejected() {
        let mut editor = editor();
        let ghost = ItemId::from("item-ghost");

        assert_eq!(
            editor.move_item(&ghost, Position::new(0, 0)),
            Err(EditorError::ItemNotFound(ghost.clone()))
        );
        assert!(editor.resize_item(&ghost, Size::new(4, 4)).is_err());
        assert!(editor.update_title(&ghost, "x".into()).is_err());
        assert!(!editor.remove_item(&ghost));
        assert!(!editor.has_unsaved_changes());
    }

    #[test]
    fn test_remove_reindexes() {
        let mut editor = editor();
        let a = editor.add_item(ChartKind::Bar, &revenue(), None).unwrap();
        let b = editor.add_item(ChartKind::Line, &revenue(), None).unwrap();
        let c = editor.add_item(ChartKind::Pie, &revenue(), None).unwrap();

        assert!(editor.remove_item(&a.id));
        assert!(editor.item(&a.id).is_none());
        assert_eq!(editor.item(&c.id).unwrap().kind, ChartKind::Pie);
        assert_eq!(editor.items()[0].id, b.id);
    }

    #[test]
    fn test_title_and_comment_updates() {
        let mut editor = editor();
        let item = editor.add_item(ChartKind::Area, &revenue(), None).unwrap();
        assert!(matches!(&item.series, SeriesData::Area(points) if !points.is_empty()));

        editor.update_title(&item.id, "Growth trend".into()).unwrap();
        editor
            .update_comment(&item.id, Some("Check Q3 dip".into()))
            .unwrap();
        let stored = editor.item(&item.id).unwrap();
        assert_eq!(stored.title, "Growth trend");
        assert_eq!(stored.comment.as_deref(), Some("Check Q3 dip"));

        editor.update_comment(&item.id, Some("   ".into())).unwrap();
        assert_eq!(editor.item(&item.id).unwrap().comment, None);
    }

    #[test]
    fn test_successful_sequences_never_overlap() {
        let mut editor = editor();
        let mut ids = Vec::new();
        for step in 0..12 {
            let drop = Position::new((step * 5) % 20, (step * 3) % 9);
            let kind = [ChartKind::Bar, ChartKind::Line, ChartKind::Pie][step as usize % 3];
            ids.push(editor.add_item(kind, &revenue(), Some(drop)).unwrap().id);
        }
        for (step, id) in ids.iter().enumerate() {
            let step = step as i64;
            let _ = editor.move_item(id, Position::new((step * 7) % 25, (step * 2) % 11));
            let _ = editor.resize_item(id, Size::new(4 + step % 6, 4 + step % 5));
        }
        assert_no_overlaps(&editor);
    }

    #[test]
    fn test_rename_does_not_mark_dirty() {
        let mut editor = editor();
        editor.rename("Quarterly review");
        assert_eq!(editor.name(), "Quarterly review");
        assert!(!editor.has_unsaved_changes());
    }
}
