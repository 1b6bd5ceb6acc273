// Collision detection between chart rectangles
use crate::domain::chart::{ChartItem, ItemId};
use crate::domain::geometry::Rect;

/// True when `candidate` overlaps any item other than `exclude`.
pub fn collides<'a, I>(candidate: &Rect, items: I, exclude: Option<&ItemId>) -> bool
where
    I: IntoIterator<Item = &'a ChartItem>,
{
    items
        .into_iter()
        .filter(|item| Some(&item.id) != exclude)
        .any(|item| candidate.overlaps(&item.rect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{ChartKind, SeriesData};
    use crate::domain::geometry::{Position, Size};
    use crate::domain::kpi::KpiId;

    fn item(x: i64, y: i64, w: i64, h: i64) -> ChartItem {
        ChartItem::new(
            ChartKind::Bar,
            "chart".into(),
            Position::new(x, y),
            Size::new(w, h),
            KpiId::from("revenue-growth"),
            SeriesData::Bar(vec![]),
        )
    }

    #[test]
    fn test_detects_overlap() {
        let items = vec![item(0, 0, 2, 2), item(5, 5, 2, 2)];
        let candidate = Rect::new(Position::new(1, 1), Size::new(2, 2));
        assert!(collides(&candidate, &items, None));
    }

    #[test]
    fn test_adjacent_rectangles_do_not_collide() {
        let items = vec![item(0, 0, 2, 2)];
        let right = Rect::new(Position::new(2, 0), Size::new(2, 2));
        let below = Rect::new(Position::new(0, 2), Size::new(2, 2));
        assert!(!collides(&right, &items, None));
        assert!(!collides(&below, &items, None));
    }

    #[test]
    fn test_excluded_item_is_ignored() {
        let items = vec![item(0, 0, 2, 2), item(5, 5, 2, 2)];
        let candidate = Rect::new(Position::new(5, 6), Size::new(2, 2));
        assert!(collides(&candidate, &items, None));
        assert!(!collides(&candidate, &items, Some(&items[1].id)));
    }

    #[test]
    fn test_empty_layout_never_collides() {
        let candidate = Rect::new(Position::new(0, 0), Size::new(4, 4));
        assert!(!collides(&candidate, &Vec::<ChartItem>::new(), None));
    }
}
