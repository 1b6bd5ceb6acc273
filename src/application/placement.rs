// Placement planner - Next free slot for a new chart
use crate::domain::chart::ChartItem;
use crate::domain::geometry::{GridUnit, Position};
use std::collections::HashSet;

/// Scans the first row below all content for a free cell in `0..column_bound`,
/// wrapping to the following row when the whole bound is taken.
/// Gaps in rows above the frontier are never reused.
pub fn next_available_position(items: &[ChartItem], column_bound: GridUnit) -> Position {
    if items.is_empty() {
        return Position::new(0, 0);
    }

    let occupied: HashSet<(GridUnit, GridUnit)> =
        items.iter().flat_map(|item| item.rect().cells().collect::<Vec<_>>()).collect();

    let max_y = frontier_row(items);

    (0..column_bound)
        .find(|x| !occupied.contains(&(*x, max_y)))
        .map(|x| Position::new(x, max_y))
        .unwrap_or(Position::new(0, max_y.saturating_add(1)))
}

/// First row fully below every item.
pub fn frontier_row(items: &[ChartItem]) -> GridUnit {
    items.iter().map(|item| item.rect().bottom()).max().unwrap_or(0)
}
