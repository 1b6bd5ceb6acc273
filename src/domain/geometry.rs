// Grid geometry - Pixel space <-> grid space
use serde::{Deserialize, Serialize};

/// Integer coordinate in grid space.
pub type GridUnit = i64;

/// Top-left corner of a widget in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: GridUnit,
    pub y: GridUnit,
}

impl Position {
    pub fn new(x: GridUnit, y: GridUnit) -> Self {
        Self { x, y }
    }

    /// Both axes clamped to the non-negative quadrant.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.max(0),
            y: self.y.max(0),
        }
    }
}

/// Footprint of a widget in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: GridUnit,
    pub height: GridUnit,
}

impl Size {
    pub fn new(width: GridUnit, height: GridUnit) -> Self {
        Self { width, height }
    }
}

/// Half-open rectangle `[x, x+width) x [y, y+height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub position: Position,
    pub size: Size,
}

impl Rect {
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Saturates instead of wrapping on huge coordinates.
    pub fn right(&self) -> GridUnit {
        self.position.x.saturating_add(self.size.width)
    }

    pub fn bottom(&self) -> GridUnit {
        self.position.y.saturating_add(self.size.height)
    }

    /// True when the rectangle lies inside `[0, extent)` on both axes.
    pub fn within(&self, extent: GridUnit) -> bool {
        self.position.x >= 0
            && self.position.y >= 0
            && self.right() <= extent
            && self.bottom() <= extent
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.position.x < other.right()
            && self.right() > other.position.x
            && self.position.y < other.bottom()
            && self.bottom() > other.position.y
    }

    /// Every unit cell covered by the rectangle.
    pub fn cells(&self) -> impl Iterator<Item = (GridUnit, GridUnit)> + '_ {
        (self.position.x..self.right())
            .flat_map(move |x| (self.position.y..self.bottom()).map(move |y| (x, y)))
    }
}

/// Raw pointer coordinates in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl PointerPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel-space box relative to the grid origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PixelRect {
    pub left: i64,
    pub top: i64,
    pub width: i64,
    pub height: i64,
}

/// Pixel/grid conversions for one grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    base_size: i64,
    min_chart_px: i64,
}

impl GridGeometry {
    /// `base_size` must be positive; configuration loading enforces it.
    pub fn new(base_size: u32, min_chart_px: u32) -> Self {
        Self {
            base_size: i64::from(base_size.max(1)),
            min_chart_px: i64::from(min_chart_px),
        }
    }

    pub fn base_size(&self) -> i64 {
        self.base_size
    }

    pub fn to_pixels(&self, units: GridUnit) -> i64 {
        units.saturating_mul(self.base_size)
    }

    /// Floor division, so negative pixels round toward negative infinity.
    pub fn to_grid_units(&self, pixels: i64) -> GridUnit {
        pixels.div_euclid(self.base_size)
    }

    pub fn rect_to_pixels(&self, rect: &Rect) -> PixelRect {
        PixelRect {
            left: self.to_pixels(rect.position.x),
            top: self.to_pixels(rect.position.y),
            width: self.to_pixels(rect.size.width),
            height: self.to_pixels(rect.size.height),
        }
    }

    /// Clamps to >= 0 and rounds each axis to the nearest grid unit.
    pub fn snap_position(&self, raw_x: f64, raw_y: f64) -> Position {
        Position {
            x: raw_x.max(0.0).round() as GridUnit,
            y: raw_y.max(0.0).round() as GridUnit,
        }
    }

    /// Converts a pointer to the grid cell under it, relative to the grid origin.
    pub fn pointer_to_position(&self, pointer: PointerPosition, origin: PointerPosition) -> Position {
        let (x, y) = self.pointer_delta_units(origin, pointer);
        self.snap_position(x as f64, y as f64)
    }

    /// Whole grid units covered by a pointer travel, floored.
    pub fn pointer_delta_units(&self, from: PointerPosition, to: PointerPosition) -> (GridUnit, GridUnit) {
        (
            self.to_grid_units((to.x - from.x).floor() as i64),
            self.to_grid_units((to.y - from.y).floor() as i64),
        )
    }

    pub fn minimum_units(&self) -> GridUnit {
        (self.min_chart_px + self.base_size - 1).div_euclid(self.base_size)
    }

    pub fn clamp_size(&self, size: Size) -> Size {
        let min = self.minimum_units();
        Size {
            width: size.width.max(min),
            height: size.height.max(min),
        }
    }
}
