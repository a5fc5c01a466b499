//! Floor-plan geometry: element collision and table packing.
//!
//! Coordinates are canvas units with the origin at the top-left corner. All
//! comparisons are strict, so elements that share an edge do not collide.

use serde::{Deserialize, Serialize};

/// An axis-aligned floor-plan element (zone, table, bar).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: None,
            x,
            y,
            width,
            height,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Zero or negative extent on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.width.is_nan() || self.height.is_nan() || self.width <= 0.0 || self.height <= 0.0
    }
}

/// Whether two rectangles intersect with positive area.
///
/// Degenerate rectangles never collide, even when they lie inside another one.
pub fn do_rectangles_collide(r1: &Rectangle, r2: &Rectangle) -> bool {
    if r1.is_degenerate() || r2.is_degenerate() {
        return false;
    }

    r1.x < r2.x + r2.width
        && r1.x + r1.width > r2.x
        && r1.y < r2.y + r2.height
        && r1.y + r1.height > r2.y
}

/// Whether `new_rect` collides with any rectangle in `existing`.
///
/// Rectangles whose `id` equals `exclude_id` are skipped, which lets a move of
/// an element be checked against everything except its own old position.
pub fn check_rectangle_collision(
    new_rect: &Rectangle,
    existing: &[Rectangle],
    exclude_id: Option<&str>,
) -> bool {
    existing
        .iter()
        .filter(|rect| match (exclude_id, rect.id.as_deref()) {
            (Some(excluded), Some(id)) => excluded != id,
            _ => true,
        })
        .any(|rect| {
            let hit = do_rectangles_collide(new_rect, rect);
            if hit {
                tracing::debug!(existing = ?rect.id, "floor plan element collision");
            }
            hit
        })
}

/// Top-left corner of a placed table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Result of packing tables into a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableLayout {
    pub count: usize,
    pub positions: Vec<Position>,
}

/// Default table size and spacing used when a zone is auto-filled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    pub table_width: f64,
    pub table_height: f64,
    pub spacing: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            table_width: Self::DEFAULT_TABLE_WIDTH,
            table_height: Self::DEFAULT_TABLE_HEIGHT,
            spacing: Self::DEFAULT_SPACING,
        }
    }
}

impl LayoutOptions {
    pub const DEFAULT_TABLE_WIDTH: f64 = 60.0;
    pub const DEFAULT_TABLE_HEIGHT: f64 = 60.0;
    pub const DEFAULT_SPACING: f64 = 20.0;

    pub fn layout(&self, zone_width: f64, zone_height: f64) -> TableLayout {
        calculate_table_layout(
            zone_width,
            zone_height,
            self.table_width,
            self.table_height,
            self.spacing,
        )
    }
}

/// Upper bound on the tables placed by one layout call.
pub const MAX_TABLES: usize = 10_000;

/// Number of tables of size `table` that fit along an axis of length `zone`,
/// capped at [`MAX_TABLES`].
fn fit_count(zone: f64, table: f64, spacing: f64) -> usize {
    let pitch = table + spacing;
    if pitch.is_nan() || pitch <= 0.0 {
        return 0;
    }
    let fitted = ((zone - spacing) / pitch).floor();
    if !fitted.is_finite() || fitted <= 0.0 {
        return 0;
    }
    if fitted >= MAX_TABLES as f64 {
        MAX_TABLES
    } else {
        fitted as usize
    }
}

/// Pack identical tables into a zone on a regular grid.
///
/// `cols = floor((zone_width - spacing) / (table_width + spacing))` and rows
/// likewise. Positions are emitted row by row, each at
/// `spacing + index * (dimension + spacing)` along its axis, so every table
/// stays inside the zone with at least `spacing` to its left and top edges.
///
/// At most [`MAX_TABLES`] positions are returned. When more would fit, the
/// first [`MAX_TABLES`] in row-major order are kept.
pub fn calculate_table_layout(
    zone_width: f64,
    zone_height: f64,
    table_width: f64,
    table_height: f64,
    spacing: f64,
) -> TableLayout {
    let cols = fit_count(zone_width, table_width, spacing);
    let rows = fit_count(zone_height, table_height, spacing);

    let capacity = cols.checked_mul(rows).map_or(MAX_TABLES, |n| n.min(MAX_TABLES));
    let positions: Vec<Position> = (0..rows)
        .flat_map(|row| {
            (0..cols).map(move |col| Position {
                x: spacing + col as f64 * (table_width + spacing),
                y: spacing + row as f64 * (table_height + spacing),
            })
        })
        .take(capacity)
        .collect();

    TableLayout {
        count: positions.len(),
        positions,
    }
}
