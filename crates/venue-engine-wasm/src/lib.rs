//! WASM bindings for venue-engine.
//!
//! Exposes time-range collision checks, floor-plan collision and packing, and
//! line expansion to the web frontend via `wasm-bindgen`. Ranges, rectangles
//! and lines cross the boundary as JSON strings using the same camelCase
//! shapes the request handlers already produce.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p venue-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/venue-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/venue_engine_wasm.wasm
//! # Rename .js -> .cjs for ESM compatibility
//! mv packages/venue-engine-js/wasm/venue_engine_wasm.js \
//!    packages/venue-engine-js/wasm/venue_engine_wasm.cjs
//! ```

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;
use venue_engine::{Line, Rectangle, TimeRange};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: JSON in, JSON out
// ---------------------------------------------------------------------------

/// Parse a JSON argument, naming it in the error thrown to JavaScript.
fn parse_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_until(until: Option<String>) -> Result<Option<NaiveDate>, JsValue> {
    until
        .map(|s| venue_engine::time::parse_date(&s).map_err(|e| JsValue::from_str(&e.to_string())))
        .transpose()
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Check one `{date, startTime, endTime}` range against a JSON array of ranges.
///
/// Returns `{hasCollision, conflictingRange?}`. Malformed dates or times are
/// thrown as errors instead of being reported as "no collision".
#[wasm_bindgen(js_name = "checkCollision")]
pub fn check_collision(new_range_json: &str, existing_json: &str) -> Result<String, JsValue> {
    let new_range: TimeRange = parse_json("time range", new_range_json)?;
    let existing: Vec<TimeRange> = parse_json("existing ranges", existing_json)?;

    to_json(&venue_engine::check_collision(&new_range, &existing))
}

/// Check a JSON array of candidate ranges against existing ranges and each other.
///
/// Returns `{hasCollision, conflictingRanges}`.
#[wasm_bindgen(js_name = "checkMultipleCollisions")]
pub fn check_multiple_collisions(
    new_ranges_json: &str,
    existing_json: &str,
) -> Result<String, JsValue> {
    let new_ranges: Vec<TimeRange> = parse_json("new ranges", new_ranges_json)?;
    let existing: Vec<TimeRange> = parse_json("existing ranges", existing_json)?;

    to_json(&venue_engine::check_multiple_collisions(
        &new_ranges,
        &existing,
    ))
}

/// Whether two `{x, y, width, height}` rectangles overlap.
#[wasm_bindgen(js_name = "doRectanglesCollide")]
pub fn do_rectangles_collide(r1_json: &str, r2_json: &str) -> Result<bool, JsValue> {
    let r1: Rectangle = parse_json("rectangle", r1_json)?;
    let r2: Rectangle = parse_json("rectangle", r2_json)?;

    Ok(venue_engine::do_rectangles_collide(&r1, &r2))
}

/// Whether a rectangle collides with any in a JSON array, skipping `exclude_id`.
#[wasm_bindgen(js_name = "checkRectangleCollision")]
pub fn check_rectangle_collision(
    new_rect_json: &str,
    existing_json: &str,
    exclude_id: Option<String>,
) -> Result<bool, JsValue> {
    let new_rect: Rectangle = parse_json("rectangle", new_rect_json)?;
    let existing: Vec<Rectangle> = parse_json("existing rectangles", existing_json)?;

    Ok(venue_engine::check_rectangle_collision(
        &new_rect,
        &existing,
        exclude_id.as_deref(),
    ))
}

/// Pack tables into a zone. Returns `{count, positions: [{x, y}]}`.
#[wasm_bindgen(js_name = "calculateTableLayout")]
pub fn calculate_table_layout(
    zone_width: f64,
    zone_height: f64,
    table_width: f64,
    table_height: f64,
    spacing: f64,
) -> Result<String, JsValue> {
    to_json(&venue_engine::calculate_table_layout(
        zone_width,
        zone_height,
        table_width,
        table_height,
        spacing,
    ))
}

/// Expand a line into dated occurrences.
///
/// `line_json` is `{id, name, rrule, startDate, startTime, endTime, timezone}`;
/// `until` is an optional inclusive `YYYY-MM-DD`. Returns an array of
/// `{lineId, date, startTime, endTime}`.
#[wasm_bindgen(js_name = "expandLine")]
pub fn expand_line(
    line_json: &str,
    until: Option<String>,
    count: Option<u32>,
) -> Result<String, JsValue> {
    let line: Line = parse_json("line", line_json)?;
    let until = parse_until(until)?;

    let occurrences = venue_engine::expand_line(&line, until, count)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&occurrences)
}
