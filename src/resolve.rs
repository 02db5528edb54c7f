//! Percentage resolution, main/cross axis selection, and min/max clamping
//! (C6). Pure functions over `Style` + a reference size; no tree access.

use crate::edge::{Direction, PhysicalEdge};
use crate::style::{FlexDirection, Style};
use crate::value::Value;

/// Resolve padding or border for one physical edge, clamped to >= 0 (spec
/// domain invariant: resolved lengths are finite non-negative).
pub fn resolve_spacing(edges: &crate::edge::EdgeValues, physical: PhysicalEdge, direction: Direction, reference: f32) -> f32 {
    let v = edges.get(physical, direction).resolve_or(reference, 0.0);
    if v.is_nan() || v < 0.0 { 0.0 } else { v }
}

/// Resolve a margin edge. Unlike padding/border, margins may be negative;
/// `auto` resolves to 0 here (the layout pass distributes `auto` margins
/// separately when centering/justifying flex items).
pub fn resolve_margin(edges: &crate::edge::EdgeValues, physical: PhysicalEdge, direction: Direction, reference: f32) -> f32 {
    let raw = edges.get(physical, direction);
    if raw.is_auto() {
        return 0.0;
    }
    let v = raw.resolve_or(reference, 0.0);
    if v.is_nan() { 0.0 } else { v }
}

pub fn is_margin_auto(edges: &crate::edge::EdgeValues, physical: PhysicalEdge, direction: Direction) -> bool {
    edges.get(physical, direction).is_auto()
}

/// Resolve an inset (position) edge: `NaN` when auto/undefined, since the
/// layout pass needs to distinguish "no inset specified" from "inset 0".
pub fn resolve_inset(edges: &crate::edge::EdgeValues, physical: PhysicalEdge, direction: Direction, reference: f32) -> f32 {
    edges.get(physical, direction).resolve(reference)
}

/// Clamp a resolved size to this style's min/max for the given axis,
/// ignoring undefined bounds. `is_main_axis` selects width-ish vs
/// height-ish min/max pairs.
pub fn clamp_to_min_max(value: f32, min: Value, max: Value, reference: f32) -> f32 {
    let mut v = value;
    let min_v = min.resolve(reference);
    let max_v = max.resolve(reference);
    if !min_v.is_nan() && v < min_v {
        v = min_v;
    }
    if !max_v.is_nan() && v > max_v {
        v = max_v;
    }
    v
}

/// Select the width-like style fields when `row` is the main axis,
/// otherwise the height-like ones. Returns `(size, min, max)`.
pub fn main_axis_style(style: &Style, direction: FlexDirection) -> (Value, Value, Value) {
    if direction.is_row() {
        (style.width, style.min_width, style.max_width)
    } else {
        (style.height, style.min_height, style.max_height)
    }
}

pub fn cross_axis_style(style: &Style, direction: FlexDirection) -> (Value, Value, Value) {
    if direction.is_row() {
        (style.height, style.min_height, style.max_height)
    } else {
        (style.width, style.min_width, style.max_width)
    }
}

/// Row/column gap resolved for the main axis of `direction`, falling back
/// to `gap` (stored as `row_gap`/`column_gap` already defaulting from a
/// shared `gap` at the setter layer — see `tree::Tree::set_gap`).
pub fn main_gap(style: &Style, direction: FlexDirection) -> f32 {
    let v = if direction.is_row() { style.column_gap } else { style.row_gap };
    v.resolve_or(f32::NAN, 0.0).max(0.0)
}

pub fn cross_gap(style: &Style, direction: FlexDirection) -> f32 {
    let v = if direction.is_row() { style.row_gap } else { style.column_gap };
    v.resolve_or(f32::NAN, 0.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{Edge, EdgeValues};

    #[test]
    fn spacing_clamps_negative_to_zero() {
        let mut e = EdgeValues::new();
        e.set(Edge::Left, Value::Point(-5.0));
        assert_eq!(resolve_spacing(&e, PhysicalEdge::Left, Direction::Ltr, 100.0), 0.0);
    }

    #[test]
    fn margin_allows_negative() {
        let mut e = EdgeValues::new();
        e.set(Edge::Left, Value::Point(-5.0));
        assert_eq!(resolve_margin(&e, PhysicalEdge::Left, Direction::Ltr, 100.0), -5.0);
    }

    #[test]
    fn clamp_respects_min_and_max() {
        assert_eq!(clamp_to_min_max(5.0, Value::Point(10.0), Value::Undefined, 100.0), 10.0);
        assert_eq!(clamp_to_min_max(50.0, Value::Undefined, Value::Point(20.0), 100.0), 20.0);
        assert_eq!(clamp_to_min_max(15.0, Value::Point(10.0), Value::Point(20.0), 100.0), 15.0);
    }
}
