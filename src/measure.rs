//! Intrinsic sizing pass (C7): `measure_node`.
//!
//! Computes a node's own border-box size under bounded/unbounded
//! available-space constraints, consulting the per-node measurement cache
//! first. For a leaf with a host measure function, the function's result is
//! wrapped in border+padding and min/max clamping. For a container, the
//! intrinsic size is the sum of children's hypothetical main sizes (plus
//! gaps) on the main axis and the largest child on the cross axis — the
//! same shape as the teacher's `titan.rs` PASS 3 (`BOX: intrinsic size from
//! children`), generalized from integer cells to floats and real CSS
//! min/max/aspect-ratio clamping.

use crate::cache::MeasureMode;
use crate::edge::{Direction, PhysicalEdge};
use crate::resolve::{clamp_to_min_max, cross_axis_style, main_axis_style, main_gap, resolve_spacing};
use crate::tree::{NodeId, Tree};

/// Border + padding on one axis, as `(leading, trailing)` physical lengths.
pub fn border_padding_axis(
    tree: &Tree,
    node: NodeId,
    is_row: bool,
    direction: Direction,
    reference_w: f32,
    reference_h: f32,
) -> (f32, f32) {
    let style = &tree.node(node).style;
    if is_row {
        let (lead_p, trail_p) = (
            resolve_spacing(&style.padding, PhysicalEdge::Left, direction, reference_w),
            resolve_spacing(&style.padding, PhysicalEdge::Right, direction, reference_w),
        );
        let (lead_b, trail_b) = (
            resolve_spacing(&style.border, PhysicalEdge::Left, direction, reference_w),
            resolve_spacing(&style.border, PhysicalEdge::Right, direction, reference_w),
        );
        (lead_p + lead_b, trail_p + trail_b)
    } else {
        let (lead_p, trail_p) = (
            resolve_spacing(&style.padding, PhysicalEdge::Top, direction, reference_h),
            resolve_spacing(&style.padding, PhysicalEdge::Bottom, direction, reference_h),
        );
        let (lead_b, trail_b) = (
            resolve_spacing(&style.border, PhysicalEdge::Top, direction, reference_h),
            resolve_spacing(&style.border, PhysicalEdge::Bottom, direction, reference_h),
        );
        (lead_p + lead_b, trail_p + trail_b)
    }
}

/// Measure a node's border-box size for the given available space. Caches
/// the result per spec.md §4.2's hit/miss policy.
pub fn measure_node(
    tree: &mut Tree,
    node: NodeId,
    avail_width: f32,
    avail_height: f32,
    direction: Direction,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
) -> (f32, f32) {
    if let Some(hit) = tree
        .node_mut(node)
        .cache
        .find_measurement(avail_width, avail_height, width_mode, height_mode)
    {
        log::trace!("measure_node({node:?}): cache hit");
        return hit;
    }

    let (w_bp_lead, w_bp_trail) = border_padding_axis(tree, node, true, direction, avail_width, avail_height);
    let (h_bp_lead, h_bp_trail) = border_padding_axis(tree, node, false, direction, avail_width, avail_height);
    let bp_w = w_bp_lead + w_bp_trail;
    let bp_h = h_bp_lead + h_bp_trail;

    let content_avail_w = if avail_width.is_nan() { f32::NAN } else { (avail_width - bp_w).max(0.0) };
    let content_avail_h = if avail_height.is_nan() { f32::NAN } else { (avail_height - bp_h).max(0.0) };

    let has_children = !tree.node(node).children.is_empty();
    let has_measure_func = tree.node(node).measure_func.is_some();

    let (content_w, content_h) = if has_measure_func {
        let f = tree.node(node).measure_func.as_ref().unwrap().clone();
        let (mw, mh) = f(content_avail_w, content_avail_h, width_mode, height_mode);
        (mw.max(0.0), mh.max(0.0))
    } else if has_children {
        measure_container_intrinsic(tree, node, content_avail_w, content_avail_h, direction)
    } else {
        (0.0, 0.0)
    };

    let style = tree.node(node).style.clone();
    let mut explicit_w = style.width.resolve(avail_width);
    let mut explicit_h = style.height.resolve(avail_height);

    // A dimension is "definite" for aspect-ratio purposes when either the
    // caller already fixed it (Exactly mode) or the node's own style states
    // it outright. When exactly one side is definite, aspect-ratio resolves
    // the other before it ever reaches content-based sizing below.
    let definite_w = if width_mode == MeasureMode::Exactly && !avail_width.is_nan() {
        Some(avail_width)
    } else if !explicit_w.is_nan() {
        Some(explicit_w)
    } else {
        None
    };
    let definite_h = if height_mode == MeasureMode::Exactly && !avail_height.is_nan() {
        Some(avail_height)
    } else if !explicit_h.is_nan() {
        Some(explicit_h)
    } else {
        None
    };
    let aspect = style.aspect_ratio.resolve(f32::NAN);
    if !aspect.is_nan() && aspect > 0.0 {
        if let (Some(w), None) = (definite_w, definite_h) {
            explicit_h = w / aspect;
        } else if let (None, Some(h)) = (definite_w, definite_h) {
            explicit_w = h * aspect;
        }
    }

    // `Exactly` means the caller (a parent's flex distribution, or an
    // explicit calculateLayout(width, height)) has already decided this
    // node's border-box size — that wins over the node's own style, which
    // is how a flex-grown child with `width: auto` still ends up sized.
    let raw_w = if width_mode == MeasureMode::Exactly && !avail_width.is_nan() {
        avail_width
    } else if !explicit_w.is_nan() {
        explicit_w
    } else {
        content_w + bp_w
    };
    let raw_h = if height_mode == MeasureMode::Exactly && !avail_height.is_nan() {
        avail_height
    } else if !explicit_h.is_nan() {
        explicit_h
    } else {
        content_h + bp_h
    };

    let clamped_w = clamp_to_min_max(raw_w, style.min_width, style.max_width, avail_width).max(0.0);
    let clamped_h = clamp_to_min_max(raw_h, style.min_height, style.max_height, avail_height).max(0.0);

    let final_w = if width_mode == MeasureMode::AtMost && !avail_width.is_nan() {
        clamped_w.min(avail_width)
    } else {
        clamped_w
    };
    let final_h = if height_mode == MeasureMode::AtMost && !avail_height.is_nan() {
        clamped_h.min(avail_height)
    } else {
        clamped_h
    };

    tree.node_mut(node).cache.insert_measurement(
        avail_width,
        avail_height,
        width_mode,
        height_mode,
        final_w,
        final_h,
    );

    (final_w, final_h)
}

fn measure_container_intrinsic(
    tree: &mut Tree,
    node: NodeId,
    content_avail_w: f32,
    content_avail_h: f32,
    direction: Direction,
) -> (f32, f32) {
    let flex_direction = tree.node(node).style.flex_direction;
    let is_row = flex_direction.is_row();
    let gap = main_gap(&tree.node(node).style.clone(), flex_direction);

    let children: Vec<NodeId> = tree
        .node(node)
        .children
        .iter()
        .copied()
        .filter(|&c| {
            tree.node(c).style.position_type != crate::style::PositionType::Absolute
                && tree.node(c).style.display != crate::style::Display::None
        })
        .collect();

    let mut sum_main: f32 = 0.0;
    let mut max_cross: f32 = 0.0;

    for (i, &child) in children.iter().enumerate() {
        let child_style = tree.node(child).style.clone();
        let (main_style, _, _) = main_axis_style(&child_style, flex_direction);
        let (cross_style, _, _) = cross_axis_style(&child_style, flex_direction);

        let main_ref = if is_row { content_avail_w } else { content_avail_h };
        let cross_ref = if is_row { content_avail_h } else { content_avail_w };

        let explicit_main = main_style.resolve(main_ref);
        let (mw, mh) = measure_node(
            tree,
            child,
            if is_row { content_avail_w } else { cross_ref },
            if is_row { cross_ref } else { content_avail_h },
            direction,
            MeasureMode::AtMost,
            MeasureMode::AtMost,
        );
        let child_main = if !explicit_main.is_nan() {
            explicit_main
        } else if is_row {
            mw
        } else {
            mh
        };
        let explicit_cross = cross_style.resolve(cross_ref);
        let child_cross = if !explicit_cross.is_nan() {
            explicit_cross
        } else if is_row {
            mh
        } else {
            mw
        };

        sum_main += child_main;
        if i + 1 < children.len() {
            sum_main += gap;
        }
        max_cross = max_cross.max(child_cross);
    }

    if is_row {
        (sum_main, max_cross)
    } else {
        (max_cross, sum_main)
    }
}
