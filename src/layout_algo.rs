//! The full flex layout algorithm (C8): basis resolution, hypothetical main
//! size, line collection/wrap, grow/shrink distribution per line,
//! cross-axis sizing and alignment, main-axis justification with gaps,
//! multi-line align-content, absolute-child positioning, and ties-to-even
//! pixel rounding.
//!
//! Shaped after the teacher's `titan.rs` multi-pass structure (PASS 4:
//! line-wrap + justify/align over integer cells; PASS 5: a dedicated
//! absolute-positioning sweep), generalized from integer terminal cells to
//! floats and real CSS flexbox distribution.
//!
//! Measurement (`measure::measure_node`) never writes to a node's `Layout`
//! — only this module does, and only for the authoritative pass. That
//! keeps the two passes from ever stepping on each other's output, so
//! there's no intermediate layout write for a later call to "undo".

use crate::cache::MeasureMode;
use crate::edge::{Direction, PhysicalEdge};
use crate::measure::measure_node;
use crate::resolve::{
    clamp_to_min_max, cross_axis_style, cross_gap, is_margin_auto, main_axis_style, main_gap,
    resolve_inset, resolve_margin, resolve_spacing,
};
use crate::style::{Align, Display, FlexWrap, Justify, PositionType};
use crate::tree::{NodeId, Tree};
use crate::value::Value;

fn pixel_round(v: f32) -> f32 {
    v.round_ties_even()
}

struct ResolvedChild {
    id: NodeId,
    basis: f32,
    margin_main_lead: f32,
    margin_main_trail: f32,
    margin_cross_lead: f32,
    margin_cross_trail: f32,
    auto_margin_main_lead: bool,
    auto_margin_main_trail: bool,
    flex_grow: f32,
    flex_shrink: f32,
    cross_hypothetical: f32,
    cross_explicit: bool,
    align: Align,
    min_main: f32,
    max_main: f32,
}

struct Line {
    items: Vec<ResolvedChild>,
    cross_size: f32,
}

/// Lay out `node`'s subtree.
///
/// `abs_x`/`abs_y` are this node's unrounded border-box origin in root
/// space; `parent_abs_x`/`parent_abs_y` are the *already rounded* origin of
/// its parent, so `Layout::left`/`top` (parent-relative) can be derived as
/// `round(right) - round(left)`-style deltas rather than rounding a width
/// directly (spec's rounding-stability requirement).
#[allow(clippy::too_many_arguments)]
pub fn layout_node(
    tree: &mut Tree,
    node: NodeId,
    avail_width: f32,
    avail_height: f32,
    width_mode: MeasureMode,
    height_mode: MeasureMode,
    abs_x: f32,
    abs_y: f32,
    parent_abs_x: f32,
    parent_abs_y: f32,
    direction: Direction,
) {
    let style = tree.node(node).style.clone();

    {
        let fp = tree.node(node).cache.fingerprint;
        if fp.layout_valid
            && !tree.node(node).dirty
            && crate::value::nan_safe_eq(fp.last_avail_width, avail_width)
            && crate::value::nan_safe_eq(fp.last_avail_height, avail_height)
            && fp.last_offset_x == abs_x
            && fp.last_offset_y == abs_y
            && fp.last_direction == direction
        {
            log::trace!("layout_node({node:?}): fingerprint hit, skipping subtree");
            return;
        }
    }

    let (border_box_w, border_box_h) = match tree.node_mut(node).cache.find_layout(avail_width, avail_height, width_mode, height_mode) {
        Some(hit) if !tree.node(node).dirty => hit,
        _ => {
            let size = measure_node(tree, node, avail_width, avail_height, direction, width_mode, height_mode);
            tree.node_mut(node)
                .cache
                .insert_layout(avail_width, avail_height, width_mode, height_mode, size.0, size.1);
            size
        }
    };

    let rounded_left = pixel_round(abs_x);
    let rounded_top = pixel_round(abs_y);
    let rounded_right = pixel_round(abs_x + border_box_w);
    let rounded_bottom = pixel_round(abs_y + border_box_h);

    let (pad_l, pad_r) = (
        resolve_spacing(&style.padding, PhysicalEdge::Left, direction, avail_width),
        resolve_spacing(&style.padding, PhysicalEdge::Right, direction, avail_width),
    );
    let (pad_t, pad_b) = (
        resolve_spacing(&style.padding, PhysicalEdge::Top, direction, avail_height),
        resolve_spacing(&style.padding, PhysicalEdge::Bottom, direction, avail_height),
    );
    let (bor_l, bor_r) = (
        resolve_spacing(&style.border, PhysicalEdge::Left, direction, avail_width),
        resolve_spacing(&style.border, PhysicalEdge::Right, direction, avail_width),
    );
    let (bor_t, bor_b) = (
        resolve_spacing(&style.border, PhysicalEdge::Top, direction, avail_height),
        resolve_spacing(&style.border, PhysicalEdge::Bottom, direction, avail_height),
    );
    let (margin_l, margin_r) = (
        resolve_margin(&style.margin, PhysicalEdge::Left, direction, avail_width),
        resolve_margin(&style.margin, PhysicalEdge::Right, direction, avail_width),
    );
    let (margin_t, margin_b) = (
        resolve_margin(&style.margin, PhysicalEdge::Top, direction, avail_height),
        resolve_margin(&style.margin, PhysicalEdge::Bottom, direction, avail_height),
    );

    {
        let layout = &mut tree.node_mut(node).layout;
        layout.left = rounded_left - parent_abs_x;
        layout.top = rounded_top - parent_abs_y;
        layout.width = rounded_right - rounded_left;
        layout.height = rounded_bottom - rounded_top;
        layout.padding = [pad_l, pad_t, pad_r, pad_b];
        layout.border = [bor_l, bor_t, bor_r, bor_b];
        layout.margin = [margin_l, margin_t, margin_r, margin_b];
        layout.direction = direction;
    }

    let content_w = (border_box_w - pad_l - pad_r - bor_l - bor_r).max(0.0);
    let content_h = (border_box_h - pad_t - pad_b - bor_t - bor_b).max(0.0);
    let content_origin_x = pad_l + bor_l;
    let content_origin_y = pad_t + bor_t;

    if tree.node(node).measure_func.is_some() || tree.node(node).children.is_empty() {
        finish(tree, node, avail_width, avail_height, abs_x, abs_y, direction);
        return;
    }

    let flex_direction = style.flex_direction;
    let is_row = flex_direction.is_row();
    // `Wrap` and `WrapReverse` collect lines identically; they only differ
    // in which line sits closest to the cross-start, handled below.
    let wrap = style.flex_wrap != FlexWrap::NoWrap;
    let gap_main = main_gap(&style, flex_direction);
    let gap_cross = cross_gap(&style, flex_direction);

    let all_children: Vec<NodeId> = tree
        .node(node)
        .children
        .iter()
        .copied()
        .filter(|&c| tree.node(c).style.display != Display::None)
        .collect();
    let (flow_children, absolute_children): (Vec<NodeId>, Vec<NodeId>) = all_children
        .into_iter()
        .partition(|&c| tree.node(c).style.position_type != PositionType::Absolute);

    let main_ref = if is_row { content_w } else { content_h };
    let cross_ref = if is_row { content_h } else { content_w };

    let mut resolved: Vec<ResolvedChild> = Vec::with_capacity(flow_children.len());
    for &child in &flow_children {
        resolved.push(resolve_child(tree, child, direction, flex_direction, main_ref, cross_ref, style.align_items));
    }

    // --- line collection ---
    let mut lines: Vec<Line> = Vec::new();
    if !wrap || main_ref.is_nan() {
        lines.push(Line { items: resolved, cross_size: 0.0 });
    } else {
        let mut current: Vec<ResolvedChild> = Vec::new();
        let mut current_main: f32 = 0.0;
        for child in resolved {
            let needed = child.basis + child.margin_main_lead + child.margin_main_trail;
            let gap_if_appended = if current.is_empty() { 0.0 } else { gap_main };
            if !current.is_empty() && current_main + gap_if_appended + needed > main_ref {
                lines.push(Line { items: std::mem::take(&mut current), cross_size: 0.0 });
                current_main = 0.0;
            }
            current_main += needed + if current.is_empty() { 0.0 } else { gap_main };
            current.push(child);
        }
        lines.push(Line { items: current, cross_size: 0.0 });
    }

    // --- per-line grow/shrink distribution ---
    for line in &mut lines {
        if line.items.is_empty() {
            continue;
        }
        let n = line.items.len();
        let margins: f32 = line.items.iter().map(|c| c.margin_main_lead + c.margin_main_trail).sum();
        let gaps = gap_main * (n - 1).max(0) as f32;
        let used: f32 = line.items.iter().map(|c| c.basis).sum::<f32>() + margins + gaps;
        if !main_ref.is_nan() {
            let free = main_ref - used;
            if free > 0.0 {
                distribute_grow(&mut line.items, free);
            } else if free < 0.0 {
                distribute_shrink(&mut line.items, -free);
            }
        }
    }

    // --- per-line cross size, then container cross size ---
    for line in &mut lines {
        line.cross_size = line
            .items
            .iter()
            .fold(0.0_f32, |acc, c| acc.max(c.cross_hypothetical + c.margin_cross_lead + c.margin_cross_trail));
    }
    let line_count = lines.len();
    let line_gaps = gap_cross * (line_count - 1).max(0) as f32;
    let lines_cross_sum: f32 = lines.iter().map(|l| l.cross_size).sum::<f32>() + line_gaps;
    let container_cross = cross_ref;
    let extra_cross = if container_cross.is_nan() { 0.0 } else { (container_cross - lines_cross_sum).max(0.0) };

    let (cross_start, cross_between) = align_content_offsets(style.align_content, extra_cross, line_count);
    let per_line_stretch = if style.align_content == Align::Stretch && line_count > 0 {
        extra_cross / line_count as f32
    } else {
        0.0
    };

    // `wrap-reverse` keeps each line's own contents untouched and instead
    // reverses which line sits closest to the cross-start: the first
    // collected line ends up nearest the cross-end.
    if style.flex_wrap == FlexWrap::WrapReverse {
        lines.reverse();
    }

    let mut cross_cursor = cross_start;
    for line in lines.iter_mut() {
        let line_cross_size = line.cross_size + per_line_stretch;
        let n = line.items.len();

        let margins: f32 = line.items.iter().map(|c| c.margin_main_lead + c.margin_main_trail).sum();
        let gaps = gap_main * (n.max(1) - 1) as f32;
        let used: f32 = line.items.iter().map(|c| c.basis).sum::<f32>() + margins + gaps;
        let free_main = if main_ref.is_nan() { 0.0 } else { (main_ref - used).max(0.0) };

        let auto_lead_count = line.items.iter().filter(|c| c.auto_margin_main_lead).count();
        let auto_trail_count = line.items.iter().filter(|c| c.auto_margin_main_trail).count();
        let auto_total = auto_lead_count + auto_trail_count;

        let (start_main, between_main) = if auto_total > 0 {
            (0.0, 0.0)
        } else {
            justify_offsets(style.justify_content, free_main, n)
        };
        let auto_share = if auto_total > 0 { free_main / auto_total as f32 } else { 0.0 };

        let reverse = flex_direction.is_reverse();

        // `row-reverse`/`column-reverse` pack from logical main-start exactly
        // like the forward case above, then flip each child's resulting
        // main-axis coordinate across the line — not just the visitation
        // order — so free space lands on the correct side and children
        // still appear in reverse source order.
        let mut main_cursor = start_main;
        for (seq, child) in line.items.iter().enumerate() {
            let lead_auto = if child.auto_margin_main_lead { auto_share } else { 0.0 };
            let trail_auto = if child.auto_margin_main_trail { auto_share } else { 0.0 };

            main_cursor += child.margin_main_lead + lead_auto;

            let cross_pos = cross_axis_position(child, line_cross_size, cross_cursor);
            let stretched_cross = if child.align == Align::Stretch && !child.cross_explicit {
                (line_cross_size - child.margin_cross_lead - child.margin_cross_trail).max(0.0)
            } else {
                child.cross_hypothetical
            };

            let (child_avail_w, child_avail_h) =
                if is_row { (child.basis, stretched_cross) } else { (stretched_cross, child.basis) };

            let physical_main = if reverse && !main_ref.is_nan() {
                main_ref - main_cursor - child.basis
            } else {
                main_cursor
            };

            let (child_dx, child_dy) = if is_row {
                (physical_main, cross_pos)
            } else {
                (cross_pos, physical_main)
            };

            let child_abs_x = abs_x + content_origin_x + child_dx;
            let child_abs_y = abs_y + content_origin_y + child_dy;

            // Both axes are already fully resolved by basis/grow/shrink and
            // cross-axis stretch/alignment above, so the child is laid out
            // `Exactly` on both — there's nothing left for it to re-infer.
            layout_node(
                tree,
                child.id,
                child_avail_w,
                child_avail_h,
                MeasureMode::Exactly,
                MeasureMode::Exactly,
                child_abs_x,
                child_abs_y,
                rounded_left,
                rounded_top,
                direction,
            );

            main_cursor += child.basis + child.margin_main_trail + trail_auto;
            if seq + 1 < n {
                main_cursor += gap_main + between_main;
            }
        }

        cross_cursor += line_cross_size;
        cross_cursor += gap_cross + cross_between;
    }

    for &child in &absolute_children {
        layout_absolute_child(
            tree,
            child,
            content_w,
            content_h,
            abs_x + content_origin_x,
            abs_y + content_origin_y,
            rounded_left,
            rounded_top,
            direction,
        );
    }

    finish(tree, node, avail_width, avail_height, abs_x, abs_y, direction);
}

fn finish(tree: &mut Tree, node: NodeId, avail_width: f32, avail_height: f32, abs_x: f32, abs_y: f32, direction: Direction) {
    let data = tree.node_mut(node);
    data.dirty = false;
    let fp = &mut data.cache.fingerprint;
    fp.last_avail_width = avail_width;
    fp.last_avail_height = avail_height;
    fp.last_offset_x = abs_x;
    fp.last_offset_y = abs_y;
    fp.last_direction = direction;
    fp.main_size = data.layout.width;
    fp.cross_size = data.layout.height;
    fp.base_size = data.layout.width;
    fp.layout_valid = true;
}

pub(crate) fn measure_mode_for(explicit: f32, avail: f32) -> MeasureMode {
    if !explicit.is_nan() {
        MeasureMode::Exactly
    } else if avail.is_nan() {
        MeasureMode::Undefined
    } else {
        MeasureMode::AtMost
    }
}

fn resolve_child(
    tree: &mut Tree,
    child: NodeId,
    direction: Direction,
    flex_direction: crate::style::FlexDirection,
    main_ref: f32,
    cross_ref: f32,
    parent_align_items: Align,
) -> ResolvedChild {
    let is_row = flex_direction.is_row();
    let cstyle = tree.node(child).style.clone();
    let (main_size_style, main_min, main_max) = main_axis_style(&cstyle, flex_direction);
    let (cross_size_style, cross_min, cross_max) = cross_axis_style(&cstyle, flex_direction);

    let margin_left = resolve_margin(&cstyle.margin, PhysicalEdge::Left, direction, main_ref_for(is_row, main_ref, cross_ref, true));
    let margin_right = resolve_margin(&cstyle.margin, PhysicalEdge::Right, direction, main_ref_for(is_row, main_ref, cross_ref, true));
    let margin_top = resolve_margin(&cstyle.margin, PhysicalEdge::Top, direction, main_ref_for(is_row, main_ref, cross_ref, false));
    let margin_bottom = resolve_margin(&cstyle.margin, PhysicalEdge::Bottom, direction, main_ref_for(is_row, main_ref, cross_ref, false));
    let auto_left = is_margin_auto(&cstyle.margin, PhysicalEdge::Left, direction);
    let auto_right = is_margin_auto(&cstyle.margin, PhysicalEdge::Right, direction);
    let auto_top = is_margin_auto(&cstyle.margin, PhysicalEdge::Top, direction);
    let auto_bottom = is_margin_auto(&cstyle.margin, PhysicalEdge::Bottom, direction);

    let (margin_main_lead, margin_main_trail, margin_cross_lead, margin_cross_trail) = if is_row {
        (margin_left, margin_right, margin_top, margin_bottom)
    } else {
        (margin_top, margin_bottom, margin_left, margin_right)
    };
    let (auto_main_lead, auto_main_trail) = if is_row { (auto_left, auto_right) } else { (auto_top, auto_bottom) };

    let basis = match cstyle.flex_basis {
        Value::Auto | Value::Undefined => {
            let explicit = main_size_style.resolve(main_ref);
            if !explicit.is_nan() {
                explicit
            } else {
                let (mw, mh) = measure_node(
                    tree,
                    child,
                    if is_row { f32::NAN } else { cross_ref },
                    if is_row { cross_ref } else { f32::NAN },
                    direction,
                    MeasureMode::Undefined,
                    MeasureMode::Undefined,
                );
                if is_row { mw } else { mh }
            }
        }
        v => v.resolve_or(main_ref, 0.0),
    };
    let min_main = main_min.resolve(main_ref);
    let max_main = main_max.resolve(main_ref);
    let clamped_basis = clamp_to_min_max(basis, main_min, main_max, main_ref).max(0.0);

    let cross_explicit_val = cross_size_style.resolve(cross_ref);
    let cross_explicit = !cross_explicit_val.is_nan();
    let cross_hypothetical = if cross_explicit {
        clamp_to_min_max(cross_explicit_val, cross_min, cross_max, cross_ref)
    } else {
        let (mw, mh) = measure_node(
            tree,
            child,
            if is_row { clamped_basis } else { cross_ref },
            if is_row { cross_ref } else { clamped_basis },
            direction,
            if is_row { MeasureMode::Exactly } else { MeasureMode::AtMost },
            if is_row { MeasureMode::AtMost } else { MeasureMode::Exactly },
        );
        clamp_to_min_max(if is_row { mh } else { mw }, cross_min, cross_max, cross_ref)
    };

    let align = if cstyle.align_self == Align::Auto { parent_align_items } else { cstyle.align_self };

    ResolvedChild {
        id: child,
        basis: clamped_basis,
        margin_main_lead,
        margin_main_trail,
        margin_cross_lead,
        margin_cross_trail,
        auto_margin_main_lead: auto_main_lead,
        auto_margin_main_trail: auto_main_trail,
        flex_grow: cstyle.flex_grow.max(0.0),
        flex_shrink: cstyle.flex_shrink.max(0.0),
        cross_hypothetical,
        cross_explicit,
        align,
        min_main,
        max_main,
    }
}

fn main_ref_for(is_row: bool, main_ref: f32, cross_ref: f32, want_horizontal: bool) -> f32 {
    let horizontal_ref = if is_row { main_ref } else { cross_ref };
    let vertical_ref = if is_row { cross_ref } else { main_ref };
    if want_horizontal {
        horizontal_ref
    } else {
        vertical_ref
    }
}

/// Grow distribution: give each item a share of `free` proportional to its
/// `flex_grow`, re-clamping against `max_main` and redistributing any space
/// a clamped item can't absorb among the remaining unclamped items — a
/// fixed-point loop since one clamp can free up slack for the others.
fn distribute_grow(items: &mut [ResolvedChild], mut free: f32) {
    let mut frozen = vec![false; items.len()];
    loop {
        let total_grow: f32 = items.iter().zip(&frozen).filter(|(_, &f)| !f).map(|(c, _)| c.flex_grow).sum();
        if total_grow <= 0.0 || free <= 0.0 {
            break;
        }
        let mut any_frozen_this_round = false;
        let mut distributed = 0.0;
        for (item, froze) in items.iter_mut().zip(frozen.iter_mut()) {
            if *froze || item.flex_grow <= 0.0 {
                continue;
            }
            let share = free * (item.flex_grow / total_grow);
            let target = item.basis + share;
            if !item.max_main.is_nan() && target > item.max_main {
                distributed += item.max_main - item.basis;
                item.basis = item.max_main;
                *froze = true;
                any_frozen_this_round = true;
            } else {
                distributed += share;
                item.basis = target;
            }
        }
        free -= distributed;
        if !any_frozen_this_round {
            break;
        }
    }
}

/// Shrink distribution, weighted by `flex_shrink * basis` per the flexbox
/// spec (a larger item absorbs proportionally more of the shrink amount).
fn distribute_shrink(items: &mut [ResolvedChild], mut deficit: f32) {
    let mut frozen = vec![false; items.len()];
    loop {
        let total_weight: f32 = items
            .iter()
            .zip(&frozen)
            .filter(|(_, &f)| !f)
            .map(|(c, _)| c.flex_shrink * c.basis)
            .sum();
        if total_weight <= 0.0 || deficit <= 0.0 {
            break;
        }
        let mut any_frozen_this_round = false;
        let mut absorbed = 0.0;
        for (item, froze) in items.iter_mut().zip(frozen.iter_mut()) {
            if *froze || item.flex_shrink <= 0.0 {
                continue;
            }
            let weight = item.flex_shrink * item.basis;
            let share = deficit * (weight / total_weight);
            let target = item.basis - share;
            if !item.min_main.is_nan() && target < item.min_main {
                absorbed += item.basis - item.min_main;
                item.basis = item.min_main;
                *froze = true;
                any_frozen_this_round = true;
            } else {
                absorbed += share;
                item.basis = target;
            }
        }
        deficit -= absorbed;
        if !any_frozen_this_round {
            break;
        }
    }
}

fn justify_offsets(justify: Justify, free: f32, count: usize) -> (f32, f32) {
    if count == 0 {
        return (0.0, 0.0);
    }
    match justify {
        Justify::FlexStart => (0.0, 0.0),
        Justify::FlexEnd => (free, 0.0),
        Justify::Center => (free / 2.0, 0.0),
        Justify::SpaceBetween => {
            if count == 1 {
                (0.0, 0.0)
            } else {
                (0.0, free / (count - 1) as f32)
            }
        }
        Justify::SpaceAround => {
            let each = free / count as f32;
            (each / 2.0, each)
        }
        Justify::SpaceEvenly => {
            let each = free / (count + 1) as f32;
            (each, each)
        }
    }
}

fn align_content_offsets(align: Align, extra: f32, count: usize) -> (f32, f32) {
    if count == 0 {
        return (0.0, 0.0);
    }
    match align {
        Align::FlexStart | Align::Stretch | Align::Auto | Align::Baseline => (0.0, 0.0),
        Align::FlexEnd => (extra, 0.0),
        Align::Center => (extra / 2.0, 0.0),
        Align::SpaceBetween => {
            if count == 1 {
                (0.0, 0.0)
            } else {
                (0.0, extra / (count - 1) as f32)
            }
        }
        Align::SpaceAround => {
            let each = extra / count as f32;
            (each / 2.0, each)
        }
    }
}

fn cross_axis_position(child: &ResolvedChild, line_cross_size: f32, line_start: f32) -> f32 {
    let room = (line_cross_size - child.margin_cross_lead - child.margin_cross_trail - child.cross_hypothetical).max(0.0);
    let local = match child.align {
        Align::FlexStart | Align::Stretch | Align::Auto | Align::Baseline => 0.0,
        Align::FlexEnd => room,
        Align::Center => room / 2.0,
        Align::SpaceBetween | Align::SpaceAround => 0.0,
    };
    line_start + child.margin_cross_lead + local
}

#[allow(clippy::too_many_arguments)]
fn layout_absolute_child(
    tree: &mut Tree,
    child: NodeId,
    padding_box_w: f32,
    padding_box_h: f32,
    abs_origin_x: f32,
    abs_origin_y: f32,
    parent_abs_x: f32,
    parent_abs_y: f32,
    direction: Direction,
) {
    let cstyle = tree.node(child).style.clone();

    let left = resolve_inset(&cstyle.position, PhysicalEdge::Left, direction, padding_box_w);
    let right = resolve_inset(&cstyle.position, PhysicalEdge::Right, direction, padding_box_w);
    let top = resolve_inset(&cstyle.position, PhysicalEdge::Top, direction, padding_box_h);
    let bottom = resolve_inset(&cstyle.position, PhysicalEdge::Bottom, direction, padding_box_h);

    let width_mode = measure_mode_for(cstyle.width.resolve(padding_box_w), padding_box_w);
    let height_mode = measure_mode_for(cstyle.height.resolve(padding_box_h), padding_box_h);
    let (w, h) = measure_node(tree, child, padding_box_w, padding_box_h, direction, width_mode, height_mode);

    let x = if !left.is_nan() {
        left
    } else if !right.is_nan() {
        padding_box_w - right - w
    } else {
        0.0
    };
    let y = if !top.is_nan() {
        top
    } else if !bottom.is_nan() {
        padding_box_h - bottom - h
    } else {
        0.0
    };

    layout_node(
        tree,
        child,
        w,
        h,
        MeasureMode::Exactly,
        MeasureMode::Exactly,
        abs_origin_x + x,
        abs_origin_y + y,
        parent_abs_x,
        parent_abs_y,
        direction,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::FlexDirection;
    use crate::tree::Tree;

    fn layout_root(tree: &mut Tree, root: NodeId, w: f32, h: f32) {
        layout_node(tree, root, w, h, MeasureMode::Exactly, MeasureMode::Exactly, 0.0, 0.0, 0.0, 0.0, Direction::Ltr);
    }

    #[test]
    fn single_child_fills_column_container_by_default_stretch() {
        let mut t = Tree::new();
        let root = t.create_node();
        let child = t.create_node();
        t.insert_child(root, child, 0).unwrap();
        t.set_width(root, Value::Point(100.0));
        t.set_height(root, Value::Point(100.0));
        t.set_height(child, Value::Point(20.0));

        layout_root(&mut t, root, 100.0, 100.0);

        let l = t.layout(child);
        assert_eq!(l.width, 100.0);
        assert_eq!(l.height, 20.0);
    }

    #[test]
    fn row_direction_lays_children_side_by_side() {
        let mut t = Tree::new();
        let root = t.create_node();
        t.set_flex_direction(root, FlexDirection::Row);
        t.set_width(root, Value::Point(100.0));
        t.set_height(root, Value::Point(50.0));

        let a = t.create_node();
        let b = t.create_node();
        t.set_width(a, Value::Point(30.0));
        t.set_width(b, Value::Point(30.0));
        t.insert_child(root, a, 0).unwrap();
        t.insert_child(root, b, 1).unwrap();

        layout_root(&mut t, root, 100.0, 50.0);

        assert_eq!(t.layout(a).left, 0.0);
        assert_eq!(t.layout(b).left, 30.0);
    }

    #[test]
    fn flex_grow_distributes_remaining_main_space() {
        let mut t = Tree::new();
        let root = t.create_node();
        t.set_flex_direction(root, FlexDirection::Row);
        t.set_width(root, Value::Point(100.0));
        t.set_height(root, Value::Point(50.0));

        let a = t.create_node();
        let b = t.create_node();
        t.set_flex_grow(a, 1.0);
        t.set_flex_grow(b, 1.0);
        t.insert_child(root, a, 0).unwrap();
        t.insert_child(root, b, 1).unwrap();

        layout_root(&mut t, root, 100.0, 50.0);

        assert_eq!(t.layout(a).width, 50.0);
        assert_eq!(t.layout(b).width, 50.0);
    }

    #[test]
    fn justify_center_centers_items_on_main_axis() {
        let mut t = Tree::new();
        let root = t.create_node();
        t.set_flex_direction(root, FlexDirection::Row);
        t.set_justify_content(root, Justify::Center);
        t.set_width(root, Value::Point(100.0));
        t.set_height(root, Value::Point(50.0));

        let a = t.create_node();
        t.set_width(a, Value::Point(20.0));
        t.insert_child(root, a, 0).unwrap();

        layout_root(&mut t, root, 100.0, 50.0);

        assert_eq!(t.layout(a).left, 40.0);
    }

    #[test]
    fn wrapping_starts_a_new_line_when_main_axis_overflows() {
        let mut t = Tree::new();
        let root = t.create_node();
        t.set_flex_direction(root, FlexDirection::Row);
        t.set_flex_wrap(root, FlexWrap::Wrap);
        t.set_width(root, Value::Point(50.0));
        t.set_height(root, Value::Point(100.0));

        let a = t.create_node();
        let b = t.create_node();
        t.set_width(a, Value::Point(30.0));
        t.set_height(a, Value::Point(10.0));
        t.set_width(b, Value::Point(30.0));
        t.set_height(b, Value::Point(10.0));
        t.insert_child(root, a, 0).unwrap();
        t.insert_child(root, b, 1).unwrap();

        layout_root(&mut t, root, 50.0, 100.0);

        assert_eq!(t.layout(a).top, 0.0);
        assert_eq!(t.layout(b).top, 10.0);
    }

    #[test]
    fn absolute_child_is_positioned_against_padding_box() {
        let mut t = Tree::new();
        let root = t.create_node();
        t.set_width(root, Value::Point(100.0));
        t.set_height(root, Value::Point(100.0));

        let child = t.create_node();
        t.set_position_type(child, PositionType::Absolute);
        t.set_position_edge(child, crate::edge::Edge::Right, Value::Point(5.0));
        t.set_position_edge(child, crate::edge::Edge::Top, Value::Point(5.0));
        t.set_width(child, Value::Point(10.0));
        t.set_height(child, Value::Point(10.0));
        t.insert_child(root, child, 0).unwrap();

        layout_root(&mut t, root, 100.0, 100.0);

        let l = t.layout(child);
        assert_eq!(l.top, 5.0);
        assert_eq!(l.left, 85.0);
    }

    #[test]
    fn rounding_uses_round_right_minus_round_left_not_rounded_width() {
        let mut t = Tree::new();
        let root = t.create_node();
        t.set_flex_direction(root, FlexDirection::Row);
        t.set_width(root, Value::Point(10.0));
        t.set_height(root, Value::Point(10.0));

        let a = t.create_node();
        let b = t.create_node();
        let c = t.create_node();
        // three equal-grow children of a 10-wide row: 3.333... each.
        t.set_flex_grow(a, 1.0);
        t.set_flex_grow(b, 1.0);
        t.set_flex_grow(c, 1.0);
        t.insert_child(root, a, 0).unwrap();
        t.insert_child(root, b, 1).unwrap();
        t.insert_child(root, c, 2).unwrap();

        layout_root(&mut t, root, 10.0, 10.0);

        let total = t.layout(a).width + t.layout(b).width + t.layout(c).width;
        assert_eq!(total, 10.0);
    }

    #[test]
    fn row_reverse_packs_children_against_the_trailing_edge() {
        let mut t = Tree::new();
        let root = t.create_node();
        t.set_flex_direction(root, FlexDirection::RowReverse);
        t.set_width(root, Value::Point(100.0));
        t.set_height(root, Value::Point(50.0));

        let a = t.create_node();
        let b = t.create_node();
        t.set_width(a, Value::Point(30.0));
        t.set_width(b, Value::Point(30.0));
        t.insert_child(root, a, 0).unwrap();
        t.insert_child(root, b, 1).unwrap();

        layout_root(&mut t, root, 100.0, 50.0);

        // First child sits flush against the right edge (main-start under
        // row-reverse); the second sits to its left; free space trails on
        // the physical left, not the right.
        assert_eq!(t.layout(a).left, 70.0);
        assert_eq!(t.layout(b).left, 40.0);
    }

    #[test]
    fn wrap_reverse_places_the_first_collected_line_at_the_cross_end() {
        let mut t = Tree::new();
        let root = t.create_node();
        t.set_flex_direction(root, FlexDirection::Row);
        t.set_flex_wrap(root, FlexWrap::WrapReverse);
        t.set_width(root, Value::Point(50.0));
        t.set_height(root, Value::Point(100.0));

        let a = t.create_node();
        let b = t.create_node();
        t.set_width(a, Value::Point(30.0));
        t.set_height(a, Value::Point(10.0));
        t.set_width(b, Value::Point(30.0));
        t.set_height(b, Value::Point(10.0));
        t.insert_child(root, a, 0).unwrap();
        t.insert_child(root, b, 1).unwrap();

        layout_root(&mut t, root, 50.0, 100.0);

        // `a` is alone on the first collected line, `b` wraps to the second.
        // Under wrap-reverse the first line lands at the cross-end instead
        // of the cross-start.
        assert_eq!(t.layout(a).top, 10.0);
        assert_eq!(t.layout(b).top, 0.0);
    }

    #[test]
    fn repeated_identical_layout_call_is_a_fingerprint_hit() {
        let mut t = Tree::new();
        let root = t.create_node();
        t.set_width(root, Value::Point(50.0));
        t.set_height(root, Value::Point(50.0));
        t.calculate_layout(root, 50.0, 50.0, Direction::Ltr);
        let first = *t.layout(root);
        t.calculate_layout(root, 50.0, 50.0, Direction::Ltr);
        assert_eq!(*t.layout(root), first);
    }
}
