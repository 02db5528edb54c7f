//! The node arena (C5) and the node-facing API (§6): construction, tree
//! mutation, style setters, dirty propagation, and `calculate_layout`.
//!
//! Nodes live in a generation-tagged slab, the instance-scoped
//! generalization of `registry.rs`'s thread-local `allocate_index`/
//! `release_index` free-list (spec.md §9 asks for exactly this: "an arena
//! that stores nodes by index... parent as an index [or] generation-tagged
//! handle"). A thread-local singleton registry — the teacher's actual
//! shape — can't satisfy spec.md §5's "a process may hold many independent
//! trees", so ownership moves onto a `Tree` value instead.

use std::rc::Rc;

use crate::cache::{MeasureMode, NodeCache};
use crate::edge::{Direction, Edge, EdgeValues};
use crate::error::{Result, TitanFlexError};
use crate::layout_result::Layout;
use crate::style::{Align, Display, FlexDirection, FlexWrap, Gutter, Justify, Overflow, PositionType, Style};
use crate::value::{nan_safe_eq, Value};

pub type MeasureFunc = Rc<dyn Fn(f32, f32, MeasureMode, MeasureMode) -> (f32, f32)>;

/// A handle to a node in one `Tree`. Carries a generation counter so a
/// handle to a freed-and-reused slot is detected rather than silently
/// aliasing the wrong node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

pub(crate) struct NodeData {
    pub style: Style,
    pub layout: Layout,
    pub cache: NodeCache,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub measure_func: Option<MeasureFunc>,
    pub dirty: bool,
}

impl NodeData {
    fn new() -> Self {
        Self {
            style: Style::default(),
            layout: Layout::default(),
            cache: NodeCache::default(),
            parent: None,
            children: Vec::new(),
            measure_func: None,
            dirty: true,
        }
    }
}

struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

/// One independent flexbox tree (arena of nodes + free list).
#[derive(Default)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl Tree {
    pub fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new() }
    }

    pub fn create_node(&mut self) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.data = Some(NodeData::new());
            return NodeId { index, generation: slot.generation };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot { generation: 0, data: Some(NodeData::new()) });
        NodeId { index, generation: 0 }
    }

    fn valid(&self, id: NodeId) -> bool {
        self.slots
            .get(id.index as usize)
            .map(|s| s.generation == id.generation && s.data.is_some())
            .unwrap_or(false)
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeData {
        self.slots[id.index as usize].data.as_ref().expect("use of freed node")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        self.slots[id.index as usize].data.as_mut().expect("use of freed node")
    }

    /// Free a single node. It must have no children (use
    /// [`Tree::free_recursive`] for a subtree) — freeing a node still
    /// attached to a parent first detaches it.
    pub fn free(&mut self, id: NodeId) -> Result<()> {
        if !self.valid(id) {
            return Err(TitanFlexError::InvalidNode(id));
        }
        if let Some(parent) = self.node(id).parent {
            let _ = self.remove_child(parent, id);
        }
        self.deallocate(id);
        Ok(())
    }

    /// Free a node and its entire subtree.
    pub fn free_recursive(&mut self, id: NodeId) -> Result<()> {
        if !self.valid(id) {
            return Err(TitanFlexError::InvalidNode(id));
        }
        let children = self.node(id).children.clone();
        for c in children {
            self.free_recursive(c)?;
        }
        if let Some(parent) = self.node(id).parent {
            if let Some(pos) = self.node(parent).children.iter().position(|&c| c == id) {
                self.node_mut(parent).children.remove(pos);
            }
        }
        self.deallocate(id);
        Ok(())
    }

    fn deallocate(&mut self, id: NodeId) {
        let slot = &mut self.slots[id.index as usize];
        slot.data = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
    }

    fn is_ancestor(&self, candidate: NodeId, of: NodeId) -> bool {
        let mut cur = self.node(of).parent;
        while let Some(p) = cur {
            if p == candidate {
                return true;
            }
            cur = self.node(p).parent;
        }
        false
    }

    /// Insert `child` under `parent` at `index`. `child` must not currently
    /// have an owner (remove it first, or use [`Tree::reparent`]); inserting
    /// an ancestor as its own descendant is rejected as a cycle.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        if !self.valid(parent) {
            return Err(TitanFlexError::InvalidNode(parent));
        }
        if !self.valid(child) {
            return Err(TitanFlexError::InvalidNode(child));
        }
        if self.node(child).parent.is_some() {
            return Err(TitanFlexError::AlreadyOwned(child));
        }
        if child == parent || self.is_ancestor(child, parent) {
            return Err(TitanFlexError::WouldCreateCycle(child, parent));
        }
        let at = index.min(self.node(parent).children.len());
        self.node_mut(parent).children.insert(at, child);
        self.node_mut(child).parent = Some(parent);
        self.mark_dirty(parent);
        Ok(())
    }

    /// Remove `child` from `parent`'s children, leaving `child` ownerless.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.valid(parent) {
            return Err(TitanFlexError::InvalidNode(parent));
        }
        if !self.valid(child) {
            return Err(TitanFlexError::InvalidNode(child));
        }
        let pos = self.node(parent).children.iter().position(|&c| c == child);
        if let Some(pos) = pos {
            self.node_mut(parent).children.remove(pos);
            self.node_mut(child).parent = None;
            self.mark_dirty(parent);
        }
        Ok(())
    }

    /// Detach `child` from its current owner (if any) and attach it under
    /// `new_parent` at `index` — the "reparented once per operation" case
    /// spec.md §3's lifecycle section allows for.
    pub fn reparent(&mut self, child: NodeId, new_parent: NodeId, index: usize) -> Result<()> {
        if let Some(old_parent) = self.node(child).parent {
            self.remove_child(old_parent, child)?;
        }
        self.insert_child(new_parent, child, index)
    }

    pub fn child(&self, parent: NodeId, index: usize) -> Option<NodeId> {
        self.node(parent).children.get(index).copied()
    }

    pub fn child_count(&self, parent: NodeId) -> usize {
        self.node(parent).children.len()
    }

    pub fn owner(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn is_dirty(&self, node: NodeId) -> bool {
        self.node(node).dirty
    }

    pub fn set_measure_func(&mut self, node: NodeId, f: Option<MeasureFunc>) {
        self.node_mut(node).measure_func = f;
        self.mark_dirty(node);
    }

    pub fn layout(&self, node: NodeId) -> &Layout {
        &self.node(node).layout
    }

    /// Walk from `node` to its owning root, clearing caches along the way;
    /// stop setting `dirty` past the first already-dirty ancestor (its
    /// cache is still cleared, since a descendant change may invalidate a
    /// parent layout that depended on that descendant's measurement).
    pub fn mark_dirty(&mut self, node: NodeId) {
        let mut cur = Some(node);
        while let Some(n) = cur {
            let data = self.node_mut(n);
            let was_dirty = data.dirty;
            data.cache.clear_all();
            if was_dirty {
                break;
            }
            data.dirty = true;
            cur = data.parent;
        }
    }

    /// Entry point: lay out `root`'s subtree. Returns immediately
    /// (fingerprint hit) when `root` is clean and every relevant input
    /// matches the prior call (C9).
    pub fn calculate_layout(&mut self, root: NodeId, avail_width: f32, avail_height: f32, direction: Direction) {
        let data = self.node(root);
        let fp = data.cache.fingerprint;
        if fp.layout_valid
            && !data.dirty
            && nan_safe_eq(fp.last_avail_width, avail_width)
            && nan_safe_eq(fp.last_avail_height, avail_height)
            && fp.last_direction == direction
            && fp.last_offset_x == 0.0
            && fp.last_offset_y == 0.0
        {
            log::trace!("calculate_layout({root:?}): fingerprint hit, skipping");
            return;
        }
        // The root's available size is always authoritative when defined —
        // matching Yoga's `calculateLayout(width, height, ...)`, where a
        // concrete width/height wins over the root's own style.
        let width_mode = if avail_width.is_nan() { MeasureMode::Undefined } else { MeasureMode::Exactly };
        let height_mode = if avail_height.is_nan() { MeasureMode::Undefined } else { MeasureMode::Exactly };

        log::debug!("calculate_layout({root:?}): computing (avail {avail_width}x{avail_height})");
        self.node_mut(root).cache.clear_layout_cache();
        crate::layout_algo::layout_node(
            self, root, avail_width, avail_height, width_mode, height_mode, 0.0, 0.0, 0.0, 0.0, direction,
        );
    }

    // =====================================================================
    // Style setters
    // =====================================================================

    pub fn set_flex_direction(&mut self, node: NodeId, v: FlexDirection) {
        if self.node(node).style.flex_direction == v {
            return;
        }
        self.node_mut(node).style.flex_direction = v;
        self.mark_dirty(node);
    }

    pub fn set_flex_wrap(&mut self, node: NodeId, v: FlexWrap) {
        if self.node(node).style.flex_wrap == v {
            return;
        }
        self.node_mut(node).style.flex_wrap = v;
        self.mark_dirty(node);
    }

    pub fn set_justify_content(&mut self, node: NodeId, v: Justify) {
        if self.node(node).style.justify_content == v {
            return;
        }
        self.node_mut(node).style.justify_content = v;
        self.mark_dirty(node);
    }

    pub fn set_align_items(&mut self, node: NodeId, v: Align) {
        if self.node(node).style.align_items == v {
            return;
        }
        self.node_mut(node).style.align_items = v;
        self.mark_dirty(node);
    }

    pub fn set_align_self(&mut self, node: NodeId, v: Align) {
        if self.node(node).style.align_self == v {
            return;
        }
        self.node_mut(node).style.align_self = v;
        self.mark_dirty(node);
    }

    pub fn set_align_content(&mut self, node: NodeId, v: Align) {
        if self.node(node).style.align_content == v {
            return;
        }
        self.node_mut(node).style.align_content = v;
        self.mark_dirty(node);
    }

    pub fn set_position_type(&mut self, node: NodeId, v: PositionType) {
        if self.node(node).style.position_type == v {
            return;
        }
        self.node_mut(node).style.position_type = v;
        self.mark_dirty(node);
    }

    pub fn set_display(&mut self, node: NodeId, v: Display) {
        if self.node(node).style.display == v {
            return;
        }
        self.node_mut(node).style.display = v;
        self.mark_dirty(node);
    }

    pub fn set_overflow(&mut self, node: NodeId, v: Overflow) {
        if self.node(node).style.overflow == v {
            return;
        }
        self.node_mut(node).style.overflow = v;
        self.mark_dirty(node);
    }

    pub fn set_flex_grow(&mut self, node: NodeId, v: f32) {
        if self.node(node).style.flex_grow == v {
            return;
        }
        self.node_mut(node).style.flex_grow = v;
        self.mark_dirty(node);
    }

    pub fn set_flex_shrink(&mut self, node: NodeId, v: f32) {
        if self.node(node).style.flex_shrink == v {
            return;
        }
        self.node_mut(node).style.flex_shrink = v;
        self.mark_dirty(node);
    }

    pub fn set_flex_basis(&mut self, node: NodeId, v: Value) {
        if self.node(node).style.flex_basis == v {
            return;
        }
        self.node_mut(node).style.flex_basis = v;
        self.mark_dirty(node);
    }

    pub fn set_flex_basis_percent(&mut self, node: NodeId, pct: f32) {
        self.set_flex_basis(node, Value::Percent(pct));
    }

    pub fn set_flex_basis_auto(&mut self, node: NodeId) {
        self.set_flex_basis(node, Value::Auto);
    }

    pub fn set_aspect_ratio(&mut self, node: NodeId, v: Value) {
        if self.node(node).style.aspect_ratio == v {
            return;
        }
        self.node_mut(node).style.aspect_ratio = v;
        self.mark_dirty(node);
    }
}

macro_rules! dimension_setters {
    ($set:ident, $set_pct:ident, $set_auto:ident, $field:ident) => {
        impl Tree {
            pub fn $set(&mut self, node: NodeId, v: Value) {
                if self.node(node).style.$field == v {
                    return;
                }
                self.node_mut(node).style.$field = v;
                self.mark_dirty(node);
            }

            pub fn $set_pct(&mut self, node: NodeId, pct: f32) {
                self.$set(node, Value::Percent(pct));
            }

            pub fn $set_auto(&mut self, node: NodeId) {
                self.$set(node, Value::Auto);
            }
        }
    };
}

dimension_setters!(set_width, set_width_percent, set_width_auto, width);
dimension_setters!(set_height, set_height_percent, set_height_auto, height);
dimension_setters!(set_min_width, set_min_width_percent, set_min_width_auto, min_width);
dimension_setters!(set_min_height, set_min_height_percent, set_min_height_auto, min_height);
dimension_setters!(set_max_width, set_max_width_percent, set_max_width_auto, max_width);
dimension_setters!(set_max_height, set_max_height_percent, set_max_height_auto, max_height);

macro_rules! edge_setters {
    ($set:ident, $set_auto:ident, $field:ident) => {
        impl Tree {
            pub fn $set(&mut self, node: NodeId, edge: Edge, v: Value) {
                let cur = self.node(node).style.$field.get_raw(edge);
                if cur == v {
                    return;
                }
                self.node_mut(node).style.$field.set(edge, v);
                self.mark_dirty(node);
            }

            pub fn $set_auto(&mut self, node: NodeId, edge: Edge) {
                self.$set(node, edge, Value::Auto);
            }
        }
    };
}

edge_setters!(set_margin, set_margin_auto, margin);
edge_setters!(set_position_edge, set_position_edge_auto, position);

impl Tree {
    pub fn set_padding(&mut self, node: NodeId, edge: Edge, v: Value) {
        let cur = self.node(node).style.padding.get_raw(edge);
        if cur == v {
            return;
        }
        self.node_mut(node).style.padding.set(edge, v);
        self.mark_dirty(node);
    }

    pub fn set_border(&mut self, node: NodeId, edge: Edge, v: Value) {
        let cur = self.node(node).style.border.get_raw(edge);
        if cur == v {
            return;
        }
        self.node_mut(node).style.border.set(edge, v);
        self.mark_dirty(node);
    }

    /// Set the gap for the given gutter (row/column/all), matching
    /// `GUTTER_{ROW,COLUMN,ALL}` in spec.md §6.
    pub fn set_gap(&mut self, node: NodeId, gutter: Gutter, v: Value) {
        let style = &mut self.node_mut(node).style;
        let changed = match gutter {
            Gutter::Row => {
                let changed = style.row_gap != v;
                style.row_gap = v;
                changed
            }
            Gutter::Column => {
                let changed = style.column_gap != v;
                style.column_gap = v;
                changed
            }
            Gutter::All => {
                let changed = style.row_gap != v || style.column_gap != v;
                style.row_gap = v;
                style.column_gap = v;
                changed
            }
        };
        if changed {
            self.mark_dirty(node);
        }
    }
}
