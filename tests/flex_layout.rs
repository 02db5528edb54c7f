//! Integration tests exercising the public `Tree` API end to end, mirroring
//! representative layout scenarios: simple row distribution, nested
//! flex-grow columns, wrapping, absolute positioning, cache correctness
//! under mutation, and rounding stability.

use titan_flex::{Direction, Edge, FlexDirection, FlexWrap, Gutter, PositionType, Tree, Value};

fn rect(tree: &Tree, node: titan_flex::NodeId) -> (f32, f32, f32, f32) {
    let l = tree.layout(node);
    (l.left, l.top, l.width, l.height)
}

#[test]
fn simple_row_splits_evenly_between_two_grow_children() {
    let mut t = Tree::new();
    let root = t.create_node();
    t.set_flex_direction(root, FlexDirection::Row);
    t.set_width(root, Value::Point(100.0));
    t.set_height(root, Value::Point(100.0));

    let child0 = t.create_node();
    let child1 = t.create_node();
    t.set_flex_grow(child0, 1.0);
    t.set_flex_grow(child1, 1.0);
    t.insert_child(root, child0, 0).unwrap();
    t.insert_child(root, child1, 1).unwrap();

    t.calculate_layout(root, 100.0, 100.0, Direction::Ltr);

    assert_eq!(rect(&t, child0), (0.0, 0.0, 50.0, 100.0));
    assert_eq!(rect(&t, child1), (50.0, 0.0, 50.0, 100.0));
}

#[test]
fn kanban_columns_distribute_evenly_and_stack_children_with_gap() {
    let mut t = Tree::new();
    let root = t.create_node();
    t.set_flex_direction(root, FlexDirection::Row);
    t.set_gap(root, Gutter::All, Value::Point(1.0));
    t.set_width(root, Value::Point(120.0));
    t.set_height(root, Value::Point(40.0));

    let mut columns = Vec::new();
    for _ in 0..3 {
        let col = t.create_node();
        t.set_flex_direction(col, FlexDirection::Column);
        t.set_flex_grow(col, 1.0);
        t.set_gap(col, Gutter::All, Value::Point(1.0));
        t.insert_child(root, col, columns.len()).unwrap();
        for _ in 0..3 {
            let card = t.create_node();
            t.set_height(card, Value::Point(3.0));
            t.insert_child(col, card, t.child_count(col)).unwrap();
        }
        columns.push(col);
    }

    t.calculate_layout(root, 120.0, 40.0, Direction::Ltr);

    // Columns tile the content box exactly: adjacent rounded edges touch,
    // and total width (columns + 2 gaps) accounts for the full 120.
    let mut total = 0.0;
    for (i, &col) in columns.iter().enumerate() {
        let (left, _, width, _) = rect(&t, col);
        assert_eq!(left, total, "column {i} should start where the previous one (plus gap) ended");
        total += width + 1.0;
    }
    assert_eq!(total - 1.0, 120.0);

    // Inside each column, three height-3 cards stack with a 1px gap: y = 0, 4, 8.
    for &col in &columns {
        for row in 0..3 {
            let card = t.child(col, row).unwrap();
            let (_, top, _, height) = rect(&t, card);
            assert_eq!(top, (row * 4) as f32);
            assert_eq!(height, 3.0);
        }
    }
}

#[test]
fn wrap_breaks_onto_a_second_line_when_the_main_axis_overflows() {
    let mut t = Tree::new();
    let root = t.create_node();
    t.set_flex_direction(root, FlexDirection::Row);
    t.set_flex_wrap(root, FlexWrap::Wrap);
    t.set_width(root, Value::Point(100.0));
    t.set_height(root, Value::Point(100.0));

    let mut children = Vec::new();
    for _ in 0..4 {
        let c = t.create_node();
        t.set_width(c, Value::Point(40.0));
        t.set_height(c, Value::Point(20.0));
        t.insert_child(root, c, children.len()).unwrap();
        children.push(c);
    }

    t.calculate_layout(root, 100.0, 100.0, Direction::Ltr);

    assert_eq!(rect(&t, children[0]).1, 0.0);
    assert_eq!(rect(&t, children[1]).1, 0.0);
    assert_eq!(rect(&t, children[2]).1, 20.0);
    assert_eq!(rect(&t, children[3]).1, 20.0);
}

#[test]
fn absolute_child_ignores_in_flow_siblings() {
    let mut t = Tree::new();
    let root = t.create_node();
    t.set_width(root, Value::Point(100.0));
    t.set_height(root, Value::Point(100.0));

    let sibling = t.create_node();
    t.set_width(sibling, Value::Point(60.0));
    t.set_height(sibling, Value::Point(60.0));
    t.insert_child(root, sibling, 0).unwrap();

    let absolute = t.create_node();
    t.set_position_type(absolute, PositionType::Absolute);
    t.set_position_edge(absolute, Edge::Top, Value::Point(10.0));
    t.set_position_edge(absolute, Edge::Left, Value::Point(20.0));
    t.set_width(absolute, Value::Point(30.0));
    t.set_height(absolute, Value::Point(40.0));
    t.insert_child(root, absolute, 1).unwrap();

    t.calculate_layout(root, 100.0, 100.0, Direction::Ltr);

    assert_eq!(rect(&t, absolute), (20.0, 10.0, 30.0, 40.0));
}

#[test]
fn mutating_one_cards_height_leaves_its_siblings_positions_unchanged() {
    let mut t = Tree::new();
    let root = t.create_node();
    t.set_flex_direction(root, FlexDirection::Column);
    t.set_gap(root, Gutter::All, Value::Point(1.0));
    t.set_width(root, Value::Point(50.0));
    t.set_height(root, Value::Point(50.0));

    let mut cards = Vec::new();
    for _ in 0..3 {
        let card = t.create_node();
        t.set_height(card, Value::Point(3.0));
        t.insert_child(root, card, cards.len()).unwrap();
        cards.push(card);
    }

    t.calculate_layout(root, 50.0, 50.0, Direction::Ltr);
    let before_first_top = rect(&t, cards[0]).1;

    t.set_height(cards[1], Value::Point(5.0));
    t.calculate_layout(root, 50.0, 50.0, Direction::Ltr);

    assert_eq!(rect(&t, cards[0]).1, before_first_top, "untouched card keeps its position");
    assert_eq!(rect(&t, cards[1]).3, 5.0, "mutated card reflects its new height");
    assert_eq!(rect(&t, cards[2]).1, before_first_top + 3.0 + 1.0 + 5.0 + 1.0, "later card shifts down by the size delta");
}

#[test]
fn three_equal_grow_children_sum_to_the_full_width_with_touching_edges() {
    let mut t = Tree::new();
    let root = t.create_node();
    t.set_flex_direction(root, FlexDirection::Row);
    t.set_width(root, Value::Point(100.0));
    t.set_height(root, Value::Point(20.0));

    let mut children = Vec::new();
    for _ in 0..3 {
        let c = t.create_node();
        t.set_flex_grow(c, 1.0);
        t.insert_child(root, c, children.len()).unwrap();
        children.push(c);
    }

    t.calculate_layout(root, 100.0, 20.0, Direction::Ltr);

    let total: f32 = children.iter().map(|&c| rect(&t, c).2).sum();
    assert_eq!(total, 100.0);

    // Each child's rounded right edge equals the next child's rounded left
    // edge — the rounding law, not an incidental property of this input.
    for w in 0..2 {
        let (left_a, _, width_a, _) = rect(&t, children[w]);
        let (left_b, _, _, _) = rect(&t, children[w + 1]);
        assert_eq!(left_a + width_a, left_b);
    }
}

#[test]
fn repeated_calculate_layout_with_unchanged_input_is_idempotent() {
    let mut t = Tree::new();
    let root = t.create_node();
    t.set_width(root, Value::Point(80.0));
    t.set_height(root, Value::Point(40.0));
    let child = t.create_node();
    t.set_flex_grow(child, 1.0);
    t.insert_child(root, child, 0).unwrap();

    t.calculate_layout(root, 80.0, 40.0, Direction::Ltr);
    let first = *t.layout(child);
    t.calculate_layout(root, 80.0, 40.0, Direction::Ltr);
    let second = *t.layout(child);

    assert_eq!(first, second);
}

#[test]
fn freeing_a_node_detaches_it_from_its_parent() {
    let mut t = Tree::new();
    let root = t.create_node();
    let child = t.create_node();
    t.insert_child(root, child, 0).unwrap();
    assert_eq!(t.child_count(root), 1);

    t.free(child).unwrap();
    assert_eq!(t.child_count(root), 0);
}

#[test]
fn aspect_ratio_fills_in_the_undefined_dimension() {
    let mut t = Tree::new();
    let root = t.create_node();
    t.set_aspect_ratio(root, Value::Point(2.0));
    t.calculate_layout(root, 100.0, f32::NAN, Direction::Ltr);

    assert_eq!(rect(&t, root), (0.0, 0.0, 100.0, 50.0));
}

#[test]
fn reparent_moves_a_node_between_owners_in_one_call() {
    let mut t = Tree::new();
    let a = t.create_node();
    let b = t.create_node();
    let child = t.create_node();
    t.insert_child(a, child, 0).unwrap();

    t.reparent(child, b, 0).unwrap();

    assert_eq!(t.child_count(a), 0);
    assert_eq!(t.child_count(b), 1);
    assert_eq!(t.owner(child), Some(b));
}
