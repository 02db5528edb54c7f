//! Per-node style attributes (C2) and the small flex-alignment enums.
//!
//! `Style` itself is plain data; the dirtying setters the spec calls for
//! live on `Tree` (`tree.rs`), since marking a node dirty requires walking
//! up to its owner — information `Style` alone doesn't have.

use crate::edge::EdgeValues;
use crate::value::Value;

macro_rules! yoga_enum {
    ($name:ident { $($variant:ident = $val:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(i32)]
        pub enum $name {
            $($variant = $val),+
        }

        impl TryFrom<i32> for $name {
            type Error = ();
            fn try_from(v: i32) -> Result<Self, ()> {
                $(if v == $val { return Ok($name::$variant); })+
                Err(())
            }
        }

        impl From<$name> for i32 {
            fn from(v: $name) -> i32 { v as i32 }
        }
    };
}

yoga_enum!(FlexDirection {
    Row = 0,
    RowReverse = 1,
    Column = 2,
    ColumnReverse = 3,
});

impl FlexDirection {
    pub fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    pub fn is_reverse(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }
}

yoga_enum!(FlexWrap {
    NoWrap = 0,
    Wrap = 1,
    WrapReverse = 2,
});

yoga_enum!(Justify {
    FlexStart = 0,
    Center = 1,
    FlexEnd = 2,
    SpaceBetween = 3,
    SpaceAround = 4,
    SpaceEvenly = 5,
});

yoga_enum!(Align {
    Auto = 0,
    FlexStart = 1,
    Center = 2,
    FlexEnd = 3,
    Stretch = 4,
    Baseline = 5,
    SpaceBetween = 6,
    SpaceAround = 7,
});

yoga_enum!(PositionType {
    Static = 0,
    Relative = 1,
    Absolute = 2,
});

yoga_enum!(Display {
    Flex = 0,
    None = 1,
});

yoga_enum!(Overflow {
    Visible = 0,
    Hidden = 1,
    Scroll = 2,
});

yoga_enum!(Gutter {
    Row = 0,
    Column = 1,
    All = 2,
});

/// Per-node flex style. Defaults follow the Yoga reference values named in
/// `DESIGN.md` (notably `flex_shrink: 1.0`, matching both the CSS flexbox
/// default and the teacher's explicit choice in `FlexNode::new`).
#[derive(Debug, Clone)]
pub struct Style {
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: Justify,
    pub align_items: Align,
    pub align_self: Align,
    pub align_content: Align,
    pub position_type: PositionType,
    pub display: Display,
    pub overflow: Overflow,

    pub flex_grow: f32,
    pub flex_shrink: f32,
    pub flex_basis: Value,

    pub width: Value,
    pub height: Value,
    pub min_width: Value,
    pub min_height: Value,
    pub max_width: Value,
    pub max_height: Value,

    pub margin: EdgeValues,
    pub padding: EdgeValues,
    pub border: EdgeValues,
    pub position: EdgeValues,

    pub row_gap: Value,
    pub column_gap: Value,

    pub aspect_ratio: Value,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            flex_direction: FlexDirection::Column,
            flex_wrap: FlexWrap::NoWrap,
            justify_content: Justify::FlexStart,
            align_items: Align::Stretch,
            align_self: Align::Auto,
            align_content: Align::Stretch,
            position_type: PositionType::Relative,
            display: Display::Flex,
            overflow: Overflow::Visible,

            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: Value::Auto,

            width: Value::Auto,
            height: Value::Auto,
            min_width: Value::Undefined,
            min_height: Value::Undefined,
            max_width: Value::Undefined,
            max_height: Value::Undefined,

            margin: EdgeValues::new(),
            padding: EdgeValues::new(),
            border: EdgeValues::new(),
            position: EdgeValues::new(),

            row_gap: Value::Undefined,
            column_gap: Value::Undefined,

            aspect_ratio: Value::Undefined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_yoga_reference() {
        let s = Style::default();
        assert_eq!(s.flex_direction, FlexDirection::Column);
        assert_eq!(s.flex_shrink, 1.0);
        assert_eq!(s.flex_grow, 0.0);
        assert_eq!(s.width, Value::Auto);
        assert_eq!(s.align_self, Align::Auto);
    }

    #[test]
    fn enum_int_round_trips() {
        for v in 0..4 {
            let d = FlexDirection::try_from(v).unwrap();
            assert_eq!(i32::from(d), v);
        }
        for v in 0..8 {
            let a = Align::try_from(v).unwrap();
            assert_eq!(i32::from(a), v);
        }
    }
}
