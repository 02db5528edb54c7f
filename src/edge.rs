//! Edge identifiers and the edge-indexed value array with Yoga's fallback
//! resolution (C1/C6).

use crate::value::Value;

/// Identifies a side of a box, with the logical/axis aliases Yoga exposes
/// alongside the four physical edges.
///
/// Variant order matches spec.md §6's listed ordering so integer fixtures
/// (`EDGE_LEFT = 0`, …) round-trip through `TryFrom<i32>`/`From<Edge>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Edge {
    Left = 0,
    Top = 1,
    Right = 2,
    Bottom = 3,
    Start = 4,
    End = 5,
    Horizontal = 6,
    Vertical = 7,
    All = 8,
}

impl TryFrom<i32> for Edge {
    type Error = ();
    fn try_from(v: i32) -> Result<Self, ()> {
        use Edge::*;
        Ok(match v {
            0 => Left,
            1 => Top,
            2 => Right,
            3 => Bottom,
            4 => Start,
            5 => End,
            6 => Horizontal,
            7 => Vertical,
            8 => All,
            _ => return Err(()),
        })
    }
}

impl From<Edge> for i32 {
    fn from(e: Edge) -> i32 {
        e as i32
    }
}

/// Physical direction, needed to turn `Start`/`End` into `Left`/`Right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Direction {
    Ltr = 0,
    Rtl = 1,
    Inherit = 2,
}

impl Direction {
    pub fn is_rtl(self) -> bool {
        matches!(self, Direction::Rtl)
    }
}

/// Holds up to all nine `Edge` slots for one property (margin, padding,
/// border, or position), with the lookup chain spec.md §3 defines:
/// `physical edge → logical edge under direction → axis → all`, first
/// defined entry wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeValues {
    values: [Value; 9],
}

impl EdgeValues {
    pub fn new() -> Self {
        Self { values: [Value::Undefined; 9] }
    }

    pub fn set(&mut self, edge: Edge, value: Value) {
        self.values[edge as usize] = value;
    }

    pub fn get_raw(&self, edge: Edge) -> Value {
        self.values[edge as usize]
    }

    /// Resolve a concrete physical edge (`Left`/`Top`/`Right`/`Bottom`)
    /// following the fallback chain, under the given direction for
    /// resolving `Start`/`End`.
    pub fn get(&self, physical: PhysicalEdge, direction: Direction) -> Value {
        let is_rtl = direction.is_rtl();
        let (physical_edge, logical_edge, axis_edge) = match physical {
            PhysicalEdge::Left => (
                Edge::Left,
                if is_rtl { Edge::End } else { Edge::Start },
                Edge::Horizontal,
            ),
            PhysicalEdge::Right => (
                Edge::Right,
                if is_rtl { Edge::Start } else { Edge::End },
                Edge::Horizontal,
            ),
            PhysicalEdge::Top => (Edge::Top, Edge::Top, Edge::Vertical),
            PhysicalEdge::Bottom => (Edge::Bottom, Edge::Bottom, Edge::Vertical),
        };

        let direct = self.get_raw(physical_edge);
        if direct.is_defined() {
            return direct;
        }
        // Top/Bottom have no logical alias distinct from the physical edge;
        // only Left/Right consult Start/End.
        if !matches!(physical, PhysicalEdge::Top | PhysicalEdge::Bottom) {
            let logical = self.get_raw(logical_edge);
            if logical.is_defined() {
                return logical;
            }
        }
        let axis = self.get_raw(axis_edge);
        if axis.is_defined() {
            return axis;
        }
        self.get_raw(Edge::All)
    }
}

/// The four concrete sides a box actually has (as opposed to the logical
/// `Start`/`End`/`Horizontal`/`Vertical`/`All` aliases used only for input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalEdge {
    Left,
    Top,
    Right,
    Bottom,
}
