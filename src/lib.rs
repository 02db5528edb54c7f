//! # titan-flex
//!
//! A standalone flexbox layout engine, Yoga-compatible in its constants and
//! observable semantics, with no renderer or terminal dependency of its own
//! — host applications own the tree's content (text measurement, rendered
//! output) and only hand `titan-flex` a measure callback where needed.
//!
//! ## Architecture
//!
//! Every node lives in a `Tree`: a generation-tagged slab arena, so a
//! process can hold many independent trees and `NodeId`s never alias a
//! freed-and-reused slot silently. Style mutation through `Tree`'s setters
//! marks the owning chain dirty; `Tree::calculate_layout` is the only entry
//! point that actually runs the algorithm, and skips doing so entirely when
//! nothing relevant has changed since the last call on that subtree.
//!
//! ## Modules
//!
//! - [`value`] — length values (`Point`/`Percent`/`Auto`/`Undefined`) and NaN-safe equality
//! - [`edge`] — edge identifiers and the edge-indexed fallback-resolution array
//! - [`style`] — per-node style attributes and the flex alignment enums
//! - [`layout_result`] — the computed `Layout` a node carries after a layout pass
//! - [`cache`] — the measurement/layout memoization and whole-subtree fingerprint
//! - [`resolve`] — percentage resolution, axis selection, min/max clamping
//! - [`measure`] — intrinsic sizing (cache-aware; never touches `Layout`)
//! - [`layout_algo`] — the authoritative flex algorithm
//! - [`tree`] — the node arena, tree mutation, style setters, `calculate_layout`
//! - [`error`] — contract-violation errors from tree mutation

pub mod cache;
pub mod edge;
pub mod error;
pub mod layout_algo;
pub mod layout_result;
pub mod measure;
pub mod resolve;
pub mod style;
pub mod tree;
pub mod value;

pub use cache::MeasureMode;
pub use edge::{Direction, Edge, PhysicalEdge};
pub use error::{Result, TitanFlexError};
pub use layout_result::Layout;
pub use style::{Align, Display, FlexDirection, FlexWrap, Gutter, Justify, Overflow, PositionType};
pub use tree::{MeasureFunc, NodeId, Tree};
pub use value::Value;
