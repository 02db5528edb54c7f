//! Contract-violation errors.
//!
//! Ordinary layout calls never fail — every well-formed tree produces a
//! layout (spec: "the engine does not produce recoverable errors through
//! ordinary layout calls"). These errors are only returned by the tree
//! mutation calls that would otherwise let a programmer build an invalid
//! tree (double ownership, cycles, operating on a freed node).

use crate::tree::NodeId;

/// A programming error detected while mutating the tree.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TitanFlexError {
    /// Attempted to insert a node that already has a different owner.
    #[error("node {0:?} already has an owner; remove it before reinserting")]
    AlreadyOwned(NodeId),

    /// Attempted to insert an ancestor as one of its own descendants.
    #[error("node {0:?} is an ancestor of {1:?}; cannot insert as a descendant")]
    WouldCreateCycle(NodeId, NodeId),

    /// Referenced a `NodeId` that has been freed or belongs to another tree.
    #[error("node {0:?} is not present in this tree (freed or foreign)")]
    InvalidNode(NodeId),
}

pub type Result<T> = std::result::Result<T, TitanFlexError>;
