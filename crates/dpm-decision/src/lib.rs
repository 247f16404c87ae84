//! `dpm-decision` — decision trees and parameter snapshots.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`tree`]      | `DecisionTree<A>`, `TreeNode<A>`, `Branch`                    |
//! | [`parameter`] | `ParameterSnapshot`, `Parameters<E>` (named predicates)       |
//! | [`error`]     | `DecisionError`, `DecisionResult<T>`                          |
//!
//! # Design notes
//!
//! Trees are generic over the action payload `A`; the simulation uses the
//! *name* of a steering behavior so the tree stays free of borrows into the
//! behavior table.  Nodes are addressed during construction by explicit,
//! caller-chosen labels that are validated unique on insertion.
//!
//! Evaluation is a pure read of an immutable [`ParameterSnapshot`]; the
//! predicates that produce the snapshot live with the caller in
//! [`Parameters<E>`] and are never invoked by the tree itself.

pub mod error;
pub mod parameter;
pub mod tree;


pub use error::{DecisionError, DecisionResult};
pub use parameter::{ParameterSnapshot, Parameters};
pub use tree::{Branch, DecisionTree, TreeNode};
