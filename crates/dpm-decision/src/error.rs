use thiserror::Error;

use crate::Branch;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecisionError {
    #[error("no node labelled {0:?} in the tree")]
    UnknownParent(String),

    #[error("{branch} branch of {parent:?} is already occupied")]
    SlotOccupied { parent: String, branch: Branch },

    #[error("label {0:?} is already used in this tree")]
    DuplicateLabel(String),

    #[error("{0:?} is an action and cannot have children")]
    ParentIsAction(String),

    #[error("decision {label:?} has no {branch} branch")]
    MissingBranch { label: String, branch: Branch },

    #[error("parameter {0:?} missing from snapshot")]
    UnknownParameter(String),
}

pub type DecisionResult<T> = Result<T, DecisionError>;
