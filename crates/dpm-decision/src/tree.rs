//! Arena-backed binary decision tree.

use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::{DecisionError, DecisionResult, ParameterSnapshot};

/// Which child slot of a decision a node hangs from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Branch {
    True,
    False,
}

impl From<bool> for Branch {
    #[inline]
    fn from(b: bool) -> Self {
        if b { Branch::True } else { Branch::False }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Branch::True => "true",
            Branch::False => "false",
        })
    }
}

/// A node handed to [`DecisionTree::new`] or [`DecisionTree::insert`].
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode<A> {
    /// Tests `parameter` and follows the matching branch.
    Decision { label: String, parameter: String },
    /// Terminal; evaluation returns `action`.
    Action { label: String, action: A },
}

impl<A> TreeNode<A> {
    pub fn decision(label: impl Into<String>, parameter: impl Into<String>) -> Self {
        TreeNode::Decision { label: label.into(), parameter: parameter.into() }
    }

    pub fn action(label: impl Into<String>, action: A) -> Self {
        TreeNode::Action { label: label.into(), action }
    }

    pub fn label(&self) -> &str {
        match self {
            TreeNode::Decision { label, .. } | TreeNode::Action { label, .. } => label,
        }
    }
}

/// Stored form: decisions carry arena indices of their children.
enum Slot<A> {
    Decision {
        label:     String,
        parameter: String,
        on_true:   Option<usize>,
        on_false:  Option<usize>,
    },
    Action {
        label:  String,
        action: A,
    },
}

impl<A> Slot<A> {
    fn label(&self) -> &str {
        match self {
            Slot::Decision { label, .. } | Slot::Action { label, .. } => label,
        }
    }
}

impl<A> From<TreeNode<A>> for Slot<A> {
    fn from(node: TreeNode<A>) -> Self {
        match node {
            TreeNode::Decision { label, parameter } => {
                Slot::Decision { label, parameter, on_true: None, on_false: None }
            }
            TreeNode::Action { label, action } => Slot::Action { label, action },
        }
    }
}

const ROOT: usize = 0;

/// A binary tree of boolean tests whose leaves are actions of type `A`.
///
/// The tree is grown top-down: every inserted node is attached to an
/// existing decision, so the structure is always finite and acyclic and
/// every node is reachable from the root.  Call [`validate`](Self::validate)
/// once construction is done to confirm every decision has both children.
///
/// # Example
///
/// ```
/// use dpm_decision::{Branch, DecisionTree, ParameterSnapshot, TreeNode};
///
/// let mut tree = DecisionTree::new(TreeNode::decision("root", "hungry"));
/// tree.insert(TreeNode::action("eat", "go_to_fridge"), "root", Branch::True).unwrap();
/// tree.insert(TreeNode::action("rest", "go_to_couch"), "root", Branch::False).unwrap();
/// tree.validate().unwrap();
///
/// let snapshot = ParameterSnapshot::new().with("hungry", true);
/// assert_eq!(*tree.evaluate(&snapshot).unwrap(), "go_to_fridge");
/// ```
pub struct DecisionTree<A> {
    slots:  Vec<Slot<A>>,
    labels: FxHashSet<String>,
}

impl<A> DecisionTree<A> {
    /// Create a tree consisting of `root` alone.
    pub fn new(root: TreeNode<A>) -> Self {
        let mut labels = FxHashSet::default();
        labels.insert(root.label().to_owned());
        Self { slots: vec![root.into()], labels }
    }

    /// Attach `node` under the decision labelled `parent` on `branch`.
    ///
    /// The parent is located by depth-first search from the root.
    pub fn insert(&mut self, node: TreeNode<A>, parent: &str, branch: Branch) -> DecisionResult<()> {
        let parent_ix = self
            .find(parent)
            .ok_or_else(|| DecisionError::UnknownParent(parent.to_owned()))?;

        let child_ix = self.slots.len();
        let slot = match &mut self.slots[parent_ix] {
            Slot::Action { .. } => return Err(DecisionError::ParentIsAction(parent.to_owned())),
            Slot::Decision { on_true, on_false, .. } => match branch {
                Branch::True => on_true,
                Branch::False => on_false,
            },
        };
        if slot.is_some() {
            return Err(DecisionError::SlotOccupied { parent: parent.to_owned(), branch });
        }
        if self.labels.contains(node.label()) {
            return Err(DecisionError::DuplicateLabel(node.label().to_owned()));
        }
        *slot = Some(child_ix);
        self.labels.insert(node.label().to_owned());
        self.slots.push(node.into());
        Ok(())
    }

    /// Follow the snapshot's answers from the root down to an action.
    pub fn evaluate(&self, snapshot: &ParameterSnapshot) -> DecisionResult<&A> {
        let mut cur = ROOT;
        loop {
            match &self.slots[cur] {
                Slot::Action { action, label } => {
                    trace!(label = label.as_str(), "decision tree reached action");
                    return Ok(action);
                }
                Slot::Decision { label, parameter, on_true, on_false } => {
                    let value = snapshot
                        .get(parameter)
                        .ok_or_else(|| DecisionError::UnknownParameter(parameter.clone()))?;
                    let next = if value { *on_true } else { *on_false };
                    cur = next.ok_or_else(|| DecisionError::MissingBranch {
                        label:  label.clone(),
                        branch: value.into(),
                    })?;
                }
            }
        }
    }

    /// Check that every decision has both children.
    pub fn validate(&self) -> DecisionResult<()> {
        for slot in &self.slots {
            if let Slot::Decision { label, on_true, on_false, .. } = slot {
                for (child, branch) in [(on_true, Branch::True), (on_false, Branch::False)] {
                    if child.is_none() {
                        return Err(DecisionError::MissingBranch { label: label.clone(), branch });
                    }
                }
            }
        }
        Ok(())
    }

    /// Every action payload, in insertion order.
    pub fn actions(&self) -> impl Iterator<Item = &A> + '_ {
        self.slots.iter().filter_map(|s| match s {
            Slot::Action { action, .. } => Some(action),
            Slot::Decision { .. } => None,
        })
    }

    /// Names of all parameters tested anywhere in the tree.
    pub fn parameters(&self) -> BTreeSet<&str> {
        self.slots
            .iter()
            .filter_map(|s| match s {
                Slot::Decision { parameter, .. } => Some(parameter.as_str()),
                Slot::Action { .. } => None,
            })
            .collect()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Total node count (decisions and actions).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of nodes on the longest root-to-leaf chain.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(ROOT, 1usize)];
        while let Some((ix, d)) = stack.pop() {
            deepest = deepest.max(d);
            if let Slot::Decision { on_true, on_false, .. } = &self.slots[ix] {
                stack.extend(on_true.iter().chain(on_false.iter()).map(|&c| (c, d + 1)));
            }
        }
        deepest
    }

    /// Depth-first search from the root, true branch before false.
    fn find(&self, label: &str) -> Option<usize> {
        let mut stack = vec![ROOT];
        while let Some(ix) = stack.pop() {
            let slot = &self.slots[ix];
            if slot.label() == label {
                return Some(ix);
            }
            if let Slot::Decision { on_true, on_false, .. } = slot {
                stack.extend(on_false.iter().chain(on_true.iter()).copied());
            }
        }
        None
    }
}
