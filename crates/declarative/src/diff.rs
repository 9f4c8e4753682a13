//! Delta computation between observed and target state

use crate::schema::Schema;
use crate::types::{ApplyResult, AttributeSet, ENSURE, Ensure, Value};
use serde::{Deserialize, Serialize};

/// A single attribute that differs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub attribute: String,
    /// Value reported by the target, `None` if it had none
    pub old: Option<Value>,
    pub new: Value,
}

impl Change {
    pub fn new(attribute: impl Into<String>, old: Option<Value>, new: Value) -> Self {
        Self {
            attribute: attribute.into(),
            old,
            new,
        }
    }

    /// True when the attribute is being set for the first time
    pub fn is_definition(&self) -> bool {
        matches!(self.old, None | Some(Value::Ensure(Ensure::Absent)))
    }
}

/// Ordered list of changes for one resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    pub changes: Vec<Change>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }

    pub fn change_for(&self, attribute: &str) -> Option<&Change> {
        self.changes.iter().find(|c| c.attribute == attribute)
    }

    /// Classify what applying this delta does to the resource
    pub fn apply_result(&self) -> ApplyResult {
        if self.is_empty() {
            return ApplyResult::NoChange;
        }
        match self.change_for(ENSURE).map(|c| &c.new) {
            Some(Value::Ensure(Ensure::Present)) => ApplyResult::Created,
            Some(Value::Ensure(Ensure::Absent)) => ApplyResult::Removed,
            _ => ApplyResult::Modified,
        }
    }
}

/// Compute the changes needed to move `observed` to `target`.
///
/// The namevar never changes. A target with `ensure => absent` only ever
/// produces the `ensure` change. Attributes the target does not mention are
/// left alone.
pub fn compute_delta(schema: &Schema, observed: &AttributeSet, target: &AttributeSet) -> Delta {
    let observed_ensure = observed.get(ENSURE);

    if target.ensure() == Some(Ensure::Absent) {
        let changes = match observed.ensure() {
            Some(Ensure::Absent) => Vec::new(),
            _ => vec![Change::new(
                ENSURE,
                observed_ensure.cloned(),
                Value::Ensure(Ensure::Absent),
            )],
        };
        return Delta { changes };
    }

    let mut changes = Vec::new();
    if let Some(new) = target.get(ENSURE)
        && observed_ensure != Some(new)
    {
        changes.push(Change::new(ENSURE, observed_ensure.cloned(), new.clone()));
    }

    for (name, new) in schema.ordered(target) {
        if name == schema.namevar() || name == ENSURE {
            continue;
        }
        let old = observed.get(name);
        if old != Some(new) {
            changes.push(Change::new(name, old.cloned(), new.clone()));
        }
    }

    Delta { changes }
}

/// Diff summary statistics
#[derive(Debug, Clone, Default)]
pub struct DiffSummary {
    /// Number of resources to create
    pub additions: usize,
    /// Number of resources to remove
    pub removals: usize,
    /// Number of resources to modify
    pub modifications: usize,
}

impl DiffSummary {
    /// Create a summary from a list of deltas
    pub fn from_deltas<'a>(deltas: impl IntoIterator<Item = &'a Delta>) -> Self {
        let mut summary = Self::default();
        for delta in deltas {
            match delta.apply_result() {
                ApplyResult::Created => summary.additions += 1,
                ApplyResult::Removed => summary.removals += 1,
                ApplyResult::Modified => summary.modifications += 1,
                _ => {}
            }
        }
        summary
    }

    /// Total number of changes
    pub fn total(&self) -> usize {
        self.additions + self.removals + self.modifications
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.total() > 0
    }
}
