//! Step tables: the immutable, ordered configuration of one flow.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use super::{StepDescriptor, StepId};
use crate::error::{Result, WizardError};

/// A declared loop-back edge.
///
/// When the step `from` is completed with step data whose `condition` signal
/// is set, the flow continues at `to` instead of `from + 1`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BranchEdge {
    pub from: StepId,
    pub to: StepId,
    pub condition: String,
}

impl BranchEdge {
    pub fn new(from: StepId, to: StepId, condition: impl Into<String>) -> Self {
        Self {
            from,
            to,
            condition: condition.into(),
        }
    }
}

/// Ordered, validated list of step descriptors plus branch wiring.
///
/// Tables are built once through [`StepTableBuilder`], which guarantees a
/// non-empty table with consecutive ids and well-formed branch edges.
pub struct StepTable<R> {
    name: String,
    steps: Vec<StepDescriptor<R>>,
    branches: Vec<BranchEdge>,
}

impl<R> StepTable<R> {
    /// Start building a table with the given name.
    pub fn builder(name: impl Into<String>) -> StepTableBuilder<R> {
        StepTableBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[StepDescriptor<R>] {
        &self.steps
    }

    pub fn branches(&self) -> &[BranchEdge] {
        &self.branches
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Id of the step every session starts on.
    pub fn first_id(&self) -> StepId {
        self.steps[0].id
    }

    /// Id of the step whose completion ends the flow.
    pub fn terminal_id(&self) -> StepId {
        self.steps[self.steps.len() - 1].id
    }

    pub fn is_terminal(&self, id: StepId) -> bool {
        id == self.terminal_id()
    }

    pub fn contains(&self, id: StepId) -> bool {
        (self.first_id()..=self.terminal_id()).contains(&id)
    }

    pub fn get(&self, id: StepId) -> Option<&StepDescriptor<R>> {
        if !self.contains(id) {
            return None;
        }
        self.steps.get((id - self.first_id()) as usize)
    }

    /// Look up a step, failing with [`WizardError::StepNotFound`].
    pub fn step(&self, id: StepId) -> Result<&StepDescriptor<R>> {
        self.get(id).ok_or(WizardError::StepNotFound { id })
    }

    /// The loop-back edge leaving `id`, if one is declared.
    pub fn branch_from(&self, id: StepId) -> Option<&BranchEdge> {
        self.branches.iter().find(|edge| edge.from == id)
    }

    /// Required steps that are neither completed nor satisfied by their
    /// done-predicate.
    ///
    /// A step with a done-predicate is judged by the predicate alone; a step
    /// without one is judged by membership in `completed`. The presented
    /// step is not exempt: a required step without a predicate stays listed
    /// until it is completed, including the terminal step.
    pub fn missing_required(&self, completed: &BTreeSet<StepId>, record: &R) -> Vec<StepId> {
        self.steps
            .iter()
            .filter(|step| step.required)
            .filter(|step| match step.is_satisfied_by(record) {
                Some(satisfied) => !satisfied,
                None => !completed.contains(&step.id),
            })
            .map(|step| step.id)
            .collect()
    }
}

impl<R> Clone for StepTable<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            steps: self.steps.clone(),
            branches: self.branches.clone(),
        }
    }
}

impl<R> fmt::Debug for StepTable<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepTable")
            .field("name", &self.name)
            .field("steps", &self.steps)
            .field("branches", &self.branches)
            .finish()
    }
}

/// Builder for [`StepTable`].
pub struct StepTableBuilder<R> {
    name: String,
    steps: Vec<StepDescriptor<R>>,
    branches: Vec<BranchEdge>,
}

impl<R> StepTableBuilder<R> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            branches: Vec::new(),
        }
    }

    /// Append a step. Steps must be added in id order.
    pub fn step(mut self, step: StepDescriptor<R>) -> Self {
        self.steps.push(step);
        self
    }

    /// Declare a loop-back edge from `from` to the earlier step `to`.
    pub fn branch(mut self, from: StepId, to: StepId, condition: impl Into<String>) -> Self {
        self.branches.push(BranchEdge::new(from, to, condition));
        self
    }

    /// Validate and build the table.
    ///
    /// # Errors
    ///
    /// Returns [`WizardError::InvalidStepTable`] when the table is empty,
    /// ids are not consecutive, or a branch edge is malformed.
    pub fn build(self) -> Result<StepTable<R>> {
        let invalid = |reason: String| WizardError::invalid_table(self.name.as_str()).with_reason(reason);

        let Some(first) = self.steps.first() else {
            return Err(invalid("table has no steps".to_string()));
        };

        for pair in self.steps.windows(2) {
            let (prev, next) = (pair[0].id, pair[1].id);
            if prev.checked_add(1) != Some(next) {
                return Err(invalid(format!(
                    "step ids must be consecutive: step {next} follows step {prev}"
                )));
            }
        }

        let first_id = first.id;
        let terminal_id = self.steps.last().map_or(first_id, |step| step.id);
        let known = |id: StepId| (first_id..=terminal_id).contains(&id);

        let mut sources = BTreeSet::new();
        for edge in &self.branches {
            if !known(edge.from) || !known(edge.to) {
                return Err(invalid(format!(
                    "branch {} -> {} references an unknown step",
                    edge.from, edge.to
                )));
            }
            if edge.to >= edge.from {
                return Err(invalid(format!(
                    "branch {} -> {} must point to an earlier step",
                    edge.from, edge.to
                )));
            }
            if edge.condition.is_empty() {
                return Err(invalid(format!(
                    "branch {} -> {} has no condition",
                    edge.from, edge.to
                )));
            }
            if !sources.insert(edge.from) {
                return Err(invalid(format!(
                    "step {} declares more than one branch",
                    edge.from
                )));
            }
        }

        Ok(StepTable {
            name: self.name,
            steps: self.steps,
            branches: self.branches,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(ids: &[StepId]) -> StepTableBuilder<()> {
        ids.iter().fold(StepTable::builder("test"), |builder, id| {
            builder.step(StepDescriptor::new(*id, format!("Step {id}")))
        })
    }

    #[test]
    fn test_build_linear_table() {
        let table = linear(&[1, 2, 3]).build().unwrap();
        assert_eq!(table.first_id(), 1);
        assert_eq!(table.terminal_id(), 3);
        assert!(table.contains(2));
        assert!(!table.contains(0));
        assert!(!table.contains(4));
        assert_eq!(table.get(2).map(|s| s.id), Some(2));
        assert!(table.get(9).is_none());
    }

    #[test]
    fn test_zero_based_ids_allowed() {
        let table = linear(&[0, 1, 2]).build().unwrap();
        assert_eq!(table.first_id(), 0);
        assert_eq!(table.get(0).map(|s| s.id), Some(0));
    }

    #[test]
    fn test_rejects_empty_table() {
        let err = StepTable::<()>::builder("empty").build().unwrap_err();
        assert!(matches!(err, WizardError::InvalidStepTable { .. }));
    }

    #[test]
    fn test_rejects_gaps_and_disorder() {
        assert!(linear(&[1, 3]).build().is_err());
        assert!(linear(&[2, 1]).build().is_err());
        assert!(linear(&[1, 1]).build().is_err());
    }

    #[test]
    fn test_ids_up_to_max() {
        let table = linear(&[StepId::MAX - 1, StepId::MAX]).build().unwrap();
        assert_eq!(table.terminal_id(), StepId::MAX);
        assert!(linear(&[StepId::MAX, 0]).build().is_err());
    }

    #[test]
    fn test_rejects_bad_branches() {
        assert!(linear(&[1, 2, 3]).branch(3, 5, "again").build().is_err());
        assert!(linear(&[1, 2, 3]).branch(2, 3, "again").build().is_err());
        assert!(linear(&[1, 2, 3]).branch(2, 2, "again").build().is_err());
        assert!(linear(&[1, 2, 3]).branch(3, 1, "").build().is_err());
        assert!(linear(&[1, 2, 3])
            .branch(3, 1, "again")
            .branch(3, 2, "other")
            .build()
            .is_err());
    }

    #[test]
    fn test_branch_lookup() {
        let table = linear(&[1, 2, 3]).branch(3, 1, "again").build().unwrap();
        let edge = table.branch_from(3).unwrap();
        assert_eq!(edge.to, 1);
        assert_eq!(edge.condition, "again");
        assert!(table.branch_from(2).is_none());
    }

    #[test]
    fn test_missing_required() {
        let table: StepTable<u32> = StepTable::builder("req")
            .step(StepDescriptor::new(1, "One"))
            .step(StepDescriptor::new(2, "Two").optional())
            .step(StepDescriptor::new(3, "Three").done_when(|count: &u32| *count > 2))
            .build()
            .unwrap();

        let completed = BTreeSet::new();
        assert_eq!(table.missing_required(&completed, &0), vec![1, 3]);

        let completed: BTreeSet<StepId> = [1, 3].into_iter().collect();
        assert_eq!(table.missing_required(&completed, &0), vec![3]);
        assert!(table.missing_required(&completed, &5).is_empty());
    }
}
