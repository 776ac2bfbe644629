use std::time::{Duration, Instant};

/// Outcome of one step in a saga run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StepStatus {
    /// Started but not finished yet.
    Running,
    /// Executed successfully and still in effect.
    Executed,
    /// Execution failed; this step triggered the rollback.
    Failed,
    /// Executed, then undone during rollback.
    Compensated,
    /// Executed, and undoing it failed.
    CompensationFailed,
}

impl StepStatus {
    /// Whether the step's `execute` returned successfully at some point.
    #[must_use]
    pub fn was_executed(self) -> bool {
        matches!(
            self,
            Self::Executed | Self::Compensated | Self::CompensationFailed
        )
    }
}

#[derive(Debug, Clone)]
pub struct StepRecord {
    pub name: String,
    pub status: StepStatus,
    pub started_at: Instant,
    pub finished_at: Option<Instant>,
    /// Set once the step executed; describes how it would be undone.
    pub compensation_description: Option<String>,
}

impl StepRecord {
    /// Time between start and the last status change, if finished.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.finished_at
            .map(|finished| finished.duration_since(self.started_at))
    }
}

/// Ordered record of a saga run.
///
/// Records are indexed by execution position, so two steps sharing a name
/// are still tracked independently.
#[derive(Debug, Default, Clone)]
pub struct SagaJournal {
    records: Vec<StepRecord>,
}

impl SagaJournal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn begin(&mut self, name: &str) -> usize {
        self.records.push(StepRecord {
            name: name.to_string(),
            status: StepStatus::Running,
            started_at: Instant::now(),
            finished_at: None,
            compensation_description: None,
        });
        self.records.len() - 1
    }

    pub(crate) fn executed(&mut self, index: usize, compensation_description: String) {
        self.finish(index, StepStatus::Executed);
        if let Some(record) = self.records.get_mut(index) {
            record.compensation_description = Some(compensation_description);
        }
    }

    pub(crate) fn failed(&mut self, index: usize) {
        self.finish(index, StepStatus::Failed);
    }

    pub(crate) fn compensated(&mut self, index: usize) {
        self.finish(index, StepStatus::Compensated);
    }

    pub(crate) fn compensation_failed(&mut self, index: usize) {
        self.finish(index, StepStatus::CompensationFailed);
    }

    fn finish(&mut self, index: usize, status: StepStatus) {
        if let Some(record) = self.records.get_mut(index) {
            record.status = status;
            record.finished_at = Some(Instant::now());
        }
    }

    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Names of the steps that executed successfully, in execution order.
    ///
    /// This is the unwind list: compensation walks it back to front.
    #[must_use]
    pub fn completed_steps(&self) -> Vec<&str> {
        self.records
            .iter()
            .filter(|record| record.status.was_executed())
            .map(|record| record.name.as_str())
            .collect()
    }

    /// Whether every recorded step executed and none was rolled back.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        !self.records.is_empty()
            && self
                .records
                .iter()
                .all(|record| record.status == StepStatus::Executed)
    }

    /// One line per step, e.g. `↩ insert_profile`.
    #[must_use]
    pub fn summary(&self) -> String {
        self.records
            .iter()
            .map(|record| {
                let marker = match record.status {
                    StepStatus::Running => "…",
                    StepStatus::Executed => "✓",
                    StepStatus::Failed => "✗",
                    StepStatus::Compensated => "↩",
                    StepStatus::CompensationFailed => "⚠",
                };
                format!("{marker} {}", record.name)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
