use crate::models::{ShiftReport, TaggedEntry};
use crate::validation::{new_id, validate_entry, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Evaluation,
    Exam,
    DeathCause,
}

impl TagKind {
    fn list_mut(self, report: &mut ShiftReport) -> &mut Vec<TaggedEntry> {
        match self {
            TagKind::Evaluation => &mut report.evaluations,
            TagKind::Exam => &mut report.exams,
            TagKind::DeathCause => &mut report.death_causes,
        }
    }
}

/// An entry typed into the form but not yet attached to the report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedEntry {
    pub label: String,
    pub quantity: u32,
}

/// Staging buffers for the three tag lists of a report being edited.
#[derive(Debug, Clone, Default)]
pub struct TagEditor {
    evaluation: StagedEntry,
    exam: StagedEntry,
    death_cause: StagedEntry,
}

impl TagEditor {
    pub fn staged(&self, kind: TagKind) -> &StagedEntry {
        match kind {
            TagKind::Evaluation => &self.evaluation,
            TagKind::Exam => &self.exam,
            TagKind::DeathCause => &self.death_cause,
        }
    }

    fn staged_mut(&mut self, kind: TagKind) -> &mut StagedEntry {
        match kind {
            TagKind::Evaluation => &mut self.evaluation,
            TagKind::Exam => &mut self.exam,
            TagKind::DeathCause => &mut self.death_cause,
        }
    }

    pub fn stage(&mut self, kind: TagKind, label: impl Into<String>, quantity: u32) {
        *self.staged_mut(kind) = StagedEntry {
            label: label.into(),
            quantity,
        };
    }

    /// Moves the staged entry of `kind` into the report under a fresh id and
    /// clears the buffer. On error neither the report nor the buffer change.
    pub fn add(
        &mut self,
        kind: TagKind,
        report: &mut ShiftReport,
    ) -> Result<TaggedEntry, ValidationError> {
        let staged = self.staged(kind);
        validate_entry(&staged.label, staged.quantity)?;

        let entry = TaggedEntry {
            id: new_id(),
            label: staged.label.trim().to_string(),
            quantity: staged.quantity,
        };
        kind.list_mut(report).push(entry.clone());
        *self.staged_mut(kind) = StagedEntry::default();
        Ok(entry)
    }

    pub fn remove(kind: TagKind, report: &mut ShiftReport, id: &str) {
        kind.list_mut(report).retain(|entry| entry.id != id);
    }
}
