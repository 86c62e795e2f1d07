use crate::models::ShiftReport;
use crate::validation::ValidationError;
use serde::{Deserialize, Serialize};

/// The report table: generic select/insert/update/delete over a list of
/// rows keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportTable {
    #[serde(default)]
    reports: Vec<ShiftReport>,
}

impl ReportTable {
    pub fn rows(&self) -> &[ShiftReport] {
        &self.reports
    }

    pub fn select_all(&self) -> Vec<ShiftReport> {
        self.reports.clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.reports.iter().any(|row| row.id == id)
    }

    pub fn insert(&mut self, report: ShiftReport) -> Result<ShiftReport, ValidationError> {
        if self.contains(&report.id) {
            return Err(ValidationError::DuplicateId(report.id));
        }
        self.reports.push(report.clone());
        Ok(report)
    }

    /// Replaces the row with the same id. Returns `None` when nothing matched.
    pub fn update(&mut self, report: ShiftReport) -> Option<ShiftReport> {
        let row = self.reports.iter_mut().find(|row| row.id == report.id)?;
        *row = report.clone();
        Some(report)
    }

    /// Removes every row with `id`, returning how many were removed.
    pub fn delete(&mut self, id: &str) -> usize {
        let before = self.reports.len();
        self.reports.retain(|row| row.id != id);
        before - self.reports.len()
    }
}
