use crate::models::{ReportPayload, Shift, ShiftReport, TaggedEntry};
use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0} must not be negative")]
    NegativeValue(&'static str),

    #[error("tag label must not be empty")]
    EmptyLabel,

    #[error("tag quantity must be greater than zero")]
    NonPositiveQuantity,

    #[error("a report already exists for {date} ({shift}); edit it or pick another date/shift")]
    DuplicateSlot { date: NaiveDate, shift: Shift },

    #[error("a report with id {0} already exists")]
    DuplicateId(String),

    #[error("invalid filter value: {0}")]
    InvalidFilter(String),
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds the row to insert, generating an id when the payload has none.
pub fn for_create(payload: ReportPayload) -> Result<ShiftReport, ValidationError> {
    let id = payload
        .id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(new_id);
    build(id, payload)
}

/// Builds the replacement row; the id is mandatory.
pub fn for_update(payload: ReportPayload) -> Result<ShiftReport, ValidationError> {
    let id = payload
        .id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .ok_or(ValidationError::MissingField("id"))?;
    build(id, payload)
}

fn build(id: String, payload: ReportPayload) -> Result<ShiftReport, ValidationError> {
    let date = payload.date.ok_or(ValidationError::MissingField("date"))?;
    let shift = payload.shift.ok_or(ValidationError::MissingField("shift"))?;
    ensure_non_negative("wait_minutes", payload.wait_minutes)?;
    ensure_non_negative("length_of_stay_days", payload.length_of_stay_days)?;

    Ok(ShiftReport {
        id,
        date,
        shift,
        attendance: payload.attendance,
        blue: payload.blue,
        green: payload.green,
        yellow: payload.yellow,
        red: payload.red,
        wait_minutes: payload.wait_minutes,
        admissions: payload.admissions,
        length_of_stay_days: payload.length_of_stay_days,
        adverse_events: payload.adverse_events,
        evaluations: normalize_entries(payload.evaluations)?,
        exams: normalize_entries(payload.exams)?,
        death_causes: normalize_entries(payload.death_causes)?,
    })
}

fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NegativeValue(field))
    }
}

fn normalize_entries(entries: Vec<TaggedEntry>) -> Result<Vec<TaggedEntry>, ValidationError> {
    entries
        .into_iter()
        .map(|mut entry| {
            validate_entry(&entry.label, entry.quantity)?;
            if entry.id.trim().is_empty() {
                entry.id = new_id();
            }
            Ok(entry)
        })
        .collect()
}

pub fn validate_entry(label: &str, quantity: u32) -> Result<(), ValidationError> {
    if label.trim().is_empty() {
        return Err(ValidationError::EmptyLabel);
    }
    if quantity == 0 {
        return Err(ValidationError::NonPositiveQuantity);
    }
    Ok(())
}

/// Rejects `candidate` when another row (different id) already covers its
/// date and shift.
pub fn ensure_unique_slot(
    existing: &[ShiftReport],
    candidate: &ShiftReport,
) -> Result<(), ValidationError> {
    let taken = existing.iter().any(|report| {
        report.date == candidate.date
            && report.shift == candidate.shift
            && report.id != candidate.id
    });
    if taken {
        return Err(ValidationError::DuplicateSlot {
            date: candidate.date,
            shift: candidate.shift,
        });
    }
    Ok(())
}
