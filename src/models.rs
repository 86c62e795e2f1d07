use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    #[serde(alias = "Manhã")]
    Morning,
    #[serde(alias = "Tarde")]
    Afternoon,
    #[serde(alias = "Noite")]
    Night,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Night];

    pub fn as_str(self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Afternoon => "afternoon",
            Shift::Night => "night",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "morning" | "manhã" => Ok(Shift::Morning),
            "afternoon" | "tarde" => Ok(Shift::Afternoon),
            "night" | "noite" => Ok(Shift::Night),
            other => Err(format!("unknown shift '{other}'")),
        }
    }
}

/// A `{label, quantity}` pair attached to a report: an evaluation, an exam
/// or a cause of death.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TaggedEntry {
    pub id: String,
    pub label: String,
    pub quantity: u32,
}

/// One row of the report table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftReport {
    pub id: String,
    pub date: NaiveDate,
    pub shift: Shift,
    pub attendance: u32,
    pub blue: u32,
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
    pub wait_minutes: f64,
    pub admissions: u32,
    pub length_of_stay_days: f64,
    pub adverse_events: u32,
    #[serde(default)]
    pub evaluations: Vec<TaggedEntry>,
    #[serde(default)]
    pub exams: Vec<TaggedEntry>,
    #[serde(default)]
    pub death_causes: Vec<TaggedEntry>,
}

impl ShiftReport {
    pub fn deaths(&self) -> u64 {
        self.death_causes
            .iter()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }
}

/// Body of `POST` and `PUT` requests. Every field may be omitted; the
/// required ones are checked by `validation::into_report`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportPayload {
    pub id: Option<String>,
    pub date: Option<NaiveDate>,
    pub shift: Option<Shift>,
    pub attendance: u32,
    pub blue: u32,
    pub green: u32,
    pub yellow: u32,
    pub red: u32,
    pub wait_minutes: f64,
    pub admissions: u32,
    pub length_of_stay_days: f64,
    pub adverse_events: u32,
    pub evaluations: Vec<TaggedEntry>,
    pub exams: Vec<TaggedEntry>,
    pub death_causes: Vec<TaggedEntry>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub date: Option<String>,
    pub shift: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_attendance: u64,
    pub average_wait_minutes: u64,
    pub total_admissions: u64,
    pub total_deaths: u64,
}

/// A category label, split into several lines when it was wrapped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartLabel {
    Single(String),
    Lines(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<ChartLabel>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub kpis: Kpis,
    pub triage: ChartData,
    pub attendance_vs_wait: ChartData,
    pub outcomes: ChartData,
    pub resources: ChartData,
    pub available_dates: Vec<NaiveDate>,
    pub record_count: usize,
}
