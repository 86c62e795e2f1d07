use crate::models::{ChartData, ChartLabel, Dataset, Kpis, ShiftReport, TaggedEntry};
use std::collections::HashMap;

pub const RESOURCE_LABEL_WIDTH: usize = 16;

pub fn build_kpis(reports: &[ShiftReport]) -> Kpis {
    let total_attendance: u64 = reports.iter().map(|r| u64::from(r.attendance)).sum();
    let total_admissions: u64 = reports.iter().map(|r| u64::from(r.admissions)).sum();
    let total_deaths: u64 = reports.iter().map(ShiftReport::deaths).sum();

    Kpis {
        total_attendance,
        average_wait_minutes: weighted_average_wait(reports).round() as u64,
        total_admissions,
        total_deaths,
    }
}

/// Mean wait weighted by attendance; zero when nobody was attended.
pub fn weighted_average_wait(reports: &[ShiftReport]) -> f64 {
    let attendance: f64 = reports.iter().map(|r| f64::from(r.attendance)).sum();
    if attendance <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = reports
        .iter()
        .map(|r| r.wait_minutes * f64::from(r.attendance))
        .sum();
    weighted / attendance
}

pub fn triage_chart(reports: &[ShiftReport]) -> ChartData {
    let (mut blue, mut green, mut yellow, mut red) = (0u64, 0u64, 0u64, 0u64);
    for report in reports {
        blue += u64::from(report.blue);
        green += u64::from(report.green);
        yellow += u64::from(report.yellow);
        red += u64::from(report.red);
    }

    ChartData {
        labels: labels(&["Blue", "Green", "Yellow", "Red"]),
        datasets: vec![dataset(
            "Attendances",
            [blue, green, yellow, red].map(|v| v as f64).to_vec(),
        )],
    }
}

pub fn attendance_vs_wait_chart(reports: &[ShiftReport]) -> ChartData {
    let labels = reports
        .iter()
        .map(|r| {
            ChartLabel::Single(format!(
                "{} - {}",
                r.date.format("%d/%m"),
                r.shift.display_name()
            ))
        })
        .collect();

    ChartData {
        labels,
        datasets: vec![
            dataset(
                "Attendances",
                reports.iter().map(|r| f64::from(r.attendance)).collect(),
            ),
            dataset(
                "Average wait (min)",
                reports.iter().map(|r| r.wait_minutes).collect(),
            ),
        ],
    }
}

pub fn outcomes_chart(reports: &[ShiftReport]) -> ChartData {
    let admissions: u64 = reports.iter().map(|r| u64::from(r.admissions)).sum();
    let adverse: u64 = reports.iter().map(|r| u64::from(r.adverse_events)).sum();
    let deaths: u64 = reports.iter().map(ShiftReport::deaths).sum();

    ChartData {
        labels: labels(&["Admissions", "Adverse events", "Deaths"]),
        datasets: vec![dataset(
            "Count",
            vec![admissions as f64, adverse as f64, deaths as f64],
        )],
    }
}

/// Evaluations and exams summed per label. Both series share the union of
/// labels in first-seen order, evaluations first.
pub fn resources_chart(reports: &[ShiftReport]) -> ChartData {
    let evaluations = sum_by_label(reports.iter().flat_map(|r| r.evaluations.iter()));
    let exams = sum_by_label(reports.iter().flat_map(|r| r.exams.iter()));

    let mut order: Vec<&str> = Vec::new();
    for (label, _) in evaluations.iter().chain(exams.iter()) {
        if !order.contains(&label.as_str()) {
            order.push(label.as_str());
        }
    }

    ChartData {
        labels: order
            .iter()
            .map(|&label| ChartLabel::Lines(wrap_label(label, RESOURCE_LABEL_WIDTH)))
            .collect(),
        datasets: vec![
            dataset(
                "Specialized evaluations",
                order.iter().map(|&label| total_for(&evaluations, label)).collect(),
            ),
            dataset(
                "Requested exams",
                order.iter().map(|&label| total_for(&exams, label)).collect(),
            ),
        ],
    }
}

fn total_for(sums: &[(String, u64)], label: &str) -> f64 {
    sums.iter()
        .find(|(key, _)| key == label)
        .map_or(0.0, |(_, total)| *total as f64)
}

fn sum_by_label<'a>(entries: impl Iterator<Item = &'a TaggedEntry>) -> Vec<(String, u64)> {
    let mut sums: Vec<(String, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for entry in entries {
        let label = entry.label.trim();
        if label.is_empty() {
            continue;
        }
        match index.get(label) {
            Some(&slot) => sums[slot].1 += u64::from(entry.quantity),
            None => {
                index.insert(label.to_string(), sums.len());
                sums.push((label.to_string(), u64::from(entry.quantity)));
            }
        }
    }
    sums
}

/// Greedy word wrap: a word moves to a new line when appending it would
/// push the line past `max_chars`. The first word always stays put, so a
/// single long word is never split.
pub fn wrap_label(label: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for (i, word) in label.split(' ').enumerate() {
        let candidate = format!("{line}{word} ");
        if candidate.chars().count() > max_chars && i > 0 {
            lines.push(line.trim().to_string());
            line = format!("{word} ");
        } else {
            line = candidate;
        }
    }
    lines.push(line.trim().to_string());
    lines
}

fn labels(names: &[&str]) -> Vec<ChartLabel> {
    names
        .iter()
        .map(|name| ChartLabel::Single((*name).to_string()))
        .collect()
}

fn dataset(label: &str, data: Vec<f64>) -> Dataset {
    Dataset {
        label: label.to_string(),
        data,
    }
}
