use crate::models::{Shift, ShiftReport};
use crate::validation::ValidationError;
use chrono::NaiveDate;

const ALL: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFilter {
    #[default]
    All,
    On(NaiveDate),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShiftFilter {
    #[default]
    All,
    Only(Shift),
}

impl DateFilter {
    pub fn parse(value: Option<&str>) -> Result<Self, ValidationError> {
        match value.map(str::trim) {
            None | Some("") | Some(ALL) => Ok(DateFilter::All),
            Some(raw) => raw
                .parse::<NaiveDate>()
                .map(DateFilter::On)
                .map_err(|_| ValidationError::InvalidFilter(format!("date '{raw}'"))),
        }
    }

    pub fn matches(self, report: &ShiftReport) -> bool {
        match self {
            DateFilter::All => true,
            DateFilter::On(date) => report.date == date,
        }
    }
}

impl ShiftFilter {
    pub fn parse(value: Option<&str>) -> Result<Self, ValidationError> {
        match value.map(str::trim) {
            None | Some("") | Some(ALL) => Ok(ShiftFilter::All),
            Some(raw) => raw
                .parse::<Shift>()
                .map(ShiftFilter::Only)
                .map_err(|_| ValidationError::InvalidFilter(format!("shift '{raw}'"))),
        }
    }

    pub fn matches(self, report: &ShiftReport) -> bool {
        match self {
            ShiftFilter::All => true,
            ShiftFilter::Only(shift) => report.shift == shift,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportFilter {
    pub date: DateFilter,
    pub shift: ShiftFilter,
}

impl ReportFilter {
    pub fn parse(date: Option<&str>, shift: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            date: DateFilter::parse(date)?,
            shift: ShiftFilter::parse(shift)?,
        })
    }

    pub fn matches(&self, report: &ShiftReport) -> bool {
        self.date.matches(report) && self.shift.matches(report)
    }

    pub fn apply(&self, reports: &[ShiftReport]) -> Vec<ShiftReport> {
        reports
            .iter()
            .filter(|report| self.matches(report))
            .cloned()
            .collect()
    }
}

/// Distinct dates present in `reports`, ascending.
pub fn unique_dates(reports: &[ShiftReport]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = reports.iter().map(|report| report.date).collect();
    dates.sort_unstable();
    dates.dedup();
    dates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(id: &str, date: &str, shift: Shift) -> ShiftReport {
        ShiftReport {
            id: id.into(),
            date: date.parse().unwrap(),
            shift,
            attendance: 1,
            blue: 0,
            green: 0,
            yellow: 0,
            red: 0,
            wait_minutes: 0.0,
            admissions: 0,
            length_of_stay_days: 0.0,
            adverse_events: 0,
            evaluations: Vec::new(),
            exams: Vec::new(),
            death_causes: Vec::new(),
        }
    }

    fn sample() -> Vec<ShiftReport> {
        vec![
            report("1", "2025-07-30", Shift::Morning),
            report("2", "2025-07-29", Shift::Morning),
            report("3", "2025-07-29", Shift::Night),
        ]
    }

    fn ids(reports: &[ShiftReport]) -> Vec<&str> {
        reports.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn all_filters_keep_everything() {
        let filter = ReportFilter::parse(Some("all"), None).unwrap();
        assert_eq!(filter, ReportFilter::default());
        assert_eq!(filter.apply(&sample()).len(), 3);
    }

    #[test]
    fn filters_combine_with_and() {
        let reports = sample();
        let by_date = ReportFilter::parse(Some("2025-07-29"), Some("all")).unwrap();
        assert_eq!(ids(&by_date.apply(&reports)), ["2", "3"]);

        let by_shift = ReportFilter::parse(None, Some("morning")).unwrap();
        assert_eq!(ids(&by_shift.apply(&reports)), ["1", "2"]);

        let both = ReportFilter::parse(Some("2025-07-29"), Some("Morning")).unwrap();
        assert_eq!(ids(&both.apply(&reports)), ["2"]);
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert!(matches!(
            ReportFilter::parse(Some("29/07/2025"), None),
            Err(ValidationError::InvalidFilter(_))
        ));
        assert!(matches!(
            ReportFilter::parse(None, Some("evening")),
            Err(ValidationError::InvalidFilter(_))
        ));
    }

    #[test]
    fn unique_dates_are_sorted_and_deduplicated() {
        let dates = unique_dates(&sample());
        assert_eq!(
            dates,
            vec![
                "2025-07-29".parse::<NaiveDate>().unwrap(),
                "2025-07-30".parse::<NaiveDate>().unwrap(),
            ]
        );
    }
}
