use crate::filter::{unique_dates, DateFilter, ReportFilter, ShiftFilter};
use crate::models::{DashboardView, ShiftReport};
use crate::stats;

#[derive(Debug, Clone)]
pub enum DashboardAction {
    RecordsLoaded(Vec<ShiftReport>),
    SetDateFilter(DateFilter),
    SetShiftFilter(ShiftFilter),
    ClearFilters,
}

/// Records, filters and the view derived from them. Every action goes
/// through [`DashboardState::apply`], which recomputes the view.
#[derive(Debug, Clone)]
pub struct DashboardState {
    records: Vec<ShiftReport>,
    filter: ReportFilter,
    view: DashboardView,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Vec::new(), ReportFilter::default())
    }
}

impl DashboardState {
    pub fn new(records: Vec<ShiftReport>, filter: ReportFilter) -> Self {
        let view = build_view(&records, &filter);
        Self {
            records,
            filter,
            view,
        }
    }

    pub fn records(&self) -> &[ShiftReport] {
        &self.records
    }

    pub fn filter(&self) -> ReportFilter {
        self.filter
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn into_view(self) -> DashboardView {
        self.view
    }

    pub fn apply(self, action: DashboardAction) -> Self {
        let Self {
            mut records,
            mut filter,
            ..
        } = self;
        match action {
            DashboardAction::RecordsLoaded(loaded) => records = loaded,
            DashboardAction::SetDateFilter(date) => filter.date = date,
            DashboardAction::SetShiftFilter(shift) => filter.shift = shift,
            DashboardAction::ClearFilters => filter = ReportFilter::default(),
        }
        Self::new(records, filter)
    }
}

pub fn build_view(records: &[ShiftReport], filter: &ReportFilter) -> DashboardView {
    let visible = filter.apply(records);
    DashboardView {
        kpis: stats::build_kpis(&visible),
        triage: stats::triage_chart(&visible),
        attendance_vs_wait: stats::attendance_vs_wait_chart(&visible),
        outcomes: stats::outcomes_chart(&visible),
        resources: stats::resources_chart(&visible),
        available_dates: unique_dates(records),
        record_count: visible.len(),
    }
}
