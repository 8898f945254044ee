use serde::Serialize;

use crate::aggregate::AggregatedInvoice;
use crate::dashboard::PageWindow;
use crate::filter::{FilterCriteria, FilterOptions};
use crate::metrics::DashboardMetrics;
use crate::records::ClientMovement;

#[derive(Debug, Clone, Serialize)]
pub struct AppliedFilters {
    pub search: String,
    pub movement_type: String,
    pub year: String,
    pub month: String,
}

impl From<&FilterCriteria> for AppliedFilters {
    fn from(criteria: &FilterCriteria) -> Self {
        Self {
            search: criteria.search_term.clone(),
            movement_type: criteria.movement_type.as_str().to_string(),
            year: criteria.year.as_str().to_string(),
            month: criteria.month.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadStatus {
    pub loaded_rows: usize,
    pub has_more: bool,
    pub loading_more: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub filters: AppliedFilters,
    pub options: FilterOptions,
    pub metrics: DashboardMetrics,
    pub matching_rows: usize,
    pub load: LoadStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovementsData {
    pub filters: AppliedFilters,
    pub window: PageWindow,
    pub rows: Vec<ClientMovement>,
    pub load: LoadStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoicesData {
    pub filters: AppliedFilters,
    pub window: PageWindow,
    pub invoice_total: usize,
    pub rows: Vec<AggregatedInvoice>,
    pub load: LoadStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionsData {
    pub options: FilterOptions,
    pub load: LoadStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportData {
    pub path: String,
    pub rows_exported: usize,
    pub bytes_written: usize,
    pub all_pages: bool,
    pub filters: AppliedFilters,
    pub load: LoadStatus,
}
