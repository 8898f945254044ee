use serde::Serialize;

use crate::ClientResult;
use crate::aggregate::{AggregatedInvoice, aggregate, invoice_rows};
use crate::config::DashboardConfig;
use crate::export::export_csv;
use crate::fetch::{ContinuationOutcome, PageSource, Paginator};
use crate::filter::{FilterCriteria, FilterOptions, filter_movements};
use crate::metrics::DashboardMetrics;
use crate::records::ClientMovement;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    pub page: usize,
    pub total_pages: usize,
    pub window_size: usize,
    /// 1-based index of the first row shown; 0 when nothing matches.
    pub showing_from: usize,
    pub showing_to: usize,
    pub total: usize,
}

impl PageWindow {
    fn new(page: usize, window_size: usize, total: usize) -> Self {
        let start = (page.saturating_sub(1)) * window_size;
        let showing_to = total.min(start + window_size);
        Self {
            page,
            total_pages: total.div_ceil(window_size),
            window_size,
            showing_from: if start < total { start + 1 } else { 0 },
            showing_to,
            total,
        }
    }

    fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.page.saturating_sub(1)) * self.window_size;
        if start >= items.len() {
            return &[];
        }
        let end = items.len().min(start + self.window_size);
        &items[start..end]
    }
}

/// Everything the dashboard shows, recomputed from scratch on each call.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub options: FilterOptions,
    pub metrics: DashboardMetrics,
    pub window: PageWindow,
    pub movements: Vec<ClientMovement>,
    pub invoices: Vec<AggregatedInvoice>,
    pub invoice_total: usize,
    pub loaded_rows: usize,
    pub has_more: bool,
    pub loading_more: bool,
}

/// Owns the session: fetched rows, paging state, filter selections and the
/// table page currently shown.
pub struct Dashboard<S: PageSource> {
    source: S,
    paginator: Paginator,
    criteria: FilterCriteria,
    window_page: usize,
}

impl<S: PageSource> Dashboard<S> {
    /// Loads the first page. A failure here means there is nothing to show.
    pub fn open(source: S, page_size: u32, window_size: usize) -> ClientResult<Self> {
        let mut paginator = Paginator::new(page_size, window_size);
        paginator.load_initial(&source)?;
        Ok(Self {
            source,
            paginator,
            criteria: FilterCriteria::default(),
            window_page: 1,
        })
    }

    pub fn open_with_config(source: S, config: &DashboardConfig) -> ClientResult<Self> {
        Self::open(source, config.page_size, config.window_size)
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn movements(&self) -> &[ClientMovement] {
        self.paginator.movements()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn window_page(&self) -> usize {
        self.window_page
    }

    /// Replacing the filters always returns to the first table page.
    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.window_page = 1;
    }

    pub fn filtered(&self) -> Vec<&ClientMovement> {
        filter_movements(self.paginator.movements(), &self.criteria)
    }

    pub fn total_pages(&self) -> usize {
        self.filtered()
            .len()
            .div_ceil(self.paginator.window_size())
            .max(1)
    }

    /// Refused while a continuation is still loading, or on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.paginator.is_loading_more() {
            return false;
        }
        if self.window_page >= self.total_pages() {
            return false;
        }
        self.window_page += 1;
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if self.window_page <= 1 {
            return false;
        }
        self.window_page -= 1;
        true
    }

    /// Jumps straight to `page`, clamped to `[1, total_pages]`. No fetch.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.window_page = page.clamp(1, self.total_pages());
        self.window_page
    }

    /// Runs one continuation fetch when the current window is near the end
    /// of the loaded rows.
    pub fn prefetch(&mut self) -> Option<ContinuationOutcome> {
        self.paginator.continue_from(&self.source, self.window_page)
    }

    /// Steps forward one table page at a time, prefetching as the window
    /// nears the end of the loaded rows, until `page` or the last page.
    pub fn advance_to(&mut self, page: usize) -> usize {
        self.prefetch();
        while self.window_page < page {
            if !self.next_page() {
                break;
            }
            self.prefetch();
        }
        self.window_page
    }

    pub fn load_all(&mut self) -> usize {
        self.paginator.load_until_exhausted(&self.source)
    }

    pub fn view(&self) -> DashboardView {
        let all = self.paginator.movements();
        let filtered = filter_movements(all, &self.criteria);
        let aggregated = aggregate(filtered.iter().copied());
        let invoices = invoice_rows(&aggregated);
        let metrics = DashboardMetrics::summarize(&filtered, &aggregated);
        let window = PageWindow::new(
            self.window_page,
            self.paginator.window_size(),
            filtered.len(),
        );

        let movements = window
            .slice(&filtered)
            .iter()
            .map(|movement| (*movement).clone())
            .collect::<Vec<ClientMovement>>();
        let invoice_page = window.slice(&invoices).to_vec();

        DashboardView {
            options: FilterOptions::from_movements(all),
            metrics,
            window,
            movements,
            invoice_total: invoices.len(),
            invoices: invoice_page,
            loaded_rows: all.len(),
            has_more: self.paginator.has_more(),
            loading_more: self.paginator.is_loading_more(),
        }
    }

    /// Invoice rows for every filtered movement, not just the current window.
    pub fn export_rows(&self) -> Vec<AggregatedInvoice> {
        let filtered = self.filtered();
        invoice_rows(&aggregate(filtered.iter().copied()))
    }

    pub fn export_bytes(&self) -> ClientResult<Vec<u8>> {
        export_csv(&self.export_rows())
    }
}
