use crate::ClientResult;
use crate::commands::common::{ViewRunOptions, load_status, prepare_view, resolve_config};
use crate::config::DashboardConfig;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{AppliedFilters, InvoicesData};
use crate::dashboard::Dashboard;
use crate::fetch::{HttpPageSource, PageSource};

pub fn run(options: ViewRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let config = resolve_config(options.endpoint.as_deref(), options.home_override)?;
    let source = HttpPageSource::new(&config)?;
    run_with_source(source, &config, &options)
}

/// The invoice table shares the movement table's page window, so a page
/// number can land past the last invoice row and come back empty.
#[doc(hidden)]
pub fn run_with_source<S: PageSource>(
    source: S,
    config: &DashboardConfig,
    options: &ViewRunOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let mut dashboard = Dashboard::open_with_config(source, config)?;
    prepare_view(&mut dashboard, &options.filters, options.page, "invoices")?;
    let view = dashboard.view();

    let data = InvoicesData {
        filters: AppliedFilters::from(dashboard.criteria()),
        load: load_status(&view),
        window: view.window,
        invoice_total: view.invoice_total,
        rows: view.invoices,
    };

    success("invoices", data)
}
