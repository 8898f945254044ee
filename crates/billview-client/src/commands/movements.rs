use crate::ClientResult;
use crate::commands::common::{ViewRunOptions, load_status, prepare_view, resolve_config};
use crate::config::DashboardConfig;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{AppliedFilters, MovementsData};
use crate::dashboard::Dashboard;
use crate::fetch::{HttpPageSource, PageSource};

pub fn run(options: ViewRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let config = resolve_config(options.endpoint.as_deref(), options.home_override)?;
    let source = HttpPageSource::new(&config)?;
    run_with_source(source, &config, &options)
}

#[doc(hidden)]
pub fn run_with_source<S: PageSource>(
    source: S,
    config: &DashboardConfig,
    options: &ViewRunOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let mut dashboard = Dashboard::open_with_config(source, config)?;
    prepare_view(&mut dashboard, &options.filters, options.page, "movements")?;
    let view = dashboard.view();

    let data = MovementsData {
        filters: AppliedFilters::from(dashboard.criteria()),
        load: load_status(&view),
        window: view.window,
        rows: view.movements,
    };

    success("movements", data)
}
