use crate::ClientResult;
use crate::commands::common::{ViewRunOptions, load_status, resolve_config};
use crate::config::DashboardConfig;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::OptionsData;
use crate::dashboard::Dashboard;
use crate::fetch::{HttpPageSource, PageSource};

pub fn run(options: ViewRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let config = resolve_config(options.endpoint.as_deref(), options.home_override)?;
    let source = HttpPageSource::new(&config)?;
    run_with_source(source, &config)
}

#[doc(hidden)]
pub fn run_with_source<S: PageSource>(
    source: S,
    config: &DashboardConfig,
) -> ClientResult<SuccessEnvelope> {
    let mut dashboard = Dashboard::open_with_config(source, config)?;
    dashboard.prefetch();
    let view = dashboard.view();

    let data = OptionsData {
        load: load_status(&view),
        options: view.options,
    };

    success("options", data)
}
