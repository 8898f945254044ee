use std::path::{Path, PathBuf};

use crate::ClientResult;
use crate::commands::common::{FilterArgs, load_status, resolve_config};
use crate::config::DashboardConfig;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{AppliedFilters, ExportData};
use crate::dashboard::Dashboard;
use crate::export::{export_csv, write_export};
use crate::fetch::{HttpPageSource, PageSource};

#[derive(Debug, Default)]
pub struct ExportRunOptions<'a> {
    pub filters: FilterArgs,
    pub output: Option<PathBuf>,
    /// Drain every remaining page before exporting instead of exporting
    /// only the first page.
    pub all_pages: bool,
    pub endpoint: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub fn run(options: ExportRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let config = resolve_config(options.endpoint.as_deref(), options.home_override)?;
    let source = HttpPageSource::new(&config)?;
    run_with_source(source, &config, &options)
}

#[doc(hidden)]
pub fn run_with_source<S: PageSource>(
    source: S,
    config: &DashboardConfig,
    options: &ExportRunOptions<'_>,
) -> ClientResult<SuccessEnvelope> {
    let mut dashboard = Dashboard::open_with_config(source, config)?;
    if options.all_pages {
        let pages = dashboard.load_all();
        tracing::info!(pages, "loaded remaining pages for export");
    }
    dashboard.set_filters(options.filters.criteria());

    let rows = dashboard.export_rows();
    let bytes = export_csv(&rows)?;
    let path = options
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.export_file_name));
    write_export(&path, &bytes)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "wrote invoice export");

    let view = dashboard.view();
    let data = ExportData {
        path: path.display().to_string(),
        rows_exported: rows.len(),
        bytes_written: bytes.len(),
        all_pages: options.all_pages,
        filters: AppliedFilters::from(dashboard.criteria()),
        load: load_status(&view),
    };

    success("export", data)
}
