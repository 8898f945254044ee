use std::path::Path;

use crate::config::{DashboardConfig, resolve_config_home};
use crate::contracts::types::LoadStatus;
use crate::dashboard::{Dashboard, DashboardView};
use crate::fetch::PageSource;
use crate::filter::{FilterCriteria, Selection};
use crate::{ClientError, ClientResult};

/// Filter selections as they arrive from the command line.
#[derive(Debug, Clone, Default)]
pub struct FilterArgs {
    pub search: Option<String>,
    pub movement_type: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
}

impl FilterArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_term: self.search.clone().unwrap_or_default(),
            movement_type: Selection::from_option(self.movement_type.as_deref()),
            year: Selection::from_option(self.year.as_deref()),
            month: Selection::from_option(self.month.as_deref()),
        }
    }
}

#[derive(Debug, Default)]
pub struct ViewRunOptions<'a> {
    pub filters: FilterArgs,
    pub page: Option<usize>,
    pub endpoint: Option<String>,
    pub home_override: Option<&'a Path>,
}

pub(crate) fn resolve_config(
    endpoint: Option<&str>,
    home_override: Option<&Path>,
) -> ClientResult<DashboardConfig> {
    let home = resolve_config_home(home_override)?;
    DashboardConfig::load_from_home(&home)?.with_endpoint(endpoint)
}

/// Applies filters and walks the table forward to `page`, fetching more rows
/// along the way the same way scrolling through the dashboard would.
pub(crate) fn prepare_view<S: PageSource>(
    dashboard: &mut Dashboard<S>,
    filters: &FilterArgs,
    page: Option<usize>,
    command: &str,
) -> ClientResult<()> {
    let target = page.unwrap_or(1);
    if target == 0 {
        return Err(ClientError::invalid_argument_for_command(
            "--page must be 1 or greater.",
            Some(command),
        ));
    }

    dashboard.set_filters(filters.criteria());
    let reached = dashboard.advance_to(target);
    if reached < target {
        tracing::debug!(requested = target, reached, "requested page beyond the last page");
    }
    Ok(())
}

pub(crate) fn load_status(view: &DashboardView) -> LoadStatus {
    LoadStatus {
        loaded_rows: view.loaded_rows,
        has_more: view.has_more,
        loading_more: view.loading_more,
    }
}
