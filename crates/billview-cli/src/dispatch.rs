use billview_client::commands::common::{FilterArgs, ViewRunOptions};
use billview_client::commands::export::ExportRunOptions;
use billview_client::commands::{export, invoices, movements, options, summary};
use billview_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, FilterFlags, ViewFlags};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Summary { view } => summary::run(view_options(view)),
        Commands::Movements { view } => movements::run(view_options(view)),
        Commands::Invoices { view } => invoices::run(view_options(view)),
        Commands::Options { endpoint, .. } => options::run(ViewRunOptions {
            endpoint: endpoint.clone(),
            ..ViewRunOptions::default()
        }),
        Commands::Export {
            filters,
            output,
            all_pages,
            endpoint,
            ..
        } => export::run(ExportRunOptions {
            filters: filter_args(filters),
            output: output.clone(),
            all_pages: *all_pages,
            endpoint: endpoint.clone(),
            home_override: None,
        }),
    }
}

fn view_options(view: &ViewFlags) -> ViewRunOptions<'static> {
    ViewRunOptions {
        filters: filter_args(&view.filters),
        page: view.page,
        endpoint: view.endpoint.clone(),
        home_override: None,
    }
}

fn filter_args(flags: &FilterFlags) -> FilterArgs {
    FilterArgs {
        search: flags.search.clone(),
        movement_type: flags.movement_type.clone(),
        year: flags.year.clone(),
        month: flags.month.clone(),
    }
}
