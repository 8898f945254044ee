use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "billview",
    version,
    about = "client billing dashboard",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Log progress to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter selections shared by every view. Omitted values mean "all".
#[derive(Debug, Clone, Default, Args)]
pub struct FilterFlags {
    /// Match client name (case-insensitive) or document (exact substring)
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,
    /// Movement type, or `all`
    #[arg(long = "type", value_name = "TYPE")]
    pub movement_type: Option<String>,
    /// Reference year, or `all`
    #[arg(long, value_name = "YEAR")]
    pub year: Option<String>,
    /// Reference month, or `all`
    #[arg(long, value_name = "MONTH")]
    pub month: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ViewFlags {
    #[command(flatten)]
    pub filters: FilterFlags,
    /// Table page to show, 20 rows per page
    #[arg(long, value_name = "N")]
    pub page: Option<usize>,
    /// Billing data endpoint, overriding config and BILLVIEW_ENDPOINT
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,
    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the summary cards for the current filters
    Summary {
        #[command(flatten)]
        view: ViewFlags,
    },
    /// Show one page of the movement table
    Movements {
        #[command(flatten)]
        view: ViewFlags,
    },
    /// Show one page of the aggregated invoice table
    Invoices {
        #[command(flatten)]
        view: ViewFlags,
    },
    /// List the values offered by the type, year and month filters
    Options {
        /// Billing data endpoint, overriding config and BILLVIEW_ENDPOINT
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the aggregated invoice rows for the current filters to CSV
    Export {
        #[command(flatten)]
        filters: FilterFlags,
        /// Destination file (default: clientes_faturas.csv)
        #[arg(long, short, value_name = "PATH")]
        output: Option<std::path::PathBuf>,
        /// Fetch every remaining page before exporting
        #[arg(long)]
        all_pages: bool,
        /// Billing data endpoint, overriding config and BILLVIEW_ENDPOINT
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;

    use super::{Commands, parse_from};

    #[test]
    fn parse_view_commands_with_filters() {
        let parsed = parse_from([
            "billview",
            "movements",
            "--search",
            "acme",
            "--type",
            "FATURAMENTO",
            "--year",
            "2024",
            "--month",
            "03",
            "--page",
            "2",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(cli.command, Commands::Movements { .. }));
            if let Commands::Movements { view } = cli.command {
                assert_eq!(view.filters.search.as_deref(), Some("acme"));
                assert_eq!(view.filters.movement_type.as_deref(), Some("FATURAMENTO"));
                assert_eq!(view.filters.year.as_deref(), Some("2024"));
                assert_eq!(view.filters.month.as_deref(), Some("03"));
                assert_eq!(view.page, Some(2));
                assert!(!view.json);
            }
        }
    }

    #[test]
    fn parse_command_paths() {
        let cases: [&[&str]; 5] = [
            &["billview", "summary"],
            &["billview", "movements", "--json"],
            &["billview", "invoices", "--endpoint", "http://localhost/exec"],
            &["billview", "options"],
            &["billview", "export", "--output", "out.csv", "--all-pages"],
        ];
        for case in cases {
            let parsed = parse_from(case);
            assert!(parsed.is_ok(), "failed to parse {case:?}");
        }
    }

    #[test]
    fn export_flags_are_parsed() {
        let parsed = parse_from([
            "billview",
            "export",
            "--month",
            "01",
            "-o",
            "faturas.csv",
            "--all-pages",
            "--json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert!(matches!(
                cli.command,
                Commands::Export {
                    all_pages: true,
                    json: true,
                    ..
                }
            ));
        }
    }

    #[test]
    fn verbosity_is_global() {
        let parsed = parse_from(["billview", "summary", "-vv"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(cli.verbose, 2);
        }
    }

    #[test]
    fn non_numeric_page_is_rejected() {
        let parsed = parse_from(["billview", "movements", "--page", "two"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn options_do_not_take_filters() {
        let parsed = parse_from(["billview", "options", "--month", "01"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn help_command_is_rejected() {
        let parsed = parse_from(["billview", "help"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn subcommand_help_uses_clap_display_help() {
        let parsed = parse_from(["billview", "export", "--help"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
