mod support;

use billview_client::commands::common::{FilterArgs, ViewRunOptions};
use billview_client::commands::export::{self, ExportRunOptions};
use billview_client::commands::{invoices, movements, options, summary};
use billview_client::config::DashboardConfig;
use support::fixtures::{ScriptedSource, billing_row, numbered_rows};

fn sample_source() -> ScriptedSource {
    ScriptedSource::new().with_page(
        1,
        vec![
            billing_row("111", "Acme", "FATURAMENTO", "01", "0", 100.5),
            billing_row("111", "Acme", "FATURAMENTO", "01", "0", 0.25),
            billing_row("222", "Zeta", "CANCELAMENTO", "01", "9", 30.0),
            billing_row("333", "Omega", "FATURAMENTO", "02", "2", 5.0),
        ],
    )
}

#[test]
fn summary_reports_filters_metrics_and_options() {
    let source = sample_source();
    let options = ViewRunOptions {
        filters: FilterArgs {
            search: Some("a".to_string()),
            ..FilterArgs::default()
        },
        ..ViewRunOptions::default()
    };
    let result = summary::run_with_source(&source, &DashboardConfig::default(), &options);
    assert!(result.is_ok());
    if let Ok(envelope) = result {
        assert_eq!(envelope.data["filters"]["search"], "a");
        assert_eq!(envelope.data["filters"]["movement_type"], "all");
        assert_eq!(envelope.data["matching_rows"], 4);
        assert_eq!(envelope.data["metrics"]["slot_counts"][0], 1);
        assert_eq!(envelope.data["metrics"]["slot_counts"][2], 1);
        assert_eq!(envelope.data["options"]["months"][1], "02");
    }
}

#[test]
fn invoices_skip_all_zero_groups() {
    let source = sample_source();
    let result = invoices::run_with_source(
        &source,
        &DashboardConfig::default(),
        &ViewRunOptions::default(),
    );
    assert!(result.is_ok());
    if let Ok(envelope) = result {
        assert_eq!(envelope.data["invoice_total"], 2);
        let rows = envelope.data["rows"].as_array().cloned().unwrap_or_default();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["client_id"], "111");
        assert_eq!(rows[0]["slot_totals"][0], 100.75);
    }
}

#[test]
fn movements_page_beyond_the_end_clamps_to_the_last_page() {
    let source = ScriptedSource::new().with_page(1, numbered_rows(0, 30));
    let result = movements::run_with_source(
        &source,
        &DashboardConfig::default(),
        &ViewRunOptions {
            page: Some(7),
            ..ViewRunOptions::default()
        },
    );
    assert!(result.is_ok());
    if let Ok(envelope) = result {
        assert_eq!(envelope.data["window"]["page"], 2);
        assert_eq!(envelope.data["window"]["showing_from"], 21);
        assert_eq!(envelope.data["rows"].as_array().map(Vec::len), Some(10));
    }
}

#[test]
fn page_zero_is_rejected() {
    let source = sample_source();
    let result = movements::run_with_source(
        &source,
        &DashboardConfig::default(),
        &ViewRunOptions {
            page: Some(0),
            ..ViewRunOptions::default()
        },
    );
    assert!(result.is_err());
    if let Err(error) = result {
        assert_eq!(error.code, "invalid_argument");
        assert!(error.recovery_steps[0].contains("billview movements --help"));
    }
}

#[test]
fn options_list_distinct_values() {
    let source = sample_source();
    let result = options::run_with_source(&source, &DashboardConfig::default());
    assert!(result.is_ok());
    if let Ok(envelope) = result {
        assert_eq!(envelope.data["options"]["movement_types"][0], "FATURAMENTO");
        assert_eq!(envelope.data["options"]["movement_types"][1], "CANCELAMENTO");
        assert_eq!(envelope.data["options"]["years"][0], "2024");
    }
}

#[test]
fn export_writes_the_filtered_invoice_file() {
    let temp = tempfile::Builder::new().prefix("billview-export").tempdir();
    assert!(temp.is_ok());
    if let Ok(dir) = temp {
        let path = dir.path().join("out.csv");
        let source = sample_source();
        let result = export::run_with_source(
            &source,
            &DashboardConfig::default(),
            &ExportRunOptions {
                filters: FilterArgs {
                    month: Some("01".to_string()),
                    ..FilterArgs::default()
                },
                output: Some(path.clone()),
                ..ExportRunOptions::default()
            },
        );
        assert!(result.is_ok());
        if let Ok(envelope) = result {
            assert_eq!(envelope.data["rows_exported"], 1);
            assert_eq!(envelope.data["filters"]["month"], "01");
        }

        let written = std::fs::read_to_string(&path);
        assert!(written.is_ok());
        if let Ok(text) = written {
            assert!(text.starts_with('\u{FEFF}'));
            let lines = text.lines().collect::<Vec<&str>>();
            assert_eq!(lines.len(), 2);
            assert!(lines[1].starts_with("\"111\";\"Acme\";\"01\";\"0\";\"100.75\""));
        }
    }
}

#[test]
fn export_all_pages_drains_the_source() {
    let temp = tempfile::Builder::new().prefix("billview-export").tempdir();
    assert!(temp.is_ok());
    if let Ok(dir) = temp {
        let source = ScriptedSource::new()
            .with_page(1, numbered_rows(0, 100))
            .with_page(2, numbered_rows(100, 100))
            .with_page(3, numbered_rows(200, 5));
        let result = export::run_with_source(
            &source,
            &DashboardConfig::default(),
            &ExportRunOptions {
                output: Some(dir.path().join("all.csv")),
                all_pages: true,
                ..ExportRunOptions::default()
            },
        );
        assert!(result.is_ok());
        if let Ok(envelope) = result {
            assert_eq!(envelope.data["rows_exported"], 205);
            assert_eq!(envelope.data["load"]["has_more"], false);
        }
        assert_eq!(source.requested_pages(), vec![1, 2, 3]);
    }
}

#[test]
fn export_without_all_pages_keeps_to_the_first_load() {
    let temp = tempfile::Builder::new().prefix("billview-export").tempdir();
    assert!(temp.is_ok());
    if let Ok(dir) = temp {
        let source = ScriptedSource::new()
            .with_page(1, numbered_rows(0, 30))
            .with_page(2, numbered_rows(30, 30));
        let config = DashboardConfig {
            page_size: 30,
            ..DashboardConfig::default()
        };
        let result = export::run_with_source(
            &source,
            &config,
            &ExportRunOptions {
                output: Some(dir.path().join("first.csv")),
                ..ExportRunOptions::default()
            },
        );
        assert!(result.is_ok());
        if let Ok(envelope) = result {
            assert_eq!(envelope.data["rows_exported"], 30);
            assert_eq!(envelope.data["load"]["has_more"], true);
        }
        assert_eq!(source.requested_pages(), vec![1]);
    }
}
