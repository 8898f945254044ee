use std::io;

use serde_json::Value;

use super::format::{self, Column};

const EMPTY_RESULT: &str = "  Nenhum resultado encontrado";

pub fn render_summary(data: &Value) -> io::Result<String> {
    let metrics = data
        .get("metrics")
        .ok_or_else(|| io::Error::other("summary output requires metrics"))?;

    let mut lines = vec![filters_heading("Billing summary", data), String::new()];
    lines.push("Cards:".to_string());
    let mut cards = vec![
        ("Total de Clientes:", count(metrics, "distinct_clients")),
        ("Faturas a Vencer:", count(metrics, "not_yet_due")),
        (
            "Faturas em Atraso:",
            count(metrics, "single_overdue_occurrence"),
        ),
    ];
    let slot_labels = ["Fatura 0:", "Fatura 1:", "Fatura 2:", "Fatura 3:"];
    for (index, label) in slot_labels.into_iter().enumerate() {
        let value = metrics
            .get("slot_counts")
            .and_then(|slots| slots.get(index))
            .and_then(Value::as_u64)
            .unwrap_or(0);
        cards.push((label, value.to_string()));
    }
    lines.extend(format::key_value_rows(&cards, 2));

    lines.push(String::new());
    lines.push(format!(
        "  {} matching movements.",
        count(data, "matching_rows")
    ));
    lines.extend(load_footer(data));

    Ok(lines.join("\n"))
}

pub fn render_movements(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("movements output requires rows"))?;

    let mut lines = vec![filters_heading("Movements", data), String::new()];
    if rows.is_empty() {
        lines.push(EMPTY_RESULT.to_string());
    } else {
        let columns = [
            Column::left("CNPJ"),
            Column::left("Nome do Cliente"),
            Column::left("Tipo de Movimento"),
            Column::left("Dias em Atraso"),
            Column::right("Valor Final"),
        ];
        let table_rows = rows
            .iter()
            .map(|row| {
                let overdue = text(row, "days_overdue_label");
                vec![
                    text(row, "client_id"),
                    text(row, "client_name"),
                    text(row, "movement_type"),
                    if overdue.is_empty() {
                        "-".to_string()
                    } else {
                        overdue
                    },
                    format::currency(amount(row.get("final_amount"))),
                ]
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table(
            &columns,
            &table_rows,
            format::terminal_width(),
            "Movement",
        ));
    }

    lines.push(String::new());
    lines.push(window_footer(data));
    lines.extend(load_footer(data));
    Ok(lines.join("\n"))
}

pub fn render_invoices(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("invoices output requires rows"))?;

    let mut lines = vec![filters_heading("Invoices", data), String::new()];
    if rows.is_empty() {
        lines.push(EMPTY_RESULT.to_string());
    } else {
        let columns = [
            Column::left("CNPJ"),
            Column::left("Nome do Cliente"),
            Column::left("Mês Referência"),
            Column::right("Fatura 0"),
            Column::right("Fatura 1"),
            Column::right("Fatura 2"),
            Column::right("Fatura 3"),
        ];
        let table_rows = rows
            .iter()
            .map(|row| {
                let mut cells = vec![
                    text(row, "client_id"),
                    text(row, "client_name"),
                    text(row, "reference_month"),
                ];
                for index in 0..4 {
                    let total = row.get("slot_totals").and_then(|totals| totals.get(index));
                    cells.push(format::currency(amount(total)));
                }
                cells
            })
            .collect::<Vec<Vec<String>>>();
        lines.extend(format::render_table(
            &columns,
            &table_rows,
            format::terminal_width(),
            "Invoice",
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "  {} invoice groups with a positive total.",
        count(data, "invoice_total")
    ));
    lines.push(window_footer(data));
    lines.extend(load_footer(data));
    Ok(lines.join("\n"))
}

pub fn render_options(data: &Value) -> io::Result<String> {
    let options = data
        .get("options")
        .ok_or_else(|| io::Error::other("options output requires options"))?;

    let mut lines = vec!["Filter values in the loaded rows:".to_string(), String::new()];
    let entries = [
        ("--type:", list(options, "movement_types")),
        ("--year:", list(options, "years")),
        ("--month:", list(options, "months")),
    ];
    lines.extend(format::key_value_rows(&entries, 2));
    lines.push(String::new());
    lines.push("  Every filter also accepts `all`.".to_string());
    lines.extend(load_footer(data));
    Ok(lines.join("\n"))
}

pub fn render_export(data: &Value) -> io::Result<String> {
    let path = data
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("export output requires path"))?;

    let mut lines = vec![format!("Wrote {path}"), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Invoice rows:", count(data, "rows_exported")),
            ("Bytes:", count(data, "bytes_written")),
            ("Loaded rows:", count(&data["load"], "loaded_rows")),
        ],
        2,
    ));

    let all_pages = data.get("all_pages").and_then(Value::as_bool).unwrap_or(false);
    let has_more = data["load"]
        .get("has_more")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !all_pages && has_more {
        lines.push(String::new());
        lines.push("More rows are available at the source.".to_string());
        lines.push("  Run `billview export --all-pages` to include every page.".to_string());
    }

    Ok(lines.join("\n"))
}

fn filters_heading(title: &str, data: &Value) -> String {
    let filters = &data["filters"];
    let mut applied = Vec::new();
    let search = text(filters, "search");
    if !search.is_empty() {
        applied.push(format!("search \"{search}\""));
    }
    for (key, label) in [("movement_type", "type"), ("year", "year"), ("month", "month")] {
        let value = text(filters, key);
        if !value.is_empty() && value != "all" {
            applied.push(format!("{label} {value}"));
        }
    }

    if applied.is_empty() {
        format!("{title}:")
    } else {
        format!("{title} ({}):", applied.join(", "))
    }
}

fn window_footer(data: &Value) -> String {
    let window = &data["window"];
    let total_pages = window
        .get("total_pages")
        .and_then(Value::as_u64)
        .unwrap_or(0)
        .max(1);
    format!(
        "  Mostrando {} até {} de {} resultados (page {} of {})",
        count(window, "showing_from"),
        count(window, "showing_to"),
        count(window, "total"),
        count(window, "page"),
        total_pages,
    )
}

fn load_footer(data: &Value) -> Vec<String> {
    let load = &data["load"];
    let loaded = count(load, "loaded_rows");
    let has_more = load.get("has_more").and_then(Value::as_bool).unwrap_or(false);
    if load.get("loading_more").and_then(Value::as_bool) == Some(true) {
        return vec![format!("  {loaded} rows loaded (Carregando mais...)")];
    }
    if has_more {
        vec![format!(
            "  {loaded} rows loaded so far; later pages load as you page forward."
        )]
    } else {
        vec![format!("  {loaded} rows loaded.")]
    }
}

fn count(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_u64)
        .unwrap_or(0)
        .to_string()
}

fn text(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn amount(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).unwrap_or(0.0)
}

fn list(value: &Value, key: &str) -> String {
    let items = value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<&str>>()
        })
        .unwrap_or_default();
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items.join(", ")
    }
}
