use std::fs;
use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::aggregate::AggregatedInvoice;
use crate::records::InvoiceSlot;
use crate::{ClientError, ClientResult};

pub const EXPORT_HEADERS: [&str; 11] = [
    "Documento",
    "Nome do Cliente",
    "Mês de Referência",
    "Fatura 0",
    "Valor Fatura 0",
    "Fatura 1",
    "Valor Fatura 1",
    "Fatura 2",
    "Valor Fatura 2",
    "Fatura 3",
    "Valor Fatura 3",
];

const UTF8_BOM: &str = "\u{FEFF}";

/// Serializes invoice rows as a `;`-separated, fully quoted CSV with a BOM,
/// so spreadsheet tools in comma-decimal locales open it directly.
pub fn export_csv(rows: &[AggregatedInvoice]) -> ClientResult<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.as_bytes().to_vec());

    writer.write_record(EXPORT_HEADERS).map_err(map_csv_error)?;
    for row in rows {
        writer.write_record(export_record(row)).map_err(map_csv_error)?;
    }

    let mut bytes = writer
        .into_inner()
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    // Rows are joined, not terminated.
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok(bytes)
}

pub fn write_export(path: &Path, bytes: &[u8]) -> ClientResult<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|error| ClientError::export_write_failed(path, &error.to_string()))?;
    }
    fs::write(path, bytes).map_err(|error| ClientError::export_write_failed(path, &error.to_string()))
}

pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

fn export_record(row: &AggregatedInvoice) -> Vec<String> {
    let mut record = vec![
        row.client_id.clone(),
        row.client_name.clone(),
        row.reference_month.clone(),
    ];
    for slot in InvoiceSlot::ALL {
        record.push(slot.as_str().to_string());
        record.push(format_amount(row.slot_totals.get(slot)));
    }
    record
}

fn map_csv_error(error: csv::Error) -> ClientError {
    ClientError::internal_serialization(&error.to_string())
}
