use serde_json::{Map, Value};

use super::model::{
    ClientMovement, FIELD_CLIENT_ID, FIELD_CLIENT_NAME, FIELD_DAYS_OVERDUE, FIELD_EVENT_DATE,
    FIELD_FINAL_AMOUNT, FIELD_INVOICE_SLOT, FIELD_MOVEMENT_TYPE, FIELD_OVERDUE_COUNT,
    FIELD_REFERENCE_MONTH, FIELD_REFERENCE_YEAR,
};

/// Coerces one fetched row into a [`ClientMovement`].
///
/// Never fails: a missing or unusable field becomes `""` or `0.0`, and a row
/// that is not a JSON object becomes the all-default movement.
pub fn normalize(raw: &Value) -> ClientMovement {
    let Some(object) = raw.as_object() else {
        return ClientMovement::default();
    };

    ClientMovement {
        client_id: text_field(object, FIELD_CLIENT_ID),
        client_name: text_field(object, FIELD_CLIENT_NAME),
        movement_type: text_field(object, FIELD_MOVEMENT_TYPE),
        reference_year: text_field(object, FIELD_REFERENCE_YEAR),
        reference_month: text_field(object, FIELD_REFERENCE_MONTH),
        days_overdue_label: text_field(object, FIELD_DAYS_OVERDUE),
        overdue_day_count: number_field(object, FIELD_OVERDUE_COUNT),
        final_amount: number_field(object, FIELD_FINAL_AMOUNT),
        event_date: text_field(object, FIELD_EVENT_DATE),
        invoice_slot: text_field(object, FIELD_INVOICE_SLOT),
    }
}

/// Rows with no amount and no event date are noise from the spreadsheet
/// (blank or summary lines) and are dropped on load.
pub fn is_retained(movement: &ClientMovement) -> bool {
    movement.final_amount > 0.0 || !movement.event_date.is_empty()
}

pub fn normalize_page(rows: &[Value]) -> Vec<ClientMovement> {
    rows.iter()
        .map(normalize)
        .filter(is_retained)
        .collect::<Vec<ClientMovement>>()
}

fn text_field(object: &Map<String, Value>, name: &str) -> String {
    object.get(name).map(coerce_text).unwrap_or_default()
}

fn number_field(object: &Map<String, Value>, name: &str) -> f64 {
    object.get(name).map(coerce_number).unwrap_or(0.0)
}

/// Falsy values (`null`, `false`, `0`, `""`) collapse to the empty string.
pub(crate) fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Bool(true) => "true".to_string(),
        Value::String(text) => text.clone(),
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                if integer == 0 {
                    return String::new();
                }
                return integer.to_string();
            }
            if let Some(unsigned) = number.as_u64() {
                return unsigned.to_string();
            }
            match number.as_f64() {
                Some(float) if float != 0.0 && float.is_finite() => float.to_string(),
                _ => String::new(),
            }
        }
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

pub(crate) fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => parse_decimal(text),
        Value::Bool(true) => 1.0,
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if parsed.is_finite() { parsed } else { 0.0 }
}

fn parse_decimal(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if !trimmed
        .chars()
        .all(|character| character.is_ascii_digit() || matches!(character, '.' | '-' | '+' | 'e' | 'E'))
    {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}
