use serde::Serialize;

pub const FIELD_CLIENT_ID: &str = "DOCUMENTO_CLIENTE";
pub const FIELD_CLIENT_NAME: &str = "NOME_CLIENTE";
pub const FIELD_MOVEMENT_TYPE: &str = "TIPO_MOVIMENTO";
pub const FIELD_REFERENCE_YEAR: &str = "ANO REFERENCIA";
pub const FIELD_REFERENCE_MONTH: &str = "MÊS REFERENCIA";
pub const FIELD_DAYS_OVERDUE: &str = "DIAS EM ATRASO";
pub const FIELD_OVERDUE_COUNT: &str = "CONTAGEM TOTAL DIAS EM ATRASOS";
pub const FIELD_FINAL_AMOUNT: &str = "VALOR_FINAL";
pub const FIELD_EVENT_DATE: &str = "DATA_EVENTO";
pub const FIELD_INVOICE_SLOT: &str = "FATURA";

/// Label the source uses for invoices that are not overdue yet.
pub const NOT_YET_DUE_LABEL: &str = "A VENCER";

/// One normalized billing event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClientMovement {
    pub client_id: String,
    pub client_name: String,
    pub movement_type: String,
    pub reference_year: String,
    pub reference_month: String,
    pub days_overdue_label: String,
    pub overdue_day_count: f64,
    pub final_amount: f64,
    pub event_date: String,
    pub invoice_slot: String,
}

impl ClientMovement {
    pub fn slot(&self) -> Option<InvoiceSlot> {
        InvoiceSlot::parse(&self.invoice_slot)
    }

    pub fn is_not_yet_due(&self) -> bool {
        self.days_overdue_label == NOT_YET_DUE_LABEL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum InvoiceSlot {
    Zero,
    One,
    Two,
    Three,
}

impl InvoiceSlot {
    pub const ALL: [InvoiceSlot; 4] = [Self::Zero, Self::One, Self::Two, Self::Three];

    /// Only the exact strings `"0"` through `"3"` name a slot.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "0" => Some(Self::Zero),
            "1" => Some(Self::One),
            "2" => Some(Self::Two),
            "3" => Some(Self::Three),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
        }
    }
}
