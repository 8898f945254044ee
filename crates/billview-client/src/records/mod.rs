mod model;
mod normalize;

pub use model::{
    ClientMovement, FIELD_CLIENT_ID, FIELD_CLIENT_NAME, FIELD_DAYS_OVERDUE, FIELD_EVENT_DATE,
    FIELD_FINAL_AMOUNT, FIELD_INVOICE_SLOT, FIELD_MOVEMENT_TYPE, FIELD_OVERDUE_COUNT,
    FIELD_REFERENCE_MONTH, FIELD_REFERENCE_YEAR, InvoiceSlot, NOT_YET_DUE_LABEL,
};
pub use normalize::{is_retained, normalize, normalize_page};
