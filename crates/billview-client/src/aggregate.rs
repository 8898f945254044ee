use std::collections::HashMap;

use serde::Serialize;

use crate::records::{ClientMovement, InvoiceSlot};

/// Grouping key for invoice rows: one row per client per reference month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct InvoiceKey {
    pub client_id: String,
    pub reference_month: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SlotTotals([f64; 4]);

impl SlotTotals {
    pub fn get(&self, slot: InvoiceSlot) -> f64 {
        self.0[slot.index()]
    }

    pub fn add(&mut self, slot: InvoiceSlot, amount: f64) {
        self.0[slot.index()] += amount;
    }

    pub fn as_array(&self) -> [f64; 4] {
        self.0
    }

    pub fn has_positive(&self) -> bool {
        self.0.iter().any(|total| *total > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedInvoice {
    pub client_id: String,
    pub client_name: String,
    pub reference_month: String,
    pub slot_totals: SlotTotals,
}

impl AggregatedInvoice {
    pub fn key(&self) -> InvoiceKey {
        InvoiceKey {
            client_id: self.client_id.clone(),
            reference_month: self.reference_month.clone(),
        }
    }
}

/// Groups movements by client and reference month, summing `final_amount`
/// into the movement's invoice slot.
///
/// Groups come out in the order their key was first seen. A movement without
/// a valid slot still opens its group, it just adds nothing.
pub fn aggregate<'a, I>(movements: I) -> Vec<AggregatedInvoice>
where
    I: IntoIterator<Item = &'a ClientMovement>,
{
    let mut index_by_key: HashMap<InvoiceKey, usize> = HashMap::new();
    let mut groups: Vec<AggregatedInvoice> = Vec::new();

    for movement in movements {
        let key = InvoiceKey {
            client_id: movement.client_id.clone(),
            reference_month: movement.reference_month.clone(),
        };
        let position = *index_by_key.entry(key).or_insert_with(|| {
            groups.push(AggregatedInvoice {
                client_id: movement.client_id.clone(),
                client_name: movement.client_name.clone(),
                reference_month: movement.reference_month.clone(),
                slot_totals: SlotTotals::default(),
            });
            groups.len() - 1
        });

        if let Some(slot) = movement.slot() {
            groups[position].slot_totals.add(slot, movement.final_amount);
        }
    }

    groups
}

/// Rows for the invoice table and the export: groups with at least one
/// positive slot total.
pub fn invoice_rows(aggregated: &[AggregatedInvoice]) -> Vec<AggregatedInvoice> {
    aggregated
        .iter()
        .filter(|row| row.slot_totals.has_positive())
        .cloned()
        .collect::<Vec<AggregatedInvoice>>()
}
