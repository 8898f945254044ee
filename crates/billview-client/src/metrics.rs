use std::collections::HashSet;

use serde::Serialize;

use crate::aggregate::AggregatedInvoice;
use crate::records::{ClientMovement, InvoiceSlot};

/// Counts shown on the summary cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub distinct_clients: usize,
    pub not_yet_due: usize,
    /// Movements whose overdue count is exactly one.
    pub single_overdue_occurrence: usize,
    /// Per slot, aggregated groups with a positive total. Counted before the
    /// zero-row filter.
    pub slot_counts: [usize; 4],
}

impl DashboardMetrics {
    pub fn summarize(filtered: &[&ClientMovement], aggregated: &[AggregatedInvoice]) -> Self {
        let distinct_clients = filtered
            .iter()
            .filter(|movement| !movement.client_id.is_empty())
            .map(|movement| movement.client_id.as_str())
            .collect::<HashSet<&str>>()
            .len();

        let not_yet_due = filtered
            .iter()
            .filter(|movement| movement.is_not_yet_due())
            .count();

        let single_overdue_occurrence = filtered
            .iter()
            .filter(|movement| movement.overdue_day_count == 1.0)
            .count();

        let mut slot_counts = [0usize; 4];
        for slot in InvoiceSlot::ALL {
            slot_counts[slot.index()] = aggregated
                .iter()
                .filter(|row| row.slot_totals.get(slot) > 0.0)
                .count();
        }

        Self {
            distinct_clients,
            not_yet_due,
            single_overdue_occurrence,
            slot_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardMetrics;
    use crate::aggregate::aggregate;
    use crate::records::ClientMovement;

    fn movement(id: &str, label: &str, overdue: f64) -> ClientMovement {
        ClientMovement {
            client_id: id.to_string(),
            days_overdue_label: label.to_string(),
            overdue_day_count: overdue,
            ..ClientMovement::default()
        }
    }

    #[test]
    fn distinct_clients_skip_empty_identifiers() {
        let records = vec![
            movement("1", "", 0.0),
            movement("1", "", 0.0),
            movement("", "", 0.0),
            movement("2", "", 0.0),
        ];
        let filtered = records.iter().collect::<Vec<&ClientMovement>>();
        let metrics = DashboardMetrics::summarize(&filtered, &[]);
        assert_eq!(metrics.distinct_clients, 2);
    }

    #[test]
    fn single_overdue_is_a_literal_equality() {
        let records = vec![
            movement("1", "12", 1.0),
            movement("2", "30", 2.0),
            movement("3", "A VENCER", 0.0),
        ];
        let filtered = records.iter().collect::<Vec<&ClientMovement>>();
        let metrics = DashboardMetrics::summarize(&filtered, &[]);
        assert_eq!(metrics.single_overdue_occurrence, 1);
        assert_eq!(metrics.not_yet_due, 1);
    }

    #[test]
    fn slot_counts_use_the_unfiltered_aggregate() {
        let records = vec![
            ClientMovement {
                client_id: "1".to_string(),
                invoice_slot: "0".to_string(),
                final_amount: 10.0,
                ..ClientMovement::default()
            },
            ClientMovement {
                client_id: "1".to_string(),
                invoice_slot: "3".to_string(),
                final_amount: 5.0,
                ..ClientMovement::default()
            },
            ClientMovement {
                client_id: "2".to_string(),
                invoice_slot: "".to_string(),
                final_amount: 7.0,
                ..ClientMovement::default()
            },
        ];
        let filtered = records.iter().collect::<Vec<&ClientMovement>>();
        let aggregated = aggregate(filtered.iter().copied());
        assert_eq!(aggregated.len(), 2);
        let metrics = DashboardMetrics::summarize(&filtered, &aggregated);
        assert_eq!(metrics.slot_counts, [1, 0, 0, 1]);
    }
}
