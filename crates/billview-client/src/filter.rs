use std::collections::HashSet;

use serde::Serialize;

use crate::records::ClientMovement;

pub const ALL_SENTINEL: &str = "all";

/// A categorical filter: either unconstrained or an exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Exactly(String),
}

impl Selection {
    pub fn parse(value: &str) -> Self {
        if value == ALL_SENTINEL {
            Self::All
        } else {
            Self::Exactly(value.to_string())
        }
    }

    pub fn from_option(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }

    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::All => true,
            Self::Exactly(expected) => expected == candidate,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_SENTINEL,
            Self::Exactly(value) => value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search_term: String,
    pub movement_type: Selection,
    pub year: Selection,
    pub month: Selection,
}

impl FilterCriteria {
    pub fn matches(&self, movement: &ClientMovement) -> bool {
        self.matches_search(movement)
            && self.movement_type.matches(&movement.movement_type)
            && self.year.matches(&movement.reference_year)
            && self.month.matches(&movement.reference_month)
    }

    /// Name matches ignore case; identifier matches are exact substrings.
    fn matches_search(&self, movement: &ClientMovement) -> bool {
        if self.search_term.is_empty() {
            return true;
        }
        let needle = self.search_term.to_lowercase();
        movement.client_name.to_lowercase().contains(&needle)
            || movement.client_id.contains(&self.search_term)
    }
}

pub fn filter_movements<'a>(
    movements: &'a [ClientMovement],
    criteria: &FilterCriteria,
) -> Vec<&'a ClientMovement> {
    movements
        .iter()
        .filter(|movement| criteria.matches(movement))
        .collect::<Vec<&ClientMovement>>()
}

/// Values offered by the categorical filters, taken from every loaded row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub movement_types: Vec<String>,
    pub years: Vec<String>,
    pub months: Vec<String>,
}

impl FilterOptions {
    pub fn from_movements(movements: &[ClientMovement]) -> Self {
        Self {
            movement_types: distinct_values(movements, |movement| &movement.movement_type),
            years: distinct_values(movements, |movement| &movement.reference_year),
            months: distinct_values(movements, |movement| &movement.reference_month),
        }
    }
}

fn distinct_values<F>(movements: &[ClientMovement], field: F) -> Vec<String>
where
    F: Fn(&ClientMovement) -> &String,
{
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for movement in movements {
        let value = field(movement);
        if value.is_empty() || !seen.insert(value.as_str()) {
            continue;
        }
        values.push(value.clone());
    }
    values
}
