use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::guests::model::Guest;

/// Reserved seating categories that never get a radial table.
///
/// Both sets are configuration: the head table and the cheering section are identified by group
/// key or by participation category, whichever the guest list uses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Exclusions {
    /// Group keys excluded from standard tables.
    pub groups: BTreeSet<String>,
    /// Participation categories excluded from standard tables.
    pub participation: BTreeSet<String>,
}

impl Exclusions {
    /// Exclusions by group key only.
    pub fn for_groups<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: keys.into_iter().map(Into::into).collect(),
            participation: BTreeSet::new(),
        }
    }

    /// Add excluded participation categories.
    pub fn with_participation<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participation
            .extend(categories.into_iter().map(Into::into));
        self
    }

    /// `true` when `guest` belongs at a standard radial table.
    pub fn admits(&self, guest: &Guest) -> bool {
        let group = guest.group.trim();
        if group.is_empty() || self.groups.contains(group) {
            return false;
        }
        match guest.participation.as_deref().map(str::trim) {
            Some(p) => !self.participation.contains(p),
            None => true,
        }
    }
}

/// A table key plus its guests in seat order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TableGroup {
    /// Group label, e.g. `"A"`.
    pub key: String,
    /// Guests sorted by seat order.
    pub guests: Vec<Guest>,
}

/// Parse a `tableOrder` value. `None` means the value was present but not an integer.
pub fn parse_table_order(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0);
    }
    s.parse::<i64>().ok()
}

/// Seat order used for sorting: unparseable or missing values sort as `0`.
pub fn seat_order(guest: &Guest) -> i64 {
    parse_table_order(&guest.table_order).unwrap_or(0)
}

/// Partition guests into per-table buckets and sort each bucket by seat order.
///
/// Buckets are keyed by the trimmed group label and iterate in lexicographic key order. The sort
/// is stable, so guests sharing a `tableOrder` keep their input order.
pub fn group_guests(guests: &[Guest], exclusions: &Exclusions) -> BTreeMap<String, Vec<Guest>> {
    let mut buckets: BTreeMap<String, Vec<(i64, Guest)>> = BTreeMap::new();

    for guest in guests {
        if !exclusions.admits(guest) {
            continue;
        }

        let order = match parse_table_order(&guest.table_order) {
            Some(v) => v,
            None => {
                tracing::warn!(
                    id = %guest.id,
                    name = %guest.name,
                    raw = %guest.table_order,
                    "unparseable tableOrder, seating as 0"
                );
                0
            }
        };

        buckets
            .entry(guest.group.trim().to_string())
            .or_default()
            .push((order, guest.clone()));
    }

    buckets
        .into_iter()
        .map(|(key, mut bucket)| {
            bucket.sort_by_key(|(order, _)| *order);
            (key, bucket.into_iter().map(|(_, g)| g).collect())
        })
        .collect()
}

/// Same as [`group_guests`], flattened into [`TableGroup`] values in key order.
pub fn table_groups(guests: &[Guest], exclusions: &Exclusions) -> Vec<TableGroup> {
    group_guests(guests, exclusions)
        .into_iter()
        .map(|(key, guests)| TableGroup { key, guests })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/guests/group.rs"]
mod tests;
