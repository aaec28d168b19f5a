//! The structured answers collected during an interview.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

use crate::state::CandidateField;

/// Raw answers keyed by field.
///
/// Fields are write-once: the first value recorded for a field is kept for
/// the lifetime of the record. Serializes as a JSON object with the
/// snake_case field names as keys, in collection order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateRecord {
    fields: BTreeMap<CandidateField, String>,
}

impl CandidateRecord {
    /// Returns the recorded value of `field`.
    #[inline]
    pub fn get(&self, field: CandidateField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Returns whether `field` has been recorded.
    #[inline]
    pub fn contains(&self, field: CandidateField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Returns the number of recorded fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns whether nothing has been recorded yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the recorded fields in collection order.
    pub fn iter(&self) -> impl Iterator<Item = (CandidateField, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }

    /// Records `value` for `field`. Returns `false` and leaves the record
    /// untouched if the field already has a value.
    pub(crate) fn insert(&mut self, field: CandidateField, value: &str) -> bool {
        match self.fields.entry(field) {
            Entry::Vacant(entry) => {
                entry.insert(value.to_owned());
                true
            }
            Entry::Occupied(_) => false,
        }
    }
}
