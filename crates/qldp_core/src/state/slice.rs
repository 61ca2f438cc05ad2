//! Shape of record-holding slices.

use crate::model::record::RecordId;
use serde::Serialize;
use std::collections::BTreeMap;

/// Value of a record slice.
///
/// A `GET` stores a keyed collection; a `CREATE` overwrites the whole slice
/// with the one created record. Both serialize to the same wire shapes the
/// backend sends (`{"1": {...}}` vs `{...}`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EntitySlice<T> {
    Collection(BTreeMap<RecordId, T>),
    Single(T),
}

impl<T> Default for EntitySlice<T> {
    fn default() -> Self {
        Self::Collection(BTreeMap::new())
    }
}

impl<T> EntitySlice<T> {
    pub fn as_collection(&self) -> Option<&BTreeMap<RecordId, T>> {
        match self {
            Self::Collection(records) => Some(records),
            Self::Single(_) => None,
        }
    }

    pub fn as_single(&self) -> Option<&T> {
        match self {
            Self::Collection(_) => None,
            Self::Single(record) => Some(record),
        }
    }

    /// Number of records held (a single record counts as one).
    pub fn len(&self) -> usize {
        match self {
            Self::Collection(records) => records.len(),
            Self::Single(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
