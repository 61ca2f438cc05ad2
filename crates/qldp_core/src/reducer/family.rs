//! Reducer for the `family` slice.

use crate::action::{Action, FamilyAction};
use crate::model::record::FamilyRecord;
use std::sync::Arc;

/// Both `GET` and `ADD_PERSON` carry the full household as returned by the
/// backend, so either one replaces the slice.
pub fn family(state: &Arc<Option<FamilyRecord>>, action: &Action) -> Arc<Option<FamilyRecord>> {
    match action {
        Action::Family(FamilyAction::Get { family } | FamilyAction::AddPerson { family }) => {
            Arc::new(Some(family.clone()))
        }
        _ => Arc::clone(state),
    }
}
