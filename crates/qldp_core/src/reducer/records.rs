//! Reducers for the create/list record slices.
//!
//! These domains share the `people` semantics: `GET` stores the collection
//! and `CREATE` overwrites the slice with the single created record.

use crate::action::{Action, RecordAction};
use crate::model::record::{
    DeathRecord, IdCardRecord, StayRecord, StoryRecord, TempAbsentRecord, UserRecord,
};
use crate::state::slice::EntitySlice;
use std::sync::Arc;

/// Applies one create/list action to a record slice.
pub fn apply_record_action<T: Clone>(action: &RecordAction<T>) -> Arc<EntitySlice<T>> {
    match action {
        RecordAction::Get(records) => Arc::new(EntitySlice::Collection(records.clone())),
        RecordAction::Create(record) => Arc::new(EntitySlice::Single(record.clone())),
    }
}

pub fn users(
    state: &Arc<EntitySlice<UserRecord>>,
    action: &Action,
) -> Arc<EntitySlice<UserRecord>> {
    match action {
        Action::Users(action) => apply_record_action(action),
        _ => Arc::clone(state),
    }
}

pub fn temp_absents(
    state: &Arc<EntitySlice<TempAbsentRecord>>,
    action: &Action,
) -> Arc<EntitySlice<TempAbsentRecord>> {
    match action {
        Action::TempAbsents(action) => apply_record_action(action),
        _ => Arc::clone(state),
    }
}

pub fn stays(
    state: &Arc<EntitySlice<StayRecord>>,
    action: &Action,
) -> Arc<EntitySlice<StayRecord>> {
    match action {
        Action::Stays(action) => apply_record_action(action),
        _ => Arc::clone(state),
    }
}

pub fn id_cards(
    state: &Arc<EntitySlice<IdCardRecord>>,
    action: &Action,
) -> Arc<EntitySlice<IdCardRecord>> {
    match action {
        Action::IdCard(action) => apply_record_action(action),
        _ => Arc::clone(state),
    }
}

pub fn stories(
    state: &Arc<EntitySlice<StoryRecord>>,
    action: &Action,
) -> Arc<EntitySlice<StoryRecord>> {
    match action {
        Action::Stories(action) => apply_record_action(action),
        _ => Arc::clone(state),
    }
}

pub fn deaths(
    state: &Arc<EntitySlice<DeathRecord>>,
    action: &Action,
) -> Arc<EntitySlice<DeathRecord>> {
    match action {
        Action::Deaths(action) => apply_record_action(action),
        _ => Arc::clone(state),
    }
}

#[cfg(test)]
mod tests {
    use super::{stays, temp_absents};
    use crate::action::{Action, RecordAction};
    use crate::model::record::{StayRecord, TempAbsentRecord};
    use crate::state::slice::EntitySlice;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    #[test]
    fn temp_absent_create_overwrites_listing() {
        let permit = TempAbsentRecord {
            id: Some(3),
            temp_absent_code: Some("TV2020AB".to_string()),
            temp_residence_place: Some("Da Nang".to_string()),
            ..TempAbsentRecord::default()
        };
        let listing = temp_absents(
            &Arc::new(EntitySlice::default()),
            &Action::TempAbsents(RecordAction::Get(BTreeMap::from([(
                1,
                TempAbsentRecord::default(),
            )]))),
        );
        let created = temp_absents(
            &listing,
            &Action::TempAbsents(RecordAction::Create(permit.clone())),
        );
        assert_eq!(created.as_single(), Some(&permit));
    }

    #[test]
    fn other_domains_leave_stays_untouched() {
        let state = Arc::new(EntitySlice::<StayRecord>::default());
        let next = stays(
            &state,
            &Action::TempAbsents(RecordAction::Create(TempAbsentRecord::default())),
        );
        assert!(Arc::ptr_eq(&state, &next));
    }
}
